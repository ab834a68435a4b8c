use crate::sketch::model::{Point, Stroke};

/// Line segment to paint incrementally while a gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
enum SessionState {
    Idle,
    Active { stroke: Stroke, last: Point },
}

/// Gesture state machine. A gesture runs from pointer-down to pointer-up and
/// yields exactly one stroke, holding at least its starting point.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchSession {
    state: SessionState,
}

impl Default for SketchSession {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }
}

impl SketchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    /// Begins a gesture at `point`. A pointer-down while a gesture is already
    /// running is ignored, same as a move while idle.
    pub fn pointer_down(&mut self, point: Point) {
        if self.is_active() {
            return;
        }
        self.state = SessionState::Active {
            stroke: Stroke::begin(point),
            last: point,
        };
    }

    /// Samples a move. Returns the segment from the previous sample so the
    /// caller can paint it; `None` while idle.
    pub fn pointer_move(&mut self, point: Point) -> Option<Segment> {
        match &mut self.state {
            SessionState::Idle => None,
            SessionState::Active { stroke, last } => {
                let segment = Segment {
                    from: *last,
                    to: point,
                };
                stroke.push(point);
                *last = point;
                Some(segment)
            }
        }
    }

    /// Ends the gesture, returning the sealed stroke. `None` while idle.
    pub fn pointer_up(&mut self) -> Option<Stroke> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Idle => None,
            SessionState::Active { stroke, .. } => Some(stroke),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_while_idle_is_ignored() {
        let mut session = SketchSession::new();
        assert_eq!(session.pointer_move(Point::new(5.0, 5.0)), None);
        assert!(!session.is_active());
    }

    #[test]
    fn gesture_without_movement_seals_a_single_point_stroke() {
        let mut session = SketchSession::new();
        session.pointer_down(Point::new(7.0, 9.0));
        let stroke = session.pointer_up().expect("sealed stroke");
        assert_eq!(stroke.points(), &[Point::new(7.0, 9.0)]);
        assert!(!session.is_active());
    }

    #[test]
    fn moves_append_points_and_report_segments() {
        let mut session = SketchSession::new();
        session.pointer_down(Point::new(10.0, 10.0));

        let first = session.pointer_move(Point::new(30.0, 30.0)).expect("segment");
        assert_eq!(first.from, Point::new(10.0, 10.0));
        assert_eq!(first.to, Point::new(30.0, 30.0));

        let second = session.pointer_move(Point::new(50.0, 50.0)).expect("segment");
        assert_eq!(second.from, Point::new(30.0, 30.0));
        assert_eq!(second.to, Point::new(50.0, 50.0));

        let stroke = session.pointer_up().expect("sealed stroke");
        assert_eq!(
            stroke.points(),
            &[
                Point::new(10.0, 10.0),
                Point::new(30.0, 30.0),
                Point::new(50.0, 50.0)
            ]
        );
    }

    #[test]
    fn pointer_down_during_gesture_keeps_current_stroke() {
        let mut session = SketchSession::new();
        session.pointer_down(Point::new(1.0, 1.0));
        session.pointer_down(Point::new(99.0, 99.0));
        let stroke = session.pointer_up().expect("sealed stroke");
        assert_eq!(stroke.points(), &[Point::new(1.0, 1.0)]);
    }

    #[test]
    fn pointer_up_while_idle_yields_nothing() {
        let mut session = SketchSession::new();
        assert_eq!(session.pointer_up(), None);
    }
}
