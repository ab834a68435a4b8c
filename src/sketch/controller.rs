use crate::settings::Settings;
use crate::sketch::history::StrokeHistory;
use crate::sketch::messages::{DisplayState, TaggedOutcome};
use crate::sketch::model::{Point, StrokeStyle};
use crate::sketch::render::{draw_segment, replay, RgbaBuffer};
use crate::sketch::scheduler::IdleTrigger;
use crate::sketch::service::RecognitionService;
use crate::sketch::session::SketchSession;
use crate::sketch::snapshot::{encode_png_base64, flatten_alpha_to_white};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Owns the whole sketching state: gesture session, stroke history, idle
/// trigger, recognition service handle, and the canvas surface. All mutation
/// goes through its operations so the history/replay invariants hold no
/// matter how the GUI wires its events.
pub struct SketchController {
    session: SketchSession,
    history: StrokeHistory,
    trigger: IdleTrigger,
    service: RecognitionService,
    surface: RgbaBuffer,
    style: StrokeStyle,
    display: Option<DisplayState>,
    surface_dirty: bool,
}

impl SketchController {
    pub fn new(settings: &Settings, canvas_size: (u32, u32)) -> Self {
        Self {
            session: SketchSession::new(),
            history: StrokeHistory::default(),
            trigger: IdleTrigger::new(Duration::from_millis(settings.quiescence_ms)),
            service: RecognitionService::new(
                settings.endpoint.clone(),
                Duration::from_secs(settings.request_timeout_secs),
            ),
            surface: RgbaBuffer::new(canvas_size.0, canvas_size.1),
            style: StrokeStyle {
                width: settings.stroke_width,
                ..StrokeStyle::default()
            },
            display: None,
            surface_dirty: true,
        }
    }

    /// Starts a gesture: the idle trigger is disarmed so an inference call
    /// can never interrupt active drawing, and the starting point gets its
    /// dot so the surface matches what a later replay would paint.
    pub fn pointer_down(&mut self, point: Point) {
        if self.session.is_active() {
            return;
        }
        self.trigger.cancel();
        self.session.pointer_down(point);
        draw_segment(&mut self.surface, point, point, self.style);
        self.surface_dirty = true;
    }

    pub fn pointer_move(&mut self, point: Point) {
        if let Some(segment) = self.session.pointer_move(point) {
            draw_segment(&mut self.surface, segment.from, segment.to, self.style);
            self.surface_dirty = true;
        }
    }

    /// Ends the gesture, sealing the stroke into history and re-arming the
    /// idle trigger so recognition fires once the user pauses.
    pub fn pointer_up(&mut self, now: Instant) {
        if let Some(stroke) = self.session.pointer_up() {
            debug!(points = stroke.len(), "stroke sealed into history");
            self.history.append(stroke);
            self.trigger.cancel();
            self.trigger.arm(now);
        }
    }

    /// Drops the most recent stroke and replays. Undo counts as drawing
    /// activity, so the idle trigger is restarted.
    pub fn undo(&mut self, now: Instant) {
        self.history.undo_last();
        replay(&mut self.surface, &self.history, self.style);
        self.surface_dirty = true;
        self.trigger.cancel();
        self.trigger.arm(now);
    }

    /// Empties the history and blanks the surface. The idle trigger is left
    /// as it was.
    pub fn clear(&mut self) {
        self.history.clear();
        replay(&mut self.surface, &self.history, self.style);
        self.surface_dirty = true;
    }

    /// Ships the current canvas to the recognizer, bypassing the idle
    /// trigger without disturbing its state. Flattens transparency to white
    /// on the visible surface, encodes, and submits on a worker thread.
    pub fn request_prediction(&mut self) {
        flatten_alpha_to_white(&mut self.surface);
        self.surface_dirty = true;

        match encode_png_base64(&self.surface) {
            Ok(snapshot) => {
                let seq = self.service.submit(snapshot);
                debug!(seq, "recognition request submitted");
            }
            Err(err) => {
                warn!(error = %err, "snapshot encoding failed");
                self.display = Some(DisplayState::Unavailable {
                    message: err.to_string(),
                });
            }
        }
    }

    /// Drives time-based work: fires the idle trigger when its quiescence
    /// deadline has passed and drains finished recognition requests.
    pub fn tick(&mut self, now: Instant) {
        if self.trigger.poll(now) {
            debug!("idle trigger fired");
            self.request_prediction();
        }
        for outcome in self.service.try_drain() {
            self.apply_outcome(outcome);
        }
    }

    /// Applies one recognition outcome. Replies overtaken by a newer request
    /// are discarded so the display always reflects the most recently issued
    /// request. Returns whether the display was updated.
    pub fn apply_outcome(&mut self, tagged: TaggedOutcome) -> bool {
        if tagged.seq < self.service.latest_seq() {
            debug!(
                seq = tagged.seq,
                latest = self.service.latest_seq(),
                "discarding stale recognition reply"
            );
            return false;
        }
        self.display = Some(DisplayState::from_outcome(tagged.outcome));
        true
    }

    /// Resizes the canvas surface, replaying the history into the new size.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        if self.surface.width == width && self.surface.height == height {
            return;
        }
        self.surface = RgbaBuffer::new(width.max(1), height.max(1));
        replay(&mut self.surface, &self.history, self.style);
        self.surface_dirty = true;
    }

    pub fn display(&self) -> Option<&DisplayState> {
        self.display.as_ref()
    }

    pub fn surface(&self) -> &RgbaBuffer {
        &self.surface
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_active()
    }

    pub fn trigger_armed(&self) -> bool {
        self.trigger.is_armed()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.trigger.deadline()
    }

    /// Sequence number of the newest issued request; replies tagged lower
    /// than this are stale.
    pub fn latest_request_seq(&self) -> u64 {
        self.service.latest_seq()
    }

    /// True once per surface change; the GUI uses it to re-upload the
    /// texture only when needed.
    pub fn take_surface_dirty(&mut self) -> bool {
        std::mem::take(&mut self.surface_dirty)
    }
}
