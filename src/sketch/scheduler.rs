use std::time::{Duration, Instant};

/// Delay after the last drawing activity before a recognition request fires
/// on its own.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(1600);

/// Single-slot cancellable deadline. At most one trigger is armed at a time;
/// arming replaces any earlier deadline, so cancel-before-rearm is inherent
/// rather than caller discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTrigger {
    quiescence: Duration,
    deadline: Option<Instant>,
}

impl IdleTrigger {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiescence);
    }

    /// Disarms any pending deadline. No-op when none is armed.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Reports whether the deadline has passed, consuming it so the trigger
    /// fires exactly once per arming.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Earliest instant at which `poll` would fire, for repaint scheduling.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Default for IdleTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}
