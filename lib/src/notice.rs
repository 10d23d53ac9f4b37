use std::time::{Duration, Instant};

/// A transient message shown for a fixed time, like a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    shown_at: Instant,
    duration: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, shown_at: Instant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at,
            duration,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }

    /// Time left before the notice disappears
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}
