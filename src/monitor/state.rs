use std::time::{Duration, Instant};

/// Cooldown bookkeeping for alert delivery. One timer is shared by the CPU
/// and RAM reasons. `None` means no alert has ever been sent, so the first
/// qualifying breach fires immediately.
#[derive(Debug, Default)]
pub struct AlertState {
    last_alert: Option<Instant>,
}

impl AlertState {
    pub(crate) fn cooldown_elapsed(&self, cooldown_secs: u64, now: Instant) -> bool {
        match self.last_alert {
            None => true,
            Some(last) => now.duration_since(last) > Duration::from_secs(cooldown_secs),
        }
    }

    pub(crate) fn record_alert(&mut self, now: Instant) {
        self.last_alert = Some(now);
    }

    #[cfg(test)]
    pub(crate) fn last_alert(&self) -> Option<Instant> {
        self.last_alert
    }
}
