//! Debounce for snapshot writes

use std::time::{Duration, Instant};

/// Coalesces a burst of tab changes into one write.
///
/// Each change pushes the deadline out to `delay` after the latest change.
#[derive(Debug, Clone)]
pub struct PersistScheduler {
    delay: Duration,
    last_change: Option<Instant>,
}

impl PersistScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_change: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a change at `now`
    pub fn mark_dirty(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    /// When the pending write is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.last_change.map(|t| t + self.delay)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline().is_some_and(|deadline| now >= deadline)
    }

    /// Consume the pending write if it is due
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.last_change = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.last_change = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_is_coalesced_until_quiet() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        let mut scheduler = PersistScheduler::new(ms(250));
        assert!(!scheduler.take_due(start));

        scheduler.mark_dirty(start);
        scheduler.mark_dirty(start + ms(200));
        assert!(!scheduler.take_due(start + ms(300)));
        assert!(scheduler.take_due(start + ms(450)));
        assert!(!scheduler.is_dirty());
        assert!(!scheduler.take_due(start + ms(900)));
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let now = Instant::now();
        let mut scheduler = PersistScheduler::new(Duration::ZERO);
        scheduler.mark_dirty(now);
        assert!(scheduler.take_due(now));
    }
}
