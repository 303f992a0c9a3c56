//! Cooperative one-shot timers for the overlay's two debounce queues: the
//! redraw delay and the field-of-view marker scan. No threads are involved;
//! the owner polls with an explicit clock from its event loop, which also
//! keeps every timing test deterministic.

use crate::core::constants::DEFAULT_REDRAW_DELAY_MS;
use instant::{Duration, Instant};

/// Cancel-then-reschedule one-shot timer. At most one deadline is ever
/// pending; a new `schedule` supersedes the old deadline, it never queues a
/// second one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending deadline with `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drops the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// One-shot firing: returns true at most once per `schedule`, when the
    /// deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Debounced redraw requests for the route overlay.
///
/// Redrawing on the same event that moved the viewport races the engine's
/// own transform update and paints one visibly wrong frame, so execution is
/// pushed past the engine's settle point by a small positive delay.
#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    timer: Debouncer,
    executed: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(DEFAULT_REDRAW_DELAY_MS))
    }

    /// A zero delay still races the engine; keep it strictly positive.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            timer: Debouncer::new(delay.max(Duration::from_millis(1))),
            executed: 0,
        }
    }

    /// Cancels any pending redraw and schedules a new one.
    pub fn request_redraw(&mut self, now: Instant) {
        self.timer.schedule(now);
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// True when the delayed redraw should run now. N requests inside the
    /// window collapse into a single firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.fire_if_due(now) {
            self.executed += 1;
            return true;
        }
        false
    }

    /// Number of redraws that have actually fired.
    pub fn executed(&self) -> u64 {
        self.executed
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new()
    }
}
