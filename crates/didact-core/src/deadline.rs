//! Idle-period time budgets.
//!
//! A host grants the scheduler an [`IdleDeadline`] each time it calls back.
//! The deadline only answers "how much time is left"; the host may shrink
//! it to zero at any moment, and the scheduler checks it between units.

use std::time::{Duration, Instant};

/// [requestIdleCallback § 4.3 IdleDeadline](https://w3c.github.io/requestidlecallback/#the-idledeadline-interface)
///
/// "Each IdleDeadline has an associated deadline … timeRemaining() returns
/// the remaining duration before the deadline expires."
pub trait IdleDeadline {
    /// Time left in this idle period. Zero means yield now.
    fn time_remaining(&self) -> Duration;
}

impl<F: Fn() -> Duration + ?Sized> IdleDeadline for F {
    fn time_remaining(&self) -> Duration {
        self()
    }
}

/// A wall-clock budget starting when the slice is created.
#[derive(Debug, Clone, Copy)]
pub struct TimeSlice {
    start: Instant,
    budget: Duration,
}

impl TimeSlice {
    /// Start a slice of `budget` now.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    /// The budget the slice was granted.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }
}

impl IdleDeadline for TimeSlice {
    fn time_remaining(&self) -> Duration {
        self.budget.saturating_sub(self.start.elapsed())
    }
}

/// A slice that never runs out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl IdleDeadline for Unbounded {
    fn time_remaining(&self) -> Duration {
        Duration::MAX
    }
}

/// A slice with no time at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhausted;

impl IdleDeadline for Exhausted {
    fn time_remaining(&self) -> Duration {
        Duration::ZERO
    }
}
