//! The cooperative work loop.
//!
//! A [`Scheduler`] owns the fiber tree of the current render and the cursor
//! naming the next fiber to process. The host calls [`Scheduler::work_loop`]
//! once per idle period; the loop processes fibers until the deadline runs
//! low or the tree is exhausted, then asks the host for another idle
//! callback. It re-arms unconditionally, so a render requested while idle is
//! picked up by the next callback without a separate wake-up.
//!
//! # States
//!
//! ```text
//!            render()                 host callback
//!   Idle ───────────────▶ Scheduled ───────────────▶ Running
//!                             ▲                         │
//!                             └───── re-request ────────┘
//! ```
//!
//! A new render replaces the cursor and fiber tree; whatever the previous
//! render had not yet visited is abandoned.

use std::time::Duration;

use didact_dom::HostDocument;
use strum_macros::Display;

use crate::deadline::IdleDeadline;
use crate::element::Element;
use crate::error::RenderError;
use crate::fiber::{FiberId, FiberTree};
use crate::work::perform_unit_of_work;

/// [requestIdleCallback § 5.1](https://w3c.github.io/requestidlecallback/#the-requestidlecallback-method)
///
/// The host side of the loop: queue one future idle callback.
pub trait IdleHost {
    /// Arrange for [`Scheduler::work_loop`] to be called during a later idle
    /// period.
    fn request_idle_callback(&mut self);
}

/// Tuning for the work loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// The loop yields once less than this much time remains in the slice.
    pub yield_threshold: Duration,
}

impl SchedulerConfig {
    /// Yield threshold used by browser hosts: one millisecond.
    pub const DEFAULT_YIELD_THRESHOLD: Duration = Duration::from_millis(1);
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            yield_threshold: Self::DEFAULT_YIELD_THRESHOLD,
        }
    }
}

/// Where the loop is in its callback cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoopState {
    /// No callback has been requested.
    Idle,
    /// A callback is outstanding.
    Scheduled,
    /// Inside [`Scheduler::work_loop`].
    Running,
}

/// How an idle slice ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SliceOutcome {
    /// The cursor was empty on entry.
    #[strum(serialize = "no work")]
    NoWork,
    /// The last pending fiber was processed during this slice.
    #[strum(serialize = "drained")]
    Drained,
    /// The deadline ran low with fibers still pending.
    #[strum(serialize = "yielded")]
    Yielded,
}

/// What one call to [`Scheduler::work_loop`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceReport {
    /// Units of work performed.
    pub units: usize,
    /// Why the slice ended.
    pub outcome: SliceOutcome,
    /// Time left at the last deadline check, or `None` if the deadline was
    /// never consulted.
    pub remaining: Option<Duration>,
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Idle callbacks handled.
    pub slices: u64,
    /// Units of work performed, failed ones excluded.
    pub units: u64,
    /// Renders requested.
    pub renders: u64,
}

/// Owns the in-progress fiber tree and the cursor into it.
#[derive(Debug)]
pub struct Scheduler<N> {
    config: SchedulerConfig,
    fibers: Option<FiberTree<N>>,
    next_unit_of_work: Option<FiberId>,
    state: LoopState,
    stats: SchedulerStats,
}

impl<N: Copy> Default for Scheduler<N> {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl<N: Copy> Scheduler<N> {
    /// Create an idle scheduler with no work.
    #[must_use]
    pub const fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            fibers: None,
            next_unit_of_work: None,
            state: LoopState::Idle,
            stats: SchedulerStats {
                slices: 0,
                units: 0,
                renders: 0,
            },
        }
    }

    /// Render `element` into `container`.
    ///
    /// Seeds a fresh fiber tree whose root wraps `container`, points the
    /// cursor at it, and requests an idle callback unless one is already
    /// outstanding. Nothing is mounted until the host calls back.
    pub fn render(&mut self, element: Element, container: N, idle: &mut impl IdleHost) {
        if self.has_pending_work() {
            tracing::debug!(
                abandoned_at = ?self.next_unit_of_work,
                "render requested before the previous traversal finished; abandoning it"
            );
        }
        tracing::debug!(elements = element.count(), "render requested");

        self.fibers = Some(FiberTree::new(container, element));
        self.next_unit_of_work = Some(FiberId::ROOT);
        self.stats.renders += 1;

        if self.state == LoopState::Idle {
            self.state = LoopState::Scheduled;
            idle.request_idle_callback();
        }
    }

    /// Handle one idle callback.
    ///
    /// Processes fibers while work is pending and at least
    /// [`SchedulerConfig::yield_threshold`] (and more than zero) remains on
    /// `deadline`, then requests the next callback. The request is made even
    /// when no work was pending or a unit failed.
    ///
    /// # Errors
    ///
    /// Returns the first [`RenderError`] raised by a unit of work. The cursor
    /// stays on the failing fiber, so the next slice retries from there.
    pub fn work_loop<D, T, I>(
        &mut self,
        doc: &mut D,
        deadline: &T,
        idle: &mut I,
    ) -> Result<SliceReport, RenderError<D::Error>>
    where
        D: HostDocument<Node = N>,
        T: IdleDeadline + ?Sized,
        I: IdleHost + ?Sized,
    {
        self.state = LoopState::Running;
        self.stats.slices += 1;

        let result = self.run_slice(doc, deadline);
        match &result {
            Ok(report) => tracing::debug!(
                units = report.units,
                outcome = %report.outcome,
                remaining = ?report.remaining,
                "idle slice finished"
            ),
            Err(err) => tracing::warn!(fiber = ?err.fiber(), "unit of work failed: {err}"),
        }

        self.state = LoopState::Scheduled;
        idle.request_idle_callback();
        result
    }

    fn run_slice<D, T>(
        &mut self,
        doc: &mut D,
        deadline: &T,
    ) -> Result<SliceReport, RenderError<D::Error>>
    where
        D: HostDocument<Node = N>,
        T: IdleDeadline + ?Sized,
    {
        let mut units = 0;
        let mut remaining = None;
        let Some(fibers) = self.fibers.as_mut() else {
            return Ok(SliceReport {
                units,
                outcome: SliceOutcome::NoWork,
                remaining,
            });
        };
        if self.next_unit_of_work.is_none() {
            return Ok(SliceReport {
                units,
                outcome: SliceOutcome::NoWork,
                remaining,
            });
        }

        while let Some(id) = self.next_unit_of_work {
            let left = deadline.time_remaining();
            remaining = Some(left);
            if !has_time(left, self.config.yield_threshold) {
                return Ok(SliceReport {
                    units,
                    outcome: SliceOutcome::Yielded,
                    remaining,
                });
            }
            tracing::trace!(fiber = ?id, "performing unit of work");
            self.next_unit_of_work = perform_unit_of_work(fibers, doc, id)?;
            units += 1;
            self.stats.units += 1;
        }

        Ok(SliceReport {
            units,
            outcome: SliceOutcome::Drained,
            remaining,
        })
    }

    /// Whether a fiber is waiting to be processed.
    #[must_use]
    pub const fn has_pending_work(&self) -> bool {
        self.next_unit_of_work.is_some()
    }

    /// The next fiber to process, if any.
    #[must_use]
    pub const fn cursor(&self) -> Option<FiberId> {
        self.next_unit_of_work
    }

    /// The fiber tree of the most recent render.
    #[must_use]
    pub const fn fibers(&self) -> Option<&FiberTree<N>> {
        self.fibers.as_ref()
    }

    /// Current position in the callback cycle.
    #[must_use]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Lifetime counters.
    #[must_use]
    pub const fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// The configuration this scheduler was created with.
    #[must_use]
    pub const fn config(&self) -> SchedulerConfig {
        self.config
    }
}

fn has_time(remaining: Duration, threshold: Duration) -> bool {
    !remaining.is_zero() && remaining >= threshold
}
