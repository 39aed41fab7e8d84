//! An in-process idle callback queue.
//!
//! Browser hosts drive the scheduler from `requestIdleCallback`. Headless
//! hosts (the CLI, tests) use [`IdleLoop`] instead: it remembers whether a
//! callback is outstanding and fires it when asked, handing the scheduler a
//! deadline of the caller's choosing.

use std::time::Duration;

use didact_dom::HostDocument;

use crate::deadline::{IdleDeadline, TimeSlice};
use crate::error::RenderError;
use crate::scheduler::{IdleHost, Scheduler, SliceReport};

/// Single-threaded stand-in for the host's idle callback queue.
///
/// Repeated requests before a dispatch coalesce into one callback, matching
/// a scheduler that only ever has one callback outstanding.
#[derive(Debug, Default)]
pub struct IdleLoop {
    pending: bool,
    requests: u64,
}

impl IdleHost for IdleLoop {
    fn request_idle_callback(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}

/// Totals for one [`IdleLoop::run_until_idle`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Idle callbacks dispatched.
    pub slices: usize,
    /// Units of work performed across those callbacks.
    pub units: usize,
    /// Whether the scheduler ran out of work before the slice limit.
    pub completed: bool,
}

impl IdleLoop {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a callback is waiting to be dispatched.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending
    }

    /// Total callback requests received.
    #[must_use]
    pub const fn requests(&self) -> u64 {
        self.requests
    }

    /// Fire the outstanding callback, if any, with `deadline`.
    ///
    /// Returns `None` when no callback was pending.
    ///
    /// # Errors
    ///
    /// Passes through the scheduler's [`RenderError`].
    pub fn dispatch<D, T>(
        &mut self,
        scheduler: &mut Scheduler<D::Node>,
        doc: &mut D,
        deadline: &T,
    ) -> Option<Result<SliceReport, RenderError<D::Error>>>
    where
        D: HostDocument,
        T: IdleDeadline + ?Sized,
    {
        if !self.pending {
            return None;
        }
        self.pending = false;
        Some(scheduler.work_loop(doc, deadline, self))
    }

    /// Dispatch callbacks with fresh `budget`-long time slices until the
    /// scheduler has no pending work, no callback is outstanding, or
    /// `max_slices` slices have run.
    ///
    /// # Errors
    ///
    /// Stops at the first [`RenderError`] and returns it. The scheduler has
    /// already re-armed its callback, so the caller may keep dispatching.
    pub fn run_until_idle<D: HostDocument>(
        &mut self,
        scheduler: &mut Scheduler<D::Node>,
        doc: &mut D,
        budget: Duration,
        max_slices: usize,
    ) -> Result<RunSummary, RenderError<D::Error>> {
        let mut summary = RunSummary::default();
        while summary.slices < max_slices && scheduler.has_pending_work() {
            let Some(result) = self.dispatch(scheduler, doc, &TimeSlice::new(budget)) else {
                break;
            };
            let report = result?;
            summary.slices += 1;
            summary.units += report.units;
        }
        summary.completed = !scheduler.has_pending_work();
        Ok(summary)
    }
}
