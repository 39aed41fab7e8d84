//! Errors surfaced by the render pipeline.

use thiserror::Error;

use crate::fiber::FiberId;

/// A unit of work failed because the host rejected one of its calls.
///
/// The renderer does not recover: the failing fiber stays at the cursor,
/// possibly materialized but not attached, and the error is handed back to
/// whoever drives the idle loop.
#[derive(Debug, Error)]
pub enum RenderError<E: std::error::Error + 'static> {
    /// The host document failed while processing `fiber`.
    #[error("host document error while processing {fiber:?}: {source}")]
    Host {
        /// Fiber whose unit of work failed.
        fiber: FiberId,
        /// Underlying host failure.
        #[source]
        source: E,
    },
}

impl<E: std::error::Error + 'static> RenderError<E> {
    /// The fiber whose unit of work failed.
    #[must_use]
    pub const fn fiber(&self) -> FiberId {
        match self {
            Self::Host { fiber, .. } => *fiber,
        }
    }
}
