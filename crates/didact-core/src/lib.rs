//! Incremental element-tree rendering for the Didact renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Elements** - immutable node descriptions built by [`create_element`]
//! - **Fibers** - an arena of work units linked parent / child / sibling
//! - **Units of work** - materialize one fiber, attach it, expand its children
//! - **Scheduling** - a cooperative loop that runs units during host idle
//!   periods and yields when the [`IdleDeadline`] runs low
//! - **Literals** - element trees read from JSON
//!
//! Only first mount is supported: there is no reconciliation against a
//! previous tree, no deletion, and no commit phase separate from mounting.
//!
//! # Example
//!
//! ```ignore
//! use didact_core::{IdleLoop, Scheduler, create_element, props};
//! use didact_dom::{DomTree, HostDocument, NodeId};
//!
//! let element = create_element(
//!     "div",
//!     props! {},
//!     [
//!         create_element("h1", props! {}, ["Hello World"]),
//!         create_element("h2", props! {}, ["from Didact"]),
//!     ],
//! );
//! let mut doc = DomTree::new();
//! let container = doc.create_element("div")?;
//! doc.append_child(NodeId::ROOT, container)?;
//!
//! let mut idle = IdleLoop::new();
//! let mut scheduler = Scheduler::default();
//! scheduler.render(element, container, &mut idle);
//! idle.run_until_idle(&mut scheduler, &mut doc, Duration::from_millis(16), 100)?;
//! ```

pub mod deadline;
pub mod element;
mod error;
pub mod fiber;
pub mod literal;
pub mod runtime;
pub mod scheduler;
pub mod work;

pub use didact_dom::Value;

pub use deadline::{Exhausted, IdleDeadline, TimeSlice, Unbounded};
pub use element::{Child, Element, ElementKind, Props, TEXT_ELEMENT, create_element, create_text_element};
pub use error::RenderError;
pub use fiber::{Fiber, FiberId, FiberKind, FiberTree};
pub use literal::{LiteralError, parse_element};
pub use runtime::{IdleLoop, RunSummary};
pub use scheduler::{
    IdleHost, LoopState, Scheduler, SchedulerConfig, SchedulerStats, SliceOutcome, SliceReport,
};
pub use work::{create_node, perform_unit_of_work};
