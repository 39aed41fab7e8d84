//! Common utilities for the Didact renderer.
//!
//! This crate provides shared infrastructure used by all renderer components:
//! - **Warning System** - deduplicated warnings about ignored or unsupported input

pub mod warning;
