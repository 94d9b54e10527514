//! Configuration types
//!
//! Board-agnostic configuration structures, deserialized from TOML by the
//! application crate.

pub mod panel;

pub use panel::*;
