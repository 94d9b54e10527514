//! Menu tree
//!
//! The whole menu is built once at startup into an arena; nodes refer to
//! each other by [`NodeId`]. Only the selected child index of each node
//! changes afterwards.

pub mod tree;
pub mod window;

pub use tree::{MenuError, MenuNode, MenuTree, NodeId, Selection, MAX_CHILDREN, MAX_NAME_LEN, MAX_NODES};
pub use window::visible_window;
