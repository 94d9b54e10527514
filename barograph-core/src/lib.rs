//! Board-agnostic core logic for the Barograph panel
//!
//! This crate contains all application logic that does not depend on a
//! particular data source or board:
//!
//! - Panel configuration types
//! - [`Panel`](panel::Panel), the bundle of displays and buttons
//! - The menu tree, stored as an arena
//! - Modal actions (navigation, value editors, statistics pages)
//! - Descriptive statistics and calendar helpers
//! - The data provider trait

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod action;
pub mod config;
pub mod error;
pub mod menu;
pub mod panel;
pub mod period;
pub mod stats;
pub mod traits;

pub use error::PanelError;
pub use panel::Panel;
