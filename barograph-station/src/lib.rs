//! Weather-station application for the Barograph panel
//!
//! Ties the core menu machinery to weather data:
//!
//! - [`config`]: TOML panel configuration with an embedded default
//! - [`station`]: the context every menu action operates on
//! - [`pages`]: save hooks, guards and statistics pages
//! - [`menu`]: the menu layout
//! - [`runner`]: the top-level poll loop and live readouts
//!
//! The board support crate supplies a register bus, a delay, a
//! [`DataProvider`](barograph_core::traits::DataProvider) and today's date,
//! then calls [`runner::start`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod menu;
pub mod pages;
pub mod runner;
pub mod station;

#[cfg(test)]
mod fixture;

pub use config::{load_config, parse_config, LoadError, EMBEDDED_CONFIG};
pub use menu::{build_menu, StationMenu};
pub use runner::{run, start};
pub use station::Station;
