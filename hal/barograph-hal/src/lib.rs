//! Barograph Hardware Abstraction Layer
//!
//! The control panel is memory mapped: every button, segment digit and the
//! dot-matrix display sit behind a 16-bit word at a fixed address. This crate
//! defines that register bus as a trait so the drivers and the menu engine
//! can run against real hardware or a host-side mock.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  barograph-station (menu + runner)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  barograph-core / barograph-display     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  barograph-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`register::RegisterIo`] - word-wide register bus
//!
//! Timing uses [`embedded_hal::delay::DelayNs`], re-exported here.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "mock")]
extern crate alloc;

#[cfg(feature = "mock")]
pub mod mock;
pub mod register;

pub use embedded_hal::delay::DelayNs;
pub use register::{Address, RegisterIo, Word};
