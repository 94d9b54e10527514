//! Display and input drivers for the Barograph panel
//!
//! This crate provides:
//! - [`SegmentDisplay`] and the numeric 7-segment codec
//! - [`DotMatrix`], a diffing pixel renderer with a line-oriented text port
//! - [`ButtonInput`] / [`Keypad`] edge-detected buttons
//!
//! # Architecture
//!
//! The panel is memory mapped. None of the drivers own the register bus;
//! every operation borrows a [`RegisterIo`](barograph_hal::RegisterIo) for
//! the duration of the call, so the buttons and displays can share one bus
//! without interior mutability. The drivers only keep the state they need
//! (addresses, shadow pixels, the previous button level).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod dot_matrix;
pub mod error;
pub mod input;
pub mod segment;

// Re-export key types
pub use dot_matrix::{DotMatrix, Opcode, LINE_LENGTH, MAX_HEIGHT, MAX_LINES, MAX_WIDTH};
pub use error::{DisplayError, ErrorClass};
pub use input::{ButtonInput, Keypad, Keys};
pub use segment::{SegmentDisplay, MAX_SEGMENTS};
