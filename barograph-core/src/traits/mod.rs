//! Data source traits
//!
//! These traits define the interface between the menus and wherever the
//! weather readings actually live.

pub mod provider;

pub use provider::{
    Aggregate, DailyEvent, DailyValue, DataProvider, Extremes, Metric, Occurrence, Reading,
};
