//! Weather data provider trait

use alloc::vec::Vec;

use crate::period::{Date, DateWindow, TimeOfDay};

/// Quantities recorded by the station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Metric {
    OutsideTemp,
    InsideTemp,
    InsideHumidity,
    OutsideHumidity,
    Barometer,
    WindSpeed,
    AvgWindSpeed,
    WindDirection,
    RainRate,
    UvLevel,
    SolarRadiation,
    TransmitterBattery,
    BatteryLevel,
    DewPoint,
    HeatIndex,
    WindChill,
}

impl Metric {
    pub const COUNT: usize = 16;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::OutsideTemp,
        Metric::InsideTemp,
        Metric::InsideHumidity,
        Metric::OutsideHumidity,
        Metric::Barometer,
        Metric::WindSpeed,
        Metric::AvgWindSpeed,
        Metric::WindDirection,
        Metric::RainRate,
        Metric::UvLevel,
        Metric::SolarRadiation,
        Metric::TransmitterBattery,
        Metric::BatteryLevel,
        Metric::DewPoint,
        Metric::HeatIndex,
        Metric::WindChill,
    ];

    /// Position in [`Metric::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One complete sample from the station
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub date: Date,
    pub time: TimeOfDay,
    /// Indexed by [`Metric::index`]
    pub values: [f64; Metric::COUNT],
}

impl Reading {
    pub fn get(&self, metric: Metric) -> f64 {
        self.values[metric.index()]
    }
}

/// Once-a-day events with a recorded time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DailyEvent {
    Sunrise,
    Sunset,
}

/// When an event happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Occurrence {
    pub date: Date,
    pub time: TimeOfDay,
}

/// Earliest and latest time of day an event occurred in a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Extremes {
    pub earliest: Occurrence,
    pub latest: Occurrence,
}

/// How samples of one day collapse into a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Aggregate {
    Mean,
    Max,
    Min,
    Total,
}

/// A per-day aggregate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DailyValue {
    pub date: Date,
    pub value: f64,
}

/// Source of station readings
///
/// Implementations decide how readings are fetched and cached; the menus
/// only see finite series for an inclusive date window. Output vectors are
/// cleared by the caller, implementations append.
pub trait DataProvider {
    /// Most recent reading, if any is available
    fn latest(&mut self) -> Option<Reading>;

    /// Every sample of `metric` within `window`, oldest first
    fn samples(&mut self, metric: Metric, window: &DateWindow, out: &mut Vec<f64>);

    /// Every complete reading within `window`, oldest first
    fn readings(&mut self, window: &DateWindow, out: &mut Vec<Reading>);

    /// Earliest and latest time of day `event` occurred within `window`
    fn time_of_day_extremes(&mut self, event: DailyEvent, window: &DateWindow)
        -> Option<Extremes>;

    /// One aggregate of `metric` per day within `window`, oldest first
    fn daily(
        &mut self,
        metric: Metric,
        aggregate: Aggregate,
        window: &DateWindow,
        out: &mut Vec<DailyValue>,
    );
}
