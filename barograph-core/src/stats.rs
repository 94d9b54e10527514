//! Descriptive statistics over sample series
//!
//! Every aggregate of an empty series is 0 rather than an error; pages show
//! what they have.

use alloc::vec::Vec;

use crate::traits::{DailyValue, Metric, Reading};

/// Reference temperature for heating degree days (°C)
pub const DEGREE_DAY_BASE: f64 = 18.0;

/// Consecutive days at or above [`SUMMER_DAY`] a heat wave needs
const HEAT_WAVE_DAYS: usize = 5;
/// Days at or above [`TROPICAL_DAY`] within that run
const HEAT_WAVE_HOT_DAYS: usize = 3;
const SUMMER_DAY: f64 = 25.0;
const TROPICAL_DAY: f64 = 30.0;

// Nice-weather day bounds, applied to daily means
const NICE_TEMP_MIN: f64 = 15.0;
const NICE_TEMP_MAX: f64 = 30.0;
/// Exclusive
const NICE_RAIN_MAX: f64 = 5.0;
const NICE_WIND_MAX: f64 = 5.0;
/// Exclusive
const NICE_HUMIDITY_MAX: f64 = 80.0;

/// Largest difference between two metrics and the reading it was seen in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difference {
    pub reading: Reading,
    pub value: f64,
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Middle value; the mean of the middle pair for even lengths
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let v = sorted(values);
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        (v[mid - 1] + v[mid]) / 2.0
    } else {
        v[mid]
    }
}

/// Most frequent value, the smallest one on ties
pub fn mode(values: &[f64]) -> f64 {
    let v = sorted(values);
    let mut best = 0.0;
    let mut best_count = 0;

    let mut i = 0;
    while i < v.len() {
        let run = v[i..].iter().take_while(|&&x| x == v[i]).count().max(1);
        if run > best_count {
            best = v[i];
            best_count = run;
        }
        i += run;
    }
    best
}

pub fn highest(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

pub fn lowest(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let sum: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    libm::sqrt(sum / values.len() as f64)
}

/// Heating degree days from daily mean temperatures
pub fn degree_days(daily_means: &[f64]) -> f64 {
    daily_means
        .iter()
        .fold(0.0, |acc, t| acc + (DEGREE_DAY_BASE - t).max(0.0))
}

/// At least five consecutive days of 25 °C or more, three of them 30 °C or more
pub fn has_heat_wave(daily_max: &[f64]) -> bool {
    daily_max
        .split(|&t| t < SUMMER_DAY)
        .any(|run| {
            run.len() >= HEAT_WAVE_DAYS
                && run.iter().filter(|&&t| t >= TROPICAL_DAY).count() >= HEAT_WAVE_HOT_DAYS
        })
}

/// Month (1-12) with the largest total, the earliest on ties
///
/// `None` when there are no days at all.
pub fn wettest_month(daily_totals: &[DailyValue]) -> Option<u8> {
    if daily_totals.is_empty() {
        return None;
    }

    let mut months = [0.0f64; 12];
    for d in daily_totals {
        months[usize::from(d.date.month() - 1)] += d.value;
    }

    let mut best = 0;
    for (i, &total) in months.iter().enumerate() {
        if total > months[best] {
            best = i;
        }
    }
    Some(best as u8 + 1)
}

/// Largest |outside temperature - wind chill|, the earliest reading on ties
pub fn max_wind_chill_diff(readings: &[Reading]) -> Option<Difference> {
    largest_difference(readings, Metric::OutsideTemp, Metric::WindChill)
}

/// Largest |inside - outside temperature|, the earliest reading on ties
pub fn max_inside_outside_diff(readings: &[Reading]) -> Option<Difference> {
    largest_difference(readings, Metric::InsideTemp, Metric::OutsideTemp)
}

fn largest_difference(readings: &[Reading], a: Metric, b: Metric) -> Option<Difference> {
    let mut best: Option<Difference> = None;
    for reading in readings {
        let value = libm::fabs(reading.get(a) - reading.get(b));
        if value.is_nan() {
            continue;
        }
        if best.map_or(true, |d| value > d.value) {
            best = Some(Difference {
                reading: *reading,
                value,
            });
        }
    }
    best
}

/// Days whose means stay within the nice-weather bounds
///
/// `readings` must be ordered by date; consecutive readings of one date
/// form a day. Mean outside temperature 15-30 °C inclusive, rain below 5,
/// average wind speed at most 5 and outside humidity below 80 %.
pub fn nice_weather_days(readings: &[Reading]) -> usize {
    readings
        .chunk_by(|a, b| a.date == b.date)
        .filter(|day| is_nice_day(day))
        .count()
}

fn is_nice_day(day: &[Reading]) -> bool {
    let mean_of = |metric: Metric| {
        day.iter().map(|r| r.get(metric)).sum::<f64>() / day.len() as f64
    };
    (NICE_TEMP_MIN..=NICE_TEMP_MAX).contains(&mean_of(Metric::OutsideTemp))
        && mean_of(Metric::RainRate) < NICE_RAIN_MAX
        && mean_of(Metric::AvgWindSpeed) <= NICE_WIND_MAX
        && mean_of(Metric::OutsideHumidity) < NICE_HUMIDITY_MAX
}
