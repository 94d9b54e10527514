//! In-memory data provider for tests

use std::collections::VecDeque;
use std::vec::Vec;

use barograph_core::period::{Date, DateWindow, TimeOfDay};
use barograph_core::traits::{
    Aggregate, DailyEvent, DailyValue, DataProvider, Extremes, Metric, Occurrence, Reading,
};

pub fn date(year: u16, month: u8, day: u8) -> Date {
    Date::new(year, month, day).unwrap()
}

pub fn time(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

/// Reading on 2024-03-15 with outside/inside temperature set
pub fn reading(hour: u8, minute: u8, outside: f64, inside: f64) -> Reading {
    let mut values = [0.0; Metric::COUNT];
    values[Metric::OutsideTemp.index()] = outside;
    values[Metric::InsideTemp.index()] = inside;
    Reading {
        date: date(2024, 3, 15),
        time: time(hour, minute),
        values,
    }
}

#[derive(Default)]
pub struct FixtureProvider {
    latest: VecDeque<Option<Reading>>,
    records: Vec<(Metric, Date, f64)>,
    history: Vec<Reading>,
    events: Vec<(DailyEvent, Occurrence)>,
    pub latest_calls: usize,
    pub windows: Vec<DateWindow>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer of one `latest` call; an empty queue answers `None`
    pub fn push_latest(&mut self, reading: Option<Reading>) {
        self.latest.push_back(reading);
    }

    pub fn record(&mut self, metric: Metric, date: Date, value: f64) {
        self.records.push((metric, date, value));
    }

    /// Add a complete reading; keep them in date order
    pub fn push_reading(&mut self, reading: Reading) {
        self.history.push(reading);
    }

    pub fn event(&mut self, event: DailyEvent, date: Date, time: TimeOfDay) {
        self.events.push((event, Occurrence { date, time }));
    }
}

impl DataProvider for FixtureProvider {
    fn latest(&mut self) -> Option<Reading> {
        self.latest_calls += 1;
        self.latest.pop_front().flatten()
    }

    fn samples(&mut self, metric: Metric, window: &DateWindow, out: &mut Vec<f64>) {
        self.windows.push(*window);
        out.extend(
            self.records
                .iter()
                .filter(|(m, d, _)| *m == metric && window.contains(*d))
                .map(|(_, _, v)| *v),
        );
    }

    fn readings(&mut self, window: &DateWindow, out: &mut Vec<Reading>) {
        self.windows.push(*window);
        out.extend(self.history.iter().filter(|r| window.contains(r.date)));
    }

    fn time_of_day_extremes(
        &mut self,
        event: DailyEvent,
        window: &DateWindow,
    ) -> Option<Extremes> {
        let hits = || {
            self.events
                .iter()
                .filter(|(e, o)| *e == event && window.contains(o.date))
                .map(|(_, o)| *o)
        };
        let earliest = hits().min_by_key(|o| o.time)?;
        let latest = hits().max_by_key(|o| o.time)?;
        Some(Extremes { earliest, latest })
    }

    fn daily(
        &mut self,
        metric: Metric,
        aggregate: Aggregate,
        window: &DateWindow,
        out: &mut Vec<DailyValue>,
    ) {
        let mut days: Vec<Date> = self
            .records
            .iter()
            .filter(|(m, d, _)| *m == metric && window.contains(*d))
            .map(|(_, d, _)| *d)
            .collect();
        days.sort();
        days.dedup();

        for day in days {
            let values: Vec<f64> = self
                .records
                .iter()
                .filter(|(m, d, _)| *m == metric && *d == day)
                .map(|(_, _, v)| *v)
                .collect();
            let value = match aggregate {
                Aggregate::Mean => values.iter().sum::<f64>() / values.len() as f64,
                Aggregate::Max => values.iter().cloned().fold(f64::MIN, f64::max),
                Aggregate::Min => values.iter().cloned().fold(f64::MAX, f64::min),
                Aggregate::Total => values.iter().sum(),
            };
            out.push(DailyValue { date: day, value });
        }
    }
}
