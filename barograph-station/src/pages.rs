//! Hooks bound to the station menu
//!
//! Save hooks and guards update the [`Station`]; gather and compute hooks
//! turn provider data into statistics pages.

use alloc::vec::Vec;
use core::fmt::Write;

use barograph_core::action::{Entries, Entry, EntryFormat, Notice, Samples};
use barograph_core::panel::Line;
use barograph_core::period::{month_name, DateWindow};
use barograph_core::stats::{self, Difference};
use barograph_core::traits::{
    Aggregate, DailyEvent, DailyValue, DataProvider, Metric, Occurrence,
};

use crate::station::Station;

const NO_DATA: &str = "No data";
const WHOLE: EntryFormat = EntryFormat::new(0, "");
const CELSIUS: EntryFormat = EntryFormat::new(1, " C");

/// Range save of the Period > Year editor
pub fn save_years<P: DataProvider>(
    st: &mut Station<P>,
    begin: i32,
    end: i32,
) -> Result<(), Notice> {
    st.set_years(begin, end)
}

/// Range save of the Period > Month editor
pub fn save_months<P: DataProvider>(
    st: &mut Station<P>,
    begin: i32,
    end: i32,
) -> Result<(), Notice> {
    st.set_months(begin, end)
}

/// Range save of the Period > Day editor
pub fn save_days<P: DataProvider>(
    st: &mut Station<P>,
    begin: i32,
    end: i32,
) -> Result<(), Notice> {
    st.set_days(begin, end)
}

/// Guard on leaving the Period menu
pub fn apply_period<P: DataProvider>(st: &mut Station<P>) -> Result<(), Notice> {
    st.apply_pending()
}

/// Save of the Rain year > Year editor
pub fn save_rain_year<P: DataProvider>(st: &mut Station<P>, year: i32) -> Result<(), Notice> {
    st.set_rain_year(year)
}

/// Live value plus every sample of `metric` in the active window
pub fn gather_metric<P: DataProvider>(st: &mut Station<P>, metric: Metric, out: &mut Samples) {
    out.current = st.latest().map(|r| r.get(metric));
    let window = st.window();
    st.provider_mut().samples(metric, &window, &mut out.values);
}

pub fn sunrise_page<P: DataProvider>(
    st: &mut Station<P>,
    _: &Samples,
    _: &EntryFormat,
) -> Entries {
    event_page(st, DailyEvent::Sunrise)
}

pub fn sunset_page<P: DataProvider>(
    st: &mut Station<P>,
    _: &Samples,
    _: &EntryFormat,
) -> Entries {
    event_page(st, DailyEvent::Sunset)
}

fn event_page<P: DataProvider>(st: &mut Station<P>, event: DailyEvent) -> Entries {
    let window = st.window();
    let mut entries = Entries::new();
    match st.provider_mut().time_of_day_extremes(event, &window) {
        Some(extremes) => {
            push_occurrence(&mut entries, "Earliest: ", &extremes.earliest);
            push_occurrence(&mut entries, "Latest:   ", &extremes.latest);
        }
        None => {
            let _ = entries.push(Entry::text("", NO_DATA));
        }
    }
    entries
}

fn push_occurrence(entries: &mut Entries, label: &str, at: &Occurrence) {
    let _ = entries.push(Entry::text(label, &display(&at.time)));
    let _ = entries.push(Entry::text("Date:     ", &display(&at.date)));
}

fn display(value: &impl core::fmt::Display) -> Line {
    let mut out = Line::new();
    let _ = write!(out, "{}", value);
    out
}

/// Degree days, heat wave, nice-weather days and the largest temperature
/// differences of the active window
pub fn summary_page<P: DataProvider>(
    st: &mut Station<P>,
    _: &Samples,
    _: &EntryFormat,
) -> Entries {
    let window = st.window();
    let means = daily_values(st, Metric::OutsideTemp, Aggregate::Mean, &window);
    let highs = daily_values(st, Metric::OutsideTemp, Aggregate::Max, &window);
    let mut readings = Vec::new();
    st.provider_mut().readings(&window, &mut readings);

    let mut entries = Entries::new();
    let _ = entries.push(Entry::number("Degree days: ", stats::degree_days(&means), WHOLE));
    let _ = entries.push(Entry::text(
        "Heat wave:   ",
        if stats::has_heat_wave(&highs) { "Yes" } else { "No" },
    ));

    let chill = stats::max_wind_chill_diff(&readings);
    let _ = entries.push(Entry::text("Wind chill diff.:", ""));
    push_date(&mut entries, chill.as_ref());
    let _ = entries.push(Entry::maybe("-> Diff.:  ", chill.map(|d| d.value), CELSIUS));

    let nice = stats::nice_weather_days(&readings);
    let _ = entries.push(Entry::number("Nice days:   ", nice as f64, WHOLE));

    let spread = stats::max_inside_outside_diff(&readings);
    let _ = entries.push(Entry::text("Temp. difference:", ""));
    push_date(&mut entries, spread.as_ref());
    let _ = entries.push(match &spread {
        Some(d) => Entry::text("-> Time:   ", &display(&d.reading.time)),
        None => Entry::missing("-> Time:   "),
    });
    let reading = spread.map(|d| d.reading);
    let _ = entries.push(Entry::maybe(
        "-> Outside: ",
        reading.map(|r| r.get(Metric::OutsideTemp)),
        CELSIUS,
    ));
    let _ = entries.push(Entry::maybe(
        "-> Inside:  ",
        reading.map(|r| r.get(Metric::InsideTemp)),
        CELSIUS,
    ));
    let _ = entries.push(Entry::maybe("-> Diff.:  ", spread.map(|d| d.value), CELSIUS));
    entries
}

fn push_date(entries: &mut Entries, diff: Option<&Difference>) {
    let label = "-> Date:   ";
    let _ = entries.push(match diff {
        Some(d) => Entry::text(label, &display(&d.reading.date)),
        None => Entry::missing(label),
    });
}

fn daily_values<P: DataProvider>(
    st: &mut Station<P>,
    metric: Metric,
    aggregate: Aggregate,
    window: &DateWindow,
) -> Vec<f64> {
    let mut days = Vec::new();
    st.provider_mut().daily(metric, aggregate, window, &mut days);
    days.into_iter().map(|d| d.value).collect()
}

/// Wettest month of the chosen rain year
pub fn rain_result_page<P: DataProvider>(
    st: &mut Station<P>,
    _: &Samples,
    _: &EntryFormat,
) -> Entries {
    let mut entries = Entries::new();
    let Some(year) = st.rain_year() else {
        let _ = entries.push(Entry::text("", "No year chosen"));
        return entries;
    };

    let mut days: Vec<DailyValue> = Vec::new();
    st.provider_mut()
        .daily(Metric::RainRate, Aggregate::Total, &DateWindow::year(year), &mut days);

    match stats::wettest_month(&days).and_then(month_name) {
        Some(name) => {
            let _ = entries.push(Entry::number("Year:  ", f64::from(year), WHOLE));
            let _ = entries.push(Entry::text("Month: ", name));
        }
        None => {
            let _ = entries.push(Entry::text("", "No data for period"));
        }
    }
    entries
}
