//! Statistics pages
//!
//! A page is a list of labelled entries shown three at a time. Down/Up
//! scroll a focus index that is clamped to the list; any Select edge
//! closes the page and returns to the menu it was opened from.

use alloc::vec::Vec;
use barograph_hal::{DelayNs, RegisterIo};
use core::fmt::Write;
use heapless::String;

use super::{run_modal, Flow, Key, Modal, Target, Transition};
use crate::error::PanelError;
use crate::menu::visible_window;
use crate::panel::{line, Line, Lines, Panel};
use crate::stats;
use crate::traits::Metric;

/// Most entries on one page
pub const MAX_ENTRIES: usize = 16;

/// Shown in place of a value that is not available
const MISSING: &str = "--";

/// Entries of one page
pub type Entries = heapless::Vec<Entry, MAX_ENTRIES>;

/// Fills samples for a metric page
pub type GatherHook<C> = fn(&mut C, Metric, &mut Samples);
/// Builds the entries of a page
pub type ComputeHook<C> = fn(&mut C, &Samples, &EntryFormat) -> Entries;

/// Data a page is computed from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    /// Latest live value
    pub current: Option<f64>,
    /// Every sample in the active window
    pub values: Vec<f64>,
}

/// Number formatting of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryFormat {
    /// Fraction digits
    pub decimals: u8,
    /// Appended after the number
    pub unit: &'static str,
}

impl EntryFormat {
    pub const fn new(decimals: u8, unit: &'static str) -> Self {
        Self { decimals, unit }
    }
}

impl Default for EntryFormat {
    fn default() -> Self {
        Self::new(2, "")
    }
}

/// Value part of an entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    Number(f64),
    Text(Line),
    Missing,
}

/// One labelled row of a page
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub label: Line,
    pub value: EntryValue,
    pub format: EntryFormat,
}

impl Entry {
    pub fn number(label: &str, value: f64, format: EntryFormat) -> Self {
        Self {
            label: line(label),
            value: EntryValue::Number(value),
            format,
        }
    }

    pub fn text(label: &str, text: &str) -> Self {
        Self {
            label: line(label),
            value: EntryValue::Text(line(text)),
            format: EntryFormat::default(),
        }
    }

    pub fn missing(label: &str) -> Self {
        Self {
            label: line(label),
            value: EntryValue::Missing,
            format: EntryFormat::default(),
        }
    }

    /// `Number` for finite values, `Missing` otherwise
    pub fn maybe(label: &str, value: Option<f64>, format: EntryFormat) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::number(label, v, format),
            _ => Self::missing(label),
        }
    }

    /// The entry as one screen line, cut to the line length
    pub fn render(&self) -> Line {
        let mut full: String<64> = String::new();
        let _ = full.push_str(&self.label);
        let _ = match &self.value {
            EntryValue::Number(v) => write!(
                full,
                "{:.*}{}",
                usize::from(self.format.decimals),
                v,
                self.format.unit
            ),
            EntryValue::Text(t) => full.push_str(t).map_err(|_| core::fmt::Error),
            EntryValue::Missing => full.push_str(MISSING).map_err(|_| core::fmt::Error),
        };
        line(&full)
    }
}

/// The seven standard aggregates of `samples`
pub fn default_entries(samples: &Samples, format: &EntryFormat) -> Entries {
    let values = &samples.values;
    let rows = [
        Entry::maybe("Current:  ", samples.current, *format),
        Entry::number("Mean:     ", stats::mean(values), *format),
        Entry::number("Median:   ", stats::median(values), *format),
        Entry::number("Mode:     ", stats::mode(values), *format),
        Entry::number("Highest:  ", stats::highest(values), *format),
        Entry::number("Lowest:   ", stats::lowest(values), *format),
        Entry::number("Std. dev.:", stats::std_dev(values), *format),
    ];
    rows.into_iter().collect()
}

/// Scroll position over a page
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    entries: Entries,
    focus: usize,
}

impl ViewerState {
    /// Start with the focus on the second entry, so the first window
    /// shows the top of the page
    pub fn new(entries: Entries) -> Self {
        let focus = usize::from(entries.len() > 1);
        Self { entries, focus }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl Modal for ViewerState {
    fn lines(&self) -> Lines {
        visible_window(self.entries.len(), self.focus)
            .map(|i| self.entries[i].render())
            .collect()
    }

    fn press(&mut self, key: Key) -> Flow {
        match key {
            Key::Down => {
                self.focus = (self.focus + 1).min(self.entries.len().saturating_sub(1));
            }
            Key::Up => self.focus = self.focus.saturating_sub(1),
            Key::Select => return Flow::Exit,
        }
        Flow::Redraw
    }
}

/// A statistics page
pub struct StatsViewer<C> {
    metric: Option<Metric>,
    format: EntryFormat,
    gather: Option<GatherHook<C>>,
    compute: Option<ComputeHook<C>>,
}

impl<C> StatsViewer<C> {
    /// Default aggregates over the samples `gather` collects for `metric`
    pub fn metric(metric: Metric, format: EntryFormat, gather: GatherHook<C>) -> Self {
        Self {
            metric: Some(metric),
            format,
            gather: Some(gather),
            compute: None,
        }
    }

    /// A page whose entries come from `compute` alone
    pub fn custom(compute: ComputeHook<C>) -> Self {
        Self {
            metric: None,
            format: EntryFormat::default(),
            gather: None,
            compute: Some(compute),
        }
    }

    /// Replace the default aggregates
    pub fn with_compute(mut self, compute: ComputeHook<C>) -> Self {
        self.compute = Some(compute);
        self
    }

    pub fn metric_kind(&self) -> Option<Metric> {
        self.metric
    }

    /// Collect samples and build the page
    pub fn entries(&self, ctx: &mut C) -> Entries {
        let mut samples = Samples::default();
        if let (Some(metric), Some(gather)) = (self.metric, self.gather) {
            gather(ctx, metric, &mut samples);
        }
        match self.compute {
            Some(compute) => compute(ctx, &samples, &self.format),
            None => default_entries(&samples, &self.format),
        }
    }

    pub(crate) fn invoke<R: RegisterIo, D: DelayNs>(
        &mut self,
        panel: &mut Panel<R, D>,
        ctx: &mut C,
    ) -> Result<Transition, PanelError> {
        panel.show_loading()?;
        let entries = self.entries(ctx);

        #[cfg(feature = "defmt")]
        defmt::debug!("stats page with {} entries", entries.len());

        let mut state = ViewerState::new(entries);
        run_modal(panel, &mut state)?;
        Ok(Transition::Goto(Target::Parent))
    }
}
