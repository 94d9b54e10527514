//! Bounded integer editors
//!
//! An editor shows one row per value plus a final "Back" row. In
//! navigation mode Down/Up move the focus between rows (wrapping). Select
//! on a value row enters edit mode, where Down/Up step the value instead:
//! Down counts up and wraps from `max` to `min`, Up counts down and wraps
//! from `min` to `max`. Select leaves edit mode again. Select on "Back"
//! commits through the save hook.

use barograph_hal::{DelayNs, RegisterIo};
use core::fmt::Write;

use super::{run_modal, Flow, Key, Modal, Transition};
use crate::error::PanelError;
use crate::panel::{Line, Lines, Notice, Panel};

/// Row labels, padded so the values line up
const BEGIN: &str = "Begin:  ";
const END: &str = "End:    ";
const VALUE: &str = "Value:  ";
const BACK: &str = "Back";

/// Commit hook of a range editor
pub type RangeSave<C> = fn(&mut C, i32, i32) -> Result<(), Notice>;
/// Commit hook of a single value editor
pub type SingleSave<C> = fn(&mut C, i32) -> Result<(), Notice>;

/// Focus, mode and values of an editor with `N` value rows
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditorState<const N: usize> {
    labels: [&'static str; N],
    values: [i32; N],
    min: i32,
    max: i32,
    /// Row index, `N` is the Back row
    focus: usize,
    editing: bool,
}

impl<const N: usize> EditorState<N> {
    /// Start in navigation mode on the first row
    ///
    /// Values outside the bounds are clamped in.
    pub fn new(labels: [&'static str; N], values: [i32; N], min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            labels,
            values: values.map(|v| v.clamp(min, max)),
            min,
            max,
            focus: 0,
            editing: false,
        }
    }

    pub fn values(&self) -> [i32; N] {
        self.values
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn editing(&self) -> bool {
        self.editing
    }

    fn rows(&self) -> usize {
        N + 1
    }

    fn step_up(&self, v: i32) -> i32 {
        if v >= self.max {
            self.min
        } else {
            v + 1
        }
    }

    fn step_down(&self, v: i32) -> i32 {
        if v <= self.min {
            self.max
        } else {
            v - 1
        }
    }
}

impl<const N: usize> Modal for EditorState<N> {
    fn lines(&self) -> Lines {
        let mut lines = Lines::new();
        for (row, (label, value)) in self.labels.iter().zip(self.values).enumerate() {
            let marker = match (row == self.focus, self.editing) {
                (true, true) => '*',
                (true, false) => '-',
                _ => ' ',
            };
            let mut line = Line::new();
            let _ = write!(line, "{}{}{}", marker, label, value);
            let _ = lines.push(line);
        }

        let mut back = Line::new();
        let _ = back.push(if self.focus == N { '-' } else { ' ' });
        let _ = back.push_str(BACK);
        let _ = lines.push(back);
        lines
    }

    /// While editing, Down counts up and wraps from `max` to `min`, Up
    /// counts down and wraps from `min` to `max`. Otherwise Down and Up move
    /// the focus and Select toggles editing or leaves from Back.
    fn press(&mut self, key: Key) -> Flow {
        match key {
            Key::Down if self.editing => {
                self.values[self.focus] = self.step_up(self.values[self.focus]);
            }
            Key::Up if self.editing => {
                self.values[self.focus] = self.step_down(self.values[self.focus]);
            }
            Key::Down => self.focus = (self.focus + 1) % self.rows(),
            Key::Up => self.focus = (self.focus + self.rows() - 1) % self.rows(),
            Key::Select if self.focus < N => self.editing = !self.editing,
            Key::Select => return Flow::Exit,
        }
        Flow::Redraw
    }
}

/// Edit a begin/end pair sharing one range
pub struct RangeEditor<C> {
    begin: i32,
    end: i32,
    min: i32,
    max: i32,
    save: RangeSave<C>,
}

impl<C> RangeEditor<C> {
    pub fn new(begin: i32, end: i32, min: i32, max: i32, save: RangeSave<C>) -> Self {
        Self {
            begin,
            end,
            min,
            max,
            save,
        }
    }

    /// Values as last committed
    pub fn values(&self) -> (i32, i32) {
        (self.begin, self.end)
    }

    pub(crate) fn invoke<R: RegisterIo, D: DelayNs>(
        &mut self,
        panel: &mut Panel<R, D>,
        ctx: &mut C,
    ) -> Result<Transition, PanelError> {
        let mut state = EditorState::new([BEGIN, END], [self.begin, self.end], self.min, self.max);
        run_modal(panel, &mut state)?;

        [self.begin, self.end] = state.values();
        if let Err(notice) = (self.save)(ctx, self.begin, self.end) {
            panel.show_notice(&notice)?;
        }
        panel.clear();
        Ok(Transition::Stay)
    }
}

/// Edit a single bounded value
pub struct SingleValueEditor<C> {
    value: i32,
    min: i32,
    max: i32,
    save: SingleSave<C>,
}

impl<C> SingleValueEditor<C> {
    pub fn new(value: i32, min: i32, max: i32, save: SingleSave<C>) -> Self {
        Self {
            value,
            min,
            max,
            save,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub(crate) fn invoke<R: RegisterIo, D: DelayNs>(
        &mut self,
        panel: &mut Panel<R, D>,
        ctx: &mut C,
    ) -> Result<Transition, PanelError> {
        let mut state = EditorState::new([VALUE], [self.value], self.min, self.max);
        run_modal(panel, &mut state)?;

        [self.value] = state.values();
        if let Err(notice) = (self.save)(ctx, self.value) {
            panel.show_notice(&notice)?;
        }
        panel.clear();
        Ok(Transition::Stay)
    }
}
