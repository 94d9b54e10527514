//! Actions bound to menu nodes
//!
//! Selecting a node runs its action. Every action except plain navigation
//! takes over the panel in a blocking modal loop:
//!
//! 1. draw the initial state
//! 2. poll the three buttons; Down/Up edges change state and redraw,
//!    a Select edge toggles, commits or finishes
//! 3. sleep one tick and repeat
//!
//! State lives in the action value; behaviour specific to the application
//! is injected as plain function pointers over a context type `C`.

pub mod editor;
pub mod navigate;
pub mod viewer;

use barograph_display::Keys;
use barograph_hal::{DelayNs, RegisterIo};

pub use editor::{EditorState, RangeEditor, RangeSave, SingleSave, SingleValueEditor};
pub use navigate::{Guard, Navigate};
pub use viewer::{
    default_entries, ComputeHook, Entries, Entry, EntryFormat, EntryValue, GatherHook, Samples,
    StatsViewer, ViewerState, MAX_ENTRIES,
};

pub use crate::panel::Notice;
use crate::error::PanelError;
use crate::menu::NodeId;
use crate::panel::{Lines, Panel};
use crate::traits::Metric;

/// Node that becomes current after an action, relative to its own node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// The node itself (entering a submenu)
    This,
    Parent,
    /// Two levels up ("back" entries inside a submenu)
    Grandparent,
    /// A fixed node
    Node(NodeId),
    /// Leave the menu altogether
    Quit,
}

/// Result of running an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Keep the current node
    Stay,
    Goto(Target),
}

/// A button edge inside a modal loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Down,
    Up,
    Select,
}

impl Key {
    /// Edges of one poll in handling order
    pub fn edges(keys: Keys) -> impl Iterator<Item = Key> {
        [
            (keys.down, Key::Down),
            (keys.up, Key::Up),
            (keys.select, Key::Select),
        ]
        .into_iter()
        .filter_map(|(hit, key)| hit.then_some(key))
    }
}

/// What a modal loop does after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flow {
    Continue,
    Redraw,
    Exit,
}

/// State machine driven by a modal loop
pub trait Modal {
    /// Lines to show for the current state
    fn lines(&self) -> Lines;

    /// Handle one key edge
    fn press(&mut self, key: Key) -> Flow;
}

/// Draw `modal` and feed it key edges until it exits
pub fn run_modal<R, D, M>(panel: &mut Panel<R, D>, modal: &mut M) -> Result<(), PanelError>
where
    R: RegisterIo,
    D: DelayNs,
    M: Modal,
{
    draw(panel, modal)?;
    loop {
        let keys = panel.poll();
        for key in Key::edges(keys) {
            match modal.press(key) {
                Flow::Continue => {}
                Flow::Redraw => draw(panel, modal)?,
                Flow::Exit => return Ok(()),
            }
        }
        panel.tick();
    }
}

fn draw<R: RegisterIo, D: DelayNs, M: Modal>(
    panel: &mut Panel<R, D>,
    modal: &M,
) -> Result<(), PanelError> {
    panel.clear();
    for line in &modal.lines() {
        panel.write_line(line)?;
    }
    Ok(())
}

/// An action bound to a menu node
pub enum Action<C> {
    Navigate(Navigate<C>),
    RangeEditor(RangeEditor<C>),
    SingleValueEditor(SingleValueEditor<C>),
    StatsViewer(StatsViewer<C>),
}

impl<C> Action<C> {
    /// Go to `target` immediately
    pub fn navigate(target: Target) -> Self {
        Action::Navigate(Navigate::new(target))
    }

    /// Run `guard` first, showing its notice on failure, then go to `target`
    pub fn guarded(target: Target, guard: Guard<C>) -> Self {
        Action::Navigate(Navigate::new(target).with_guard(guard))
    }

    /// Edit a begin/end pair within `min..=max`
    pub fn range(begin: i32, end: i32, min: i32, max: i32, save: RangeSave<C>) -> Self {
        Action::RangeEditor(RangeEditor::new(begin, end, min, max, save))
    }

    /// Edit one value within `min..=max`
    pub fn single(value: i32, min: i32, max: i32, save: SingleSave<C>) -> Self {
        Action::SingleValueEditor(SingleValueEditor::new(value, min, max, save))
    }

    /// Default statistics page for `metric`
    pub fn stats(metric: Metric, format: EntryFormat, gather: GatherHook<C>) -> Self {
        Action::StatsViewer(StatsViewer::metric(metric, format, gather))
    }

    /// Page computed entirely by `compute`
    pub fn page(compute: ComputeHook<C>) -> Self {
        Action::StatsViewer(StatsViewer::custom(compute))
    }

    /// Run the action
    pub fn invoke<R: RegisterIo, D: DelayNs>(
        &mut self,
        panel: &mut Panel<R, D>,
        ctx: &mut C,
    ) -> Result<Transition, PanelError> {
        match self {
            Action::Navigate(a) => a.invoke(panel, ctx),
            Action::RangeEditor(a) => a.invoke(panel, ctx),
            Action::SingleValueEditor(a) => a.invoke(panel, ctx),
            Action::StatsViewer(a) => a.invoke(panel, ctx),
        }
    }
}
