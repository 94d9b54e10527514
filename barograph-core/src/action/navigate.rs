//! Plain navigation

use barograph_hal::{DelayNs, RegisterIo};

use super::{Target, Transition};
use crate::error::PanelError;
use crate::panel::{Notice, Panel};

/// Check run before navigating; an error is shown before moving on
pub type Guard<C> = fn(&mut C) -> Result<(), Notice>;

/// Go to a fixed target
pub struct Navigate<C> {
    target: Target,
    guard: Option<Guard<C>>,
}

impl<C> Navigate<C> {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            guard: None,
        }
    }

    pub fn with_guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub(crate) fn invoke<R: RegisterIo, D: DelayNs>(
        &mut self,
        panel: &mut Panel<R, D>,
        ctx: &mut C,
    ) -> Result<Transition, PanelError> {
        if let Some(guard) = self.guard {
            if let Err(notice) = guard(ctx) {
                #[cfg(feature = "defmt")]
                defmt::warn!("navigation guard: {}", notice.message);
                panel.show_notice(&notice)?;
            }
        }
        Ok(Transition::Goto(self.target))
    }
}
