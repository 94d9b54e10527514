//! Core error type

use barograph_display::DisplayError;

use crate::config::ConfigError;
use crate::menu::MenuError;

/// Errors surfaced by panel, menu and action operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// A display driver rejected an operation
    Display(DisplayError),
    /// Menu tree construction or lookup failed
    Menu(MenuError),
    /// Configuration values are unusable
    Config(ConfigError),
}

impl From<DisplayError> for PanelError {
    fn from(e: DisplayError) -> Self {
        PanelError::Display(e)
    }
}

impl From<MenuError> for PanelError {
    fn from(e: MenuError) -> Self {
        PanelError::Menu(e)
    }
}

impl From<ConfigError> for PanelError {
    fn from(e: ConfigError) -> Self {
        PanelError::Config(e)
    }
}
