//! Panel configuration loading
//!
//! Configuration is TOML. Anything left out falls back to the stock panel
//! layout, and a copy of that layout is compiled in for boards that have no
//! configuration of their own.

use barograph_core::config::{ConfigError, PanelConfig};

/// Embedded default configuration (compiled into the binary)
pub const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Not valid TOML, or values of the wrong type
    TomlParse,
    /// Parsed but unusable
    Invalid(ConfigError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Parse and validate a configuration
pub fn parse_config(text: &str) -> Result<PanelConfig, LoadError> {
    let config: PanelConfig = toml::from_str(text).map_err(|_| LoadError::TomlParse)?;
    config.validate()?;
    Ok(config)
}

/// Parse `text` if given, otherwise the embedded configuration
pub fn load_config(text: Option<&str>) -> Result<PanelConfig, LoadError> {
    match text {
        Some(text) => parse_config(text),
        None => {
            #[cfg(feature = "defmt")]
            defmt::info!("Using embedded panel configuration");
            parse_config(EMBEDDED_CONFIG)
        }
    }
}
