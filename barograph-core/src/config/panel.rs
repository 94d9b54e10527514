//! Panel configuration types
//!
//! Register addresses of every surface on the panel plus the loop timing.
//! The defaults describe the stock weather-station panel, so a config file
//! only needs to name what differs.

use barograph_display::{MAX_HEIGHT, MAX_SEGMENTS, MAX_WIDTH};
use barograph_hal::Address;
use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Segment digit addresses, least significant first
pub type DigitAddresses = Vec<Address, MAX_SEGMENTS>;

/// Invalid configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Matrix dimensions are zero or beyond the addressable grid
    MatrixSize,
    /// Poll tick must be at least one millisecond
    ZeroTick,
    /// Refresh interval must be at least one second
    ZeroRefresh,
}

/// Dot-matrix display registers and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatrixConfig {
    /// Pixel instruction register
    pub pixel_address: Address,
    /// Character register
    pub text_address: Address,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            pixel_address: 0x42,
            text_address: 0x40,
            width: 128,
            height: 32,
        }
    }
}

/// Button registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ButtonConfig {
    pub down: Address,
    pub up: Address,
    pub select: Address,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            down: 0x90,
            up: 0x100,
            select: 0x80,
        }
    }
}

/// Segment displays
///
/// An empty address list means the display is not fitted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentConfig {
    /// Clock display (HHMM)
    pub clock: DigitAddresses,
    /// Left reading (outside temperature)
    pub left: DigitAddresses,
    /// Right reading (inside temperature)
    pub right: DigitAddresses,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            clock: Vec::from_slice(&[0x10, 0x12, 0x14, 0x16, 0x18]).unwrap_or_default(),
            left: Vec::from_slice(&[0x20, 0x22, 0x24]).unwrap_or_default(),
            right: Vec::from_slice(&[0x30, 0x32, 0x34]).unwrap_or_default(),
        }
    }
}

/// Loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Button poll period in milliseconds
    pub tick_ms: u32,
    /// Live reading refresh period in seconds
    pub refresh_s: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            refresh_s: 60,
        }
    }
}

impl TimingConfig {
    /// Refresh period expressed in poll ticks (at least one)
    pub fn refresh_ticks(&self) -> u32 {
        let tick = self.tick_ms.max(1);
        (self.refresh_s.saturating_mul(1000) / tick).max(1)
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    pub matrix: MatrixConfig,
    pub buttons: ButtonConfig,
    pub segments: SegmentConfig,
    pub timing: TimingConfig,
}

impl PanelConfig {
    /// Check values the drivers cannot reject on their own
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.matrix;
        if m.width == 0 || m.height == 0 || m.width > MAX_WIDTH || m.height > MAX_HEIGHT {
            return Err(ConfigError::MatrixSize);
        }
        if self.timing.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.timing.refresh_s == 0 {
            return Err(ConfigError::ZeroRefresh);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stock_panel() {
        let config = PanelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.matrix.pixel_address, 0x42);
        assert_eq!(config.buttons.up, 0x100);
        assert_eq!(config.segments.clock.len(), 5);
        assert_eq!(config.segments.right.as_slice(), [0x30, 0x32, 0x34]);
    }

    #[test]
    fn test_refresh_ticks() {
        assert_eq!(TimingConfig::default().refresh_ticks(), 1200);
        let fast = TimingConfig {
            tick_ms: 5000,
            refresh_s: 1,
        };
        assert_eq!(fast.refresh_ticks(), 1);
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = PanelConfig::default();
        config.matrix.height = 33;
        assert_eq!(config.validate(), Err(ConfigError::MatrixSize));

        let mut config = PanelConfig::default();
        config.timing.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));

        let mut config = PanelConfig::default();
        config.timing.refresh_s = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroRefresh));
    }
}
