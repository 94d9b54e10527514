//! Display driver errors

use barograph_hal::Word;

/// Broad category of a [`DisplayError`]
///
/// Every category is a violated contract rather than a transient fault,
/// so nothing here is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorClass {
    /// Bad construction parameters, fatal at startup
    Config,
    /// Text does not fit the line or the screen
    Capacity,
    /// A value or coordinate cannot be represented
    Range,
    /// A pattern read back from hardware is not recognised
    Decode,
}

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Declared pixel grid is empty or exceeds the addressable range
    InvalidGrid,
    /// Segment display built with no digits or too many
    InvalidDigitCount,
    /// Text line longer than the line length
    LineTooLong,
    /// Line budget used up since the last clear
    LinesExhausted,
    /// Magnitude needs more digits than the display has
    ValueTooLarge,
    /// Requested fraction digits do not fit next to the integer part
    TooManyDecimals,
    /// Segment index past the end of the display
    InvalidSegment,
    /// Pixel outside the addressable range
    InvalidCoordinates,
    /// Plot step must be positive
    InvalidStep,
    /// Pattern that is neither a digit, minus nor blank
    UnknownPattern(Word),
}

impl DisplayError {
    /// Category of this error
    pub fn class(&self) -> ErrorClass {
        match self {
            DisplayError::InvalidGrid | DisplayError::InvalidDigitCount => ErrorClass::Config,
            DisplayError::LineTooLong | DisplayError::LinesExhausted => ErrorClass::Capacity,
            DisplayError::ValueTooLarge
            | DisplayError::TooManyDecimals
            | DisplayError::InvalidSegment
            | DisplayError::InvalidCoordinates
            | DisplayError::InvalidStep => ErrorClass::Range,
            DisplayError::UnknownPattern(_) => ErrorClass::Decode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert_eq!(DisplayError::InvalidGrid.class(), ErrorClass::Config);
        assert_eq!(DisplayError::LinesExhausted.class(), ErrorClass::Capacity);
        assert_eq!(DisplayError::TooManyDecimals.class(), ErrorClass::Range);
        assert_eq!(DisplayError::UnknownPattern(0x1ff).class(), ErrorClass::Decode);
    }
}
