//! Numeric 7-segment displays
//!
//! A segment display is a list of digit registers ordered least significant
//! first. Each register holds a pattern word: bit 8 marks the word as valid,
//! bits 0-6 drive the segments and bit 7 is the decimal point.
//!
//! The codec functions are pure and produce one optional pattern per digit
//! position; `None` means "leave this position alone".
//! [`SegmentDisplay`] applies them to hardware.

use barograph_hal::{Address, RegisterIo, Word};
use heapless::Vec;

use crate::error::DisplayError;

/// Maximum digit positions on one display
pub const MAX_SEGMENTS: usize = 8;

/// Raw segment patterns
pub mod pattern {
    use barograph_hal::Word;

    pub const ZERO: Word = 0b1_0011_1111;
    pub const ONE: Word = 0b1_0000_0110;
    pub const TWO: Word = 0b1_0101_1011;
    pub const THREE: Word = 0b1_0100_1111;
    pub const FOUR: Word = 0b1_0110_0110;
    pub const FIVE: Word = 0b1_0110_1101;
    pub const SIX: Word = 0b1_0111_1101;
    pub const SEVEN: Word = 0b1_0000_0111;
    pub const EIGHT: Word = 0b1_0111_1111;
    pub const NINE: Word = 0b1_0110_1111;
    /// Decimal point, ORed onto a digit
    pub const DOT: Word = 0x100 | 1 << 7;
    pub const MINUS: Word = 0x100 | 1 << 6;
    /// All segments off
    pub const EMPTY: Word = 0x100;
}

/// Digit to pattern table, indexed by digit value
const DIGITS: [Word; 10] = [
    pattern::ZERO,
    pattern::ONE,
    pattern::TWO,
    pattern::THREE,
    pattern::FOUR,
    pattern::FIVE,
    pattern::SIX,
    pattern::SEVEN,
    pattern::EIGHT,
    pattern::NINE,
];

/// Decimal point bit without the valid flag
const DOT_BIT: Word = pattern::DOT & !pattern::EMPTY;

/// Patterns for every position of a display
pub type Patterns = Vec<Option<Word>, MAX_SEGMENTS>;

/// Pattern for a single decimal digit
pub fn digit_pattern(digit: u8) -> Option<Word> {
    DIGITS.get(digit as usize).copied()
}

/// Digit shown by a pattern (decimal point must already be masked off)
pub fn pattern_digit(word: Word) -> Option<u8> {
    DIGITS.iter().position(|&p| p == word).map(|d| d as u8)
}

fn check_segments(segments: usize) -> Result<(), DisplayError> {
    if segments == 0 || segments > MAX_SEGMENTS {
        return Err(DisplayError::InvalidDigitCount);
    }
    Ok(())
}

/// Encode an integer
///
/// Digits fill positions from the least significant end. With
/// `leading_zero` every position shows a digit, otherwise positions past
/// the most significant digit are blanked when `clear_unused` is set and
/// left untouched when it is not. A negative sign takes one position.
pub fn encode_integer(
    value: i32,
    segments: usize,
    leading_zero: bool,
    clear_unused: bool,
) -> Result<Patterns, DisplayError> {
    encode_digits(i64::from(value), segments, leading_zero, clear_unused, 1)
}

/// Encode a decimal number
///
/// `decimals` is the number of fraction digits; `None` uses as many as fit
/// next to the integer part and the sign. The value is rounded to that
/// precision and the decimal point is placed on the last integer digit.
pub fn encode_decimal(
    value: f64,
    decimals: Option<u8>,
    segments: usize,
    leading_zero: bool,
    clear_unused: bool,
) -> Result<Patterns, DisplayError> {
    check_segments(segments)?;
    if !value.is_finite() {
        return Err(DisplayError::ValueTooLarge);
    }

    let negative = value < 0.0;
    let integer_digits = digit_count(libm::fabs(value) as u64);
    let max_decimals = segments as i32 - integer_digits as i32 - i32::from(negative);
    if max_decimals < 0 {
        return Err(DisplayError::ValueTooLarge);
    }

    let decimals = match decimals {
        None => max_decimals as usize,
        Some(d) if i32::from(d) > max_decimals => return Err(DisplayError::TooManyDecimals),
        Some(d) => d as usize,
    };

    let scaled = libm::round(value * libm::pow(10.0, decimals as f64)) as i64;
    let mut patterns = encode_digits(scaled, segments, leading_zero, clear_unused, decimals + 1)?;

    if let Some(word) = patterns.get_mut(decimals).and_then(Option::as_mut) {
        *word |= pattern::DOT;
    }
    Ok(patterns)
}

/// Decode patterns read back from a display
///
/// Scanning stops at the first blank position; a minus sign negates what
/// was read so far and also ends the scan.
pub fn decode(patterns: &[Word]) -> Result<f64, DisplayError> {
    let mut value: i64 = 0;
    let mut dot = 0;
    let mut weight: i64 = 1;

    for (position, &word) in patterns.iter().enumerate() {
        if word == pattern::EMPTY {
            break;
        }
        if word == pattern::MINUS {
            value = -value;
            break;
        }

        let mut digit_word = word;
        if digit_word & DOT_BIT != 0 {
            dot = position;
            digit_word &= !DOT_BIT;
        }

        let digit = pattern_digit(digit_word).ok_or(DisplayError::UnknownPattern(word))?;
        value += i64::from(digit) * weight;
        weight *= 10;
    }

    Ok(value as f64 / libm::pow(10.0, dot as f64))
}

/// Number of decimal digits in `n` (zero has one)
fn digit_count(mut n: u64) -> u32 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Shared integer encoder
///
/// `min_digits` forces digits (zeros if need be) into the lowest positions
/// so a decimal point always has a digit to sit on.
fn encode_digits(
    value: i64,
    segments: usize,
    leading_zero: bool,
    clear_unused: bool,
    min_digits: usize,
) -> Result<Patterns, DisplayError> {
    check_segments(segments)?;

    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let width = segments - usize::from(negative);
    if width == 0 || magnitude > 10u64.pow(width as u32) - 1 {
        return Err(DisplayError::ValueTooLarge);
    }

    let mut patterns = Patterns::new();
    let mut written = 0;
    for position in 0..segments {
        let slot = if magnitude != 0 || leading_zero || position < min_digits {
            written = position + 1;
            Some(DIGITS[(magnitude % 10) as usize])
        } else if clear_unused {
            Some(pattern::EMPTY)
        } else {
            None
        };
        // Capacity is MAX_SEGMENTS and segments was checked against it
        let _ = patterns.push(slot);
        magnitude /= 10;
    }

    if negative {
        let position = if leading_zero { segments - 1 } else { written };
        if position >= segments {
            return Err(DisplayError::ValueTooLarge);
        }
        patterns[position] = Some(pattern::MINUS);
    }

    Ok(patterns)
}

/// A numeric display made of digit registers
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentDisplay {
    /// Digit registers, least significant first
    addresses: Vec<Address, MAX_SEGMENTS>,
}

impl SegmentDisplay {
    /// Create a display from its digit addresses (least significant first)
    pub fn new(addresses: &[Address]) -> Result<Self, DisplayError> {
        check_segments(addresses.len())?;
        let addresses = Vec::from_slice(addresses).map_err(|_| DisplayError::InvalidDigitCount)?;
        Ok(Self { addresses })
    }

    /// Number of digit positions
    pub fn segment_count(&self) -> usize {
        self.addresses.len()
    }

    /// Blank every position
    pub fn clear<R: RegisterIo>(&self, io: &mut R) {
        for &address in &self.addresses {
            io.write16(address, pattern::EMPTY);
        }
    }

    /// Blank a single position
    pub fn clear_at<R: RegisterIo>(&self, io: &mut R, segment: usize) -> Result<(), DisplayError> {
        self.write_raw_at(io, pattern::EMPTY, segment)
    }

    /// Write raw patterns, starting at the least significant position
    ///
    /// Extra values beyond the display width are ignored.
    pub fn write_raw<R: RegisterIo>(&self, io: &mut R, values: &[Word]) {
        for (&address, &value) in self.addresses.iter().zip(values) {
            io.write16(address, value);
        }
    }

    /// Write a raw pattern to one position
    pub fn write_raw_at<R: RegisterIo>(
        &self,
        io: &mut R,
        value: Word,
        segment: usize,
    ) -> Result<(), DisplayError> {
        let address = self
            .addresses
            .get(segment)
            .ok_or(DisplayError::InvalidSegment)?;
        io.write16(*address, value);
        Ok(())
    }

    /// Read every position
    pub fn read_raw<R: RegisterIo>(&self, io: &mut R) -> Vec<Word, MAX_SEGMENTS> {
        self.addresses.iter().map(|&a| io.read16(a)).collect()
    }

    /// Read one position
    pub fn read_raw_at<R: RegisterIo>(&self, io: &mut R, segment: usize) -> Result<Word, DisplayError> {
        let address = self
            .addresses
            .get(segment)
            .ok_or(DisplayError::InvalidSegment)?;
        Ok(io.read16(*address))
    }

    /// Show an integer
    pub fn write_integer<R: RegisterIo>(
        &self,
        io: &mut R,
        value: i32,
        leading_zero: bool,
        clear_unused: bool,
    ) -> Result<(), DisplayError> {
        let patterns = encode_integer(value, self.segment_count(), leading_zero, clear_unused)?;
        self.apply(io, &patterns);
        Ok(())
    }

    /// Show a decimal number, see [`encode_decimal`]
    pub fn write_decimal<R: RegisterIo>(
        &self,
        io: &mut R,
        value: f64,
        decimals: Option<u8>,
        leading_zero: bool,
        clear_unused: bool,
    ) -> Result<(), DisplayError> {
        let patterns = encode_decimal(
            value,
            decimals,
            self.segment_count(),
            leading_zero,
            clear_unused,
        )?;
        self.apply(io, &patterns);
        Ok(())
    }

    /// Show an integer without leading zeros, blanking unused positions
    pub fn show_integer<R: RegisterIo>(&self, io: &mut R, value: i32) -> Result<(), DisplayError> {
        self.write_integer(io, value, false, true)
    }

    /// Show a decimal at maximum precision, blanking unused positions
    pub fn show_decimal<R: RegisterIo>(&self, io: &mut R, value: f64) -> Result<(), DisplayError> {
        self.write_decimal(io, value, None, false, true)
    }

    /// Read back the number currently shown
    pub fn read_number<R: RegisterIo>(&self, io: &mut R) -> Result<f64, DisplayError> {
        decode(&self.read_raw(io))
    }

    fn apply<R: RegisterIo>(&self, io: &mut R, patterns: &[Option<Word>]) {
        for (&address, slot) in self.addresses.iter().zip(patterns) {
            if let Some(word) = slot {
                io.write16(address, *word);
            }
        }
    }
}
