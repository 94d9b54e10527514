//! Dot-matrix pixel display with a text port
//!
//! The display has two registers:
//! - a pixel port taking instruction words `opcode << 12 | x << 5 | y`
//! - a text port taking one character code per write, `'\n'` ending a line
//!
//! Pixel writes are diffed against a shadow copy of the grid. Until the
//! first [`DotMatrix::clear`] the shadow is unknown and every pixel write
//! reaches the hardware; afterwards a pixel already in the requested state
//! costs nothing.

use barograph_hal::{Address, RegisterIo, Word};

use crate::error::DisplayError;

/// Widest addressable grid (x has 7 bits)
pub const MAX_WIDTH: usize = 128;
/// Tallest addressable grid (y has 5 bits)
pub const MAX_HEIGHT: usize = 32;
/// Characters per text line
pub const LINE_LENGTH: usize = 21;
/// Text lines per screen
pub const MAX_LINES: usize = 3;

/// Text port sequence: home cursor and clear
const TEXT_CLEAR: [Word; 2] = [0xFE, 0x01];
const NEWLINE: Word = b'\n' as Word;

/// Pixel port opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Opcode {
    Clear = 0,
    Set = 1,
    /// Shift the whole grid (unused by the driver)
    Shift = 2,
    /// Clear all pixels without homing the text cursor
    ClearAll = 3,
}

/// Build a pixel port instruction word
pub const fn instruction(op: Opcode, x: u8, y: u8) -> Word {
    (op as Word) << 12 | (x as Word & 0x7f) << 5 | (y as Word & 0x1f)
}

/// Dot-matrix display driver
#[derive(Debug, Clone)]
pub struct DotMatrix {
    pixel_address: Address,
    text_address: Address,
    width: usize,
    height: usize,
    /// Lines written since the last clear
    line: usize,
    /// One column per entry, bit `y` set when the pixel is on
    shadow: [u32; MAX_WIDTH],
    /// Whether `shadow` reflects the hardware
    known: bool,
}

impl DotMatrix {
    /// Create a driver for a `width` x `height` grid
    ///
    /// Fails with [`DisplayError::InvalidGrid`] when either dimension is
    /// zero or larger than the addressable range.
    pub fn new(
        pixel_address: Address,
        text_address: Address,
        width: usize,
        height: usize,
    ) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 || width > MAX_WIDTH || height > MAX_HEIGHT {
            return Err(DisplayError::InvalidGrid);
        }

        Ok(Self {
            pixel_address,
            text_address,
            width,
            height,
            line: 0,
            shadow: [0; MAX_WIDTH],
            known: false,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Lines written since the last clear (0-indexed cursor row)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Shadow state of a pixel, `None` while unknown or out of range
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if !self.known || x >= MAX_WIDTH || y >= MAX_HEIGHT {
            return None;
        }
        Some(self.shadow[x] & (1 << y) != 0)
    }

    /// Turn a pixel on or off
    ///
    /// Coordinates are checked against the addressable range, not the
    /// declared grid.
    pub fn set_pixel<R: RegisterIo>(
        &mut self,
        io: &mut R,
        x: usize,
        y: usize,
        on: bool,
    ) -> Result<(), DisplayError> {
        if x >= MAX_WIDTH || y >= MAX_HEIGHT {
            return Err(DisplayError::InvalidCoordinates);
        }

        let mask = 1u32 << y;
        let current = self.shadow[x] & mask != 0;
        if self.known && current == on {
            return Ok(());
        }

        let op = if on { Opcode::Set } else { Opcode::Clear };
        io.write16(self.pixel_address, instruction(op, x as u8, y as u8));

        if on {
            self.shadow[x] |= mask;
        } else {
            self.shadow[x] &= !mask;
        }
        Ok(())
    }

    /// Write one line of text
    pub fn write_line<R: RegisterIo>(&mut self, io: &mut R, text: &str) -> Result<(), DisplayError> {
        if text.chars().count() > LINE_LENGTH {
            return Err(DisplayError::LineTooLong);
        }
        if self.line >= MAX_LINES {
            return Err(DisplayError::LinesExhausted);
        }

        for c in text.chars() {
            let code = Word::try_from(u32::from(c)).unwrap_or(b'?' as Word);
            io.write16(self.text_address, code);
        }
        io.write16(self.text_address, NEWLINE);
        self.line += 1;
        Ok(())
    }

    /// Clear the screen and home the text cursor
    ///
    /// Goes through the text port since [`Opcode::ClearAll`] leaves the
    /// cursor where it was. The shadow becomes known and all off.
    pub fn clear<R: RegisterIo>(&mut self, io: &mut R) {
        io.write_all(self.text_address, &TEXT_CLEAR);
        self.line = 0;
        self.shadow = [0; MAX_WIDTH];
        self.known = true;
    }

    /// Plot `f` over the grid with axes through the centre
    ///
    /// Samples `f((x - width/2) * x_scale)` for `x` from 0 up to the width
    /// in increments of `step`; points falling outside the grid and
    /// non-finite samples are skipped. A step that would take more
    /// samples than there are columns is rejected.
    pub fn plot_graph<R: RegisterIo, F: Fn(f64) -> f64>(
        &mut self,
        io: &mut R,
        f: F,
        x_scale: f64,
        y_scale: f64,
        step: f64,
    ) -> Result<(), DisplayError> {
        if step.is_nan() || step <= 0.0 {
            return Err(DisplayError::InvalidStep);
        }
        let width = self.width as f64;
        let samples = libm::ceil(width / step);
        if samples.is_nan() || samples > width {
            return Err(DisplayError::InvalidStep);
        }

        let mid_x = self.width / 2;
        let mid_y = self.height / 2;
        for x in 0..self.width {
            self.set_pixel(io, x, mid_y, true)?;
        }
        for y in 0..self.height {
            self.set_pixel(io, mid_x, y, true)?;
        }

        for i in 0..samples as usize {
            let x = i as f64 * step;
            let sample = f((x - width / 2.0) * x_scale) * y_scale;
            if sample.is_finite() {
                let y = libm::round(-sample) as i64 + mid_y as i64;
                if (0..self.height as i64).contains(&y) {
                    self.set_pixel(io, x as usize, y as usize, true)?;
                }
            }
        }
        Ok(())
    }
}
