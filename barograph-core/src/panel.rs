//! The physical panel
//!
//! [`Panel`] owns the register bus and the tick delay and bundles every
//! driver built on them: the dot-matrix screen, the keypad and up to three
//! segment displays. Menus and actions only ever talk to the hardware
//! through it.

use barograph_display::{DotMatrix, Keypad, Keys, SegmentDisplay, LINE_LENGTH, MAX_LINES};
use barograph_hal::{DelayNs, RegisterIo};
use heapless::{String, Vec};

use crate::config::{DigitAddresses, PanelConfig};
use crate::error::PanelError;

/// Second screen line of the loading indicator
const LOADING: &str = "      Loading...";

/// One text line
pub type Line = String<LINE_LENGTH>;

/// A screenful of lines
pub type Lines = Vec<Line, MAX_LINES>;

/// Segment display selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readout {
    /// Time of the latest reading
    Clock,
    Left,
    Right,
}

/// A message shown until Select is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    pub const fn new(title: &'static str, message: &'static str) -> Self {
        Self { title, message }
    }

    /// Notice titled "Error"
    pub const fn error(message: &'static str) -> Self {
        Self::new("Error", message)
    }
}

/// Copy `text` into a line, dropping characters that do not fit
pub fn line(text: &str) -> Line {
    let mut out = Line::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// `text` padded on the left to sit in the middle of a line
pub fn centred(text: &str) -> Line {
    let len = text.chars().count();
    let mut out = Line::new();
    for _ in 0..LINE_LENGTH.saturating_sub(len) / 2 {
        let _ = out.push(' ');
    }
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

fn segment_display(addresses: &DigitAddresses) -> Result<Option<SegmentDisplay>, PanelError> {
    if addresses.is_empty() {
        return Ok(None);
    }
    Ok(Some(SegmentDisplay::new(addresses)?))
}

/// Displays, buttons and timing of the panel
pub struct Panel<R, D> {
    io: R,
    delay: D,
    keys: Keypad,
    matrix: DotMatrix,
    clock: Option<SegmentDisplay>,
    left: Option<SegmentDisplay>,
    right: Option<SegmentDisplay>,
    tick_ms: u32,
}

impl<R: RegisterIo, D: DelayNs> Panel<R, D> {
    /// Build every driver from `config`
    ///
    /// Reads each button once to seed edge detection and clears the
    /// screen, so the shadow grid starts out known.
    pub fn new(mut io: R, delay: D, config: &PanelConfig) -> Result<Self, PanelError> {
        config.validate()?;

        let m = &config.matrix;
        let mut matrix = DotMatrix::new(m.pixel_address, m.text_address, m.width, m.height)?;
        let b = &config.buttons;
        let keys = Keypad::new(&mut io, b.down, b.up, b.select);

        let clock = segment_display(&config.segments.clock)?;
        let left = segment_display(&config.segments.left)?;
        let right = segment_display(&config.segments.right)?;

        matrix.clear(&mut io);

        Ok(Self {
            io,
            delay,
            keys,
            matrix,
            clock,
            left,
            right,
            tick_ms: config.timing.tick_ms,
        })
    }

    /// Register bus
    pub fn io(&self) -> &R {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut R {
        &mut self.io
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the bus and the delay
    pub fn release(self) -> (R, D) {
        (self.io, self.delay)
    }

    /// Sample the buttons once
    pub fn poll(&mut self) -> Keys {
        self.keys.poll(&mut self.io)
    }

    /// Sleep one poll period
    pub fn tick(&mut self) {
        self.delay.delay_ms(self.tick_ms);
    }

    /// Screen driver
    pub fn matrix(&self) -> &DotMatrix {
        &self.matrix
    }

    /// Clear the screen
    pub fn clear(&mut self) {
        self.matrix.clear(&mut self.io);
    }

    /// Append a line to the screen
    pub fn write_line(&mut self, text: &str) -> Result<(), PanelError> {
        self.matrix.write_line(&mut self.io, text)?;
        Ok(())
    }

    /// Clear the screen and write `lines`
    pub fn show(&mut self, lines: &[&str]) -> Result<(), PanelError> {
        self.clear();
        for text in lines {
            self.write_line(text)?;
        }
        Ok(())
    }

    /// Show the loading indicator
    pub fn show_loading(&mut self) -> Result<(), PanelError> {
        self.show(&["", LOADING])
    }

    /// Show a notice and block until Select changes
    pub fn show_notice(&mut self, notice: &Notice) -> Result<(), PanelError> {
        self.clear();
        self.write_line(&centred(notice.title))?;
        self.write_line(&line(notice.message))?;
        loop {
            if self.poll().select {
                return Ok(());
            }
            self.tick();
        }
    }

    fn readout(&mut self, which: Readout) -> (&mut R, Option<&SegmentDisplay>) {
        let display = match which {
            Readout::Clock => self.clock.as_ref(),
            Readout::Left => self.left.as_ref(),
            Readout::Right => self.right.as_ref(),
        };
        (&mut self.io, display)
    }

    /// Whether a segment display is fitted
    pub fn has_readout(&self, which: Readout) -> bool {
        match which {
            Readout::Clock => self.clock.is_some(),
            Readout::Left => self.left.is_some(),
            Readout::Right => self.right.is_some(),
        }
    }

    /// Show an integer; a missing display is a no-op
    pub fn show_integer(&mut self, which: Readout, value: i32) -> Result<(), PanelError> {
        if let (io, Some(display)) = self.readout(which) {
            display.show_integer(io, value)?;
        }
        Ok(())
    }

    /// Show a decimal at the best precision that fits
    pub fn show_decimal(&mut self, which: Readout, value: f64) -> Result<(), PanelError> {
        if let (io, Some(display)) = self.readout(which) {
            display.show_decimal(io, value)?;
        }
        Ok(())
    }

    /// Blank a segment display
    pub fn blank(&mut self, which: Readout) {
        if let (io, Some(display)) = self.readout(which) {
            display.clear(io);
        }
    }

    /// Clear every surface
    pub fn clear_all(&mut self) {
        for which in [Readout::Clock, Readout::Left, Readout::Right] {
            self.blank(which);
        }
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barograph_display::segment::pattern;
    use barograph_hal::mock::{MockDelay, MockRegisters};

    fn panel() -> Panel<MockRegisters, MockDelay> {
        Panel::new(MockRegisters::new(), MockDelay::new(), &PanelConfig::default()).unwrap()
    }

    #[test]
    fn test_new_clears_screen() {
        let panel = panel();
        assert_eq!(panel.io().clear_count(0x40), 1);
        assert_eq!(panel.matrix().pixel(0, 0), Some(false));
        assert_eq!(panel.io().read_count(), 3);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let mut config = PanelConfig::default();
        config.timing.tick_ms = 0;
        let err = Panel::new(MockRegisters::new(), MockDelay::new(), &config).err();
        assert_eq!(
            err,
            Some(PanelError::Config(crate::config::ConfigError::ZeroTick))
        );
    }

    #[test]
    fn test_show_and_loading() {
        let mut panel = panel();
        panel.show(&["a", "b"]).unwrap();
        assert_eq!(panel.io().screen(0x40), ["a", "b"]);

        panel.show_loading().unwrap();
        assert_eq!(panel.io().screen(0x40), ["", "      Loading..."]);
    }

    #[test]
    fn test_notice_waits_for_select() {
        let mut panel = panel();
        panel.io_mut().script(0x80, &[0, 0, 0, 1]);

        panel.show_notice(&Notice::error("End before begin")).unwrap();
        assert_eq!(
            panel.io().screen(0x40),
            ["        Error", "End before begin"]
        );
        assert_eq!(panel.delay().sleeps(), 3);
    }

    #[test]
    fn test_readouts() {
        let mut panel = panel();
        panel.show_integer(Readout::Clock, 1234).unwrap();
        panel.show_decimal(Readout::Left, 21.5).unwrap();
        assert_eq!(panel.io().peek(0x18), pattern::EMPTY);
        assert_eq!(panel.io().peek(0x22), pattern::ONE | pattern::DOT);

        assert!(panel.show_decimal(Readout::Right, 1234.0).is_err());

        panel.clear_all();
        assert_eq!(panel.io().peek(0x10), pattern::EMPTY);
        assert_eq!(panel.io().peek(0x20), pattern::EMPTY);
        assert_eq!(panel.io().clear_count(0x40), 2);
    }

    #[test]
    fn test_missing_readout_is_noop() {
        let mut config = PanelConfig::default();
        config.segments.right.clear();
        let mut panel = Panel::new(MockRegisters::new(), MockDelay::new(), &config).unwrap();

        assert!(!panel.has_readout(Readout::Right));
        panel.show_integer(Readout::Right, 7).unwrap();
        assert!(panel.io().writes_to(0x30).is_empty());
    }

    #[test]
    fn test_line_helpers() {
        assert_eq!(line("0123456789012345678901234").len(), LINE_LENGTH);
        assert_eq!(centred("Error").as_str(), "        Error");
        assert_eq!(centred("012345678901234567890").as_str(), "012345678901234567890");
    }
}
