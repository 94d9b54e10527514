//! Edge-detected push buttons
//!
//! Each button is a single register: any non-zero value means pressed.
//! [`ButtonInput::changed`] reports transitions in either direction, so a
//! full press and release produces two edges.

use barograph_hal::{Address, RegisterIo};

/// A memory-mapped push button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonInput {
    address: Address,
    /// Level seen on the previous `changed` call
    last: bool,
}

impl ButtonInput {
    /// Create a button, seeding the previous level from the register
    ///
    /// A button held down at startup therefore does not report an edge.
    pub fn new<R: RegisterIo>(io: &mut R, address: Address) -> Self {
        let last = io.read16(address) != 0;
        Self { address, last }
    }

    /// Register address of this button
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current level, without touching edge state
    pub fn read<R: RegisterIo>(&self, io: &mut R) -> bool {
        io.read16(self.address) != 0
    }

    /// True when the level differs from the previous call
    pub fn changed<R: RegisterIo>(&mut self, io: &mut R) -> bool {
        let now = self.read(io);
        let edge = now != self.last;
        self.last = now;
        edge
    }
}

/// Edges seen on one poll of the keypad
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keys {
    pub down: bool,
    pub up: bool,
    pub select: bool,
}

impl Keys {
    /// Any edge at all
    pub fn any(&self) -> bool {
        self.down || self.up || self.select
    }
}

/// The three panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keypad {
    down: ButtonInput,
    up: ButtonInput,
    select: ButtonInput,
}

impl Keypad {
    /// Create the keypad; reads each button once, down then up then select
    pub fn new<R: RegisterIo>(io: &mut R, down: Address, up: Address, select: Address) -> Self {
        Self {
            down: ButtonInput::new(io, down),
            up: ButtonInput::new(io, up),
            select: ButtonInput::new(io, select),
        }
    }

    /// Sample every button once, in down, up, select order
    pub fn poll<R: RegisterIo>(&mut self, io: &mut R) -> Keys {
        Keys {
            down: self.down.changed(io),
            up: self.up.changed(io),
            select: self.select.changed(io),
        }
    }
}
