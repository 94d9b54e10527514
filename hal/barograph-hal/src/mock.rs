//! Host-side register bus and delay for tests
//!
//! `MockRegisters` records every write and can replay a scripted sequence
//! of values for an address, which is how tests drive button presses.
//! `MockDelay` counts sleeps and panics once a loop runs away.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::register::{Address, RegisterIo, Word};

/// Text-port sequence that clears the screen and homes the cursor
const TEXT_CLEAR: [Word; 2] = [0xFE, 0x01];

/// Recording register file
#[derive(Debug, Default)]
pub struct MockRegisters {
    values: BTreeMap<Address, Word>,
    scripts: BTreeMap<Address, VecDeque<Word>>,
    writes: Vec<(Address, Word)>,
    reads: usize,
}

impl MockRegisters {
    /// Create an empty register file (every address reads 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value an address reads back
    pub fn set(&mut self, address: Address, value: Word) {
        self.values.insert(address, value);
    }

    /// Queue values returned by successive reads of `address`
    ///
    /// Once the queue is drained the last scripted value sticks.
    pub fn script(&mut self, address: Address, values: &[Word]) {
        self.scripts
            .entry(address)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Current value at `address` without consuming a script entry
    pub fn peek(&self, address: Address) -> Word {
        self.values.get(&address).copied().unwrap_or(0)
    }

    /// All writes in order
    pub fn writes(&self) -> &[(Address, Word)] {
        &self.writes
    }

    /// Values written to a single address, in order
    pub fn writes_to(&self, address: Address) -> Vec<Word> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Number of reads served so far
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Forget recorded writes (register values are kept)
    pub fn clear_log(&mut self) {
        self.writes.clear();
    }

    /// Lines currently shown on a text port
    ///
    /// Replays the character stream written to `address` and returns the
    /// completed lines since the last clear sequence.
    pub fn screen(&self, address: Address) -> Vec<String> {
        let stream = self.writes_to(address);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut i = 0;

        while i < stream.len() {
            if stream[i..].starts_with(&TEXT_CLEAR) {
                lines.clear();
                current.clear();
                i += TEXT_CLEAR.len();
                continue;
            }
            match stream[i] {
                0x0A => lines.push(core::mem::take(&mut current)),
                code => current.push(char::from_u32(u32::from(code)).unwrap_or('?')),
            }
            i += 1;
        }

        lines
    }

    /// Number of clear sequences written to a text port
    pub fn clear_count(&self, address: Address) -> usize {
        self.writes_to(address)
            .windows(TEXT_CLEAR.len())
            .filter(|w| *w == TEXT_CLEAR)
            .count()
    }
}

impl RegisterIo for MockRegisters {
    fn read16(&mut self, address: Address) -> Word {
        self.reads += 1;
        if let Some(queue) = self.scripts.get_mut(&address) {
            if let Some(value) = queue.pop_front() {
                self.values.insert(address, value);
            }
        }
        self.peek(address)
    }

    fn write16(&mut self, address: Address, value: Word) {
        self.writes.push((address, value));
        self.values.insert(address, value);
    }
}

/// Default number of sleeps before `MockDelay` assumes a runaway loop
pub const DEFAULT_SLEEP_LIMIT: usize = 10_000;

/// Delay that only counts
#[derive(Debug)]
pub struct MockDelay {
    sleeps: usize,
    elapsed_ns: u64,
    limit: usize,
}

impl Default for MockDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDelay {
    /// Create a delay with the default runaway limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_SLEEP_LIMIT)
    }

    /// Create a delay that panics after `limit` sleeps
    pub fn with_limit(limit: usize) -> Self {
        Self {
            sleeps: 0,
            elapsed_ns: 0,
            limit,
        }
    }

    /// Number of sleeps so far
    pub fn sleeps(&self) -> usize {
        self.sleeps
    }

    /// Total simulated time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    fn record(&mut self, ns: u64) {
        self.sleeps += 1;
        self.elapsed_ns += ns;
        assert!(
            self.sleeps <= self.limit,
            "poll loop did not terminate within {} ticks",
            self.limit
        );
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(u64::from(ms) * 1_000_000);
    }
}
