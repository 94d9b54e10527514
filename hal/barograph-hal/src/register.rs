//! Register bus abstraction
//!
//! Provides the word-wide read/write interface that chip or board support
//! code implements for the panel's address space.

/// Register address on the panel bus
pub type Address = u16;

/// Register contents
pub type Word = u16;

/// Word-addressed register bus
///
/// Each call is atomic for a single word only. There are no transactional
/// guarantees across several words, so callers must not assume a multi-word
/// sequence is observed as a unit.
pub trait RegisterIo {
    /// Read the word at `address`
    fn read16(&mut self, address: Address) -> Word;

    /// Write `value` to `address`
    fn write16(&mut self, address: Address, value: Word);

    /// Write several words to the same address, in order
    ///
    /// Used for streaming registers such as the text port of the
    /// dot-matrix display.
    fn write_all(&mut self, address: Address, values: &[Word]) {
        for &value in values {
            self.write16(address, value);
        }
    }
}

impl<T: RegisterIo + ?Sized> RegisterIo for &mut T {
    fn read16(&mut self, address: Address) -> Word {
        (**self).read16(address)
    }

    fn write16(&mut self, address: Address, value: Word) {
        (**self).write16(address, value)
    }
}
