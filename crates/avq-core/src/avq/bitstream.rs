//! Soft-bit cursor and writer
//!
//! AVQ frames are carried one logical bit per 16-bit word using the G.192
//! soft-bit values. The reader walks the word array with a cursor; the
//! frame layer keeps its own bit budget, so the cursor never fails and a
//! read past the end of the array yields `0` bits.

use crate::utils::g192::{G192_ONE, G192_ZERO};

/// Sequential reader over a soft-bit word array
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    words: &'a [u16],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor at the first word
    pub fn new(words: &'a [u16]) -> Self {
        Self { words, pos: 0 }
    }

    /// Number of words consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor to an absolute word position
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Advance the cursor without interpreting the skipped words
    pub fn skip(&mut self, nbits: usize) {
        self.pos = self.pos.saturating_add(nbits);
    }

    /// Words left before the end of the underlying array
    pub fn remaining(&self) -> usize {
        self.words.len().saturating_sub(self.pos)
    }

    /// Read one bit
    #[inline]
    pub fn read_bit(&mut self) -> u32 {
        let bit = match self.words.get(self.pos) {
            Some(&word) if word == G192_ONE => 1,
            _ => 0,
        };
        self.pos += 1;
        bit
    }

    /// Read an `nbits` wide unsigned field, most significant bit first
    ///
    /// `nbits` must not exceed 32.
    pub fn read(&mut self, nbits: u32) -> u32 {
        debug_assert!(nbits <= 32);
        let mut value = 0u32;
        for _ in 0..nbits {
            value = (value << 1) | self.read_bit();
        }
        value
    }

    /// Count leading one-bits up to a terminating zero
    ///
    /// When the run reaches `max` ones no terminator is read and `max` is
    /// returned.
    pub fn read_unary(&mut self, max: u32) -> u32 {
        let mut count = 0;
        while count < max {
            if self.read_bit() == 0 {
                break;
            }
            count += 1;
        }
        count
    }
}

/// Sequential soft-bit writer
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    words: Vec<u16>,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `nbits` bits
    pub fn with_capacity(nbits: usize) -> Self {
        Self {
            words: Vec::with_capacity(nbits),
        }
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Write one bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.words.push(if bit { G192_ONE } else { G192_ZERO });
    }

    /// Write the low `nbits` bits of `value`, most significant bit first
    pub fn write(&mut self, value: u32, nbits: u32) {
        debug_assert!(nbits <= 32);
        for shift in (0..nbits).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Write `ones` one-bits, followed by a zero if `terminate` is set
    pub fn write_unary(&mut self, ones: u32, terminate: bool) {
        for _ in 0..ones {
            self.write_bit(true);
        }
        if terminate {
            self.write_bit(false);
        }
    }

    /// Written soft-bit words
    pub fn as_words(&self) -> &[u16] {
        &self.words
    }

    /// Consume the writer and return its soft-bit words
    pub fn into_words(self) -> Vec<u16> {
        self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_msb_first() {
        let mut writer = BitWriter::new();
        writer.write(0b1011, 4);
        writer.write(0x3FF, 10);
        let words = writer.into_words();
        assert_eq!(words.len(), 14);
        assert_eq!(words[0], G192_ONE);
        assert_eq!(words[1], G192_ZERO);

        let mut cursor = BitCursor::new(&words);
        assert_eq!(cursor.read(4), 0b1011);
        assert_eq!(cursor.read(10), 0x3FF);
        assert_eq!(cursor.position(), 14);
    }

    #[test]
    fn test_read_past_end_yields_zero() {
        let words = [G192_ONE];
        let mut cursor = BitCursor::new(&words);
        assert_eq!(cursor.read(3), 0b100);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_read_unary() {
        let mut writer = BitWriter::new();
        writer.write_unary(3, true);
        writer.write_unary(2, false);
        let words = writer.into_words();

        let mut cursor = BitCursor::new(&words);
        assert_eq!(cursor.read_unary(10), 3);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.read_unary(2), 2);
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_zero_width_read() {
        let words = [G192_ONE; 4];
        let mut cursor = BitCursor::new(&words);
        assert_eq!(cursor.read(0), 0);
        assert_eq!(cursor.position(), 0);
        cursor.skip(3);
        cursor.seek(1);
        assert_eq!(cursor.read(2), 0b11);
    }
}
