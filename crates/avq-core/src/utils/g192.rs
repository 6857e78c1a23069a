//! ITU-T G.192 soft-bit framing
//!
//! Every bit is one 16-bit word: `0x007F` for `0`, `0x0081` for `1`. A
//! frame is a sync word (`0x6B21` good, `0x6B20` erased), a length word and
//! that many soft-bit words, all little-endian.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{AvqError, Result};

/// Good frame sync header
pub const G192_SYNC_GOOD: u16 = 0x6B21;
/// Bad frame sync header (frame erasure)
pub const G192_SYNC_BAD: u16 = 0x6B20;
/// Soft bit '0'
pub const G192_ZERO: u16 = 0x007F;
/// Soft bit '1'
pub const G192_ONE: u16 = 0x0081;

/// Convert hard bits (`0`/`1`) to soft-bit words
pub fn hard_bits_to_soft(bits: &[u8]) -> Vec<u16> {
    bits.iter()
        .map(|&b| if b != 0 { G192_ONE } else { G192_ZERO })
        .collect()
}

/// Convert soft-bit words to hard bits; anything but `G192_ONE` is `0`
pub fn soft_bits_to_hard(words: &[u16]) -> Vec<u8> {
    words.iter().map(|&w| u8::from(w == G192_ONE)).collect()
}

/// One G.192 frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G192Frame {
    /// Sync header
    pub sync: u16,
    /// Soft-bit payload
    pub bits: Vec<u16>,
}

impl G192Frame {
    /// A good frame carrying `bits`
    pub fn good(bits: Vec<u16>) -> Self {
        Self {
            sync: G192_SYNC_GOOD,
            bits,
        }
    }

    /// An erased frame of `len` zero words
    pub fn erased(len: usize) -> Self {
        Self {
            sync: G192_SYNC_BAD,
            bits: vec![0; len],
        }
    }

    /// True if the frame is marked as erased
    pub fn is_erased(&self) -> bool {
        self.sync == G192_SYNC_BAD
    }

    /// Serialized size in bytes
    pub fn encoded_len(&self) -> usize {
        2 * (2 + self.bits.len())
    }

    /// Append the serialized frame to `buf`
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is longer than a length word can hold.
    pub fn write_to(&self, buf: &mut BytesMut) -> Result<()> {
        let len = u16::try_from(self.bits.len()).map_err(|_| {
            AvqError::invalid_g192(format!("payload of {} bits is too long", self.bits.len()))
        })?;
        buf.reserve(self.encoded_len());
        buf.put_u16_le(self.sync);
        buf.put_u16_le(len);
        for &word in &self.bits {
            buf.put_u16_le(word);
        }
        Ok(())
    }

    /// Serialize the frame
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is longer than a length word can hold.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Parse one frame from the front of `buf`
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown sync word or a truncated frame.
    pub fn parse<B: Buf>(buf: &mut B) -> Result<Self> {
        if buf.remaining() < 4 {
            return Err(AvqError::BufferTooSmall {
                needed: 4,
                actual: buf.remaining(),
            });
        }

        let sync = buf.get_u16_le();
        if sync != G192_SYNC_GOOD && sync != G192_SYNC_BAD {
            return Err(AvqError::invalid_g192(format!(
                "unknown sync word 0x{:04X}",
                sync
            )));
        }

        let len = usize::from(buf.get_u16_le());
        if buf.remaining() < 2 * len {
            return Err(AvqError::BufferTooSmall {
                needed: 2 * len,
                actual: buf.remaining(),
            });
        }

        let bits = (0..len).map(|_| buf.get_u16_le()).collect();
        Ok(Self { sync, bits })
    }
}

/// Parse a complete G.192 stream
///
/// # Errors
///
/// Returns an error if any frame is malformed.
pub fn parse_stream(data: &[u8]) -> Result<Vec<G192Frame>> {
    let mut buf = data;
    let mut frames = Vec::new();
    while buf.has_remaining() {
        frames.push(G192Frame::parse(&mut buf)?);
    }
    Ok(frames)
}

/// Serialize a sequence of frames into one G.192 stream
///
/// # Errors
///
/// Returns an error if a frame payload is too long.
pub fn write_stream(frames: &[G192Frame]) -> Result<Bytes> {
    let total = frames.iter().map(G192Frame::encoded_len).sum();
    let mut buf = BytesMut::with_capacity(total);
    for frame in frames {
        frame.write_to(&mut buf)?;
    }
    Ok(buf.freeze())
}
