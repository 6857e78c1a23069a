//! AVQ Codec Implementation
//!
//! This module provides the frame-level AVQ interface: a validated frame
//! layout, coefficient quantization and multiplexing on the encoder side,
//! and soft-bit or G.192 frame decoding on the decoder side.

use tracing::{debug, trace};

use super::bitstream::BitCursor;
use super::frame::{decode_frame, decode_frame_parallel, encode_frame, DecodedFrame, EncodedFrame};
use super::quantizer::quantize;
use crate::error::Result;
use crate::types::{AvqConfig, LatticePoint, SUBVECTOR_LEN};
use crate::utils::g192::{G192Frame, G192_ZERO};

/// Encoder output for one frame of coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct AvqEncoding {
    /// Global gain applied before lattice quantization
    pub gain: f32,
    /// Multiplexed subvectors
    pub frame: EncodedFrame,
}

impl AvqEncoding {
    /// Coefficients the decoder reconstructs, `gain * point`
    pub fn reconstruction(&self) -> Vec<f32> {
        self.frame
            .transmitted
            .iter()
            .flatten()
            .map(|&c| c as f32 * self.gain)
            .collect()
    }
}

/// Algebraic vector quantizer over the RE8 lattice
///
/// # Example
/// ```
/// use avq_core::{AvqCodec, AvqConfig};
///
/// let codec = AvqCodec::new(AvqConfig::new(80, 4)).unwrap();
///
/// let coefficients = vec![0.5f32; 32];
/// let encoded = codec.encode(&coefficients).unwrap();
///
/// let decoded = codec.decode(&encoded.frame.bits);
/// assert_eq!(decoded.subvectors, encoded.frame.transmitted);
/// ```
#[derive(Debug, Clone)]
pub struct AvqCodec {
    config: AvqConfig,
}

impl AvqCodec {
    /// Create a codec for a validated frame layout
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range.
    pub fn new(config: AvqConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "Creating AVQ codec: {} bits, {} subvectors, parallel decode {}",
            config.nb_bits, config.nsv, config.parallel_decode
        );
        Ok(Self { config })
    }

    /// Frame configuration
    pub fn config(&self) -> &AvqConfig {
        &self.config
    }

    /// Quantize and multiplex one frame of `nsv * 8` coefficients
    ///
    /// # Errors
    ///
    /// Returns an error if the coefficient count does not match the layout
    /// or a coefficient is not finite.
    pub fn encode(&self, coefficients: &[f32]) -> Result<AvqEncoding> {
        let quantized = quantize(coefficients, self.config.nb_bits, self.config.nsv)?;
        let frame = self.encode_lattice(&quantized.subvectors)?;
        Ok(AvqEncoding {
            gain: quantized.gain,
            frame,
        })
    }

    /// Multiplex one frame of RE8 points
    ///
    /// # Errors
    ///
    /// Returns an error if the point count does not match the layout or a
    /// point is not in RE8.
    pub fn encode_lattice(&self, points: &[LatticePoint]) -> Result<EncodedFrame> {
        let frame = encode_frame(points, self.config.nb_bits, self.config.nsv)?;
        trace!(
            "AVQ encoded {} subvectors into {} bits, {} left",
            points.len(),
            frame.bits_used(),
            frame.bits_remaining
        );
        Ok(frame)
    }

    /// Decode one frame of soft bits
    ///
    /// Corrupted input never fails: indices are clamped and missing bits
    /// read as zero.
    pub fn decode(&self, bits: &[u16]) -> DecodedFrame {
        let mut cursor = BitCursor::new(bits);
        let frame = if self.config.parallel_decode {
            decode_frame_parallel(&mut cursor, self.config.nb_bits, self.config.nsv)
        } else {
            decode_frame(&mut cursor, self.config.nb_bits, self.config.nsv)
        };
        trace!(
            "AVQ decoded {} subvectors from {} bits, {} left",
            frame.subvectors.len(),
            cursor.position(),
            frame.bits_remaining
        );
        frame
    }

    /// Decode a G.192 frame; erased frames decode to zero subvectors
    pub fn decode_g192(&self, frame: &G192Frame) -> DecodedFrame {
        if frame.is_erased() {
            debug!("AVQ frame erased, zeroing {} subvectors", self.config.nsv);
            return DecodedFrame {
                subvectors: vec![[0; SUBVECTOR_LEN]; self.config.nsv],
                bits_remaining: self.config.nb_bits,
            };
        }
        self.decode(&frame.bits)
    }

    /// Wrap an encoded payload in a good G.192 frame padded to the budget
    pub fn to_g192(&self, frame: &EncodedFrame) -> G192Frame {
        let mut bits = frame.bits.clone();
        bits.resize(self.config.nb_bits.max(bits.len()), G192_ZERO);
        G192Frame::good(bits)
    }
}
