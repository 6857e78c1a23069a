//! Core types for the AVQ library
//!
//! This module defines the lattice point representation, the quantizer order
//! and codeword types shared by the encoder and decoder, and the frame
//! configuration used by [`crate::AvqCodec`].

use crate::error::{AvqError, Result};
use crate::utils::validation::validate_frame_layout;
use std::fmt;

/// Dimension of one AVQ subvector
pub const SUBVECTOR_LEN: usize = 8;

/// An 8-dimensional point with integer coordinates
///
/// Points produced by the decoder are always members of the RE8 lattice.
pub type LatticePoint = [i32; SUBVECTOR_LEN];

/// Largest quantizer order a frame can carry
pub const MAX_ORDER: u32 = 36;

/// Largest Voronoi extension order (reached at [`MAX_ORDER`])
pub const MAX_VORONOI_ORDER: u32 = (MAX_ORDER - 4) / 2;

/// Largest subvector count accepted by [`AvqConfig`]
pub const MAX_SUBVECTORS: usize = 64;

/// Largest per-frame bit budget accepted by [`AvqConfig`]
pub const MAX_FRAME_BITS: usize = 4096;

/// Quantizer order (codebook number) of one subvector
///
/// `0` is the all-zero vector, `2..=4` select the base codebooks Q2..Q4 and
/// every larger value selects a Voronoi-extended codebook. Order `1` does
/// not exist. Values above [`MAX_ORDER`] can only appear when a corrupted
/// stream is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct QuantizerOrder(u32);

impl QuantizerOrder {
    /// The all-zero codebook
    pub const ZERO: Self = Self(0);

    /// Create a quantizer order, rejecting the nonexistent order 1
    pub fn new(order: u32) -> Result<Self> {
        if order == 1 {
            return Err(AvqError::InvalidOrder { order });
        }
        Ok(Self(order))
    }

    /// Order encoded by a unary run of `ones` one-bits
    pub(crate) const fn from_unary_run(ones: u32) -> Self {
        if ones == 0 {
            Self(0)
        } else {
            Self(ones + 1)
        }
    }

    /// Numeric order
    pub const fn value(self) -> u32 {
        self.0
    }

    /// True for the all-zero codebook
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True if the order is within [`MAX_ORDER`]
    pub const fn is_supported(self) -> bool {
        self.0 <= MAX_ORDER
    }

    /// Base codebook the order is built on (`0`, `2`, `3` or `4`)
    pub const fn base_order(self) -> u32 {
        if self.0 <= 4 {
            self.0
        } else if self.0 % 2 == 1 {
            3
        } else {
            4
        }
    }

    /// Voronoi extension order `r` (0 for base codebooks)
    pub const fn voronoi_order(self) -> u32 {
        if self.0 <= 4 {
            0
        } else {
            (self.0 - self.base_order()) / 2
        }
    }

    /// Width of the base index field
    pub const fn index_bits(self) -> u32 {
        4 * self.base_order()
    }

    /// Width of each of the 8 Voronoi index fields
    pub const fn extension_bits(self) -> u32 {
        self.voronoi_order()
    }

    /// Index plus extension payload, always `4 * order`
    pub const fn payload_bits(self) -> u32 {
        self.index_bits() + 8 * self.extension_bits()
    }

    /// Bits of the complete codeword including a terminated unary order code
    pub const fn cost_bits(self) -> u32 {
        if self.0 == 0 {
            1
        } else {
            5 * self.0
        }
    }
}

impl fmt::Display for QuantizerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// The multiplexed representation of one subvector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Codeword {
    /// Quantizer order
    pub order: QuantizerOrder,
    /// Base codebook index
    pub index: u32,
    /// Voronoi index, all zero for orders up to 4
    pub voronoi: [u32; SUBVECTOR_LEN],
}

impl Codeword {
    /// Codeword of the all-zero vector
    pub const ZERO: Self = Self {
        order: QuantizerOrder::ZERO,
        index: 0,
        voronoi: [0; SUBVECTOR_LEN],
    };
}

/// AVQ frame configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvqConfig {
    /// Bit budget of one AVQ frame
    pub nb_bits: usize,
    /// Number of 8-dimensional subvectors per frame
    pub nsv: usize,
    /// Reconstruct subvectors in parallel after demultiplexing
    pub parallel_decode: bool,
}

impl AvqConfig {
    /// Create a new frame configuration
    pub fn new(nb_bits: usize, nsv: usize) -> Self {
        Self {
            nb_bits,
            nsv,
            parallel_decode: false,
        }
    }

    /// Enable or disable two-pass parallel decoding
    pub fn with_parallel_decode(mut self, parallel: bool) -> Self {
        self.parallel_decode = parallel;
        self
    }

    /// Number of coefficients in one frame
    pub fn frame_len(&self) -> usize {
        self.nsv * SUBVECTOR_LEN
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_frame_layout(self.nb_bits, self.nsv)
    }
}
