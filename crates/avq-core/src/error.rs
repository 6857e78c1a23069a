//! Error handling for the AVQ library
//!
//! The decode path never fails: corrupted indices are clamped and reads past
//! the end of a bitstream yield zero bits. Errors are raised only where a
//! caller breaks the API contract (configuration, slice sizes, non-lattice
//! input to the lattice encoder, malformed G.192 data).

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for AVQ operations
pub type Result<T> = std::result::Result<T, AvqError>;

/// Error type for AVQ operations
#[derive(Error, Debug)]
pub enum AvqError {
    /// Subvector count outside the supported range
    #[error("Invalid subvector count: {nsv} (range: 1-{max})")]
    InvalidSubvectorCount { nsv: usize, max: usize },

    /// Bit budget outside the supported range
    #[error("Invalid bit budget: {nb_bits} bits (max: {max})")]
    InvalidBitBudget { nb_bits: usize, max: usize },

    /// Input slice has the wrong number of values
    #[error("Invalid frame size: expected {expected}, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    /// Subvector handed to the lattice encoder is not an RE8 point
    #[error("Subvector {subvector} is not an RE8 lattice point: {point:?}")]
    NotALatticePoint { subvector: usize, point: [i32; 8] },

    /// Quantizer order that cannot be represented
    #[error("Invalid quantizer order: {order}")]
    InvalidOrder { order: u32 },

    /// Malformed G.192 soft-bit frame
    #[error("Invalid G.192 frame: {details}")]
    InvalidG192Frame { details: String },

    /// Encoding operation failed
    #[error("Encoding failed: {reason}")]
    EncodingFailed { reason: String },

    /// Buffer too small for operation
    #[error("Buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// I/O operation failed
    #[error("I/O operation failed: {reason}")]
    IoError { reason: String },
}

impl AvqError {
    /// Create a new G.192 framing error
    pub fn invalid_g192(details: impl Into<String>) -> Self {
        Self::InvalidG192Frame {
            details: details.into(),
        }
    }

    /// Create a new encoding failed error
    pub fn encoding_failed(reason: impl Into<String>) -> Self {
        Self::EncodingFailed {
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Configuration errors stay wrong until the caller rebuilds the codec;
    /// per-frame errors only affect the frame at hand.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidSubvectorCount { .. } | Self::InvalidBitBudget { .. } => false,

            Self::InvalidFrameSize { .. }
            | Self::NotALatticePoint { .. }
            | Self::InvalidOrder { .. }
            | Self::InvalidG192Frame { .. }
            | Self::EncodingFailed { .. }
            | Self::BufferTooSmall { .. }
            | Self::IoError { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSubvectorCount { .. } | Self::InvalidBitBudget { .. } => {
                ErrorCategory::Configuration
            }

            Self::InvalidFrameSize { .. }
            | Self::NotALatticePoint { .. }
            | Self::InvalidOrder { .. }
            | Self::EncodingFailed { .. } => ErrorCategory::Processing,

            Self::InvalidG192Frame { .. } => ErrorCategory::Format,

            Self::BufferTooSmall { .. } => ErrorCategory::Memory,

            Self::IoError { .. } => ErrorCategory::Io,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and parameter errors
    Configuration,
    /// Quantization and multiplexing errors
    Processing,
    /// Bitstream format errors
    Format,
    /// Memory management errors
    Memory,
    /// I/O related errors
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Processing => write!(f, "Processing"),
            Self::Format => write!(f, "Format"),
            Self::Memory => write!(f, "Memory"),
            Self::Io => write!(f, "I/O"),
        }
    }
}

/// Convert from I/O errors
impl From<std::io::Error> for AvqError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            reason: error.to_string(),
        }
    }
}
