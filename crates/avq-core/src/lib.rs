//! # AVQ-Core: RE8 Lattice Vector Quantizer
//!
//! This library implements the algebraic vector quantizer (AVQ) used by the
//! G.722 super-wideband extensions to code MDCT coefficients. Each group of
//! 8 coefficients is quantized to a point of the RE8 lattice and sent as a
//! variable-length codeword within a per-frame bit budget.
//!
//! ## Features
//!
//! - **Base codebooks**: Q2, Q3 and Q4 leader-class codebooks with
//!   combinatorial position indexing
//! - **Voronoi extension**: Unbounded orders built on the base codebooks
//! - **Frame codec**: Unary order coding with budget-driven stop bits
//! - **Quantizer**: Gain estimation and nearest RE8 point search
//! - **G.192**: Soft-bit framing for ITU-T conformance streams
//!
//! ## Usage
//!
//! ```rust
//! use avq_core::{AvqCodec, AvqConfig};
//!
//! // 4 subvectors (32 coefficients) in a 80-bit budget
//! let codec = AvqCodec::new(AvqConfig::new(80, 4))?;
//!
//! let coefficients = vec![0.0f32; 32];
//! let encoded = codec.encode(&coefficients)?;
//!
//! let decoded = codec.decode(&encoded.frame.bits);
//! assert_eq!(decoded.subvectors, encoded.frame.transmitted);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Rayon-backed subvector reconstruction (enabled by default)

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod avq;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use avq::{AvqCodec, AvqEncoding, BitCursor, BitWriter, DecodedFrame, EncodedFrame};
pub use error::{AvqError, Result};
pub use types::{AvqConfig, Codeword, LatticePoint, QuantizerOrder, MAX_ORDER, SUBVECTOR_LEN};

/// Version information for the AVQ library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the AVQ library
///
/// Installs a `tracing` subscriber if none is set and builds the lazy
/// codebook lookup. It's safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for setup that can fail.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt::try_init();

    // Build the encoder's leader lookup
    let _ = avq::leader::lookup_leader(&[0; SUBVECTOR_LEN]);

    tracing::info!("AVQ-Core v{} initialized", VERSION);
    tracing::info!(
        "Base codebook sizes: Q3 {}, Q4 {}",
        avq::tables::Q3_SIZE,
        avq::tables::Q4_SIZE
    );

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        max_order: MAX_ORDER,
        leader_classes: avq::tables::LEADER_CLASSES.len(),
        parallel: cfg!(feature = "parallel"),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Largest quantizer order
    pub max_order: u32,
    /// Number of base leader classes
    pub leader_classes: usize,
    /// Whether parallel reconstruction is compiled in
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
        assert!(init().is_ok());
    }

    #[test]
    fn test_info() {
        let info = info();
        assert_eq!(info.version, VERSION);
        assert_eq!(info.max_order, 36);
        assert_eq!(info.leader_classes, 28);
    }
}
