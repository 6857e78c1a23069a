//! RE8 Algebraic Vector Quantizer
//!
//! This module implements the algebraic vector quantizer of the G.722
//! super-wideband extensions: 8-dimensional subvectors are quantized to
//! points of the Gosset lattice RE8 and sent as a unary quantizer order,
//! a base codebook index and, for large points, a Voronoi extension index.
//!
//! # Architecture
//!
//! The implementation is split into several modules:
//! - `codec`: Frame-level codec interface
//! - `frame`: Frame multiplexing and demultiplexing
//! - `order`: Unary quantizer order coding
//! - `voronoi`: Voronoi extension beyond the base codebooks
//! - `re8`: Base codebook decoder/encoder and nearest-point search
//! - `leader`: Leader class search
//! - `combinatorial`: Position rank/unrank
//! - `quantizer`: Gain estimation and lattice quantization
//! - `bitstream`: Soft-bit cursor and writer
//! - `tables`: Codebook tables and constants

pub mod bitstream;
pub mod codec;
pub mod combinatorial;
pub mod frame;
pub mod leader;
pub mod order;
pub mod quantizer;
pub mod re8;
pub mod tables;
pub mod voronoi;

#[cfg(test)]
mod tests;

// Re-export the main codec struct
pub use codec::{AvqCodec, AvqEncoding};

// Re-export the frame entry points
pub use bitstream::{BitCursor, BitWriter};
pub use frame::{
    decode_frame, decode_frame_parallel, demux_frame, encode_frame, DecodedFrame, DemuxedFrame,
    EncodedFrame,
};
pub use quantizer::{quantize, QuantizedFrame};
pub use voronoi::{decode_order, encode_point};
