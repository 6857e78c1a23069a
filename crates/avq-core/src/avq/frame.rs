//! AVQ frame multiplexing
//!
//! A frame is `nsv` codewords written back to back, each one a unary order
//! code followed by the base index and, for extended orders, eight Voronoi
//! index fields. The frame layer tracks the bit budget so that the caller
//! can hand leftover bits to other fields.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{trace, warn};

use super::bitstream::{BitCursor, BitWriter};
use super::order::{order_fit, read_order, write_order, OrderFit, MIN_ORDER_BUDGET};
use super::tables::MAX_BASE_INDEX;
use super::voronoi::{decode_order, encode_point};
use crate::error::Result;
use crate::types::{Codeword, LatticePoint, SUBVECTOR_LEN};
use crate::utils::validation::validate_lattice_points;

/// Subvectors of a decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// One lattice point per subvector
    pub subvectors: Vec<LatticePoint>,
    /// Bits of the budget left after the AVQ payload
    pub bits_remaining: usize,
}

impl DecodedFrame {
    /// All subvectors laid out as one coefficient array
    pub fn coefficients(&self) -> Vec<i32> {
        self.subvectors.iter().flatten().copied().collect()
    }
}

/// Codewords of a demultiplexed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemuxedFrame {
    /// One codeword per subvector
    pub codewords: Vec<Codeword>,
    /// Bits of the budget left after the AVQ payload
    pub bits_remaining: usize,
}

/// Output of the frame encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Soft-bit words of the AVQ payload
    pub bits: Vec<u16>,
    /// Bits of the budget left after the AVQ payload
    pub bits_remaining: usize,
    /// Codewords actually sent
    pub codewords: Vec<Codeword>,
    /// Points the decoder will reconstruct
    pub transmitted: Vec<LatticePoint>,
}

impl EncodedFrame {
    /// Number of payload bits written
    pub fn bits_used(&self) -> usize {
        self.bits.len()
    }
}

fn read_codeword(cursor: &mut BitCursor<'_>, bits_remaining: &mut usize) -> Codeword {
    let order = read_order(cursor, bits_remaining);
    if order.is_zero() {
        return Codeword::ZERO;
    }

    let payload = order.payload_bits() as usize;
    if !order.is_supported() {
        warn!("AVQ order {} exceeds the supported maximum, subvector zeroed", order);
        cursor.skip(payload);
        *bits_remaining = bits_remaining.saturating_sub(payload);
        return Codeword::ZERO;
    }

    let index = cursor.read(order.index_bits());
    if index > MAX_BASE_INDEX {
        trace!("AVQ base index {} out of range, clamped to 0", index);
    }
    let width = order.extension_bits();
    let mut voronoi = [0; SUBVECTOR_LEN];
    if width > 0 {
        for k in &mut voronoi {
            *k = cursor.read(width);
        }
    }
    *bits_remaining = bits_remaining.saturating_sub(payload);

    Codeword {
        order,
        index,
        voronoi,
    }
}

/// Parse the codewords of one frame without reconstructing them
pub fn demux_frame(cursor: &mut BitCursor<'_>, nb_bits: usize, nsv: usize) -> DemuxedFrame {
    let mut bits_remaining = nb_bits;
    let codewords = (0..nsv)
        .map(|_| read_codeword(cursor, &mut bits_remaining))
        .collect();
    DemuxedFrame {
        codewords,
        bits_remaining,
    }
}

/// Reconstruct the lattice point of a codeword
pub fn decode_codeword(codeword: &Codeword) -> LatticePoint {
    decode_order(codeword.order, codeword.index, &codeword.voronoi)
}

/// Reconstruct demultiplexed codewords on the rayon pool
pub fn decode_codewords_parallel(codewords: &[Codeword]) -> Vec<LatticePoint> {
    #[cfg(feature = "parallel")]
    {
        codewords.par_iter().map(decode_codeword).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        codewords.iter().map(decode_codeword).collect()
    }
}

/// Decode one AVQ frame
///
/// Reads `nsv` codewords from `cursor` within a budget of `nb_bits` and
/// returns the reconstructed subvectors with the bits left over. The
/// cursor ends right after the AVQ payload.
pub fn decode_frame(cursor: &mut BitCursor<'_>, nb_bits: usize, nsv: usize) -> DecodedFrame {
    let mut bits_remaining = nb_bits;
    let subvectors = (0..nsv)
        .map(|_| decode_codeword(&read_codeword(cursor, &mut bits_remaining)))
        .collect();
    DecodedFrame {
        subvectors,
        bits_remaining,
    }
}

/// Decode one AVQ frame in two passes
///
/// The order codes make codeword boundaries sequential, so the frame is
/// first demultiplexed and the codewords are then reconstructed in
/// parallel. The result is identical to [`decode_frame`].
pub fn decode_frame_parallel(cursor: &mut BitCursor<'_>, nb_bits: usize, nsv: usize) -> DecodedFrame {
    let demuxed = demux_frame(cursor, nb_bits, nsv);
    DecodedFrame {
        subvectors: decode_codewords_parallel(&demuxed.codewords),
        bits_remaining: demuxed.bits_remaining,
    }
}

fn write_codeword(writer: &mut BitWriter, codeword: &Codeword) {
    writer.write(codeword.index, codeword.order.index_bits());
    let width = codeword.order.extension_bits();
    if width > 0 {
        for &k in &codeword.voronoi {
            writer.write(k, width);
        }
    }
}

/// Encode one AVQ frame of RE8 points
///
/// Subvectors are written in order. A subvector whose codeword does not fit
/// the remaining budget, or that lies beyond the largest order, is sent as
/// the zero vector; [`EncodedFrame::transmitted`] holds what the decoder
/// will reconstruct.
///
/// # Errors
///
/// Returns an error if `subvectors` does not hold `nsv` points or if one of
/// them is not an RE8 lattice point.
pub fn encode_frame(subvectors: &[LatticePoint], nb_bits: usize, nsv: usize) -> Result<EncodedFrame> {
    validate_lattice_points(subvectors, nsv)?;

    let mut writer = BitWriter::with_capacity(nb_bits);
    let mut bits_remaining = nb_bits;
    let mut codewords = Vec::with_capacity(nsv);
    let mut transmitted = Vec::with_capacity(nsv);

    for point in subvectors {
        if bits_remaining <= MIN_ORDER_BUDGET {
            codewords.push(Codeword::ZERO);
            transmitted.push([0; SUBVECTOR_LEN]);
            continue;
        }

        let codeword = encode_point(point).unwrap_or(Codeword::ZERO);
        match order_fit(codeword.order, bits_remaining) {
            OrderFit::DoesNotFit => {
                write_order(&mut writer, Codeword::ZERO.order, &mut bits_remaining);
                codewords.push(Codeword::ZERO);
                transmitted.push([0; SUBVECTOR_LEN]);
            }
            OrderFit::Terminated | OrderFit::ImplicitStop => {
                write_order(&mut writer, codeword.order, &mut bits_remaining);
                write_codeword(&mut writer, &codeword);
                bits_remaining -= codeword.order.payload_bits() as usize;
                codewords.push(codeword);
                transmitted.push(*point);
            }
        }
    }

    Ok(EncodedFrame {
        bits: writer.into_words(),
        bits_remaining,
        codewords,
        transmitted,
    })
}
