//! AVQ Decoder Tests
//!
//! Frame decoding against hand-built bitstreams, and robustness of the
//! decoder against corrupted or truncated input.

use super::utils::*;
use crate::avq::bitstream::BitCursor;
use crate::avq::frame::{decode_frame, decode_frame_parallel, demux_frame};
use crate::avq::re8::is_re8_point;
use crate::types::QuantizerOrder;

/// Test a Q3 subvector followed by leftover bits
#[test]
fn test_q3_subvector_with_leftover() {
    let mut bits = vec![1, 1, 0];
    bits.extend(field(1376, 12));
    bits.extend([1, 0, 1, 1, 0]);
    let words = soft(&bits);

    let mut cursor = BitCursor::new(&words);
    let frame = decode_frame(&mut cursor, 20, 1);
    assert_eq!(frame.subvectors, vec![[-3, 1, 1, 1, 1, 1, 1, 1]]);
    assert_eq!(frame.bits_remaining, 5);

    // The frame layer reads its own fields right after the AVQ payload
    assert_eq!(cursor.position(), 20 - frame.bits_remaining);
    assert_eq!(cursor.read(5), 0b10110);
}

/// Test a frame mixing zero, base and extended subvectors
#[test]
fn test_mixed_orders() {
    let mut bits = Vec::new();
    // Q0
    bits.push(0);
    // Q4, index 0
    bits.extend([1, 1, 1, 0]);
    bits.extend(field(0, 16));
    // Q5, index 5, k = (1,0,1,0,0,0,0,1)
    bits.extend([1, 1, 1, 1, 0]);
    bits.extend(field(5, 12));
    for k in [1, 0, 1, 0, 0, 0, 0, 1] {
        bits.extend(field(k, 1));
    }
    let words = soft(&bits);

    let frame = decode_frame(&mut BitCursor::new(&words), 100, 3);
    assert_eq!(
        frame.subvectors,
        vec![
            [0; 8],
            [2, 2, 2, 2, 2, 2, 0, 0],
            [5, 3, 1, 3, 3, -1, 3, -1],
        ]
    );
    assert_eq!(frame.bits_remaining, 100 - 1 - 20 - 25);
}

/// Test the Q6 Voronoi layout (16-bit index, 8 one-bit fields)
#[test]
fn test_q6_subvector() {
    let mut bits = vec![1, 1, 1, 1, 1, 0];
    bits.extend(field(100, 16));
    for k in [1, 1, 0, 0, 1, 0, 1, 1] {
        bits.extend(field(k, 1));
    }
    let words = soft(&bits);

    let demuxed = demux_frame(&mut BitCursor::new(&words), 40, 1);
    assert_eq!(demuxed.codewords[0].order, QuantizerOrder::new(6).unwrap());
    assert_eq!(demuxed.codewords[0].index, 100);
    assert_eq!(demuxed.codewords[0].voronoi, [1, 1, 0, 0, 1, 0, 1, 1]);
    assert_eq!(demuxed.bits_remaining, 10);

    let frame = decode_frame(&mut BitCursor::new(&words), 40, 1);
    assert_eq!(frame.subvectors, vec![[-3, 5, 3, -5, 5, -1, 5, -1]]);
}

/// Test that budgets of 8 bits or less consume nothing
#[test]
fn test_exhausted_budget() {
    let words = soft(&[1; 16]);
    for budget in 0..=8 {
        let mut cursor = BitCursor::new(&words);
        let frame = decode_frame(&mut cursor, budget, 3);
        assert_eq!(frame.subvectors, vec![[0; 8]; 3]);
        assert_eq!(frame.bits_remaining, budget);
        assert_eq!(cursor.position(), 0);
    }
}

/// Test that an out-of-range Q4 index falls back to index 0
#[test]
fn test_clamped_index() {
    let mut bits = vec![1, 1, 1, 0];
    bits.extend(field(0xFFFF, 16));
    let words = soft(&bits);
    let frame = decode_frame(&mut BitCursor::new(&words), 20, 1);
    assert_eq!(frame.subvectors, vec![[2, 2, 2, 2, 2, 2, 0, 0]]);
}

/// Test that a bitstream shorter than the budget reads as zeros
#[test]
fn test_truncated_stream() {
    let words = soft(&[1, 1, 1]);
    let frame = decode_frame(&mut BitCursor::new(&words), 60, 2);
    assert_eq!(frame.subvectors[0], [2, 2, 2, 2, 2, 2, 0, 0]);
    assert_eq!(frame.subvectors[1], [0; 8]);
}

/// Test random garbage never breaks the decoder
#[test]
fn test_random_bitstreams() {
    let mut rng = test_rng(0x5EED);
    for trial in 0..500 {
        let nb_bits = (trial * 7) % 400;
        let nsv = 1 + trial % 8;
        let words = soft(&random_bits(&mut rng, nb_bits));

        let sequential = decode_frame(&mut BitCursor::new(&words), nb_bits, nsv);
        let parallel = decode_frame_parallel(&mut BitCursor::new(&words), nb_bits, nsv);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.subvectors.len(), nsv);
        assert!(sequential.bits_remaining <= nb_bits);
        for point in &sequential.subvectors {
            assert!(is_re8_point(point), "trial {trial}: {point:?}");
        }
    }
}
