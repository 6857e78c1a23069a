//! AVQ Frame Tests
//!
//! End-to-end quantize, multiplex and decode over random frames, checking
//! reconstruction and bit accounting.

use rand::Rng;

use super::utils::*;
use crate::avq::bitstream::BitCursor;
use crate::avq::codec::AvqCodec;
use crate::avq::frame::{decode_frame, decode_frame_parallel, encode_frame};
use crate::avq::quantizer::quantize;
use crate::types::AvqConfig;

/// Test random frames across budgets and subvector counts
#[test]
fn test_random_frame_roundtrip() {
    let mut rng = test_rng(5);
    for trial in 0..1000 {
        let nsv = rng.gen_range(1..=8);
        let nb_bits = rng.gen_range(0..=200);
        let scale = [1.0f32, 10.0, 100.0, 1000.0][trial % 4];
        let coefficients = random_coefficients(&mut rng, nsv * 8, scale);

        let quantized = quantize(&coefficients, nb_bits, nsv).unwrap();
        let encoded = encode_frame(&quantized.subvectors, nb_bits, nsv).unwrap();
        assert_eq!(encoded.bits_used() + encoded.bits_remaining, nb_bits);

        // Whatever follows the payload must not disturb it
        let mut bits = encoded.bits.clone();
        bits.extend(soft(&random_bits(&mut rng, encoded.bits_remaining)));

        let decoded = decode_frame(&mut BitCursor::new(&bits), nb_bits, nsv);
        assert_eq!(decoded.subvectors, encoded.transmitted, "trial {trial}");
        assert_eq!(decoded.bits_remaining, encoded.bits_remaining, "trial {trial}");
    }
}

/// Test that a frame with enough bits sends every subvector
#[test]
fn test_generous_budget_keeps_all_points() {
    let mut rng = test_rng(17);
    for _ in 0..100 {
        let points: Vec<_> = (0..4).map(|_| random_lattice_point(&mut rng, 20)).collect();
        let encoded = encode_frame(&points, 4000, 4).unwrap();
        assert_eq!(encoded.transmitted, points);

        let decoded = decode_frame_parallel(&mut BitCursor::new(&encoded.bits), 4000, 4);
        assert_eq!(decoded.subvectors, points);
    }
}

/// Test the leftover bits are addressable by the frame layer
#[test]
fn test_leftover_bits_follow_payload() {
    let points = [[2, 2, 0, 0, 0, 0, 0, 0], [0; 8]];
    let encoded = encode_frame(&points, 40, 2).unwrap();
    assert_eq!(encoded.bits_used(), 11);

    let mut bits = encoded.bits.clone();
    bits.extend(soft(&field(0x1ABCDEF, 29)));

    let mut cursor = BitCursor::new(&bits);
    let decoded = decode_frame(&mut cursor, 40, 2);
    assert_eq!(decoded.bits_remaining, 29);
    assert_eq!(cursor.read(29), 0x1ABCDEF);
}

/// Test the codec facade over a sequence of frames
#[test]
fn test_codec_frame_sequence() {
    let mut rng = test_rng(23);
    let codec = AvqCodec::new(AvqConfig::new(96, 6).with_parallel_decode(true)).unwrap();
    for _ in 0..50 {
        let coefficients = random_coefficients(&mut rng, 48, 50.0);
        let encoded = codec.encode(&coefficients).unwrap();
        let decoded = codec.decode(&encoded.frame.bits);
        assert_eq!(decoded.subvectors, encoded.frame.transmitted);

        let reconstruction = encoded.reconstruction();
        let decoded_scaled: Vec<f32> = decoded
            .coefficients()
            .iter()
            .map(|&c| c as f32 * encoded.gain)
            .collect();
        assert_eq!(reconstruction, decoded_scaled);
    }
}
