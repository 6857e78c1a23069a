//! AVQ Test Utilities
//!
//! Bit-field builders and seeded random inputs shared by the AVQ tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::avq::re8::nearest_point_scaled;
use crate::types::{LatticePoint, SUBVECTOR_LEN};
use crate::utils::g192::hard_bits_to_soft;

/// Hard bits of `value`, `width` bits wide, MSB first
pub fn field(value: u32, width: u32) -> Vec<u8> {
    (0..width).rev().map(|s| ((value >> s) & 1) as u8).collect()
}

/// Soft-bit words of a hard-bit sequence
pub fn soft(bits: &[u8]) -> Vec<u16> {
    hard_bits_to_soft(bits)
}

/// Deterministic generator for a test
pub fn test_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random coefficients with magnitudes around `scale`
pub fn random_coefficients(rng: &mut StdRng, len: usize, scale: f32) -> Vec<f32> {
    (0..len)
        .map(|_| {
            let a: f32 = rng.gen_range(-1.0..1.0);
            let b: f32 = rng.gen_range(-1.0..1.0);
            (a + b) * scale
        })
        .collect()
}

/// Random RE8 point with coordinates around `scale`
pub fn random_lattice_point(rng: &mut StdRng, scale: i64) -> LatticePoint {
    let t: [i64; SUBVECTOR_LEN] = std::array::from_fn(|_| rng.gen_range(-1024 * scale..=1024 * scale));
    nearest_point_scaled(&t, 1024)
}

/// Random hard bits
pub fn random_bits(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..=1u8)).collect()
}
