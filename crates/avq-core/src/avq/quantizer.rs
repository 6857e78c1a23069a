//! Lattice quantizer
//!
//! Maps real coefficients to RE8 points under a bit budget. A global gain
//! is chosen so that the estimated cost of all subvectors stays within the
//! budget, then every scaled subvector is rounded to its nearest RE8 point.
//!
//! The cost of a subvector with energy `E` is estimated as
//! `5 * log2((2 + E) / 2)` bits, which tracks the `5n` bits of an order-`n`
//! codeword. Scaling by `1 / g` lowers every estimate by `10 * log2(g)`, so
//! the search runs on that offset and `g = 2^(offset / 10)`.
//!
//! The gain is also kept large enough for every scaled coefficient to stay
//! within [`MAX_SCALED_MAGNITUDE`], so each point has a codeword of order
//! [`crate::types::MAX_ORDER`] or less.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::re8::nearest_point;
use super::voronoi::encode_point;
use crate::error::Result;
use crate::types::{LatticePoint, MAX_VORONOI_ORDER, SUBVECTOR_LEN};
use crate::utils::validation::validate_coefficients;

/// Number of bisection steps of the gain search
pub const GAIN_SEARCH_STEPS: usize = 10;

/// Initial step of the gain search, in estimated bits
const GAIN_SEARCH_START: f32 = 128.0;

/// Share of the budget the estimate may use
const BUDGET_MARGIN: f32 = 0.95;

/// Largest magnitude of a scaled coefficient
pub const MAX_SCALED_MAGNITUDE: f32 = (1u32 << MAX_VORONOI_ORDER) as f32;

/// Gain doublings tried when a point still has no codeword
const MAX_GAIN_RETRIES: usize = 8;

/// Subvectors of a quantized frame with the gain that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedFrame {
    /// Global gain; coefficients are approximated by `gain * point`
    pub gain: f32,
    /// One RE8 point per subvector
    pub subvectors: Vec<LatticePoint>,
}

fn estimated_bits(subvector: &[f32]) -> f32 {
    let energy: f32 = subvector.iter().map(|&v| v * v).sum();
    5.0 * ((2.0 + energy) * 0.5).log2()
}

/// Estimate the global gain for a frame
///
/// `coefficients` must hold `nsv * 8` values.
pub fn estimate_gain(coefficients: &[f32], nb_bits: usize, nsv: usize) -> f32 {
    let estimates: Vec<f32> = coefficients
        .chunks_exact(SUBVECTOR_LEN)
        .take(nsv)
        .map(estimated_bits)
        .collect();

    let limit = BUDGET_MARGIN * (nb_bits as f32 - nsv as f32);
    let mut step = GAIN_SEARCH_START;
    let mut offset = 0.0f32;
    for _ in 0..GAIN_SEARCH_STEPS {
        offset += step;
        let bits: f32 = estimates.iter().map(|&e| (e - offset).max(0.0)).sum();
        if bits <= limit {
            offset -= step;
        }
        step *= 0.5;
    }

    (offset / 10.0).exp2()
}

/// Smallest gain that keeps every scaled coefficient encodable
pub fn magnitude_gain(coefficients: &[f32]) -> f32 {
    let peak = coefficients.iter().fold(0.0f32, |m, &c| m.max(c.abs()));
    peak / MAX_SCALED_MAGNITUDE
}

fn to_points(coefficients: &[f32], gain: f32) -> Vec<LatticePoint> {
    let scale = 1.0 / gain;
    let to_point = |chunk: &[f32]| {
        let mut x = [0.0f32; SUBVECTOR_LEN];
        for (xi, &c) in x.iter_mut().zip(chunk) {
            *xi = c * scale;
        }
        nearest_point(&x)
    };

    #[cfg(feature = "parallel")]
    let points = coefficients.par_chunks_exact(SUBVECTOR_LEN).map(to_point).collect();
    #[cfg(not(feature = "parallel"))]
    let points = coefficients.chunks_exact(SUBVECTOR_LEN).map(to_point).collect();
    points
}

/// Quantize a frame of coefficients to RE8 points
///
/// Every returned point has a codeword (see [`encode_point`]); whether it
/// fits the budget is decided by the frame encoder.
///
/// # Errors
///
/// Returns an error if `coefficients` does not hold `nsv * 8` finite values.
pub fn quantize(coefficients: &[f32], nb_bits: usize, nsv: usize) -> Result<QuantizedFrame> {
    validate_coefficients(coefficients, nsv)?;

    let mut gain = estimate_gain(coefficients, nb_bits, nsv).max(magnitude_gain(coefficients));
    let mut subvectors = to_points(coefficients, gain);
    for _ in 0..MAX_GAIN_RETRIES {
        if subvectors.iter().all(|p| encode_point(p).is_some()) {
            break;
        }
        gain *= 2.0;
        subvectors = to_points(coefficients, gain);
    }

    Ok(QuantizedFrame { gain, subvectors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avq::re8::is_re8_point;
    use crate::error::AvqError;

    #[test]
    fn test_silent_frame() {
        let frame = quantize(&[0.0; 32], 80, 4).unwrap();
        assert_eq!(frame.subvectors, vec![[0; 8]; 4]);
        assert_eq!(frame.gain, 1.0);
    }

    #[test]
    fn test_gain_grows_with_energy() {
        let quiet = vec![1.0f32; 64];
        let loud = vec![100.0f32; 64];
        let g_quiet = estimate_gain(&quiet, 80, 8);
        let g_loud = estimate_gain(&loud, 80, 8);
        assert!(g_loud > g_quiet);
        assert!(g_quiet >= 1.0);
    }

    #[test]
    fn test_gain_is_bounded() {
        let frame = quantize(&[1.0e6; 16], 0, 2).unwrap();
        let max_gain = (255.75f32 / 10.0).exp2();
        assert!(frame.gain <= max_gain * 1.001);
        for point in &frame.subvectors {
            assert!(is_re8_point(point));
        }
    }

    #[test]
    fn test_points_are_lattice_members() {
        let coefficients: Vec<f32> = (0..64).map(|i| ((i * 37) % 23) as f32 - 11.0).collect();
        let frame = quantize(&coefficients, 120, 8).unwrap();
        assert_eq!(frame.subvectors.len(), 8);
        assert!(frame.subvectors.iter().all(is_re8_point));
    }

    #[test]
    fn test_large_coefficients_stay_encodable() {
        for peak in [1.0e7f32, 1.0e15, 1.0e20, f32::MAX] {
            let mut coefficients = [0.0f32; 16];
            coefficients[0] = peak;
            coefficients[1] = -peak;
            coefficients[9] = peak * 0.25;

            let frame = quantize(&coefficients, 4000, 2).unwrap();
            assert!(frame.gain >= magnitude_gain(&coefficients), "peak {peak}");
            for point in &frame.subvectors {
                assert!(encode_point(point).is_some(), "peak {peak}: {point:?}");
            }
            assert_ne!(frame.subvectors[0], [0; 8], "peak {peak}");
        }
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(
            quantize(&[0.0; 12], 40, 2),
            Err(AvqError::InvalidFrameSize { expected: 16, actual: 12 })
        ));
    }
}
