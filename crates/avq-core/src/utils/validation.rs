//! Input validation utilities for AVQ operations

use crate::avq::re8::is_re8_point;
use crate::error::{AvqError, Result};
use crate::types::{LatticePoint, MAX_FRAME_BITS, MAX_SUBVECTORS, SUBVECTOR_LEN};

/// Validate a frame layout against the supported limits
pub fn validate_frame_layout(nb_bits: usize, nsv: usize) -> Result<()> {
    if nsv == 0 || nsv > MAX_SUBVECTORS {
        return Err(AvqError::InvalidSubvectorCount {
            nsv,
            max: MAX_SUBVECTORS,
        });
    }

    if nb_bits > MAX_FRAME_BITS {
        return Err(AvqError::InvalidBitBudget {
            nb_bits,
            max: MAX_FRAME_BITS,
        });
    }

    Ok(())
}

/// Validate a coefficient frame of `nsv` subvectors
pub fn validate_coefficients(coefficients: &[f32], nsv: usize) -> Result<()> {
    let expected = nsv * SUBVECTOR_LEN;
    if coefficients.len() != expected {
        return Err(AvqError::InvalidFrameSize {
            expected,
            actual: coefficients.len(),
        });
    }

    if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
        return Err(AvqError::encoding_failed(format!(
            "Coefficient at index {} is not finite: {}",
            i, coefficients[i]
        )));
    }

    Ok(())
}

/// Validate that every point of a frame is in RE8
pub fn validate_lattice_points(points: &[LatticePoint], nsv: usize) -> Result<()> {
    if points.len() != nsv {
        return Err(AvqError::InvalidFrameSize {
            expected: nsv,
            actual: points.len(),
        });
    }

    match points.iter().position(|p| !is_re8_point(p)) {
        Some(i) => Err(AvqError::NotALatticePoint {
            subvector: i,
            point: points[i],
        }),
        None => Ok(()),
    }
}
