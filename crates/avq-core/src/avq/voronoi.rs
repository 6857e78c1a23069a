//! Voronoi extension of the base codebooks
//!
//! An order `n >= 5` point is `y = (c << r) + v` where `c` is a Q3 or Q4
//! point, `r = (n - base) / 2` and `v` is the Voronoi code-vector of the
//! eight `r`-bit indices `k`, i.e. the representative of `k G` modulo
//! `2^r RE8` inside the shifted Voronoi region.
//!
//! `G` is the RE8 generator used for the Voronoi index:
//!
//! ```text
//! 4 0 0 0 0 0 0 0
//! 2 2 0 0 0 0 0 0
//! 2 0 2 0 0 0 0 0
//! 2 0 0 2 0 0 0 0
//! 2 0 0 0 2 0 0 0
//! 2 0 0 0 0 2 0 0
//! 2 0 0 0 0 0 2 0
//! 1 1 1 1 1 1 1 1
//! ```

use super::re8::{decode_base, encode_base, nearest_point_scaled};
use crate::types::{Codeword, LatticePoint, QuantizerOrder, MAX_VORONOI_ORDER, SUBVECTOR_LEN};

/// Largest coordinate magnitude of any codeword up to [`MAX_VORONOI_ORDER`]
///
/// Order 36 points stay below `10 << 16`; anything beyond this bound is
/// rejected before the extension search.
pub const MAX_ENCODABLE_MAGNITUDE: u32 = 16 << MAX_VORONOI_ORDER;

/// Coordinates of a lattice point in the generator basis, `k = y G^-1`
pub fn voronoi_coordinates(y: &LatticePoint) -> [i64; SUBVECTOR_LEN] {
    let y = y.map(i64::from);
    let mut k = [0; SUBVECTOR_LEN];
    k[7] = y[7];
    let mut sum = 5 * y[7];
    for i in (1..7).rev() {
        k[i] = (y[i] - y[7]) >> 1;
        sum -= y[i];
    }
    k[0] = (y[0] + sum) >> 2;
    k
}

/// Voronoi code-vector of the index `k` at extension order `r`
pub fn code_vector(k: &[u32; SUBVECTOR_LEN], r: u32) -> LatticePoint {
    let m = 1i64 << r;
    let k = k.map(i64::from);

    let mut y = [k[7]; SUBVECTOR_LEN];
    let mut sum = 0;
    for i in (1..7).rev() {
        let t = 2 * k[i];
        sum += t;
        y[i] += t;
    }
    y[0] += 4 * k[0] + sum;

    let mut shifted = y;
    shifted[0] -= 2;
    let v = nearest_point_scaled(&shifted, m);

    let mut out = [0; SUBVECTOR_LEN];
    for i in 0..SUBVECTOR_LEN {
        out[i] = (y[i] - m * i64::from(v[i])) as i32;
    }
    out
}

/// Reconstruct the lattice point of an order, index and Voronoi index
///
/// Orders up to 4 ignore `k` and decode the base codebook directly. Orders
/// beyond [`crate::types::MAX_ORDER`] decode to the zero vector.
pub fn decode_order(order: QuantizerOrder, index: u32, k: &[u32; SUBVECTOR_LEN]) -> LatticePoint {
    if !order.is_supported() {
        return [0; SUBVECTOR_LEN];
    }
    let r = order.voronoi_order();
    if r == 0 {
        return decode_base(order.value(), index);
    }

    let c = decode_base(order.base_order(), index);
    let v = code_vector(k, r);
    let mut y = [0; SUBVECTOR_LEN];
    for i in 0..SUBVECTOR_LEN {
        y[i] = (c[i] << r) + v[i];
    }
    y
}

/// Find the codeword of an RE8 point
///
/// The zero vector maps to order 0. Points outside the base codebooks are
/// extended with the smallest Voronoi order that reaches them. Returns
/// `None` for points outside RE8 and points that need more than
/// [`MAX_VORONOI_ORDER`] extension bits.
pub fn encode_point(y: &LatticePoint) -> Option<Codeword> {
    if y.iter().all(|&c| c == 0) {
        return Some(Codeword::ZERO);
    }
    if y.iter().any(|c| c.unsigned_abs() > MAX_ENCODABLE_MAGNITUDE) {
        return None;
    }
    if let Some(base) = encode_base(y) {
        return Some(Codeword {
            order: QuantizerOrder::new(base.order).ok()?,
            index: base.index,
            voronoi: [0; SUBVECTOR_LEN],
        });
    }
    if !super::re8::is_re8_point(y) {
        return None;
    }

    let coords = voronoi_coordinates(y);
    for r in 1..=MAX_VORONOI_ORDER {
        let mask = (1i64 << r) - 1;
        let k = coords.map(|c| (c & mask) as u32);
        let v = code_vector(&k, r);

        let mut c = [0; SUBVECTOR_LEN];
        for i in 0..SUBVECTOR_LEN {
            c[i] = (y[i] - v[i]) >> r;
        }
        if c.iter().all(|&ci| ci == 0) {
            continue;
        }

        if let Some(base) = encode_base(&c) {
            let base_order = if base.order == 2 { 3 } else { base.order };
            return Some(Codeword {
                order: QuantizerOrder::new(base_order + 2 * r).ok()?,
                index: base.index,
                voronoi: k,
            });
        }
    }
    None
}
