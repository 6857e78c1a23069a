//! RE8 base codebooks
//!
//! Decoding and encoding of the base orders Q2, Q3 and Q4, membership test
//! and nearest-point search for the RE8 lattice.
//!
//! A base index is laid out as `offset + (position_index << k1) + signs`,
//! where `offset` is the first index of the leader class, `k1` the number of
//! sign bits of the class and `position_index` combines the rank of the
//! second-tier positions, the rank of the third-tier positions inside them
//! and, for code level 4, which third-tier coordinate is raised to the top
//! magnitude.

use super::combinatorial::{rank, unrank, PositionSet};
use super::leader::{absolute_leader, find_leader, lookup_leader, BaseCodebook};
use super::tables::{LEADER_CLASSES, LEVEL4_TOP_MAGNITUDE, Q2_INDEX_LIMIT};
use crate::types::{LatticePoint, SUBVECTOR_LEN};

/// Fixed-point scale used by [`nearest_point`]
pub const NEAREST_POINT_SCALE: i64 = 1024;

/// Largest coordinate magnitude in the base codebooks
const MAX_BASE_MAGNITUDE: u32 = 8;

/// A base codebook index together with its order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseCodeword {
    /// Order 2, 3 or 4
    pub order: u32,
    /// Global index inside the order's table
    pub index: u32,
}

/// Check RE8 membership
///
/// All coordinates share one parity and their sum is a multiple of 4.
pub fn is_re8_point(point: &LatticePoint) -> bool {
    let parity = point[0] & 1;
    let sum: i64 = point.iter().map(|&c| i64::from(c)).sum();
    point.iter().all(|&c| c & 1 == parity) && sum % 4 == 0
}

/// Decode a base codebook index
///
/// Orders below 2 decode to the zero vector. Out-of-range indices are
/// clamped by the leader search.
pub fn decode_base(order: u32, index: u32) -> LatticePoint {
    if order < 2 {
        return [0; SUBVECTOR_LEN];
    }

    let hit = find_leader(index, order);
    let class = hit.class();
    let k1 = u32::from(class.sign_bits);
    let signs = hit.local_index & ((1 << k1) - 1);
    let mut pos = hit.local_index >> k1;
    let [v0, v1, v2] = class.magnitudes.map(i32::from);

    let mut x = [v0; SUBVECTOR_LEN];
    if class.code_level > 1 {
        let mut top = 0;
        if class.code_level == 4 {
            top = (pos & 1) as usize;
            pos >>= 1;
        }
        let mut sub = 0;
        if class.code_level >= 3 {
            let count = class.sub_positions();
            sub = pos % count;
            pos /= count;
        }

        let mut tier2 = [0usize; SUBVECTOR_LEN];
        let m = usize::from(class.m);
        for (slot, p) in tier2.iter_mut().zip(unrank(pos, SUBVECTOR_LEN, m).ascending()) {
            *slot = p;
        }
        for &p in &tier2[..m] {
            x[p] = v1;
        }

        if class.code_level >= 3 {
            let relative = unrank(sub, m, usize::from(class.m1));
            let tier3 = PositionSet::from_ascending(relative.ascending().map(|r| tier2[r]));
            for p in tier3.ascending() {
                x[p] = v2;
            }
            if class.code_level == 4 {
                if let Some(p) = tier3.ascending().nth(top) {
                    x[p] = LEVEL4_TOP_MAGNITUDE;
                }
            }
        }
    }

    apply_signs(&mut x, signs);
    x
}

fn apply_signs(x: &mut LatticePoint, mut signs: u32) {
    if x[0] & 1 == 1 {
        let mut sum = 0;
        for i in (1..SUBVECTOR_LEN).rev() {
            if signs & 1 == 1 {
                x[i] = -x[i];
            }
            signs >>= 1;
            sum += x[i];
        }
        sum += x[0];
        if sum % 4 != 0 {
            x[0] = -x[0];
        }
    } else {
        for i in (0..SUBVECTOR_LEN).rev() {
            if x[i] != 0 {
                if signs & 1 == 1 {
                    x[i] = -x[i];
                }
                signs >>= 1;
            }
        }
    }
}

fn collect_signs(x: &LatticePoint) -> u32 {
    let mut signs = 0;
    let mut bit = 0;
    if x[0] & 1 == 1 {
        for i in (1..SUBVECTOR_LEN).rev() {
            if x[i] < 0 {
                signs |= 1 << bit;
            }
            bit += 1;
        }
    } else {
        for i in (0..SUBVECTOR_LEN).rev() {
            if x[i] != 0 {
                if x[i] < 0 {
                    signs |= 1 << bit;
                }
                bit += 1;
            }
        }
    }
    signs
}

/// Encode a point of the base codebooks
///
/// Returns `None` for the zero vector, for points outside RE8 and for RE8
/// points whose leader is not in Q2, Q3 or Q4.
pub fn encode_base(x: &LatticePoint) -> Option<BaseCodeword> {
    if !is_re8_point(x) || x.iter().any(|c| c.unsigned_abs() > MAX_BASE_MAGNITUDE) {
        return None;
    }
    let entry = lookup_leader(&absolute_leader(x))?;
    let class = &LEADER_CLASSES[entry.class_id];
    let abs = x.map(i32::abs);
    let [_, v1, v2] = class.magnitudes.map(i32::from);

    let mut pos = 0;
    if class.code_level > 1 {
        let tier2 = PositionSet::from_ascending((0..SUBVECTOR_LEN).filter(|&i| abs[i] >= v1));
        pos = rank(&tier2);

        if class.code_level >= 3 {
            let tier2: Vec<usize> = tier2.ascending().collect();
            let relative = PositionSet::from_ascending(
                tier2
                    .iter()
                    .enumerate()
                    .filter(|&(_, &p)| abs[p] >= v2)
                    .map(|(r, _)| r),
            );
            pos = pos * class.sub_positions() + rank(&relative);

            if class.code_level == 4 {
                let first = relative.ascending().next().map_or(0, |r| tier2[r]);
                pos = pos * 2 + u32::from(abs[first] != LEVEL4_TOP_MAGNITUDE);
            }
        }
    }

    let index = entry.offset + (pos << class.sign_bits) + collect_signs(x);
    let order = match entry.codebook {
        BaseCodebook::Q3 if index < Q2_INDEX_LIMIT => 2,
        BaseCodebook::Q3 => 3,
        BaseCodebook::Q4 => 4,
    };
    Some(BaseCodeword { order, index })
}

fn nearest_2d8(u: &[i64; SUBVECTOR_LEN], m: i64) -> [i64; SUBVECTOR_LEN] {
    let mut q = [0i64; SUBVECTOR_LEN];
    for (qi, &ui) in q.iter_mut().zip(u) {
        *qi = 2 * (ui + m).div_euclid(2 * m);
    }

    let sum: i64 = q.iter().sum();
    if (sum / 2) % 2 != 0 {
        let mut best = 0;
        let mut max_err = -1;
        for i in 0..SUBVECTOR_LEN {
            let err = (u[i] - m * q[i]).abs();
            if err > max_err {
                max_err = err;
                best = i;
            }
        }
        q[best] += if u[best] - m * q[best] >= 0 { 2 } else { -2 };
    }
    q
}

fn squared_error(t: &[i64; SUBVECTOR_LEN], y: &[i64; SUBVECTOR_LEN], m: i64) -> i64 {
    t.iter().zip(y).map(|(&ti, &yi)| (ti - m * yi).pow(2)).sum()
}

/// Nearest RE8 point to `t / m`
///
/// Searches the 2D8 coset and its `(1, ..., 1)` translate and keeps the
/// closer candidate; on a tie the odd coset wins. `m` must be positive.
pub fn nearest_point_scaled(t: &[i64; SUBVECTOR_LEN], m: i64) -> LatticePoint {
    let even = nearest_2d8(t, m);

    let shifted = t.map(|ti| ti - m);
    let mut odd = nearest_2d8(&shifted, m);
    for c in &mut odd {
        *c += 1;
    }

    let best = if squared_error(t, &even, m) < squared_error(t, &odd, m) {
        even
    } else {
        odd
    };
    best.map(|c| c as i32)
}

/// Nearest RE8 point to a real-valued vector
pub fn nearest_point(x: &[f32; SUBVECTOR_LEN]) -> LatticePoint {
    const LIMIT: f64 = (1u64 << 40) as f64;
    let t = x.map(|v| {
        let scaled = (f64::from(v) * NEAREST_POINT_SCALE as f64).round();
        scaled.clamp(-LIMIT, LIMIT) as i64
    });
    nearest_point_scaled(&t, NEAREST_POINT_SCALE)
}
