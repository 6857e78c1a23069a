//! Combinatorial position coder
//!
//! Maps a `k`-subset of the positions `0..n` (n <= 8) to its rank in the
//! combinatorial number system and back. The subset `c_k > ... > c_1` has
//! rank `C(c_k, k) + ... + C(c_1, 1)`; unranking peels the highest position
//! first.

use super::tables::BINOMIAL;

/// A set of at most 8 positions, stored in descending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionSet {
    positions: [u8; 8],
    len: usize,
}

impl PositionSet {
    /// Build a set from positions given in ascending order
    pub fn from_ascending<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::default();
        for p in positions {
            set.positions[set.len] = p as u8;
            set.len += 1;
        }
        set.positions[..set.len].reverse();
        set
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the set has no positions
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Positions from highest to lowest
    pub fn descending(&self) -> &[u8] {
        &self.positions[..self.len]
    }

    /// Positions from lowest to highest
    pub fn ascending(&self) -> impl Iterator<Item = usize> + '_ {
        self.descending().iter().rev().map(|&p| usize::from(p))
    }

    fn push(&mut self, position: usize) {
        self.positions[self.len] = position as u8;
        self.len += 1;
    }
}

/// Positions of the `k`-subset of `0..n` with the given rank
pub fn unrank(index: u32, n: usize, k: usize) -> PositionSet {
    debug_assert!(k <= n && n <= 8);
    let mut set = PositionSet::default();
    if k == 0 {
        return set;
    }
    if k == n {
        for p in (0..n).rev() {
            set.push(p);
        }
        return set;
    }

    let mut residual = index;
    let mut limit = n;
    for slots in (1..=k).rev() {
        let mut c = limit - 1;
        while BINOMIAL[c][slots] > residual {
            c -= 1;
        }
        set.push(c);
        residual -= BINOMIAL[c][slots];
        limit = c;
    }
    set
}

/// Rank of a position set
pub fn rank(set: &PositionSet) -> u32 {
    let k = set.len();
    set.descending()
        .iter()
        .enumerate()
        .map(|(i, &c)| BINOMIAL[usize::from(c)][k - i])
        .sum()
}
