//! RE8 codebook tables
//!
//! Static leader-class data for the base codebooks Q2, Q3 and Q4, the
//! cumulative index tables used to locate a leader class from a global
//! index, and the binomial table of the combinatorial position coder.

/// Binomial coefficients `C(n, k)` for `0 <= n, k <= 8`
pub const BINOMIAL: [[u32; 9]; 9] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 0, 0, 0, 0, 0],
    [1, 2, 1, 0, 0, 0, 0, 0, 0],
    [1, 3, 3, 1, 0, 0, 0, 0, 0],
    [1, 4, 6, 4, 1, 0, 0, 0, 0],
    [1, 5, 10, 10, 5, 1, 0, 0, 0],
    [1, 6, 15, 20, 15, 6, 1, 0, 0],
    [1, 7, 21, 35, 35, 21, 7, 1, 0],
    [1, 8, 28, 56, 70, 56, 28, 8, 1],
];

/// Magnitude of the fourth tier in code-level-4 classes
pub const LEVEL4_TOP_MAGNITUDE: i32 = 6;

/// Largest valid base index; larger indices are clamped to 0
pub const MAX_BASE_INDEX: u32 = 65519;

/// Indices below this bound in the Q3 table belong to Q2
pub const Q2_INDEX_LIMIT: u32 = 256;

/// One leader class of the base codebooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderClass {
    /// Absolute leader, magnitudes in descending order
    pub leader: [u8; 8],
    /// Base magnitude, second tier magnitude, third tier magnitude
    pub magnitudes: [u8; 3],
    /// Number of sign bits `k1`
    pub sign_bits: u8,
    /// Number of distinct magnitudes (1 to 4)
    pub code_level: u8,
    /// Coordinates with magnitude at least the second tier
    pub m: u8,
    /// Coordinates with magnitude at least the third tier
    pub m1: u8,
}

impl LeaderClass {
    /// True if every coordinate of the class is odd
    pub const fn is_odd(&self) -> bool {
        self.leader[0] % 2 == 1
    }

    /// Number of ways to choose the third tier inside the second tier
    pub const fn sub_positions(&self) -> u32 {
        if self.code_level >= 3 {
            BINOMIAL[self.m as usize][self.m1 as usize]
        } else {
            1
        }
    }

    /// Number of distinct position patterns of the class
    pub const fn position_count(&self) -> u32 {
        let top = if self.code_level == 4 { 2 } else { 1 };
        BINOMIAL[8][self.m as usize] * self.sub_positions() * top
    }

    /// Number of lattice points of the class
    pub const fn cardinality(&self) -> u32 {
        self.position_count() << self.sign_bits
    }
}

const fn class(
    leader: [u8; 8],
    magnitudes: [u8; 3],
    sign_bits: u8,
    code_level: u8,
    m: u8,
    m1: u8,
) -> LeaderClass {
    LeaderClass {
        leader,
        magnitudes,
        sign_bits,
        code_level,
        m,
        m1,
    }
}

/// All leader classes; ids 0..=8 form the Q3 table, ids 9..=27 the Q4 table
pub const LEADER_CLASSES: [LeaderClass; 28] = [
    // Q2 / Q3
    class([1, 1, 1, 1, 1, 1, 1, 1], [1, 0, 0], 7, 1, 0, 0),
    class([2, 2, 0, 0, 0, 0, 0, 0], [0, 2, 0], 2, 2, 2, 0),
    class([4, 0, 0, 0, 0, 0, 0, 0], [0, 4, 0], 1, 2, 1, 0),
    class([2, 2, 2, 2, 0, 0, 0, 0], [0, 2, 0], 4, 2, 4, 0),
    class([3, 1, 1, 1, 1, 1, 1, 1], [1, 3, 0], 7, 2, 1, 0),
    class([4, 2, 2, 0, 0, 0, 0, 0], [0, 2, 4], 3, 3, 3, 1),
    class([4, 4, 0, 0, 0, 0, 0, 0], [0, 4, 0], 2, 2, 2, 0),
    class([6, 2, 0, 0, 0, 0, 0, 0], [0, 2, 6], 2, 3, 2, 1),
    class([8, 0, 0, 0, 0, 0, 0, 0], [0, 8, 0], 1, 2, 1, 0),
    // Q4
    class([2, 2, 2, 2, 2, 2, 0, 0], [0, 2, 0], 6, 2, 6, 0),
    class([3, 3, 1, 1, 1, 1, 1, 1], [1, 3, 0], 7, 2, 2, 0),
    class([2, 2, 2, 2, 2, 2, 2, 2], [2, 0, 0], 8, 1, 0, 0),
    class([3, 3, 3, 1, 1, 1, 1, 1], [1, 3, 0], 7, 2, 3, 0),
    class([4, 2, 2, 2, 2, 0, 0, 0], [0, 2, 4], 5, 3, 5, 1),
    class([5, 1, 1, 1, 1, 1, 1, 1], [1, 5, 0], 7, 2, 1, 0),
    class([3, 3, 3, 3, 1, 1, 1, 1], [1, 3, 0], 7, 2, 4, 0),
    class([4, 2, 2, 2, 2, 2, 2, 0], [0, 2, 4], 7, 3, 7, 1),
    class([4, 4, 2, 2, 0, 0, 0, 0], [0, 2, 4], 4, 3, 4, 2),
    class([5, 3, 1, 1, 1, 1, 1, 1], [1, 3, 5], 7, 3, 2, 1),
    class([4, 4, 4, 0, 0, 0, 0, 0], [0, 4, 0], 3, 2, 3, 0),
    class([6, 2, 2, 2, 0, 0, 0, 0], [0, 2, 6], 4, 3, 4, 1),
    class([6, 4, 2, 0, 0, 0, 0, 0], [0, 2, 4], 3, 4, 3, 2),
    class([4, 4, 4, 4, 0, 0, 0, 0], [0, 4, 0], 4, 2, 4, 0),
    class([6, 2, 2, 2, 2, 2, 2, 2], [2, 6, 0], 8, 2, 1, 0),
    class([6, 6, 0, 0, 0, 0, 0, 0], [0, 6, 0], 2, 2, 2, 0),
    class([8, 2, 2, 0, 0, 0, 0, 0], [0, 2, 8], 3, 3, 3, 1),
    class([8, 4, 0, 0, 0, 0, 0, 0], [0, 4, 8], 2, 3, 2, 1),
    class([4, 4, 4, 4, 4, 4, 4, 4], [4, 0, 0], 8, 1, 0, 0),
];

/// Cumulative index boundaries of one base codebook
#[derive(Debug, Clone, Copy)]
pub struct CumulativeIndexTable {
    /// First global index of each leader class, ascending
    pub bounds: &'static [u32],
    /// Leader class id at each boundary rank
    pub classes: &'static [u8],
}

/// Leader classes of Q2 and Q3 (4096 codewords, Q2 is the first 256)
pub const Q3_TABLE: CumulativeIndexTable = CumulativeIndexTable {
    bounds: &[0, 128, 240, 256, 1376, 2400, 3744, 3856, 4080],
    classes: &[0, 1, 2, 3, 4, 5, 6, 7, 8],
};

/// Leader classes of Q4 (65520 codewords)
///
/// With Q3 this covers every leader of norm up to 40, plus ten even leaders
/// from norm 48 to 128.
pub const Q4_TABLE: CumulativeIndexTable = CumulativeIndexTable {
    bounds: &[
        0, 1792, 5376, 5632, 12800, 21760, 22784, 31744, 38912, 45632, 52800, 53248, 57728, 60416,
        61536, 63584, 63696, 65040, 65264,
    ],
    classes: &[
        9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27,
    ],
};

/// Number of codewords in the Q3 table
pub const Q3_SIZE: u32 = 4096;

/// Number of codewords in the Q4 table
pub const Q4_SIZE: u32 = MAX_BASE_INDEX + 1;
