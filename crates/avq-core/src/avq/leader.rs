//! Leader class search
//!
//! The decoder locates the leader class of a global index by scanning the
//! cumulative index table of its codebook. The encoder goes the other way,
//! from the absolute leader of a point to its class, through a lazily built
//! map over all base leaders.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::tables::{
    CumulativeIndexTable, LeaderClass, LEADER_CLASSES, MAX_BASE_INDEX, Q3_TABLE, Q4_TABLE,
};
use crate::types::LatticePoint;

/// Base codebook table a leader class belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseCodebook {
    /// Shared Q2/Q3 table
    Q3,
    /// Q4 table
    Q4,
}

impl BaseCodebook {
    /// Table used for a base quantizer order
    pub fn for_order(order: u32) -> Self {
        if order <= 3 {
            Self::Q3
        } else {
            Self::Q4
        }
    }

    /// Cumulative index table of the codebook
    pub fn table(self) -> &'static CumulativeIndexTable {
        match self {
            Self::Q3 => &Q3_TABLE,
            Self::Q4 => &Q4_TABLE,
        }
    }
}

/// Result of a leader search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderHit {
    /// Leader class id (index into [`LEADER_CLASSES`])
    pub class_id: usize,
    /// Index relative to the first codeword of the class
    pub local_index: u32,
}

impl LeaderHit {
    /// The leader class data
    pub fn class(&self) -> &'static LeaderClass {
        &LEADER_CLASSES[self.class_id]
    }
}

/// Find the leader class owning a global base index
///
/// Indices above [`MAX_BASE_INDEX`] come from a corrupted stream and are
/// replaced by 0.
pub fn find_leader(index: u32, order: u32) -> LeaderHit {
    let index = if index > MAX_BASE_INDEX { 0 } else { index };
    let table = BaseCodebook::for_order(order).table();

    let mut i = 1;
    while i < table.bounds.len() && index >= table.bounds[i] {
        i += 1;
    }

    LeaderHit {
        class_id: usize::from(table.classes[i - 1]),
        local_index: index - table.bounds[i - 1],
    }
}

/// Where a leader class sits in the base codebooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderEntry {
    /// Leader class id
    pub class_id: usize,
    /// Table holding the class
    pub codebook: BaseCodebook,
    /// Global index of the first codeword of the class
    pub offset: u32,
}

static LEADER_INDEX: Lazy<HashMap<LatticePoint, LeaderEntry>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(LEADER_CLASSES.len());
    for codebook in [BaseCodebook::Q3, BaseCodebook::Q4] {
        let table = codebook.table();
        for (&offset, &class_id) in table.bounds.iter().zip(table.classes) {
            let class_id = usize::from(class_id);
            let leader = LEADER_CLASSES[class_id].leader.map(i32::from);
            map.insert(
                leader,
                LeaderEntry {
                    class_id,
                    codebook,
                    offset,
                },
            );
        }
    }
    map
});

/// Absolute leader of a point: magnitudes sorted in descending order
pub fn absolute_leader(point: &LatticePoint) -> LatticePoint {
    let mut leader = point.map(i32::saturating_abs);
    leader.sort_unstable_by(|a, b| b.cmp(a));
    leader
}

/// Find the base codebook entry of an absolute leader
pub fn lookup_leader(leader: &LatticePoint) -> Option<LeaderEntry> {
    LEADER_INDEX.get(leader).copied()
}
