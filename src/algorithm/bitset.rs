use bitvec::prelude::*;
use std::fmt;

/// Fixed-width bitset over tile variant or socket indices
///
/// Uses 0-based indexing. Membership tests and updates are O(1) and the
/// population count backs entropy computation on the superposition grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no members
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a bitset containing every index below `capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Build a bitset from a list of indices, ignoring out-of-range entries
    pub fn from_indices(indices: impl IntoIterator<Item = usize>, capacity: usize) -> Self {
        let mut bitset = Self::new(capacity);
        for index in indices {
            bitset.insert(index);
        }
        bitset
    }

    /// Number of addressable indices
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert an index, returning whether the set changed
    pub fn insert(&mut self, index: usize) -> bool {
        if self.bits.get(index).as_deref() == Some(&false) {
            self.bits.set(index, true);
            true
        } else {
            false
        }
    }

    /// Remove an index, returning whether the set changed
    pub fn remove(&mut self, index: usize) -> bool {
        if self.bits.get(index).as_deref() == Some(&true) {
            self.bits.set(index, false);
            true
        } else {
            false
        }
    }

    /// Test index membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Remove every member
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Add every member of `other` in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Test if no indices are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count members
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Iterate non-members in ascending order
    pub fn iter_missing(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_zeros()
    }

    /// Extract all members as an ascending vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} of {}: {:?})", self.count(), self.capacity(), self.to_vec())
    }
}
