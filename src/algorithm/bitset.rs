use crate::spatial::tiles::TileId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-width bitset of candidate tiles for one cell
///
/// Bit `i` is set when `TileId::new(i)` is still possible. The width equals
/// the alphabet size and never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
}

impl CandidateSet {
    /// Create a set with no candidates
    pub fn empty(tile_count: usize) -> Self {
        Self {
            bits: bitvec![0; tile_count],
        }
    }

    /// Create a set containing every tile of the alphabet
    pub fn full(tile_count: usize) -> Self {
        Self {
            bits: bitvec![1; tile_count],
        }
    }

    /// Build a set from explicit tile ids, ignoring ids outside the width
    pub fn from_tiles(tile_count: usize, tiles: impl IntoIterator<Item = TileId>) -> Self {
        let mut set = Self::empty(tile_count);
        for tile in tiles {
            set.insert(tile);
        }
        set
    }

    /// Alphabet size this set was built for
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Add a tile
    pub fn insert(&mut self, tile: TileId) {
        if tile.index() < self.bits.len() {
            self.bits.set(tile.index(), true);
        }
    }

    /// Remove a tile
    pub fn remove(&mut self, tile: TileId) {
        if tile.index() < self.bits.len() {
            self.bits.set(tile.index(), false);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Keep only tiles also present in `other`
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no candidates remain
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of remaining candidates
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// The only candidate, if exactly one remains
    pub fn single(&self) -> Option<TileId> {
        let mut ones = self.bits.iter_ones();
        match (ones.next(), ones.next()) {
            (Some(index), None) => Some(TileId::new(index)),
            _ => None,
        }
    }

    /// The `n`th candidate in ascending id order
    pub fn nth(&self, n: usize) -> Option<TileId> {
        self.bits.iter_ones().nth(n).map(TileId::new)
    }

    /// Iterate over candidates in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones().map(TileId::new)
    }

    /// Collect all candidates
    pub fn to_vec(&self) -> Vec<TileId> {
        self.iter().collect()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<usize> = self.iter().map(TileId::index).collect();
        write!(f, "CandidateSet({} of {}: {indices:?})", self.len(), self.width())
    }
}
