//! Tests for `CandidateSet` membership, intersection and iteration

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::CandidateSet;
    use tilecollapse::spatial::TileId;

    fn ids(raw: &[usize]) -> Vec<TileId> {
        raw.iter().copied().map(TileId::new).collect()
    }

    // Tests empty and full constructors
    // Verified by initializing the empty set with all bits set
    #[test]
    fn test_empty_and_full() {
        let empty = CandidateSet::empty(10);
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.width(), 10);

        let full = CandidateSet::full(5);
        assert_eq!(full.len(), 5);
        assert_eq!(full.to_vec(), ids(&[0, 1, 2, 3, 4]));
    }

    // Tests insertion, removal and out-of-width ids
    // Verified by removing the bounds check from insert
    #[test]
    fn test_insert_remove_contains() {
        let mut set = CandidateSet::empty(4);
        set.insert(TileId::new(2));
        set.insert(TileId::new(9));
        assert!(set.contains(TileId::new(2)));
        assert!(!set.contains(TileId::new(9)));
        assert_eq!(set.len(), 1);

        set.remove(TileId::new(2));
        assert!(set.is_empty());
    }

    // Tests intersection keeps only shared members
    // Verified by changing intersection to union
    #[test]
    fn test_intersection() {
        let a = CandidateSet::from_tiles(10, ids(&[1, 3, 5]));
        let b = CandidateSet::from_tiles(10, ids(&[3, 5, 7]));

        assert_eq!(a.intersection(&b).to_vec(), ids(&[3, 5]));

        let mut c = a.clone();
        c.intersect_with(&CandidateSet::from_tiles(10, ids(&[2, 4])));
        assert!(c.is_empty());
    }

    // Tests single only reports sets of exactly one member
    // Verified by returning the first member regardless of count
    #[test]
    fn test_single() {
        assert_eq!(CandidateSet::empty(3).single(), None);
        assert_eq!(
            CandidateSet::from_tiles(3, ids(&[2])).single(),
            Some(TileId::new(2))
        );
        assert_eq!(CandidateSet::full(3).single(), None);
    }

    // Tests positional access walks members in ascending order
    // Verified by indexing raw bits instead of set members
    #[test]
    fn test_nth_and_display() {
        let set = CandidateSet::from_tiles(8, ids(&[6, 1, 4]));
        assert_eq!(set.nth(0), Some(TileId::new(1)));
        assert_eq!(set.nth(2), Some(TileId::new(6)));
        assert_eq!(set.nth(3), None);
        assert_eq!(set.to_string(), "CandidateSet(3 of 8: [1, 4, 6])");
    }
}
