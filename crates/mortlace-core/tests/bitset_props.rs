//! Property tests for the bitset containers.

use std::collections::BTreeSet;

use mortlace_core::{CellMap, Digit, DigitSet, Position};
use proptest::prelude::*;

fn cell_indices() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..81, 0..30)
}

fn digit_values() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=9, 0..9)
}

fn cell_map(indices: &[u8]) -> CellMap {
    indices.iter().map(|&i| Position::from_index(i)).collect()
}

fn model(indices: &[u8]) -> BTreeSet<u8> {
    indices.iter().copied().collect()
}

proptest! {
    #[test]
    fn cell_map_matches_model(a in cell_indices(), b in cell_indices()) {
        let (sa, sb) = (cell_map(&a), cell_map(&b));
        let (ma, mb) = (model(&a), model(&b));

        prop_assert_eq!(sa.len(), ma.len());
        prop_assert_eq!(sa.union(sb).len(), ma.union(&mb).count());
        prop_assert_eq!(sa.intersection(sb).len(), ma.intersection(&mb).count());
        prop_assert_eq!(sa.difference(sb).len(), ma.difference(&mb).count());
        prop_assert_eq!(sa.is_superset(sb), mb.is_subset(&ma));
    }

    #[test]
    fn cell_map_iterates_ascending(a in cell_indices()) {
        let set = cell_map(&a);
        let collected: Vec<_> = set.iter().map(Position::index).collect();
        let mut sorted = collected.clone();
        sorted.sort_unstable();
        prop_assert_eq!(collected, sorted);
    }

    #[test]
    fn digit_set_complement(a in digit_values()) {
        let set: DigitSet = a.iter().map(|&v| Digit::from_value(v)).collect();
        prop_assert_eq!(set.union(!set), DigitSet::FULL);
        prop_assert!(set.intersection(!set).is_empty());
    }

    #[test]
    fn subsets_have_requested_size(a in cell_indices(), k in 0usize..4) {
        let set = cell_map(&a);
        let mut count = 0_usize;
        let mut previous: Option<CellMap> = None;
        for subset in set.subsets(k) {
            prop_assert_eq!(subset.len(), k);
            prop_assert!(set.is_superset(subset));
            prop_assert!(previous != Some(subset), "duplicate subset");
            previous = Some(subset);
            count += 1;
        }
        let n = set.len();
        let expected = if k > n {
            0
        } else {
            (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
        };
        prop_assert_eq!(count, expected);
    }
}
