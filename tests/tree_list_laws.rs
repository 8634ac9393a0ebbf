//! Property-based tests for TreeList laws.
//!
//! Verifies the algebraic laws and invariants of TreeList using proptest:
//! get/set round-trips, write locality, size monotonicity, iteration order,
//! prepend semantics, and immutability of originals.

use proptest::prelude::*;
use treelist::TreeList;

proptest! {
    /// Round-trip Law: an element written with set is read back by get.
    #[test]
    fn prop_get_set_round_trip(
        elements in prop::collection::vec(any::<i32>(), 1..64),
        new_value: i32
    ) {
        let list: TreeList<i32> = elements.iter().copied().collect();
        let index = (elements[0].unsigned_abs() as usize) % list.len();

        let updated = list.set(index, new_value).unwrap();
        prop_assert_eq!(updated.get(index), Some(&new_value));
    }

    /// Locality Law: set does not affect any other index.
    #[test]
    fn prop_set_locality(
        elements in prop::collection::vec(any::<i32>(), 2..64),
        new_value: i32
    ) {
        let list: TreeList<i32> = elements.iter().copied().collect();
        let length = list.len();
        let update_index = (elements[0].unsigned_abs() as usize) % length;

        let updated = list.set(update_index, new_value).unwrap();
        for check_index in 0..length {
            if check_index != update_index {
                prop_assert_eq!(
                    updated.get(check_index),
                    list.get(check_index),
                    "set at {} should not affect index {}",
                    update_index,
                    check_index
                );
            }
        }
    }

    /// Size Law: add grows the length by one; set at an existing index keeps
    /// it; set at the frontier grows it by one.
    #[test]
    fn prop_size_monotonicity(
        elements in prop::collection::vec(any::<i32>(), 0..64),
        new_value: i32
    ) {
        let list: TreeList<i32> = elements.iter().copied().collect();
        let length = list.len();

        prop_assert_eq!(list.add(new_value).len(), length + 1);
        prop_assert_eq!(list.set(length, new_value).unwrap().len(), length + 1);
        if length > 0 {
            prop_assert_eq!(list.set(length - 1, new_value).unwrap().len(), length);
        }
    }

    /// Order Law: iteration yields exactly [get(0), get(1), …, get(len - 1)].
    #[test]
    fn prop_iteration_matches_get_order(
        elements in prop::collection::vec(any::<i32>(), 0..128)
    ) {
        let list: TreeList<i32> = elements.iter().copied().collect();

        let iterated: Vec<i32> = list.iter().copied().collect();
        let indexed: Vec<i32> = (0..list.len())
            .map(|index| *list.get(index).unwrap())
            .collect();

        prop_assert_eq!(&iterated, &indexed);
        prop_assert_eq!(iterated, elements);
    }

    /// Prepend Law: prepend puts the new value at index 0 and shifts every
    /// original element up by one.
    #[test]
    fn prop_prepend_semantics(
        elements in prop::collection::vec(any::<i32>(), 0..64),
        new_value: i32
    ) {
        let list: TreeList<i32> = elements.iter().copied().collect();
        let prepended = list.prepend(new_value);

        prop_assert_eq!(prepended.len(), list.len() + 1);
        prop_assert_eq!(prepended.get(0), Some(&new_value));
        for index in 0..list.len() {
            prop_assert_eq!(prepended.get(index + 1), list.get(index));
        }
    }

    /// Immutability Law: no operation observably changes the original.
    #[test]
    fn prop_originals_are_immutable(
        elements in prop::collection::vec(any::<i32>(), 1..64),
        new_value: i32
    ) {
        let list: TreeList<i32> = elements.iter().copied().collect();
        let index = (elements[0].unsigned_abs() as usize) % list.len();

        let _set = list.set(index, new_value);
        let _added = list.add(new_value);
        let _prepended = list.prepend(new_value);

        let after: Vec<i32> = list.iter().copied().collect();
        prop_assert_eq!(after, elements);
    }

    /// Fold Law: add_all equals repeated add in the same order.
    #[test]
    fn prop_add_all_matches_repeated_add(
        base in prop::collection::vec(any::<i32>(), 0..32),
        extra in prop::collection::vec(any::<i32>(), 0..32)
    ) {
        let list: TreeList<i32> = base.iter().copied().collect();

        let bulk = list.add_all(extra.iter().copied());
        let folded = extra
            .iter()
            .fold(list, |accumulator, &element| accumulator.add(element));

        prop_assert_eq!(bulk, folded);
    }

    /// Bounds Law: reads accept [0, len) and writes accept [0, len].
    #[test]
    fn prop_bounds_checking(
        elements in prop::collection::vec(any::<i32>(), 0..32),
        offset in 0usize..16
    ) {
        let list: TreeList<i32> = elements.iter().copied().collect();
        let length = list.len();

        prop_assert!(list.get(length + offset).is_none());
        prop_assert!(list.set(length + 1 + offset, 0).is_none());
        prop_assert!(list.set(length, 0).is_some());
    }

    /// Equality Law: lists built from the same elements are equal however
    /// they were built.
    #[test]
    fn prop_construction_paths_agree(
        elements in prop::collection::vec(any::<i32>(), 0..64)
    ) {
        let collected: TreeList<i32> = elements.iter().copied().collect();
        let added = TreeList::new().add_all(elements.iter().copied());
        let from_slice = TreeList::from_slice(&elements);

        prop_assert_eq!(&collected, &added);
        prop_assert_eq!(&collected, &from_slice);
    }
}
