//! # treelist
//!
//! A persistent (immutable) indexed list backed by a complete binary tree
//! laid out in heap order.
//!
//! ## Overview
//!
//! [`TreeList`] stores its elements in a binary tree whose shape always forms
//! a complete binary tree: labelling nodes breadth-first with 0, 1, 2, …
//! places the children of the node at flat index `i` at `2i + 1` (left) and
//! `2i + 2` (right), exactly like a binary heap stored in an array. That
//! layout is what ties a caller-visible index to a unique root-to-node path,
//! so random access and update run in O(log n) on an otherwise tree-shaped
//! structure while keeping array-like ordering semantics.
//!
//! Every mutating operation (`set`, `add`, `prepend`) returns a new list
//! without touching the original, and subtrees off the rebuilt path are
//! shared between versions.
//!
//! ## Example
//!
//! ```rust
//! use treelist::TreeList;
//!
//! let list: TreeList<i32> = [10, 20, 30].into_iter().collect();
//! assert_eq!(list.get(1), Some(&20));
//!
//! // Structural sharing: the original list is preserved
//! let updated = list.set(0, 99).unwrap();
//! assert_eq!(updated.get(0), Some(&99));
//! assert_eq!(list.get(0), Some(&10)); // unchanged
//!
//! let longer = list.add(40);
//! assert_eq!(longer.len(), 4);
//! assert_eq!(list.len(), 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serialize/deserialize lists as plain sequences
//! - `arc`: share nodes with `Arc` instead of `Rc` (thread-safe sharing)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod path;
mod tree_list;

pub use error::AccessError;
pub use tree_list::TreeList;
pub use tree_list::TreeListIntoIterator;
pub use tree_list::TreeListIterator;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_clone() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(*reference_counter, *reference_counter_clone);
    }

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
