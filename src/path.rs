//! Index codec: maps a flat index to a root-to-node path.
//!
//! The tree behind [`TreeList`] is a complete binary tree in heap order, so
//! the node holding flat index `i` has its parent at `(i - 1) / 2` and its
//! children at `2i + 1` (left) and `2i + 2` (right). A left child's flat
//! index is therefore always odd and a right child's always even, which means
//! the parity of an index alone determines which kind of child it is. Walking
//! the parent chain up to the root and recording that parity at each step
//! yields the full path from the root down to the node.
//!
//! The codec is total on `usize`: it knows nothing about the size of any
//! particular tree, and callers are responsible for range checks.
//!
//! [`TreeList`]: crate::TreeList

use smallvec::SmallVec;

/// One step of a root-to-node path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Descend into the left child (flat index `2i + 1`).
    Left,
    /// Descend into the right child (flat index `2i + 2`).
    Right,
}

/// Inline capacity for path storage.
///
/// A path has one direction per tree level below the root, so 64 covers any
/// index representable as a `usize` without touching the heap.
const MAX_DEPTH: usize = usize::BITS as usize;

/// A root-to-node path, read root-to-target.
pub(crate) type Path = SmallVec<[Direction; MAX_DEPTH]>;

/// Computes the path from the root to the node at flat index `index`.
///
/// The path has length `⌈log2(index + 2)⌉ - 1`, the depth of `index` in a
/// 0-indexed complete binary tree; index 0 is the root and yields the empty
/// path.
///
/// # Complexity
///
/// O(log `index`) time and space.
pub(crate) fn path_to(index: usize) -> Path {
    let mut directions = Path::new();
    let mut current = index;
    while current != 0 {
        directions.push(if current % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        });
        current = (current - 1) / 2;
    }
    // Collected leaf-to-root while ascending the parent chain
    directions.reverse();
    directions
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use super::Direction::{Left, Right};

    #[rstest]
    fn test_root_has_empty_path() {
        assert!(path_to(0).is_empty());
    }

    #[rstest]
    #[case(1, vec![Left])]
    #[case(2, vec![Right])]
    #[case(3, vec![Left, Left])]
    #[case(4, vec![Left, Right])]
    #[case(5, vec![Right, Left])]
    #[case(6, vec![Right, Right])]
    #[case(7, vec![Left, Left, Left])]
    #[case(12, vec![Right, Left, Right])]
    #[case(14, vec![Right, Right, Right])]
    fn test_path_to(#[case] index: usize, #[case] expected: Vec<Direction>) {
        assert_eq!(path_to(index).to_vec(), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 2)]
    #[case(6, 2)]
    #[case(7, 3)]
    #[case(14, 3)]
    #[case(15, 4)]
    fn test_path_length_is_depth(#[case] index: usize, #[case] depth: usize) {
        assert_eq!(path_to(index).len(), depth);
    }

    #[rstest]
    fn test_path_reconstructs_flat_index() {
        // Replaying the path against the child index formulas must land back
        // on the original flat index.
        for index in 0..1000 {
            let mut current = 0usize;
            for direction in path_to(index) {
                current = match direction {
                    Left => 2 * current + 1,
                    Right => 2 * current + 2,
                };
            }
            assert_eq!(current, index);
        }
    }
}
