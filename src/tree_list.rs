//! Persistent (immutable) indexed list backed by a heap-ordered binary tree.
//!
//! This module provides [`TreeList`], an immutable indexed list that uses
//! structural sharing for efficient operations.
//!
//! # Overview
//!
//! `TreeList` keeps its elements in a complete binary tree laid out in heap
//! order: the element at flat index `i` has its children at flat indices
//! `2i + 1` and `2i + 2`, exactly like a binary heap stored in an array. The
//! index codec turns a flat index into the root-to-node path, which gives:
//!
//! - O(log n) random access (`get`)
//! - O(log n) update (`set`)
//! - O(log n) append (`add`)
//! - O(n log n) prepend (requires rebuilding, see [`TreeList::prepend`])
//! - O(1) `len` and `is_empty`
//!
//! All operations return new lists without modifying the original, and
//! structural sharing ensures memory efficiency: an update rebuilds only the
//! nodes along one root-to-leaf path and shares every subtree off that path
//! with the original.
//!
//! # Examples
//!
//! ```rust
//! use treelist::TreeList;
//!
//! let list: TreeList<i32> = [10, 20, 30].into_iter().collect();
//! assert_eq!(list.get(1), Some(&20));
//!
//! // Structural sharing: the original list is preserved
//! let updated = list.set(1, 99).unwrap();
//! assert_eq!(updated.get(1), Some(&99));
//! assert_eq!(list.get(1), Some(&20)); // Original unchanged
//! ```
//!
//! # Structural Sharing
//!
//! When you create a new list with `set`, the new list shares every subtree
//! that lies off the rebuilt path:
//!
//! ```text
//! list1:               0
//!                    /   \
//!                   1     2
//!
//! list2 = list1.set(2, x):   0'
//!                          /    \
//!                  (shared 1)    2'
//! ```
//!
//! Only the path from the root to index 2 is reallocated; the subtree rooted
//! at index 1 is shared between both versions.

use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use crate::ReferenceCounter;
use crate::error::AccessError;
use crate::path::{Direction, path_to};

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node structure for the heap-ordered tree.
///
/// A child slot holding `None` is the empty sentinel; `Some` points at a
/// populated subtree. Using `ReferenceCounter` enables structural sharing
/// between list versions.
struct Node<T> {
    /// The element stored in this node.
    element: T,
    /// Left subtree (flat index `2i + 1`), if present.
    left: Option<ReferenceCounter<Node<T>>>,
    /// Right subtree (flat index `2i + 2`), if present.
    right: Option<ReferenceCounter<Node<T>>>,
}

// =============================================================================
// TreeList Definition
// =============================================================================

/// A persistent (immutable) indexed list backed by a complete binary tree in
/// heap order.
///
/// `TreeList` is an immutable data structure that uses structural sharing to
/// efficiently support functional programming patterns. Iteration and `get`
/// agree on element order: both follow the flat heap order 0, 1, 2, ….
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `new`      | O(1)       |
/// | `get`      | O(log n)   |
/// | `set`      | O(log n)   |
/// | `add`      | O(log n)   |
/// | `add_all`  | O(k log (n + k)) |
/// | `prepend`  | O(n log n) |
/// | `len`      | O(1)       |
/// | `is_empty` | O(1)       |
///
/// # Examples
///
/// ```rust
/// use treelist::TreeList;
///
/// let list = TreeList::singleton(42);
/// assert_eq!(list.get(0), Some(&42));
/// ```
#[derive(Clone)]
pub struct TreeList<T> {
    /// Root node (flat index 0), if any.
    root: Option<ReferenceCounter<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> TreeList<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = TreeList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list = TreeList::singleton(42);
    /// assert_eq!(list.len(), 1);
    /// assert_eq!(list.get(0), Some(&42));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            root: Some(ReferenceCounter::new(Node {
                element,
                left: None,
                right: None,
            })),
            length: 1,
        }
    }

    /// Builds a list from a Vec in heap order.
    ///
    /// Nodes are constructed from the last flat index backwards, so both
    /// children of index `i` (at `2i + 1` and `2i + 2`) already exist when
    /// the node at `i` is built. O(n), no `Clone` bound required.
    fn build_from_vec(elements: Vec<T>) -> Self {
        let length = elements.len();
        if length == 0 {
            return Self::new();
        }

        let mut nodes: Vec<Option<ReferenceCounter<Node<T>>>> =
            (0..length).map(|_| None).collect();
        for (index, element) in elements.into_iter().enumerate().rev() {
            let left = nodes.get_mut(2 * index + 1).and_then(Option::take);
            let right = nodes.get_mut(2 * index + 2).and_then(Option::take);
            nodes[index] = Some(ReferenceCounter::new(Node {
                element,
                left,
                right,
            }));
        }

        Self {
            root: nodes.first_mut().and_then(Option::take),
            length,
        }
    }

    /// Returns the number of elements in the list.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let empty: TreeList<i32> = TreeList::new();
    /// assert!(empty.is_empty());
    ///
    /// let non_empty = TreeList::singleton(1);
    /// assert!(!non_empty.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the node at flat index `index`, walking the codec path.
    fn node_at(&self, index: usize) -> Option<&Node<T>> {
        if index >= self.length {
            return None;
        }
        let mut current = self.root.as_deref()?;
        for direction in path_to(index) {
            current = match direction {
                Direction::Left => current.left.as_deref(),
                Direction::Right => current.right.as_deref(),
            }?;
        }
        Some(current)
    }

    /// Returns a reference to the element at the given flat index.
    ///
    /// Returns `None` if the index is out of bounds. See [`TreeList::try_get`]
    /// for a variant that reports why the access failed.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(list.get(0), Some(&10));
    /// assert_eq!(list.get(2), Some(&30));
    /// assert_eq!(list.get(3), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.node_at(index).map(|node| &node.element)
    }

    /// Returns a reference to the element at the given flat index, reporting
    /// failures through [`AccessError`].
    ///
    /// # Errors
    ///
    /// - [`AccessError::EmptyAccess`] if the list is empty
    /// - [`AccessError::IndexOutOfRange`] if `index >= self.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::{AccessError, TreeList};
    ///
    /// let list: TreeList<i32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(list.try_get(1), Ok(&20));
    /// assert_eq!(
    ///     list.try_get(3),
    ///     Err(AccessError::IndexOutOfRange { index: 3, len: 3 })
    /// );
    /// ```
    pub fn try_get(&self, index: usize) -> Result<&T, AccessError> {
        if self.is_empty() {
            return Err(AccessError::EmptyAccess);
        }
        self.get(index).ok_or(AccessError::IndexOutOfRange {
            index,
            len: self.length,
        })
    }

    /// Returns a reference to the first element (flat index 0).
    ///
    /// Returns `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [10, 20].into_iter().collect();
    /// assert_eq!(list.first(), Some(&10));
    ///
    /// let empty: TreeList<i32> = TreeList::new();
    /// assert_eq!(empty.first(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.root.as_deref().map(|node| &node.element)
    }

    /// Returns a reference to the first element, or
    /// [`AccessError::EmptyAccess`] if the list is empty.
    ///
    /// # Errors
    ///
    /// [`AccessError::EmptyAccess`] if the list is empty.
    #[inline]
    pub fn try_first(&self) -> Result<&T, AccessError> {
        self.first().ok_or(AccessError::EmptyAccess)
    }

    /// Returns an iterator over references to the elements.
    ///
    /// The iterator yields elements in flat heap order (index 0, 1, 2, …),
    /// matching `get` index order exactly. Each call creates an independent
    /// traversal with its own worklist, so repeated or concurrent iterations
    /// never interfere.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [1, 2, 3].into_iter().collect();
    /// let collected: Vec<&i32> = list.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> TreeListIterator<'_, T> {
        TreeListIterator {
            queue: self.root.as_deref().into_iter().collect(),
            remaining: self.length,
        }
    }

    /// Transforms every element with `function`, preserving flat order.
    ///
    /// The result is rebuilt through the flat order, so it satisfies the same
    /// heap-order layout as any other list.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [1, 2, 3].into_iter().collect();
    /// let doubled = list.map(|x| x * 2);
    /// assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn map<B, F>(&self, function: F) -> TreeList<B>
    where
        F: FnMut(&T) -> B,
    {
        self.iter().map(function).collect()
    }
}

impl<T: Clone> TreeList<T> {
    /// Creates a list from a slice, preserving element order.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `slice.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list = TreeList::from_slice(&[1, 2, 3]);
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.get(0), Some(&1));
    /// ```
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::build_from_vec(slice.to_vec())
    }

    /// Rebuilds the root-to-leaf path for `index`, installing `element` at
    /// its end.
    ///
    /// At the terminal step the existing node's children are shared into the
    /// replacement; a missing terminal node is the append frontier and
    /// becomes a fresh leaf. Interior steps copy the element and the
    /// unvisited child by reference, recursing only into the visited child,
    /// so each level allocates exactly one node.
    fn rebuild(node: Option<&Node<T>>, directions: &[Direction], element: T) -> Node<T> {
        match (directions.split_first(), node) {
            (None, None) => Node {
                element,
                left: None,
                right: None,
            },
            (None, Some(existing)) => Node {
                element,
                left: existing.left.clone(),
                right: existing.right.clone(),
            },
            (Some((Direction::Left, rest)), Some(existing)) => Node {
                element: existing.element.clone(),
                left: Some(ReferenceCounter::new(Self::rebuild(
                    existing.left.as_deref(),
                    rest,
                    element,
                ))),
                right: existing.right.clone(),
            },
            (Some((Direction::Right, rest)), Some(existing)) => Node {
                element: existing.element.clone(),
                left: existing.left.clone(),
                right: Some(ReferenceCounter::new(Self::rebuild(
                    existing.right.as_deref(),
                    rest,
                    element,
                ))),
            },
            // The parent chain of any flat index <= len passes only through
            // occupied slots of a complete tree.
            (Some(_), None) => unreachable!("path step into an absent interior node"),
        }
    }

    /// Returns a new list where the element at flat index `index` is
    /// `element` and every other element is unchanged.
    ///
    /// The valid index range is `[0, len]` *inclusive*: `index == len`
    /// denotes the append frontier and grows the list by one element at the
    /// next heap-order position ([`TreeList::add`] relies on this). Returns
    /// `None` if `index > len`. The original list is untouched.
    ///
    /// # Complexity
    ///
    /// O(log n) time and allocation; every subtree off the rebuilt path is
    /// shared with the original.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [10, 20, 30].into_iter().collect();
    ///
    /// let updated = list.set(0, 99).unwrap();
    /// assert_eq!(updated.to_vec(), vec![99, 20, 30]);
    /// assert_eq!(list.to_vec(), vec![10, 20, 30]); // Original unchanged
    ///
    /// // index == len appends
    /// let appended = list.set(3, 40).unwrap();
    /// assert_eq!(appended.to_vec(), vec![10, 20, 30, 40]);
    ///
    /// assert_eq!(list.set(4, 0), None);
    /// ```
    #[must_use]
    pub fn set(&self, index: usize, element: T) -> Option<Self> {
        if index > self.length {
            return None;
        }
        let directions = path_to(index);
        let root = Self::rebuild(self.root.as_deref(), &directions, element);
        Some(Self {
            root: Some(ReferenceCounter::new(root)),
            length: if index == self.length {
                self.length + 1
            } else {
                self.length
            },
        })
    }

    /// Returns a new list with `element` at flat index `index`, reporting
    /// failures through [`AccessError`].
    ///
    /// Accepts the same inclusive range `[0, len]` as [`TreeList::set`].
    ///
    /// # Errors
    ///
    /// [`AccessError::IndexOutOfRange`] if `index > self.len()`.
    pub fn try_set(&self, index: usize, element: T) -> Result<Self, AccessError> {
        self.set(index, element).ok_or(AccessError::IndexOutOfRange {
            index,
            len: self.length,
        })
    }

    /// Appends an element, returning a new list one element longer.
    ///
    /// Equivalent to `set(len, element)`: the new element lands at the next
    /// heap-order position, which keeps the tree complete.
    ///
    /// # Complexity
    ///
    /// O(log n) time and allocation
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [10, 20, 30].into_iter().collect();
    /// let longer = list.add(40);
    /// assert_eq!(longer.to_vec(), vec![10, 20, 30, 40]);
    /// assert_eq!(list.len(), 3); // Original unchanged
    /// ```
    #[must_use]
    pub fn add(&self, element: T) -> Self {
        let directions = path_to(self.length);
        let root = Self::rebuild(self.root.as_deref(), &directions, element);
        Self {
            root: Some(ReferenceCounter::new(root)),
            length: self.length + 1,
        }
    }

    /// Appends every element of `elements` in order.
    ///
    /// An empty input returns a clone sharing the entire original structure.
    ///
    /// # Complexity
    ///
    /// O(k log (n + k)) for k appended elements
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [1, 2].into_iter().collect();
    /// let extended = list.add_all([3, 4, 5]);
    /// assert_eq!(extended.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn add_all<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        elements
            .into_iter()
            .fold(self.clone(), |list, element| list.add(element))
    }

    /// Prepends an element, returning a new list with `element` at flat
    /// index 0 and the original elements shifted to indices `1..=len`.
    ///
    /// The heap-order layout ties an element's position to its structural
    /// depth, so prepending cannot reuse existing structure: the result is a
    /// fresh single-node tree with every original element re-appended in
    /// flat order, sharing nothing with the original. The representation
    /// favors indexed access and trailing append; this asymmetry is the
    /// price.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [10, 20, 30].into_iter().collect();
    /// let prepended = list.prepend(5);
    /// assert_eq!(prepended.to_vec(), vec![5, 10, 20, 30]);
    /// assert_eq!(list.to_vec(), vec![10, 20, 30]); // Original unchanged
    /// ```
    #[must_use]
    pub fn prepend(&self, element: T) -> Self {
        Self::singleton(element).add_all(self.iter().cloned())
    }

    /// Collects the elements into a `Vec` in flat order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::TreeList;
    ///
    /// let list: TreeList<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

// =============================================================================
// Iterator Implementations
// =============================================================================

/// An iterator over references to elements of a [`TreeList`].
///
/// Traverses the tree breadth-first with an explicit worklist, which yields
/// elements in flat heap order.
pub struct TreeListIterator<'a, T> {
    queue: VecDeque<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for TreeListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if let Some(left) = node.left.as_deref() {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right.as_deref() {
            self.queue.push_back(right);
        }
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for TreeListIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// An owning iterator over elements of a [`TreeList`].
pub struct TreeListIntoIterator<T> {
    queue: VecDeque<ReferenceCounter<Node<T>>>,
    remaining: usize,
}

impl<T: Clone> Iterator for TreeListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if let Some(left) = node.left.clone() {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right.clone() {
            self.queue.push_back(right);
        }
        self.remaining -= 1;
        Some(node.element.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for TreeListIntoIterator<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for TreeList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for TreeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let elements: Vec<T> = iter.into_iter().collect();
        Self::build_from_vec(elements)
    }
}

impl<T> From<Vec<T>> for TreeList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::build_from_vec(elements)
    }
}

impl<T: Clone> IntoIterator for TreeList<T> {
    type Item = T;
    type IntoIter = TreeListIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        TreeListIntoIterator {
            queue: self.root.into_iter().collect(),
            remaining: self.length,
        }
    }
}

impl<'a, T> IntoIterator for &'a TreeList<T> {
    type Item = &'a T;
    type IntoIter = TreeListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for TreeList<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for TreeList<T> {}

impl<T: Hash> Hash for TreeList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the length first to distinguish lists of different lengths
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for TreeList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for TreeList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct TreeListVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> TreeListVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for TreeListVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = TreeList<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(elements.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for TreeList<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(TreeListVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
