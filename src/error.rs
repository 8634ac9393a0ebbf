//! Error type for index-based access to a [`TreeList`].
//!
//! Two failure kinds cover the whole surface: an index outside the valid
//! range, and an element access against an empty list. Reads accept indices
//! in `[0, len)`; writes accept `[0, len]` because `index == len` denotes
//! the append frontier.
//!
//! [`TreeList`]: crate::TreeList

use std::fmt::{self, Display, Formatter};

/// Error returned by the fallible access operations of [`TreeList`].
///
/// # Examples
///
/// ```rust
/// use treelist::{AccessError, TreeList};
///
/// let list: TreeList<i32> = [1, 2, 3].into_iter().collect();
/// assert_eq!(
///     list.try_get(5),
///     Err(AccessError::IndexOutOfRange { index: 5, len: 3 })
/// );
///
/// let empty: TreeList<i32> = TreeList::new();
/// assert_eq!(empty.try_get(0), Err(AccessError::EmptyAccess));
/// ```
///
/// [`TreeList`]: crate::TreeList
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The index lies outside the range the operation accepts.
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The length of the list at the time of the request.
        len: usize,
    },
    /// An element was required from a list that has none.
    EmptyAccess,
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
            Self::EmptyAccess => write!(f, "element access on an empty list"),
        }
    }
}

impl std::error::Error for AccessError {}

// =============================================================================
// Tests
// =============================================================================
