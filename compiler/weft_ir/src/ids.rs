//! Node IDs and ranges for the flat syntax tree.
//!
//! Children are referenced by `u32` indices into the `TreeArena` rather
//! than owned boxes; lists (arguments, statements, parameters) are ranges
//! into flattened pools. A pass "replaces" a subtree by allocating new
//! nodes and writing the new index into the parent's slot, so there is no
//! dangling-reference risk when trees are rewritten in place.

use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Invalid ID (sentinel value).
            pub const INVALID: $name = $name(u32::MAX);

            /// Create a new ID.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Check if this is a valid ID.
            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                } else {
                    write!(f, concat!(stringify!($name), "::INVALID"))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

define_id! {
    /// Index into the expression arena.
    ExprId
}

define_id! {
    /// Index into the statement arena.
    StmtId
}

define_id! {
    /// Index into the block arena.
    BlockId
}

macro_rules! define_range {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        #[repr(C)]
        pub struct $name {
            pub start: u32,
            pub len: u16,
        }

        impl $name {
            /// Empty range.
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            /// Create a new range.
            #[inline]
            pub const fn new(start: u32, len: u16) -> Self {
                $name { start, len }
            }

            /// Check if the range is empty.
            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            /// Number of elements in the range.
            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    concat!(stringify!($name), "({}..{})"),
                    self.start,
                    self.start + u32::from(self.len)
                )
            }
        }
    };
}

define_range! {
    /// Range of expression IDs in the flattened list pool.
    ExprRange
}

define_range! {
    /// Range of statement IDs in the flattened list pool.
    StmtRange
}

define_range! {
    /// Range of parameters in the flattened parameter pool.
    ParamRange
}

// Size assertions to prevent accidental regressions
mod size_asserts {
    use super::{ExprId, ExprRange};
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(ExprRange, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_valid() {
        let id = ExprId::new(42);
        assert!(id.is_valid());
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn id_invalid() {
        assert!(!ExprId::INVALID.is_valid());
        assert!(!StmtId::default().is_valid());
        assert!(!BlockId::default().is_valid());
    }

    #[test]
    fn range_len() {
        let range = ExprRange::new(10, 5);
        assert!(!range.is_empty());
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn range_empty() {
        assert!(StmtRange::EMPTY.is_empty());
        assert!(ParamRange::default().is_empty());
    }

    #[test]
    fn id_debug() {
        assert_eq!(format!("{:?}", ExprId::new(7)), "ExprId(7)");
        assert_eq!(format!("{:?}", ExprId::INVALID), "ExprId::INVALID");
    }
}
