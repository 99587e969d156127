//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. The pipeline is strictly
//! single-threaded (one pass at a time over one tree), so the interner is
//! a plain single-shard table: interning takes `&mut self`, lookups take
//! `&self`. Interned strings are leaked to get `'static` lifetime, which is
//! fine for a compile-time-only artifact that lives for one pipeline run.

use crate::Name;
use rustc_hash::FxHashMap;

/// String interner.
///
/// The empty string is pre-interned at index 0 so that `Name::EMPTY`
/// always resolves.
pub struct StringInterner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            map,
            strings: vec![empty],
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same content twice returns the same `Name`.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&index) = self.map.get(s) {
            return Name::from_raw(index);
        }

        // Leak the string to get 'static lifetime
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());

        let index = u32::try_from(self.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded capacity: {} strings", self.strings.len()));
        self.strings.push(leaked);
        self.map.insert(leaked, index);
        Name::from_raw(index)
    }

    /// Resolve a `Name` back to its string content.
    ///
    /// # Panics
    /// Panics if the `Name` was not produced by this interner.
    #[inline]
    pub fn lookup(&self, name: Name) -> &str {
        self.strings[name.index()]
    }

    /// Number of interned strings (including the pre-interned empty string).
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if only the empty string is interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.len() == 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_same_name_for_same_content() {
        let mut interner = StringInterner::new();
        let a = interner.intern("Column");
        let b = interner.intern("Column");
        assert_eq!(a, b);
    }

    #[test]
    fn intern_distinguishes_content() {
        let mut interner = StringInterner::new();
        let a = interner.intern("Column");
        let b = interner.intern("Text");
        assert_ne!(a, b);
    }

    #[test]
    fn lookup_roundtrip() {
        let mut interner = StringInterner::new();
        let name = interner.intern("$composer");
        assert_eq!(interner.lookup(name), "$composer");
    }

    #[test]
    fn empty_string_is_pre_interned() {
        let mut interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
        assert!(interner.is_empty());
        assert_eq!(interner.len(), 1);
    }
}
