//! String interner.
//!
//! The toolchain is single-threaded, so the table below is a plain
//! thread-local `RefCell`, not a lock-free concurrent map. Interned
//! strings are leaked to `'static` so that [`Symbol::as_str`] can hand
//! out string slices without borrowing the table.
//!
//! # Performance Characteristics
//!
//! - **Interning (hit)**: O(1) hash lookup
//! - **Interning (miss)**: O(1) hash insert + allocation
//! - **Symbol comparison**: O(1) index comparison
//! - **String retrieval**: O(1) vector index

use std::cell::RefCell;
use std::collections::HashMap;

use super::{InternerStats, Symbol};

thread_local! {
    static TABLE: RefCell<StringTableInner> = RefCell::new(StringTableInner::new());
}

struct StringTableInner {
    /// index -> leaked string
    strings: Vec<&'static str>,
    /// leaked string -> index, for interning lookups
    lookup: HashMap<&'static str, u32, ahash::RandomState>,
    hits: usize,
    misses: usize,
}

impl StringTableInner {
    fn new() -> Self {
        let mut table = Self {
            strings: Vec::with_capacity(256),
            lookup: HashMap::with_capacity_and_hasher(256, ahash::RandomState::new()),
            hits: 0,
            misses: 0,
        };
        table.initialize_known_symbols();
        table
    }

    fn initialize_known_symbols(&mut self) {
        for (idx, keyword) in super::KNOWN_SYMBOLS.iter().enumerate() {
            debug_assert_eq!(idx as u32, self.strings.len() as u32);
            let leaked: &'static str = Box::leak(keyword.to_string().into_boxed_str());
            self.strings.push(leaked);
            self.lookup.insert(leaked, idx as u32);
        }
    }

    fn intern(&mut self, string: &str) -> Symbol {
        if let Some(&index) = self.lookup.get(string) {
            self.hits += 1;
            return Symbol { index };
        }

        self.misses += 1;
        let leaked: &'static str = Box::leak(string.to_string().into_boxed_str());
        let index = self.strings.len() as u32;
        self.strings.push(leaked);
        self.lookup.insert(leaked, index);
        Symbol { index }
    }

    fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.strings.get(symbol.index as usize).copied()
    }

    fn stats(&self) -> InternerStats {
        InternerStats {
            count: self.strings.len(),
            capacity: self.lookup.capacity(),
            collisions: 0,
            hits: self.hits,
            misses: self.misses,
        }
    }

    #[cfg(test)]
    fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }
}

/// Handle to the thread-local string table.
///
/// Every method proxies to the `thread_local!` table above; the type
/// itself carries no state.
pub struct StringTable;

/// The process-wide string table handle, pre-populated with known keywords.
pub static STRING_TABLE: StringTable = StringTable;

impl StringTable {
    /// Intern a string, returning its symbol.
    pub fn intern(&self, string: &str) -> Symbol {
        TABLE.with(|table| table.borrow_mut().intern(string))
    }

    /// Get the string for a symbol.
    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        TABLE.with(|table| table.borrow().get(symbol))
    }

    /// Get interner statistics for profiling.
    pub fn stats(&self) -> InternerStats {
        TABLE.with(|table| table.borrow().stats())
    }

    /// Reset hit/miss counters. Test-only.
    #[cfg(test)]
    pub(crate) fn reset_stats(&self) {
        TABLE.with(|table| table.borrow_mut().reset_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_same_string() {
        let s1 = STRING_TABLE.intern("hello");
        let s2 = STRING_TABLE.intern("hello");
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_intern_different_strings() {
        let s1 = STRING_TABLE.intern("hello");
        let s2 = STRING_TABLE.intern("world");
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_get_string() {
        let symbol = STRING_TABLE.intern("test_string");
        let string = STRING_TABLE.get(symbol);
        assert_eq!(string, Some("test_string"));
    }

    #[test]
    fn test_stats_tracking() {
        STRING_TABLE.reset_stats();

        let _ = STRING_TABLE.intern("new_unique_string_12345");
        let stats = STRING_TABLE.stats();
        assert!(stats.misses >= 1);

        let _ = STRING_TABLE.intern("new_unique_string_12345");
        let stats = STRING_TABLE.stats();
        assert!(stats.hits >= 1);
    }

    #[test]
    fn test_stats_struct() {
        let stats = STRING_TABLE.stats();
        assert!(stats.count > 0); // Known symbols are pre-interned
        assert!(stats.capacity >= stats.count);
        assert!(stats.load_factor() >= 0.0);
        assert!(stats.load_factor() <= 1.0);
    }

    #[test]
    fn test_empty_string() {
        let s = STRING_TABLE.intern("");
        assert_eq!(STRING_TABLE.get(s), Some(""));
    }

    #[test]
    fn test_unicode_strings() {
        let test_cases = ["你好", "世界", "🦀", "こんにちは", "Привет"];

        for test in &test_cases {
            let sym = STRING_TABLE.intern(test);
            assert_eq!(STRING_TABLE.get(sym), Some(*test));
        }
    }

    #[test]
    fn test_long_strings() {
        let long_string = "a".repeat(10000);
        let sym = STRING_TABLE.intern(&long_string);
        assert_eq!(STRING_TABLE.get(sym), Some(long_string.as_str()));
    }
}
