//! Global symbol interning
//!
//! Each distinct symbol name is stored exactly once. An [`InternedSymbol`] is a
//! cheap handle (id + shared name) whose equality and hashing are O(1) id
//! comparisons.
//!
//! # Example
//! ```
//! use symb_solve::{symb, symbol_exists};
//!
//! let x = symb("doc_interned_x");
//! let again = symb("doc_interned_x");
//! assert_eq!(x, again);
//! assert!(symbol_exists("doc_interned_x"));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock, RwLock};

use rustc_hash::FxHashMap;
use slotmap::{DefaultKey, Key, SlotMap};

/// Interned symbol handle
#[derive(Debug, Clone)]
pub struct InternedSymbol {
    id: u64,
    name: Arc<str>,
}

impl InternedSymbol {
    /// Unique registry id of this symbol
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name the symbol was interned under
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for InternedSymbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InternedSymbol {}

impl Hash for InternedSymbol {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialEq<str> for InternedSymbol {
    fn eq(&self, other: &str) -> bool {
        &*self.name == other
    }
}

impl PartialEq<&str> for InternedSymbol {
    fn eq(&self, other: &&str) -> bool {
        &*self.name == *other
    }
}

// Ordered by name so canonical sort order does not depend on interning order
impl PartialOrd for InternedSymbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternedSymbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name).then(self.id.cmp(&other.id))
    }
}

impl fmt::Display for InternedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// Global Symbol Registry
// ============================================================================

struct SymbolRegistry {
    name_to_key: FxHashMap<Arc<str>, DefaultKey>,
    symbols: SlotMap<DefaultKey, InternedSymbol>,
}

impl SymbolRegistry {
    fn new() -> Self {
        Self {
            name_to_key: FxHashMap::default(),
            symbols: SlotMap::with_key(),
        }
    }

    fn get(&self, name: &str) -> Option<InternedSymbol> {
        self.name_to_key
            .get(name)
            .and_then(|key| self.symbols.get(*key))
            .cloned()
    }
}

static REGISTRY: LazyLock<RwLock<SymbolRegistry>> =
    LazyLock::new(|| RwLock::new(SymbolRegistry::new()));

/// Get the interned symbol for `name`, creating it on first use
///
/// # Panics
///
/// Panics if the global registry lock is poisoned.
pub(crate) fn get_or_intern(name: &str) -> InternedSymbol {
    if let Some(symbol) = REGISTRY
        .read()
        .expect("Global symbol registry poisoned")
        .get(name)
    {
        return symbol;
    }

    let mut registry = REGISTRY.write().expect("Global symbol registry poisoned");
    // Another thread may have interned it between the two locks
    if let Some(symbol) = registry.get(name) {
        return symbol;
    }
    let shared: Arc<str> = Arc::from(name);
    let key = registry.symbols.insert_with_key(|k| InternedSymbol {
        id: k.data().as_ffi(),
        name: Arc::clone(&shared),
    });
    registry.name_to_key.insert(shared, key);
    registry.symbols[key].clone()
}

/// Check whether a symbol name has been interned
///
/// # Panics
///
/// Panics if the global registry lock is poisoned.
pub fn symbol_exists(name: &str) -> bool {
    REGISTRY
        .read()
        .expect("Global symbol registry poisoned")
        .name_to_key
        .contains_key(name)
}

/// Number of symbols interned so far
///
/// # Panics
///
/// Panics if the global registry lock is poisoned.
pub fn symbol_count() -> usize {
    REGISTRY
        .read()
        .expect("Global symbol registry poisoned")
        .symbols
        .len()
}
