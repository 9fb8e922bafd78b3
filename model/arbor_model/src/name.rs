//! Interned identifiers.
//!
//! Every name in the model (variable names, type names, labels, import
//! paths) is interned to a 32-bit [`Name`], giving O(1) equality and a
//! compact node representation. One [`Interner`] can be shared between
//! trees via [`SharedInterner`] so that names stay comparable across them.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Interned string identifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

struct InternerInner {
    /// Map from string content to index.
    map: FxHashMap<Arc<str>, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<Arc<str>>,
}

impl InternerInner {
    fn with_empty() -> Self {
        // Pre-intern the empty string at index 0 so Name::EMPTY resolves.
        let empty: Arc<str> = Arc::from("");
        let mut map = FxHashMap::default();
        map.insert(Arc::clone(&empty), 0);
        Self {
            map,
            strings: vec![empty],
        }
    }
}

/// String interner backing [`Name`].
///
/// # Thread Safety
/// Uses an `RwLock` so one interner can be shared (wrapped in `Arc`) by
/// trees on different threads; the trees themselves remain single-writer.
pub struct Interner {
    inner: RwLock<InternerInner>,
}

impl Interner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(InternerInner::with_empty()),
        }
    }

    /// Intern a string, returning its [`Name`].
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&idx) = self.inner.read().map.get(s) {
            return Name(idx);
        }
        let mut inner = self.inner.write();
        // Re-check: another writer may have raced us between the locks.
        if let Some(&idx) = inner.map.get(s) {
            return Name(idx);
        }
        let idx = u32::try_from(inner.strings.len())
            .unwrap_or_else(|_| panic!("interner capacity exceeded at {s:?}"));
        let stored: Arc<str> = Arc::from(s);
        inner.strings.push(Arc::clone(&stored));
        inner.map.insert(stored, idx);
        Name(idx)
    }

    /// Resolve a [`Name`] back to its string content.
    ///
    /// Returns `None` for names minted by a different interner.
    pub fn resolve(&self, name: Name) -> Option<Arc<str>> {
        self.inner.read().strings.get(name.index()).cloned()
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        // The empty string is always present.
        false
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}

/// Shared handle to an [`Interner`].
pub type SharedInterner = Arc<Interner>;
