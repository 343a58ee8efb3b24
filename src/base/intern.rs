//! Identifier interning for variable, field, method and type names.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;

/// An interned identifier.
///
/// Name-based shadowing checks (locals over fields, subclass fields over
/// superclass fields, selector matches between methods) compare `Name`s,
/// which is a plain `u32` comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Name(u32);

impl Name {
    #[inline]
    pub(crate) const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Deduplicating string store behind [`Name`] handles.
///
/// Interior locking lets a shared graph intern lazily through `&self`.
#[derive(Default)]
pub struct Interner {
    inner: RwLock<InternerInner>,
}

#[derive(Default)]
struct InternerInner {
    map: FxHashMap<SmolStr, u32>,
    strings: Vec<SmolStr>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the existing handle if it was seen before.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&index) = self.inner.read().map.get(s) {
            return Name::from_raw(index);
        }

        let mut inner = self.inner.write();
        // Another writer may have raced us between the two locks
        if let Some(&index) = inner.map.get(s) {
            return Name::from_raw(index);
        }

        let text = SmolStr::new(s);
        let index = inner.strings.len() as u32;
        inner.strings.push(text.clone());
        inner.map.insert(text, index);
        Name::from_raw(index)
    }

    /// Look up an already interned string without inserting it.
    pub fn find(&self, s: &str) -> Option<Name> {
        self.inner.read().map.get(s).map(|&index| Name::from_raw(index))
    }

    /// The text behind `name`, or `None` for a handle minted elsewhere.
    pub fn lookup(&self, name: Name) -> Option<SmolStr> {
        self.inner.read().strings.get(name.0 as usize).cloned()
    }

    /// The text behind `name`, empty for a foreign handle.
    pub fn text(&self, name: Name) -> SmolStr {
        self.lookup(name).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("count", &self.inner.read().strings.len())
            .finish()
    }
}
