//! Compilation-unit identifiers.

use std::fmt;

/// A lightweight handle naming one compilation unit known to a
/// [`BindingGraph`](crate::hir::BindingGraph).
///
/// Two types are "defined in the same unit" exactly when their outermost
/// declarations carry the same `UnitId`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct UnitId(pub u32);

impl UnitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

impl From<u32> for UnitId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}
