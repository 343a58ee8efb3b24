//! Foundation types shared by the binding graph and the completion engine.
//!
//! - [`UnitId`] - Compilation-unit identifiers
//! - [`Name`], [`Interner`] - Identifier interning
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other scopewalk modules.

mod intern;
mod unit_id;

pub use intern::{Interner, Name};
pub use unit_id::UnitId;

// Every source position in the crate is a byte offset
pub use text_size::{TextRange, TextSize};

/// Whether `inner` lies entirely within `outer` (both ends inclusive).
#[inline]
pub fn range_covers(outer: TextRange, inner: TextRange) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

/// Whether `offset` lies within `range`, counting the end offset as inside.
///
/// A cursor sitting right after the last character of a declaration still
/// belongs to that declaration.
#[inline]
pub fn range_contains_inclusive(range: TextRange, offset: TextSize) -> bool {
    range.start() <= offset && offset <= range.end()
}
