//! # scopewalk
//!
//! Visible-symbol resolution for code completion in Java-like languages.
//!
//! Given the binding graph a compiler produced for one pass and the scope
//! at a completion cursor, compute the locals, fields and methods the
//! completion may offer (honoring shadowing, hiding, overriding, static
//! imports and access rules), optionally filtered by assignability to a
//! target type, and locate the declaration enclosing the cursor.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Completion context, visibility resolvers, element handles
//!   ↓
//! hir       → Binding graph, scopes, access, compatibility, signatures
//!   ↓
//! base      → Primitives (UnitId, Name interning, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → hir → ide)
// ============================================================================

/// Foundation types: UnitId, Name interning, TextRange
pub mod base;

/// High-level IR: the resolved binding graph
pub mod hir;

/// IDE features: visible elements, enclosing element
pub mod ide;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use base::{Name, TextRange, TextSize, UnitId};
pub use hir::{BindingGraph, CompilationUnitDecl, ScopeId};
pub use ide::{CompletionOptions, ElementHandle, ElementKind, ExtendedCompletionContext};
