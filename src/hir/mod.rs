//! High-level IR (HIR) - the resolved binding graph the completion engine
//! walks.
//!
//! The surrounding compiler produces this state (possibly mid-resolution,
//! possibly with problem bindings); this crate only reads it.
//!
//! ## Key Types
//!
//! - [`BindingGraph`] - Arena of types, members, locals, scopes and imports
//! - [`Scope`] / [`ScopeKind`] - Lexical levels from cursor to unit root
//! - [`TypeBinding`], [`FieldBinding`], [`MethodBinding`], [`LocalBinding`]
//! - [`CompilationUnitDecl`] - Declaration tree of the unit being completed
//! - [`MethodVerifier`] - Override-equivalence collaborator
//! - [`SignatureResolver`] - Type-signature collaborator
//!
//! ## Queries
//!
//! ```text
//! scope_chain(scope)            ← cursor → compilation-unit root
//!     │
//!     ▼
//! superclass / superinterfaces  ← hierarchy ascent
//!     │
//!     ▼
//! available_fields / methods    ← members declared directly on a type
//!     │
//!     ▼
//! can_be_seen_by                ← accessibility from the call site
//!     │
//!     ▼
//! is_compatible_with            ← assignability to a target type
//! ```

mod access;
mod bindings;
mod compat;
mod decl;
mod graph;
mod ids;
mod scope;
mod signature;
mod verifier;

pub use bindings::{
    BindingRef, FieldBinding, LocalBinding, LocalDeclaration, MethodBinding, Modifiers,
    PrimitiveKind, TypeArgument, TypeBinding, TypeKind, TypeOrigin,
};
pub use decl::{
    CompilationUnitDecl, FieldDecl, InitializerDecl, MethodDecl, TypeDecl, TypeRootKind,
};
pub use graph::{BindingGraph, JAVA_LANG_OBJECT, JAVA_LANG_STRING, NewMethod, NewType, UnitInfo};
pub use ids::{FieldId, ImportId, LocalId, MethodId, ScopeId, TypeId};
pub use scope::{ImportBinding, ImportTarget, MethodContext, ReferenceContext, Scope, ScopeKind};
pub use signature::{
    ArgumentSignature, GraphSignatureResolver, SignatureError, SignatureResolver,
    SignatureScope, TypeSignature, parse_type_signature,
};
pub use verifier::{ErasureMethodVerifier, MethodVerifier};
