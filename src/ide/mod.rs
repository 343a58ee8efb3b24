//! IDE features - the completion-facing surface over the binding graph.
//!
//! ## Key Types
//!
//! - [`ExtendedCompletionContext`] - Visible elements and enclosing element
//!   at one completion cursor
//! - [`ElementHandle`] - Stable identity of a declaration
//! - [`UnitStructure`] - Handles of every declaration in the unit under
//!   completion
//! - [`VisibleBindings`] - Locals, fields and methods found by the walk
//!
//! ## Pipeline
//!
//! ```text
//! scope chain ──walker──► VisibleBindings ──filter──► projection ──► Vec<ElementHandle>
//!                 │                                      │
//!                 └─ visibility (fields / methods)       └─ UnitStructure | BindingProjector
//! ```
//!
//! ## Collaborators
//!
//! Every seam has a default backed by the graph itself and can be replaced
//! on the context:
//!
//! | Trait                  | Default                   |
//! |------------------------|---------------------------|
//! | [`StructuralNotifier`] | [`DeclarationNotifier`]   |
//! | [`BindingProjector`]   | [`DetachedProjector`]     |
//! | `SignatureResolver`    | `GraphSignatureResolver`  |
//! | `MethodVerifier`       | `ErasureMethodVerifier`   |

mod candidates;
mod context;
mod error;
mod handle;
mod options;
mod projector;
mod structure;
mod visibility;
mod walker;

pub use candidates::VisibleBindings;
pub use context::ExtendedCompletionContext;
pub use error::ModelError;
pub use handle::{ElementHandle, ElementKind, LocalVariableInfo};
pub use options::CompletionOptions;
pub use projector::{BindingProjector, DetachedProjector};
pub use structure::{DeclarationNotifier, StructuralNotifier, UnitStructure};
