//! Errors raised while building or querying the structural view of a unit.

use thiserror::Error;

use crate::base::TextRange;

/// A structural view could not be built or answered a query inconsistently
/// with the declaration tree it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{kind} `{name}` has no binding")]
    UnboundDeclaration { kind: &'static str, name: String },

    #[error("`{name}` spans {range:?}, outside its parent {parent:?}")]
    InconsistentRange {
        name: String,
        range: TextRange,
        parent: TextRange,
    },

    #[error("no element for {0}")]
    ElementNotFound(String),
}
