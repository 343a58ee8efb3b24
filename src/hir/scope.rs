//! Lexical scopes and static imports.
//!
//! Scopes form a parent-linked chain from the cursor up to the
//! compilation-unit scope. Each level is one variant of [`ScopeKind`];
//! walkers match on the variant instead of dispatching through a hierarchy.

use super::ids::{FieldId, ImportId, LocalId, MethodId, ScopeId, TypeId};
use crate::base::UnitId;

/// What a method-level scope was opened for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MethodContext {
    /// A method or constructor body.
    Method(MethodId),
    /// An initializer block or a field initialization of this type.
    Initializer(TypeId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Block {
        locals: Vec<LocalId>,
    },
    Method {
        context: MethodContext,
        /// Parameters first, then locals declared directly in the body.
        locals: Vec<LocalId>,
        is_static: bool,
        /// Inside an explicit `this(...)` / `super(...)` call.
        is_constructor_call: bool,
    },
    Class {
        ty: TypeId,
    },
    CompilationUnit {
        unit: UnitId,
        imports: Vec<ImportId>,
    },
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
}

impl Scope {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Locals declared directly at this level, in declaration order.
    pub fn locals(&self) -> &[LocalId] {
        match &self.kind {
            ScopeKind::Block { locals } | ScopeKind::Method { locals, .. } => locals,
            ScopeKind::Class { .. } | ScopeKind::CompilationUnit { .. } => &[],
        }
    }

    pub fn is_compilation_unit(&self) -> bool {
        matches!(self.kind, ScopeKind::CompilationUnit { .. })
    }
}

/// The declaration a scope belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceContext {
    Method(MethodId),
    /// A type body, initializer or field initialization.
    Type(TypeId),
    Unit(UnitId),
}

/// What a resolved import points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImportTarget {
    Package,
    Type(TypeId),
    Field(FieldId),
    /// One of the overloads named by a single-member static import.
    Method(MethodId),
}

#[derive(Clone, Debug)]
pub struct ImportBinding {
    pub is_static: bool,
    pub on_demand: bool,
    /// `None` when the import could not be resolved.
    pub target: Option<ImportTarget>,
    pub valid: bool,
}

impl ImportBinding {
    pub fn single_static(target: ImportTarget) -> Self {
        Self {
            is_static: true,
            on_demand: false,
            target: Some(target),
            valid: true,
        }
    }

    pub fn static_on_demand(ty: TypeId) -> Self {
        Self {
            is_static: true,
            on_demand: true,
            target: Some(ImportTarget::Type(ty)),
            valid: true,
        }
    }

    pub fn single_type(ty: TypeId) -> Self {
        Self {
            is_static: false,
            on_demand: false,
            target: Some(ImportTarget::Type(ty)),
            valid: true,
        }
    }

    pub fn unresolved(is_static: bool, on_demand: bool) -> Self {
        Self {
            is_static,
            on_demand,
            target: None,
            valid: false,
        }
    }
}
