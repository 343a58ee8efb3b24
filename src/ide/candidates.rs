//! The three ordered candidate collections a walk produces.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

use crate::base::Name;
use crate::hir::{FieldId, LocalId, MethodId};

/// Locals, fields and methods visible at the cursor, each in discovery
/// order. Locals and fields are unique by name, methods by identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleBindings {
    locals: IndexMap<Name, LocalId, FxBuildHasher>,
    fields: IndexMap<Name, FieldId, FxBuildHasher>,
    methods: IndexSet<MethodId, FxBuildHasher>,
}

impl VisibleBindings {
    pub fn locals(&self) -> impl Iterator<Item = LocalId> + '_ {
        self.locals.values().copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.values().copied()
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.methods.iter().copied()
    }

    pub fn has_local(&self, name: Name) -> bool {
        self.locals.contains_key(&name)
    }

    pub fn has_field(&self, name: Name) -> bool {
        self.fields.contains_key(&name)
    }

    pub fn contains_method(&self, method: MethodId) -> bool {
        self.methods.contains(&method)
    }

    /// Keep the first local seen under `name`; returns whether it was added.
    pub(crate) fn push_local(&mut self, name: Name, local: LocalId) -> bool {
        if self.locals.contains_key(&name) {
            return false;
        }
        self.locals.insert(name, local);
        true
    }

    /// Append fields already filtered against the current contents.
    pub(crate) fn append_fields(&mut self, batch: Vec<(Name, FieldId)>) {
        for (name, field) in batch {
            self.fields.entry(name).or_insert(field);
        }
    }

    /// Append methods already filtered against the current contents.
    pub(crate) fn append_methods(&mut self, batch: Vec<MethodId>) {
        self.methods.extend(batch);
    }

    pub fn len(&self) -> usize {
        self.locals.len() + self.fields.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
