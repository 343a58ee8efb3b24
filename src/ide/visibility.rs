//! Field and method visibility for one receiver type.
//!
//! Both resolvers append to a shared [`VisibleBindings`]. Members of one
//! type are filtered against what was found before that type and appended
//! as a batch, so a subclass member always hides the same-named (fields) or
//! override-equivalent (methods) member of a supertype visited later.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use super::candidates::VisibleBindings;
use crate::base::TextSize;
use crate::hir::{BindingGraph, FieldId, MethodId, MethodVerifier, ScopeId, TypeId};

/// Interfaces still to visit, each at most once.
type InterfaceQueue = IndexSet<TypeId, FxBuildHasher>;

/// One search request: the code the completion runs in and how strict the
/// lookup is.
pub(crate) struct MemberSearch<'a> {
    pub graph: &'a BindingGraph,
    pub verifier: &'a dyn MethodVerifier,
    /// Scope of the cursor.
    pub invocation_scope: ScopeId,
    /// End of the node under completion; capture position for intersections.
    pub position: TextSize,
    pub not_in_javadoc: bool,
}

impl MemberSearch<'_> {
    // ========================================================================
    // FIELDS
    // ========================================================================

    /// Fields reachable through `receiver`, seen from `scope`.
    ///
    /// Superclasses first, then every superinterface collected along the way.
    /// In javadoc mode only the receiver's own fields are examined.
    pub fn fields(&self, receiver: TypeId, scope: ScopeId, statics_only: bool, found: &mut VisibleBindings) {
        let mut interfaces = InterfaceQueue::default();
        let mut current = Some(receiver);
        while let Some(ty) = current {
            if self.not_in_javadoc {
                interfaces.extend(self.graph.superinterfaces(ty).iter().copied());
            }
            self.local_fields(self.graph.available_fields(ty), receiver, scope, statics_only, found);
            if !self.not_in_javadoc {
                break;
            }
            current = self.graph.superclass(ty);
        }

        if !self.not_in_javadoc {
            return;
        }
        let mut next = 0;
        while let Some(&interface) = interfaces.get_index(next) {
            next += 1;
            self.local_fields(self.graph.available_fields(interface), receiver, scope, statics_only, found);
            interfaces.extend(self.graph.superinterfaces(interface).iter().copied());
        }
    }

    /// Keep the fields among `fields` that are neither hidden nor shadowed
    /// by anything found so far.
    pub fn local_fields(
        &self,
        fields: impl IntoIterator<Item = FieldId>,
        receiver: TypeId,
        scope: ScopeId,
        statics_only: bool,
        found: &mut VisibleBindings,
    ) {
        let batch: Vec<_> = fields
            .into_iter()
            .filter_map(|f| {
                let field = self.graph.field(f);
                if field.is_synthetic() || (statics_only && !field.is_static()) {
                    return None;
                }
                if !self.graph.field_can_be_seen_by(f, receiver, scope) {
                    trace!("[FIELDS] {} not accessible", self.graph.text(field.name));
                    return None;
                }
                if found.has_field(field.name) || found.has_local(field.name) {
                    trace!("[FIELDS] {} hidden", self.graph.text(field.name));
                    return None;
                }
                Some((field.name, f))
            })
            .collect();
        found.append_fields(batch);
    }

    // ========================================================================
    // METHODS
    // ========================================================================

    /// Methods reachable through `receiver`, seen from `scope`.
    pub fn methods(&self, receiver: TypeId, scope: ScopeId, statics_only: bool, found: &mut VisibleBindings) {
        let mut current = Some(receiver);
        if self.not_in_javadoc && self.graph.is_interface(receiver) {
            self.interface_methods(vec![receiver], receiver, scope, statics_only, found);
            current = self.graph.object();
        }

        let mut potential_default_abstract = true;
        while let Some(ty) = current {
            self.local_methods(self.graph.available_methods(ty), receiver, scope, statics_only, found);

            let binding = self.graph.ty(ty);
            let may_inherit_abstract = binding.is_abstract()
                || self.graph.is_interface(ty)
                || binding.is_type_variable()
                || binding.is_intersection()
                || binding.is_enum();
            if self.not_in_javadoc && potential_default_abstract && may_inherit_abstract {
                let interfaces = binding
                    .superinterfaces
                    .iter()
                    .map(|i| {
                        if binding.is_intersection() {
                            self.graph.capture(*i, self.invocation_scope, self.position)
                        } else {
                            *i
                        }
                    })
                    .collect();
                self.interface_methods(interfaces, receiver, scope, statics_only, found);
            } else {
                potential_default_abstract = false;
            }

            current = match binding.generic() {
                Some(generic) => self.graph.superclass(generic),
                None => binding.superclass,
            };
        }
    }

    /// Methods of `interfaces` and all their superinterfaces, each
    /// interface visited once.
    fn interface_methods(
        &self,
        interfaces: Vec<TypeId>,
        receiver: TypeId,
        scope: ScopeId,
        statics_only: bool,
        found: &mut VisibleBindings,
    ) {
        let mut queue: InterfaceQueue = interfaces.into_iter().collect();
        let mut next = 0;
        while let Some(&interface) = queue.get_index(next) {
            next += 1;
            self.local_methods(self.graph.available_methods(interface), receiver, scope, statics_only, found);
            queue.extend(self.graph.superinterfaces(interface).iter().copied());
        }
    }

    /// Keep the methods among `methods` that are neither already present nor
    /// override-equivalent to one found so far.
    pub fn local_methods(
        &self,
        methods: impl IntoIterator<Item = MethodId>,
        receiver: TypeId,
        scope: ScopeId,
        statics_only: bool,
        found: &mut VisibleBindings,
    ) {
        let batch: Vec<_> = methods
            .into_iter()
            .filter(|m| {
                let method = self.graph.method(*m);
                if method.is_synthetic()
                    || method.is_default_abstract()
                    || method.is_constructor
                    || (statics_only && !method.is_static())
                {
                    return false;
                }
                if !self.graph.method_can_be_seen_by(*m, receiver, scope) {
                    trace!("[METHODS] {} not accessible", self.graph.text(method.selector));
                    return false;
                }
                if found.contains_method(*m) {
                    return false;
                }
                let overridden = found.methods().any(|kept| {
                    self.graph.method(kept).selector == method.selector
                        && self.verifier.is_method_subsignature(self.graph, kept, *m)
                });
                if overridden {
                    trace!("[METHODS] {} overridden", self.graph.text(method.selector));
                }
                !overridden
            })
            .collect();
        found.append_methods(batch);
    }
}
