//! Subtyping, assignment compatibility, erasure and capture.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::bindings::{TypeArgument, TypeKind};
use super::graph::BindingGraph;
use super::ids::{ScopeId, TypeId};
use crate::base::TextSize;

impl BindingGraph {
    /// The generic declaration of an instantiation, the erased leading bound
    /// of a type variable, `ty` itself otherwise.
    pub fn erasure(&self, ty: TypeId) -> TypeId {
        let binding = self.ty(ty);
        match binding.kind {
            TypeKind::Parameterized { generic, .. } => generic,
            TypeKind::TypeVariable => {
                match binding.superclass.filter(|s| Some(*s) != self.object()) {
                    Some(bound) => self.erasure(bound),
                    None => binding
                        .superinterfaces
                        .first()
                        .map(|i| self.erasure(*i))
                        .or(binding.superclass)
                        .unwrap_or(ty),
                }
            }
            _ => ty,
        }
    }

    /// `ty` and every superclass / superinterface reachable from it, each
    /// exactly once, nearest first.
    pub fn supertypes(&self, ty: TypeId) -> Vec<TypeId> {
        let mut seen = FxHashSet::default();
        let mut order = vec![ty];
        seen.insert(ty);
        let mut next = 0;
        while next < order.len() {
            let current = self.ty(order[next]);
            next += 1;
            for parent in current.superclass.iter().chain(&current.superinterfaces) {
                if seen.insert(*parent) {
                    order.push(*parent);
                }
            }
        }
        order
    }

    /// Reference subtyping. Raw supertypes accept any instantiation;
    /// parameterized supertypes require contained arguments.
    pub fn is_subtype_of(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        // Every reference type is an Object, interfaces included
        if self.object() == Some(sup) && self.ty(sub).is_reference() {
            return true;
        }
        let target = self.ty(sup);
        self.supertypes(sub).into_iter().any(|candidate| {
            if candidate == sup {
                return true;
            }
            match (&self.ty(candidate).kind, &target.kind) {
                (
                    TypeKind::Parameterized { generic, arguments },
                    TypeKind::Parameterized {
                        generic: target_generic,
                        arguments: target_arguments,
                    },
                ) => {
                    generic == target_generic
                        && arguments.len() == target_arguments.len()
                        && arguments
                            .iter()
                            .zip(target_arguments)
                            .all(|(a, b)| self.argument_contained_in(*a, *b))
                }
                (TypeKind::Parameterized { generic, .. }, _) => *generic == sup,
                _ => false,
            }
        })
    }

    fn argument_contained_in(&self, argument: TypeArgument, container: TypeArgument) -> bool {
        match (argument, container) {
            (_, TypeArgument::Unbounded) => true,
            (TypeArgument::Type(a), TypeArgument::Type(b)) => a == b,
            (TypeArgument::Type(a) | TypeArgument::Extends(a), TypeArgument::Extends(b)) => {
                self.is_subtype_of(a, b)
            }
            (TypeArgument::Type(a) | TypeArgument::Super(a), TypeArgument::Super(b)) => {
                self.is_subtype_of(b, a)
            }
            _ => false,
        }
    }

    /// Whether a value of type `from` may be assigned to `to` without a
    /// cast. Boxing conversions are not considered.
    pub fn is_compatible_with(&self, from: TypeId, to: TypeId) -> bool {
        let source = self.ty(from);
        let target = self.ty(to);
        match (&source.kind, &target.kind) {
            (TypeKind::Primitive(a), TypeKind::Primitive(b)) => a.widens_to(*b),
            (TypeKind::Primitive(_), _) | (_, TypeKind::Primitive(_)) => false,
            (TypeKind::Null, _) => target.is_reference(),
            (_, TypeKind::Null) => false,
            (TypeKind::Array { component: a }, TypeKind::Array { component: b }) => {
                match (self.ty(*a).primitive(), self.ty(*b).primitive()) {
                    (None, None) => self.is_compatible_with(*a, *b),
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
            _ => self.is_subtype_of(from, to),
        }
    }

    /// Capture conversion of `ty` for member lookup at `position`.
    ///
    /// Capturing a wildcard instantiation yields the generic declaration,
    /// whose members are looked up unsubstituted.
    pub fn capture(&self, ty: TypeId, scope: ScopeId, position: TextSize) -> TypeId {
        match &self.ty(ty).kind {
            TypeKind::Parameterized { generic, arguments }
                if arguments.iter().any(|a| a.is_wildcard()) =>
            {
                trace!(
                    "[CAPTURE] {} at {:?} (scope {:?}) -> {}",
                    self.ty(ty).qualified_name,
                    position,
                    scope,
                    self.ty(*generic).qualified_name
                );
                *generic
            }
            _ => ty,
        }
    }
}
