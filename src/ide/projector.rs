//! Projection of bindings declared outside the unit under completion.

use smol_str::SmolStr;
use tracing::trace;

use super::handle::ElementHandle;
use crate::hir::{BindingGraph, BindingRef, TypeId, TypeKind, TypeOrigin};

/// Builds a detached handle for a binding owned by another unit or by a
/// compiled class.
pub trait BindingProjector {
    fn project(&self, graph: &BindingGraph, binding: BindingRef) -> Option<ElementHandle>;
}

/// Default projector: derives handles from the declaring types' names and
/// origins. Source types hang under their compilation unit, binary types
/// under their class file.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedProjector;

impl BindingProjector for DetachedProjector {
    fn project(&self, graph: &BindingGraph, binding: BindingRef) -> Option<ElementHandle> {
        match binding {
            BindingRef::Type(ty) => self.type_handle(graph, ty),
            BindingRef::Field(f) => {
                let field = graph.field(f);
                let parent = self.type_handle(graph, field.declaring)?;
                Some(ElementHandle::field(&parent, &graph.text(field.name)))
            }
            BindingRef::Method(m) => {
                let method = graph.method(m);
                let parent = self.type_handle(graph, method.declaring)?;
                let parameters = method
                    .parameters
                    .iter()
                    .map(|p| SmolStr::new(graph.type_signature(*p)))
                    .collect();
                Some(ElementHandle::method(&parent, &graph.text(method.selector), parameters))
            }
        }
    }
}

impl DetachedProjector {
    fn type_handle(&self, graph: &BindingGraph, ty: TypeId) -> Option<ElementHandle> {
        let binding = graph.ty(ty);
        match binding.kind {
            TypeKind::Parameterized { generic, .. } => return self.type_handle(graph, generic),
            TypeKind::Class | TypeKind::Interface | TypeKind::Enum => {}
            _ => return None,
        }
        if let Some(outer) = binding.enclosing {
            let parent = self.type_handle(graph, outer)?;
            return Some(ElementHandle::ty(&parent, &graph.text(binding.name)));
        }

        let package = ElementHandle::package_fragment(&binding.package);
        let root = match binding.origin {
            TypeOrigin::Source(unit) => ElementHandle::compilation_unit(&package, &graph.unit(unit).name),
            TypeOrigin::Binary => {
                ElementHandle::class_file(&package, &format!("{}.class", graph.text(binding.name)))
            }
            TypeOrigin::Missing | TypeOrigin::Derived => {
                trace!("[PROJECT] no handle for {}", binding.qualified_name);
                return None;
            }
        };
        Some(ElementHandle::ty(&root, &graph.text(binding.name)))
    }
}
