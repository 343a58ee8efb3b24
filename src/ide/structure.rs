//! Structural view of the unit under completion.
//!
//! Replaying the declaration tree yields one [`ElementHandle`] per type,
//! field, initializer and method, a map from bindings to those handles, and
//! a range tree answering "which declaration contains this offset?".

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::error::ModelError;
use super::handle::ElementHandle;
use crate::base::{TextRange, TextSize, range_contains_inclusive, range_covers};
use crate::hir::{BindingGraph, BindingRef, CompilationUnitDecl, TypeDecl, TypeId};

/// Builds a [`UnitStructure`] from the declaration tree of a unit.
pub trait StructuralNotifier {
    /// `assist_node` is the node under completion; a declaration whose name
    /// is being typed may still lack a binding.
    fn notify(
        &self,
        graph: &BindingGraph,
        unit: &CompilationUnitDecl,
        assist_node: TextRange,
    ) -> Result<UnitStructure, ModelError>;
}

/// Default notifier: walks [`CompilationUnitDecl`] directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclarationNotifier;

impl StructuralNotifier for DeclarationNotifier {
    fn notify(
        &self,
        graph: &BindingGraph,
        unit: &CompilationUnitDecl,
        assist_node: TextRange,
    ) -> Result<UnitStructure, ModelError> {
        let info = graph.unit(unit.unit);
        let package = ElementHandle::package_fragment(&info.package);
        let root = ElementHandle::compilation_unit(&package, &info.name);

        let mut builder = StructureBuilder {
            graph,
            assist_node,
            structure: UnitStructure {
                nodes: vec![StructureNode {
                    handle: root,
                    range: unit.range,
                    children: Vec::new(),
                }],
                by_binding: FxHashMap::default(),
                initializers: FxHashMap::default(),
            },
        };
        let mut siblings = FxHashMap::default();
        for ty in &unit.types {
            builder.type_decl(ROOT, ty, &mut siblings)?;
        }
        trace!(
            "[STRUCTURE] {} -> {} nodes, {} bindings",
            info.name,
            builder.structure.nodes.len(),
            builder.structure.by_binding.len()
        );
        Ok(builder.structure)
    }
}

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct StructureNode {
    handle: ElementHandle,
    range: TextRange,
    children: Vec<usize>,
}

/// Handles of every declaration in one unit.
#[derive(Debug, Clone)]
pub struct UnitStructure {
    /// Index 0 is the unit itself.
    nodes: Vec<StructureNode>,
    by_binding: FxHashMap<BindingRef, ElementHandle>,
    /// Initializer handles per type with their source ranges, in source order.
    initializers: FxHashMap<TypeId, Vec<(TextRange, ElementHandle)>>,
}

impl UnitStructure {
    pub fn root(&self) -> &ElementHandle {
        &self.nodes[ROOT].handle
    }

    /// Handle of a type, field or method declared in this unit.
    pub fn handle_of(&self, binding: BindingRef) -> Option<&ElementHandle> {
        self.by_binding.get(&binding)
    }

    /// Initializers of `ty` with their source ranges.
    pub fn initializers_of(&self, ty: TypeId) -> Result<&[(TextRange, ElementHandle)], ModelError> {
        if !self.by_binding.contains_key(&BindingRef::Type(ty)) {
            return Err(ModelError::ElementNotFound(format!("{:?}", ty)));
        }
        Ok(self.initializers.get(&ty).map(Vec::as_slice).unwrap_or_default())
    }

    /// The innermost declaration whose source range contains `offset`, or
    /// `None` when no declaration does.
    ///
    /// Both ends of a range count as inside; where two siblings share a
    /// boundary offset the later one wins.
    pub fn element_at(&self, offset: TextSize) -> Option<ElementHandle> {
        let mut current = ROOT;
        while let Some(&child) = self.nodes[current]
            .children
            .iter()
            .rev()
            .find(|c| range_contains_inclusive(self.nodes[**c].range, offset))
        {
            current = child;
        }
        (current != ROOT).then(|| self.nodes[current].handle.clone())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

struct StructureBuilder<'a> {
    graph: &'a BindingGraph,
    assist_node: TextRange,
    structure: UnitStructure,
}

impl StructureBuilder<'_> {
    /// Append a child node under `parent`, numbering same-named siblings.
    fn push(
        &mut self,
        parent: usize,
        handle: ElementHandle,
        range: TextRange,
        siblings: &mut FxHashMap<ElementHandle, u32>,
    ) -> Result<(usize, ElementHandle), ModelError> {
        let parent_range = self.structure.nodes[parent].range;
        if !range_covers(parent_range, range) {
            return Err(ModelError::InconsistentRange {
                name: handle.to_string(),
                range,
                parent: parent_range,
            });
        }
        let seen = siblings.entry(handle.clone()).or_insert(0);
        *seen += 1;
        let handle = if *seen > 1 { handle.with_occurrence(*seen) } else { handle };

        let index = self.structure.nodes.len();
        self.structure.nodes.push(StructureNode {
            handle: handle.clone(),
            range,
            children: Vec::new(),
        });
        self.structure.nodes[parent].children.push(index);
        Ok((index, handle))
    }

    /// Unbound declarations are only tolerated while their name is being
    /// completed.
    fn require<T>(
        &self,
        kind: &'static str,
        name: &str,
        binding: Option<T>,
        name_range: TextRange,
    ) -> Result<Option<T>, ModelError> {
        match binding {
            Some(binding) => Ok(Some(binding)),
            None if range_covers(name_range, self.assist_node) => {
                trace!("[STRUCTURE] {} `{}` is being completed, left unmapped", kind, name);
                Ok(None)
            }
            None => Err(ModelError::UnboundDeclaration {
                kind,
                name: name.to_string(),
            }),
        }
    }

    fn type_decl(
        &mut self,
        parent: usize,
        decl: &TypeDecl,
        siblings: &mut FxHashMap<ElementHandle, u32>,
    ) -> Result<(), ModelError> {
        let binding = self.require("type", &decl.name, decl.binding, decl.name_range)?;
        let handle = ElementHandle::ty(&self.structure.nodes[parent].handle, &decl.name);
        let (index, handle) = self.push(parent, handle, decl.range, siblings)?;
        if let Some(ty) = binding {
            self.structure.by_binding.insert(BindingRef::Type(ty), handle.clone());
        }

        let mut members = FxHashMap::default();
        for field in &decl.fields {
            let binding = self.require("field", &field.name, field.binding, field.name_range)?;
            let (_, field_handle) =
                self.push(index, ElementHandle::field(&handle, &field.name), field.range, &mut members)?;
            if let Some(f) = binding {
                self.structure.by_binding.insert(BindingRef::Field(f), field_handle);
            }
        }

        for (position, initializer) in decl.initializers.iter().enumerate() {
            let init_handle = ElementHandle::initializer(&handle, position as u32 + 1);
            let (_, init_handle) = self.push(index, init_handle, initializer.range, &mut members)?;
            if let Some(ty) = binding {
                self.structure
                    .initializers
                    .entry(ty)
                    .or_default()
                    .push((initializer.range, init_handle));
            }
        }

        for method in &decl.methods {
            let binding = self.require("method", &method.name, method.binding, method.name_range)?;
            let parameters: Vec<SmolStr> = binding
                .map(|m| {
                    self.graph
                        .method(m)
                        .parameters
                        .iter()
                        .map(|p| SmolStr::new(self.graph.type_signature(*p)))
                        .collect()
                })
                .unwrap_or_default();
            let method_handle = ElementHandle::method(&handle, &method.name, parameters);
            let (_, method_handle) = self.push(index, method_handle, method.range, &mut members)?;
            if let Some(m) = binding {
                self.structure.by_binding.insert(BindingRef::Method(m), method_handle);
            }
        }

        for member in &decl.member_types {
            self.type_decl(index, member, &mut members)?;
        }
        Ok(())
    }
}
