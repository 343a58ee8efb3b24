//! Builders for small Java-like programs: a binding graph, its scopes and
//! the declaration tree of the unit under completion.

use std::sync::Once;

use scopewalk::base::{TextRange, UnitId};
use scopewalk::hir::{
    BindingGraph, CompilationUnitDecl, FieldDecl, JAVA_LANG_STRING, LocalDeclaration, LocalId,
    MethodContext, MethodDecl, MethodId, Modifiers, NewType, PrimitiveKind, ScopeId, TypeDecl,
    TypeId,
};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output to the test writer; `RUST_LOG=scopewalk=trace`
/// shows every walker decision.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn r(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

/// One source unit being edited, plus whatever else the graph knows.
pub struct JavaUnit {
    pub graph: BindingGraph,
    pub unit: UnitId,
    pub root: ScopeId,
}

impl JavaUnit {
    /// `<package>/<file>` with `java.lang` available.
    pub fn new(package: &str, file: &str) -> Self {
        init_tracing();
        let mut graph = BindingGraph::with_java_lang();
        let unit = graph.add_unit(file, package);
        let root = graph.add_unit_scope(unit);
        Self { graph, unit, root }
    }

    pub fn int(&self) -> TypeId {
        self.graph.primitive(PrimitiveKind::Int)
    }

    pub fn string(&self) -> TypeId {
        self.graph
            .type_named(JAVA_LANG_STRING)
            .expect("java.lang.String is registered")
    }

    /// A public class declared in this unit.
    pub fn class(&mut self, name: &str) -> TypeId {
        self.graph
            .add_type(NewType::class(name).in_unit(self.unit).modifiers(Modifiers::PUBLIC))
    }

    /// Class scope of a top-level type.
    pub fn class_scope(&mut self, ty: TypeId) -> ScopeId {
        self.graph.add_class_scope(self.root, ty)
    }

    /// Method scope and body block of `method`.
    pub fn body(&mut self, class_scope: ScopeId, method: MethodId, is_static: bool) -> (ScopeId, ScopeId) {
        let method_scope = self
            .graph
            .add_method_scope(class_scope, MethodContext::Method(method), is_static);
        let block = self.graph.add_block_scope(method_scope);
        (method_scope, block)
    }

    /// A local whose name starts at offset `at`.
    pub fn local(&mut self, scope: ScopeId, name: &str, ty: TypeId, at: u32) -> LocalId {
        let end = at + name.len() as u32;
        let declaration = LocalDeclaration {
            declaration_range: r(at.saturating_sub(4), end + 1),
            name_range: r(at, end),
            annotations: Vec::new(),
        };
        self.graph.add_local(scope, name, ty, declaration)
    }

    /// The declaration tree holding `types`.
    pub fn decl(&self, types: Vec<TypeDecl>) -> CompilationUnitDecl {
        types
            .into_iter()
            .fold(CompilationUnitDecl::new(self.unit, r(0, 10_000)), |decl, ty| decl.with_type(ty))
    }
}

/// Declaration of `ty` spanning `range`. Its fields and then its methods
/// occupy consecutive 10-byte slots after a 10-byte header.
pub fn type_decl(graph: &BindingGraph, ty: TypeId, range: TextRange) -> TypeDecl {
    let binding = graph.ty(ty);
    let name = graph.text(binding.name);
    let start = u32::from(range.start());
    let slot = |k: usize| {
        let at = start + 10 + 10 * k as u32;
        (r(at, at + 9), r(at + 1, at + 4))
    };

    let mut decl = TypeDecl::new(&name, Some(ty), range, r(start + 1, start + 5));
    let mut k = 0;
    for &field in &binding.fields {
        let (range, name_range) = slot(k);
        decl = decl.with_field(FieldDecl::new(
            &graph.text(graph.field(field).name),
            Some(field),
            range,
            name_range,
        ));
        k += 1;
    }
    for &method in &binding.methods {
        let (range, name_range) = slot(k);
        decl = decl.with_method(MethodDecl::new(
            &graph.text(graph.method(method).selector),
            Some(method),
            range,
            name_range,
        ));
        k += 1;
    }
    decl
}

/// Source range of the first member called `name`.
pub fn member_range(decl: &TypeDecl, name: &str) -> TextRange {
    decl.methods
        .iter()
        .find(|m| m.name == name)
        .map(|m| m.range)
        .or_else(|| decl.fields.iter().find(|f| f.name == name).map(|f| f.range))
        .unwrap_or_else(|| panic!("no member `{}` in {}", name, decl.name))
}
