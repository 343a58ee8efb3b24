//! The extended completion context: visible elements and the enclosing
//! element at a completion cursor.
//!
//! A context serves one completion request. Both derived views are
//! computed on first use and cached for the lifetime of the context; the
//! binding graph must not change meanwhile.

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;
use tracing::{debug, warn};

use super::candidates::VisibleBindings;
use super::handle::{ElementHandle, LocalVariableInfo};
use super::options::CompletionOptions;
use super::projector::{BindingProjector, DetachedProjector};
use super::structure::{DeclarationNotifier, StructuralNotifier, UnitStructure};
use super::visibility::MemberSearch;
use super::walker::search_visible_bindings;
use crate::base::range_covers;
use crate::hir::{
    BindingGraph, BindingRef, CompilationUnitDecl, ErasureMethodVerifier, GraphSignatureResolver,
    LocalId, MethodVerifier, ReferenceContext, ScopeId, SignatureError, SignatureResolver,
    SignatureScope, TypeId, TypeRootKind,
};

static DEFAULT_NOTIFIER: DeclarationNotifier = DeclarationNotifier;
static DEFAULT_PROJECTOR: DetachedProjector = DetachedProjector;
static DEFAULT_SIGNATURES: GraphSignatureResolver = GraphSignatureResolver;
static DEFAULT_VERIFIER: ErasureMethodVerifier = ErasureMethodVerifier;

/// Completion context of one request.
///
/// ```ignore
/// let context = ExtendedCompletionContext::new(&graph, &unit, Some(scope), options);
/// let strings = context.get_visible_elements(Some("Ljava/lang/String;"));
/// let enclosing = context.get_enclosing_element();
/// ```
pub struct ExtendedCompletionContext<'a> {
    graph: &'a BindingGraph,
    unit: &'a CompilationUnitDecl,
    /// Innermost scope at the cursor, if the compiler got that far.
    scope: Option<ScopeId>,
    options: CompletionOptions,
    notifier: &'a dyn StructuralNotifier,
    projector: &'a dyn BindingProjector,
    signatures: &'a dyn SignatureResolver,
    verifier: &'a dyn MethodVerifier,
    visible: OnceCell<VisibleBindings>,
    /// `None` inside once computed: no structural view is available.
    structure: OnceCell<Option<UnitStructure>>,
}

impl<'a> ExtendedCompletionContext<'a> {
    pub fn new(
        graph: &'a BindingGraph,
        unit: &'a CompilationUnitDecl,
        scope: Option<ScopeId>,
        options: CompletionOptions,
    ) -> Self {
        Self {
            graph,
            unit,
            scope,
            options,
            notifier: &DEFAULT_NOTIFIER,
            projector: &DEFAULT_PROJECTOR,
            signatures: &DEFAULT_SIGNATURES,
            verifier: &DEFAULT_VERIFIER,
            visible: OnceCell::new(),
            structure: OnceCell::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: &'a dyn StructuralNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_projector(mut self, projector: &'a dyn BindingProjector) -> Self {
        self.projector = projector;
        self
    }

    pub fn with_signature_resolver(mut self, signatures: &'a dyn SignatureResolver) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn with_method_verifier(mut self, verifier: &'a dyn MethodVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    // ========================================================================
    // ENCLOSING ELEMENT
    // ========================================================================

    /// The innermost declaration containing the cursor, or the unit itself
    /// when no declaration does.
    ///
    /// `None` when no structural view exists (class-file roots) or the view
    /// could not be built.
    pub fn get_enclosing_element(&self) -> Option<ElementHandle> {
        let structure = self.structure()?;
        Some(
            structure
                .element_at(self.options.offset)
                .unwrap_or_else(|| structure.root().clone()),
        )
    }

    fn structure(&self) -> Option<&UnitStructure> {
        self.structure
            .get_or_init(|| {
                if self.unit.root_kind != TypeRootKind::CompilationUnit {
                    debug!("[CONTEXT] {:?} root has no structural view", self.unit.root_kind);
                    return None;
                }
                self.notifier
                    .notify(self.graph, self.unit, self.options.assist_node)
                    .map_err(|err| warn!("Cannot compute enclosing element: {}", err))
                    .ok()
            })
            .as_ref()
    }

    // ========================================================================
    // VISIBLE ELEMENTS
    // ========================================================================

    /// Locals, then fields, then methods visible at the cursor, optionally
    /// only those assignable to `type_signature`.
    ///
    /// Empty without a cursor scope or when the signature does not resolve.
    /// Candidates without a handle are left out.
    pub fn get_visible_elements(&self, type_signature: Option<&str>) -> Vec<ElementHandle> {
        let Some(scope) = self.scope else {
            return Vec::new();
        };
        let visible = self.visible.get_or_init(|| self.compute_visible_bindings(scope));

        let target = match type_signature {
            Some(signature) => match self.resolve_target(scope, signature) {
                Ok(ty) => Some(ty),
                Err(err) => {
                    debug!("[CONTEXT] target `{}` not resolved: {}", signature, err);
                    return Vec::new();
                }
            },
            None => None,
        };
        if visible.is_empty() {
            return Vec::new();
        }

        let graph = self.graph;
        let accepts = |ty: TypeId| target.is_none_or(|target| graph.is_compatible_with(ty, target));

        let locals = visible
            .locals()
            .filter(|l| accepts(graph.local(*l).ty))
            .filter_map(|l| self.local_handle(l));
        let fields = visible
            .fields()
            .filter(|f| accepts(graph.field(*f).ty))
            .filter_map(|f| self.member_handle(scope, BindingRef::Field(f), graph.field(f).declaring));
        let methods = visible
            .methods()
            .filter(|m| accepts(graph.method(*m).return_type))
            .filter_map(|m| self.member_handle(scope, BindingRef::Method(m), graph.method(m).declaring));
        locals.chain(fields).chain(methods).collect()
    }

    /// Search only inside method bodies, initializer blocks and field
    /// initializations.
    fn compute_visible_bindings(&self, scope: ScopeId) -> VisibleBindings {
        let search = MemberSearch {
            graph: self.graph,
            verifier: self.verifier,
            invocation_scope: scope,
            position: self.options.assist_node.end(),
            not_in_javadoc: self.options.not_in_javadoc(),
        };
        match self.graph.reference_context(scope) {
            Some(ReferenceContext::Method(_)) => search_visible_bindings(&search),
            Some(ReferenceContext::Type(ty))
                if self
                    .unit
                    .find_type(ty)
                    .is_some_and(|decl| decl.contains_initializer_code(self.options.assist_node)) =>
            {
                search_visible_bindings(&search)
            }
            context => {
                debug!("[CONTEXT] nothing to search in {:?}", context);
                VisibleBindings::default()
            }
        }
    }

    fn resolve_target(&self, scope: ScopeId, signature: &str) -> Result<TypeId, SignatureError> {
        let enclosing_type = self
            .graph
            .enclosing_source_type(scope)
            .ok_or(SignatureError::NoEnclosingClass)?;
        let type_variables: &[TypeId] = match self.graph.reference_context(scope) {
            Some(ReferenceContext::Method(m)) => &self.graph.method(m).type_variables,
            _ => &[],
        };
        self.signatures.resolve(
            self.graph,
            signature,
            SignatureScope {
                enclosing_type,
                type_variables,
            },
        )
    }

    // ========================================================================
    // PROJECTION
    // ========================================================================

    /// A detached local-variable handle under its method, or under the
    /// initializer whose range holds its name.
    fn local_handle(&self, local: LocalId) -> Option<ElementHandle> {
        let binding = self.graph.local(local);
        let structure = self.structure()?;
        let name_range = binding.declaration.name_range;
        let parent = match self.graph.reference_context(binding.declaring_scope)? {
            ReferenceContext::Method(m) => structure.handle_of(BindingRef::Method(m))?.clone(),
            ReferenceContext::Type(ty) => match structure.initializers_of(ty) {
                Ok(initializers) => initializers
                    .iter()
                    .find(|(range, _)| range_covers(*range, name_range))
                    .map(|(_, handle)| handle.clone())?,
                Err(err) => {
                    debug!("[CONTEXT] no initializers: {}", err);
                    return None;
                }
            },
            ReferenceContext::Unit(_) => return None,
        };
        let info = LocalVariableInfo {
            declaration_range: binding.declaration.declaration_range,
            name_range,
            type_signature: SmolStr::new(self.graph.type_signature(binding.ty)),
            annotations: binding.declaration.annotations.clone(),
        };
        Some(ElementHandle::local_variable(&parent, &self.graph.text(binding.name), info))
    }

    /// Same-unit members come from the structural view; others are projected
    /// and stamped with their binding key. Members seen through an
    /// instantiation map to their declaration.
    fn member_handle(&self, scope: ScopeId, binding: BindingRef, declaring: TypeId) -> Option<ElementHandle> {
        let binding = self.graph.declaration_of(binding);
        if self.graph.is_defined_in_same_unit(scope, declaring) {
            return self.structure()?.handle_of(binding).cloned();
        }
        let key = self.graph.binding_key(binding);
        self.projector
            .project(self.graph, binding)
            .map(|handle| handle.resolved(&key))
    }
}
