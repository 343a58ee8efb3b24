//! The binding graph: an arena holding every type, member, local, scope and
//! import the surrounding compiler resolved for one compilation pass.
//!
//! Handles ([`TypeId`], [`FieldId`], ...) index into the arena. The
//! completion engine borrows the graph immutably for the whole request; all
//! construction happens up front through the `add_*` methods.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::{SmolStr, format_smolstr};

use super::bindings::{
    BindingRef, FieldBinding, LocalBinding, LocalDeclaration, MethodBinding, Modifiers,
    PrimitiveKind, TypeArgument, TypeBinding, TypeKind, TypeOrigin,
};
use super::ids::{FieldId, ImportId, LocalId, MethodId, ScopeId, TypeId};
use super::scope::{ImportBinding, MethodContext, ReferenceContext, Scope, ScopeKind};
use crate::base::{Interner, Name, UnitId};

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
pub const JAVA_LANG_STRING: &str = "java.lang.String";

/// A compilation unit known to the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitInfo {
    /// File name, e.g. `Main.java`.
    pub name: SmolStr,
    /// Dotted package name, empty for the default package.
    pub package: SmolStr,
}

// ============================================================================
// CONSTRUCTION HELPERS
// ============================================================================

/// Description of a class, interface or enum to add with
/// [`BindingGraph::add_type`].
#[derive(Clone, Debug)]
pub struct NewType {
    name: SmolStr,
    package: Option<SmolStr>,
    kind: TypeKind,
    modifiers: Modifiers,
    origin: TypeOrigin,
    enclosing: Option<TypeId>,
    superclass: Option<TypeId>,
    superinterfaces: Vec<TypeId>,
}

impl NewType {
    fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: SmolStr::new(name),
            package: None,
            kind,
            modifiers: Modifiers::empty(),
            origin: TypeOrigin::Binary,
            enclosing: None,
            superclass: None,
            superinterfaces: Vec::new(),
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: &str) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn enumeration(name: &str) -> Self {
        Self::new(name, TypeKind::Enum)
    }

    pub fn package(mut self, package: &str) -> Self {
        self.package = Some(SmolStr::new(package));
        self
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Declared in source unit `unit`; the package defaults to the unit's.
    pub fn in_unit(mut self, unit: UnitId) -> Self {
        self.origin = TypeOrigin::Source(unit);
        self
    }

    /// Referenced but unavailable.
    pub fn missing(mut self) -> Self {
        self.origin = TypeOrigin::Missing;
        self
    }

    /// Member type of `outer`; origin and package follow the outer type.
    pub fn nested_in(mut self, outer: TypeId) -> Self {
        self.enclosing = Some(outer);
        self
    }

    pub fn extends(mut self, superclass: TypeId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeId) -> Self {
        self.superinterfaces.push(interface);
        self
    }
}

/// Description of a method or constructor to add with
/// [`BindingGraph::add_method`].
#[derive(Clone, Debug)]
pub struct NewMethod {
    selector: SmolStr,
    return_type: Option<TypeId>,
    parameters: Vec<TypeId>,
    type_variables: Vec<TypeId>,
    modifiers: Modifiers,
    is_constructor: bool,
}

impl NewMethod {
    /// A method returning `void` unless [`returns`](Self::returns) says otherwise.
    pub fn new(selector: &str) -> Self {
        Self {
            selector: SmolStr::new(selector),
            return_type: None,
            parameters: Vec::new(),
            type_variables: Vec::new(),
            modifiers: Modifiers::empty(),
            is_constructor: false,
        }
    }

    pub fn constructor() -> Self {
        Self {
            is_constructor: true,
            ..Self::new("<init>")
        }
    }

    pub fn returns(mut self, ty: TypeId) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn param(mut self, ty: TypeId) -> Self {
        self.parameters.push(ty);
        self
    }

    pub fn type_variable(mut self, variable: TypeId) -> Self {
        self.type_variables.push(variable);
        self
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

// ============================================================================
// BINDING GRAPH
// ============================================================================

#[derive(Debug)]
pub struct BindingGraph {
    interner: Interner,
    units: Vec<UnitInfo>,
    types: Vec<TypeBinding>,
    fields: Vec<FieldBinding>,
    methods: Vec<MethodBinding>,
    locals: Vec<LocalBinding>,
    scopes: Vec<Scope>,
    imports: Vec<ImportBinding>,
    /// Declared types by dotted binary name.
    by_qualified_name: FxHashMap<SmolStr, TypeId>,
    primitives: FxHashMap<PrimitiveKind, TypeId>,
    null_type: TypeId,
    instantiations: FxHashMap<(TypeId, Vec<TypeArgument>), TypeId>,
    /// Instantiations carrying their own substituted supertypes and members.
    expanded: FxHashSet<TypeId>,
    arrays: FxHashMap<TypeId, TypeId>,
}

impl Default for BindingGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingGraph {
    /// An empty graph holding only the primitive and null types.
    pub fn new() -> Self {
        let mut graph = Self {
            interner: Interner::new(),
            units: Vec::new(),
            types: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            locals: Vec::new(),
            scopes: Vec::new(),
            imports: Vec::new(),
            by_qualified_name: FxHashMap::default(),
            primitives: FxHashMap::default(),
            null_type: TypeId(0),
            instantiations: FxHashMap::default(),
            expanded: FxHashSet::default(),
            arrays: FxHashMap::default(),
        };
        for kind in PrimitiveKind::ALL {
            let id = graph.push_derived(kind.keyword(), TypeKind::Primitive(kind), None, Vec::new());
            graph.primitives.insert(kind, id);
        }
        graph.null_type = graph.push_derived("null", TypeKind::Null, None, Vec::new());
        graph
    }

    /// A graph pre-populated with the binary `java.lang.Object` and
    /// `java.lang.String` types, plus the `Cloneable` / `Serializable`
    /// interfaces every array implements.
    pub fn with_java_lang() -> Self {
        let mut graph = Self::new();
        let object = graph.add_type(
            NewType::class("Object")
                .package("java.lang")
                .modifiers(Modifiers::PUBLIC),
        );
        graph.add_type(
            NewType::interface("Cloneable")
                .package("java.lang")
                .modifiers(Modifiers::PUBLIC),
        );
        graph.add_type(
            NewType::interface("Serializable")
                .package("java.io")
                .modifiers(Modifiers::PUBLIC),
        );
        graph.add_type(
            NewType::class("String")
                .package("java.lang")
                .modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
                .extends(object),
        );
        graph
    }

    fn push_type(&mut self, binding: TypeBinding) -> TypeId {
        let id = TypeId::from_index(self.types.len());
        self.types.push(binding);
        id
    }

    fn push_derived(
        &mut self,
        name: &str,
        kind: TypeKind,
        superclass: Option<TypeId>,
        superinterfaces: Vec<TypeId>,
    ) -> TypeId {
        let binding = TypeBinding {
            name: self.interner.intern(name),
            qualified_name: SmolStr::new(name),
            package: SmolStr::default(),
            kind,
            modifiers: Modifiers::PUBLIC,
            origin: TypeOrigin::Derived,
            enclosing: None,
            superclass,
            superinterfaces,
            fields: Vec::new(),
            methods: Vec::new(),
            type_variables: Vec::new(),
            valid: true,
        };
        self.push_type(binding)
    }

    pub fn add_unit(&mut self, name: &str, package: &str) -> UnitId {
        let id = UnitId::new(self.units.len() as u32);
        self.units.push(UnitInfo {
            name: SmolStr::new(name),
            package: SmolStr::new(package),
        });
        id
    }

    /// Add a class, interface or enum.
    ///
    /// Classes and enums without an explicit superclass extend
    /// `java.lang.Object` when the graph has one.
    pub fn add_type(&mut self, new: NewType) -> TypeId {
        let (origin, package) = match new.enclosing {
            Some(outer) => {
                let outer = &self.types[outer.index()];
                (outer.origin, outer.package.clone())
            }
            None => {
                let package = match (&new.package, new.origin) {
                    (Some(package), _) => package.clone(),
                    (None, TypeOrigin::Source(unit)) => self.units[unit.index()].package.clone(),
                    (None, _) => SmolStr::default(),
                };
                (new.origin, package)
            }
        };
        let qualified_name = match new.enclosing {
            Some(outer) => format_smolstr!("{}${}", self.types[outer.index()].qualified_name, new.name),
            None if package.is_empty() => new.name.clone(),
            None => format_smolstr!("{}.{}", package, new.name),
        };

        let superclass = match (&new.kind, new.superclass) {
            (_, Some(explicit)) => Some(explicit),
            (TypeKind::Class | TypeKind::Enum, None) if qualified_name != JAVA_LANG_OBJECT => {
                self.object()
            }
            _ => None,
        };

        let binding = TypeBinding {
            name: self.interner.intern(&new.name),
            qualified_name: qualified_name.clone(),
            package,
            kind: new.kind,
            modifiers: new.modifiers,
            origin,
            enclosing: new.enclosing,
            superclass,
            superinterfaces: new.superinterfaces,
            fields: Vec::new(),
            methods: Vec::new(),
            type_variables: Vec::new(),
            valid: true,
        };
        let id = self.push_type(binding);
        self.by_qualified_name.insert(qualified_name, id);
        id
    }

    pub fn set_superclass(&mut self, ty: TypeId, superclass: Option<TypeId>) {
        self.types[ty.index()].superclass = superclass;
    }

    pub fn add_superinterface(&mut self, ty: TypeId, interface: TypeId) {
        self.types[ty.index()].superinterfaces.push(interface);
    }

    /// A type variable bounded by `bounds`; a leading class bound becomes
    /// its superclass, the remaining bounds its superinterfaces.
    pub fn add_type_variable(&mut self, name: &str, bounds: &[TypeId]) -> TypeId {
        let (superclass, interfaces) = self.split_bounds(bounds);
        self.push_derived(name, TypeKind::TypeVariable, superclass, interfaces)
    }

    /// Declare `variable` as a type parameter of the generic type `owner`.
    pub fn declare_type_variable(&mut self, owner: TypeId, variable: TypeId) {
        self.types[owner.index()].type_variables.push(variable);
    }

    /// An intersection `A & I1 & I2` used as a receiver (e.g. for a bounded
    /// type variable that was captured).
    pub fn add_intersection(&mut self, constituents: &[TypeId]) -> TypeId {
        let (superclass, interfaces) = self.split_bounds(constituents);
        let name = constituents
            .iter()
            .map(|c| self.types[c.index()].qualified_name.as_str())
            .collect::<Vec<_>>()
            .join(" & ");
        self.push_derived(&name, TypeKind::Intersection, superclass, interfaces)
    }

    fn split_bounds(&self, bounds: &[TypeId]) -> (Option<TypeId>, Vec<TypeId>) {
        match bounds.split_first() {
            Some((first, rest)) if !self.is_interface(*first) => {
                (Some(*first), rest.to_vec())
            }
            _ => (self.object(), bounds.to_vec()),
        }
    }

    /// The instantiation `generic<arguments>`, created once per distinct
    /// argument list.
    ///
    /// Its supertypes and members are those of the generic declaration with
    /// every type variable replaced by the matching argument. Members added
    /// to the declaration later are substituted as they arrive.
    pub fn parameterize(&mut self, generic: TypeId, arguments: &[TypeArgument]) -> TypeId {
        let id = self.intern_instantiation(generic, arguments);
        self.expand_instantiation(id);
        id
    }

    /// The instantiation `generic<arguments>` without substituted members;
    /// until expanded it exposes the declaration's own.
    fn intern_instantiation(&mut self, generic: TypeId, arguments: &[TypeArgument]) -> TypeId {
        let key = (generic, arguments.to_vec());
        if let Some(&existing) = self.instantiations.get(&key) {
            return existing;
        }
        let declaration = &self.types[generic.index()];
        let rendered = arguments
            .iter()
            .map(|argument| self.render_argument(*argument))
            .collect::<Vec<_>>()
            .join(",");
        let binding = TypeBinding {
            name: declaration.name,
            qualified_name: format_smolstr!("{}<{}>", declaration.qualified_name, rendered),
            package: declaration.package.clone(),
            kind: TypeKind::Parameterized {
                generic,
                arguments: arguments.to_vec(),
            },
            modifiers: declaration.modifiers,
            origin: TypeOrigin::Derived,
            enclosing: declaration.enclosing,
            superclass: declaration.superclass,
            superinterfaces: declaration.superinterfaces.clone(),
            fields: Vec::new(),
            methods: Vec::new(),
            type_variables: Vec::new(),
            valid: declaration.valid,
        };
        let id = self.push_type(binding);
        self.instantiations.insert(key, id);
        id
    }

    // ========================================================================
    // SUBSTITUTION
    // ========================================================================

    /// Type variables of the generic declaration paired with the arguments
    /// of the instantiation `ty`; empty for any other type.
    pub fn substitution(&self, ty: TypeId) -> Vec<(TypeId, TypeArgument)> {
        match &self.ty(ty).kind {
            TypeKind::Parameterized { generic, arguments } => self
                .ty(*generic)
                .type_variables
                .iter()
                .copied()
                .zip(arguments.iter().copied())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `ty` with every variable of `substitution` replaced. A wildcard
    /// argument stands for its upper bound.
    fn substitute(&mut self, ty: TypeId, substitution: &[(TypeId, TypeArgument)]) -> TypeId {
        if let Some((variable, argument)) = substitution.iter().find(|(v, _)| *v == ty) {
            return match *argument {
                TypeArgument::Type(t) | TypeArgument::Extends(t) => t,
                TypeArgument::Unbounded | TypeArgument::Super(_) => self.erasure(*variable),
            };
        }
        match self.types[ty.index()].kind.clone() {
            TypeKind::Parameterized { generic, arguments } => {
                let substituted: Vec<_> = arguments
                    .iter()
                    .map(|a| self.substitute_argument(*a, substitution))
                    .collect();
                if substituted == arguments {
                    ty
                } else {
                    // Nested instantiations stay unexpanded so self-referential
                    // generics terminate
                    self.intern_instantiation(generic, &substituted)
                }
            }
            TypeKind::Array { component } => {
                let substituted = self.substitute(component, substitution);
                if substituted == component {
                    ty
                } else {
                    self.array_of(substituted)
                }
            }
            _ => ty,
        }
    }

    fn substitute_argument(
        &mut self,
        argument: TypeArgument,
        substitution: &[(TypeId, TypeArgument)],
    ) -> TypeArgument {
        match argument {
            TypeArgument::Type(t) => TypeArgument::Type(self.substitute(t, substitution)),
            TypeArgument::Extends(t) => TypeArgument::Extends(self.substitute(t, substitution)),
            TypeArgument::Super(t) => TypeArgument::Super(self.substitute(t, substitution)),
            TypeArgument::Unbounded => TypeArgument::Unbounded,
        }
    }

    /// Give the instantiation `ty` substituted supertypes and members.
    fn expand_instantiation(&mut self, ty: TypeId) {
        let Some(generic) = self.types[ty.index()].generic() else {
            return;
        };
        if !self.expanded.insert(ty) {
            return;
        }
        let substitution = self.substitution(ty);
        let declaration = &self.types[generic.index()];
        let superclass = declaration.superclass;
        let superinterfaces = declaration.superinterfaces.clone();
        let fields = declaration.fields.clone();
        let methods = declaration.methods.clone();

        let superclass = superclass.map(|s| self.substitute_supertype(s, &substitution));
        let superinterfaces = superinterfaces
            .into_iter()
            .map(|i| self.substitute_supertype(i, &substitution))
            .collect();
        let binding = &mut self.types[ty.index()];
        binding.superclass = superclass;
        binding.superinterfaces = superinterfaces;

        for field in fields {
            self.instantiate_field(ty, field, &substitution);
        }
        for method in methods {
            self.instantiate_method(ty, method, &substitution);
        }
    }

    fn substitute_supertype(&mut self, ty: TypeId, substitution: &[(TypeId, TypeArgument)]) -> TypeId {
        let substituted = self.substitute(ty, substitution);
        self.expand_instantiation(substituted);
        substituted
    }

    fn instantiate_field(&mut self, holder: TypeId, field: FieldId, substitution: &[(TypeId, TypeArgument)]) {
        let declaration = self.fields[field.index()].clone();
        let ty = self.substitute(declaration.ty, substitution);
        let id = FieldId::from_index(self.fields.len());
        self.fields.push(FieldBinding {
            ty,
            original: Some(field),
            ..declaration
        });
        self.types[holder.index()].fields.push(id);
    }

    fn instantiate_method(&mut self, holder: TypeId, method: MethodId, substitution: &[(TypeId, TypeArgument)]) {
        let declaration = self.methods[method.index()].clone();
        let return_type = self.substitute(declaration.return_type, substitution);
        let parameters = declaration
            .parameters
            .iter()
            .map(|p| self.substitute(*p, substitution))
            .collect();
        let id = MethodId::from_index(self.methods.len());
        self.methods.push(MethodBinding {
            return_type,
            parameters,
            original: Some(method),
            ..declaration
        });
        self.types[holder.index()].methods.push(id);
    }

    fn expanded_instantiations_of(&self, generic: TypeId) -> Vec<TypeId> {
        self.instantiations
            .iter()
            .filter(|((g, _), id)| *g == generic && self.expanded.contains(*id))
            .map(|(_, id)| *id)
            .collect()
    }

    fn render_argument(&self, argument: TypeArgument) -> String {
        match argument {
            TypeArgument::Type(t) => self.types[t.index()].qualified_name.to_string(),
            TypeArgument::Unbounded => "?".to_string(),
            TypeArgument::Extends(t) => format!("? extends {}", self.types[t.index()].qualified_name),
            TypeArgument::Super(t) => format!("? super {}", self.types[t.index()].qualified_name),
        }
    }

    /// The array type `component[]`, created once per component.
    pub fn array_of(&mut self, component: TypeId) -> TypeId {
        if let Some(&existing) = self.arrays.get(&component) {
            return existing;
        }
        let name = format!("{}[]", self.types[component.index()].qualified_name);
        let interfaces = ["java.lang.Cloneable", "java.io.Serializable"]
            .into_iter()
            .filter_map(|q| self.type_named(q))
            .collect();
        let id = self.push_derived(&name, TypeKind::Array { component }, self.object(), interfaces);
        self.arrays.insert(component, id);
        id
    }

    pub fn add_field(&mut self, declaring: TypeId, name: &str, ty: TypeId, modifiers: Modifiers) -> FieldId {
        let id = FieldId::from_index(self.fields.len());
        self.fields.push(FieldBinding {
            name: self.interner.intern(name),
            declaring,
            ty,
            modifiers,
            original: None,
            valid: true,
        });
        self.types[declaring.index()].fields.push(id);
        for instantiation in self.expanded_instantiations_of(declaring) {
            let substitution = self.substitution(instantiation);
            self.instantiate_field(instantiation, id, &substitution);
        }
        id
    }

    pub fn add_method(&mut self, declaring: TypeId, new: NewMethod) -> MethodId {
        let return_type = new
            .return_type
            .unwrap_or_else(|| self.primitive(PrimitiveKind::Void));
        let selector = if new.is_constructor {
            self.types[declaring.index()].name
        } else {
            self.interner.intern(&new.selector)
        };
        let id = MethodId::from_index(self.methods.len());
        self.methods.push(MethodBinding {
            selector,
            declaring,
            return_type,
            parameters: new.parameters,
            type_variables: new.type_variables,
            modifiers: new.modifiers,
            is_constructor: new.is_constructor,
            original: None,
            valid: true,
        });
        self.types[declaring.index()].methods.push(id);
        for instantiation in self.expanded_instantiations_of(declaring) {
            let substitution = self.substitution(instantiation);
            self.instantiate_method(instantiation, id, &substitution);
        }
        id
    }

    /// Mark a binding as a problem binding left by failed resolution.
    /// Substituted copies of a member follow their declaration.
    pub fn invalidate(&mut self, binding: BindingRef) {
        match binding {
            BindingRef::Type(t) => self.types[t.index()].valid = false,
            BindingRef::Field(f) => {
                for field in &mut self.fields {
                    if field.original == Some(f) {
                        field.valid = false;
                    }
                }
                self.fields[f.index()].valid = false;
            }
            BindingRef::Method(m) => {
                for method in &mut self.methods {
                    if method.original == Some(m) {
                        method.valid = false;
                    }
                }
                self.methods[m.index()].valid = false;
            }
        }
    }

    pub fn add_scope(&mut self, parent: Option<ScopeId>, kind: ScopeKind) -> ScopeId {
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(Scope { parent, kind });
        id
    }

    pub fn add_unit_scope(&mut self, unit: UnitId) -> ScopeId {
        self.add_scope(
            None,
            ScopeKind::CompilationUnit {
                unit,
                imports: Vec::new(),
            },
        )
    }

    pub fn add_class_scope(&mut self, parent: ScopeId, ty: TypeId) -> ScopeId {
        self.add_scope(Some(parent), ScopeKind::Class { ty })
    }

    pub fn add_method_scope(&mut self, parent: ScopeId, context: MethodContext, is_static: bool) -> ScopeId {
        self.add_scope(
            Some(parent),
            ScopeKind::Method {
                context,
                locals: Vec::new(),
                is_static,
                is_constructor_call: false,
            },
        )
    }

    pub fn add_block_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.add_scope(Some(parent), ScopeKind::Block { locals: Vec::new() })
    }

    /// Flag a method scope as lying inside an explicit constructor call.
    pub fn set_constructor_call(&mut self, scope: ScopeId) {
        if let ScopeKind::Method {
            is_constructor_call, ..
        } = &mut self.scopes[scope.index()].kind
        {
            *is_constructor_call = true;
        }
    }

    /// Declare a local in a block or method scope. Locals added to class or
    /// unit scopes are recorded but never visible.
    pub fn add_local(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: TypeId,
        declaration: LocalDeclaration,
    ) -> LocalId {
        self.push_local(scope, name, ty, declaration, false)
    }

    /// A compiler-introduced temporary.
    pub fn add_secret_local(&mut self, scope: ScopeId, name: &str, ty: TypeId) -> LocalId {
        self.push_local(scope, name, ty, LocalDeclaration::default(), true)
    }

    fn push_local(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: TypeId,
        declaration: LocalDeclaration,
        secret: bool,
    ) -> LocalId {
        let id = LocalId::from_index(self.locals.len());
        self.locals.push(LocalBinding {
            name: self.interner.intern(name),
            ty,
            declaring_scope: scope,
            secret,
            declaration,
        });
        match &mut self.scopes[scope.index()].kind {
            ScopeKind::Block { locals } | ScopeKind::Method { locals, .. } => locals.push(id),
            ScopeKind::Class { .. } | ScopeKind::CompilationUnit { .. } => {}
        }
        id
    }

    /// Record an import on a compilation-unit scope.
    pub fn add_import(&mut self, unit_scope: ScopeId, import: ImportBinding) -> ImportId {
        let id = ImportId::from_index(self.imports.len());
        self.imports.push(import);
        if let ScopeKind::CompilationUnit { imports, .. } = &mut self.scopes[unit_scope.index()].kind {
            imports.push(id);
        }
        id
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Intern `text` in this graph's interner.
    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn text(&self, name: Name) -> SmolStr {
        self.interner.text(name)
    }

    pub fn unit(&self, id: UnitId) -> &UnitInfo {
        &self.units[id.index()]
    }

    pub fn ty(&self, id: TypeId) -> &TypeBinding {
        &self.types[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldBinding {
        &self.fields[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodBinding {
        &self.methods[id.index()]
    }

    pub fn local(&self, id: LocalId) -> &LocalBinding {
        &self.locals[id.index()]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn import(&self, id: ImportId) -> &ImportBinding {
        &self.imports[id.index()]
    }

    pub fn type_named(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_qualified_name.get(qualified_name).copied()
    }

    pub fn object(&self) -> Option<TypeId> {
        self.type_named(JAVA_LANG_OBJECT)
    }

    pub fn primitive(&self, kind: PrimitiveKind) -> TypeId {
        self.primitives[&kind]
    }

    pub fn null_type(&self) -> TypeId {
        self.null_type
    }

    pub fn find_instantiation(&self, generic: TypeId, arguments: &[TypeArgument]) -> Option<TypeId> {
        self.instantiations.get(&(generic, arguments.to_vec())).copied()
    }

    pub fn find_array(&self, component: TypeId) -> Option<TypeId> {
        self.arrays.get(&component).copied()
    }

    // ========================================================================
    // HIERARCHY QUERIES
    // ========================================================================

    pub fn superclass(&self, ty: TypeId) -> Option<TypeId> {
        self.ty(ty).superclass
    }

    pub fn superinterfaces(&self, ty: TypeId) -> &[TypeId] {
        &self.ty(ty).superinterfaces
    }

    /// The generic declaration of an instantiation, `ty` itself otherwise.
    fn member_source(&self, ty: TypeId) -> TypeId {
        self.ty(ty).generic().unwrap_or(ty)
    }

    /// The type holding the member lists `ty` exposes: an expanded
    /// instantiation holds substituted copies of its declaration's.
    fn member_holder(&self, ty: TypeId) -> TypeId {
        if self.expanded.contains(&ty) {
            ty
        } else {
            self.member_source(ty)
        }
    }

    /// Whether `ty` is an interface or an instantiation of one.
    pub fn is_interface(&self, ty: TypeId) -> bool {
        self.ty(self.member_source(ty)).is_interface()
    }

    /// The declared member a substituted copy stands for; any other binding
    /// is returned as is.
    pub fn declaration_of(&self, binding: BindingRef) -> BindingRef {
        match binding {
            BindingRef::Field(f) => BindingRef::Field(self.field(f).original.unwrap_or(f)),
            BindingRef::Method(m) => BindingRef::Method(self.method(m).original.unwrap_or(m)),
            BindingRef::Type(_) => binding,
        }
    }

    /// Fields declared directly on `ty`, problem bindings excluded.
    pub fn available_fields(&self, ty: TypeId) -> impl Iterator<Item = FieldId> + '_ {
        self.ty(self.member_holder(ty))
            .fields
            .iter()
            .copied()
            .filter(|f| self.field(*f).valid)
    }

    /// Methods and constructors declared directly on `ty`, problem bindings
    /// excluded.
    pub fn available_methods(&self, ty: TypeId) -> impl Iterator<Item = MethodId> + '_ {
        self.ty(self.member_holder(ty))
            .methods
            .iter()
            .copied()
            .filter(|m| self.method(*m).valid)
    }

    /// Every valid method of `ty` named `selector`, in declaration order.
    pub fn methods_named(&self, ty: TypeId, selector: Name) -> Vec<MethodId> {
        self.available_methods(ty)
            .filter(|m| self.method(*m).selector == selector)
            .collect()
    }

    pub fn outermost_type(&self, ty: TypeId) -> TypeId {
        let mut current = self.member_source(ty);
        while let Some(outer) = self.ty(current).enclosing {
            current = outer;
        }
        current
    }

    // ========================================================================
    // SCOPE QUERIES
    // ========================================================================

    /// Iterate from `scope` to the root, `scope` included.
    pub fn scope_chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |s| self.scope(*s).parent)
    }

    /// The declaration the innermost method or class level belongs to.
    pub fn reference_context(&self, scope: ScopeId) -> Option<ReferenceContext> {
        self.scope_chain(scope).find_map(|s| match &self.scope(s).kind {
            ScopeKind::Block { .. } => None,
            ScopeKind::Method { context, .. } => Some(match context {
                MethodContext::Method(m) => ReferenceContext::Method(*m),
                MethodContext::Initializer(t) => ReferenceContext::Type(*t),
            }),
            ScopeKind::Class { ty } => Some(ReferenceContext::Type(*ty)),
            ScopeKind::CompilationUnit { unit, .. } => Some(ReferenceContext::Unit(*unit)),
        })
    }

    pub fn enclosing_class_scope(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scope_chain(scope)
            .find(|s| matches!(self.scope(*s).kind, ScopeKind::Class { .. }))
    }

    /// The innermost type whose body contains `scope`.
    pub fn enclosing_source_type(&self, scope: ScopeId) -> Option<TypeId> {
        self.enclosing_class_scope(scope)
            .and_then(|s| match self.scope(s).kind {
                ScopeKind::Class { ty } => Some(ty),
                _ => None,
            })
    }

    pub fn unit_scope(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scope_chain(scope).find(|s| self.scope(*s).is_compilation_unit())
    }

    pub fn scope_unit(&self, scope: ScopeId) -> Option<UnitId> {
        self.unit_scope(scope).and_then(|s| match self.scope(s).kind {
            ScopeKind::CompilationUnit { unit, .. } => Some(unit),
            _ => None,
        })
    }

    /// Package the code at `scope` belongs to.
    pub fn scope_package(&self, scope: ScopeId) -> Option<&str> {
        self.scope_unit(scope).map(|u| self.unit(u).package.as_str())
    }

    /// Whether `ty` is declared in the same compilation unit as `scope`.
    pub fn is_defined_in_same_unit(&self, scope: ScopeId, ty: TypeId) -> bool {
        match (self.ty(self.outermost_type(ty)).origin, self.scope_unit(scope)) {
            (TypeOrigin::Source(declared), Some(current)) => declared == current,
            _ => false,
        }
    }

    // ========================================================================
    // SIGNATURES & KEYS
    // ========================================================================

    /// Resolved type signature: `I`, `[Ljava/lang/String;`, `Lp/Box<TT;>;`.
    pub fn type_signature(&self, ty: TypeId) -> String {
        let binding = self.ty(ty);
        match &binding.kind {
            TypeKind::Primitive(kind) => kind.descriptor().to_string(),
            TypeKind::Class | TypeKind::Interface | TypeKind::Enum => {
                format!("L{};", binding.qualified_name.replace('.', "/"))
            }
            TypeKind::Parameterized { generic, arguments } => {
                let base = self.ty(*generic).qualified_name.replace('.', "/");
                let arguments: String = arguments
                    .iter()
                    .map(|argument| match argument {
                        TypeArgument::Type(t) => self.type_signature(*t),
                        TypeArgument::Unbounded => "*".to_string(),
                        TypeArgument::Extends(t) => format!("+{}", self.type_signature(*t)),
                        TypeArgument::Super(t) => format!("-{}", self.type_signature(*t)),
                    })
                    .collect();
                format!("L{}<{}>;", base, arguments)
            }
            TypeKind::Array { component } => format!("[{}", self.type_signature(*component)),
            TypeKind::TypeVariable => format!("T{};", self.text(binding.name)),
            TypeKind::Intersection => match binding.superinterfaces.first() {
                Some(first) if binding.superclass == self.object() => self.type_signature(*first),
                _ => binding
                    .superclass
                    .map(|s| self.type_signature(s))
                    .unwrap_or_default(),
            },
            TypeKind::Null => "N".to_string(),
        }
    }

    /// Stable textual key of a binding; equal keys denote the same binding
    /// across independent projections.
    pub fn binding_key(&self, binding: BindingRef) -> String {
        match binding {
            BindingRef::Type(t) => self.type_signature(t),
            BindingRef::Field(f) => {
                let field = self.field(f);
                format!(
                    "{}.{}){}",
                    self.type_signature(field.declaring),
                    self.text(field.name),
                    self.type_signature(field.ty)
                )
            }
            BindingRef::Method(m) => {
                let method = self.method(m);
                let parameters: String = method
                    .parameters
                    .iter()
                    .map(|p| self.type_signature(*p))
                    .collect();
                format!(
                    "{}.{}({}){}",
                    self.type_signature(method.declaring),
                    self.text(method.selector),
                    parameters,
                    self.type_signature(method.return_type)
                )
            }
        }
    }
}
