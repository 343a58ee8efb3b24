//! Element handles - stable, equality-comparable identities for
//! declarations, independent of the binding graph they were derived from.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::TextRange;

/// Kind of element a handle names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    PackageFragment,
    CompilationUnit,
    ClassFile,
    Type,
    Field,
    Method,
    Initializer,
    LocalVariable,
}

/// Source details carried by a local-variable handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalVariableInfo {
    pub declaration_range: TextRange,
    pub name_range: TextRange,
    pub type_signature: SmolStr,
    pub annotations: Vec<SmolStr>,
}

/// A stable identity for a declaration.
///
/// Handles compare by value: two handles built independently for the same
/// declaration are equal. Cloning is a reference-count bump.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(Arc<HandleData>);

#[derive(PartialEq, Eq, Hash)]
struct HandleData {
    kind: ElementKind,
    name: SmolStr,
    parent: Option<ElementHandle>,
    /// Parameter type signatures, methods only.
    parameter_types: Vec<SmolStr>,
    /// Distinguishes same-named siblings; initializers count from 1.
    occurrence: u32,
    local: Option<LocalVariableInfo>,
    /// Binding key the handle was resolved against.
    key: Option<SmolStr>,
}

impl ElementHandle {
    fn build(kind: ElementKind, name: &str, parent: Option<&ElementHandle>) -> HandleData {
        HandleData {
            kind,
            name: SmolStr::new(name),
            parent: parent.cloned(),
            parameter_types: Vec::new(),
            occurrence: 1,
            local: None,
            key: None,
        }
    }

    pub fn package_fragment(name: &str) -> Self {
        Self(Arc::new(Self::build(ElementKind::PackageFragment, name, None)))
    }

    pub fn compilation_unit(package: &ElementHandle, name: &str) -> Self {
        Self(Arc::new(Self::build(ElementKind::CompilationUnit, name, Some(package))))
    }

    pub fn class_file(package: &ElementHandle, name: &str) -> Self {
        Self(Arc::new(Self::build(ElementKind::ClassFile, name, Some(package))))
    }

    pub fn ty(parent: &ElementHandle, name: &str) -> Self {
        Self(Arc::new(Self::build(ElementKind::Type, name, Some(parent))))
    }

    pub fn field(parent: &ElementHandle, name: &str) -> Self {
        Self(Arc::new(Self::build(ElementKind::Field, name, Some(parent))))
    }

    pub fn method(parent: &ElementHandle, name: &str, parameter_types: Vec<SmolStr>) -> Self {
        let mut data = Self::build(ElementKind::Method, name, Some(parent));
        data.parameter_types = parameter_types;
        Self(Arc::new(data))
    }

    pub fn initializer(parent: &ElementHandle, occurrence: u32) -> Self {
        let mut data = Self::build(ElementKind::Initializer, "", Some(parent));
        data.occurrence = occurrence;
        Self(Arc::new(data))
    }

    pub fn local_variable(parent: &ElementHandle, name: &str, info: LocalVariableInfo) -> Self {
        let mut data = Self::build(ElementKind::LocalVariable, name, Some(parent));
        data.local = Some(info);
        Self(Arc::new(data))
    }

    /// The same element, distinguished from earlier same-named siblings.
    pub fn with_occurrence(&self, occurrence: u32) -> Self {
        self.rebuild(|data| data.occurrence = occurrence)
    }

    /// The same element, stamped as resolved against binding `key`.
    pub fn resolved(&self, key: &str) -> Self {
        self.rebuild(|data| data.key = Some(SmolStr::new(key)))
    }

    fn rebuild(&self, edit: impl FnOnce(&mut HandleData)) -> Self {
        let current = &self.0;
        let mut data = HandleData {
            kind: current.kind,
            name: current.name.clone(),
            parent: current.parent.clone(),
            parameter_types: current.parameter_types.clone(),
            occurrence: current.occurrence,
            local: current.local.clone(),
            key: current.key.clone(),
        };
        edit(&mut data);
        Self(Arc::new(data))
    }

    pub fn kind(&self) -> ElementKind {
        self.0.kind
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&ElementHandle> {
        self.0.parent.as_ref()
    }

    /// Parents from the nearest outwards.
    pub fn ancestors(&self) -> impl Iterator<Item = &ElementHandle> {
        std::iter::successors(self.parent(), |h| h.parent())
    }

    /// The nearest enclosing handle of `kind`, `self` excluded.
    pub fn ancestor_of_kind(&self, kind: ElementKind) -> Option<&ElementHandle> {
        self.ancestors().find(|h| h.kind() == kind)
    }

    pub fn parameter_types(&self) -> &[SmolStr] {
        &self.0.parameter_types
    }

    pub fn occurrence(&self) -> u32 {
        self.0.occurrence
    }

    pub fn local_info(&self) -> Option<&LocalVariableInfo> {
        self.0.local.as_ref()
    }

    pub fn key(&self) -> Option<&str> {
        self.0.key.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.0.key.is_some()
    }

    fn segment(&self) -> String {
        match self.kind() {
            ElementKind::Method => format!("{}({})", self.name(), self.parameter_types().join("")),
            ElementKind::Initializer => format!("<init#{}>", self.occurrence()),
            _ if self.occurrence() > 1 => format!("{}#{}", self.name(), self.occurrence()),
            _ => self.name().to_string(),
        }
    }
}

impl fmt::Display for ElementHandle {
    /// Outermost first: `p/Main.java/Main/run()/count`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<String> = self.ancestors().map(|h| h.segment()).collect();
        segments.reverse();
        segments.push(self.segment());
        write!(f, "{}", segments.join("/"))
    }
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind(), self)
    }
}
