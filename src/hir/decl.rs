//! Declaration tree of the compilation unit under completion.
//!
//! This is the parser-side view: one node per type, field, initializer and
//! method with its source ranges and, once resolution got that far, the
//! binding it produced. The structural notifier replays it to build stable
//! element handles.

use smol_str::SmolStr;

use super::ids::{FieldId, MethodId, TypeId};
use crate::base::{TextRange, TextSize, UnitId};

/// What kind of root the completion runs in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeRootKind {
    /// An editable source unit; structural handles can be built for it.
    #[default]
    CompilationUnit,
    /// Attached source of a compiled class; no structural view exists.
    ClassFile,
}

#[derive(Clone, Debug)]
pub struct CompilationUnitDecl {
    pub unit: UnitId,
    pub root_kind: TypeRootKind,
    pub range: TextRange,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnitDecl {
    pub fn new(unit: UnitId, range: TextRange) -> Self {
        Self {
            unit,
            root_kind: TypeRootKind::CompilationUnit,
            range,
            types: Vec::new(),
        }
    }

    pub fn with_root_kind(mut self, root_kind: TypeRootKind) -> Self {
        self.root_kind = root_kind;
        self
    }

    pub fn with_type(mut self, ty: TypeDecl) -> Self {
        self.types.push(ty);
        self
    }

    /// The declaration of `ty`, searching member types too.
    pub fn find_type(&self, ty: TypeId) -> Option<&TypeDecl> {
        self.types.iter().find_map(|decl| decl.find_type(ty))
    }
}

#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub name: SmolStr,
    pub binding: Option<TypeId>,
    pub range: TextRange,
    pub name_range: TextRange,
    pub fields: Vec<FieldDecl>,
    pub initializers: Vec<InitializerDecl>,
    pub methods: Vec<MethodDecl>,
    pub member_types: Vec<TypeDecl>,
}

impl TypeDecl {
    pub fn new(name: &str, binding: Option<TypeId>, range: TextRange, name_range: TextRange) -> Self {
        Self {
            name: SmolStr::new(name),
            binding,
            range,
            name_range,
            fields: Vec::new(),
            initializers: Vec::new(),
            methods: Vec::new(),
            member_types: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_initializer(mut self, initializer: InitializerDecl) -> Self {
        self.initializers.push(initializer);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_member_type(mut self, ty: TypeDecl) -> Self {
        self.member_types.push(ty);
        self
    }

    fn find_type(&self, ty: TypeId) -> Option<&TypeDecl> {
        if self.binding == Some(ty) {
            return Some(self);
        }
        self.member_types.iter().find_map(|decl| decl.find_type(ty))
    }

    /// Whether `node` sits in code run by an initializer block or a field
    /// initialization of this type.
    pub fn contains_initializer_code(&self, node: TextRange) -> bool {
        let in_block = self
            .initializers
            .iter()
            .any(|init| init.block_start <= node.start() && node.start() < init.body_end);
        in_block
            || self.fields.iter().any(|field| {
                field.initialization.is_some_and(|init| {
                    init.start() <= node.start() && node.end() <= init.end()
                })
            })
    }
}

#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub name: SmolStr,
    pub binding: Option<FieldId>,
    pub range: TextRange,
    pub name_range: TextRange,
    pub initialization: Option<TextRange>,
}

impl FieldDecl {
    pub fn new(name: &str, binding: Option<FieldId>, range: TextRange, name_range: TextRange) -> Self {
        Self {
            name: SmolStr::new(name),
            binding,
            range,
            name_range,
            initialization: None,
        }
    }

    pub fn initialized_by(mut self, initialization: TextRange) -> Self {
        self.initialization = Some(initialization);
        self
    }
}

/// A `{ ... }` or `static { ... }` block in a type body.
#[derive(Clone, Debug)]
pub struct InitializerDecl {
    /// From the `static` keyword (if any) to the closing brace.
    pub range: TextRange,
    pub block_start: TextSize,
    pub body_end: TextSize,
    pub is_static: bool,
}

impl InitializerDecl {
    pub fn new(range: TextRange, is_static: bool) -> Self {
        Self {
            range,
            block_start: range.start(),
            body_end: range.end(),
            is_static,
        }
    }

    pub fn with_block(mut self, block_start: TextSize, body_end: TextSize) -> Self {
        self.block_start = block_start;
        self.body_end = body_end;
        self
    }
}

#[derive(Clone, Debug)]
pub struct MethodDecl {
    pub name: SmolStr,
    pub binding: Option<MethodId>,
    pub range: TextRange,
    pub name_range: TextRange,
}

impl MethodDecl {
    pub fn new(name: &str, binding: Option<MethodId>, range: TextRange, name_range: TextRange) -> Self {
        Self {
            name: SmolStr::new(name),
            binding,
            range,
            name_range,
        }
    }
}
