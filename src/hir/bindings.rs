//! Resolved bindings: the compiler's view of declared types and members.
//!
//! Bindings are owned by a [`BindingGraph`](super::BindingGraph) and refer to
//! each other through arena handles. The completion engine only reads them.

use bitflags::bitflags;
use smol_str::SmolStr;

use super::ids::{FieldId, MethodId, ScopeId, TypeId};
use crate::base::{Name, TextRange, UnitId};

bitflags! {
    /// Declaration modifiers relevant to visibility.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
        /// Compiler-generated (bridge methods, outer-instance fields, ...).
        const SYNTHETIC = 1 << 6;
        /// Interface method with a body.
        const DEFAULT = 1 << 7;
        /// Unimplemented interface method copied into an abstract class.
        const DEFAULT_ABSTRACT = 1 << 8;
    }
}

impl Modifiers {
    /// No access modifier at all: visible within the declaring package.
    pub fn is_package_private(self) -> bool {
        !self.intersects(Modifiers::PUBLIC | Modifiers::PRIVATE | Modifiers::PROTECTED)
    }
}

// ============================================================================
// TYPES
// ============================================================================

/// Primitive types, `void` included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Void,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }

    /// Single-character descriptor used in type signatures.
    pub fn descriptor(self) -> char {
        match self {
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
            PrimitiveKind::Void => 'V',
        }
    }

    pub fn from_descriptor(c: char) -> Option<Self> {
        PrimitiveKind::ALL.into_iter().find(|p| p.descriptor() == c)
    }

    /// Identity or widening primitive conversion from `self` to `target`.
    pub fn widens_to(self, target: PrimitiveKind) -> bool {
        use PrimitiveKind::*;
        if self == target {
            return self != Void;
        }
        match self {
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short | Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => matches!(target, Double),
            Boolean | Double | Void => false,
        }
    }
}

/// Argument of a parameterized type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    Type(TypeId),
    /// `?`
    Unbounded,
    /// `? extends T`
    Extends(TypeId),
    /// `? super T`
    Super(TypeId),
}

impl TypeArgument {
    pub fn is_wildcard(self) -> bool {
        !matches!(self, TypeArgument::Type(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Class,
    Interface,
    Enum,
    /// Bounds are carried in `superclass` / `superinterfaces`.
    TypeVariable,
    /// Constituents are carried in `superclass` / `superinterfaces`.
    Intersection,
    /// An instantiation of a generic declaration. Members are shared with
    /// the generic declaration.
    Parameterized {
        generic: TypeId,
        arguments: Vec<TypeArgument>,
    },
    Array {
        component: TypeId,
    },
    Null,
}

/// Where a type's definition comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeOrigin {
    /// Declared in a source compilation unit known to the graph.
    Source(UnitId),
    /// Read from compiled class files.
    Binary,
    /// Referenced but not available; looking it up aborts resolution.
    Missing,
    /// Primitives, arrays, type variables, intersections and instantiations.
    Derived,
}

#[derive(Clone, Debug)]
pub struct TypeBinding {
    /// Simple name (`Outer$Inner` members use `Inner`).
    pub name: Name,
    /// Dotted binary name: `java.lang.String`, `p.Outer$Inner`, `int`.
    pub qualified_name: SmolStr,
    pub package: SmolStr,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub origin: TypeOrigin,
    pub enclosing: Option<TypeId>,
    pub superclass: Option<TypeId>,
    pub superinterfaces: Vec<TypeId>,
    pub fields: Vec<FieldId>,
    pub methods: Vec<MethodId>,
    pub type_variables: Vec<TypeId>,
    /// `false` for problem bindings left behind by failed resolution.
    pub valid: bool,
}

impl TypeBinding {
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum)
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class | TypeKind::Enum)
    }

    /// Interfaces are implicitly abstract.
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::ABSTRACT) || self.is_interface()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_type_variable(&self) -> bool {
        matches!(self.kind, TypeKind::TypeVariable)
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self.kind, TypeKind::Intersection)
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self.kind, TypeKind::Parameterized { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array { .. })
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self.kind {
            TypeKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        !matches!(self.kind, TypeKind::Primitive(_) | TypeKind::Null)
    }

    /// The generic declaration behind an instantiation.
    pub fn generic(&self) -> Option<TypeId> {
        match self.kind {
            TypeKind::Parameterized { generic, .. } => Some(generic),
            _ => None,
        }
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

#[derive(Clone, Debug)]
pub struct FieldBinding {
    pub name: Name,
    pub declaring: TypeId,
    pub ty: TypeId,
    pub modifiers: Modifiers,
    /// Declaration this field was substituted from, when seen through an
    /// instantiation.
    pub original: Option<FieldId>,
    pub valid: bool,
}

impl FieldBinding {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_synthetic(&self) -> bool {
        self.modifiers.contains(Modifiers::SYNTHETIC)
    }
}

#[derive(Clone, Debug)]
pub struct MethodBinding {
    pub selector: Name,
    pub declaring: TypeId,
    pub return_type: TypeId,
    pub parameters: Vec<TypeId>,
    pub type_variables: Vec<TypeId>,
    pub modifiers: Modifiers,
    pub is_constructor: bool,
    /// Declaration this method was substituted from, when seen through an
    /// instantiation.
    pub original: Option<MethodId>,
    pub valid: bool,
}

impl MethodBinding {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_synthetic(&self) -> bool {
        self.modifiers.contains(Modifiers::SYNTHETIC)
    }

    pub fn is_default_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::DEFAULT_ABSTRACT)
    }
}

/// Source information of a local variable's declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalDeclaration {
    /// From the first modifier or type token to the end of the declarator.
    pub declaration_range: TextRange,
    /// The variable name alone.
    pub name_range: TextRange,
    pub annotations: Vec<SmolStr>,
}

#[derive(Clone, Debug)]
pub struct LocalBinding {
    pub name: Name,
    pub ty: TypeId,
    pub declaring_scope: ScopeId,
    /// Compiler-introduced temporaries never surface in completion.
    pub secret: bool,
    pub declaration: LocalDeclaration,
}

/// A field, method or type binding, used as a key into identity maps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindingRef {
    Type(TypeId),
    Field(FieldId),
    Method(MethodId),
}
