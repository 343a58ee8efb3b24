//! Arena handles for bindings stored in a [`BindingGraph`](super::BindingGraph).
//!
//! Every binding is identified by its slot in the graph, never by its shape:
//! two distinct declarations with identical names and types stay distinct.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub(crate) u32);

        impl $name {
            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// Slot of this binding in its arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

arena_id!(
    /// A type: class, interface, enum, type variable, intersection,
    /// parameterized instantiation, array, primitive or the null type.
    TypeId,
    "TypeId"
);
arena_id!(FieldId, "FieldId");
arena_id!(
    /// A method or constructor.
    MethodId,
    "MethodId"
);
arena_id!(
    /// A local variable or parameter.
    LocalId,
    "LocalId"
);
arena_id!(ScopeId, "ScopeId");
arena_id!(ImportId, "ImportId");
