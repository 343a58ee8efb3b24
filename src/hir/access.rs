//! Accessibility: can a member be seen from a given scope through a given
//! receiver type?

use super::bindings::Modifiers;
use super::graph::BindingGraph;
use super::ids::{FieldId, MethodId, ScopeId, TypeId};

impl BindingGraph {
    pub fn field_can_be_seen_by(&self, field: FieldId, receiver: TypeId, scope: ScopeId) -> bool {
        let binding = self.field(field);
        self.can_be_seen_by(binding.declaring, binding.modifiers, receiver, scope)
    }

    pub fn method_can_be_seen_by(&self, method: MethodId, receiver: TypeId, scope: ScopeId) -> bool {
        let binding = self.method(method);
        self.can_be_seen_by(binding.declaring, binding.modifiers, receiver, scope)
    }

    /// Standard access rules for a member declared on `declaring` with
    /// `modifiers`, looked up through `receiver` from code at `scope`.
    pub fn can_be_seen_by(
        &self,
        declaring: TypeId,
        modifiers: Modifiers,
        receiver: TypeId,
        scope: ScopeId,
    ) -> bool {
        if modifiers.contains(Modifiers::PUBLIC) {
            return true;
        }
        // Interface members without an access modifier are implicitly public
        if self.is_interface(declaring) && !modifiers.contains(Modifiers::PRIVATE) {
            return true;
        }

        let declaring_package = self.ty(declaring).package.as_str();
        let Some(invocation) = self.enclosing_source_type(scope) else {
            // Unit level, e.g. static imports
            return !modifiers.contains(Modifiers::PRIVATE)
                && self.scope_package(scope) == Some(declaring_package);
        };
        if invocation == declaring && self.erasure(receiver) == declaring {
            return true;
        }

        if modifiers.contains(Modifiers::PROTECTED) {
            if invocation == declaring || self.ty(invocation).package == declaring_package {
                return true;
            }
            let mut current = Some(invocation);
            while let Some(enclosing) = current {
                if self.is_subtype_of(enclosing, declaring) {
                    if modifiers.contains(Modifiers::STATIC) || self.is_subtype_of(receiver, enclosing) {
                        return true;
                    }
                }
                current = self.ty(enclosing).enclosing;
            }
            return false;
        }

        if modifiers.contains(Modifiers::PRIVATE) {
            // Private members are not inherited
            if self.erasure(receiver) != declaring {
                return false;
            }
            return self.outermost_type(invocation) == self.outermost_type(declaring);
        }

        // Package-private: every class between the receiver and the
        // declaring class must live in the declaring package
        if self.ty(invocation).package != declaring_package {
            return false;
        }
        let mut current = Some(receiver);
        while let Some(ty) = current {
            if self.erasure(ty) == declaring {
                return true;
            }
            if self.ty(ty).package != declaring_package {
                return false;
            }
            current = self.superclass(ty);
        }
        false
    }
}
