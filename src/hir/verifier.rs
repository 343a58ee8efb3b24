//! Override-equivalence between methods.

use super::bindings::TypeKind;
use super::graph::BindingGraph;
use super::ids::{MethodId, TypeId};

/// Decides whether one method's signature is a subsignature of another's.
pub trait MethodVerifier {
    /// Whether `method` is an override-equivalent subsignature of
    /// `inherited`: same selector and parameters that are equal, or equal to
    /// the erasure of `inherited`'s parameters.
    fn is_method_subsignature(&self, graph: &BindingGraph, method: MethodId, inherited: MethodId) -> bool;
}

/// Subsignature check over the graph's own types.
///
/// Method type variables correspond by position; a non-generic method also
/// matches the erased parameters of a generic one.
#[derive(Clone, Copy, Debug, Default)]
pub struct ErasureMethodVerifier;

impl MethodVerifier for ErasureMethodVerifier {
    fn is_method_subsignature(&self, graph: &BindingGraph, method: MethodId, inherited: MethodId) -> bool {
        let m = graph.method(method);
        let i = graph.method(inherited);
        if m.selector != i.selector || m.parameters.len() != i.parameters.len() {
            return false;
        }

        let same = m
            .parameters
            .iter()
            .zip(&i.parameters)
            .all(|(a, b)| same_parameter(graph, *a, *b, &m.type_variables, &i.type_variables));
        if same {
            return true;
        }

        m.type_variables.is_empty()
            && m
                .parameters
                .iter()
                .zip(&i.parameters)
                .all(|(a, b)| *a == graph.erasure(*b))
    }
}

fn same_parameter(
    graph: &BindingGraph,
    a: TypeId,
    b: TypeId,
    a_variables: &[TypeId],
    b_variables: &[TypeId],
) -> bool {
    if a == b {
        return true;
    }
    let position_of = |ty: TypeId, variables: &[TypeId]| variables.iter().position(|v| *v == ty);
    if a_variables.len() == b_variables.len() {
        if let (Some(x), Some(y)) = (position_of(a, a_variables), position_of(b, b_variables)) {
            return x == y;
        }
    }
    match (&graph.ty(a).kind, &graph.ty(b).kind) {
        (TypeKind::Array { component: x }, TypeKind::Array { component: y }) => {
            same_parameter(graph, *x, *y, a_variables, b_variables)
        }
        _ => false,
    }
}
