//! Scope-chain walk from the cursor to the compilation-unit scope.
//!
//! Two ascents over the same chain:
//!
//! 1. **Locals**: every block and method level contributes its declared
//!    locals; the nearest declaration of a name wins.
//! 2. **Members**: every class level contributes the fields and methods
//!    reachable through its type, filtered by a static-only flag that turns
//!    on at a static method, an explicit constructor call or a static type
//!    and never turns off again.
//!
//! Static imports of the unit are merged last.

use tracing::{debug, trace};

use super::candidates::VisibleBindings;
use super::visibility::MemberSearch;
use crate::hir::{BindingGraph, ImportTarget, ScopeId, ScopeKind};

/// Locals, fields and methods visible at `search.invocation_scope`.
pub(crate) fn search_visible_bindings(search: &MemberSearch<'_>) -> VisibleBindings {
    let mut found = VisibleBindings::default();
    collect_locals(search.graph, search.invocation_scope, &mut found);
    collect_members(search, &mut found);
    collect_static_imports(search, &mut found);
    debug!(
        "[WALK] {} locals, {} fields, {} methods",
        found.locals().count(),
        found.fields().count(),
        found.methods().count()
    );
    found
}

fn collect_locals(graph: &BindingGraph, scope: ScopeId, found: &mut VisibleBindings) {
    for current in graph.scope_chain(scope) {
        let level = graph.scope(current);
        if level.is_compilation_unit() {
            break;
        }
        for &local in level.locals() {
            let binding = graph.local(local);
            if binding.secret {
                continue;
            }
            if !found.push_local(binding.name, local) {
                trace!("[WALK] local {} shadowed", graph.text(binding.name));
            }
        }
    }
}

fn collect_members(search: &MemberSearch<'_>, found: &mut VisibleBindings) {
    let graph = search.graph;
    let mut statics_only = false;
    for current in graph.scope_chain(search.invocation_scope) {
        match graph.scope(current).kind {
            ScopeKind::Method {
                is_static,
                is_constructor_call,
                ..
            } => statics_only |= is_static | is_constructor_call,
            ScopeKind::Class { ty } => {
                trace!(
                    "[WALK] class level {} (statics only: {})",
                    graph.ty(ty).qualified_name,
                    statics_only
                );
                search.fields(ty, current, statics_only, found);
                search.methods(ty, current, statics_only, found);
                statics_only |= graph.ty(ty).is_static();
            }
            ScopeKind::Block { .. } => {}
            ScopeKind::CompilationUnit { .. } => break,
        }
    }
}

/// Imported members are always static.
fn collect_static_imports(search: &MemberSearch<'_>, found: &mut VisibleBindings) {
    let graph = search.graph;
    let scope = search.invocation_scope;
    let Some(unit_scope) = graph.unit_scope(scope) else {
        return;
    };
    let ScopeKind::CompilationUnit { imports, .. } = &graph.scope(unit_scope).kind else {
        return;
    };

    for &id in imports {
        let import = graph.import(id);
        if !import.valid || !import.is_static {
            continue;
        }
        let resolved = import.target.filter(|target| match *target {
            ImportTarget::Package => false,
            ImportTarget::Type(t) => graph.ty(t).valid,
            ImportTarget::Field(f) => graph.field(f).valid,
            ImportTarget::Method(m) => graph.method(m).valid,
        });
        let Some(target) = resolved else {
            debug!("[IMPORT] skipping unresolved static import {:?}", id);
            continue;
        };

        match (import.on_demand, target) {
            (true, ImportTarget::Type(ty)) => {
                search.fields(ty, scope, true, found);
                search.methods(ty, scope, true, found);
            }
            (false, ImportTarget::Field(f)) => {
                let declaring = graph.field(f).declaring;
                search.local_fields([f], declaring, scope, true, found);
            }
            (false, ImportTarget::Method(m)) => {
                let method = graph.method(m);
                let overloads = graph.methods_named(method.declaring, method.selector);
                search.local_methods(overloads, method.declaring, scope, true, found);
            }
            _ => trace!("[IMPORT] {:?} imports no members", id),
        }
    }
}
