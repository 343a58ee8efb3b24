//! Visible-element tests: what a completion inside a method body sees.

use rstest::rstest;
use scopewalk::hir::{MethodContext, Modifiers, NewMethod, NewType, TypeArgument, TypeId};
use scopewalk::ide::{CompletionOptions, ElementKind, ExtendedCompletionContext};

use crate::helpers::handle_assertions::*;
use crate::helpers::java_fixtures::*;

// =============================================================================
// SHADOWING & HIDING
// =============================================================================

#[test]
fn test_local_shadows_field_of_same_name() {
    let mut java = JavaUnit::new("p", "Main.java");
    let main = java.class("Main");
    let int = java.int();
    java.graph.add_field(main, "x", int, Modifiers::PRIVATE);
    let run = java.graph.add_method(main, NewMethod::new("run"));
    let class_scope = java.class_scope(main);
    let (_, body) = java.body(class_scope, run, false);
    java.local(body, "x", int, 40);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_kind(single(&visible, "x"), ElementKind::LocalVariable);
    assert_eq!(labels(&visible), vec!["LocalVariable:x@run", "Method:run@Main"]);
}

#[test]
fn test_nearest_local_wins_across_blocks() {
    let mut java = JavaUnit::new("p", "Main.java");
    let main = java.class("Main");
    let (int, string) = (java.int(), java.string());
    let run = java.graph.add_method(main, NewMethod::new("run").param(int));
    let class_scope = java.class_scope(main);
    let (method_scope, body) = java.body(class_scope, run, false);
    java.local(method_scope, "i", int, 30);
    let inner = java.graph.add_block_scope(body);
    java.local(inner, "i", string, 60);
    java.local(body, "j", int, 50);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(inner), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(names(&visible), vec!["i", "j", "run"]);
    let i = single(&visible, "i").local_info().unwrap();
    assert_eq!(i.type_signature, "Ljava/lang/String;");
    assert_eq!(i.name_range, r(60, 61));
}

#[test]
fn test_secret_locals_are_skipped() {
    let mut java = JavaUnit::new("p", "Main.java");
    let main = java.class("Main");
    let int = java.int();
    let run = java.graph.add_method(main, NewMethod::new("run"));
    let class_scope = java.class_scope(main);
    let (_, body) = java.body(class_scope, run, false);
    java.graph.add_secret_local(body, "$iterator", int);
    java.local(body, "item", int, 40);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_absent(&visible, "$iterator");
    single(&visible, "item");
}

#[test]
fn test_subclass_field_hides_superclass_field() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let base = java.class("Base");
    java.graph.add_field(base, "v", int, Modifiers::PUBLIC);
    let derived = java.graph.add_type(NewType::class("Derived").in_unit(java.unit).extends(base));
    java.graph.add_field(derived, "v", int, Modifiers::PUBLIC);
    let m = java.graph.add_method(derived, NewMethod::new("m"));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, m, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, base, r(0, 200)),
        type_decl(&java.graph, derived, r(200, 500)),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Field:v@Derived", "Method:m@Derived"]);
}

#[test]
fn test_private_superclass_members_are_not_inherited() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let base = java.class("Base");
    java.graph.add_field(base, "secret", int, Modifiers::PRIVATE);
    java.graph.add_field(base, "shared", int, Modifiers::PROTECTED);
    java.graph.add_method(base, NewMethod::new("hidden").modifiers(Modifiers::PRIVATE));
    let derived = java.graph.add_type(NewType::class("Derived").in_unit(java.unit).extends(base));
    let m = java.graph.add_method(derived, NewMethod::new("m"));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, m, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, base, r(0, 200)),
        type_decl(&java.graph, derived, r(200, 500)),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(names(&visible), vec!["shared", "m"]);
}

#[test]
fn test_protected_member_of_other_package_is_projected() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let base = java
        .graph
        .add_type(NewType::class("Base").package("lib").modifiers(Modifiers::PUBLIC));
    java.graph.add_field(base, "p", int, Modifiers::PROTECTED);
    java.graph.add_field(base, "internal", int, Modifiers::empty());
    let derived = java.graph.add_type(NewType::class("Derived").in_unit(java.unit).extends(base));
    let m = java.graph.add_method(derived, NewMethod::new("m"));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, m, false);
    let decl = java.decl(vec![type_decl(&java.graph, derived, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_absent(&visible, "internal");
    let p = single(&visible, "p");
    assert_eq!(p.key(), Some("Llib/Base;.p)I"));
    assert_eq!(p.to_string(), "lib/Base.class/Base/p");
}

// =============================================================================
// OVERRIDING
// =============================================================================

#[test]
fn test_override_keeps_derived_method() {
    let mut java = JavaUnit::new("p", "Main.java");
    let base = java.class("Base");
    java.graph.add_method(base, NewMethod::new("m").modifiers(Modifiers::PUBLIC));
    let derived = java.graph.add_type(NewType::class("Derived").in_unit(java.unit).extends(base));
    let m = java
        .graph
        .add_method(derived, NewMethod::new("m").modifiers(Modifiers::PUBLIC));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, m, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, base, r(0, 200)),
        type_decl(&java.graph, derived, r(200, 500)),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Method:m@Derived"]);
}

#[test]
fn test_overloads_both_survive() {
    let mut java = JavaUnit::new("p", "Main.java");
    let (int, string) = (java.int(), java.string());
    let base = java.class("Base");
    java.graph.add_method(base, NewMethod::new("put").param(string));
    let derived = java.graph.add_type(NewType::class("Derived").in_unit(java.unit).extends(base));
    let put = java.graph.add_method(derived, NewMethod::new("put").param(int));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, put, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, base, r(0, 200)),
        type_decl(&java.graph, derived, r(200, 500)),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Method:put@Derived", "Method:put@Base"]);
}

#[test]
fn test_raw_override_of_parameterized_signature() {
    let mut java = JavaUnit::new("p", "Main.java");
    let string = java.string();
    let list = java.graph.add_type(
        NewType::interface("List")
            .package("java.util")
            .modifiers(Modifiers::PUBLIC),
    );
    let list_of_string = java.graph.parameterize(list, &[TypeArgument::Type(string)]);
    let base = java.class("Base");
    java.graph.add_method(base, NewMethod::new("accept").param(list_of_string));
    let derived = java.graph.add_type(NewType::class("Derived").in_unit(java.unit).extends(base));
    let accept = java.graph.add_method(derived, NewMethod::new("accept").param(list));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, accept, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, base, r(0, 200)),
        type_decl(&java.graph, derived, r(200, 500)),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Method:accept@Derived"]);
}

#[test]
fn test_compiler_generated_members_and_constructors_are_hidden() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let main = java.class("Main");
    java.graph.add_field(main, "this$0", int, Modifiers::SYNTHETIC);
    java.graph.add_method(main, NewMethod::constructor().modifiers(Modifiers::PUBLIC));
    java.graph.add_method(
        main,
        NewMethod::new("access$000").modifiers(Modifiers::STATIC | Modifiers::SYNTHETIC),
    );
    java.graph.add_method(main, NewMethod::new("close").modifiers(Modifiers::DEFAULT_ABSTRACT));
    let run = java.graph.add_method(main, NewMethod::new("run"));
    let class_scope = java.class_scope(main);
    let (_, body) = java.body(class_scope, run, false);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(names(&visible), vec!["run"]);
}

// =============================================================================
// STATIC CONTEXTS
// =============================================================================

#[test]
fn test_static_method_sees_only_static_members() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let main = java.class("Main");
    java.graph.add_field(main, "count", int, Modifiers::PRIVATE);
    java.graph.add_field(main, "LIMIT", int, Modifiers::PRIVATE | Modifiers::STATIC);
    java.graph.add_method(main, NewMethod::new("helper"));
    let entry = java
        .graph
        .add_method(main, NewMethod::new("main").modifiers(Modifiers::PUBLIC | Modifiers::STATIC));
    let class_scope = java.class_scope(main);
    let (_, body) = java.body(class_scope, entry, true);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Field:LIMIT@Main", "Method:main@Main"]);
}

#[test]
fn test_static_nested_type_sees_only_static_outer_members() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let outer = java.class("Outer");
    java.graph.add_field(outer, "state", int, Modifiers::empty());
    java.graph.add_field(outer, "COUNT", int, Modifiers::STATIC);
    let inner = java
        .graph
        .add_type(NewType::class("Inner").nested_in(outer).modifiers(Modifiers::STATIC));
    java.graph.add_field(inner, "own", int, Modifiers::empty());
    let run = java.graph.add_method(inner, NewMethod::new("run"));
    let outer_scope = java.class_scope(outer);
    let inner_scope = java.graph.add_class_scope(outer_scope, inner);
    let (_, body) = java.body(inner_scope, run, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, outer, r(0, 500))
            .with_member_type(type_decl(&java.graph, inner, r(100, 300))),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(
        labels(&visible),
        vec!["Field:own@Inner", "Field:COUNT@Outer", "Method:run@Inner"]
    );
}

#[test]
fn test_explicit_constructor_call_is_a_static_context() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let main = java.class("Main");
    java.graph.add_field(main, "value", int, Modifiers::PRIVATE);
    java.graph.add_method(
        main,
        NewMethod::new("defaultValue")
            .returns(int)
            .modifiers(Modifiers::STATIC),
    );
    let constructor = java.graph.add_method(main, NewMethod::constructor().param(int));
    let class_scope = java.class_scope(main);
    let (method_scope, body) = java.body(class_scope, constructor, false);
    java.graph.set_constructor_call(method_scope);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(names(&visible), vec!["defaultValue"]);
}

// =============================================================================
// INTERFACES
// =============================================================================

#[test]
fn test_diamond_interface_members_appear_once() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let i0 = java
        .graph
        .add_type(NewType::interface("I0").package("lib").modifiers(Modifiers::PUBLIC));
    java.graph.add_field(
        i0,
        "K",
        int,
        Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
    );
    java.graph.add_method(i0, NewMethod::new("size").returns(int).modifiers(Modifiers::ABSTRACT));
    let i1 = java.graph.add_type(
        NewType::interface("I1")
            .package("lib")
            .modifiers(Modifiers::PUBLIC)
            .implements(i0),
    );
    let i2 = java.graph.add_type(
        NewType::interface("I2")
            .package("lib")
            .modifiers(Modifiers::PUBLIC)
            .implements(i0),
    );
    let c = java.graph.add_type(
        NewType::class("C")
            .in_unit(java.unit)
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .implements(i1)
            .implements(i2),
    );
    let run = java.graph.add_method(c, NewMethod::new("run"));
    let class_scope = java.class_scope(c);
    let (_, body) = java.body(class_scope, run, false);
    let decl = java.decl(vec![type_decl(&java.graph, c, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Field:K@I0", "Method:run@C", "Method:size@I0"]);
    assert_eq!(single(&visible, "size").key(), Some("Llib/I0;.size()I"));
}

#[test]
fn test_interface_body_sees_object_methods() {
    let mut java = JavaUnit::new("p", "Main.java");
    let string = java.string();
    let object = java.graph.object().unwrap();
    java.graph.add_method(
        object,
        NewMethod::new("toString")
            .returns(string)
            .modifiers(Modifiers::PUBLIC),
    );
    let api = java.graph.add_type(
        NewType::interface("Api")
            .in_unit(java.unit)
            .modifiers(Modifiers::PUBLIC),
    );
    java.graph.add_method(api, NewMethod::new("name").returns(string).modifiers(Modifiers::ABSTRACT));
    let describe = java
        .graph
        .add_method(api, NewMethod::new("describe").returns(string).modifiers(Modifiers::DEFAULT));
    let class_scope = java.class_scope(api);
    let (_, body) = java.body(class_scope, describe, false);
    let decl = java.decl(vec![type_decl(&java.graph, api, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(names(&visible), vec!["name", "describe", "toString"]);
    assert_eq!(
        single(&visible, "toString").key(),
        Some("Ljava/lang/Object;.toString()Ljava/lang/String;")
    );
}

#[test]
fn test_concrete_implementation_wins_over_interface_method() {
    let mut java = JavaUnit::new("p", "Main.java");
    let runnable = java.graph.add_type(
        NewType::interface("Runnable")
            .package("java.lang")
            .modifiers(Modifiers::PUBLIC),
    );
    java.graph.add_method(
        runnable,
        NewMethod::new("run").modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
    );
    let base = java.graph.add_type(
        NewType::class("Task")
            .in_unit(java.unit)
            .modifiers(Modifiers::ABSTRACT)
            .implements(runnable),
    );
    let worker = java.graph.add_type(NewType::class("Worker").in_unit(java.unit).extends(base));
    let run = java
        .graph
        .add_method(worker, NewMethod::new("run").modifiers(Modifiers::PUBLIC));
    let class_scope = java.class_scope(worker);
    let (_, body) = java.body(class_scope, run, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, base, r(0, 200)),
        type_decl(&java.graph, worker, r(200, 500)),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Method:run@Worker"]);
}

// =============================================================================
// GENERICS
// =============================================================================

#[test]
fn test_override_of_method_inherited_through_instantiation() {
    let mut java = JavaUnit::new("p", "Main.java");
    let string = java.string();
    let root = java.class("Root");
    java.graph.add_method(root, NewMethod::new("reset").modifiers(Modifiers::PUBLIC));
    let base = java.graph.add_type(
        NewType::class("Base")
            .in_unit(java.unit)
            .modifiers(Modifiers::PUBLIC)
            .extends(root),
    );
    let t = java.graph.add_type_variable("T", &[]);
    java.graph.declare_type_variable(base, t);
    java.graph
        .add_method(base, NewMethod::new("m").param(t).modifiers(Modifiers::PUBLIC));
    let base_of_string = java.graph.parameterize(base, &[TypeArgument::Type(string)]);
    let derived = java.graph.add_type(
        NewType::class("Derived")
            .in_unit(java.unit)
            .extends(base_of_string),
    );
    let m = java
        .graph
        .add_method(derived, NewMethod::new("m").param(string).modifiers(Modifiers::PUBLIC));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, m, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, root, r(0, 100)),
        type_decl(&java.graph, base, r(100, 300)),
        type_decl(&java.graph, derived, r(300, 600)),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Method:m@Derived", "Method:reset@Root"]);
}

#[test]
fn test_members_inherited_through_instantiation_use_type_arguments() {
    let mut java = JavaUnit::new("p", "Main.java");
    let string = java.string();
    let base = java.class("Base");
    let t = java.graph.add_type_variable("T", &[]);
    java.graph.declare_type_variable(base, t);
    java.graph.add_field(base, "value", t, Modifiers::PUBLIC);
    java.graph
        .add_method(base, NewMethod::new("get").returns(t).modifiers(Modifiers::PUBLIC));
    let base_of_string = java.graph.parameterize(base, &[TypeArgument::Type(string)]);
    // Declared after the instantiation exists
    java.graph
        .add_method(base, NewMethod::new("first").returns(t).modifiers(Modifiers::PUBLIC));
    let derived = java.graph.add_type(
        NewType::class("Derived")
            .in_unit(java.unit)
            .extends(base_of_string),
    );
    let run = java.graph.add_method(derived, NewMethod::new("run"));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, run, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, base, r(0, 200)),
        type_decl(&java.graph, derived, r(200, 500)),
    ]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let strings = context.get_visible_elements(Some("Ljava/lang/String;"));

    assert_eq!(
        labels(&strings),
        vec!["Field:value@Base", "Method:get@Base", "Method:first@Base"]
    );
    assert_eq!(single(&strings, "get").to_string(), "p/Main.java/Base/get()");
}

// =============================================================================
// INHERITED INTERFACE METHODS
// =============================================================================

/// `lib.Named { String label(); }`
fn named_interface(java: &mut JavaUnit) -> TypeId {
    let string = java.string();
    let named = java
        .graph
        .add_type(NewType::interface("Named").package("lib").modifiers(Modifiers::PUBLIC));
    java.graph.add_method(
        named,
        NewMethod::new("label")
            .returns(string)
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
    );
    named
}

#[test]
fn test_abstract_class_sees_unimplemented_interface_method() {
    let mut java = JavaUnit::new("p", "Main.java");
    let named = named_interface(&mut java);
    let figure = java.graph.add_type(
        NewType::class("Figure")
            .in_unit(java.unit)
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .implements(named),
    );
    let describe = java.graph.add_method(figure, NewMethod::new("describe"));
    let class_scope = java.class_scope(figure);
    let (_, body) = java.body(class_scope, describe, false);
    let decl = java.decl(vec![type_decl(&java.graph, figure, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    let visible = context.get_visible_elements(None);

    assert_eq!(labels(&visible), vec!["Method:describe@Figure", "Method:label@Named"]);
    assert_eq!(single(&visible, "label").key(), Some("Llib/Named;.label()Ljava/lang/String;"));
}

#[rstest]
#[case::enumeration(NewType::enumeration("Shade"), vec!["Method:describe@Shade", "Method:label@Named"])]
#[case::concrete_class(NewType::class("Shade"), vec!["Method:describe@Shade"])]
fn test_interface_sweep_depends_on_receiver_kind(#[case] shade: NewType, #[case] expected: Vec<&str>) {
    let mut java = JavaUnit::new("p", "Main.java");
    let named = named_interface(&mut java);
    let shade = java
        .graph
        .add_type(shade.in_unit(java.unit).modifiers(Modifiers::PUBLIC).implements(named));
    let describe = java.graph.add_method(shade, NewMethod::new("describe"));
    let class_scope = java.class_scope(shade);
    let (_, body) = java.body(class_scope, describe, false);
    let decl = java.decl(vec![type_decl(&java.graph, shade, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());

    assert_eq!(labels(&context.get_visible_elements(None)), expected);
}

// =============================================================================
// JAVADOC MODE
// =============================================================================

#[test]
fn test_javadoc_mode_reads_own_fields_but_inherited_methods() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let constants = java.graph.add_type(
        NewType::interface("Constants")
            .in_unit(java.unit)
            .modifiers(Modifiers::PUBLIC),
    );
    java.graph.add_field(constants, "K", int, Modifiers::PUBLIC | Modifiers::STATIC);
    let base = java.class("Base");
    java.graph.add_field(base, "v", int, Modifiers::PUBLIC);
    java.graph.add_method(base, NewMethod::new("inherited").modifiers(Modifiers::PUBLIC));
    let derived = java.graph.add_type(
        NewType::class("Derived")
            .in_unit(java.unit)
            .extends(base)
            .implements(constants),
    );
    java.graph.add_field(derived, "w", int, Modifiers::PUBLIC);
    let m = java.graph.add_method(derived, NewMethod::new("m"));
    let class_scope = java.class_scope(derived);
    let (_, body) = java.body(class_scope, m, false);
    let decl = java.decl(vec![
        type_decl(&java.graph, constants, r(0, 100)),
        type_decl(&java.graph, base, r(100, 300)),
        type_decl(&java.graph, derived, r(300, 600)),
    ]);

    let javadoc = CompletionOptions::new().with_javadoc(true);
    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), javadoc);
    assert_eq!(names(&context.get_visible_elements(None)), vec!["w", "m", "inherited"]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());
    assert_eq!(
        names(&context.get_visible_elements(None)),
        vec!["w", "v", "K", "m", "inherited"]
    );
}

// =============================================================================
// ASSIGNABILITY
// =============================================================================

#[rstest]
#[case::string("Ljava/lang/String;", &["b"])]
#[case::object("Ljava/lang/Object;", &["b"])]
#[case::int("I", &["a"])]
#[case::widened_to_long("J", &["a"])]
#[case::narrower_short("S", &[])]
fn test_visible_elements_filtered_by_target(#[case] signature: &str, #[case] expected: &[&str]) {
    let mut java = JavaUnit::new("p", "Main.java");
    let (int, string) = (java.int(), java.string());
    let main = java.class("Main");
    let run = java.graph.add_method(main, NewMethod::new("run"));
    let class_scope = java.class_scope(main);
    let (_, body) = java.body(class_scope, run, false);
    java.local(body, "a", int, 40);
    java.local(body, "b", string, 50);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());

    assert_eq!(names(&context.get_visible_elements(Some(signature))), expected);
}

#[test]
fn test_methods_filtered_by_return_type() {
    let mut java = JavaUnit::new("p", "Main.java");
    let (int, string) = (java.int(), java.string());
    let main = java.class("Main");
    java.graph.add_field(main, "label", string, Modifiers::PRIVATE);
    java.graph.add_method(main, NewMethod::new("name").returns(string));
    java.graph.add_method(main, NewMethod::new("size").returns(int));
    let run = java.graph.add_method(main, NewMethod::new("run"));
    let class_scope = java.class_scope(main);
    let (_, body) = java.body(class_scope, run, false);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());

    assert_eq!(
        labels(&context.get_visible_elements(Some("Ljava/lang/String;"))),
        vec!["Field:label@Main", "Method:name@Main"]
    );
}

#[test]
fn test_method_type_variable_target() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let main = java.class("Main");
    let t = java.graph.add_type_variable("T", &[]);
    let identity = java
        .graph
        .add_method(main, NewMethod::new("identity").type_variable(t).param(t).returns(t));
    let class_scope = java.class_scope(main);
    let (method_scope, body) = java.body(class_scope, identity, false);
    java.local(method_scope, "value", t, 30);
    java.local(body, "count", int, 50);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());

    assert_eq!(names(&context.get_visible_elements(Some("TT;"))), vec!["value", "identity"]);
}

#[rstest]
#[case::unknown_type("Lnowhere/Gone;")]
#[case::malformed("Ljava/lang/String")]
#[case::bad_descriptor("Q")]
#[case::array_never_created("[Ljava/lang/String;")]
#[case::missing_type("Lgone/Missing;")]
fn test_unresolvable_target_yields_nothing(#[case] signature: &str) {
    let mut java = JavaUnit::new("p", "Main.java");
    let string = java.string();
    java.graph.add_type(NewType::class("Missing").package("gone").missing());
    let main = java.class("Main");
    let run = java.graph.add_method(main, NewMethod::new("run"));
    let class_scope = java.class_scope(main);
    let (_, body) = java.body(class_scope, run, false);
    java.local(body, "b", string, 50);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());

    assert!(context.get_visible_elements(Some(signature)).is_empty());
    assert_eq!(names(&context.get_visible_elements(None)), vec!["b", "run"]);
}

// =============================================================================
// CACHING & BOUNDARIES
// =============================================================================

#[test]
fn test_repeated_calls_return_equal_results() {
    let mut java = JavaUnit::new("p", "Main.java");
    let (int, string) = (java.int(), java.string());
    let main = java.class("Main");
    java.graph.add_field(main, "name", string, Modifiers::PRIVATE);
    let run = java.graph.add_method(main, NewMethod::new("run").returns(int));
    let class_scope = java.class_scope(main);
    let (_, body) = java.body(class_scope, run, false);
    java.local(body, "i", int, 40);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(body), CompletionOptions::new());

    let first = context.get_visible_elements(None);
    assert_eq!(first.len(), 3);
    assert_eq!(first, context.get_visible_elements(None));
    let ints = context.get_visible_elements(Some("I"));
    assert_eq!(ints, context.get_visible_elements(Some("I")));
    assert_eq!(names(&ints), vec!["i", "run"]);
}

#[test]
fn test_no_cursor_scope_yields_nothing() {
    let mut java = JavaUnit::new("p", "Main.java");
    let main = java.class("Main");
    java.graph.add_method(main, NewMethod::new("run"));
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let context = ExtendedCompletionContext::new(&java.graph, &decl, None, CompletionOptions::new());

    assert!(context.get_visible_elements(None).is_empty());
    assert!(context.get_visible_elements(Some("I")).is_empty());
    assert!(context.get_visible_elements(Some("not a signature")).is_empty());
}

#[test]
fn test_type_body_outside_initializers_yields_nothing() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let main = java.class("Main");
    java.graph.add_field(main, "count", int, Modifiers::empty());
    let class_scope = java.class_scope(main);
    let decl = java.decl(vec![type_decl(&java.graph, main, r(0, 500))]);

    let options = CompletionOptions::new().with_assist_node(r(200, 203));
    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(class_scope), options);

    assert!(context.get_visible_elements(None).is_empty());
}

#[test]
fn test_field_initialization_is_searched() {
    let mut java = JavaUnit::new("p", "Main.java");
    let int = java.int();
    let main = java.class("Main");
    java.graph.add_field(main, "base", int, Modifiers::empty());
    java.graph.add_field(main, "derived", int, Modifiers::empty());
    let class_scope = java.class_scope(main);
    let init_scope = java
        .graph
        .add_method_scope(class_scope, MethodContext::Initializer(main), false);
    let mut ty = type_decl(&java.graph, main, r(0, 500));
    ty.fields[1] = ty.fields[1].clone().initialized_by(r(24, 29));
    let decl = java.decl(vec![ty]);

    let options = CompletionOptions::new().with_assist_node(r(25, 27));
    let context = ExtendedCompletionContext::new(&java.graph, &decl, Some(init_scope), options);

    assert_eq!(names(&context.get_visible_elements(None)), vec!["base", "derived"]);
}
