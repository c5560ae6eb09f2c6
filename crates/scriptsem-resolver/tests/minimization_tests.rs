use crate::test_support::{marker, normal_name, resolve_minimized};
use crate::{FieldSemantics, MethodSemantics, PropertySemantics};
use scriptsem_model::{FieldDecl, GraphBuilder, Marker, MethodDecl, PropertyDecl, TypeDecl};

fn field_name(semantics: &FieldSemantics) -> &str {
    semantics.name().expect("field should be usable")
}

// =============================================================================
// Members
// =============================================================================

#[test]
fn test_private_members_get_generated_names() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let class = builder.add_type(asm, TypeDecl::class("N", "C"));
    let run = builder.add_method(class, MethodDecl::new("Run"));
    let helper = builder.add_method(class, MethodDecl::new("Helper").private());
    let count = builder.add_field(class, FieldDecl::new("Count").private());
    let kept = builder.add_field(class, FieldDecl::new("Kept").private().attr(marker(Marker::PreserveName)));
    let graph = builder.build();

    let resolution = resolve_minimized(&graph);
    assert_eq!(normal_name(resolution.method_semantics(run)), "run");
    assert_eq!(normal_name(resolution.method_semantics(helper)), "$0");
    assert_eq!(field_name(resolution.field_semantics(count)), "$1");
    assert_eq!(field_name(resolution.field_semantics(kept)), "kept");
    assert!(!resolution.has_errors());
}

#[test]
fn test_generated_names_avoid_inherited_names() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let base = builder.add_type(asm, TypeDecl::class("N", "Base").internal());
    let base_field = builder.add_field(base, FieldDecl::new("Alpha").private());
    let derived = builder.add_type(asm, TypeDecl::class("N", "Derived").internal().base(base));
    let derived_field = builder.add_field(derived, FieldDecl::new("Beta").private());
    let graph = builder.build();

    let resolution = resolve_minimized(&graph);
    assert_eq!(field_name(resolution.field_semantics(base_field)), "$0");
    assert_eq!(field_name(resolution.field_semantics(derived_field)), "$1");
}

#[test]
fn test_private_property_accessors_are_minimized() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let class = builder.add_type(asm, TypeDecl::class("N", "C"));
    let size = builder.add_property(class, PropertyDecl::new("Size").private());
    let graph = builder.build();

    assert_eq!(
        resolve_minimized(&graph).property_semantics(size),
        &PropertySemantics::GetAndSet {
            getter: Some(MethodSemantics::normal("$0")),
            setter: Some(MethodSemantics::normal("$1")),
        }
    );
}

// =============================================================================
// Interface members
// =============================================================================

#[test]
fn test_interface_member_names_are_unique_per_assembly() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let first = builder.add_type(asm, TypeDecl::interface("N", "IFirst").internal());
    let first_run = builder.add_method(first, MethodDecl::new("Run"));
    let second = builder.add_type(asm, TypeDecl::interface("N", "ISecond").internal());
    let second_run = builder.add_method(second, MethodDecl::new("Run"));
    let class = builder.add_type(asm, TypeDecl::class("N", "Impl").internal().base(first));
    let impl_run = builder.add_method(class, MethodDecl::new("Run").implements(first_run));
    let graph = builder.build();

    let resolution = resolve_minimized(&graph);
    // Roots are processed in name order: IFirst, ISecond, then Impl.
    assert_eq!(normal_name(resolution.method_semantics(first_run)), "$I1");
    assert_eq!(normal_name(resolution.method_semantics(second_run)), "$I2");
    assert_eq!(normal_name(resolution.method_semantics(impl_run)), "$I1");
}

#[test]
fn test_interface_counters_restart_per_assembly() {
    let mut builder = GraphBuilder::new();
    let app = builder.assembly("App");
    let lib = builder.assembly("Lib");
    let lib_iface = builder.add_type(lib, TypeDecl::interface("Lib", "IStore").internal());
    let save = builder.add_method(lib_iface, MethodDecl::new("Save"));
    let app_iface = builder.add_type(app, TypeDecl::interface("App", "IView").internal());
    let show = builder.add_method(app_iface, MethodDecl::new("Show"));
    let class = builder.add_type(app, TypeDecl::class("App", "Store").internal().base(lib_iface));
    builder.add_method(class, MethodDecl::new("Save").implements(save));
    let graph = builder.build();

    let resolution = resolve_minimized(&graph);
    assert_eq!(normal_name(resolution.method_semantics(save)), "$I1");
    assert_eq!(normal_name(resolution.method_semantics(show)), "$I1");
}

#[test]
fn test_internal_interface_property_accessors() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let iface = builder.add_type(asm, TypeDecl::interface("N", "IHasValue").internal());
    let value = builder.add_property(iface, PropertyDecl::new("Value"));
    let graph = builder.build();

    assert_eq!(
        resolve_minimized(&graph).property_semantics(value),
        &PropertySemantics::GetAndSet {
            getter: Some(MethodSemantics::normal("$I1")),
            setter: Some(MethodSemantics::normal("$I2")),
        }
    );
}

#[test]
fn test_public_interface_members_keep_names() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let iface = builder.add_type(asm, TypeDecl::interface("N", "IRunner"));
    let run = builder.add_method(iface, MethodDecl::new("Run"));
    let graph = builder.build();

    assert_eq!(normal_name(resolve_minimized(&graph).method_semantics(run)), "run");
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn test_non_public_types_take_lowest_free_slot() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let a = builder.add_type(asm, TypeDecl::class("N", "A").internal());
    let b = builder.add_type(asm, TypeDecl::class("N", "B").internal());
    let public = builder.add_type(asm, TypeDecl::class("N", "Pub"));
    let other = builder.add_type(asm, TypeDecl::class("M", "C").internal());
    let kept = builder.add_type(asm, TypeDecl::class("N", "Kept").internal().attr(marker(Marker::PreserveName)));
    let graph = builder.build();

    let resolution = resolve_minimized(&graph);
    let name = |id| resolution.type_semantics(id).name().map(str::to_string);
    assert_eq!(name(a).as_deref(), Some("N.$0"));
    assert_eq!(name(b).as_deref(), Some("N.$1"));
    assert_eq!(name(public).as_deref(), Some("N.Pub"));
    assert_eq!(name(other).as_deref(), Some("M.$0"));
    assert_eq!(name(kept).as_deref(), Some("N.Kept"));
}

#[test]
fn test_minimized_nested_type_uses_outer_namespace() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let outer = builder.add_type(asm, TypeDecl::class("N", "Outer"));
    let inner = builder.add_type(asm, TypeDecl::nested(outer, "Inner").private());
    let graph = builder.build();

    let resolution = resolve_minimized(&graph);
    assert_eq!(resolution.type_semantics(outer).name(), Some("N.Outer"));
    assert_eq!(resolution.type_semantics(inner).name(), Some("N.$0"));
}
