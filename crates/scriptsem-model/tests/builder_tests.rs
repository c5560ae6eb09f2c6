use crate::{
    Accessibility, Attribute, AttributeView, EventDecl, FieldDecl, GraphBuilder, Marker,
    MemberKind, MemberModifiers, MethodDecl, PropertyDecl, TypeDecl, TypeKind,
};

#[test]
fn test_assembly_is_created_once() {
    let mut builder = GraphBuilder::new();
    let a = builder.assembly("App");
    let b = builder.assembly("Lib");
    assert_ne!(a, b);
    assert_eq!(builder.assembly("App"), a);

    let graph = builder.build();
    assert_eq!(graph.assembly_name(b), "Lib");
    assert_eq!(graph.assembly_by_name("Missing"), None);
}

#[test]
fn test_type_full_names() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let global = builder.add_type(asm, TypeDecl::class("", "Program"));
    let outer = builder.add_type(asm, TypeDecl::class("Company.Ui", "Outer").type_params(&["T"]));
    let inner = builder.add_type(asm, TypeDecl::nested(outer, "Inner").type_params(&["U"]));
    let graph = builder.build();

    assert_eq!(graph.type_symbol(global).full_name, "Program");
    assert_eq!(graph.type_symbol(outer).full_name, "Company.Ui.Outer");

    let inner_sym = graph.type_symbol(inner);
    assert_eq!(inner_sym.full_name, "Company.Ui.Outer.Inner");
    assert_eq!(inner_sym.namespace, "Company.Ui");
    assert_eq!(inner_sym.type_parameters, vec!["T", "U"]);
    assert_eq!(graph.outermost_type(inner), outer);
    assert_eq!(graph.type_by_full_name("Company.Ui.Outer.Inner"), Some(inner));
}

#[test]
fn test_public_type_requires_public_container() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let hidden = builder.add_type(asm, TypeDecl::class("N", "Hidden").internal());
    let nested = builder.add_type(asm, TypeDecl::nested(hidden, "Visible"));
    let shown = builder.add_type(asm, TypeDecl::class("N", "Shown"));
    let protected = builder.add_type(
        asm,
        TypeDecl::nested(shown, "Prot").accessibility(Accessibility::Protected),
    );
    let graph = builder.build();

    assert!(!graph.is_public_type(hidden));
    assert!(!graph.is_public_type(nested));
    assert!(graph.is_public_type(shown));
    assert!(graph.is_public_type(protected));
}

#[test]
fn test_interface_members_are_abstract() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let iface = builder.add_type(asm, TypeDecl::interface("N", "IThing"));
    let method = builder.add_method(iface, MethodDecl::new("Run"));
    let prop = builder.add_property(iface, PropertyDecl::new("Size").read_only());
    let graph = builder.build();

    assert!(graph.member(method).modifiers.contains(MemberModifiers::ABSTRACT));
    assert!(graph.member(method).is_overridable());
    let getter = graph.getter(prop).expect("getter");
    assert!(graph.member(getter).is_overridable());
    assert_eq!(graph.setter(prop), None);
}

#[test]
fn test_sealed_override_is_not_overridable() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let base = builder.add_type(asm, TypeDecl::class("N", "Base"));
    let base_m = builder.add_method(base, MethodDecl::new("Run").virtual_());
    let derived = builder.add_type(asm, TypeDecl::class("N", "Derived").base(base));
    let m = builder.add_method(derived, MethodDecl::new("Run").override_of(base_m).sealed());
    let graph = builder.build();

    let member = graph.member(m);
    assert!(member.is_override());
    assert!(!member.is_overridable());
    assert_eq!(member.overridden, Some(base_m));
}

#[test]
fn test_property_accessors_are_derived() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let class = builder.add_type(asm, TypeDecl::class("N", "C"));
    let prop = builder.add_property(
        class,
        PropertyDecl::new("Size")
            .of_type("System.Int32")
            .static_()
            .setter_accessibility(Accessibility::Private)
            .getter_attr(Attribute::with_str(Marker::ScriptName, "size")),
    );
    let graph = builder.build();

    // Accessors are not own members.
    assert_eq!(graph.type_symbol(class).members, vec![prop]);

    let getter = graph.member(graph.getter(prop).expect("getter"));
    assert_eq!(getter.name, "get_Size");
    assert!(getter.is_static());
    assert_eq!(getter.accessibility, Accessibility::Public);
    assert_eq!(getter.string_arg(Marker::ScriptName), Some(Some("size")));
    assert!(matches!(&getter.kind, MemberKind::Method(m) if m.accessor_of == Some(prop)));

    let setter = graph.member(graph.setter(prop).expect("setter"));
    assert_eq!(setter.name, "set_Size");
    assert_eq!(setter.accessibility, Accessibility::Private);
    assert_eq!(setter.parameters().len(), 1);
    assert_eq!(setter.parameters()[0].type_name, "System.Int32");
}

#[test]
fn test_indexer_accessor_parameters() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let class = builder.add_type(asm, TypeDecl::class("N", "C"));
    let indexer = builder.add_property(class, PropertyDecl::indexer(&[("i", "System.Int32")]));
    let graph = builder.build();

    assert!(graph.member(indexer).is_indexer());
    let getter = graph.member(graph.getter(indexer).expect("getter"));
    assert_eq!(getter.name, "get_Item");
    assert_eq!(getter.parameters().len(), 1);
    let setter = graph.member(graph.setter(indexer).expect("setter"));
    assert_eq!(setter.parameters().len(), 2);
}

#[test]
fn test_accessor_links_follow_owner() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let iface = builder.add_type(asm, TypeDecl::interface("N", "IHasName"));
    let iface_prop = builder.add_property(iface, PropertyDecl::new("Name").read_only());
    let base = builder.add_type(asm, TypeDecl::class("N", "Base"));
    let base_prop = builder.add_property(base, PropertyDecl::new("Name").virtual_());
    let derived = builder.add_type(asm, TypeDecl::class("N", "Derived").base(base).base(iface));
    let prop = builder.add_property(
        derived,
        PropertyDecl::new("Name")
            .override_of(base_prop)
            .implements(iface_prop),
    );
    let graph = builder.build();

    let getter = graph.member(graph.getter(prop).expect("getter"));
    assert_eq!(getter.overridden, graph.getter(base_prop));
    assert_eq!(getter.implements, vec![graph.getter(iface_prop).expect("getter")]);

    // The interface has no setter to implement.
    let setter = graph.member(graph.setter(prop).expect("setter"));
    assert_eq!(setter.overridden, graph.setter(base_prop));
    assert!(setter.implements.is_empty());
}

#[test]
fn test_event_accessors() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let class = builder.add_type(asm, TypeDecl::class("N", "Button"));
    let event = builder.add_event(
        class,
        EventDecl::new("Click").adder_attr(Attribute::with_str(Marker::ScriptName, "onClick")),
    );
    let graph = builder.build();

    let adder = graph.member(graph.adder(event).expect("adder"));
    let remover = graph.member(graph.remover(event).expect("remover"));
    assert_eq!(adder.name, "add_Click");
    assert_eq!(remover.name, "remove_Click");
    assert!(adder.has_marker(Marker::ScriptName));
    assert!(!remover.has_marker(Marker::ScriptName));
}

#[test]
fn test_all_base_types_is_transitive_and_deduplicated() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let i_a = builder.add_type(asm, TypeDecl::interface("N", "IA"));
    let i_b = builder.add_type(asm, TypeDecl::interface("N", "IB").base(i_a));
    let base = builder.add_type(asm, TypeDecl::class("N", "Base").base(i_a));
    let derived = builder.add_type(asm, TypeDecl::class("N", "Derived").base(base).base(i_b));
    let graph = builder.build();

    assert_eq!(graph.all_base_types(derived), vec![base, i_a, i_b]);
    assert!(graph.all_base_types(i_a).is_empty());
}

#[test]
fn test_declares_data_members() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let only_methods = builder.add_type(asm, TypeDecl::class("N", "Helpers").static_type());
    builder.add_method(only_methods, MethodDecl::new("Help").static_());
    let with_field = builder.add_type(asm, TypeDecl::class("N", "Data"));
    builder.add_field(with_field, FieldDecl::new("value"));
    let graph = builder.build();

    assert!(!graph.declares_data_members(only_methods));
    assert!(graph.declares_data_members(with_field));
    assert_eq!(graph.type_symbol(only_methods).kind, TypeKind::Class);
}

#[test]
fn test_member_lookup_helpers() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let class = builder.add_type(asm, TypeDecl::class("N", "Math"));
    let a = builder.add_method(class, MethodDecl::new("Add").param("x", "System.Int32"));
    let b = builder.add_method(class, MethodDecl::new("Add").param("x", "System.Double"));
    let graph = builder.build();

    assert_eq!(graph.methods_named(class, "Add").collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(graph.find_member(class, "Add"), Some(a));
    assert_eq!(graph.qualified_member_name(b), "N.Math.Add");
    assert!(graph.try_member(crate::MemberId(99)).is_none());
}
