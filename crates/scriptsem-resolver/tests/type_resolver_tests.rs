use crate::test_support::{diagnostic_keys, marker, resolve, script_name};
use crate::{MethodSemantics, ResolutionEngine, ResolverOptions, TypeSemantics};
use scriptsem_model::{Attribute, FieldDecl, GraphBuilder, Marker, MethodDecl, TypeDecl};

fn type_name(resolution: &crate::Resolution, id: scriptsem_model::TypeId) -> &str {
    resolution
        .type_semantics(id)
        .name()
        .expect("type should be usable")
}

// =============================================================================
// Default names
// =============================================================================

#[test]
fn test_public_type_keeps_source_name() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let widget = builder.add_type(asm, TypeDecl::class("App.Controls", "Widget"));
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(
        resolution.type_semantics(widget),
        &TypeSemantics::normal("App.Controls.Widget", true)
    );
    assert!(!resolution.has_errors());
}

#[test]
fn test_generic_type_gets_arity_suffix() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let map = builder.add_type(asm, TypeDecl::class("N", "Map").type_params(&["K", "V"]));
    let graph = builder.build();

    assert_eq!(type_name(&resolve(&graph), map), "N.Map$2");
}

#[test]
fn test_non_public_type_gets_dollar_prefix() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let helper = builder.add_type(asm, TypeDecl::class("N", "Helper").internal());
    let preserved = builder.add_type(
        asm,
        TypeDecl::class("N", "Kept").internal().attr(marker(Marker::PreserveName)),
    );
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(type_name(&resolution, helper), "N.$Helper");
    assert_eq!(type_name(&resolution, preserved), "N.Kept");
}

#[test]
fn test_global_namespace_type() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let program = builder.add_type(asm, TypeDecl::class("", "Program"));
    let graph = builder.build();

    assert_eq!(type_name(&resolve(&graph), program), "Program");
}

// =============================================================================
// Nested types
// =============================================================================

#[test]
fn test_nested_type_is_prefixed_by_declaring_type() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let outer = builder.add_type(asm, TypeDecl::class("N", "Outer").type_params(&["T"]));
    let inner = builder.add_type(asm, TypeDecl::nested(outer, "Inner").type_params(&["U"]));
    let hidden = builder.add_type(asm, TypeDecl::nested(outer, "Hidden").private());
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(type_name(&resolution, outer), "N.Outer$1");
    assert_eq!(type_name(&resolution, inner), "N.Outer$1$Inner$1");
    assert_eq!(type_name(&resolution, hidden), "N.$Outer$1$Hidden");
}

#[test]
fn test_nested_type_follows_declaring_namespace() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let outer = builder.add_type(
        asm,
        TypeDecl::class("N", "Outer").attr(Attribute::with_str(Marker::ScriptNamespace, "Ui")),
    );
    let inner = builder.add_type(asm, TypeDecl::nested(outer, "Inner"));
    let renamed = builder.add_type(asm, TypeDecl::nested(outer, "Renamed").attr(script_name("Custom")));
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(type_name(&resolution, outer), "Ui.Outer");
    assert_eq!(type_name(&resolution, inner), "Ui.Outer$Inner");
    assert_eq!(type_name(&resolution, renamed), "Ui.Custom");
}

#[test]
fn test_namespace_marker_on_nested_type_is_rejected() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let outer = builder.add_type(asm, TypeDecl::class("N", "Outer"));
    let inner = builder.add_type(
        asm,
        TypeDecl::nested(outer, "Inner").attr(marker(Marker::IgnoreNamespace)),
    );
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(diagnostic_keys(&resolution), vec!["N.Outer.Inner:Namespace"]);
    assert_eq!(type_name(&resolution, inner), "N.Outer$Inner");
}

// =============================================================================
// Explicit names and namespaces
// =============================================================================

#[test]
fn test_script_name_on_type() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let renamed = builder.add_type(asm, TypeDecl::class("N", "Widget").attr(script_name("Gadget")));
    let internal = builder.add_type(
        asm,
        TypeDecl::class("N", "Helper").internal().attr(script_name("helper")),
    );
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(type_name(&resolution, renamed), "N.Gadget");
    assert_eq!(type_name(&resolution, internal), "N.helper");
}

#[test]
fn test_invalid_script_name_on_type_falls_back() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let widget = builder.add_type(asm, TypeDecl::class("N", "Widget").attr(script_name("1abc")));
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(type_name(&resolution, widget), "N.Widget");
    let diagnostic = resolution.diagnostics().get("N.Widget", "Name").expect("diagnostic");
    assert_eq!(diagnostic.kind, scriptsem_common::DiagnosticKind::InvalidName);
}

#[test]
fn test_ignore_namespace_and_script_namespace() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let ignored = builder.add_type(asm, TypeDecl::class("N", "Plain").attr(marker(Marker::IgnoreNamespace)));
    let moved = builder.add_type(
        asm,
        TypeDecl::class("N", "Moved").attr(Attribute::with_str(Marker::ScriptNamespace, "Company.Ui")),
    );
    let emptied = builder.add_type(
        asm,
        TypeDecl::class("N", "Emptied").attr(Attribute::with_str(Marker::ScriptNamespace, "")),
    );
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(type_name(&resolution, ignored), "Plain");
    assert_eq!(type_name(&resolution, moved), "Company.Ui.Moved");
    assert_eq!(type_name(&resolution, emptied), "Emptied");
    assert!(!resolution.has_errors());
}

#[test]
fn test_conflicting_namespace_markers() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let both = builder.add_type(
        asm,
        TypeDecl::class("N", "Both")
            .attr(marker(Marker::IgnoreNamespace))
            .attr(Attribute::with_str(Marker::ScriptNamespace, "Ui")),
    );
    let invalid = builder.add_type(
        asm,
        TypeDecl::class("N", "Invalid").attr(Attribute::with_str(Marker::ScriptNamespace, "Ui..X")),
    );
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(type_name(&resolution, both), "Ui.Both");
    assert_eq!(type_name(&resolution, invalid), "N.Invalid");
    let both_error = resolution.diagnostics().get("N.Both", "Namespace").expect("combination");
    assert_eq!(both_error.kind, scriptsem_common::DiagnosticKind::IllegalCombination);
    let invalid_error = resolution.diagnostics().get("N.Invalid", "Namespace").expect("invalid");
    assert_eq!(invalid_error.kind, scriptsem_common::DiagnosticKind::InvalidName);
}

// =============================================================================
// NonScriptable and Imported
// =============================================================================

#[test]
fn test_non_scriptable_type_is_not_usable() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let hidden = builder.add_type(asm, TypeDecl::class("N", "Hidden").attr(marker(Marker::NonScriptable)));
    let inner = builder.add_type(asm, TypeDecl::nested(hidden, "Inner"));
    let method = builder.add_method(hidden, MethodDecl::new("Run").attr(script_name("not valid")));
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(resolution.type_semantics(hidden), &TypeSemantics::NotUsable);
    assert_eq!(resolution.type_semantics(inner), &TypeSemantics::NotUsable);
    assert_eq!(resolution.method_semantics(method), &MethodSemantics::NotUsable);
    assert!(!resolution.has_errors());
}

#[test]
fn test_imported_type_generates_no_code() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let native = builder.add_type(asm, TypeDecl::class("N", "Native").internal().attr(marker(Marker::Imported)));
    let graph = builder.build();

    assert_eq!(
        resolve(&graph).type_semantics(native),
        &TypeSemantics::normal("N.Native", false)
    );
}

// =============================================================================
// GlobalMethods
// =============================================================================

#[test]
fn test_global_methods_type() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let helpers = builder.add_type(
        asm,
        TypeDecl::class("N", "Helpers").static_type().attr(marker(Marker::GlobalMethods)),
    );
    let method = builder.add_method(helpers, MethodDecl::new("DoIt").static_());
    let graph = builder.build();

    let resolution = resolve(&graph);
    assert_eq!(type_name(&resolution, helpers), "Helpers");
    assert!(resolution.is_global_members(helpers));
    assert_eq!(
        resolution.method_semantics(method),
        &MethodSemantics::NormalMethod {
            name: "doIt".to_string(),
            generates_code: true,
            ignores_generic_args: false,
            is_global: true,
        }
    );
}

#[test]
fn test_global_methods_requirements() {
    let mut builder = GraphBuilder::new();
    let asm = builder.assembly("App");
    let instance = builder.add_type(asm, TypeDecl::class("N", "Instance").attr(marker(Marker::GlobalMethods)));
    let with_field = builder.add_type(
        asm,
        TypeDecl::class("N", "WithField").static_type().attr(marker(Marker::GlobalMethods)),
    );
    builder.add_field(with_field, FieldDecl::new("Counter").static_());
    let outer = builder.add_type(asm, TypeDecl::class("N", "Outer"));
    let nested = builder.add_type(
        asm,
        TypeDecl::nested(outer, "Nested").static_type().attr(marker(Marker::GlobalMethods)),
    );
    let graph = builder.build();

    let resolution = resolve(&graph);
    for (id, full_name, script_name) in [
        (instance, "N.Instance", "N.Instance"),
        (with_field, "N.WithField", "N.WithField"),
        (nested, "N.Outer.Nested", "N.Outer$Nested"),
    ] {
        assert!(resolution.diagnostics().contains(full_name, "GlobalMethods"), "{full_name}");
        assert!(!resolution.is_global_members(id));
        assert_eq!(type_name(&resolution, id), script_name);
    }
}

// =============================================================================
// Root selection
// =============================================================================

#[test]
fn test_roots_outside_main_assembly_must_be_public() {
    let mut builder = GraphBuilder::new();
    let app = builder.assembly("App");
    let lib = builder.assembly("Lib");
    let local = builder.add_type(app, TypeDecl::class("App", "Local").internal());
    let exported = builder.add_type(lib, TypeDecl::class("Lib", "Exported"));
    let hidden = builder.add_type(lib, TypeDecl::class("Lib", "Hidden").internal());
    let graph = builder.build();

    let resolution = ResolutionEngine::new(&graph, ResolverOptions::default()).run_all(app);
    assert_eq!(type_name(&resolution, local), "App.$Local");
    assert_eq!(type_name(&resolution, exported), "Lib.Exported");
    assert!(resolution.try_type_semantics(hidden).is_none());
    assert_eq!(resolution.resolved_type_count(), 2);
}

#[test]
fn test_dependencies_are_resolved_on_demand() {
    let mut builder = GraphBuilder::new();
    let app = builder.assembly("App");
    let lib = builder.assembly("Lib");
    let base = builder.add_type(lib, TypeDecl::class("Lib", "Base").internal());
    let derived = builder.add_type(app, TypeDecl::class("App", "Derived").base(base));
    let graph = builder.build();

    let resolution = ResolutionEngine::new(&graph, ResolverOptions::default()).run([derived], app);
    assert_eq!(type_name(&resolution, base), "Lib.$Base");
}

#[test]
#[should_panic(expected = "was not resolved")]
fn test_lookup_of_unresolved_type_panics() {
    let mut builder = GraphBuilder::new();
    let app = builder.assembly("App");
    let lib = builder.assembly("Lib");
    let _ = builder.add_type(app, TypeDecl::class("App", "Local"));
    let hidden = builder.add_type(lib, TypeDecl::class("Lib", "Hidden").internal());
    let graph = builder.build();

    let resolution = ResolutionEngine::new(&graph, ResolverOptions::default()).run_all(app);
    let _ = resolution.type_semantics(hidden);
}
