//! Shared helpers for resolver tests.

use crate::{MethodSemantics, Resolution, ResolutionEngine, ResolverOptions};
use scriptsem_model::{AssemblyId, Attribute, Marker, TypeGraph};

/// Resolve every type of `graph` with the first assembly as the main one.
pub(crate) fn resolve(graph: &TypeGraph) -> Resolution {
    ResolutionEngine::new(graph, ResolverOptions::default()).run_all(AssemblyId(0))
}

pub(crate) fn resolve_minimized(graph: &TypeGraph) -> Resolution {
    ResolutionEngine::new(graph, ResolverOptions::minimized()).run_all(AssemblyId(0))
}

pub(crate) fn script_name(name: &str) -> Attribute {
    Attribute::with_str(Marker::ScriptName, name)
}

pub(crate) fn marker(marker: Marker) -> Attribute {
    Attribute::marker(marker)
}

/// Name of a `NormalMethod`; panics on other semantics.
pub(crate) fn normal_name(semantics: &MethodSemantics) -> &str {
    match semantics {
        MethodSemantics::NormalMethod { name, .. } => name,
        other => panic!("expected a normal method, got {other:?}"),
    }
}

/// `entity:category` keys of all diagnostics, in report order.
pub(crate) fn diagnostic_keys(resolution: &Resolution) -> Vec<String> {
    resolution.diagnostics().keys().map(str::to_string).collect()
}
