//! scriptsem: script naming and invocation semantics for a C#-to-JavaScript
//! compiler.
//!
//! The workspace is split into:
//! - `scriptsem-common` - name mangling, diagnostics, limits
//! - `scriptsem-model` - the type graph the resolver reads, its builder and
//!   JSON document format
//! - `scriptsem-resolver` - the resolution engine
//!
//! This crate re-exports all three and adds file-driven entry points plus
//! tracing setup.
//!
//! # Example
//!
//! ```
//! use scriptsem::{GraphBuilder, MethodDecl, ResolverOptions, TypeDecl, resolve_graph};
//!
//! let mut builder = GraphBuilder::new();
//! let asm = builder.assembly("App");
//! let list = builder.add_type(asm, TypeDecl::class("App", "List"));
//! builder.add_method(list, MethodDecl::new("Add").param("item", "System.Object"));
//! let graph = builder.build();
//!
//! let report = resolve_graph(&graph, "App", ResolverOptions::default()).unwrap();
//! assert_eq!(report.methods["App.List.Add(System.Object)"].name(), Some("add"));
//! ```

pub mod tracing_config;

pub use scriptsem_common::{Diagnostic, DiagnosticBag, DiagnosticKind};
pub use scriptsem_model::{
    Accessibility, AssemblyId, Attribute, AttributeValue, AttributeView, EventDecl, FieldDecl,
    GraphBuilder, GraphDocument, Marker, MemberId, MethodDecl, PropertyDecl, TypeDecl, TypeGraph,
    TypeId, TypeKind,
};
pub use scriptsem_resolver::{
    EventSemantics, FieldSemantics, MethodSemantics, PropertySemantics, Resolution,
    ResolutionEngine, ResolutionReport, ResolverOptions, TypeSemantics,
};

/// Re-exported crates, for items not lifted to the top level.
pub mod common {
    pub use scriptsem_common::*;
}
pub mod model {
    pub use scriptsem_model::*;
}
pub mod resolver {
    pub use scriptsem_resolver::*;
}

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::{debug, info_span};

/// Resolve every type of `graph` with `main_assembly` as the assembly being
/// compiled, and snapshot the result.
pub fn resolve_graph(
    graph: &TypeGraph,
    main_assembly: &str,
    options: ResolverOptions,
) -> Result<ResolutionReport> {
    let Some(main) = graph.assembly_by_name(main_assembly) else {
        bail!("unknown main assembly '{main_assembly}'");
    };
    let _span = info_span!("resolve", main_assembly).entered();
    let resolution = ResolutionEngine::new(graph, options).run_all(main);
    debug!(
        main_assembly,
        types = resolution.resolved_type_count(),
        diagnostics = resolution.diagnostics().len(),
        "resolved graph"
    );
    Ok(resolution.report(graph))
}

/// Load a graph document and optional options file, then resolve.
pub fn resolve_files(
    graph_path: &Path,
    options_path: Option<&Path>,
    main_assembly: &str,
) -> Result<ResolutionReport> {
    let graph = TypeGraph::load(graph_path)?;
    let options = match options_path {
        Some(path) => ResolverOptions::load(path)?,
        None => ResolverOptions::default(),
    };
    resolve_graph(&graph, main_assembly, options)
        .with_context(|| format!("failed to resolve {}", graph_path.display()))
}
