//! The resolution engine facade.
//!
//! `ResolutionEngine::run` resolves a set of root types (and, on demand, every
//! declaring type, base class and interface they depend on) and returns a
//! `Resolution`: the read-only semantics tables plus the run's diagnostics.
//!
//! # Example
//!
//! ```
//! use scriptsem_model::{GraphBuilder, MethodDecl, TypeDecl};
//! use scriptsem_resolver::{MethodSemantics, ResolutionEngine, ResolverOptions};
//!
//! let mut builder = GraphBuilder::new();
//! let asm = builder.assembly("App");
//! let widget = builder.add_type(asm, TypeDecl::class("App", "Widget"));
//! let render = builder.add_method(widget, MethodDecl::new("Render"));
//! let graph = builder.build();
//!
//! let engine = ResolutionEngine::new(&graph, ResolverOptions::default());
//! let resolution = engine.run([widget], asm);
//! assert_eq!(resolution.type_semantics(widget).name(), Some("App.Widget"));
//! assert_eq!(resolution.method_semantics(render), &MethodSemantics::normal("render"));
//! assert!(!resolution.has_errors());
//! ```

use crate::options::ResolverOptions;
use crate::semantics::{
    EventSemantics, FieldSemantics, MethodSemantics, PropertySemantics, TypeSemantics,
};
use crate::state::{ResolvedType, ResolverState};
use rustc_hash::FxHashMap;
use scriptsem_common::{Diagnostic, DiagnosticBag};
use scriptsem_model::{AssemblyId, MemberId, TypeGraph, TypeId};
use tracing::debug;

/// Runs resolutions over one graph.
pub struct ResolutionEngine<'g> {
    graph: &'g TypeGraph,
    options: ResolverOptions,
}

impl<'g> ResolutionEngine<'g> {
    pub fn new(graph: &'g TypeGraph, options: ResolverOptions) -> Self {
        ResolutionEngine { graph, options }
    }

    /// Resolve `roots` with fresh caches.
    ///
    /// Roots are processed in ascending full-name order. A root is processed
    /// when it belongs to `main_assembly` or is public.
    #[must_use]
    pub fn run(
        &self,
        roots: impl IntoIterator<Item = TypeId>,
        main_assembly: AssemblyId,
    ) -> Resolution {
        let graph = self.graph;
        let mut roots: Vec<TypeId> = roots.into_iter().collect();
        roots.sort_by(|&a, &b| {
            graph
                .type_symbol(a)
                .full_name
                .cmp(&graph.type_symbol(b).full_name)
                .then(a.cmp(&b))
        });
        roots.dedup();

        let mut state = ResolverState::new(graph, self.options.clone());
        for &root in &roots {
            if graph.type_symbol(root).assembly == main_assembly || graph.is_public_type(root) {
                state.ensure_type(root);
                state.ensure_members(root);
            }
        }

        debug!(
            roots = roots.len(),
            types = state.types.len(),
            methods = state.methods.len(),
            diagnostics = state.diagnostics.len(),
            minimize_names = self.options.minimize_names,
            "resolution finished"
        );
        state.into_resolution()
    }

    /// Resolve every type of the graph.
    #[must_use]
    pub fn run_all(&self, main_assembly: AssemblyId) -> Resolution {
        self.run(self.graph.type_ids(), main_assembly)
    }
}

/// The outcome of one run.
///
/// Lookups panic for entities that were not resolved by the run; the `try_*`
/// variants return `None` instead.
#[derive(Debug)]
pub struct Resolution {
    pub(crate) types: FxHashMap<TypeId, ResolvedType>,
    pub(crate) methods: FxHashMap<MemberId, MethodSemantics>,
    pub(crate) properties: FxHashMap<MemberId, PropertySemantics>,
    pub(crate) fields: FxHashMap<MemberId, FieldSemantics>,
    pub(crate) events: FxHashMap<MemberId, EventSemantics>,
    pub(crate) diagnostics: DiagnosticBag,
}

impl Resolution {
    pub fn type_semantics(&self, id: TypeId) -> &TypeSemantics {
        match self.try_type_semantics(id) {
            Some(semantics) => semantics,
            None => panic!("type {id} was not resolved in this run"),
        }
    }

    pub fn try_type_semantics(&self, id: TypeId) -> Option<&TypeSemantics> {
        self.types.get(&id).map(|t| &t.semantics)
    }

    /// Whether the methods of `id` are global functions.
    pub fn is_global_members(&self, id: TypeId) -> bool {
        self.types.get(&id).is_some_and(|t| t.global_members)
    }

    pub fn method_semantics(&self, id: MemberId) -> &MethodSemantics {
        match self.methods.get(&id) {
            Some(semantics) => semantics,
            None => panic!("method {id} was not resolved in this run"),
        }
    }

    pub fn try_method_semantics(&self, id: MemberId) -> Option<&MethodSemantics> {
        self.methods.get(&id)
    }

    pub fn property_semantics(&self, id: MemberId) -> &PropertySemantics {
        match self.properties.get(&id) {
            Some(semantics) => semantics,
            None => panic!("property {id} was not resolved in this run"),
        }
    }

    pub fn try_property_semantics(&self, id: MemberId) -> Option<&PropertySemantics> {
        self.properties.get(&id)
    }

    pub fn field_semantics(&self, id: MemberId) -> &FieldSemantics {
        match self.fields.get(&id) {
            Some(semantics) => semantics,
            None => panic!("field {id} was not resolved in this run"),
        }
    }

    pub fn try_field_semantics(&self, id: MemberId) -> Option<&FieldSemantics> {
        self.fields.get(&id)
    }

    pub fn event_semantics(&self, id: MemberId) -> &EventSemantics {
        match self.events.get(&id) {
            Some(semantics) => semantics,
            None => panic!("event {id} was not resolved in this run"),
        }
    }

    pub fn try_event_semantics(&self, id: MemberId) -> Option<&EventSemantics> {
        self.events.get(&id)
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    /// Drain the diagnostics, in the order they were first reported.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn resolved_type_count(&self) -> usize {
        self.types.len()
    }
}
