//! Resolver state for one run.
//!
//! `ResolverState` owns every memo table and the error sink of a run. Its
//! methods are split across modules by concern:
//! - `type_resolver` - type names and namespaces
//! - `preferred_name` - the preferred-name helper shared by all members
//! - `member_resolver` - per-type member processing, properties, fields, events
//! - `method_resolver` - method classification
//!
//! The state is created fresh by `ResolutionEngine::run` and consumed into a
//! `Resolution` at the end; nothing survives across runs.

use crate::engine::Resolution;
use crate::options::ResolverOptions;
use crate::recursion::RecursionGuard;
use crate::registry::{InterfaceNameCounters, NameRegistry};
use crate::semantics::{
    EventSemantics, FieldSemantics, MethodSemantics, PropertySemantics, TypeSemantics,
};
use rustc_hash::{FxHashMap, FxHashSet};
use scriptsem_common::limits::MAX_TYPE_NESTING_DEPTH;
use scriptsem_common::{DiagnosticBag, DiagnosticKind};
use scriptsem_model::{MemberId, TypeGraph, TypeId};

/// Resolved data of one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResolvedType {
    pub(crate) semantics: TypeSemantics,
    /// Methods are invoked as global functions.
    pub(crate) global_members: bool,
}

impl ResolvedType {
    pub(crate) fn not_usable() -> Self {
        ResolvedType {
            semantics: TypeSemantics::NotUsable,
            global_members: false,
        }
    }
}

pub(crate) struct ResolverState<'g> {
    pub(crate) graph: &'g TypeGraph,
    pub(crate) options: ResolverOptions,
    pub(crate) types: FxHashMap<TypeId, ResolvedType>,
    /// Local type names taken per script namespace.
    pub(crate) type_names: FxHashMap<String, FxHashSet<String>>,
    /// Member name registries of fully processed types.
    pub(crate) member_names: FxHashMap<TypeId, NameRegistry>,
    pub(crate) methods: FxHashMap<MemberId, MethodSemantics>,
    pub(crate) properties: FxHashMap<MemberId, PropertySemantics>,
    pub(crate) fields: FxHashMap<MemberId, FieldSemantics>,
    pub(crate) events: FxHashMap<MemberId, EventSemantics>,
    pub(crate) interface_names: InterfaceNameCounters,
    pub(crate) diagnostics: DiagnosticBag,
    pub(crate) type_guard: RecursionGuard<TypeId>,
    pub(crate) member_guard: RecursionGuard<TypeId>,
}

impl<'g> ResolverState<'g> {
    pub(crate) fn new(graph: &'g TypeGraph, options: ResolverOptions) -> Self {
        ResolverState {
            graph,
            options,
            types: FxHashMap::default(),
            type_names: FxHashMap::default(),
            member_names: FxHashMap::default(),
            methods: FxHashMap::default(),
            properties: FxHashMap::default(),
            fields: FxHashMap::default(),
            events: FxHashMap::default(),
            interface_names: InterfaceNameCounters::default(),
            diagnostics: DiagnosticBag::new(),
            type_guard: RecursionGuard::new(MAX_TYPE_NESTING_DEPTH),
            member_guard: RecursionGuard::new(MAX_TYPE_NESTING_DEPTH),
        }
    }

    pub(crate) fn into_resolution(self) -> Resolution {
        Resolution {
            types: self.types,
            methods: self.methods,
            properties: self.properties,
            fields: self.fields,
            events: self.events,
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Record an error about a member; `message` receives the qualified member name.
    pub(crate) fn report_member(
        &mut self,
        member: MemberId,
        category: &'static str,
        kind: DiagnosticKind,
        message: impl FnOnce(&str) -> String,
    ) {
        let entity = self.graph.qualified_member_name(member);
        let message = message(&entity);
        self.diagnostics.report(&entity, category, kind, message);
    }

    /// Record an error about a type; `message` receives the type's full name.
    pub(crate) fn report_type(
        &mut self,
        type_id: TypeId,
        category: &'static str,
        kind: DiagnosticKind,
        message: impl FnOnce(&str) -> String,
    ) {
        let entity = self.graph.type_symbol(type_id).full_name.clone();
        let message = message(&entity);
        self.diagnostics.report(&entity, category, kind, message);
    }

    // =========================================================================
    // Shared queries
    // =========================================================================

    /// Whether the declaring type of `member` resolved to a script type.
    /// The type must already be resolved.
    pub(crate) fn declaring_type_usable(&self, member: MemberId) -> bool {
        let declaring = self.graph.member(member).declaring_type;
        self.types
            .get(&declaring)
            .is_some_and(|t| t.semantics.is_usable())
    }

    pub(crate) fn declaring_type_is_global(&self, member: MemberId) -> bool {
        let declaring = self.graph.member(member).declaring_type;
        self.types.get(&declaring).is_some_and(|t| t.global_members)
    }

    pub(crate) fn is_interface_member(&self, member: MemberId) -> bool {
        let declaring = self.graph.member(member).declaring_type;
        self.graph.type_symbol(declaring).is_interface()
    }
}
