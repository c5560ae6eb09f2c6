//! Name-keyed snapshot of a `Resolution`.
//!
//! Keys are source names, so two runs over graphs that declare the same
//! entities in different orders produce equal reports.
//!
//! Member keys are `<type full name>.<member name>`, with the parameter type
//! list appended for methods (`N.T.Add(System.Int32)`) and indexers
//! (`N.T.Item[System.Int32]`). Accessors appear under their own method names.

use crate::engine::Resolution;
use crate::semantics::{
    EventSemantics, FieldSemantics, MethodSemantics, PropertySemantics, TypeSemantics,
};
use anyhow::{Context, Result};
use scriptsem_common::Diagnostic;
use scriptsem_model::{MemberKind, MemberSymbol, TypeGraph};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReport {
    pub semantics: TypeSemantics,
    pub global_members: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub types: BTreeMap<String, TypeReport>,
    pub methods: BTreeMap<String, MethodSemantics>,
    pub properties: BTreeMap<String, PropertySemantics>,
    pub fields: BTreeMap<String, FieldSemantics>,
    pub events: BTreeMap<String, EventSemantics>,
    pub diagnostics: Vec<Diagnostic>,
}

fn parameter_list(member: &MemberSymbol) -> String {
    member
        .parameters()
        .iter()
        .map(|p| p.type_name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Report key of a member.
pub fn member_key(graph: &TypeGraph, member: &MemberSymbol) -> String {
    let owner = &graph.type_symbol(member.declaring_type).full_name;
    match &member.kind {
        MemberKind::Method(_) => format!("{owner}.{}({})", member.name, parameter_list(member)),
        MemberKind::Property(p) if !p.parameters.is_empty() => {
            format!("{owner}.{}[{}]", member.name, parameter_list(member))
        }
        _ => format!("{owner}.{}", member.name),
    }
}

impl ResolutionReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize resolution report")
    }
}

impl Resolution {
    /// Snapshot this resolution keyed by the source names in `graph`.
    pub fn report(&self, graph: &TypeGraph) -> ResolutionReport {
        let key = |id| member_key(graph, graph.member(id));
        ResolutionReport {
            types: self
                .types
                .iter()
                .map(|(&id, resolved)| {
                    let report = TypeReport {
                        semantics: resolved.semantics.clone(),
                        global_members: resolved.global_members,
                    };
                    (graph.type_symbol(id).full_name.clone(), report)
                })
                .collect(),
            methods: self
                .methods
                .iter()
                .map(|(&id, s)| (key(id), s.clone()))
                .collect(),
            properties: self
                .properties
                .iter()
                .map(|(&id, s)| (key(id), s.clone()))
                .collect(),
            fields: self
                .fields
                .iter()
                .map(|(&id, s)| (key(id), s.clone()))
                .collect(),
            events: self
                .events
                .iter()
                .map(|(&id, s)| (key(id), s.clone()))
                .collect(),
            diagnostics: self.diagnostics.iter().cloned().collect(),
        }
    }
}
