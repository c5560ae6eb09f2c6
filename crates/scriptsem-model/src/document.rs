//! JSON description of a `TypeGraph`.
//!
//! The upstream type checker hands its model over as a `GraphDocument`: types
//! refer to each other by dotted full name, members refer to the members they
//! override or implement through `MemberRef`s. Loading links these names into
//! arena ids and rejects dangling or ambiguous references.
//!
//! A type may only reference types that appear earlier in the document, which
//! keeps nesting and inheritance acyclic.

use crate::attributes::Attribute;
use crate::builder::{
    AccessorDecl, EventDecl, FieldDecl, GraphBuilder, MethodDecl, PropertyDecl, TypeDecl,
};
use crate::graph::TypeGraph;
use crate::ids::{MemberId, TypeId};
use crate::symbols::{Accessibility, MemberKind, MemberModifiers, Parameter, TypeKind};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

// =============================================================================
// Document Types
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    /// Assembly names. Assemblies referenced by types are added implicitly.
    #[serde(default)]
    pub assemblies: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    pub assembly: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    /// Own type parameters, excluding those of the declaring type.
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Full name of the enclosing type.
    #[serde(default)]
    pub declaring_type: Option<String>,
    /// Full names of the base class and implemented interfaces.
    #[serde(default)]
    pub base_types: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub events: Vec<EventEntry>,
}

/// Reference to a member of an earlier type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRef {
    /// Full name of the declaring type.
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    /// Parameter type names, to pick one overload.
    #[serde(default)]
    pub parameters: Option<Vec<String>>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierFlags {
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
}

impl ModifierFlags {
    fn to_modifiers(self, overrides: bool) -> MemberModifiers {
        let mut modifiers = MemberModifiers::empty();
        modifiers.set(MemberModifiers::STATIC, self.is_static);
        modifiers.set(MemberModifiers::VIRTUAL, self.is_virtual);
        modifiers.set(MemberModifiers::ABSTRACT, self.is_abstract);
        modifiers.set(MemberModifiers::SEALED, self.is_sealed);
        modifiers.set(MemberModifiers::OVERRIDE, overrides);
        modifiers
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(flatten)]
    pub flags: ModifierFlags,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub overrides: Option<MemberRef>,
    #[serde(default)]
    pub implements: Vec<MemberRef>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

fn default_true() -> bool {
    true
}

fn default_member_type() -> String {
    "System.Object".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEntry {
    pub name: String,
    #[serde(rename = "type", default = "default_member_type")]
    pub type_name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(flatten)]
    pub flags: ModifierFlags,
    /// Indexer parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default = "default_true")]
    pub has_getter: bool,
    #[serde(default = "default_true")]
    pub has_setter: bool,
    #[serde(default)]
    pub getter_accessibility: Option<Accessibility>,
    #[serde(default)]
    pub setter_accessibility: Option<Accessibility>,
    #[serde(default)]
    pub getter_attributes: Vec<Attribute>,
    #[serde(default)]
    pub setter_attributes: Vec<Attribute>,
    #[serde(default)]
    pub overrides: Option<MemberRef>,
    #[serde(default)]
    pub implements: Vec<MemberRef>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEntry {
    pub name: String,
    #[serde(rename = "type", default = "default_member_type")]
    pub type_name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(flatten)]
    pub flags: ModifierFlags,
    #[serde(default)]
    pub adder_attributes: Vec<Attribute>,
    #[serde(default)]
    pub remover_attributes: Vec<Attribute>,
    #[serde(default)]
    pub overrides: Option<MemberRef>,
    #[serde(default)]
    pub implements: Vec<MemberRef>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

// =============================================================================
// Loading
// =============================================================================

/// Member kinds a `MemberRef` may point at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RefKind {
    Method,
    Property,
    Event,
}

impl RefKind {
    fn accepts(self, kind: &MemberKind) -> bool {
        match (self, kind) {
            // Accessors are not own members, so a method ref never lands on one.
            (RefKind::Method, MemberKind::Method(_)) => true,
            (RefKind::Property, MemberKind::Property(_)) => true,
            (RefKind::Event, MemberKind::Event(_)) => true,
            _ => false,
        }
    }
}

struct Linker {
    builder: GraphBuilder,
}

impl Linker {
    fn type_ref(&self, full_name: &str, context: &str) -> Result<TypeId> {
        match self.builder.graph().type_by_full_name(full_name) {
            Some(id) => Ok(id),
            None => bail!("{context}: unknown type '{full_name}' (types must be declared before use)"),
        }
    }

    fn member_ref(&self, reference: &MemberRef, kind: RefKind, context: &str) -> Result<MemberId> {
        let graph = self.builder.graph();
        let type_id = self.type_ref(&reference.type_name, context)?;
        let candidates: Vec<MemberId> = graph
            .type_symbol(type_id)
            .members
            .iter()
            .copied()
            .filter(|&m| {
                let member = graph.member(m);
                member.name == reference.name
                    && kind.accepts(&member.kind)
                    && reference.parameters.as_ref().is_none_or(|types| {
                        member
                            .parameters()
                            .iter()
                            .map(|p| p.type_name.as_str())
                            .eq(types.iter().map(String::as_str))
                    })
            })
            .collect();

        match candidates.as_slice() {
            [single] => Ok(*single),
            [] => bail!(
                "{context}: no member '{}.{}' matches the reference",
                reference.type_name,
                reference.name
            ),
            _ => bail!(
                "{context}: reference to '{}.{}' is ambiguous; list its parameter types",
                reference.type_name,
                reference.name
            ),
        }
    }

    fn member_refs(&self, refs: &[MemberRef], kind: RefKind, context: &str) -> Result<Vec<MemberId>> {
        refs.iter()
            .map(|r| self.member_ref(r, kind, context))
            .collect()
    }

    fn add_type(&mut self, entry: &TypeEntry) -> Result<()> {
        let context = if entry.namespace.is_empty() {
            format!("type '{}'", entry.name)
        } else {
            format!("type '{}.{}'", entry.namespace, entry.name)
        };

        let assembly = self.builder.assembly(&entry.assembly);
        let declaring_type = entry
            .declaring_type
            .as_deref()
            .map(|name| self.type_ref(name, &context))
            .transpose()?;
        let base_types = entry
            .base_types
            .iter()
            .map(|name| self.type_ref(name, &context))
            .collect::<Result<Vec<_>>>()?;

        let decl = TypeDecl {
            namespace: entry.namespace.clone(),
            name: entry.name.clone(),
            kind: entry.kind,
            accessibility: entry.accessibility,
            is_static: entry.is_static,
            type_parameters: entry.type_parameters.clone(),
            declaring_type,
            base_types,
            attributes: entry.attributes.clone(),
        };
        let type_id = self.builder.add_type(assembly, decl);

        for method in &entry.methods {
            let context = format!("method '{}' of {context}", method.name);
            let overrides = method
                .overrides
                .as_ref()
                .map(|r| self.member_ref(r, RefKind::Method, &context))
                .transpose()?;
            let implements = self.member_refs(&method.implements, RefKind::Method, &context)?;
            self.builder.add_method(
                type_id,
                MethodDecl {
                    name: method.name.clone(),
                    accessibility: method.accessibility,
                    modifiers: method.flags.to_modifiers(overrides.is_some()),
                    parameters: method.parameters.clone(),
                    type_parameters: method.type_parameters.clone(),
                    overrides,
                    implements,
                    attributes: method.attributes.clone(),
                },
            );
        }

        for property in &entry.properties {
            let context = format!("property '{}' of {context}", property.name);
            let overrides = property
                .overrides
                .as_ref()
                .map(|r| self.member_ref(r, RefKind::Property, &context))
                .transpose()?;
            let implements = self.member_refs(&property.implements, RefKind::Property, &context)?;
            let accessor = |present: bool, accessibility: Option<Accessibility>, attributes: &[Attribute]| {
                present.then(|| AccessorDecl {
                    accessibility,
                    attributes: attributes.to_vec(),
                })
            };
            self.builder.add_property(
                type_id,
                PropertyDecl {
                    name: property.name.clone(),
                    type_name: property.type_name.clone(),
                    accessibility: property.accessibility,
                    modifiers: property.flags.to_modifiers(overrides.is_some()),
                    parameters: property.parameters.clone(),
                    getter: accessor(
                        property.has_getter,
                        property.getter_accessibility,
                        &property.getter_attributes,
                    ),
                    setter: accessor(
                        property.has_setter,
                        property.setter_accessibility,
                        &property.setter_attributes,
                    ),
                    overrides,
                    implements,
                    attributes: property.attributes.clone(),
                },
            );
        }

        for field in &entry.fields {
            let mut modifiers = MemberModifiers::empty();
            modifiers.set(MemberModifiers::STATIC, field.is_static);
            self.builder.add_field(
                type_id,
                FieldDecl {
                    name: field.name.clone(),
                    accessibility: field.accessibility,
                    modifiers,
                    attributes: field.attributes.clone(),
                },
            );
        }

        for event in &entry.events {
            let context = format!("event '{}' of {context}", event.name);
            let overrides = event
                .overrides
                .as_ref()
                .map(|r| self.member_ref(r, RefKind::Event, &context))
                .transpose()?;
            let implements = self.member_refs(&event.implements, RefKind::Event, &context)?;
            self.builder.add_event(
                type_id,
                EventDecl {
                    name: event.name.clone(),
                    type_name: event.type_name.clone(),
                    accessibility: event.accessibility,
                    modifiers: event.flags.to_modifiers(overrides.is_some()),
                    adder: AccessorDecl {
                        accessibility: None,
                        attributes: event.adder_attributes.clone(),
                    },
                    remover: AccessorDecl {
                        accessibility: None,
                        attributes: event.remover_attributes.clone(),
                    },
                    overrides,
                    implements,
                    attributes: event.attributes.clone(),
                },
            );
        }
        Ok(())
    }
}

impl TypeGraph {
    /// Link a document into a graph.
    pub fn from_document(document: &GraphDocument) -> Result<TypeGraph> {
        let mut linker = Linker {
            builder: GraphBuilder::new(),
        };
        for assembly in &document.assemblies {
            linker.builder.assembly(assembly);
        }
        for entry in &document.types {
            linker.add_type(entry)?;
        }
        let graph = linker.builder.build();
        debug!(
            types = graph.type_count(),
            members = graph.member_count(),
            "loaded type graph"
        );
        Ok(graph)
    }

    /// Parse and link a JSON graph document.
    pub fn from_json_str(source: &str) -> Result<TypeGraph> {
        let document: GraphDocument =
            serde_json::from_str(source).context("failed to parse graph document")?;
        Self::from_document(&document)
    }

    /// Read, parse and link a JSON graph document from disk.
    pub fn load(path: &Path) -> Result<TypeGraph> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read graph document: {}", path.display()))?;
        Self::from_json_str(&source)
            .with_context(|| format!("failed to load graph document: {}", path.display()))
    }
}
