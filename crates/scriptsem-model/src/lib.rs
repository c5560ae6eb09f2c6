//! The typed type/member graph the resolver consumes.
//!
//! This crate models what the upstream type checker hands over:
//! - `ids` - arena identifiers (`TypeId`, `MemberId`, `AssemblyId`)
//! - `attributes` - declarative markers and the `AttributeView` lookup capability
//! - `symbols` - `TypeSymbol` and `MemberSymbol` with their closed kind variants
//! - `graph` - the read-only `TypeGraph` arena and its hierarchy queries
//! - `builder` - programmatic graph construction
//! - `document` - serde description of a graph, loadable from JSON
//!
//! Nothing here knows about script names; the graph is never mutated once built.

pub mod attributes;
pub mod builder;
pub mod document;
pub mod graph;
pub mod ids;
pub mod symbols;

pub use attributes::{Attribute, AttributeValue, AttributeView, Marker};
pub use builder::{
    AccessorDecl, EventDecl, FieldDecl, GraphBuilder, MethodDecl, PropertyDecl, TypeDecl,
};
pub use document::{
    EventEntry, FieldEntry, GraphDocument, MemberRef, MethodEntry, ModifierFlags, PropertyEntry,
    TypeEntry,
};
pub use graph::TypeGraph;
pub use ids::{AssemblyId, MemberId, TypeId};
pub use symbols::{
    Accessibility, EventData, MemberKind, MemberModifiers, MemberSymbol, MethodData, Parameter,
    PropertyData, TypeKind, TypeSymbol,
};

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;
#[cfg(test)]
#[path = "../tests/document_tests.rs"]
mod document_tests;
