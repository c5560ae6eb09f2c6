//! Type and member symbols.
//!
//! Members are a closed tagged variant (`MemberKind`) rather than a trait
//! hierarchy: the resolver dispatches on the four kinds with exhaustive matches.

use crate::attributes::{Attribute, AttributeValue, AttributeView, Marker};
use crate::ids::{AssemblyId, MemberId, TypeId};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// =============================================================================
// Accessibility
// =============================================================================

/// Declared accessibility of a type or member.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    #[default]
    Public,
    Protected,
    ProtectedOrInternal,
    Internal,
    ProtectedAndInternal,
    Private,
}

impl Accessibility {
    /// Whether code outside the declaring assembly can see the entity,
    /// assuming its container is visible.
    pub fn is_externally_visible(self) -> bool {
        matches!(
            self,
            Accessibility::Public | Accessibility::Protected | Accessibility::ProtectedOrInternal
        )
    }
}

// =============================================================================
// Type Kind
// =============================================================================

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

// =============================================================================
// Modifiers
// =============================================================================

bitflags! {
    /// Member modifiers relevant to naming.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MemberModifiers: u8 {
        const STATIC = 1 << 0;
        const OVERRIDE = 1 << 1;
        const VIRTUAL = 1 << 2;
        const ABSTRACT = 1 << 3;
        const SEALED = 1 << 4;
    }
}

// =============================================================================
// Parameters
// =============================================================================

/// A method, indexer or accessor parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Full name of the parameter type, used for canonical ordering.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

// =============================================================================
// TypeSymbol
// =============================================================================

/// A declared type.
#[derive(Clone, Debug)]
pub struct TypeSymbol {
    pub id: TypeId,
    /// Source identifier, without arity.
    pub name: String,
    /// Source namespace (of the outermost type for nested types).
    pub namespace: String,
    /// Dotted source name including namespace and enclosing types, e.g. `N.Outer.Inner`.
    pub full_name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub assembly: AssemblyId,
    /// Type parameters, the declaring type's first.
    pub type_parameters: Vec<String>,
    pub declaring_type: Option<TypeId>,
    /// Direct base class and implemented interfaces.
    pub base_types: Vec<TypeId>,
    /// Own members in declaration order. Accessors are not listed.
    pub members: Vec<MemberId>,
    pub attributes: Vec<Attribute>,
}

impl TypeSymbol {
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

impl AttributeView for TypeSymbol {
    fn positional_args(&self, marker: Marker) -> Option<&[AttributeValue]> {
        self.attributes.positional_args(marker)
    }
}

// =============================================================================
// MemberSymbol
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct MethodData {
    pub parameters: Vec<Parameter>,
    pub type_parameters: Vec<String>,
    /// The property or event this method is an accessor of.
    pub accessor_of: Option<MemberId>,
}

#[derive(Clone, Debug, Default)]
pub struct PropertyData {
    /// Non-empty for indexers.
    pub parameters: Vec<Parameter>,
    pub getter: Option<MemberId>,
    pub setter: Option<MemberId>,
}

#[derive(Clone, Debug, Default)]
pub struct EventData {
    pub adder: Option<MemberId>,
    pub remover: Option<MemberId>,
}

/// Kind-specific member payload.
#[derive(Clone, Debug)]
pub enum MemberKind {
    Method(MethodData),
    Property(PropertyData),
    Field,
    Event(EventData),
}

/// A member of a type.
#[derive(Clone, Debug)]
pub struct MemberSymbol {
    pub id: MemberId,
    pub name: String,
    pub declaring_type: TypeId,
    pub accessibility: Accessibility,
    pub modifiers: MemberModifiers,
    /// The base member this member overrides.
    pub overridden: Option<MemberId>,
    /// Interface members this member implements.
    pub implements: Vec<MemberId>,
    pub attributes: Vec<Attribute>,
    pub kind: MemberKind,
}

impl MemberSymbol {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MemberModifiers::STATIC)
    }

    pub fn is_override(&self) -> bool {
        self.modifiers.contains(MemberModifiers::OVERRIDE)
    }

    /// Virtual, abstract or override, and not sealed.
    pub fn is_overridable(&self) -> bool {
        self.modifiers.intersects(
            MemberModifiers::VIRTUAL | MemberModifiers::ABSTRACT | MemberModifiers::OVERRIDE,
        ) && !self.modifiers.contains(MemberModifiers::SEALED)
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method(_))
    }

    pub fn is_indexer(&self) -> bool {
        matches!(&self.kind, MemberKind::Property(p) if !p.parameters.is_empty())
    }

    /// Parameters of a method or indexer; empty for other kinds.
    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            MemberKind::Method(m) => &m.parameters,
            MemberKind::Property(p) => &p.parameters,
            MemberKind::Field | MemberKind::Event(_) => &[],
        }
    }

    /// Method type parameters; empty for other kinds.
    pub fn type_parameters(&self) -> &[String] {
        match &self.kind {
            MemberKind::Method(m) => &m.type_parameters,
            _ => &[],
        }
    }

    /// Rank used by canonical ordering: methods, properties, fields, events.
    pub fn kind_rank(&self) -> u8 {
        match self.kind {
            MemberKind::Method(_) => 0,
            MemberKind::Property(_) => 1,
            MemberKind::Field => 2,
            MemberKind::Event(_) => 3,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            MemberKind::Method(_) => "method",
            MemberKind::Property(_) => "property",
            MemberKind::Field => "field",
            MemberKind::Event(_) => "event",
        }
    }
}

impl AttributeView for MemberSymbol {
    fn positional_args(&self, marker: Marker) -> Option<&[AttributeValue]> {
        self.attributes.positional_args(marker)
    }
}
