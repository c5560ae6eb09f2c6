//! Declarative markers attached to types and members.
//!
//! The resolver only ever asks one question of an entity's attributes: "is
//! marker X present, and if so, what are its positional arguments?". That
//! capability is the `AttributeView` trait; everything else about attribute
//! syntax stays with the upstream type checker.

use serde::{Deserialize, Serialize};

const COMPILER_SERVICES_NAMESPACE: &str = "System.Runtime.CompilerServices.";

/// The closed set of markers the resolver understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    ScriptSkip,
    ScriptAlias,
    InlineCode,
    InstanceMethodOnFirstArgument,
    NonScriptable,
    IgnoreGenericArguments,
    IgnoreNamespace,
    ScriptNamespace,
    AlternateSignature,
    ScriptName,
    PreserveName,
    PreserveCase,
    IntrinsicProperty,
    GlobalMethods,
    Imported,
}

impl Marker {
    /// The marker's short name, without the `Attribute` suffix.
    pub fn short_name(self) -> &'static str {
        match self {
            Marker::ScriptSkip => "ScriptSkip",
            Marker::ScriptAlias => "ScriptAlias",
            Marker::InlineCode => "InlineCode",
            Marker::InstanceMethodOnFirstArgument => "InstanceMethodOnFirstArgument",
            Marker::NonScriptable => "NonScriptable",
            Marker::IgnoreGenericArguments => "IgnoreGenericArguments",
            Marker::IgnoreNamespace => "IgnoreNamespace",
            Marker::ScriptNamespace => "ScriptNamespace",
            Marker::AlternateSignature => "AlternateSignature",
            Marker::ScriptName => "ScriptName",
            Marker::PreserveName => "PreserveName",
            Marker::PreserveCase => "PreserveCase",
            Marker::IntrinsicProperty => "IntrinsicProperty",
            Marker::GlobalMethods => "GlobalMethods",
            Marker::Imported => "Imported",
        }
    }

    /// Check whether an attribute type name denotes this marker.
    ///
    /// Accepts `ScriptName`, `ScriptNameAttribute` and
    /// `System.Runtime.CompilerServices.ScriptNameAttribute`.
    pub fn matches(self, attribute_name: &str) -> bool {
        let short = self.short_name();
        let name = attribute_name
            .strip_prefix(COMPILER_SERVICES_NAMESPACE)
            .unwrap_or(attribute_name);
        let name = name.strip_suffix("Attribute").unwrap_or(name);
        name == short
    }
}

/// A constant positional argument of an attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl AttributeValue {
    /// The string payload, if this is a string argument.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

/// An attribute application: type name plus positional arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub args: Vec<AttributeValue>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, args: Vec<AttributeValue>) -> Self {
        Attribute {
            name: name.into(),
            args,
        }
    }

    /// A marker without arguments, e.g. `[PreserveName]`.
    pub fn marker(marker: Marker) -> Self {
        Self::new(marker.short_name(), Vec::new())
    }

    /// A marker with a single string argument, e.g. `[ScriptName("x")]`.
    pub fn with_str(marker: Marker, value: &str) -> Self {
        Self::new(marker.short_name(), vec![AttributeValue::from(value)])
    }

    /// A marker whose single argument is `null`.
    pub fn with_null(marker: Marker) -> Self {
        Self::new(marker.short_name(), vec![AttributeValue::Null])
    }
}

/// Read-only access to an entity's markers.
pub trait AttributeView {
    /// Positional arguments of the first attribute matching `marker`, or `None`
    /// when the marker is absent.
    fn positional_args(&self, marker: Marker) -> Option<&[AttributeValue]>;

    fn has_marker(&self, marker: Marker) -> bool {
        self.positional_args(marker).is_some()
    }

    /// The first positional argument as a string.
    ///
    /// Outer `None`: marker absent. Inner `None`: marker present, but the
    /// argument is missing, `null` or not a string.
    fn string_arg(&self, marker: Marker) -> Option<Option<&str>> {
        self.positional_args(marker)
            .map(|args| args.first().and_then(AttributeValue::as_str))
    }
}

impl AttributeView for [Attribute] {
    fn positional_args(&self, marker: Marker) -> Option<&[AttributeValue]> {
        self.iter()
            .find(|attr| marker.matches(&attr.name))
            .map(|attr| attr.args.as_slice())
    }
}

impl AttributeView for Vec<Attribute> {
    fn positional_args(&self, marker: Marker) -> Option<&[AttributeValue]> {
        self.as_slice().positional_args(marker)
    }
}
