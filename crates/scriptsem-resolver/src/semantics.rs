//! Resolved script semantics.
//!
//! One value per entity, produced once per run and read by the code emitter.
//! All of them serialize with a `kind` tag so a run can be dumped as JSON.

use serde::Serialize;

/// How a type appears in script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeSemantics {
    /// A script type with a dotted full name.
    #[serde(rename_all = "camelCase")]
    NormalType { name: String, generates_code: bool },
    /// The type has no script representation.
    NotUsable,
}

impl TypeSemantics {
    pub fn normal(name: impl Into<String>, generates_code: bool) -> Self {
        TypeSemantics::NormalType {
            name: name.into(),
            generates_code,
        }
    }

    /// The script full name; `None` when not usable.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeSemantics::NormalType { name, .. } => Some(name),
            TypeSemantics::NotUsable => None,
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, TypeSemantics::NormalType { .. })
    }
}

/// How a method is invoked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MethodSemantics {
    #[serde(rename_all = "camelCase")]
    NormalMethod {
        name: String,
        generates_code: bool,
        ignores_generic_args: bool,
        /// Member of a global-methods type: invoked without a receiver.
        is_global: bool,
    },
    /// Invocation replaced by a code template with `{placeholder}` holes.
    InlineCode { template: String },
    /// A static method invoked as an instance method on its first argument.
    InstanceMethodOnFirstArgument { name: String },
    NotUsable,
}

impl MethodSemantics {
    pub fn normal(name: impl Into<String>) -> Self {
        MethodSemantics::NormalMethod {
            name: name.into(),
            generates_code: true,
            ignores_generic_args: false,
            is_global: false,
        }
    }

    pub fn inline_code(template: impl Into<String>) -> Self {
        MethodSemantics::InlineCode {
            template: template.into(),
        }
    }

    /// The script name for named invocations.
    pub fn name(&self) -> Option<&str> {
        match self {
            MethodSemantics::NormalMethod { name, .. }
            | MethodSemantics::InstanceMethodOnFirstArgument { name } => Some(name),
            MethodSemantics::InlineCode { .. } | MethodSemantics::NotUsable => None,
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, MethodSemantics::NormalMethod { .. })
    }
}

/// How a property is accessed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PropertySemantics {
    /// Plain field access.
    Field { name: String },
    /// Accessor methods; `None` for a missing accessor.
    GetAndSet {
        getter: Option<MethodSemantics>,
        setter: Option<MethodSemantics>,
    },
    /// `receiver[arg]` indexing; flags mirror the indexer's accessors.
    NativeIndexer { can_get: bool, can_set: bool },
    NotUsable,
}

/// How a field is accessed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldSemantics {
    Field { name: String },
    NotUsable,
}

impl FieldSemantics {
    pub fn name(&self) -> Option<&str> {
        match self {
            FieldSemantics::Field { name } => Some(name),
            FieldSemantics::NotUsable => None,
        }
    }
}

/// How an event is subscribed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventSemantics {
    AddAndRemove {
        adder: Option<MethodSemantics>,
        remover: Option<MethodSemantics>,
    },
    NotUsable,
}
