//! The preferred script name of a member.
//!
//! Every member first gets a preferred name together with a flag saying
//! whether that name was explicitly chosen. Explicit names are used verbatim;
//! the others go through unique-name allocation against the type's registry.

use crate::state::ResolverState;
use scriptsem_common::naming::{is_valid_identifier, make_camel_case};
use scriptsem_common::DiagnosticKind;
use scriptsem_model::{AttributeView, Marker, MemberId};

/// Preferred name of a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PreferredName {
    /// `None` asks for a fully generated (minimized) name.
    pub(crate) name: Option<String>,
    /// Explicitly chosen; exempt from disambiguation.
    pub(crate) specified: bool,
}

impl PreferredName {
    fn specified(name: String) -> Self {
        PreferredName {
            name: Some(name),
            specified: true,
        }
    }

    fn derived(name: Option<String>) -> Self {
        PreferredName {
            name,
            specified: false,
        }
    }
}

/// The method an `[AlternateSignature]` method stands in for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MainMethod {
    /// Not an alternate signature.
    None,
    Unique(MemberId),
    /// Zero or several candidates.
    Missing,
}

impl<'g> ResolverState<'g> {
    /// The single same-named method without `[AlternateSignature]` in the
    /// declaring type of an alternate-signature method.
    pub(crate) fn main_method_of(&self, member_id: MemberId) -> MainMethod {
        let graph = self.graph;
        let member = graph.member(member_id);
        if !member.is_method() || !member.has_marker(Marker::AlternateSignature) {
            return MainMethod::None;
        }
        let mut candidates = graph
            .methods_named(member.declaring_type, &member.name)
            .filter(|&m| m != member_id && !graph.member(m).has_marker(Marker::AlternateSignature));
        match (candidates.next(), candidates.next()) {
            (Some(main), None) => MainMethod::Unique(main),
            _ => MainMethod::Missing,
        }
    }

    pub(crate) fn preferred_name(&mut self, member_id: MemberId) -> PreferredName {
        let graph = self.graph;
        let member = graph.member(member_id);

        match self.main_method_of(member_id) {
            MainMethod::None => {}
            MainMethod::Unique(main) => return self.preferred_name(main),
            MainMethod::Missing => {
                self.report_member(member_id, "NoMainMethod", DiagnosticKind::MissingBase, |m| {
                    format!("The member {m} has an [AlternateSignature], but there is not exactly one other method with the same name without that attribute.")
                });
                return PreferredName::derived(Some(member.name.clone()));
            }
        }

        if let Some(argument) = member.string_arg(Marker::ScriptName) {
            let valid = argument.is_some_and(|name| name.is_empty() || is_valid_identifier(name));
            if !valid {
                self.report_member(member_id, "InvalidName", DiagnosticKind::InvalidName, |m| {
                    format!("The name in the [ScriptName] of {m} must be a valid identifier, or be blank.")
                });
            }
            let name = argument.unwrap_or(&member.name);
            return PreferredName::specified(name.to_string());
        }

        if member.has_marker(Marker::PreserveCase) {
            return PreferredName::specified(member.name.clone());
        }

        let preserve_name = member.has_marker(Marker::PreserveName)
            || member.has_marker(Marker::InstanceMethodOnFirstArgument)
            || member.has_marker(Marker::IntrinsicProperty)
            || self.declaring_type_is_global(member_id);
        if preserve_name {
            return PreferredName::specified(make_camel_case(&member.name));
        }

        if graph.is_public_member(member_id) {
            PreferredName::derived(Some(make_camel_case(&member.name)))
        } else if self.options.minimize_names {
            PreferredName::derived(None)
        } else {
            PreferredName::derived(Some(format!("${}", make_camel_case(&member.name))))
        }
    }
}
