//! Method classification.
//!
//! The first matching rule wins:
//! `NonScriptable` / unusable type > global-methods type > `ScriptSkip` >
//! `ScriptAlias` > `InlineCode` > `InstanceMethodOnFirstArgument` >
//! override > interface implementation > default.
//!
//! A misplaced marker records a diagnostic and falls back to a normal method
//! named by the source identifier.

use crate::inline_code::{self, INVALID_TEMPLATE};
use crate::registry::NameRegistry;
use crate::semantics::MethodSemantics;
use crate::state::ResolverState;
use scriptsem_common::DiagnosticKind;
use scriptsem_model::{AttributeView, Marker, MemberId, MemberSymbol};
use tracing::trace;

impl<'g> ResolverState<'g> {
    /// Classify a method (or accessor), record and return its semantics.
    pub(crate) fn resolve_method(
        &mut self,
        method_id: MemberId,
        preferred: Option<&str>,
        specified: bool,
        registry: &mut NameRegistry,
    ) -> MethodSemantics {
        let semantics = self.classify_method(method_id, preferred, specified, registry);
        trace!(
            method = %self.graph.qualified_member_name(method_id),
            semantics = ?semantics,
            "resolved method"
        );
        self.methods.insert(method_id, semantics.clone());
        semantics
    }

    fn classify_method(
        &mut self,
        method_id: MemberId,
        preferred: Option<&str>,
        specified: bool,
        registry: &mut NameRegistry,
    ) -> MethodSemantics {
        let graph = self.graph;
        let method = graph.member(method_id);

        if method.has_marker(Marker::NonScriptable) || !self.declaring_type_usable(method_id) {
            return MethodSemantics::NotUsable;
        }
        if self.declaring_type_is_global(method_id) {
            return MethodSemantics::NormalMethod {
                name: preferred.unwrap_or(&method.name).to_string(),
                generates_code: true,
                ignores_generic_args: false,
                is_global: true,
            };
        }
        if method.has_marker(Marker::ScriptSkip) {
            return self.script_skip(method_id, method);
        }
        if let Some(alias) = method.string_arg(Marker::ScriptAlias) {
            if method.is_static() {
                let parameters = method.parameters().iter().map(|p| p.name.as_str());
                return MethodSemantics::inline_code(inline_code::call_template(
                    alias.unwrap_or(""),
                    parameters,
                ));
            }
            self.report_member(method_id, "NonStaticWithAlias", DiagnosticKind::IllegalPlacement, |m| {
                format!("The method {m} must be static to have a [ScriptAlias].")
            });
            return MethodSemantics::normal(&method.name);
        }
        if let Some(code) = method.string_arg(Marker::InlineCode) {
            return self.inline_code(method_id, method, code.unwrap_or(""));
        }
        if method.has_marker(Marker::InstanceMethodOnFirstArgument) {
            if method.is_static() {
                return MethodSemantics::InstanceMethodOnFirstArgument {
                    name: preferred.unwrap_or(&method.name).to_string(),
                };
            }
            self.report_member(
                method_id,
                "InstanceMethodOnFirstArgument",
                DiagnosticKind::IllegalPlacement,
                |m| format!("The method {m} cannot have an [InstanceMethodOnFirstArgument] because it is not static."),
            );
            return MethodSemantics::normal(&method.name);
        }

        if method.is_override()
            && let Some(semantics) = self.overriding_method(method_id, method, specified)
        {
            return semantics;
        }
        if !method.implements.is_empty()
            && let Some(semantics) = self.implementing_method(method_id, method, specified)
        {
            return semantics;
        }

        if preferred == Some("") {
            return self.blank_named_method(method_id, method);
        }
        let name = match preferred {
            Some(name) if specified => name.to_string(),
            _ => self.unique_name(method_id, preferred, registry),
        };
        registry.add(&name, method_id);
        MethodSemantics::NormalMethod {
            name,
            generates_code: !method.has_marker(Marker::AlternateSignature),
            ignores_generic_args: method.has_marker(Marker::IgnoreGenericArguments),
            is_global: false,
        }
    }

    fn script_skip(&mut self, method_id: MemberId, method: &MemberSymbol) -> MethodSemantics {
        let misplaced = if self.is_interface_member(method_id) {
            Some(("ScriptSkipOnInterfaceMember", "it is an interface method"))
        } else if method.is_override() {
            Some(("ScriptSkipOnOverridable", "it overrides a base member"))
        } else if method.is_overridable() {
            Some(("ScriptSkipOnOverridable", "it is overridable"))
        } else if !method.implements.is_empty() {
            Some(("ScriptSkipOnInterfaceImplementation", "it implements an interface member"))
        } else {
            None
        };
        if let Some((category, reason)) = misplaced {
            self.report_member(method_id, category, DiagnosticKind::IllegalPlacement, |m| {
                format!("The member {m} cannot have a [ScriptSkip] because {reason}.")
            });
            return MethodSemantics::normal(&method.name);
        }

        let parameters = method.parameters();
        if method.is_static() {
            if parameters.len() != 1 {
                self.report_member(method_id, "ScriptSkipParameterCount", DiagnosticKind::IllegalPlacement, |m| {
                    format!("The static method {m} must have exactly one parameter to have a [ScriptSkip].")
                });
            }
            match parameters.first() {
                Some(first) => MethodSemantics::inline_code(format!("{{{}}}", first.name)),
                None => MethodSemantics::inline_code(INVALID_TEMPLATE),
            }
        } else {
            if !parameters.is_empty() {
                self.report_member(method_id, "ScriptSkipParameterCount", DiagnosticKind::IllegalPlacement, |m| {
                    format!("The instance method {m} must have no parameters to have a [ScriptSkip].")
                });
            }
            MethodSemantics::inline_code("{this}")
        }
    }

    fn inline_code(&mut self, method_id: MemberId, method: &MemberSymbol, code: &str) -> MethodSemantics {
        let misplaced = if self.is_interface_member(method_id) {
            Some(("InlineCodeOnInterfaceMember", "it is an interface method"))
        } else if method.is_override() {
            Some(("InlineCodeOnOverridable", "it overrides a base member"))
        } else if method.is_overridable() {
            Some(("InlineCodeOnOverridable", "it is overridable"))
        } else if !method.implements.is_empty() {
            Some(("InlineCodeOnInterfaceImplementation", "it implements an interface member"))
        } else {
            None
        };
        if let Some((category, reason)) = misplaced {
            self.report_member(method_id, category, DiagnosticKind::IllegalPlacement, |m| {
                format!("The member {m} cannot have an [InlineCode] because {reason}.")
            });
            return MethodSemantics::normal(&method.name);
        }

        let declaring_type = self.graph.type_symbol(method.declaring_type);
        let mut template = code;
        for placeholder in inline_code::placeholders(code) {
            if placeholder == "this" {
                if method.is_static() {
                    self.report_member(method_id, "InlineCodeInvalidPlaceholder", DiagnosticKind::IllegalPlacement, |m| {
                        format!("The placeholder {{this}} cannot be used in inline code for the static method {m}.")
                    });
                    template = INVALID_TEMPLATE;
                }
                continue;
            }
            let known = method.parameters().iter().any(|p| p.name == placeholder)
                || method.type_parameters().iter().any(|t| t == placeholder)
                || declaring_type.type_parameters.iter().any(|t| t == placeholder);
            if !known {
                self.report_member(method_id, "InlineCodeInvalidPlaceholder", DiagnosticKind::InvalidName, |m| {
                    format!("Invalid placeholder {{{placeholder}}} in inline code for the method {m}.")
                });
                template = INVALID_TEMPLATE;
            }
        }
        MethodSemantics::inline_code(template)
    }

    /// Semantics copied from the overridden method; `None` when the base
    /// method has no semantics.
    fn overriding_method(
        &mut self,
        method_id: MemberId,
        method: &MemberSymbol,
        specified: bool,
    ) -> Option<MethodSemantics> {
        if specified {
            self.report_member(method_id, "CannotSpecifyName", DiagnosticKind::IllegalPlacement, |m| {
                format!("[ScriptName], [PreserveName] and [PreserveCase] cannot be specified on the method {m} because it overrides a base member. Specify the attribute on the base member instead.")
            });
        }
        if method.has_marker(Marker::IgnoreGenericArguments) {
            self.report_member(method_id, "CannotSpecifyIgnoreGenericArguments", DiagnosticKind::IllegalPlacement, |m| {
                format!("[IgnoreGenericArguments] cannot be specified on the method {m} because it overrides a base member. Specify the attribute on the base member instead.")
            });
        }

        let semantics = self.method_semantics_of(method.overridden?)?;
        if semantics.is_normal() {
            let mismatch = method
                .implements
                .iter()
                .copied()
                .find(|&im| self.method_semantics_of(im).as_ref().and_then(MethodSemantics::name) != semantics.name());
            if let Some(interface_member) = mismatch {
                let interface_name = self.graph.qualified_member_name(interface_member);
                self.report_member(method_id, "MultipleInterfaceImplementations", DiagnosticKind::HierarchyConflict, |m| {
                    format!("The overriding member {m} cannot implement the interface method {interface_name} because it has a different script name. Consider using explicit interface implementation.")
                });
            }
        }
        Some(semantics)
    }

    /// Semantics copied from the first implemented interface method; `None`
    /// when it has no semantics.
    fn implementing_method(
        &mut self,
        method_id: MemberId,
        method: &MemberSymbol,
        specified: bool,
    ) -> Option<MethodSemantics> {
        if specified {
            self.report_member(method_id, "CannotSpecifyName", DiagnosticKind::IllegalPlacement, |m| {
                format!("[ScriptName], [PreserveName] and [PreserveCase] cannot be specified on the method {m} because it implements an interface member. Specify the attribute on the interface member instead, or consider using explicit interface implementation.")
            });
        }

        let implemented: Vec<Option<MethodSemantics>> = method
            .implements
            .iter()
            .map(|&im| self.method_semantics_of(im))
            .collect();
        let first_name = implemented.first()?.as_ref().and_then(MethodSemantics::name);
        let conflicting = implemented
            .iter()
            .any(|s| s.as_ref().and_then(MethodSemantics::name) != first_name);
        if conflicting {
            self.report_member(method_id, "MultipleInterfaceImplementations", DiagnosticKind::HierarchyConflict, |m| {
                format!("The member {m} cannot implement multiple interface methods with differing script names. Consider using explicit interface implementation.")
            });
        }
        implemented.into_iter().next().flatten()
    }

    /// A blank `[ScriptName]` drops the member name from the call.
    fn blank_named_method(&mut self, method_id: MemberId, method: &MemberSymbol) -> MethodSemantics {
        let rejected = if self.is_interface_member(method_id) {
            Some(("InterfaceMethodWithEmptyName", "it is an interface method"))
        } else if method.is_overridable() {
            Some(("OverridableWithEmptyName", "it is overridable"))
        } else if method.is_static() {
            Some(("StaticWithEmptyName", "it is static"))
        } else {
            None
        };
        match rejected {
            Some((category, reason)) => {
                self.report_member(method_id, category, DiagnosticKind::IllegalPlacement, |m| {
                    format!("The member {m} cannot have an empty name in its [ScriptName] because {reason}.")
                });
                MethodSemantics::normal(&method.name)
            }
            None => {
                let parameters = method.parameters().iter().map(|p| p.name.as_str());
                MethodSemantics::inline_code(inline_code::call_template("{this}", parameters))
            }
        }
    }

    /// Semantics of a method of another type, processing that type on demand.
    pub(crate) fn method_semantics_of(&mut self, method_id: MemberId) -> Option<MethodSemantics> {
        if let Some(semantics) = self.methods.get(&method_id) {
            return Some(semantics.clone());
        }
        let declaring = self.graph.try_member(method_id)?.declaring_type;
        self.ensure_members(declaring);
        self.methods.get(&method_id).cloned()
    }

    /// Allocate a name that was not explicitly specified.
    ///
    /// Minimized interface members draw from the assembly-wide `$I` counter;
    /// everything else takes the first free suffix of `preferred`.
    pub(crate) fn unique_name(
        &mut self,
        member_id: MemberId,
        preferred: Option<&str>,
        registry: &NameRegistry,
    ) -> String {
        let graph = self.graph;
        let declaring = graph.type_symbol(graph.member(member_id).declaring_type);
        let name = match preferred {
            None if declaring.is_interface() => self.interface_names.next_name(declaring.assembly),
            _ => registry.allocate_unique(preferred),
        };
        trace!(
            member = %graph.qualified_member_name(member_id),
            preferred = ?preferred,
            name = %name,
            "allocated member name"
        );
        name
    }
}
