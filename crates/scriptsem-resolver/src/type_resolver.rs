//! Type name resolution.
//!
//! A type's script name is `namespace.name`. The namespace comes from the
//! outermost enclosing type's namespace markers (or its source namespace); the
//! name is, in order of precedence:
//! 1. a valid explicit `ScriptName`,
//! 2. a minimized `$<n>` slot (non-public, not preserved, minimization on),
//! 3. the source name with a `$<arity>` suffix, prefixed by the declaring
//!    type's local name for nested types and by `$` for non-public types.
//!
//! `GlobalMethods` then moves a qualifying type to the global namespace.

use crate::recursion::RecursionResult;
use crate::semantics::TypeSemantics;
use crate::state::{ResolvedType, ResolverState};
use scriptsem_common::DiagnosticKind;
use scriptsem_common::naming::{is_valid_identifier, is_valid_nested_identifier, qualify, split_name};
use scriptsem_model::{AttributeView, Marker, TypeId};
use tracing::debug;

impl<'g> ResolverState<'g> {
    /// Resolve `type_id` (and its declaring types) unless already resolved.
    pub(crate) fn ensure_type(&mut self, type_id: TypeId) {
        if self.types.contains_key(&type_id) {
            return;
        }

        let entered = self.type_guard.enter(type_id);
        debug_assert!(
            entered.is_entered(),
            "type nesting of {} is cyclic or deeper than the supported limit",
            self.graph.type_symbol(type_id).full_name
        );
        let resolved = match entered {
            RecursionResult::Entered => {
                let resolved = self.compute_type(type_id);
                self.type_guard.leave(type_id);
                resolved
            }
            RecursionResult::Cycle | RecursionResult::DepthExceeded => ResolvedType::not_usable(),
        };

        if let Some(name) = resolved.semantics.name() {
            let (namespace, local) = split_name(name);
            self.type_names
                .entry(namespace.to_string())
                .or_default()
                .insert(local.to_string());
        }
        debug!(
            type_name = %self.graph.type_symbol(type_id).full_name,
            semantics = ?resolved.semantics,
            global_members = resolved.global_members,
            "resolved type"
        );
        self.types.insert(type_id, resolved);
    }

    fn compute_type(&mut self, type_id: TypeId) -> ResolvedType {
        let graph = self.graph;
        let ty = graph.type_symbol(type_id);

        if ty.has_marker(Marker::NonScriptable) {
            return ResolvedType::not_usable();
        }
        if let Some(declaring) = ty.declaring_type {
            self.ensure_type(declaring);
            if !self.types[&declaring].semantics.is_usable() {
                return ResolvedType::not_usable();
            }
            if ty.has_marker(Marker::IgnoreNamespace) || ty.has_marker(Marker::ScriptNamespace) {
                self.report_type(type_id, "Namespace", DiagnosticKind::IllegalPlacement, |t| {
                    format!("[IgnoreNamespace] or [ScriptNamespace] cannot be specified for the nested type {t}.")
                });
            }
        }

        let is_imported = ty.has_marker(Marker::Imported);
        let preserve_name = is_imported || ty.has_marker(Marker::PreserveName);
        let is_public = graph.is_public_type(type_id);

        let (mut namespace, name) = match ty.string_arg(Marker::ScriptName) {
            Some(Some(name)) if is_valid_identifier(name) => {
                (self.script_namespace(type_id), name.to_string())
            }
            script_name => {
                if script_name.is_some() {
                    self.report_type(type_id, "Name", DiagnosticKind::InvalidName, |t| {
                        format!("{t}: the argument of [ScriptName] on a type must be a valid identifier.")
                    });
                }
                if self.options.minimize_names && !is_public && !preserve_name {
                    let namespace = self.script_namespace(type_id);
                    let name = self.next_minimized_type_name(&namespace);
                    (namespace, name)
                } else {
                    let (namespace, mut local) = self.default_type_name(type_id);
                    if !is_public && !preserve_name && !local.starts_with('$') {
                        local.insert(0, '$');
                    }
                    (namespace, local)
                }
            }
        };

        let mut global_members = false;
        if ty.has_marker(Marker::GlobalMethods) {
            if !ty.is_static {
                self.report_type(type_id, "GlobalMethods", DiagnosticKind::IllegalPlacement, |t| {
                    format!("The type {t} must be static to have a [GlobalMethods] attribute.")
                });
            } else if graph.declares_data_members(type_id) {
                self.report_type(type_id, "GlobalMethods", DiagnosticKind::IllegalPlacement, |t| {
                    format!("The type {t} cannot declare fields, events or properties to have a [GlobalMethods] attribute.")
                });
            } else if ty.declaring_type.is_some() {
                self.report_type(type_id, "GlobalMethods", DiagnosticKind::IllegalPlacement, |t| {
                    format!("[GlobalMethods] cannot be applied to the nested type {t}.")
                });
            } else {
                namespace.clear();
                global_members = true;
            }
        }

        ResolvedType {
            semantics: TypeSemantics::normal(qualify(&namespace, &name), !is_imported),
            global_members,
        }
    }

    /// Script namespace of a type, read from the outermost enclosing type.
    fn script_namespace(&mut self, type_id: TypeId) -> String {
        let graph = self.graph;
        let outer_id = graph.outermost_type(type_id);
        let outer = graph.type_symbol(outer_id);

        let ignore_namespace = outer.has_marker(Marker::IgnoreNamespace);
        let Some(argument) = outer.string_arg(Marker::ScriptNamespace) else {
            return if ignore_namespace {
                String::new()
            } else {
                outer.namespace.clone()
            };
        };

        if ignore_namespace {
            self.report_type(outer_id, "Namespace", DiagnosticKind::IllegalCombination, |t| {
                format!("The type {t} has both [IgnoreNamespace] and [ScriptNamespace]; at most one of them can be specified.")
            });
        }
        match argument {
            Some(namespace) if namespace.is_empty() || is_valid_nested_identifier(namespace) => {
                namespace.to_string()
            }
            _ => {
                self.report_type(outer_id, "Namespace", DiagnosticKind::InvalidName, |t| {
                    format!("{t}: the argument of [ScriptNamespace] on a type must be a valid qualified identifier.")
                });
                outer.namespace.clone()
            }
        }
    }

    /// `(namespace, local name)` derived from source names.
    fn default_type_name(&mut self, type_id: TypeId) -> (String, String) {
        let graph = self.graph;
        let ty = graph.type_symbol(type_id);
        let outer_arity = ty
            .declaring_type
            .map_or(0, |d| graph.type_symbol(d).type_parameters.len());
        let own_arity = ty.type_parameters.len().saturating_sub(outer_arity);
        let local = if own_arity > 0 {
            format!("{}${own_arity}", ty.name)
        } else {
            ty.name.clone()
        };

        match ty.declaring_type {
            Some(declaring) => {
                let outer_name = self.types[&declaring].semantics.name().unwrap_or_default();
                let (namespace, outer_local) = split_name(outer_name);
                (namespace.to_string(), format!("{outer_local}${local}"))
            }
            None => (self.script_namespace(type_id), local),
        }
    }

    /// Lowest `$<n>` not yet taken in `namespace`.
    fn next_minimized_type_name(&self, namespace: &str) -> String {
        let taken = self.type_names.get(namespace);
        (0u32..)
            .map(|i| format!("${i}"))
            .find(|candidate| taken.is_none_or(|names| !names.contains(candidate)))
            .unwrap_or_default()
    }
}
