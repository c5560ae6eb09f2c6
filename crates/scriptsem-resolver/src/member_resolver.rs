//! Per-type member processing.
//!
//! Processing a type:
//! 1. process every base class and interface, and merge their name registries;
//! 2. compute the preferred name of every own member in canonical order;
//! 3. group members by preferred name (groups in order of first appearance)
//!    and resolve each group, explicitly named members first;
//! 4. copy the semantics of main methods onto their alternate signatures.
//!
//! The canonical order (kind, name, parameter count, parameter type names)
//! makes the outcome independent of the order members were declared in.

use crate::preferred_name::MainMethod;
use crate::recursion::RecursionResult;
use crate::registry::NameRegistry;
use crate::semantics::{EventSemantics, FieldSemantics, MethodSemantics, PropertySemantics};
use crate::state::ResolverState;
use indexmap::IndexMap;
use scriptsem_common::DiagnosticKind;
use scriptsem_common::naming::make_camel_case;
use scriptsem_model::{AttributeView, Marker, MemberId, MemberKind, MemberSymbol, TypeGraph, TypeId};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Deterministic order of the own members of one type.
pub(crate) fn canonical_order(a: &MemberSymbol, b: &MemberSymbol) -> Ordering {
    a.kind_rank()
        .cmp(&b.kind_rank())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.parameters().len().cmp(&b.parameters().len()))
        // Overloaded methods and indexers share a name; fields and events have no parameters.
        .then_with(|| joined_parameter_types(a).cmp(&joined_parameter_types(b)))
}

fn joined_parameter_types(member: &MemberSymbol) -> String {
    member
        .parameters()
        .iter()
        .map(|p| p.type_name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Own members of a type sorted canonically.
pub(crate) fn canonical_members(graph: &TypeGraph, type_id: TypeId) -> Vec<MemberId> {
    let mut members = graph.type_symbol(type_id).members.clone();
    members.sort_by(|&a, &b| canonical_order(graph.member(a), graph.member(b)));
    members
}

/// Which accessor pair of a property or event is being named.
#[derive(Copy, Clone, Debug)]
enum AccessorPrefix {
    Get,
    Set,
    Add,
    Remove,
}

impl AccessorPrefix {
    fn as_str(self) -> &'static str {
        match self {
            AccessorPrefix::Get => "get_",
            AccessorPrefix::Set => "set_",
            AccessorPrefix::Add => "add_",
            AccessorPrefix::Remove => "remove_",
        }
    }
}

impl<'g> ResolverState<'g> {
    /// Resolve every member of `type_id` unless already done.
    pub(crate) fn ensure_members(&mut self, type_id: TypeId) {
        if self.member_names.contains_key(&type_id) {
            return;
        }
        self.ensure_type(type_id);

        match self.member_guard.enter(type_id) {
            RecursionResult::Entered => {
                let registry = self.process_members(type_id);
                self.member_guard.leave(type_id);
                self.member_names.insert(type_id, registry);
            }
            RecursionResult::Cycle => {
                // A member refers to a member of a type still being processed.
                trace!(type_name = %self.graph.type_symbol(type_id).full_name, "member processing re-entered");
            }
            RecursionResult::DepthExceeded => {
                debug_assert!(
                    false,
                    "inheritance of {} is deeper than the supported limit",
                    self.graph.type_symbol(type_id).full_name
                );
            }
        }
    }

    fn process_members(&mut self, type_id: TypeId) -> NameRegistry {
        let graph = self.graph;
        let bases = graph.all_base_types(type_id);
        for &base in &bases {
            self.ensure_members(base);
        }
        let mut registry =
            NameRegistry::merged(bases.iter().filter_map(|base| self.member_names.get(base)));

        let members = canonical_members(graph, type_id);
        if !self.types[&type_id].semantics.is_usable() {
            for &member in &members {
                self.mark_not_usable(member);
            }
            return registry;
        }

        let mut groups: IndexMap<Option<String>, Vec<(MemberId, bool)>> = IndexMap::new();
        let mut alternates = Vec::new();
        for &member in &members {
            if let MainMethod::Unique(main) = self.main_method_of(member) {
                alternates.push((member, main));
                continue;
            }
            let preferred = self.preferred_name(member);
            groups
                .entry(preferred.name)
                .or_default()
                .push((member, preferred.specified));
        }

        for (name, mut group) in groups {
            // Stable: keeps canonical order among equally specified members.
            group.sort_by_key(|&(_, specified)| !specified);
            for (member, specified) in group {
                self.resolve_member(member, name.as_deref(), specified, &mut registry);
            }
        }

        for (alternate, main) in alternates {
            self.resolve_alternate_signature(alternate, main);
        }

        debug!(
            type_name = %graph.type_symbol(type_id).full_name,
            members = members.len(),
            names = registry.len(),
            "processed members"
        );
        registry
    }

    fn resolve_member(
        &mut self,
        member_id: MemberId,
        preferred: Option<&str>,
        specified: bool,
        registry: &mut NameRegistry,
    ) {
        match self.graph.member(member_id).kind {
            MemberKind::Method(_) => {
                self.resolve_method(member_id, preferred, specified, registry);
            }
            MemberKind::Property(_) => self.resolve_property(member_id, preferred, specified, registry),
            MemberKind::Field => self.resolve_field(member_id, preferred, specified, registry),
            MemberKind::Event(_) => self.resolve_event(member_id, preferred, specified, registry),
        }
    }

    /// Record `NotUsable` for a member and its accessors.
    fn mark_not_usable(&mut self, member_id: MemberId) {
        let graph = self.graph;
        match &graph.member(member_id).kind {
            MemberKind::Method(_) => {
                self.methods.insert(member_id, MethodSemantics::NotUsable);
            }
            MemberKind::Property(p) => {
                self.properties.insert(member_id, PropertySemantics::NotUsable);
                for accessor in p.getter.into_iter().chain(p.setter) {
                    self.methods.insert(accessor, MethodSemantics::NotUsable);
                }
            }
            MemberKind::Field => {
                self.fields.insert(member_id, FieldSemantics::NotUsable);
            }
            MemberKind::Event(e) => {
                self.events.insert(member_id, EventSemantics::NotUsable);
                for accessor in e.adder.into_iter().chain(e.remover) {
                    self.methods.insert(accessor, MethodSemantics::NotUsable);
                }
            }
        }
    }

    fn member_not_usable(&self, member_id: MemberId) -> bool {
        !self.declaring_type_usable(member_id)
            || self.graph.member(member_id).has_marker(Marker::NonScriptable)
    }

    // =========================================================================
    // Alternate signatures
    // =========================================================================

    fn resolve_alternate_signature(&mut self, method_id: MemberId, main: MemberId) {
        let semantics = if self.member_not_usable(method_id) {
            MethodSemantics::NotUsable
        } else {
            match self.methods.get(&main).cloned() {
                Some(MethodSemantics::NormalMethod {
                    name,
                    ignores_generic_args,
                    is_global,
                    ..
                }) => MethodSemantics::NormalMethod {
                    name,
                    generates_code: false,
                    ignores_generic_args,
                    is_global,
                },
                Some(other) => other,
                None => MethodSemantics::NormalMethod {
                    name: self.graph.member(method_id).name.clone(),
                    generates_code: false,
                    ignores_generic_args: false,
                    is_global: false,
                },
            }
        };
        trace!(
            method = %self.graph.qualified_member_name(method_id),
            semantics = ?semantics,
            "resolved alternate signature"
        );
        self.methods.insert(method_id, semantics);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Name and resolve one accessor of a property or event.
    ///
    /// An accessor without its own explicit name is named after its owner:
    /// `get_<owner>` verbatim when the owner's name was explicit, otherwise the
    /// first free variant of it, or a generated name for a minimized owner.
    fn resolve_accessor(
        &mut self,
        accessor: MemberId,
        owner: MemberId,
        prefix: AccessorPrefix,
        owner_name: Option<&str>,
        owner_specified: bool,
        registry: &mut NameRegistry,
    ) -> MethodSemantics {
        let own = self.preferred_name(accessor);
        let (name, specified) = if own.specified {
            (own.name, true)
        } else {
            let base = format!("{}{}", prefix.as_str(), owner_name.unwrap_or_default());
            let name = if !owner_specified
                && self.options.minimize_names
                && !self.graph.is_public_member(owner)
            {
                None
            } else if owner_specified {
                Some(base)
            } else {
                Some(registry.allocate_unique(Some(&base)))
            };
            (name, false)
        };
        self.resolve_method(accessor, name.as_deref(), specified, registry)
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn resolve_property(
        &mut self,
        property_id: MemberId,
        preferred: Option<&str>,
        specified: bool,
        registry: &mut NameRegistry,
    ) {
        let semantics = self.classify_property(property_id, preferred, specified, registry);
        trace!(
            property = %self.graph.qualified_member_name(property_id),
            semantics = ?semantics,
            "resolved property"
        );
        self.properties.insert(property_id, semantics);
    }

    fn classify_property(
        &mut self,
        property_id: MemberId,
        preferred: Option<&str>,
        specified: bool,
        registry: &mut NameRegistry,
    ) -> PropertySemantics {
        let graph = self.graph;
        let property = graph.member(property_id);
        let MemberKind::Property(data) = &property.kind else {
            return PropertySemantics::NotUsable;
        };
        if self.member_not_usable(property_id) {
            self.mark_not_usable(property_id);
            return PropertySemantics::NotUsable;
        }

        let subject = if property.is_indexer() {
            format!("The indexer on type {}", graph.type_symbol(property.declaring_type).full_name)
        } else {
            format!("The property {}", graph.qualified_member_name(property_id))
        };

        if let Some(alias) = property.string_arg(Marker::ScriptAlias) {
            if property.is_indexer() {
                self.report_member(property_id, "IndexerCannotHaveScriptAlias", DiagnosticKind::IllegalPlacement, |_| {
                    format!("{subject} cannot have a [ScriptAlias].")
                });
            } else if !property.is_static() {
                self.report_member(property_id, "InstancePropertyCannotHaveScriptAlias", DiagnosticKind::IllegalPlacement, |_| {
                    format!("{subject} cannot have a [ScriptAlias] because it is an instance member.")
                });
            } else {
                let alias = alias.unwrap_or("");
                return PropertySemantics::GetAndSet {
                    getter: data.getter.map(|_| MethodSemantics::inline_code(alias)),
                    setter: data.setter.map(|_| MethodSemantics::inline_code(alias)),
                };
            }
        }

        if property.has_marker(Marker::IntrinsicProperty) {
            let misplaced = if self.is_interface_member(property_id) {
                Some(("InterfacePropertyCannotBeIntrinsic", "it is an interface member"))
            } else if property.is_override() {
                Some(("OverridingPropertyCannotBeIntrinsic", "it overrides a base member"))
            } else if property.is_overridable() {
                Some(("OverridablePropertyCannotBeIntrinsic", "it is overridable"))
            } else if !property.implements.is_empty() {
                Some(("ImplementingPropertyCannotBeIntrinsic", "it implements an interface member"))
            } else {
                None
            };
            match misplaced {
                Some((category, reason)) => {
                    self.report_member(property_id, category, DiagnosticKind::IllegalPlacement, |_| {
                        format!("{subject} cannot have an [IntrinsicProperty] because {reason}.")
                    });
                }
                None if property.is_indexer() => {
                    if data.parameters.len() == 1 {
                        return PropertySemantics::NativeIndexer {
                            can_get: data.getter.is_some(),
                            can_set: data.setter.is_some(),
                        };
                    }
                    self.report_member(property_id, "NativeIndexerArgument", DiagnosticKind::IllegalPlacement, |_| {
                        format!("{subject} must have exactly one parameter to have an [IntrinsicProperty].")
                    });
                }
                None => {
                    let name = preferred.map_or_else(|| make_camel_case(&property.name), str::to_string);
                    registry.add(&name, property_id);
                    return PropertySemantics::Field { name };
                }
            }
        }

        let getter = data.getter.map(|getter| {
            self.resolve_accessor(getter, property_id, AccessorPrefix::Get, preferred, specified, registry)
        });
        let setter = data.setter.map(|setter| {
            self.resolve_accessor(setter, property_id, AccessorPrefix::Set, preferred, specified, registry)
        });
        PropertySemantics::GetAndSet { getter, setter }
    }

    // =========================================================================
    // Fields
    // =========================================================================

    fn resolve_field(
        &mut self,
        field_id: MemberId,
        preferred: Option<&str>,
        specified: bool,
        registry: &mut NameRegistry,
    ) {
        let semantics = if self.member_not_usable(field_id) {
            FieldSemantics::NotUsable
        } else {
            let name = match preferred {
                Some(name) if specified => name.to_string(),
                _ => self.unique_name(field_id, preferred, registry),
            };
            registry.add(&name, field_id);
            FieldSemantics::Field { name }
        };
        trace!(
            field = %self.graph.qualified_member_name(field_id),
            semantics = ?semantics,
            "resolved field"
        );
        self.fields.insert(field_id, semantics);
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn resolve_event(
        &mut self,
        event_id: MemberId,
        preferred: Option<&str>,
        specified: bool,
        registry: &mut NameRegistry,
    ) {
        let graph = self.graph;
        let semantics = match &graph.member(event_id).kind {
            MemberKind::Event(data) if !self.member_not_usable(event_id) => {
                let adder = data.adder.map(|adder| {
                    self.resolve_accessor(adder, event_id, AccessorPrefix::Add, preferred, specified, registry)
                });
                let remover = data.remover.map(|remover| {
                    self.resolve_accessor(remover, event_id, AccessorPrefix::Remove, preferred, specified, registry)
                });
                EventSemantics::AddAndRemove { adder, remover }
            }
            _ => {
                self.mark_not_usable(event_id);
                EventSemantics::NotUsable
            }
        };
        trace!(
            event = %graph.qualified_member_name(event_id),
            semantics = ?semantics,
            "resolved event"
        );
        self.events.insert(event_id, semantics);
    }
}
