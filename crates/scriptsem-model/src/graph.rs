//! The `TypeGraph` arena.
//!
//! Holds every type and member of a resolution input. Built once through
//! `GraphBuilder` (or loaded from a `GraphDocument`) and read-only afterwards.
//!
//! Note: nesting and inheritance are acyclic by construction, because a type can
//! only reference types that were added before it.

use crate::ids::{AssemblyId, MemberId, TypeId};
use crate::symbols::{MemberKind, MemberSymbol, TypeSymbol};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    pub(crate) assemblies: Vec<String>,
    pub(crate) types: Vec<TypeSymbol>,
    pub(crate) members: Vec<MemberSymbol>,
    pub(crate) type_by_full_name: FxHashMap<String, TypeId>,
}

impl TypeGraph {
    /// Get a type. Panics on an id from another graph.
    pub fn type_symbol(&self, id: TypeId) -> &TypeSymbol {
        &self.types[id.index()]
    }

    pub fn try_type_symbol(&self, id: TypeId) -> Option<&TypeSymbol> {
        self.types.get(id.index())
    }

    /// Get a member. Panics on an id from another graph.
    pub fn member(&self, id: MemberId) -> &MemberSymbol {
        &self.members[id.index()]
    }

    pub fn try_member(&self, id: MemberId) -> Option<&MemberSymbol> {
        self.members.get(id.index())
    }

    pub fn assembly_name(&self, id: AssemblyId) -> &str {
        &self.assemblies[id.index()]
    }

    pub fn assembly_by_name(&self, name: &str) -> Option<AssemblyId> {
        self.assemblies
            .iter()
            .position(|a| a == name)
            .map(|i| AssemblyId(i as u32))
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// All type ids in insertion order.
    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len()).map(|i| TypeId(i as u32))
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.types.iter()
    }

    pub fn type_by_full_name(&self, full_name: &str) -> Option<TypeId> {
        self.type_by_full_name.get(full_name).copied()
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// A type is public when it and every enclosing type are externally visible.
    pub fn is_public_type(&self, id: TypeId) -> bool {
        let mut current = Some(id);
        while let Some(type_id) = current {
            let symbol = self.type_symbol(type_id);
            if !symbol.accessibility.is_externally_visible() {
                return false;
            }
            current = symbol.declaring_type;
        }
        true
    }

    /// A member is public when it is externally visible and its type is public.
    pub fn is_public_member(&self, id: MemberId) -> bool {
        let member = self.member(id);
        member.accessibility.is_externally_visible() && self.is_public_type(member.declaring_type)
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// The outermost type enclosing `id` (or `id` itself).
    pub fn outermost_type(&self, id: TypeId) -> TypeId {
        let mut current = id;
        while let Some(declaring) = self.type_symbol(current).declaring_type {
            current = declaring;
        }
        current
    }

    /// Every base class and interface reachable from `id`, excluding `id`,
    /// in depth-first declaration order without duplicates.
    pub fn all_base_types(&self, id: TypeId) -> Vec<TypeId> {
        let mut result = Vec::new();
        let mut seen: FxHashSet<TypeId> = FxHashSet::default();
        seen.insert(id);

        let mut stack: SmallVec<[TypeId; 8]> = SmallVec::new();
        stack.extend(self.type_symbol(id).base_types.iter().rev().copied());
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.type_symbol(current).base_types.iter().rev().copied());
        }
        result
    }

    /// Whether the type declares any field, property or event.
    pub fn declares_data_members(&self, id: TypeId) -> bool {
        self.type_symbol(id)
            .members
            .iter()
            .any(|&m| !self.member(m).is_method())
    }

    // =========================================================================
    // Member lookup
    // =========================================================================

    /// `<declaring type full name>.<member name>`, used for diagnostics.
    pub fn qualified_member_name(&self, id: MemberId) -> String {
        let member = self.member(id);
        format!(
            "{}.{}",
            self.type_symbol(member.declaring_type).full_name,
            member.name
        )
    }

    /// First own member of `type_id` named `name`.
    pub fn find_member(&self, type_id: TypeId, name: &str) -> Option<MemberId> {
        self.type_symbol(type_id)
            .members
            .iter()
            .copied()
            .find(|&m| self.member(m).name == name)
    }

    /// Own methods of `type_id` named `name`, in declaration order.
    pub fn methods_named<'a>(
        &'a self,
        type_id: TypeId,
        name: &'a str,
    ) -> impl Iterator<Item = MemberId> + 'a {
        self.type_symbol(type_id)
            .members
            .iter()
            .copied()
            .filter(move |&m| {
                let member = self.member(m);
                member.is_method() && member.name == name
            })
    }

    /// Getter of a property. `None` for write-only properties and non-properties.
    pub fn getter(&self, id: MemberId) -> Option<MemberId> {
        match &self.member(id).kind {
            MemberKind::Property(p) => p.getter,
            _ => None,
        }
    }

    /// Setter of a property. `None` for read-only properties and non-properties.
    pub fn setter(&self, id: MemberId) -> Option<MemberId> {
        match &self.member(id).kind {
            MemberKind::Property(p) => p.setter,
            _ => None,
        }
    }

    pub fn adder(&self, id: MemberId) -> Option<MemberId> {
        match &self.member(id).kind {
            MemberKind::Event(e) => e.adder,
            _ => None,
        }
    }

    pub fn remover(&self, id: MemberId) -> Option<MemberId> {
        match &self.member(id).kind {
            MemberKind::Event(e) => e.remover,
            _ => None,
        }
    }
}
