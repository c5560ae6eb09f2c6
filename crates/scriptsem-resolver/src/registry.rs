//! Name allocation.
//!
//! A `NameRegistry` holds every script name visible on instances of one type:
//! its own members plus everything inherited from base classes and interfaces.
//! Several members may hold one name (an override and its base, or names two
//! unrelated bases both contribute); the registry only answers "is this name
//! taken" and records who took it.
//!
//! `InterfaceNameCounters` hands out the assembly-wide `$I<n>` names of
//! minimized interface members.

use rustc_hash::FxHashMap;
use scriptsem_common::encode_number;
use scriptsem_common::limits::MAX_NAME_ALLOCATION_ATTEMPTS;
use scriptsem_model::{AssemblyId, MemberId};
use smallvec::SmallVec;

#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    names: FxHashMap<String, SmallVec<[MemberId; 2]>>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of the registries of several base types.
    pub fn merged<'a>(registries: impl IntoIterator<Item = &'a NameRegistry>) -> Self {
        let mut result = NameRegistry::new();
        for registry in registries {
            result.merge(registry);
        }
        result
    }

    pub fn merge(&mut self, other: &NameRegistry) {
        for (name, holders) in &other.names {
            let entry = self.names.entry(name.clone()).or_default();
            for &member in holders {
                if !entry.contains(&member) {
                    entry.push(member);
                }
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn add(&mut self, name: &str, member: MemberId) {
        self.names.entry(name.to_string()).or_default().push(member);
    }

    /// Members currently holding `name`.
    pub fn holders(&self, name: &str) -> &[MemberId] {
        self.names.get(name).map_or(&[], |h| h.as_slice())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All registered names, sorted.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// First free name derived from `base`: `base` itself, then `base$0`,
    /// `base$1`, ... A missing base yields `$0`, `$1`, ...
    ///
    /// Does not register the result.
    pub fn allocate_unique(&self, base: Option<&str>) -> String {
        if let Some(base) = base
            && !self.contains(base)
        {
            return base.to_string();
        }
        let prefix = base.unwrap_or("");
        // Named bases also start at `$0`, so the second `add` overload is `add$0`.
        for i in 0..MAX_NAME_ALLOCATION_ATTEMPTS {
            let candidate = format!("{prefix}${}", encode_number(i));
            if !self.contains(&candidate) {
                return candidate;
            }
        }
        panic!("exhausted name suffixes for base name '{prefix}'");
    }
}

/// Per-assembly counters for minimized interface member names.
#[derive(Clone, Debug, Default)]
pub struct InterfaceNameCounters {
    counters: FxHashMap<AssemblyId, u32>,
}

impl InterfaceNameCounters {
    /// Next `$I<n>` name for `assembly`; the first one is `$I1`.
    pub fn next_name(&mut self, assembly: AssemblyId) -> String {
        let counter = self.counters.entry(assembly).or_insert(0);
        *counter += 1;
        format!("$I{}", encode_number(*counter))
    }
}
