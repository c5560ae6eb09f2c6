//! Arena identifiers.
//!
//! Ids are dense indices into one `TypeGraph`. They are only meaningful for the
//! graph that allocated them and serve as the stable keys of every memo table.

use serde::Serialize;
use std::fmt;

/// Identifier of a type in a `TypeGraph`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TypeId(pub u32);

/// Identifier of a member (method, property, field, event or accessor).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MemberId(pub u32);

/// Identifier of an assembly (compilation unit).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AssemblyId(pub u32);

impl TypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MemberId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl AssemblyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member#{}", self.0)
    }
}
