//! Centralized limits and thresholds for the resolver.
//!
//! The host type system guarantees that nesting and inheritance are acyclic,
//! so these limits are never hit by well-formed input. They turn a malformed
//! graph into an assertion failure instead of a stack overflow.

/// Maximum depth of the on-demand dependency chain (declaring type, base types,
/// implemented interfaces) while resolving a single type.
pub const MAX_TYPE_NESTING_DEPTH: u32 = 256;

/// Maximum number of suffixes tried when allocating a unique member name.
///
/// A type would need this many members sharing one base name before the
/// allocator gives up.
pub const MAX_NAME_ALLOCATION_ATTEMPTS: u32 = 1_000_000;
