//! Script name and invocation semantics resolution.
//!
//! Given a `TypeGraph` annotated with markers, assigns every type and member
//! its script name and calling convention:
//! - `options` - `ResolverOptions` (name minimization)
//! - `semantics` - the resolved values handed to the code emitter
//! - `registry` - per-type name registries and interface name counters
//! - `engine` - `ResolutionEngine` and the `Resolution` it produces
//! - `report` - a name-keyed, serializable snapshot of a `Resolution`
//!
//! Source-program problems never fail a run: they are recorded as diagnostics
//! and the affected entity gets a fallback semantics.

pub mod engine;
pub mod inline_code;
pub mod options;
pub mod registry;
pub mod report;
pub mod semantics;

mod member_resolver;
mod method_resolver;
mod preferred_name;
mod recursion;
mod state;
mod type_resolver;

pub use engine::{Resolution, ResolutionEngine};
pub use options::ResolverOptions;
pub use registry::{InterfaceNameCounters, NameRegistry};
pub use report::{ResolutionReport, TypeReport};
pub use semantics::{
    EventSemantics, FieldSemantics, MethodSemantics, PropertySemantics, TypeSemantics,
};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod recursion_tests;
#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
#[cfg(test)]
#[path = "../tests/inline_code_tests.rs"]
mod inline_code_tests;
#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;
#[cfg(test)]
#[path = "../tests/type_resolver_tests.rs"]
mod type_resolver_tests;
#[cfg(test)]
#[path = "../tests/method_resolver_tests.rs"]
mod method_resolver_tests;
#[cfg(test)]
#[path = "../tests/member_resolver_tests.rs"]
mod member_resolver_tests;
#[cfg(test)]
#[path = "../tests/minimization_tests.rs"]
mod minimization_tests;
#[cfg(test)]
#[path = "../tests/determinism_tests.rs"]
mod determinism_tests;
