//! Common types and utilities for the scriptsem resolver.
//!
//! This crate provides the leaf pieces every other scriptsem crate builds on:
//! - Identifier helpers (`naming`): camel-casing, base-62 suffixes, identifier validation
//! - The run-scoped error sink (`DiagnosticBag`) and its `Diagnostic` entries
//! - Centralized limits

// Diagnostics - keyed, insertion-ordered error collection
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticKind};

// Centralized limits and thresholds
pub mod limits;

// Identifier mangling and validation
pub mod naming;
pub use naming::{encode_number, is_valid_identifier, is_valid_nested_identifier, make_camel_case};

#[cfg(test)]
#[path = "../tests/naming_tests.rs"]
mod naming_tests;
#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
