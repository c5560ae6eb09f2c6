//! Diagnostic Infrastructure
//!
//! Resolution never aborts on a problem in the source program. Every violation
//! becomes a `Diagnostic` in the run's `DiagnosticBag`, and the offending entity
//! gets a safe fallback semantics so the run still produces a total table.
//!
//! # Keys
//!
//! Each diagnostic is keyed by `<entity>:<category>`, where `entity` is the
//! qualified type or member name and `category` is a short code such as
//! `InvalidName` or `ScriptSkipOnOverridable`. Reporting the same key twice keeps
//! the original position in the bag and replaces the message, so a single entity
//! never accumulates duplicate entries for one category.
//!
//! # Example
//!
//! ```
//! use scriptsem_common::{DiagnosticBag, DiagnosticKind};
//!
//! let mut bag = DiagnosticBag::new();
//! bag.report("N.C.M", "NonStaticWithAlias", DiagnosticKind::IllegalPlacement, "must be static");
//! assert!(bag.has_errors());
//! assert!(bag.contains("N.C.M", "NonStaticWithAlias"));
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

// =============================================================================
// Diagnostic Kind
// =============================================================================

/// Broad classification of a resolution problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Two markers that cannot be combined on one entity.
    IllegalCombination,
    /// A marker that requires a context (static, non-override, ...) the entity lacks.
    IllegalPlacement,
    /// A literal name that is not a legal target identifier.
    InvalidName,
    /// An override or interface implementation would need two different names.
    HierarchyConflict,
    /// An alternate signature without a unique main method.
    MissingBase,
}

impl DiagnosticKind {
    /// Get the kind name for display.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::IllegalCombination => "illegal-combination",
            DiagnosticKind::IllegalPlacement => "illegal-placement",
            DiagnosticKind::InvalidName => "invalid-name",
            DiagnosticKind::HierarchyConflict => "hierarchy-conflict",
            DiagnosticKind::MissingBase => "missing-base",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single resolution error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Qualified name of the type or member the diagnostic is about.
    pub entity: String,
    /// Short category code, unique per entity.
    pub category: &'static str,
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        entity: impl Into<String>,
        category: &'static str,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            entity: entity.into(),
            category,
            kind,
            message: message.into(),
        }
    }

    /// The dedup key, `<entity>:<category>`.
    pub fn key(&self) -> String {
        make_key(&self.entity, self.category)
    }

    /// Format the diagnostic in a simple format.
    ///
    /// Returns a string like: "error[InvalidName]: The name ... must be a valid identifier."
    pub fn format_simple(&self) -> String {
        format!("error[{}]: {}", self.category, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

fn make_key(entity: &str, category: &str) -> String {
    format!("{entity}:{category}")
}

// =============================================================================
// DiagnosticBag
// =============================================================================

/// The error sink of one resolution run.
///
/// Entries keep the order in which their key was first reported.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticBag {
    entries: IndexMap<String, Diagnostic>,
}

impl DiagnosticBag {
    /// Create a new empty diagnostic bag.
    pub fn new() -> Self {
        DiagnosticBag {
            entries: IndexMap::new(),
        }
    }

    /// Add a diagnostic, replacing the message of an existing entry with the same key.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.entries.insert(diagnostic.key(), diagnostic);
    }

    /// Record an error for `entity` under `category`.
    pub fn report(
        &mut self,
        entity: &str,
        category: &'static str,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) {
        self.add(Diagnostic::new(entity, category, kind, message));
    }

    /// Check whether an entry exists for `(entity, category)`.
    pub fn contains(&self, entity: &str, category: &str) -> bool {
        self.entries.contains_key(&make_key(entity, category))
    }

    /// Look up the entry for `(entity, category)`.
    pub fn get(&self, entity: &str, category: &str) -> Option<&Diagnostic> {
        self.entries.get(&make_key(entity, category))
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Get the number of diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.values()
    }

    /// Iterate over the dedup keys in report order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Filter diagnostics by kind.
    pub fn by_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.values().filter(move |d| d.kind == kind)
    }

    /// Filter diagnostics by entity.
    pub fn for_entity<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.values().filter(move |d| d.entity == entity)
    }

    /// Take all diagnostics, leaving the bag empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries).into_values().collect()
    }

    /// Format all diagnostics for display, one per line.
    pub fn format_all(&self) -> String {
        let mut result = String::new();
        for diag in self.entries.values() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(&diag.format_simple());
        }
        result
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = indexmap::map::IntoValues<String, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl Extend<Diagnostic> for DiagnosticBag {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diag in iter {
            self.add(diag);
        }
    }
}
