use chrono::{NaiveDate, NaiveDateTime};
use validator::ValidationErrors;

/// Cause of a per-record rejection.
///
/// Every variant renders as the same opaque marker line in the report; the
/// tagged cause exists so tests and diagnostics can inspect *why* a record
/// was dropped without changing the rendered output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Violation {
    /// A required field was absent.
    MissingField(String),
    /// A numeric, length or ordering bound was violated.
    OutOfRange(String),
    /// A value did not match its declared textual pattern.
    BadFormat(String),
    /// A foreign-key reference did not resolve against the store.
    UnresolvedReference(String),
    /// The record duplicates an already accepted record of this batch.
    Duplicate(String),
}

/// Per-record result of the validate and transform steps.
///
/// One outcome is produced for every top-level record, in input order. A
/// rejected record carries the violations that rejected it; an accepted
/// record may still carry violations of nested children that were dropped
/// individually without invalidating their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    index: usize,
    accepted: bool,
    violations: Vec<Violation>,
    child_violations: Vec<Violation>,
}

impl ValidationOutcome {
    pub(crate) fn accepted(index: usize, child_violations: Vec<Violation>) -> Self {
        Self {
            index,
            accepted: true,
            violations: Vec::new(),
            child_violations,
        }
    }

    pub(crate) fn rejected(index: usize, violations: Vec<Violation>) -> Self {
        Self {
            index,
            accepted: false,
            violations,
            child_violations: Vec::new(),
        }
    }

    /// Position of the record in the input payload.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the record contributed entities to the persisted batch.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Violations that rejected the record. Empty for accepted records.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations of nested children that were rejected individually while
    /// the record itself was accepted.
    pub fn child_violations(&self) -> &[Violation] {
        &self.child_violations
    }
}

/// Converts the declarative constraint errors of a record into tagged
/// [`Violation`] values.
///
/// The result is sorted so that the outcome of a record does not depend on
/// hash-map iteration order.
pub fn violations_of(errors: &ValidationErrors) -> Vec<Violation> {
    let mut violations: Vec<Violation> = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            let field = field.to_string();
            let violation = match error.code.as_ref() {
                "required" => Violation::MissingField(field),
                "range" | "length" => Violation::OutOfRange(field),
                _ => Violation::BadFormat(field),
            };
            violations.push(violation);
        }
    }

    violations.sort();
    violations
}

/// Parses a date field against a single fixed pattern.
///
/// A value that does not match the pattern is a per-record violation, never
/// a fatal parse error.
pub fn parse_date(field: &str, value: &str, pattern: &str) -> Result<NaiveDate, Violation> {
    NaiveDate::parse_from_str(value, pattern)
        .map_err(|_| Violation::BadFormat(field.to_string()))
}

/// Parses a timestamp field against a single fixed pattern.
pub fn parse_datetime(
    field: &str,
    value: &str,
    pattern: &str,
) -> Result<NaiveDateTime, Violation> {
    NaiveDateTime::parse_from_str(value, pattern)
        .map_err(|_| Violation::BadFormat(field.to_string()))
}
