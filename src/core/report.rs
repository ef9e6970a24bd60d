use std::fmt;

use crate::core::validation::ValidationOutcome;

/// Result of one import run.
///
/// Holds one text line per top-level input record, in input order, plus the
/// per-record [`ValidationOutcome`] sequence for cause inspection. The line
/// count always equals the number of parsed top-level records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    lines: Vec<String>,
    outcomes: Vec<ValidationOutcome>,
}

impl ImportReport {
    pub(crate) fn new(lines: Vec<String>, outcomes: Vec<ValidationOutcome>) -> Self {
        Self { lines, outcomes }
    }

    /// Report lines, one per top-level record, mirroring input order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Per-record outcomes, mirroring input order.
    pub fn outcomes(&self) -> &[ValidationOutcome] {
        &self.outcomes
    }

    /// Number of accepted top-level records.
    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    /// Number of rejected top-level records.
    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.accepted_count()
    }

    /// Renders the report as newline-joined text, without a trailing
    /// newline.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
