use thiserror::Error;

#[derive(Error, Debug)]
/// Fatal import error
///
/// Per-record conditions never show up here; they become
/// [`Violation`](crate::core::validation::Violation) values and are rendered
/// into the import report instead.
pub enum ImportError {
    /// The payload could not be decoded into typed records. Nothing has been
    /// validated or persisted when this is returned.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The backing store rejected the batch or the commit. Propagated
    /// unmodified, no partial-commit recovery is attempted.
    #[error("Store error: {0}")]
    Store(String),

    /// An export projection could not be rendered.
    #[error("Export error: {0}")]
    Export(String),
}
