use crate::core::validation::Violation;
use crate::error::ImportError;

/// Type alias for the result of decoding a whole payload.
pub type RecordReaderResult<R> = Result<Vec<R>, ImportError>;

/// Type alias for the result of mapping one record.
pub type MapperResult<E> = Result<Accepted<E>, Violation>;

/// Decodes a serialized payload into an ordered sequence of typed records.
///
/// Readers decode eagerly: a malformed payload is fatal for the whole call
/// and aborts before any record is validated or persisted.
pub trait RecordReader<R> {
    fn read_all(&self, payload: &[u8]) -> RecordReaderResult<R>;
}

/// Maps a validated record into persistence-ready entities.
///
/// This is the seam where cross-reference resolution and transformation
/// happen. `map` receives the store so that foreign-key fields can be
/// resolved against already-persisted data; an unresolved reference on a
/// nested element drops just that element, while a violation returned from
/// `map` rejects the record and all of its children as a unit.
pub trait RecordMapper<R, E, S> {
    /// Resolves references and transforms one record.
    ///
    /// # Returns
    /// - `Ok(Accepted)`: the record survives; its entities join the batch
    /// - `Err(Violation)`: the record and all its children are rejected
    fn map(&self, record: &R, store: &S) -> MapperResult<E>;

    /// Renders the success line for an accepted record.
    ///
    /// The template interpolates the record's identifying fields and the
    /// derived accepted-children count.
    fn success_line(&self, record: &R, accepted: &Accepted<E>) -> String;
}

/// Outcome of mapping one accepted record.
pub struct Accepted<E> {
    /// Entities produced by the record: the parent plus its accepted
    /// children, in the order they should join the batch.
    pub entities: Vec<E>,
    /// Number of nested children that survived validation and reference
    /// resolution.
    pub children_accepted: usize,
    /// Causes for nested children that were dropped individually. These do
    /// not add report lines; they are kept for diagnostics.
    pub child_violations: Vec<Violation>,
}

impl<E> Accepted<E> {
    /// An accepted record producing a single entity and no children.
    pub fn single(entity: E) -> Self {
        Self {
            entities: vec![entity],
            children_accepted: 0,
            child_violations: Vec::new(),
        }
    }
}
