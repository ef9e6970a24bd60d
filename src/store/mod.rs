#[cfg(feature = "logger")]
/// This module provides a store that logs entities instead of persisting them.
pub mod logger;

/// This module provides an in-memory store with staged/committed semantics.
pub mod memory;

use crate::error::ImportError;

/// The persistence collaborator of an import pipeline.
///
/// The pipeline stages every entity of one invocation as a single logical
/// batch and commits once; it treats the store as an opaque dependency and
/// never defines its internals. Read-side lookups used for reference
/// resolution are methods of the concrete store type, consumed by record
/// mappers.
pub trait EntityStore<E> {
    /// Stages a batch of entities for persistence.
    fn add_batch(&self, entities: Vec<E>) -> Result<(), ImportError>;

    /// Durably persists everything staged since the last commit.
    fn commit(&self) -> Result<(), ImportError>;
}
