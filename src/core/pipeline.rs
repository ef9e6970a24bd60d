use log::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::core::record::{RecordMapper, RecordReader};
use crate::core::report::ImportReport;
use crate::core::validation::{ValidationOutcome, violations_of};
use crate::error::ImportError;
use crate::store::EntityStore;

use super::build_name;

/// Marker line appended for every rejected top-level record.
///
/// All rejection causes collapse into this one opaque message; the tagged
/// causes stay inspectable on the report outcomes.
pub const DEFAULT_ERROR_MARKER: &str = "Invalid data!";

/// A validate-then-persist import pipeline.
///
/// One invocation decodes the whole payload, validates each top-level
/// record independently, resolves references and transforms the survivors,
/// persists every produced entity as a single batch, and reports one line
/// per input record.
///
/// The pipeline runs synchronously to completion. Persistence is one
/// logical batch: a commit failure aborts the call and propagates
/// unmodified.
pub struct ImportPipeline<'a, R, E, S> {
    /// Unique identifier for this pipeline instance
    id: Uuid,
    /// Human-readable name for the pipeline
    name: String,
    reader: &'a dyn RecordReader<R>,
    mapper: &'a dyn RecordMapper<R, E, S>,
    store: &'a S,
    error_marker: String,
}

impl<R, E, S> ImportPipeline<'_, R, E, S>
where
    R: Validate,
    S: EntityStore<E>,
{
    /// Runs the pipeline over one payload.
    ///
    /// # Returns
    /// - `Ok(ImportReport)` with one line per top-level record
    /// - `Err(ImportError)` on a malformed payload or a store failure
    pub fn run(&self, payload: &[u8]) -> Result<ImportReport, ImportError> {
        info!("Start of import: {}, id: {}", self.name, self.id);

        let records = self.reader.read_all(payload)?;
        debug!("Decoded {} records", records.len());

        let mut lines = Vec::with_capacity(records.len());
        let mut outcomes = Vec::with_capacity(records.len());
        let mut batch: Vec<E> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if let Err(errors) = record.validate() {
                let violations = violations_of(&errors);
                debug!("Record {} rejected: {:?}", index, violations);
                lines.push(self.error_marker.clone());
                outcomes.push(ValidationOutcome::rejected(index, violations));
                continue;
            }

            match self.mapper.map(record, self.store) {
                Ok(accepted) => {
                    lines.push(self.mapper.success_line(record, &accepted));
                    outcomes.push(ValidationOutcome::accepted(
                        index,
                        accepted.child_violations,
                    ));
                    batch.extend(accepted.entities);
                }
                Err(violation) => {
                    debug!("Record {} rejected: {:?}", index, violation);
                    lines.push(self.error_marker.clone());
                    outcomes.push(ValidationOutcome::rejected(index, vec![violation]));
                }
            }
        }

        debug!("Persisting batch of {} entities", batch.len());
        self.store.add_batch(batch)?;
        self.store.commit()?;

        info!("End of import: {}, id: {}", self.name, self.id);

        Ok(ImportReport::new(lines, outcomes))
    }

    /// Name of the pipeline, generated randomly if not configured.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for creating an import pipeline.
///
/// The reader, mapper and store are required; the name defaults to a
/// random one and the error marker to [`DEFAULT_ERROR_MARKER`].
pub struct ImportPipelineBuilder<'a, R, E, S> {
    name: Option<String>,
    reader: Option<&'a dyn RecordReader<R>>,
    mapper: Option<&'a dyn RecordMapper<R, E, S>>,
    store: Option<&'a S>,
    error_marker: String,
}

impl<'a, R, E, S> Default for ImportPipelineBuilder<'a, R, E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R, E, S> ImportPipelineBuilder<'a, R, E, S> {
    pub fn new() -> Self {
        Self {
            name: None,
            reader: None,
            mapper: None,
            store: None,
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }

    /// Sets the name of the pipeline.
    pub fn name<N: Into<String>>(mut self, name: N) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the payload reader.
    pub fn reader(mut self, reader: &'a impl RecordReader<R>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Sets the record mapper.
    pub fn mapper(mut self, mapper: &'a impl RecordMapper<R, E, S>) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Sets the backing store.
    pub fn store(mut self, store: &'a S) -> Self {
        self.store = Some(store);
        self
    }

    /// Overrides the marker line used for rejected records.
    pub fn error_marker<M: Into<String>>(mut self, marker: M) -> Self {
        self.error_marker = marker.into();
        self
    }

    /// Builds the pipeline.
    ///
    /// # Panics
    /// Panics if the reader, mapper or store is missing.
    pub fn build(self) -> ImportPipeline<'a, R, E, S> {
        ImportPipeline {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            reader: self
                .reader
                .expect("Reader is required. Call .reader() before .build()"),
            mapper: self
                .mapper
                .expect("Mapper is required. Call .mapper() before .build()"),
            store: self
                .store
                .expect("Store is required. Call .store() before .build()"),
            error_marker: self.error_marker,
        }
    }
}
