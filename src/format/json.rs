use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::record::{RecordReader, RecordReaderResult};
use crate::error::ImportError;

/// Decodes a JSON array payload into an ordered sequence of records.
///
/// The whole payload is decoded eagerly: malformed JSON, or an element
/// that cannot decode into the record type, is fatal for the call.
/// Value-level constraints belong on the record type as strings or options
/// and are checked by the pipeline's validation step.
pub struct JsonRecordReader<R> {
    _pd: PhantomData<R>,
}

impl<R> JsonRecordReader<R> {
    pub fn new() -> Self {
        Self { _pd: PhantomData }
    }
}

impl<R> Default for JsonRecordReader<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DeserializeOwned> RecordReader<R> for JsonRecordReader<R> {
    fn read_all(&self, payload: &[u8]) -> RecordReaderResult<R> {
        serde_json::from_slice(payload).map_err(|e| ImportError::Parse(e.to_string()))
    }
}

/// Renders export projections as JSON text.
///
/// Indented by default. Fields that should be omitted when absent carry
/// `#[serde(skip_serializing_if = "Option::is_none")]` on the projection
/// type.
///
/// # Examples
///
/// ```
/// use batch_import_rs::format::json::JsonExporterBuilder;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Listing {
///     name: String,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     discount: Option<String>,
/// }
///
/// let exporter = JsonExporterBuilder::new().pretty(false).build();
///
/// let json = exporter
///     .export(&[Listing { name: "356".to_string(), discount: None }])
///     .unwrap();
///
/// assert_eq!(json, r#"[{"name":"356"}]"#);
/// ```
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn export<T: Serialize>(&self, value: &T) -> Result<String, ImportError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };

        result.map_err(|e| ImportError::Export(e.to_string()))
    }
}

pub struct JsonExporterBuilder {
    pretty: bool,
}

impl JsonExporterBuilder {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    pub fn build(self) -> JsonExporter {
        JsonExporter {
            pretty: self.pretty,
        }
    }
}

impl Default for JsonExporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
