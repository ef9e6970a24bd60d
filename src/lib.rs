#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 <div align="center">
   <h1>Batch-Import for Rust</h1>
   <h3>📦 A toolkit for building validate-then-persist structured import pipelines</h3>

   [![crate](https://img.shields.io/crates/v/batch-import-rs.svg)](https://crates.io/crates/batch-import-rs)
   [![docs](https://docs.rs/batch-import-rs/badge.svg)](https://docs.rs/batch-import-rs)
   ![license](https://shields.io/badge/license-MIT%2FApache--2.0-blue)

  </div>

 # Batch-Import for Rust

 **Batch-Import for Rust** turns a serialized batch of records (a JSON array or an
 XML document) into durably persisted entities plus a line-per-record status
 report. It packages the recurring shape of structured imports into one pipeline
 with clear seams: parse, validate, resolve references, transform, persist,
 report. Each import you write is just a record type, a constraint set, and a
 mapper.

 ## Core Concepts

Understanding these core components will help you get started:

- **ImportPipeline:** Represents one import operation. A pipeline decodes the whole
  payload, validates each top-level record independently, maps the survivors into
  entities, persists everything as a single batch, and reports one line per input
  record, in input order.
- **RecordReader:** An abstraction that decodes a raw payload into an ordered
  sequence of typed records. A malformed payload is fatal and aborts the call
  before any validation or persistence.
- **RecordMapper:** An abstraction that resolves foreign-key references against the
  store and transforms one validated record into persistence-ready entities. A
  rejected record takes all of its nested children with it; a rejected nested
  child never takes its siblings or its parent.
- **EntityStore:** The persistence collaborator. The pipeline stages one logical
  batch per invocation and commits once; a commit failure propagates unmodified.
- **ImportReport:** The rendered outcome: one success or error line per top-level
  record, plus per-record tagged causes for diagnostics.

 ## Features

The crate is modular, allowing you to enable only the features you need:

| **Feature**   | **Description**                                                |
|---------------|----------------------------------------------------------------|
| json          | Enables the JSON `RecordReader` and the JSON exporter          |
| xml           | Enables the XML `RecordReader` and the XML exporter            |
| logger        | Enables a logger `EntityStore`, useful for debugging pipelines |
| full          | Enables all available features                                 |

 ## Getting Started
 Make sure you activated the suitable features crate on Cargo.toml:

```toml
[dependencies]
batch-import-rs = { version = "<version>", features = ["<full|json|xml|logger>"] }
```

Then, on your main.rs:

```rust
# use serde::Deserialize;
# use validator::Validate;
# use batch_import_rs::{
#     core::{
#         pipeline::ImportPipelineBuilder,
#         record::{Accepted, MapperResult, RecordMapper},
#         validation::Violation,
#     },
#     error::ImportError,
#     format::json::JsonRecordReader,
#     store::memory::MemoryStore,
# };
# #[derive(Deserialize, Validate)]
# struct ImportSubscriberDto {
#     #[validate(required, length(min = 3))]
#     name: Option<String>,
#     #[validate(required, email)]
#     email: Option<String>,
# }
# #[derive(Debug, Clone)]
# struct Subscriber {
#     name: String,
#     email: String,
# }
# #[derive(Default)]
# struct SubscriberMapper {}
# impl RecordMapper<ImportSubscriberDto, Subscriber, MemoryStore<Subscriber>> for SubscriberMapper {
#     fn map(
#         &self,
#         record: &ImportSubscriberDto,
#         _store: &MemoryStore<Subscriber>,
#     ) -> MapperResult<Subscriber> {
#         let Some(name) = record.name.clone() else {
#             return Err(Violation::MissingField("name".to_string()));
#         };
#         let Some(email) = record.email.clone() else {
#             return Err(Violation::MissingField("email".to_string()));
#         };
#         Ok(Accepted::single(Subscriber { name, email }))
#     }
#     fn success_line(&self, record: &ImportSubscriberDto, _accepted: &Accepted<Subscriber>) -> String {
#         format!(
#             "Successfully imported {}.",
#             record.name.as_deref().unwrap_or_default()
#         )
#     }
# }

fn main() -> Result<(), ImportError> {
    let payload = br#"[
        { "name": "Amandine", "email": "amandine@example.fr" },
        { "name": "Ug", "email": "not-an-email" }
    ]"#;

    let reader: JsonRecordReader<ImportSubscriberDto> = JsonRecordReader::new();
    let mapper = SubscriberMapper::default();
    let store = MemoryStore::new();

    let pipeline = ImportPipelineBuilder::new()
        .name("import-subscribers")
        .reader(&reader) // decode a JSON array payload
        .mapper(&mapper) // transform validated records
        .store(&store) // persist as one batch
        .build();

    let report = pipeline.run(payload)?;

    assert_eq!(
        report.render(),
        "Successfully imported Amandine.\nInvalid data!"
    );
    assert_eq!(store.committed_len(), 1);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 ## Contribution
 Unless you explicitly state otherwise, any contribution intentionally submitted
 for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
 dual licensed as above, without any additional terms or conditions

 */

/// Core module for import pipelines
pub mod core;

/// Error types for import operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of payload readers and exporters (for example: json reader and exporter)
pub mod format;

/// Store collaborators used by import pipelines
pub mod store;
