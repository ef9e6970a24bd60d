#[cfg(feature = "json")]
/// This module provides a JSON record reader and exporter for import pipelines.
pub mod json;

#[cfg(feature = "xml")]
/// This module provides an XML record reader and exporter for import pipelines.
pub mod xml;
