use std::any::type_name;
use std::marker::PhantomData;

use quick_xml::Writer;
use quick_xml::de::from_str;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader as XmlReader;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::record::{RecordReader, RecordReaderResult};
use crate::error::ImportError;

/// Decodes an XML document payload into an ordered sequence of records.
///
/// The document has a fixed root element with repeated child elements; each
/// child element matching the item tag is decoded into the record type.
/// Ill-formed XML, or an element that cannot decode into the record type,
/// is fatal for the call. Value-level constraints belong on the record type
/// as strings or options and are checked by the pipeline's validation step.
///
/// # Examples
///
/// ```
/// use batch_import_rs::core::record::RecordReader;
/// use batch_import_rs::format::xml::XmlRecordReaderBuilder;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Hall {
///     #[serde(rename = "Name")]
///     name: String,
///     #[serde(rename = "Seats")]
///     seats: u32,
/// }
///
/// let payload = br#"
/// <Halls>
///   <Hall>
///     <Name>Main</Name>
///     <Seats>120</Seats>
///   </Hall>
///   <Hall>
///     <Name>Balcony</Name>
///     <Seats>40</Seats>
///   </Hall>
/// </Halls>
/// "#;
///
/// let reader = XmlRecordReaderBuilder::<Hall>::new().tag("Hall").build();
/// let halls = reader.read_all(payload).unwrap();
///
/// assert_eq!(halls.len(), 2);
/// assert_eq!(halls[0].name, "Main");
/// assert_eq!(halls[1].seats, 40);
/// ```
pub struct XmlRecordReader<R> {
    item_tag: String,
    _marker: PhantomData<R>,
}

impl<R: DeserializeOwned> XmlRecordReader<R> {
    /// Re-emits the events of one item element into a standalone fragment
    /// that the serde deserializer can decode.
    fn read_fragment(
        &self,
        reader: &mut XmlReader<&[u8]>,
        start: BytesStart<'static>,
    ) -> Result<String, ImportError> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Start(start))
            .map_err(|e| ImportError::Parse(e.to_string()))?;

        let mut depth = 1;
        let mut buf = Vec::new();

        while depth > 0 {
            buf.clear();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| ImportError::Parse(format!("XML parse error: {}", e)))?;

            match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    return Err(ImportError::Parse("unexpected end of document".to_string()));
                }
                _ => {}
            }

            writer
                .write_event(event)
                .map_err(|e| ImportError::Parse(e.to_string()))?;
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| ImportError::Parse(e.to_string()))
    }
}

impl<R: DeserializeOwned> RecordReader<R> for XmlRecordReader<R> {
    fn read_all(&self, payload: &[u8]) -> RecordReaderResult<R> {
        let mut reader = XmlReader::from_reader(payload);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| ImportError::Parse(format!("XML parse error: {}", e)))?;

            match event {
                Event::Start(ref e) if e.name().as_ref() == self.item_tag.as_bytes() => {
                    let start = e.to_owned();
                    let fragment = self.read_fragment(&mut reader, start)?;
                    let record = from_str(&fragment).map_err(|e| {
                        ImportError::Parse(format!("XML record error: {}", e))
                    })?;
                    records.push(record);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(records)
    }
}

/// A builder for creating XML record readers.
pub struct XmlRecordReaderBuilder<R> {
    tag_name: Option<String>,
    _marker: PhantomData<R>,
}

impl<R: DeserializeOwned> Default for XmlRecordReaderBuilder<R> {
    fn default() -> Self {
        Self {
            tag_name: None,
            _marker: PhantomData,
        }
    }
}

impl<R: DeserializeOwned> XmlRecordReaderBuilder<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the XML tag name identifying one item element.
    pub fn tag<S: AsRef<str>>(mut self, tag_name: S) -> Self {
        self.tag_name = Some(tag_name.as_ref().to_string());
        self
    }

    pub fn build(self) -> XmlRecordReader<R> {
        let item_tag = match self.tag_name {
            Some(tag) => tag,
            None => {
                // Default tag name is derived from the type name
                let type_str = type_name::<R>();
                type_str.split("::").last().unwrap_or(type_str).to_string()
            }
        };

        XmlRecordReader {
            item_tag,
            _marker: PhantomData,
        }
    }
}

/// Renders export projections as namespace-free XML text.
pub struct XmlExporter {
    root_tag: String,
    item_tag: String,
    indent: bool,
}

impl XmlExporter {
    pub fn export<T: Serialize>(&self, items: &[T]) -> Result<String, ImportError> {
        let mut writer = if self.indent {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        } else {
            Writer::new(Vec::new())
        };

        writer
            .write_event(Event::Start(BytesStart::new(&self.root_tag)))
            .map_err(|e| ImportError::Export(e.to_string()))?;

        for item in items {
            writer
                .write_serializable(&self.item_tag, item)
                .map_err(|e| ImportError::Export(format!("Failed to write XML item: {}", e)))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(&self.root_tag)))
            .map_err(|e| ImportError::Export(e.to_string()))?;

        String::from_utf8(writer.into_inner()).map_err(|e| ImportError::Export(e.to_string()))
    }
}

/// A builder for creating XML exporters.
///
/// The root tag wraps the exported items; each item is written under the
/// item tag. No namespace declarations are emitted.
pub struct XmlExporterBuilder {
    root_tag: String,
    item_tag: String,
    indent: bool,
}

impl XmlExporterBuilder {
    pub fn new() -> Self {
        Self {
            root_tag: "Items".to_string(),
            item_tag: "Item".to_string(),
            indent: false,
        }
    }

    pub fn root_tag<S: AsRef<str>>(mut self, tag: S) -> Self {
        self.root_tag = tag.as_ref().to_string();
        self
    }

    pub fn item_tag<S: AsRef<str>>(mut self, tag: S) -> Self {
        self.item_tag = tag.as_ref().to_string();
        self
    }

    pub fn indent(mut self, yes: bool) -> Self {
        self.indent = yes;
        self
    }

    pub fn build(self) -> XmlExporter {
        XmlExporter {
            root_tag: self.root_tag,
            item_tag: self.item_tag,
            indent: self.indent,
        }
    }
}

impl Default for XmlExporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
