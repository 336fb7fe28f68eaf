//! Document parsing facade.
//!
//! [`DocumentConverter`] ties the two tree readers, the enrichment pass and
//! JSON serialization together: parse a file (whole-document or streaming by
//! tag), optionally inject classification data, then read or write the
//! result as JSON.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::convert::element_to_map;
use crate::element::Element;
use crate::error::{ConverterError, Result};
use crate::inject::Injector;
use crate::naming::camel_to_snake;
use crate::stream::parse_matching_file;

/// Holds one converted document.
///
/// Accessors fail with [`ConverterError::NotYetParsed`] until a parse has
/// completed.
#[derive(Debug, Default)]
pub struct DocumentConverter {
    document: Option<Value>,
}

impl DocumentConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML file into the converted mapping form.
    ///
    /// With a `search_tag`, the file is streamed and only subtrees matching
    /// that tag are materialized, which bounds memory on large listings.
    /// Without one, the whole document is loaded and converted from the
    /// root.
    pub fn parse_file(&mut self, path: &Path, search_tag: Option<&str>) -> Result<()> {
        let document = match search_tag {
            Some(tag) => parse_matching_file(path, tag)?,
            None => parse_whole_file(path)?,
        };
        self.document = Some(document);
        Ok(())
    }

    /// The converted document.
    pub fn document(&self) -> Result<&Value> {
        self.document.as_ref().ok_or(ConverterError::NotYetParsed)
    }

    /// Run the enrichment pass over the converted document.
    pub fn inject(&mut self, injector: &Injector<'_>) -> Result<()> {
        let document = self.document.take().ok_or(ConverterError::NotYetParsed)?;
        self.document = Some(injector.inject(document));
        Ok(())
    }

    /// Serialize the converted document to a JSON string.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let document = self.document()?;
        let json = if pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(json)
    }

    /// Write the converted document to a JSON file.
    pub fn write_json_file(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = self.to_json_string(pretty)?;
        fs::write(path, json)?;
        debug!(path = %path.display(), pretty, "wrote JSON output");
        Ok(())
    }
}

/// Load and convert a whole document from its root element.
///
/// The root is the one element never omitted: a fully empty root still
/// yields its key, mapped to an empty object.
fn parse_whole_file(path: &Path) -> Result<Value> {
    let xml = fs::read_to_string(path)?;
    let doc = roxmltree::Document::parse(&xml)?;
    let root = Element::from_node(doc.root_element());

    let mut converted = element_to_map(&root);
    if converted.is_empty() {
        converted.insert(camel_to_snake(root.tag()), Value::Object(Map::new()));
    }
    Ok(Value::Object(converted))
}
