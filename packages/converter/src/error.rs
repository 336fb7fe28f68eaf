//! Error types for the converter.
//!
//! One crate-wide error enum for library consumers, plus a `Result` alias.
//! Lookup misses during injection are not errors and never appear here; the
//! injector records `null` for them and continues.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The converted document was requested before any parse completed.
    #[error("no document has been parsed; call parse_file() first")]
    NotYetParsed,

    /// Whole-document XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Streaming XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlStream(#[from] quick_xml::Error),

    /// The document ended while elements were still open.
    #[error("XML parsing failed: document ended with unclosed element <{tag}>")]
    UnclosedElement { tag: String },

    /// An XML name or CDATA section was not valid UTF-8.
    #[error("XML content is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The classification file header does not contain the index column.
    #[error("classification file {} has no '{column}' column in its header", path.display())]
    MissingIndexColumn { column: String, path: PathBuf },

    /// The classification file is empty (no header line).
    #[error("classification file {} is empty; expected a header line", path.display())]
    EmptyClassificationFile { path: PathBuf },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConverterError>;
