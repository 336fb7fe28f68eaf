//! openfda-converter - Convert FDA device listing XML to JSON.
//!
//! This crate converts device registration listing XML into a nested JSON
//! document, optionally enriching product codes with records looked up from
//! the FDA classification flat file.
//!
//! # Example
//!
//! ```
//! use openfda_converter::naming::camel_to_snake;
//!
//! // Tags are normalized to snake_case keys
//! assert_eq!(camel_to_snake("registrationListing"), "registration_listing");
//! assert_eq!(camel_to_snake("fdaProductCode"), "fda_product_code");
//! ```
//!
//! # Architecture
//!
//! The converter is organized into several modules:
//!
//! - [`config`]: Named defaults and fixed field names
//! - [`error`]: Error types and Result alias
//! - [`naming`]: Tag name normalization
//! - [`element`]: Owned XML element tree
//! - [`convert`]: Tree-to-mapping conversion (the core)
//! - [`stream`]: Streaming reader for a known repeating tag
//! - [`document`]: Parse/inject/serialize facade
//! - [`classification`]: Classification flat-file lookup table
//! - [`inject`]: Classification enrichment pass
//! - [`cli`]: Command-line interface

pub mod classification;
pub mod cli;
pub mod config;
pub mod convert;
pub mod document;
pub mod element;
pub mod error;
pub mod inject;
pub mod naming;
pub mod stream;

// Re-export commonly used items
pub use classification::ClassificationTable;
pub use document::DocumentConverter;
pub use error::{ConverterError, Result};
pub use inject::Injector;
