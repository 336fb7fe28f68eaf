//! FDA classification flat-file loader.
//!
//! The classification file is pipe-delimited text: the first line is a
//! header naming the columns, every following line is one classification
//! record. The table keys each record's verbatim line by the value of a
//! configurable index column (`PRODUCTCODE` by default), so the injector
//! can look up product codes harvested from the converted document.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::CLASSIFICATION_DELIMITER;
use crate::error::{ConverterError, Result};

/// In-memory classification lookup table, built once and read-only after.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    index_field: String,
    entries: HashMap<String, String>,
}

impl ClassificationTable {
    /// Load a classification file, keying each line by `index_field`.
    ///
    /// Fails if the file cannot be read, is empty, or its header does not
    /// contain the index column. Lines too short to reach the index column
    /// are skipped with a warning.
    pub fn load(path: &Path, index_field: &str) -> Result<Self> {
        let file = File::open(path)?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(ConverterError::EmptyClassificationFile {
                    path: path.to_path_buf(),
                })
            }
        };

        let index = header
            .trim_end()
            .split(CLASSIFICATION_DELIMITER)
            .position(|column| column == index_field)
            .ok_or_else(|| ConverterError::MissingIndexColumn {
                column: index_field.to_string(),
                path: path.to_path_buf(),
            })?;

        let mut entries = HashMap::new();
        for (number, line) in lines.enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.split(CLASSIFICATION_DELIMITER).nth(index) {
                Some(key) => {
                    entries.insert(key.to_string(), trimmed.to_string());
                }
                None => {
                    // Line 1 is the header, data lines start at 2
                    warn!(line = number + 2, "classification line has too few columns, skipping");
                }
            }
        }

        debug!(entries = entries.len(), index_field, "classification table loaded");

        Ok(Self {
            index_field: index_field.to_string(),
            entries,
        })
    }

    /// Look up the raw classification line for a code.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// The column this table is keyed by.
    pub fn index_field(&self) -> &str {
        &self.index_field
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
