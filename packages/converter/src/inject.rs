//! Classification enrichment pass.
//!
//! Walks the converted document and, under every classification holder
//! field, harvests the product codes nested anywhere below it, looks each
//! up in the [`ClassificationTable`], and attaches the results as a list.
//! Codes absent from the table yield `null` entries; a miss is never an
//! error. Each recursive step builds a fresh value rather than mutating the
//! one it walks.

use serde_json::{Map, Value};
use tracing::debug;

use crate::classification::ClassificationTable;
use crate::config::{DEFAULT_CODE_FIELD, DEFAULT_ENRICHMENT_FIELD, DEFAULT_HOLDER_FIELD};

/// Recursive enrichment of classification holders.
///
/// The three field names are configuration: the holder under which codes
/// live, the code field itself, and the field the lookup results are
/// attached under.
#[derive(Debug)]
pub struct Injector<'a> {
    table: &'a ClassificationTable,
    holder_field: String,
    code_field: String,
    enrichment_field: String,
}

impl<'a> Injector<'a> {
    /// Injector with the standard FDA field names
    /// (`fda_product_code` / `product_code` / `openfda`).
    pub fn new(table: &'a ClassificationTable) -> Self {
        Self::with_fields(
            table,
            DEFAULT_HOLDER_FIELD,
            DEFAULT_CODE_FIELD,
            DEFAULT_ENRICHMENT_FIELD,
        )
    }

    /// Injector with custom field names.
    pub fn with_fields(
        table: &'a ClassificationTable,
        holder_field: &str,
        code_field: &str,
        enrichment_field: &str,
    ) -> Self {
        Self {
            table,
            holder_field: holder_field.to_string(),
            code_field: code_field.to_string(),
            enrichment_field: enrichment_field.to_string(),
        }
    }

    /// Enrich a document, consuming it and returning the enriched form.
    ///
    /// Every mapping and sequence is visited so nested holders anywhere in
    /// the structure are found. Scalars pass through unchanged.
    pub fn inject(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let mut result = Map::with_capacity(map.len());
                for (key, entry) in map {
                    if key == self.holder_field {
                        let enriched = self.enrich_holder(entry);
                        result.insert(key, enriched);
                    } else {
                        result.insert(key, self.inject(entry));
                    }
                }
                Value::Object(result)
            }
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.inject(item)).collect())
            }
            scalar => scalar,
        }
    }

    /// Attach lookup results to a holder value, which may be a single
    /// mapping or a sequence of mappings. Anything else passes through.
    fn enrich_holder(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.attach_enrichment(map)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(map) => Value::Object(self.attach_enrichment(map)),
                        other => other,
                    })
                    .collect(),
            ),
            other => other,
        }
    }

    /// Harvest the codes below one holder mapping and attach their lookup
    /// results. The accumulator is fresh per holder.
    fn attach_enrichment(&self, mut holder: Map<String, Value>) -> Map<String, Value> {
        let mut codes = Vec::new();
        for (key, value) in &holder {
            self.collect_entry(key, value, &mut codes);
        }

        debug!(codes = codes.len(), "enriching classification holder");

        let results: Vec<Value> = codes
            .iter()
            .map(|code| match self.table.get(code) {
                Some(line) => Value::String(line.to_string()),
                None => Value::Null,
            })
            .collect();

        holder.insert(self.enrichment_field.clone(), Value::Array(results));
        holder
    }

    /// Collect string values stored at the code field, in discovery order.
    fn collect_entry(&self, key: &str, value: &Value, codes: &mut Vec<String>) {
        if key == self.code_field {
            if let Value::String(code) = value {
                codes.push(code.clone());
            }
            return;
        }
        self.collect_value(value, codes);
    }

    fn collect_value(&self, value: &Value, codes: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (child_key, child) in map {
                    self.collect_entry(child_key, child, codes);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.collect_value(item, codes);
                }
            }
            _ => {}
        }
    }
}
