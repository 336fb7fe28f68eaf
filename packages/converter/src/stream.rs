//! Streaming tree reader for a known repeating tag.
//!
//! With apriori knowledge of which tag marks the repeating record, the
//! document never has to be loaded whole: element-end events are consumed
//! one at a time, and each subtree whose normalized tag matches the target
//! is converted and immediately dropped. Peak memory stays proportional to
//! the largest single matched subtree.
//!
//! Output shape is fixed: `{"data": {<target_tag>: [...]}}`, with each array
//! entry being the converted record value (unwrapped from its tag key).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::DATA_FIELD;
use crate::convert::element_to_map;
use crate::element::Element;
use crate::error::{ConverterError, Result};
use crate::naming::camel_to_snake;

/// Stream-parse an XML file, collecting every element whose normalized tag
/// equals `target_tag`.
pub fn parse_matching_file(path: &Path, target_tag: &str) -> Result<Value> {
    let file = File::open(path)?;
    parse_matching(BufReader::new(file), target_tag)
}

/// Stream-parse XML from a reader, collecting every element whose
/// normalized tag equals `target_tag`.
///
/// Non-matching elements are attached to their parent so that a matching
/// ancestor still converts with its full subtree; a matching element is
/// converted on its end event and released instead of being attached.
pub fn parse_matching<R: BufRead>(reader: R, target_tag: &str) -> Result<Value> {
    let mut xml_reader = Reader::from_reader(reader);
    let mut buf = Vec::with_capacity(4096);
    let mut stack: Vec<Element> = Vec::new();
    let mut matches: Vec<Value> = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = str::from_utf8(e.local_name().as_ref())?.to_string();
                let attrs = extract_attrs(e)?;
                stack.push(Element::new(tag, attrs));
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    finish_element(element, target_tag, &mut stack, &mut matches);
                }
            }
            Event::Empty(ref e) => {
                // Self-closing tag: start and end in one event
                let tag = str::from_utf8(e.local_name().as_ref())?.to_string();
                let attrs = extract_attrs(e)?;
                finish_element(Element::new(tag, attrs), target_tag, &mut stack, &mut matches);
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                if let Some(top) = stack.last_mut() {
                    top.append_text(&text);
                }
            }
            Event::CData(ref e) => {
                let text = str::from_utf8(e.as_ref())?;
                if let Some(top) = stack.last_mut() {
                    top.append_text(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    // quick-xml reports a plain Eof even with elements still open; a
    // truncated document must fail, not produce partial output
    if let Some(open) = stack.last() {
        return Err(ConverterError::UnclosedElement {
            tag: open.tag().to_string(),
        });
    }

    debug!(target_tag, records = matches.len(), "streaming parse finished");

    let mut inner = Map::new();
    inner.insert(target_tag.to_string(), Value::Array(matches));
    let mut wrapper = Map::new();
    wrapper.insert(DATA_FIELD.to_string(), Value::Object(inner));
    Ok(Value::Object(wrapper))
}

/// Route a completed element: convert and release it if it matches the
/// target tag, otherwise hand it to its parent.
fn finish_element(
    element: Element,
    target_tag: &str,
    stack: &mut Vec<Element>,
    matches: &mut Vec<Value>,
) {
    let snake_tag = camel_to_snake(element.tag());
    if snake_tag == target_tag {
        let mut converted = element_to_map(&element);
        // A fully empty record converts to an empty mapping; skip it
        if let Some(value) = converted.remove(&snake_tag) {
            matches.push(value);
        }
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
    }
}

/// Extract attributes from a start tag as owned pairs.
///
/// Keys are namespace-stripped, matching what the DOM reader stores.
fn extract_attrs(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let name = str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr.unescape_value()?.to_string();
        attrs.push((name, value));
    }
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn stream(xml: &str, tag: &str) -> Value {
        parse_matching(xml.as_bytes(), tag).unwrap()
    }

    #[test]
    fn test_collects_matching_records() {
        let xml = "<listing>\
                     <device><deviceName>a</deviceName></device>\
                     <device><deviceName>b</deviceName></device>\
                   </listing>";
        assert_eq!(
            stream(xml, "device"),
            json!({
                "data": {
                    "device": [
                        { "device_name": "a" },
                        { "device_name": "b" }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_matches_on_normalized_tag() {
        let xml = "<listing><ownerOperator>x</ownerOperator></listing>";
        assert_eq!(
            stream(xml, "owner_operator"),
            json!({ "data": { "owner_operator": ["x"] } })
        );
    }

    #[test]
    fn test_no_matches_yields_empty_array() {
        let xml = "<listing><device>x</device></listing>";
        assert_eq!(
            stream(xml, "missing"),
            json!({ "data": { "missing": [] } })
        );
    }

    #[test]
    fn test_empty_matched_element_is_skipped() {
        let xml = "<listing><device/><device>x</device></listing>";
        assert_eq!(
            stream(xml, "device"),
            json!({ "data": { "device": ["x"] } })
        );
    }

    #[test]
    fn test_self_closing_with_attributes() {
        let xml = r#"<listing><device id="D1"/></listing>"#;
        assert_eq!(
            stream(xml, "device"),
            json!({ "data": { "device": [{ "attribs": { "id": "D1" } }] } })
        );
    }

    #[test]
    fn test_namespaced_tags_match() {
        let xml = r#"<x:listing xmlns:x="urn:x"><x:device>v</x:device></x:listing>"#;
        assert_eq!(
            stream(xml, "device"),
            json!({ "data": { "device": ["v"] } })
        );
    }

    #[test]
    fn test_namespaced_attributes_use_local_name() {
        let xml = r#"<l xmlns:m="urn:m"><device m:id="D1"/></l>"#;
        assert_eq!(
            stream(xml, "device"),
            json!({ "data": { "device": [{ "attribs": { "id": "D1" } }] } })
        );
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_matching("<a><b></a>".as_bytes(), "a").is_err());
    }

    #[test]
    fn test_truncated_document_is_an_error() {
        let xml = "<listing><device><deviceName>Pump</deviceName>";
        let err = parse_matching(xml.as_bytes(), "device").unwrap_err();

        assert!(err.to_string().contains("unclosed element <device>"));
    }

    #[test]
    fn test_truncated_root_is_an_error() {
        assert!(parse_matching("<listing>".as_bytes(), "device").is_err());
    }
}
