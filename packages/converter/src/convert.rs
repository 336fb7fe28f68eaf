//! Tree-to-mapping conversion.
//!
//! The core of the converter: one [`Element`] becomes a mapping with at most
//! one top-level key (its snake-cased tag). Empty elements vanish, repeated
//! child tags collapse into ordered sequences, attributes land under
//! `attribs`, and text is either the whole value (leaf elements) or a `text`
//! field (mixed elements).

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::{ATTRIBS_FIELD, TEXT_FIELD};
use crate::element::Element;
use crate::naming::camel_to_snake;

/// Convert one element to its mapping form.
///
/// Returns an empty mapping when the element has no text, no attributes and
/// no children; such elements produce no key in their parent. Otherwise the
/// result holds a single key (the normalized tag) whose value is one of:
///
/// * `null` — element with nothing but whitespace text
/// * a string — leaf element with text only
/// * an object — any combination of children, attributes and text
///
/// Repeated child tags are grouped into arrays, preserving per-tag document
/// order. A fresh result is built per call; nothing is shared or mutated.
pub fn element_to_map(element: &Element) -> Map<String, Value> {
    let mut result = Map::new();

    // Whitespace-only text still counts as text here: the element is not
    // omitted, though its value stays null below.
    let has_text = element.text().is_some_and(|t| !t.is_empty());
    let has_attributes = !element.attributes().is_empty();
    let has_children = !element.children().is_empty();

    // Omit empty elements
    if !has_text && !has_attributes && !has_children {
        return result;
    }

    let snake_tag = camel_to_snake(element.tag());
    let mut value = if has_attributes {
        Value::Object(Map::new())
    } else {
        Value::Null
    };

    if has_children {
        // Stable multi-map keyed by normalized tag: values stay in the
        // order the children appeared, grouped per key.
        let mut groups: IndexMap<String, Vec<Value>> = IndexMap::new();
        for child in element.children() {
            for (key, child_value) in element_to_map(child) {
                groups.entry(key).or_default().push(child_value);
            }
        }
        let mut grouped = Map::new();
        for (key, mut values) in groups {
            let entry = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::Array(values)
            };
            grouped.insert(key, entry);
        }
        value = Value::Object(grouped);
    }

    if has_attributes {
        let attribs: Map<String, Value> = element
            .attributes()
            .iter()
            .map(|(name, val)| (name.clone(), Value::String(val.clone())))
            .collect();
        if let Value::Object(map) = &mut value {
            map.insert(ATTRIBS_FIELD.to_string(), Value::Object(attribs));
        }
    }

    if has_text {
        let stripped = element.text().unwrap_or_default().trim();
        if has_children || has_attributes {
            if !stripped.is_empty() {
                if let Value::Object(map) = &mut value {
                    map.insert(TEXT_FIELD.to_string(), Value::String(stripped.to_string()));
                }
            }
        } else if !stripped.is_empty() {
            value = Value::String(stripped.to_string());
        }
    }

    result.insert(snake_tag, value);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn convert(xml: &str) -> Value {
        let doc = roxmltree::Document::parse(xml).unwrap();
        Value::Object(element_to_map(&Element::from_node(doc.root_element())))
    }

    #[test]
    fn test_empty_element_is_omitted() {
        assert_eq!(convert("<device/>"), json!({}));
        assert_eq!(convert("<device></device>"), json!({}));
    }

    #[test]
    fn test_whitespace_only_text_keeps_element_null() {
        // Whitespace-only text keeps the element but leaves the value null
        assert_eq!(convert("<device>   </device>"), json!({ "device": null }));
    }

    #[test]
    fn test_leaf_text_becomes_scalar() {
        assert_eq!(
            convert("<deviceName> Infusion Pump </deviceName>"),
            json!({ "device_name": "Infusion Pump" })
        );
    }

    #[test]
    fn test_empty_children_are_dropped() {
        // The parent keeps its key, the empty child produces none
        assert_eq!(
            convert("<device><deviceName/></device>"),
            json!({ "device": {} })
        );
    }

    #[test]
    fn test_repeated_children_become_sequence() {
        assert_eq!(
            convert("<devices><name>a</name><name>b</name></devices>"),
            json!({ "devices": { "name": ["a", "b"] } })
        );
    }

    #[test]
    fn test_single_child_stays_scalar() {
        assert_eq!(
            convert("<device><name>a</name></device>"),
            json!({ "device": { "name": "a" } })
        );
    }

    #[test]
    fn test_grouping_preserves_per_tag_order() {
        let value = convert(
            "<l><item>1</item><other>x</other><item>2</item><item>3</item></l>",
        );
        assert_eq!(
            value,
            json!({ "l": { "item": ["1", "2", "3"], "other": "x" } })
        );
    }

    #[test]
    fn test_attributes_only() {
        assert_eq!(
            convert(r#"<device id="D1"/>"#),
            json!({ "device": { "attribs": { "id": "D1" } } })
        );
    }

    #[test]
    fn test_attribute_names_are_not_normalized() {
        assert_eq!(
            convert(r#"<device deviceId="D1"/>"#),
            json!({ "device": { "attribs": { "deviceId": "D1" } } })
        );
    }

    #[test]
    fn test_text_with_attributes_goes_under_text_key() {
        assert_eq!(
            convert(r#"<device id="D1">Pump</device>"#),
            json!({ "device": { "attribs": { "id": "D1" }, "text": "Pump" } })
        );
    }

    #[test]
    fn test_whitespace_text_with_attributes_adds_no_text_key() {
        assert_eq!(
            convert(r#"<device id="D1">  </device>"#),
            json!({ "device": { "attribs": { "id": "D1" } } })
        );
    }

    #[test]
    fn test_children_override_attribute_seed_then_merge() {
        // The grouped child map replaces the attribute-seeded empty map,
        // then attribs is merged into it.
        assert_eq!(
            convert(r#"<device id="D1"><name>Pump</name></device>"#),
            json!({ "device": { "name": "Pump", "attribs": { "id": "D1" } } })
        );
    }

    #[test]
    fn test_text_with_children() {
        assert_eq!(
            convert("<device>lead<name>Pump</name></device>"),
            json!({ "device": { "name": "Pump", "text": "lead" } })
        );
    }

    #[test]
    fn test_tags_are_snake_cased() {
        assert_eq!(
            convert("<registrationListing><ownerOperator>x</ownerOperator></registrationListing>"),
            json!({ "registration_listing": { "owner_operator": "x" } })
        );
    }

    #[test]
    fn test_nested_structure() {
        let value = convert(
            "<device>\
               <fdaProductCode>\
                 <productCode>FRN</productCode>\
                 <productName>Pump, Infusion</productName>\
               </fdaProductCode>\
             </device>",
        );
        assert_eq!(
            value,
            json!({
                "device": {
                    "fda_product_code": {
                        "product_code": "FRN",
                        "product_name": "Pump, Infusion"
                    }
                }
            })
        );
    }
}
