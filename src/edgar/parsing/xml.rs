use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

use super::super::error::ExtractError;

const XML_BEGIN: &str = "<XML>";
const XML_END: &str = "</XML>";

/// Isolate one embedded XML payload from a raw filing. The outer text is
/// not well-formed markup, so payloads are found by plain text search:
/// split on the opening marker, take the payload at `index` (1 is the
/// submission metadata, 2 the information table), truncate at the closing
/// marker.
pub fn extract_xml_payload(raw: &str, index: usize) -> Result<&str, ExtractError> {
    let after = raw
        .split(XML_BEGIN)
        .nth(index)
        .ok_or_else(|| ExtractError::Parse(format!("filing has no embedded payload #{}", index)))?;
    let payload = after.split(XML_END).next().unwrap_or(after);
    Ok(payload.trim())
}

/// Parse a tagged payload into a nested value tree: an element becomes an
/// object keyed by child name, repeated child names collect into an array,
/// a text-only element becomes a string, an empty element becomes null,
/// and attributes appear as `@name` keys. Element names keep their raw
/// namespace prefix; run the tree through `strip_namespaces` afterwards.
pub fn parse_xml_value(xml: &str) -> Result<Value, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    struct Element {
        name: String,
        fields: Map<String, Value>,
        text: String,
    }

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event().map_err(parse_err)? {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ExtractError::Parse("multiple root elements".to_string()));
                }
                let mut fields = Map::new();
                for attr in start.attributes() {
                    let attr = attr.map_err(parse_err)?;
                    let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
                    let value = attr.unescape_value().map_err(parse_err)?.into_owned();
                    fields.insert(key, Value::String(value));
                }
                stack.push(Element {
                    name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
                    fields,
                    text: String::new(),
                });
            }
            Event::Empty(start) => {
                let mut fields = Map::new();
                for attr in start.attributes() {
                    let attr = attr.map_err(parse_err)?;
                    let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
                    let value = attr.unescape_value().map_err(parse_err)?.into_owned();
                    fields.insert(key, Value::String(value));
                }
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let value = if fields.is_empty() {
                    Value::Null
                } else {
                    Value::Object(fields)
                };
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.fields, name, value),
                    None => {
                        if root.is_some() {
                            return Err(ExtractError::Parse("multiple root elements".to_string()));
                        }
                        root = Some((name, value));
                    }
                }
            }
            Event::Text(text) => {
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&text.unescape().map_err(parse_err)?);
                }
            }
            Event::CData(cdata) => {
                if let Some(element) = stack.last_mut() {
                    element
                        .text
                        .push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ExtractError::Parse("unbalanced closing tag".to_string()))?;
                let value = finish_element(element.fields, element.text);
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.fields, element.name, value),
                    None => root = Some((element.name, value)),
                }
            }
            Event::Eof => break,
            // prolog, comments, doctype, processing instructions
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ExtractError::Parse("unexpected end of payload".to_string()));
    }
    let (name, value) =
        root.ok_or_else(|| ExtractError::Parse("payload has no root element".to_string()))?;

    let mut wrapper = Map::new();
    wrapper.insert(name, value);
    Ok(Value::Object(wrapper))
}

fn parse_err(e: impl std::fmt::Display) -> ExtractError {
    ExtractError::Parse(e.to_string())
}

fn finish_element(fields: Map<String, Value>, text: String) -> Value {
    if fields.is_empty() {
        if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        }
    } else {
        let mut fields = fields;
        if !text.is_empty() {
            fields.insert("#text".to_string(), Value::String(text));
        }
        Value::Object(fields)
    }
}

// A repeated child name turns the slot into an array.
fn insert_child(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.remove(&name) {
        None => {
            fields.insert(name, value);
        }
        Some(Value::Array(mut items)) => {
            items.push(value);
            fields.insert(name, Value::Array(items));
        }
        Some(existing) => {
            fields.insert(name, Value::Array(vec![existing, value]));
        }
    }
}

/// Drop the namespace prefix from every key at every nesting level:
/// `ns1:cusip` becomes `cusip`. Arrays are stripped element-wise and
/// scalars pass through unchanged.
pub fn strip_namespaces(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, child)| (strip_prefix(&key).to_string(), strip_namespaces(child)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_namespaces).collect()),
        scalar => scalar,
    }
}

fn strip_prefix(key: &str) -> &str {
    key.rsplit(':').next().unwrap_or(key)
}
