//! FHIR XML mapping
//!
//! Schema-agnostic implementation of the official JSON/XML mapping rules:
//! the root element is named by `resourceType`, primitives become `value`
//! attributes, arrays become repeated elements, and primitive metadata
//! travels in `_field` properties index-aligned with their value arrays.
//! XHTML subtrees are carried through verbatim when reading.

use crate::FormatError;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use roxmltree::{Document, Node};
use serde_json::map::Entry;
use serde_json::{Map, Value};
use std::io::Cursor;

const FHIR_NS: &str = "http://hl7.org/fhir";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

pub(crate) fn value_to_xml(resource: &Value) -> Result<String, FormatError> {
    let obj = resource.as_object().ok_or(FormatError::ExpectedObject)?;
    let resource_type = obj
        .get("resourceType")
        .and_then(Value::as_str)
        .ok_or(FormatError::MissingResourceType)?;

    let mut encoder = XmlEncoder::new();
    encoder.resource(resource_type, obj)?;
    encoder.into_string()
}

struct XmlEncoder {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlEncoder {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    fn into_string(self) -> Result<String, FormatError> {
        Ok(String::from_utf8(self.writer.into_inner().into_inner())?)
    }

    fn resource(
        &mut self,
        resource_type: &str,
        obj: &Map<String, Value>,
    ) -> Result<(), FormatError> {
        let mut root = BytesStart::new(resource_type);
        root.push_attribute(("xmlns", FHIR_NS));
        self.writer.write_event(Event::Start(root))?;
        self.properties(obj, &["resourceType"])?;
        self.writer
            .write_event(Event::End(BytesEnd::new(resource_type)))?;
        Ok(())
    }

    /// Write every property of `obj` except the named skips, pairing each
    /// value with its `_name` metadata sibling. Metadata without a value
    /// property still produces an element (extension-only primitives).
    fn properties(&mut self, obj: &Map<String, Value>, skip: &[&str]) -> Result<(), FormatError> {
        for (name, value) in obj {
            if skip.contains(&name.as_str()) || name.starts_with('_') {
                continue;
            }
            self.element(name, value, obj.get(&format!("_{name}")))?;
        }
        for (name, meta) in obj {
            let Some(base) = name.strip_prefix('_') else {
                continue;
            };
            if !obj.contains_key(base) {
                self.element(base, &Value::Null, Some(meta))?;
            }
        }
        Ok(())
    }

    fn element(
        &mut self,
        name: &str,
        value: &Value,
        meta: Option<&Value>,
    ) -> Result<(), FormatError> {
        match value {
            Value::Array(items) => {
                let metas = meta.and_then(Value::as_array);
                for (idx, item) in items.iter().enumerate() {
                    self.element(name, item, metas.and_then(|m| m.get(idx)))?;
                }
            }
            Value::Object(obj) => self.complex(name, obj)?,
            Value::Null if meta.is_none() => {}
            primitive => self.primitive(name, primitive, meta)?,
        }
        Ok(())
    }

    fn complex(&mut self, name: &str, obj: &Map<String, Value>) -> Result<(), FormatError> {
        let mut start = BytesStart::new(name);
        // Element ids become attributes below the resource root.
        if let Some(Value::String(id)) = obj.get("id") {
            start.push_attribute(("id", id.as_str()));
        }
        self.writer.write_event(Event::Start(start))?;
        self.properties(obj, &["id"])?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn primitive(
        &mut self,
        name: &str,
        value: &Value,
        meta: Option<&Value>,
    ) -> Result<(), FormatError> {
        let mut elem = BytesStart::new(name);
        let has_value = !value.is_null();
        if has_value {
            elem.push_attribute(("value", primitive_text(value).as_str()));
        }

        let meta_obj = meta.and_then(Value::as_object);
        if let Some(Value::String(id)) = meta_obj.and_then(|m| m.get("id")) {
            elem.push_attribute(("id", id.as_str()));
        }

        match meta_obj.and_then(|m| m.get("extension")) {
            Some(extension) => {
                self.writer.write_event(Event::Start(elem))?;
                self.element("extension", extension, None)?;
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            None if has_value => self.writer.write_event(Event::Empty(elem))?,
            None => {}
        }
        Ok(())
    }
}

fn primitive_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

pub(crate) fn xml_to_value(input: &str) -> Result<Value, FormatError> {
    let doc = Document::parse(input)?;
    let root = doc.root_element();

    let mut obj = Map::new();
    obj.insert(
        "resourceType".to_string(),
        Value::String(root.tag_name().name().to_string()),
    );
    for child in root.children().filter(Node::is_element) {
        read_property(input, &mut obj, &child)?;
    }
    Ok(Value::Object(obj))
}

fn read_property(
    source: &str,
    target: &mut Map<String, Value>,
    node: &Node,
) -> Result<(), FormatError> {
    let name = node.tag_name().name().to_string();
    let (value, meta) = read_element(source, node)?;
    append_property(target, &name, value, meta);
    Ok(())
}

fn read_element(source: &str, node: &Node) -> Result<(Value, Option<Value>), FormatError> {
    if node.tag_name().namespace() == Some(XHTML_NS) {
        let snippet = &source[node.range()];
        return Ok((Value::String(snippet.to_string()), None));
    }

    if let Some(text) = node.attribute("value") {
        let mut meta = Map::new();
        if let Some(id) = node.attribute("id") {
            meta.insert("id".to_string(), Value::String(id.to_string()));
        }
        let mut extensions = Vec::new();
        for child in node.children().filter(Node::is_element) {
            if child.tag_name().name() == "extension" {
                let (ext, _) = read_element(source, &child)?;
                extensions.push(ext);
            }
        }
        if !extensions.is_empty() {
            meta.insert("extension".to_string(), Value::Array(extensions));
        }
        let meta = (!meta.is_empty()).then(|| Value::Object(meta));
        return Ok((primitive_value(text), meta));
    }

    let mut obj = Map::new();
    if let Some(id) = node.attribute("id") {
        obj.insert("id".to_string(), Value::String(id.to_string()));
    }
    for child in node.children().filter(Node::is_element) {
        read_property(source, &mut obj, &child)?;
    }
    Ok((Value::Object(obj), None))
}

/// Append a decoded property, collapsing repeated element names into
/// arrays and keeping the `_name` metadata array aligned by index.
fn append_property(map: &mut Map<String, Value>, name: &str, value: Value, meta: Option<Value>) {
    match map.entry(name.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Array(items) => items.push(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        },
    }

    let meta_key = format!("_{name}");
    if meta.is_none() && !map.contains_key(&meta_key) {
        return;
    }

    let repeated = matches!(map.get(name), Some(Value::Array(_)));
    let value_count = match map.get(name) {
        Some(Value::Array(items)) => items.len(),
        Some(_) => 1,
        None => 0,
    };

    match map.entry(meta_key) {
        Entry::Vacant(slot) => {
            let Some(meta) = meta else { return };
            if repeated {
                let mut aligned = vec![Value::Null; value_count - 1];
                aligned.push(meta);
                slot.insert(Value::Array(aligned));
            } else {
                slot.insert(meta);
            }
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Array(aligned) => {
                if aligned.len() + 1 < value_count {
                    aligned.resize(value_count - 1, Value::Null);
                }
                aligned.push(meta.unwrap_or(Value::Null));
            }
            existing => {
                if repeated {
                    let first = existing.take();
                    let mut aligned = vec![first];
                    aligned.resize(value_count - 1, Value::Null);
                    aligned.push(meta.unwrap_or(Value::Null));
                    *existing = Value::Array(aligned);
                } else if let Some(meta) = meta {
                    *existing = meta;
                }
            }
        },
    }
}

fn primitive_value(input: &str) -> Value {
    match input {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(int) = input.parse::<i64>() {
                Value::Number(int.into())
            } else {
                Value::String(input.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_measure_to_xml() {
        let measure = json!({
            "resourceType": "Measure",
            "id": "measure-1",
            "url": "https://example.org/fhir/Measure/ExportTest",
            "experimental": true,
            "group": [{
                "id": "group-1",
                "population": [{
                    "criteria": {
                        "language": "text/cql.identifier",
                        "expression": "Initial Population"
                    }
                }]
            }]
        });

        let xml = value_to_xml(&measure).unwrap();
        assert!(xml.starts_with("<Measure xmlns=\"http://hl7.org/fhir\">"));
        assert!(xml.contains(r#"<id value="measure-1"/>"#));
        assert!(xml.contains(r#"<experimental value="true"/>"#));
        assert!(xml.contains(r#"<group id="group-1">"#));
        assert!(xml.contains(r#"<expression value="Initial Population"/>"#));
    }

    #[test]
    fn test_xml_to_value_collapses_repeats() {
        let xml = r#"
        <Bundle xmlns="http://hl7.org/fhir">
            <id value="b1"/>
            <type value="transaction"/>
            <entry>
                <resource>
                    <Library xmlns="http://hl7.org/fhir">
                        <name value="ExportTest"/>
                    </Library>
                </resource>
            </entry>
            <entry>
                <resource>
                    <Library xmlns="http://hl7.org/fhir">
                        <name value="FHIRHelpers"/>
                    </Library>
                </resource>
            </entry>
        </Bundle>
        "#;

        let value = xml_to_value(xml).unwrap();
        assert_eq!(value["resourceType"], "Bundle");
        assert_eq!(value["type"], "transaction");
        assert_eq!(value["entry"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_primitive_metadata_round_trip() {
        let resource = json!({
            "resourceType": "Measure",
            "version": "1.0.000",
            "_version": { "id": "v1" }
        });

        let xml = value_to_xml(&resource).unwrap();
        assert!(xml.contains(r#"value="1.0.000""#));
        assert!(xml.contains(r#"id="v1""#));

        let back = xml_to_value(&xml).unwrap();
        assert_eq!(back["version"], "1.0.000");
        assert_eq!(back["_version"]["id"], "v1");
    }

    #[test]
    fn test_extension_only_primitive() {
        let resource = json!({
            "resourceType": "Measure",
            "_title": {
                "extension": [{
                    "url": "http://hl7.org/fhir/StructureDefinition/data-absent-reason",
                    "valueCode": "unknown"
                }]
            }
        });

        let xml = value_to_xml(&resource).unwrap();
        assert!(xml.contains("<title>"));
        assert!(xml.contains(r#"<valueCode value="unknown"/>"#));
    }

    #[test]
    fn test_xhtml_carried_through_on_read() {
        let xml = r#"
        <Measure xmlns="http://hl7.org/fhir">
            <text>
                <status value="generated"/>
                <div xmlns="http://www.w3.org/1999/xhtml"><p>Example narrative</p></div>
            </text>
        </Measure>
        "#;

        let value = xml_to_value(xml).unwrap();
        let div = value["text"]["div"].as_str().unwrap();
        assert!(div.contains("<p>Example narrative</p>"));
    }

    #[test]
    fn test_boolean_and_integer_primitives() {
        let xml = r#"
        <Bundle xmlns="http://hl7.org/fhir">
            <type value="searchset"/>
            <total value="3"/>
        </Bundle>
        "#;

        let value = xml_to_value(xml).unwrap();
        assert_eq!(value["total"], 3);
    }
}
