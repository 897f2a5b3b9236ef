//! XML document model for Trading requests and responses
//!
//! Requests are described as JSON objects and serialized with these rules:
//! - nested objects become nested elements
//! - arrays repeat the element once per item
//! - `_attributes` holds element attributes, `_value` the element text
//! - scalars are rendered as text (booleans as `true`/`false`), `null` as an empty element
//!
//! Responses are parsed into an [`XmlElement`] tree. Namespace declarations are dropped
//! and element names are stored without prefixes.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::{EbayError, Result};

/// Key holding element attributes in request data
pub const ATTRIBUTES_KEY: &str = "_attributes";

/// Key holding element text in request data
pub const VALUE_KEY: &str = "_value";

/// One element of a parsed XML document
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA content, trimmed
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a complete document and return its root element
    pub fn parse(xml: &str) -> Result<Self> {
        let invalid = |message: String| EbayError::InvalidXml { message, raw_body: xml.to_string() };

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(open_element(&start).map_err(invalid)?),
                Ok(Event::Empty(start)) => {
                    let element = open_element(&start).map_err(invalid)?;
                    close_element(&mut stack, &mut root, element).map_err(invalid)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or_else(|| invalid("unexpected closing tag".to_string()))?;
                    close_element(&mut stack, &mut root, element).map_err(invalid)?;
                }
                Ok(Event::Text(text)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = text.unescape().map_err(|e| invalid(e.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(invalid(e.to_string())),
            }
        }

        if !stack.is_empty() {
            return Err(invalid("unexpected end of document".to_string()));
        }
        root.ok_or_else(|| invalid("document has no root element".to_string()))
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every direct child with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Descend through `/`-separated child names, e.g. `"ShippingAddress/PostalCode"`
    pub fn path(&self, path: &str) -> Option<&XmlElement> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |element, segment| element.child(segment))
    }

    /// Text of the element at `path`
    pub fn path_text(&self, path: &str) -> Option<&str> {
        self.path(path).map(|e| e.text.as_str())
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|e| e.text.as_str())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// JSON rendering of this element.
    ///
    /// Leaf elements without attributes become strings. Otherwise an object with
    /// attributes under `@attributes`, text under `_value`, and one key per child
    /// name (repeated children collapse into an array).
    pub fn to_json(&self) -> Value {
        if self.children.is_empty() && self.attributes.is_empty() {
            return Value::String(self.text.clone());
        }

        let mut object = Map::new();
        if !self.attributes.is_empty() {
            let attributes = self
                .attributes
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect();
            object.insert("@attributes".to_string(), Value::Object(attributes));
        }
        if !self.text.is_empty() {
            object.insert(VALUE_KEY.to_string(), Value::String(self.text.clone()));
        }

        for child in &self.children {
            let value = child.to_json();
            match object.entry(child.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                // Child values are never arrays, so an array here means a repeat
                Entry::Occupied(mut slot) => match slot.get_mut() {
                    Value::Array(items) => items.push(value),
                    existing => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                },
            }
        }

        Value::Object(object)
    }
}

fn open_element(start: &BytesStart<'_>) -> std::result::Result<XmlElement, String> {
    let mut element = XmlElement {
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        ..Default::default()
    };

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(|e| e.to_string())?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn close_element(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err("multiple root elements".to_string()),
    }
    Ok(())
}

/// Serialize `fields` as a complete document with root element `root_name`
pub fn build_document(root_name: &str, fields: &Map<String, Value>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    write_element(&mut writer, root_name, &Value::Object(fields.clone()))?;

    String::from_utf8(writer.into_inner()).map_err(write_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        Value::Null => {
            writer.write_event(Event::Empty(BytesStart::new(name))).map_err(write_error)?;
        }
        Value::Object(fields) => {
            let mut start = BytesStart::new(name);
            if let Some(Value::Object(attributes)) = fields.get(ATTRIBUTES_KEY) {
                for (key, value) in attributes {
                    start.push_attribute((key.as_str(), scalar_text(value).as_str()));
                }
            }

            let text = fields.get(VALUE_KEY).map(scalar_text);
            let children: Vec<_> = fields
                .iter()
                .filter(|(key, _)| key.as_str() != ATTRIBUTES_KEY && key.as_str() != VALUE_KEY)
                .collect();

            if text.is_none() && children.is_empty() {
                writer.write_event(Event::Empty(start)).map_err(write_error)?;
                return Ok(());
            }

            writer.write_event(Event::Start(start)).map_err(write_error)?;
            if let Some(text) = text {
                writer.write_event(Event::Text(BytesText::new(&text))).map_err(write_error)?;
            }
            for (key, child) in children {
                write_element(writer, key, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name))).map_err(write_error)?;
        }
        scalar => {
            let text = scalar_text(scalar);
            writer.write_event(Event::Start(BytesStart::new(name))).map_err(write_error)?;
            writer.write_event(Event::Text(BytesText::new(&text))).map_err(write_error)?;
            writer.write_event(Event::End(BytesEnd::new(name))).map_err(write_error)?;
        }
    }
    Ok(())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn write_error<E: std::fmt::Display>(err: E) -> EbayError {
    EbayError::request_failed(format!("Failed to build XML request: {}", err))
}
