//! FHIR resource encoding and strict parsing.
//!
//! Resources are encoded to pretty-printed JSON or to XML following the
//! official HL7 JSON/XML mapping rules. Parsing is strict by default: the
//! payload must be a syntactically valid document whose root object
//! carries the expected `resourceType`. [`parse_lenient`] enforces syntax
//! only and is meant for validation flows that report shape problems
//! themselves.

mod xml;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Wire formats a resource can be encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    /// File extension used for artifacts in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected a JSON object for the resource")]
    ExpectedObject,
    #[error("missing resourceType property")]
    MissingResourceType,
    #[error("expected a {expected} resource but found {actual}")]
    UnexpectedResourceType { expected: String, actual: String },
    #[error("failed to decode {resource_type}: {source}")]
    Deserialize {
        resource_type: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),
}

/// Encode a resource in the given format.
pub fn encode<T: Serialize>(resource: &T, format: Format) -> Result<String, FormatError> {
    encode_value(&serde_json::to_value(resource)?, format)
}

/// Encode an untyped resource in the given format.
pub fn encode_value(resource: &Value, format: Format) -> Result<String, FormatError> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(resource)?),
        Format::Xml => xml::value_to_xml(resource),
    }
}

/// Parse a document enforcing syntax only.
pub fn parse_lenient(format: Format, input: &str) -> Result<Value, FormatError> {
    match format {
        Format::Json => Ok(serde_json::from_str(input)?),
        Format::Xml => xml::xml_to_value(input),
    }
}

/// Parse a document strictly: the root must be an object whose
/// `resourceType` matches `expected_type`.
pub fn parse(format: Format, input: &str, expected_type: &str) -> Result<Value, FormatError> {
    let value = parse_lenient(format, input)?;
    let obj = value.as_object().ok_or(FormatError::ExpectedObject)?;
    let actual = obj
        .get("resourceType")
        .and_then(Value::as_str)
        .ok_or(FormatError::MissingResourceType)?;
    if actual != expected_type {
        return Err(FormatError::UnexpectedResourceType {
            expected: expected_type.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(value)
}

/// Strictly parse and decode a document into a typed resource.
pub fn decode<T: DeserializeOwned>(
    format: Format,
    input: &str,
    expected_type: &str,
) -> Result<T, FormatError> {
    let value = parse(format, input, expected_type)?;
    serde_json::from_value(value).map_err(|source| FormatError::Deserialize {
        resource_type: expected_type.to_string(),
        source,
    })
}
