//! FHIR Library resource model

use crate::datatypes::{Attachment, Meta};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR Library resource.
///
/// A logic library holding CQL (and translations of it) as attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    /// Resource type - always "Library"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Computable name, shared with the CQL library it holds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The library content: one attachment per representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Attachment>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Library".to_string()
}

impl Library {
    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    /// Find the first attachment with the given content type.
    pub fn attachment(&self, content_type: &str) -> Option<&Attachment> {
        self.content
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|a| a.content_type.as_deref() == Some(content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn library_json() -> Value {
        json!({
            "resourceType": "Library",
            "id": "lib-1",
            "name": "ExportTest",
            "version": "1.0.000",
            "status": "active",
            "type": {
                "coding": [{
                    "system": "http://terminology.hl7.org/CodeSystem/library-type",
                    "code": "logic-library"
                }]
            },
            "content": [
                { "contentType": "text/cql", "data": "bGlicmFyeSBFeHBvcnRUZXN0" },
                { "contentType": "application/elm+json", "data": "e30=" }
            ]
        })
    }

    #[test]
    fn test_attachment_lookup() {
        let library = Library::from_value(&library_json()).unwrap();
        let cql = library.attachment("text/cql").unwrap();
        assert_eq!(cql.data.as_deref(), Some("bGlicmFyeSBFeHBvcnRUZXN0"));
        assert!(library.attachment("text/plain").is_none());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let library = Library::from_value(&library_json()).unwrap();
        assert!(library.extensions.contains_key("type"));

        let value = serde_json::to_value(&library).unwrap();
        assert_eq!(value["type"]["coding"][0]["code"], "logic-library");
    }

    #[test]
    fn test_library_without_content() {
        let library = Library::from_value(&json!({
            "resourceType": "Library",
            "name": "NoContent"
        }))
        .unwrap();
        assert!(library.attachment("text/cql").is_none());
    }
}
