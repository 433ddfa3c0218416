//! FHIR Bundle model

use crate::library::Library;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR Bundle resource
///
/// A container for a collection of resources. Entry payloads stay untyped
/// so a bundle can carry any resource; typed views are extracted on
/// demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Indicates the purpose of this bundle - how it was intended to be used
    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    /// Entry in the bundle - will have a resource or information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<BundleEntry>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

/// Type of Bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    Document,
    Message,
    Transaction,
    #[serde(rename = "transaction-response")]
    TransactionResponse,
    Batch,
    #[serde(rename = "batch-response")]
    BatchResponse,
    History,
    Searchset,
    Collection,
}

/// Entry in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Full URL for the entry (relative to the base URL, or absolute)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// A resource in this bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    /// Transaction/batch request details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Value>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

impl Bundle {
    /// Create a new Bundle with minimal required fields
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            resource_type: "Bundle".to_string(),
            id: None,
            bundle_type,
            entry: None,
            extensions: HashMap::new(),
        }
    }

    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Get the number of entries in the bundle
    pub fn entry_count(&self) -> usize {
        self.entry.as_ref().map(|e| e.len()).unwrap_or(0)
    }

    /// Get entries as a slice
    pub fn entries(&self) -> &[BundleEntry] {
        self.entry.as_deref().unwrap_or(&[])
    }

    /// Add an entry to the bundle
    pub fn add_entry(&mut self, entry: BundleEntry) {
        self.entry.get_or_insert_with(Vec::new).push(entry);
    }

    /// Iterate over the entry resources, skipping entries without one.
    pub fn resources(&self) -> impl Iterator<Item = &Value> {
        self.entries().iter().filter_map(|e| e.resource.as_ref())
    }

    /// Entry resources of the given type, in bundle order.
    pub fn resources_of_type<'a>(&'a self, resource_type: &'a str) -> impl Iterator<Item = &'a Value> {
        self.resources()
            .filter(move |r| r.get("resourceType").and_then(Value::as_str) == Some(resource_type))
    }

    /// Decode every Library entry, in bundle order.
    pub fn libraries(&self) -> Result<Vec<Library>, serde_json::Error> {
        self.resources_of_type("Library").map(Library::from_value).collect()
    }
}
