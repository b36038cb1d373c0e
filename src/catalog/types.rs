//! Type definitions for the catalog module.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single endpoint descriptor from the API reference document.
///
/// Records are immutable once loaded. Identity is the `(method, path)` pair,
/// but a catalog may repeat a pair; lookups resolve to the first occurrence.
///
/// Every field is optional in the source document. Missing and `null`
/// values both become an empty string or empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    /// Human-readable endpoint name (e.g. "Get Emergency Contact")
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Grouping used by the search filter (e.g. "Gateway")
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    /// HTTP verb as written in the reference; matched case-insensitively
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,

    /// URL path template, appended to the tenant base URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Parameter descriptors, kept opaque
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<Value>,

    /// Fully-qualified link to the endpoint's reference page
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl EndpointRecord {
    /// True when this record answers to `method` + `path`.
    ///
    /// Path is compared exactly; method ignores ASCII case.
    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.path == path && self.method.eq_ignore_ascii_case(method)
    }
}

/// Ordered, read-only collection of endpoint records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "null_as_default")]
    endpoints: Vec<EndpointRecord>,
}

impl Catalog {
    pub fn new(endpoints: Vec<EndpointRecord>) -> Self {
        Self { endpoints }
    }

    /// Records in document order.
    pub fn endpoints(&self) -> &[EndpointRecord] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
