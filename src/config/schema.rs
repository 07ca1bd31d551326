//! Data schema structures

use serde::Deserialize;
use serde_json::{Map, Value};

/// Data schema in JSON-Schema style. Only the keys of `properties` matter
/// for validation; the descriptors are kept as given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Schema {
    /// Declared field names, in schema order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}
