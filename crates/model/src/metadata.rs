use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A free-form bag of extra fields carried alongside an entity, the way the
/// relational schema stores it as a single JSON column. Typed getters pull
/// out the few keys the pipeline actually reads (`transportType`,
/// `baseFare`, `type`) without forcing every producer to agree on a fixed
/// struct shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(pub HashMap<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn transport_type(&self) -> Option<&str> {
        self.get_str("transportType")
    }

    pub fn base_fare(&self) -> Option<f64> {
        self.get_f64("baseFare")
    }

    pub fn is_ferry_terminal(&self) -> bool {
        self.get_str("type") == Some("ferry_terminal")
    }
}

impl From<HashMap<String, Value>> for Metadata {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}
