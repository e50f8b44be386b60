use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Settings document applied when an index or template is created.
///
/// Settings are only ever written whole at creation time, never diffed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexSettings {
    entries: Map<String, Value>,
}

impl IndexSettings {
    pub const NUMBER_OF_SHARDS: &'static str = "index.number_of_shards";
    pub const NUMBER_OF_REPLICAS: &'static str = "index.number_of_replicas";
    pub const REFRESH_INTERVAL: &'static str = "index.refresh_interval";
    pub const ANALYSIS: &'static str = "analysis";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Merges `overrides` at the top level; keys already present are replaced.
    pub fn extend(&mut self, overrides: Map<String, Value>) -> &mut Self {
        self.entries.extend(overrides);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn number_of_shards(&self) -> Option<u64> {
        self.get(Self::NUMBER_OF_SHARDS).and_then(Value::as_u64)
    }

    pub fn number_of_replicas(&self) -> Option<u64> {
        self.get(Self::NUMBER_OF_REPLICAS).and_then(Value::as_u64)
    }

    pub fn refresh_interval(&self) -> Option<&str> {
        self.get(Self::REFRESH_INTERVAL).and_then(Value::as_str)
    }

    pub fn analysis(&self) -> Option<&Value> {
        self.get(Self::ANALYSIS)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
