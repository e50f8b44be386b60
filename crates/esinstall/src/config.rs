use esinstall_core::{schema::AnalyzerConfig, Error, Result};

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Configuration of the search-engine storage
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix of every physical table name, empty for none
    pub namespace: String,

    /// Shards of a regular index
    pub index_shards_number: u32,

    /// Replicas of a regular index
    pub index_replicas_number: u32,

    /// Shard multiplier applied to super dataset indices
    pub super_dataset_index_shards_factor: u32,

    /// Replicas of a super dataset index
    pub super_dataset_index_replicas_number: u32,

    /// Bulk flush interval, in seconds
    pub flush_interval: u32,

    /// Order of the index templates created for time-series models
    pub index_template_order: i32,

    /// JSON object of index settings overriding the computed ones
    pub advanced: String,

    /// Analysis fragment of the `oap_analyzer` analyzer
    pub oap_analyzer: String,

    /// Analysis fragment of the `oap_log_analyzer` analyzer
    pub oap_log_analyzer: String,

    /// Give every metric its own physical table instead of sharing one
    pub logic_sharding: bool,

    /// Days covered by one rolling index
    pub day_step: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let analyzers = AnalyzerConfig::default();

        Self {
            namespace: String::new(),
            index_shards_number: 1,
            index_replicas_number: 1,
            super_dataset_index_shards_factor: 5,
            super_dataset_index_replicas_number: 0,
            flush_interval: 5,
            index_template_order: 0,
            advanced: String::new(),
            oap_analyzer: analyzers.oap_analyzer,
            oap_log_analyzer: analyzers.oap_log_analyzer,
            logic_sharding: false,
            day_step: 1,
        }
    }
}

impl StorageConfig {
    /// Create a new StorageConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys keep their default.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml)
            .map_err(|err| Error::invalid_configuration(format!("invalid storage config: {err}")))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::invalid_configuration(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn index_shards_number(mut self, shards: u32) -> Self {
        self.index_shards_number = shards;
        self
    }

    pub fn index_replicas_number(mut self, replicas: u32) -> Self {
        self.index_replicas_number = replicas;
        self
    }

    pub fn super_dataset_index_shards_factor(mut self, factor: u32) -> Self {
        self.super_dataset_index_shards_factor = factor;
        self
    }

    pub fn super_dataset_index_replicas_number(mut self, replicas: u32) -> Self {
        self.super_dataset_index_replicas_number = replicas;
        self
    }

    pub fn flush_interval(mut self, seconds: u32) -> Self {
        self.flush_interval = seconds;
        self
    }

    pub fn index_template_order(mut self, order: i32) -> Self {
        self.index_template_order = order;
        self
    }

    pub fn advanced(mut self, advanced: impl Into<String>) -> Self {
        self.advanced = advanced.into();
        self
    }

    pub fn logic_sharding(mut self, logic_sharding: bool) -> Self {
        self.logic_sharding = logic_sharding;
        self
    }

    pub fn day_step(mut self, days: u32) -> Self {
        self.day_step = days;
        self
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            oap_analyzer: self.oap_analyzer.clone(),
            oap_log_analyzer: self.oap_log_analyzer.clone(),
        }
    }

    /// The advanced settings as a JSON object; empty when not configured.
    pub fn advanced_settings(&self) -> Result<Map<String, Value>> {
        if self.advanced.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&self.advanced) {
            Ok(Value::Object(settings)) => Ok(settings),
            Ok(_) => Err(Error::invalid_configuration(
                "advanced settings must be a JSON object",
            )),
            Err(err) => Err(Error::invalid_configuration(format!(
                "advanced settings are not valid JSON: {err}"
            ))),
        }
    }
}
