use super::Column;
use crate::Result;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::HashMap, fmt};

/// Analyzers a match-query column can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyzerKind {
    /// General purpose analyzer for names and short strings
    Oap,

    /// Analyzer for log content
    OapLog,
}

/// Backend configuration the analyzer generators read from.
///
/// Each value is a JSON analysis fragment, for example
/// `{"analyzer":{"oap_analyzer":{"type":"stop"}}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub oap_analyzer: String,
    pub oap_log_analyzer: String,
}

/// The `analysis` section of index settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerSetting {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub analyzer: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub tokenizer: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub filter: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub char_filter: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub normalizer: Map<String, Value>,
}

/// Produces the analysis fragment for one analyzer kind.
pub type Generator = fn(&AnalyzerConfig) -> Result<AnalyzerSetting>;

/// Table of analyzer kind to generator.
#[derive(Debug, Clone)]
pub struct AnalyzerRegistry {
    generators: HashMap<AnalyzerKind, Generator>,
}

impl AnalyzerKind {
    /// Name of the analyzer as referenced from field definitions.
    pub const fn name(self) -> &'static str {
        match self {
            AnalyzerKind::Oap => "oap_analyzer",
            AnalyzerKind::OapLog => "oap_log_analyzer",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            oap_analyzer: r#"{"analyzer":{"oap_analyzer":{"type":"stop"}}}"#.to_string(),
            oap_log_analyzer: r#"{"analyzer":{"oap_log_analyzer":{"type":"standard"}}}"#
                .to_string(),
        }
    }
}

impl AnalyzerSetting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an analysis fragment from its JSON form.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            crate::Error::invalid_schema(format!("invalid analyzer definition: {err}"))
        })
    }

    /// Merges `other` into `self`. Entries with the same name are replaced
    /// by the ones from `other`; nothing else is dropped.
    pub fn combine(&mut self, other: AnalyzerSetting) {
        self.analyzer.extend(other.analyzer);
        self.tokenizer.extend(other.tokenizer);
        self.filter.extend(other.filter);
        self.char_filter.extend(other.char_filter);
        self.normalizer.extend(other.normalizer);
    }

    pub fn is_empty(&self) -> bool {
        self.analyzer.is_empty()
            && self.tokenizer.is_empty()
            && self.filter.is_empty()
            && self.char_filter.is_empty()
            && self.normalizer.is_empty()
    }

    pub fn to_value(&self) -> Value {
        // Serializing string-keyed maps of JSON values cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Object(Map::new()))
    }
}

impl AnalyzerRegistry {
    /// A registry without any generator.
    pub fn empty() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    pub fn register(&mut self, kind: AnalyzerKind, generator: Generator) -> &mut Self {
        self.generators.insert(kind, generator);
        self
    }

    pub fn get(&self, kind: AnalyzerKind) -> Result<Generator> {
        self.generators.get(&kind).copied().ok_or_else(|| {
            crate::Error::invalid_schema(format!("no generator registered for analyzer `{kind}`"))
        })
    }

    /// Builds the combined analysis section for every match-query column.
    pub fn generate(&self, columns: &[Column], config: &AnalyzerConfig) -> Result<AnalyzerSetting> {
        let mut setting = AnalyzerSetting::new();

        for column in columns {
            let Some(kind) = column.match_query else {
                continue;
            };

            let generate = self.get(kind)?;
            setting.combine(generate(config)?);
        }

        Ok(setting)
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(AnalyzerKind::Oap, |config| {
                AnalyzerSetting::parse(&config.oap_analyzer)
            })
            .register(AnalyzerKind::OapLog, |config| {
                AnalyzerSetting::parse(&config.oap_log_analyzer)
            });
        registry
    }
}
