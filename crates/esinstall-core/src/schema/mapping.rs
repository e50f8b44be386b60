use super::FieldType;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// The field layout of an index or template.
///
/// Used both for mappings computed from a model and for mappings fetched
/// from the backend. Field order follows insertion order so serialized
/// documents are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    /// Field name to field definition
    #[serde(default)]
    pub properties: IndexMap<String, FieldDef>,

    /// Source filtering
    #[serde(rename = "_source", default, skip_serializing_if = "Source::is_empty")]
    pub source: Source,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Fields indexed but left out of the stored document
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub excludes: IndexSet<String>,
}

/// A single field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Backend field type
    #[serde(rename = "type", default = "FieldDef::object_type")]
    pub ty: String,

    /// Field receiving a copy of this field's values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_to: Option<String>,

    /// Analyzer of a text field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,

    /// `Some(false)` when the field is stored but not searchable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<bool>,

    /// Attributes set outside of esinstall on live mappings
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Mappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.properties.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, field: FieldDef) -> &mut Self {
        self.properties.insert(name.into(), field);
        self
    }

    pub fn exclude(&mut self, name: impl Into<String>) -> &mut Self {
        self.source.excludes.insert(name.into());
        self
    }

    /// Returns `true` if every field of `other` is present here with a
    /// compatible type. Fields only present here are ignored.
    pub fn contains_all(&self, other: &Mappings) -> bool {
        other.properties.iter().all(|(name, field)| {
            self.properties
                .get(name)
                .is_some_and(|existing| existing.is_compatible(field))
        })
    }

    /// Fields defined here that `other` does not have, by name.
    pub fn missing_from(&self, other: &Mappings) -> Mappings {
        let properties = self
            .properties
            .iter()
            .filter(|(name, _)| !other.properties.contains_key(*name))
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect();

        Mappings {
            properties,
            source: Source::default(),
        }
    }
}

impl Source {
    pub fn is_empty(&self) -> bool {
        self.excludes.is_empty()
    }
}

impl FieldDef {
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            copy_to: None,
            analyzer: None,
            index: None,
            extra: serde_json::Map::new(),
        }
    }

    /// An analyzed text field.
    pub fn text(analyzer: impl Into<String>) -> Self {
        Self {
            analyzer: Some(analyzer.into()),
            ..Self::new(FieldType::Text.as_str())
        }
    }

    pub fn copy_to(mut self, field: impl Into<String>) -> Self {
        self.copy_to = Some(field.into());
        self
    }

    pub fn not_indexed(mut self) -> Self {
        self.index = Some(false);
        self
    }

    /// Two definitions are compatible when they have the same type. Other
    /// attributes cannot be changed on an existing field and are not compared.
    pub fn is_compatible(&self, other: &FieldDef) -> bool {
        self.ty == other.ty
    }

    fn object_type() -> String {
        "object".to_string()
    }
}

impl From<FieldType> for FieldDef {
    fn from(ty: FieldType) -> Self {
        FieldDef::new(ty.as_str())
    }
}
