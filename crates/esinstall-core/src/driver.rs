use crate::{
    async_trait,
    schema::{IndexSettings, Mappings},
    Result,
};

use std::fmt::Debug;

/// A physical index as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    pub mappings: Mappings,
    pub settings: IndexSettings,
}

/// An index template as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexTemplate {
    pub settings: IndexSettings,
    pub mappings: Mappings,

    /// Precedence among templates matching the same index name
    pub order: i32,
}

/// Schema operations of a search-engine backend.
///
/// Mutating calls return whether the backend acknowledged the change.
/// Transport failures are returned as errors.
#[async_trait]
pub trait Client: Debug + Send + Sync + 'static {
    async fn index_exists(&self, name: &str) -> Result<bool>;

    async fn get_index(&self, name: &str) -> Result<Option<Index>>;

    async fn template_exists(&self, name: &str) -> Result<bool>;

    async fn get_template(&self, name: &str) -> Result<Option<IndexTemplate>>;

    /// Creates an index with an explicit mapping and settings.
    async fn create_index(
        &self,
        name: &str,
        mappings: &Mappings,
        settings: &IndexSettings,
    ) -> Result<bool>;

    /// Creates an index whose mapping and settings come from the matching
    /// template.
    async fn create_bare_index(&self, name: &str) -> Result<bool>;

    /// Adds the fields of `append` to an existing index.
    async fn update_index_mapping(&self, name: &str, append: &Mappings) -> Result<bool>;

    async fn create_or_update_template(
        &self,
        name: &str,
        settings: &IndexSettings,
        mappings: &Mappings,
        order: i32,
    ) -> Result<bool>;
}
