use super::AnalyzerKind;

/// A logical entity persisted in the backend.
///
/// Models are supplied by the storage-model registry and are immutable for
/// the duration of a reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Logical name of the model
    pub name: String,

    /// The model's columns, in declaration order
    pub columns: Vec<Column>,

    /// True when the model is stored in rolling indices created from a
    /// template, false for a single static index.
    pub time_series: bool,

    /// True when the model holds a large volume of rows and gets the
    /// super dataset shard and replica counts.
    pub super_dataset: bool,

    /// What kind of stream produces the model's rows
    pub stream: StreamKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Aggregated metrics; may share a physical table with other metrics.
    Metrics,

    /// Raw records such as traces and logs.
    Record,

    /// Management data (UI templates, configuration).
    Management,
}

/// A typed column of a [`Model`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Name of the field in the backend
    pub name: String,

    /// Logical type of the column
    pub ty: ColumnType,

    /// Element type when `ty` is a [`ColumnType::List`]
    pub generic_ty: Option<ColumnType>,

    /// The column is stored and returned but never queried.
    pub storage_only: bool,

    /// The column is queried but never returned in results.
    pub index_only: bool,

    /// When set, the column also gets an analyzed companion field for
    /// full-text match queries, using the given analyzer.
    pub match_query: Option<AnalyzerKind>,
}

/// Logical column types known to the model registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int,
    Long,
    Double,
    Bool,
    String,

    /// Enumerations persisted as their integer value
    Enum,

    /// Raw bytes
    Bytes,

    /// A JSON document persisted as text
    Json,

    /// A structured value serialized to a single string (data tables,
    /// key/value lists)
    Complex,

    /// A list whose element type is the column's generic type hint
    List,

    /// A type the registry could not classify, by name
    Other(String),
}

impl Model {
    pub fn new(name: impl Into<String>, stream: StreamKind) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            time_series: false,
            super_dataset: false,
            stream,
        }
    }

    pub fn time_series(mut self) -> Self {
        self.time_series = true;
        self
    }

    pub fn super_dataset(mut self) -> Self {
        self.super_dataset = true;
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn is_metrics(&self) -> bool {
        self.stream == StreamKind::Metrics
    }

    pub fn is_record(&self) -> bool {
        self.stream == StreamKind::Record
    }
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            generic_ty: None,
            storage_only: false,
            index_only: false,
            match_query: None,
        }
    }

    /// A list column of `element` values.
    pub fn list(name: impl Into<String>, element: ColumnType) -> Self {
        Self {
            generic_ty: Some(element),
            ..Self::new(name, ColumnType::List)
        }
    }

    pub fn storage_only(mut self) -> Self {
        self.storage_only = true;
        self
    }

    pub fn index_only(mut self) -> Self {
        self.index_only = true;
        self
    }

    pub fn match_query(mut self, analyzer: AnalyzerKind) -> Self {
        self.match_query = Some(analyzer);
        self
    }

    pub fn needs_match_query(&self) -> bool {
        self.match_query.is_some()
    }
}
