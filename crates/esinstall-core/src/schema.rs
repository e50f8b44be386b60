mod analyzer;
pub use analyzer::{AnalyzerConfig, AnalyzerKind, AnalyzerRegistry, AnalyzerSetting, Generator};

mod mapping;
pub use mapping::{FieldDef, Mappings, Source};

mod model;
pub use model::{Column, ColumnType, Model, StreamKind};

mod name;
pub use name::{match_field_name, MATCH_FIELD_SUFFIX};

mod settings;
pub use settings::IndexSettings;

mod structures;
pub use structures::Structures;

mod ty;
pub use ty::FieldType;
