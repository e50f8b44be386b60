use esinstall::{create_settings, StorageConfig};
use esinstall_core::schema::{
    AnalyzerKind, AnalyzerRegistry, Column, ColumnType, IndexSettings, Model, StreamKind,
};

use pretty_assertions::assert_eq;
use serde_json::json;

fn model() -> Model {
    Model::new("service_traces", StreamKind::Record)
        .column(Column::new("service_id", ColumnType::String))
}

#[test]
fn regular_dataset() {
    let config = StorageConfig::new()
        .index_shards_number(3)
        .index_replicas_number(2)
        .flush_interval(30);

    let settings = create_settings(&model(), &config, &AnalyzerRegistry::default()).unwrap();

    assert_eq!(settings.number_of_shards(), Some(3));
    assert_eq!(settings.number_of_replicas(), Some(2));
    assert_eq!(settings.refresh_interval(), Some("20s"));
    assert_eq!(settings.analysis(), Some(&json!({})));
}

#[test]
fn super_dataset() {
    let config = StorageConfig::new()
        .index_shards_number(3)
        .super_dataset_index_shards_factor(2)
        .super_dataset_index_replicas_number(0);

    let model = model().super_dataset();
    let settings = create_settings(&model, &config, &AnalyzerRegistry::default()).unwrap();

    assert_eq!(settings.number_of_shards(), Some(6));
    assert_eq!(settings.number_of_replicas(), Some(0));
}

#[test]
fn refresh_interval_is_clamped() {
    let config = StorageConfig::new().flush_interval(6);

    let settings = create_settings(&model(), &config, &AnalyzerRegistry::default()).unwrap();

    assert_eq!(settings.refresh_interval(), Some("5s"));
}

#[test]
fn analysis_from_match_columns() {
    let model = model()
        .column(Column::new("endpoint_name", ColumnType::String).match_query(AnalyzerKind::Oap));

    let settings =
        create_settings(&model, &StorageConfig::new(), &AnalyzerRegistry::default()).unwrap();

    assert_eq!(
        settings.analysis(),
        Some(&json!({ "analyzer": { "oap_analyzer": { "type": "stop" } } }))
    );
}

#[test]
fn advanced_settings_win() {
    let config = StorageConfig::new()
        .flush_interval(6)
        .advanced(r#"{"index.refresh_interval":"1s","index.max_result_window":100000}"#);

    let settings = create_settings(&model(), &config, &AnalyzerRegistry::default()).unwrap();

    assert_eq!(settings.refresh_interval(), Some("1s"));
    assert_eq!(
        settings.get("index.max_result_window"),
        Some(&json!(100000))
    );
    assert_eq!(settings.get(IndexSettings::NUMBER_OF_SHARDS), Some(&json!(1)));
}

#[test]
fn advanced_settings_must_be_an_object() {
    let config = StorageConfig::new().advanced("[1, 2]");

    let err = create_settings(&model(), &config, &AnalyzerRegistry::default()).unwrap_err();
    assert!(err.is_invalid_configuration());

    let config = StorageConfig::new().advanced("{ broken");
    let err = create_settings(&model(), &config, &AnalyzerRegistry::default()).unwrap_err();
    assert!(err.is_invalid_configuration());
}

#[test]
fn unregistered_analyzer_fails() {
    let model = model()
        .column(Column::new("content", ColumnType::Complex).match_query(AnalyzerKind::OapLog));

    let err =
        create_settings(&model, &StorageConfig::new(), &AnalyzerRegistry::empty()).unwrap_err();
    assert!(err.is_invalid_schema());
}
