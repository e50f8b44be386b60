use esinstall_core::schema::{
    AnalyzerConfig, AnalyzerKind, AnalyzerRegistry, AnalyzerSetting, Column, ColumnType,
};

use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn no_match_query_columns() {
    let columns = [
        Column::new("service_id", ColumnType::String),
        Column::new("latency", ColumnType::Int),
    ];

    let setting = AnalyzerRegistry::default()
        .generate(&columns, &AnalyzerConfig::default())
        .unwrap();

    assert!(setting.is_empty());
    assert_eq!(setting.to_value(), json!({}));
}

#[test]
fn default_generators() {
    let columns = [
        Column::new("endpoint_name", ColumnType::String).match_query(AnalyzerKind::Oap),
        Column::new("content", ColumnType::Complex).match_query(AnalyzerKind::OapLog),
    ];

    let setting = AnalyzerRegistry::default()
        .generate(&columns, &AnalyzerConfig::default())
        .unwrap();

    assert_eq!(
        setting.to_value(),
        json!({
            "analyzer": {
                "oap_analyzer": { "type": "stop" },
                "oap_log_analyzer": { "type": "standard" },
            }
        })
    );
}

#[test]
fn combine_keeps_every_section() {
    let config = AnalyzerConfig {
        oap_analyzer: r#"{
            "analyzer": { "oap_analyzer": { "type": "custom", "tokenizer": "oap_tokenizer" } },
            "tokenizer": { "oap_tokenizer": { "type": "pattern", "pattern": "\\W+" } }
        }"#
        .to_string(),
        oap_log_analyzer: r#"{
            "analyzer": { "oap_log_analyzer": { "type": "standard" } },
            "filter": { "oap_stop": { "type": "stop" } }
        }"#
        .to_string(),
    };

    let columns = [
        Column::new("endpoint_name", ColumnType::String).match_query(AnalyzerKind::Oap),
        Column::new("content", ColumnType::Complex).match_query(AnalyzerKind::OapLog),
    ];

    let setting = AnalyzerRegistry::default()
        .generate(&columns, &config)
        .unwrap();

    assert_eq!(setting.analyzer.len(), 2);
    assert!(setting.tokenizer.contains_key("oap_tokenizer"));
    assert!(setting.filter.contains_key("oap_stop"));
}

#[test]
fn combine_last_wins_per_entry() {
    let mut setting =
        AnalyzerSetting::parse(r#"{"analyzer":{"a":{"type":"stop"},"b":{"type":"simple"}}}"#)
            .unwrap();
    setting.combine(AnalyzerSetting::parse(r#"{"analyzer":{"a":{"type":"standard"}}}"#).unwrap());

    assert_eq!(
        setting.to_value(),
        json!({ "analyzer": { "a": { "type": "standard" }, "b": { "type": "simple" } } })
    );
}

#[test]
fn unregistered_kind() {
    let columns =
        [Column::new("content", ColumnType::Complex).match_query(AnalyzerKind::OapLog)];

    let mut registry = AnalyzerRegistry::empty();
    registry.register(AnalyzerKind::Oap, |_| Ok(AnalyzerSetting::new()));

    let err = registry
        .generate(&columns, &AnalyzerConfig::default())
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn malformed_definition() {
    let config = AnalyzerConfig {
        oap_analyzer: "{ not json".to_string(),
        ..AnalyzerConfig::default()
    };
    let columns = [Column::new("endpoint_name", ColumnType::String).match_query(AnalyzerKind::Oap)];

    let err = AnalyzerRegistry::default()
        .generate(&columns, &config)
        .unwrap_err();
    assert!(err.is_invalid_schema());
}
