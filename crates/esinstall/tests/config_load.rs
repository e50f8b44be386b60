use esinstall::StorageConfig;

#[test]
fn defaults() {
    let config = StorageConfig::default();

    assert_eq!(config.index_shards_number, 1);
    assert_eq!(config.index_replicas_number, 1);
    assert_eq!(config.super_dataset_index_shards_factor, 5);
    assert_eq!(config.super_dataset_index_replicas_number, 0);
    assert_eq!(config.flush_interval, 5);
    assert_eq!(config.day_step, 1);
    assert!(!config.logic_sharding);
    assert!(config.advanced_settings().unwrap().is_empty());
}

#[test]
fn from_toml() {
    let config = StorageConfig::from_toml_str(
        r#"
        namespace = "prod"
        index_shards_number = 3
        super_dataset_index_shards_factor = 2
        flush_interval = 30
        index_template_order = 5
        advanced = '{"index.translog.durability":"async"}'
        "#,
    )
    .unwrap();

    assert_eq!(
        config,
        StorageConfig::new()
            .namespace("prod")
            .index_shards_number(3)
            .super_dataset_index_shards_factor(2)
            .flush_interval(30)
            .index_template_order(5)
            .advanced(r#"{"index.translog.durability":"async"}"#)
    );
    assert_eq!(config.advanced_settings().unwrap().len(), 1);
}

#[test]
fn invalid_toml() {
    let err = StorageConfig::from_toml_str("index_shards_number = \"many\"").unwrap_err();
    assert!(err.is_invalid_configuration());
}

#[test]
fn missing_file() {
    let err = StorageConfig::load("/nonexistent/esinstall.toml").unwrap_err();
    assert!(err.is_invalid_configuration());
}

#[test]
fn analyzer_config_follows_storage_config() {
    let mut config = StorageConfig::new();
    config.oap_analyzer = r#"{"analyzer":{"oap_analyzer":{"type":"simple"}}}"#.to_string();

    assert_eq!(config.analyzer_config().oap_analyzer, config.oap_analyzer);
}
