use crate::StorageConfig;

use esinstall_core::{
    schema::{AnalyzerRegistry, IndexSettings, Model},
    Result,
};

/// Lowest index refresh interval ever computed, in seconds.
pub const MIN_REFRESH_INTERVAL_SECS: u32 = 5;

/// Refresh interval for a bulk flush interval, both in seconds.
///
/// The refresh interval stays at two thirds of the flush interval so that
/// two bulk flushes never land in one refresh, which causes version
/// conflicts. It never drops below [`MIN_REFRESH_INTERVAL_SECS`].
pub fn refresh_interval(flush_interval: u32) -> u32 {
    (flush_interval.saturating_mul(2) / 3).max(MIN_REFRESH_INTERVAL_SECS)
}

/// Computes the settings an index or template of `model` is created with.
///
/// Advanced settings from the configuration are applied last and replace
/// any computed value, the refresh interval floor included.
pub fn create_settings(
    model: &Model,
    config: &StorageConfig,
    analyzers: &AnalyzerRegistry,
) -> Result<IndexSettings> {
    let mut settings = IndexSettings::new();

    let (replicas, shards) = if model.super_dataset {
        (
            config.super_dataset_index_replicas_number,
            config
                .index_shards_number
                .saturating_mul(config.super_dataset_index_shards_factor),
        )
    } else {
        (config.index_replicas_number, config.index_shards_number)
    };

    let analysis = analyzers.generate(&model.columns, &config.analyzer_config())?;

    settings
        .insert(IndexSettings::NUMBER_OF_REPLICAS, replicas)
        .insert(IndexSettings::NUMBER_OF_SHARDS, shards)
        .insert(
            IndexSettings::REFRESH_INTERVAL,
            format!("{}s", refresh_interval(config.flush_interval)),
        )
        .insert(IndexSettings::ANALYSIS, analysis.to_value())
        .extend(config.advanced_settings()?);

    Ok(settings)
}
