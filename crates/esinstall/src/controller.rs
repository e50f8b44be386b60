use crate::StorageConfig;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use esinstall_core::schema::Model;

/// Names the physical artifacts of a model.
pub trait TableNaming: Send + Sync {
    /// Physical table (index or template) the model is stored in.
    fn table_name(&self, model: &Model) -> String;

    /// Index currently receiving writes for a time-series model.
    fn latest_write_index_name(&self, model: &Model) -> String;

    /// Whether the model is an aggregate that may share its physical table
    /// with other aggregates.
    fn is_metric_model(&self, model: &Model) -> bool;
}

/// Default [`TableNaming`] driven by the storage configuration.
#[derive(Debug, Clone)]
pub struct IndexController {
    namespace: String,
    logic_sharding: bool,
    day_step: u32,
    clock: fn() -> DateTime<Utc>,
}

impl IndexController {
    /// Physical table shared by every metric when logic sharding is off.
    pub const METRICS_ALL: &'static str = "metrics-all";

    /// Physical table shared by regular records when logic sharding is off.
    pub const RECORDS_ALL: &'static str = "records-all";

    pub fn new(config: &StorageConfig) -> Self {
        Self {
            namespace: config.namespace.trim().to_lowercase(),
            logic_sharding: config.logic_sharding,
            day_step: config.day_step.max(1),
            clock: Utc::now,
        }
    }

    /// Replace the clock used to pick the write index.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Write index of `model` at `now`: `<table>-<yyyyMMdd>`, where the date
    /// is the first day of the `day_step`-day bucket containing `now`.
    pub fn write_index_name_at(&self, model: &Model, now: DateTime<Utc>) -> String {
        let day = now.date_naive();
        let since_epoch = (day - NaiveDate::default()).num_days();
        let bucket_start = day - Duration::days(since_epoch.rem_euclid(i64::from(self.day_step)));

        format!("{}-{}", self.table_name(model), bucket_start.format("%Y%m%d"))
    }

    fn with_namespace(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}_{name}", self.namespace)
        }
    }
}

impl TableNaming for IndexController {
    fn table_name(&self, model: &Model) -> String {
        let name = if self.logic_sharding {
            model.name.as_str()
        } else if self.is_metric_model(model) {
            Self::METRICS_ALL
        } else if model.is_record() && !model.super_dataset {
            Self::RECORDS_ALL
        } else {
            model.name.as_str()
        };

        self.with_namespace(name)
    }

    fn latest_write_index_name(&self, model: &Model) -> String {
        self.write_index_name_at(model, (self.clock)())
    }

    fn is_metric_model(&self, model: &Model) -> bool {
        model.is_metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use esinstall_core::schema::StreamKind;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 13, 45, 0).unwrap()
    }

    #[test]
    fn shared_tables_without_logic_sharding() {
        let controller = IndexController::new(&StorageConfig::new());

        let metric = Model::new("service_cpm", StreamKind::Metrics);
        let record = Model::new("alarm_record", StreamKind::Record);
        let segment = Model::new("segment", StreamKind::Record).super_dataset();
        let management = Model::new("ui_template", StreamKind::Management);

        assert_eq!(controller.table_name(&metric), "metrics-all");
        assert_eq!(controller.table_name(&record), "records-all");
        assert_eq!(controller.table_name(&segment), "segment");
        assert_eq!(controller.table_name(&management), "ui_template");
    }

    #[test]
    fn own_table_with_logic_sharding() {
        let controller = IndexController::new(&StorageConfig::new().logic_sharding(true));

        let metric = Model::new("service_cpm", StreamKind::Metrics);
        assert_eq!(controller.table_name(&metric), "service_cpm");
    }

    #[test]
    fn namespace_prefix() {
        let controller = IndexController::new(&StorageConfig::new().namespace("Prod"));

        let model = Model::new("ui_template", StreamKind::Management);
        assert_eq!(controller.table_name(&model), "prod_ui_template");
    }

    #[test]
    fn daily_write_index() {
        let controller = IndexController::new(&StorageConfig::new().logic_sharding(true));
        let model = Model::new("service_cpm", StreamKind::Metrics).time_series();

        assert_eq!(
            controller.write_index_name_at(&model, at(2026, 10, 15)),
            "service_cpm-20261015"
        );
    }

    #[test]
    fn day_step_buckets() {
        let controller = IndexController::new(
            &StorageConfig::new().logic_sharding(true).day_step(3),
        );
        let model = Model::new("service_cpm", StreamKind::Metrics).time_series();

        // 1970-01-01 + 20556 days = 2026-04-13, and 20556 is a multiple of 3.
        assert_eq!(
            controller.write_index_name_at(&model, at(2026, 4, 13)),
            "service_cpm-20260413"
        );
        assert_eq!(
            controller.write_index_name_at(&model, at(2026, 4, 15)),
            "service_cpm-20260413"
        );
        assert_eq!(
            controller.write_index_name_at(&model, at(2026, 4, 16)),
            "service_cpm-20260416"
        );
    }

    #[test]
    fn injected_clock() {
        let controller = IndexController::new(&StorageConfig::new().logic_sharding(true))
            .with_clock(|| Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap());
        let model = Model::new("service_cpm", StreamKind::Metrics).time_series();

        assert_eq!(
            controller.latest_write_index_name(&model),
            "service_cpm-20260102"
        );
    }
}
