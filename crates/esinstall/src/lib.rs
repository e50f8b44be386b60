mod config;
pub use config::StorageConfig;

mod controller;
pub use controller::{IndexController, TableNaming};

mod installer;
pub use installer::Installer;

mod mapping;
pub use mapping::create_mapping;

mod register;
pub use register::{LogicIndicesRegister, METRIC_TABLE_NAME};

mod settings;
pub use settings::{create_settings, refresh_interval, MIN_REFRESH_INTERVAL_SECS};

pub use esinstall_core::{
    driver::{self, Client},
    schema, Error, Result,
};
