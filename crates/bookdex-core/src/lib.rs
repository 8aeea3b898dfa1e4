pub mod config;
pub mod record;

mod app_config;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use record::{ProductRecord, StockStatus};
