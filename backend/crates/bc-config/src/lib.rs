mod cache_config;
mod config;
mod database_config;
mod dispatch_config;
mod error;
mod ledger_config;
mod log_level;
mod logging_config;
mod readiness_config;
mod server_config;
mod sheet_config;
mod transport_config;

#[cfg(test)]
mod tests;

pub use cache_config::CacheConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use dispatch_config::DispatchConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use ledger_config::LedgerConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use readiness_config::ReadinessConfig;
pub use server_config::ServerConfig;
pub use sheet_config::SheetConfig;
pub use transport_config::TransportConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const MIN_PORT: u16 = 1024;
const DEFAULT_DATABASE_FILENAME: &str = "broadcasts.db";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
