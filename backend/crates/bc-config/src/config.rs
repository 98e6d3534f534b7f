use crate::{
    CacheConfig, ConfigError, ConfigErrorResult, DatabaseConfig, DispatchConfig, LedgerConfig,
    LoggingConfig, ReadinessConfig, ServerConfig, SheetConfig, TransportConfig,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub dispatch: DispatchConfig,
    pub readiness: ReadinessConfig,
    pub cache: CacheConfig,
    pub sheet: SheetConfig,
    pub transport: TransportConfig,
    pub ledger: LedgerConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for BC_CONFIG_DIR env var, else use ./.bc/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: BC_CONFIG_DIR env var > ./.bc/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("BC_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".bc"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.dispatch.validate()?;
        self.readiness.validate()?;
        self.cache.validate()?;
        self.sheet.validate()?;
        self.transport.validate()?;
        self.ledger.validate()?;

        Ok(())
    }

    /// Absolute path to the database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  dispatch: concurrency={}, max_recipients={}",
            self.dispatch.default_concurrency, self.dispatch.max_recipients
        );
        info!(
            "  readiness: timeout={}s, media_timeout={}s",
            self.readiness.default_timeout_secs, self.readiness.media_timeout_secs
        );
        info!("  cache: ttl={}s", self.cache.ttl_secs);

        if self.sheet.is_enabled() {
            let credentials = if self.sheet.service_account_email.is_some()
                && self.sheet.private_key_pem().is_some()
            {
                "present"
            } else {
                "MISSING"
            };
            info!(
                "  sheet: tab={}, credentials {}",
                self.sheet.tab_name, credentials
            );
            if credentials == "MISSING" {
                warn!("Sheet configured without credentials; customer reads will use the database");
            }
        } else {
            info!("  sheet: disabled");
        }

        match self.transport.base_url {
            Some(ref url) => info!(
                "  transport: {} (token: {}, status every {}ms)",
                url,
                if self.transport.api_token.is_some() {
                    "set"
                } else {
                    "none"
                },
                self.transport.status_poll_interval_ms
            ),
            None => warn!("  transport: not configured, sends will be rejected"),
        }

        info!(
            "  ledger: attempts={}, initial={}ms, max={}ms",
            self.ledger.max_attempts, self.ledger.initial_delay_ms, self.ledger.max_delay_ms
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("BC_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("BC_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("BC_DATABASE_PATH", &mut self.database.path);

        // Logging
        if let Ok(val) = std::env::var("BC_LOG_LEVEL") {
            self.logging.level = crate::LogLevel::parse_or_default(&val);
        }
        Self::apply_env_bool("BC_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("BC_LOG_FILE", &mut self.logging.file);

        // Dispatch
        Self::apply_env_parse("SEND_CONCURRENCY", &mut self.dispatch.default_concurrency);
        Self::apply_env_parse(
            "BC_DISPATCH_CONCURRENCY",
            &mut self.dispatch.default_concurrency,
        );
        Self::apply_env_parse(
            "BC_DISPATCH_MAX_RECIPIENTS",
            &mut self.dispatch.max_recipients,
        );

        // Readiness
        Self::apply_env_parse(
            "BC_READINESS_TIMEOUT_SECS",
            &mut self.readiness.default_timeout_secs,
        );
        Self::apply_env_parse(
            "BC_READINESS_MEDIA_TIMEOUT_SECS",
            &mut self.readiness.media_timeout_secs,
        );

        // Cache
        Self::apply_env_parse("BC_CACHE_TTL_SECS", &mut self.cache.ttl_secs);

        // Sheet (unprefixed names first so the BC_* ones win)
        Self::apply_env_option_string("SHEET_ID", &mut self.sheet.spreadsheet_id);
        Self::apply_env_option_string("BC_SHEET_ID", &mut self.sheet.spreadsheet_id);
        Self::apply_env_string("SHEET_TAB_NAME", &mut self.sheet.tab_name);
        Self::apply_env_string("BC_SHEET_TAB_NAME", &mut self.sheet.tab_name);
        Self::apply_env_option_string(
            "GOOGLE_SERVICE_ACCOUNT_EMAIL",
            &mut self.sheet.service_account_email,
        );
        Self::apply_env_option_string(
            "BC_SHEET_SERVICE_ACCOUNT_EMAIL",
            &mut self.sheet.service_account_email,
        );
        Self::apply_env_option_string("GOOGLE_PRIVATE_KEY", &mut self.sheet.private_key);
        Self::apply_env_option_string("BC_SHEET_PRIVATE_KEY", &mut self.sheet.private_key);
        Self::apply_env_string("BC_SHEET_API_BASE_URL", &mut self.sheet.api_base_url);
        Self::apply_env_string("BC_SHEET_TOKEN_URL", &mut self.sheet.token_url);

        // Transport
        Self::apply_env_option_string("BC_TRANSPORT_BASE_URL", &mut self.transport.base_url);
        Self::apply_env_option_string("BC_TRANSPORT_API_TOKEN", &mut self.transport.api_token);
        Self::apply_env_parse(
            "BC_TRANSPORT_STATUS_POLL_MS",
            &mut self.transport.status_poll_interval_ms,
        );
        Self::apply_env_parse(
            "BC_TRANSPORT_REQUEST_TIMEOUT_SECS",
            &mut self.transport.request_timeout_secs,
        );

        // Ledger
        Self::apply_env_parse("BC_LEDGER_MAX_ATTEMPTS", &mut self.ledger.max_attempts);
        Self::apply_env_parse(
            "BC_LEDGER_INITIAL_DELAY_MS",
            &mut self.ledger.initial_delay_ms,
        );
        Self::apply_env_parse("BC_LEDGER_MAX_DELAY_MS", &mut self.ledger.max_delay_ms);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
