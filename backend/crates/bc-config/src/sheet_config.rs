use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_TAB_NAME: &str = "Sheet1";
pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google Sheets source used as the primary customer list.
///
/// Missing credentials are not a startup error: the resolver treats an
/// unconfigured sheet as unavailable and falls back to the database.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub spreadsheet_id: Option<String>,
    pub tab_name: String,
    pub service_account_email: Option<String>,
    /// PEM private key; literal `\n` sequences are accepted
    pub private_key: Option<String>,
    pub api_base_url: String,
    pub token_url: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            tab_name: String::from(DEFAULT_TAB_NAME),
            service_account_email: None,
            private_key: None,
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            token_url: String::from(DEFAULT_TOKEN_URL),
        }
    }
}

impl std::fmt::Debug for SheetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("tab_name", &self.tab_name)
            .field("service_account_email", &self.service_account_email)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl SheetConfig {
    /// True when the sheet was named at all (credentials may still be missing)
    pub fn is_enabled(&self) -> bool {
        self.spreadsheet_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// Private key with escaped newlines turned into real ones
    pub fn private_key_pem(&self) -> Option<String> {
        self.private_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| k.replace("\\n", "\n"))
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.tab_name.trim().is_empty() {
            return Err(ConfigError::config("sheet.tab_name cannot be empty"));
        }

        for (name, url) in [
            ("api_base_url", &self.api_base_url),
            ("token_url", &self.token_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::config(format!(
                    "sheet.{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        Ok(())
    }
}
