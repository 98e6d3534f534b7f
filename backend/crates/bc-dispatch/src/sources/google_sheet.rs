use crate::sources::{
    PrimarySource, SheetRow, SourceError, SourceResult, align_to_headers, rows_to_maps,
};

use bc_config::SheetConfig;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use log::debug;
use reqwest::{Client as ReqwestClient, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the token actually expires
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Serialize)]
struct AppendBody {
    values: Vec<Vec<String>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Google Sheets v4 reader/writer authenticated as a service account.
///
/// Missing credentials are reported when the sheet is queried, not at
/// construction, so the resolver can fall back to the database.
pub struct GoogleSheetSource {
    spreadsheet_id: String,
    tab_name: String,
    service_account_email: Option<String>,
    private_key_pem: Option<String>,
    api_base_url: String,
    token_url: String,
    client: ReqwestClient,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetSource {
    /// `Ok(None)` when no spreadsheet id is configured.
    pub fn from_config(config: &SheetConfig) -> SourceResult<Option<Self>> {
        let Some(spreadsheet_id) = config
            .spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            return Ok(None);
        };

        let client = ReqwestClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Some(Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            tab_name: config.tab_name.clone(),
            service_account_email: config.service_account_email.clone(),
            private_key_pem: config.private_key_pem(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
            client,
            token: Mutex::new(None),
        }))
    }

    async fn access_token(&self) -> SourceResult<String> {
        let mut cached = self.token.lock().await;

        if let Some(ref token) = *cached
            && token.expires_at > Instant::now() + TOKEN_EXPIRY_MARGIN
        {
            return Ok(token.value.clone());
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn fetch_token(&self) -> SourceResult<CachedToken> {
        let (Some(email), Some(pem)) = (
            self.service_account_email.as_deref(),
            self.private_key_pem.as_deref(),
        ) else {
            return Err(SourceError::not_configured(
                "service account email or private key missing",
            ));
        };

        let key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| SourceError::not_configured(format!("invalid private key: {}", e)))?;

        let iat = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: email,
            scope: SHEETS_SCOPE,
            aud: &self.token_url,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| SourceError::auth(format!("cannot sign assertion: {}", e)))?;

        // JWTs are base64url segments joined by '.', already form-safe
        let body = format!("grant_type={}&assertion={}", JWT_BEARER_GRANT, assertion);

        let response = self
            .client
            .post(&self.token_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::auth(format!(
                "token endpoint returned {}: {}",
                status, text
            )));
        }

        let token: TokenResponse = response.json().await?;
        debug!("Obtained sheet access token (expires in {}s)", token.expires_in);

        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }

    fn values_url(&self, range: &str) -> SourceResult<Url> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|e| SourceError::not_configured(format!("invalid api_base_url: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| SourceError::not_configured("api_base_url cannot hold a path"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);

        Ok(url)
    }

    async fn get_values(&self, range: &str) -> SourceResult<Vec<Vec<Value>>> {
        let token = self.access_token().await?;
        let url = self.values_url(range)?;

        let response = self.client.get(url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::api(status, text));
        }

        let range: ValueRange = response.json().await?;
        Ok(range.values)
    }

    async fn header_row(&self) -> SourceResult<Vec<String>> {
        let values = self.get_values(&format!("{}!1:1", self.tab_name)).await?;

        Ok(values
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|cell| match cell {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .collect())
    }
}

#[async_trait]
impl PrimarySource for GoogleSheetSource {
    async fn fetch_all(&self) -> SourceResult<Vec<SheetRow>> {
        let values = self.get_values(&self.tab_name).await?;
        Ok(rows_to_maps(values))
    }

    async fn append(&self, row: &SheetRow) -> SourceResult<()> {
        let headers = self.header_row().await?;
        let values = align_to_headers(&headers, row);

        let token = self.access_token().await?;
        let mut url = self.values_url(&format!("{}:append", self.tab_name))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&AppendBody {
                values: vec![values],
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::api(status, text));
        }

        Ok(())
    }
}
