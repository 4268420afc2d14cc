//! HTTP implementation of [`RemoteDataSource`] using [`reqwest`].
//!
//! Every request carries the account API key as a bearer token. Item
//! look-ups are split into pages of at most [`MAX_IDS_PER_REQUEST`] ids,
//! which is the limit the API enforces on `ids=` lists; callers still see
//! a single batch that succeeds or fails as a whole.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use armory_core::equipment::EquipmentTab;
use armory_core::item::ItemRecord;
use armory_core::types::ItemId;

use crate::source::RemoteDataSource;

/// Public endpoint of the v2 API.
pub const DEFAULT_BASE_URL: &str = "https://api.guildwars2.com/v2";

/// Largest `ids=` list the API accepts in one request.
pub const MAX_IDS_PER_REQUEST: usize = 200;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the game API layer.
#[derive(Debug, thiserror::Error)]
pub enum Gw2ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, or a
    /// body that does not decode into the expected shape).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("GW2 API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Connection settings for [`Gw2Client`].
#[derive(Debug, Clone)]
pub struct Gw2ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Gw2ClientConfig {
    /// Settings for the public endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Response element of `legendaryarmory?ids=all`.
#[derive(Debug, Deserialize)]
struct LegendaryArmoryEntry {
    id: ItemId,
}

/// HTTP client for the game API.
pub struct Gw2Client {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl Gw2Client {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(config: Gw2ClientConfig) -> Result<Self, Gw2ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Self::with_client(client, config)
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: Gw2ClientConfig,
    ) -> Result<Self, Gw2ApiError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| Gw2ApiError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Gw2ApiError::InvalidBaseUrl(config.base_url));
        }
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Endpoint URL for the given path segments. Each segment is
    /// percent-encoded individually, so character names containing
    /// spaces or slashes stay a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, Gw2ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Gw2ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ---- private helpers ----

    /// Issue an authenticated GET and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, Gw2ApiError> {
        tracing::debug!(path = url.path(), "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code, returning an
    /// [`Gw2ApiError::Api`] with the body text otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, Gw2ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(Gw2ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, Gw2ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Comma-separated `ids=` value.
pub fn join_ids(ids: &[ItemId]) -> String {
    ids.iter()
        .map(ItemId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl RemoteDataSource for Gw2Client {
    async fn character_names(&self) -> Result<Vec<String>, Gw2ApiError> {
        self.get_json(self.endpoint(&["characters"])?, &[]).await
    }

    async fn equipment_tabs(&self, character: &str) -> Result<Vec<EquipmentTab>, Gw2ApiError> {
        let url = self.endpoint(&["characters", character, "equipmenttabs"])?;
        self.get_json(url, &[("tabs", "all")]).await
    }

    async fn items(&self, ids: &[ItemId]) -> Result<Vec<ItemRecord>, Gw2ApiError> {
        let mut records = Vec::with_capacity(ids.len());
        for (page, chunk) in ids.chunks(MAX_IDS_PER_REQUEST).enumerate() {
            let csv = join_ids(chunk);
            let mut batch: Vec<ItemRecord> = self
                .get_json(self.endpoint(&["items"])?, &[("ids", csv.as_str())])
                .await?;
            tracing::debug!(
                page,
                requested = chunk.len(),
                received = batch.len(),
                "Fetched item page"
            );
            records.append(&mut batch);
        }
        Ok(records)
    }

    async fn legendary_armory_ids(&self) -> Result<Vec<ItemId>, Gw2ApiError> {
        let entries: Vec<LegendaryArmoryEntry> = self
            .get_json(self.endpoint(&["legendaryarmory"])?, &[("ids", "all")])
            .await?;
        Ok(entries.into_iter().map(|e| e.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> Result<Gw2Client, Gw2ApiError> {
        Gw2Client::new(Gw2ClientConfig {
            base_url: base_url.to_string(),
            ..Gw2ClientConfig::new("test-key")
        })
    }

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let client = client(DEFAULT_BASE_URL).unwrap();
        let url = client.endpoint(&["characters"]).unwrap();
        assert_eq!(url.as_str(), "https://api.guildwars2.com/v2/characters");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = client("https://api.guildwars2.com/v2/").unwrap();
        let url = client.endpoint(&["items"]).unwrap();
        assert_eq!(url.as_str(), "https://api.guildwars2.com/v2/items");
    }

    #[test]
    fn character_names_are_encoded_as_one_segment() {
        let client = client(DEFAULT_BASE_URL).unwrap();
        let url = client
            .endpoint(&["characters", "Zojja the Great/2", "equipmenttabs"])
            .unwrap();
        assert_eq!(
            url.path(),
            "/v2/characters/Zojja%20the%20Great%2F2/equipmenttabs"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(client("not a url"), Err(Gw2ApiError::InvalidBaseUrl(_))));
        assert!(matches!(client("mailto:someone"), Err(Gw2ApiError::InvalidBaseUrl(_))));
    }

    #[test]
    fn join_ids_is_comma_separated() {
        assert_eq!(join_ids(&[100, 200, 300]), "100,200,300");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn api_error_display() {
        let err = Gw2ApiError::Api {
            status: 401,
            body: "{\"text\":\"Invalid access token\"}".into(),
        };
        assert_eq!(
            err.to_string(),
            "GW2 API error (401): {\"text\":\"Invalid access token\"}"
        );
    }
}
