//! CreativeRepository backed by a PostgREST-style HTTP collection.
//!
//! Reads are `GET {base}/{table}?owner_id=eq.{id}&order=created_at.desc&limit={n}`,
//! writes are `POST {base}/{table}` with the record as JSON. The read response
//! is handed back untouched. Every request is bounded by a timeout; a request
//! that runs out of time fails like any other data access error.

use adcraft_core::config::SecretConfig;
use adcraft_core::creative::{CreativeQuery, CreativeRecord, CreativeRepository, SortOrder};
use adcraft_core::{AdcraftError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::env;
use std::time::Duration;

/// Fallback for the REST API key when `secret.json` has no `rest` entry.
pub const REST_API_KEY_ENV: &str = "ADCRAFT_REST_API_KEY";

pub const DEFAULT_REST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct RestCreativeRepository {
    client: Client,
    base_url: String,
    table: String,
    api_key: String,
    timeout: Duration,
}

impl RestCreativeRepository {
    pub fn new(
        base_url: impl Into<String>,
        table: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: client_with_timeout(DEFAULT_REST_TIMEOUT),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            table: table.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_REST_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = client_with_timeout(timeout);
        self.timeout = timeout;
        self
    }

    /// Resolves the API key from `secrets`, then `ADCRAFT_REST_API_KEY`.
    pub fn from_secrets(
        base_url: impl Into<String>,
        table: impl Into<String>,
        secrets: &SecretConfig,
    ) -> Result<Self> {
        let api_key = match &secrets.rest {
            Some(rest) => rest.api_key.clone(),
            None => env::var(REST_API_KEY_ENV).map_err(|_| {
                AdcraftError::config(format!(
                    "{REST_API_KEY_ENV} not found in secret.json or environment variables"
                ))
            })?,
        };
        Ok(Self::new(base_url, table, api_key))
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn send_error(&self, action: &str, err: reqwest::Error) -> AdcraftError {
        if err.is_timeout() {
            AdcraftError::data_access(format!("{action} timed out after {:?}", self.timeout))
        } else {
            AdcraftError::data_access(format!("{action} failed: {err}"))
        }
    }

    async fn check_status(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AdcraftError::data_access(format!(
            "{action} failed with status {status}: {body}"
        )))
    }
}

fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(target: "storage", "Falling back to default HTTP client: {}", err);
            Client::new()
        })
}

fn order_param(order: SortOrder) -> &'static str {
    match order {
        SortOrder::CreatedAtDesc => "created_at.desc",
        SortOrder::CreatedAtAsc => "created_at.asc",
    }
}

#[async_trait]
impl CreativeRepository for RestCreativeRepository {
    async fn query(&self, query: &CreativeQuery) -> Result<Value> {
        let owner_filter = format!("eq.{}", query.owner_id);
        let limit = query.limit.to_string();

        let response = self
            .authorized(self.client.get(self.collection_url()))
            .query(&[
                ("select", "*"),
                ("owner_id", owner_filter.as_str()),
                ("order", order_param(query.order)),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.send_error("Creative query", e))?;

        let response = Self::check_status(response, "Creative query").await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    self.send_error("Creative query", e)
                } else {
                    AdcraftError::data_access(format!("Creative query returned invalid JSON: {e}"))
                }
            })
    }

    async fn create(&self, record: &CreativeRecord) -> Result<()> {
        let response = self
            .authorized(self.client.post(self.collection_url()))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| self.send_error("Creative insert", e))?;

        Self::check_status(response, "Creative insert").await?;
        tracing::debug!(target: "storage", id = %record.id, "Inserted creative via REST");
        Ok(())
    }
}
