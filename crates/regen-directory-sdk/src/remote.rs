//! RemoteClient - network client for the hosted directory tables
//!
//! Speaks the PostgREST table API exposed under `{url}/rest/v1`.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use regen_directory::store::FEATURED_LIMIT;
use regen_directory::{Category, CategoryId, Enterprise, EnterpriseId, NewEnterprise, StoreConfig, Subcategory};

use crate::client::DirectoryClient;
use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{ApiErrorBody, EnterpriseFilter};

/// Characters left as-is in query values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'-').remove(b'_').remove(b'~');

const CATEGORIES: &str = "categories";
const SUBCATEGORIES: &str = "subcategories";
const ENTERPRISES: &str = "enterprises";

/// Network client for the hosted table API.
///
/// Every request carries the public key both as `apikey` and as a bearer token.
pub struct RemoteClient {
    rest_url: String,
    api_key: String,
    http_client: Client,
    featured_limit: usize,
}

impl RemoteClient {
    /// Create a client for the project at `base_url`.
    ///
    /// # Example
    /// ```no_run
    /// # use regen_directory_sdk::RemoteClient;
    /// let client = RemoteClient::new("https://project.supabase.co", "anon-key");
    /// ```
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_http_client(base_url, api_key, Client::new())
    }

    /// Build from configuration, honoring the optional request timeout
    pub fn from_config(config: &StoreConfig) -> DirectoryResult<Self> {
        if config.url.trim().is_empty() {
            return Err(DirectoryError::ConfigError("store url is not set".to_string()));
        }
        if config.api_key.trim().is_empty() {
            return Err(DirectoryError::ConfigError("store api key is not set".to_string()));
        }
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self::with_http_client(&config.url, &config.api_key, builder.build()?))
    }

    fn with_http_client(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            http_client,
            featured_limit: FEATURED_LIMIT,
        }
    }

    pub fn with_featured_limit(mut self, limit: usize) -> Self {
        self.featured_limit = limit;
        self
    }

    /// `{rest_url}/{table}?select=*&k=v...` with percent-encoded values
    fn table_url(&self, table: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}/{}?select=*", self.rest_url, table);
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&utf8_percent_encode(value, QUERY_VALUE).to_string());
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> DirectoryResult<Vec<T>> {
        let url = self.table_url(table, params);
        debug!("GET {}", url);

        let response = self.authorized(self.http_client.get(&url)).send().await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(DirectoryError::ReadFailed(error_message(response).await))
        }
    }
}

/// Extract the API's error message, falling back to the HTTP status line
async fn error_message(response: Response) -> String {
    let status = response.status().to_string();
    let body: ApiErrorBody = response.json().await.unwrap_or_default();
    let message = body.describe(&status);
    warn!("Request rejected: {}", message);
    message
}

fn eq(value: impl ToString) -> String {
    format!("eq.{}", value.to_string())
}

/// `ov.{"a","b"}`: array overlaps, i.e. contains any of
fn overlaps(values: &[String]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("ov.{{{}}}", items.join(","))
}

#[async_trait]
impl DirectoryClient for RemoteClient {
    async fn list_categories(&self) -> DirectoryResult<Vec<Category>> {
        self.get_rows(CATEGORIES, &[]).await
    }

    async fn list_subcategories(&self, category_id: CategoryId) -> DirectoryResult<Vec<Subcategory>> {
        self.get_rows(SUBCATEGORIES, &[("category_id", eq(category_id))]).await
    }

    async fn list_enterprises(&self, filter: &EnterpriseFilter) -> DirectoryResult<Vec<Enterprise>> {
        let mut params = Vec::new();
        if let Some(category) = &filter.category {
            params.push(("category", eq(category)));
        }
        if !filter.subcategories.is_empty() {
            params.push(("subcategories", overlaps(&filter.subcategories)));
        }
        self.get_rows(ENTERPRISES, &params).await
    }

    async fn list_featured(&self) -> DirectoryResult<Vec<Enterprise>> {
        self.get_rows(
            ENTERPRISES,
            &[("is_featured", eq(true)), ("limit", self.featured_limit.to_string())],
        )
        .await
    }

    async fn get_enterprise(&self, id: &EnterpriseId) -> DirectoryResult<Option<Enterprise>> {
        let rows: Vec<Enterprise> = self.get_rows(ENTERPRISES, &[("id", eq(id))]).await?;
        Ok(rows.into_iter().next())
    }

    async fn create_enterprise(&self, draft: NewEnterprise) -> DirectoryResult<Enterprise> {
        let url = format!("{}/{}", self.rest_url, ENTERPRISES);
        debug!("POST {} ({})", url, draft.name);

        let response = self
            .authorized(self.http_client.post(&url))
            .header("Prefer", "return=representation")
            .json(std::slice::from_ref(&draft))
            .send()
            .await
            .map_err(|e| DirectoryError::WriteFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DirectoryError::WriteFailed(error_message(response).await));
        }
        let rows: Vec<Enterprise> = response
            .json()
            .await
            .map_err(|e| DirectoryError::WriteFailed(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DirectoryError::WriteFailed("insert returned no rows".to_string()))
    }
}
