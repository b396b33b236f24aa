//! Connection to the managed backend and a small builder over its table API

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use nutri_config::SupabaseConfig;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::{StoreError, StoreResult};

const REST_PREFIX: &str = "rest/v1";
const AUTH_PREFIX: &str = "auth/v1";

/// Shared handle to the hosted backend. Cloning is cheap.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    /// Build a client from configuration, applying the configured request timeout
    pub fn new(config: &SupabaseConfig) -> StoreResult<Self> {
        if config.url.trim().is_empty() {
            return Err(StoreError::Configuration("supabase url is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        info!(url = %config.url, "store client ready");
        Ok(Self::with_client(http, &config.url, &config.api_key))
    }

    /// Build a client around an existing HTTP client
    pub fn with_client(http: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Start a query against `table`
    pub fn from(&self, table: &str) -> TableQuery {
        TableQuery {
            client: self.clone(),
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    /// Absolute URL of an auth API endpoint such as `token` or `user`
    pub fn auth_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.inner.base_url,
            AUTH_PREFIX,
            path.trim_start_matches('/')
        )
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.inner.base_url, REST_PREFIX, table)
    }

    /// A request carrying the project API key; `bearer` overrides the
    /// authorization header for calls made on behalf of a user session.
    pub fn request(&self, method: Method, url: &str, bearer: Option<&str>) -> RequestBuilder {
        self.inner
            .http
            .request(method, url)
            .header("apikey", &self.inner.api_key)
            .bearer_auth(bearer.unwrap_or(self.inner.api_key.as_str()))
    }
}

/// A pending table operation. Filters accumulate as PostgREST query parameters.
#[derive(Clone)]
pub struct TableQuery {
    client: SupabaseClient,
    table: String,
    params: Vec<(String, String)>,
}

impl TableQuery {
    /// Columns to return, including embedded resources (`*,usuario:user_id(id,nome)`)
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn in_list<S: AsRef<str>>(mut self, column: &str, values: &[S]) -> Self {
        let quoted = values
            .iter()
            .map(|value| quote_value(value.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push((column.to_string(), format!("in.({quoted})")));
        self
    }

    /// Disjunction of raw filter expressions, e.g. `a.eq.1,b.eq.2`
    pub fn or(mut self, filters: &str) -> Self {
        self.params.push(("or".to_string(), format!("({filters})")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    pub fn limit(mut self, count: usize) -> Self {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.params
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> StoreResult<Vec<T>> {
        debug!(table = %self.table, params = ?self.params, "store select");
        let response = self.build(Method::GET).send().await?;
        decode_response(response).await
    }

    pub async fn fetch_optional<T: DeserializeOwned>(self) -> StoreResult<Option<T>> {
        let rows = self.limit(1).fetch::<T>().await?;
        Ok(rows.into_iter().next())
    }

    pub async fn insert<B, T>(self, body: &B) -> StoreResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table = %self.table, "store insert");
        let response = self
            .build(Method::POST)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        decode_response(response).await
    }

    pub async fn update<B, T>(self, body: &B) -> StoreResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table = %self.table, params = ?self.params, "store update");
        let response = self
            .build(Method::PATCH)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        decode_response(response).await
    }

    pub async fn delete(self) -> StoreResult<()> {
        debug!(table = %self.table, params = ?self.params, "store delete");
        let response = self.build(Method::DELETE).send().await?;
        ensure_success(response).await
    }

    fn build(&self, method: Method) -> RequestBuilder {
        let url = self.client.table_url(&self.table);
        self.client.request(method, &url, None).query(&self.params)
    }
}

pub(crate) fn quote_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Decode a JSON body, turning non-success statuses into [`StoreError::Api`]
pub async fn decode_response<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        return Err(provider_error(status, &bytes));
    }
    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn ensure_success(response: Response) -> StoreResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let bytes = response.bytes().await?;
    Err(provider_error(status, &bytes))
}

/// Pull the human readable message out of a table or auth API error body
pub fn provider_error(status: StatusCode, body: &[u8]) -> StoreError {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        msg: Option<String>,
        error_description: Option<String>,
        error: Option<String>,
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| {
            body.message
                .or(body.msg)
                .or(body.error_description)
                .or(body.error)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        message
    };

    StoreError::Api {
        status: status.as_u16(),
        message,
    }
}
