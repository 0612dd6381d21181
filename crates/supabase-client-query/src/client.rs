use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, Url};
use serde_json::Value as JsonValue;
use supabase_client_core::{to_header_map, DEFAULT_POSTGREST_CLIENT_TIMEOUT, DEFAULT_SCHEMA};

use crate::builder::QueryBuilder;
use crate::error::PostgrestError;
use crate::request::FilterBuilder;
use crate::types::{validate_identifier, Operation, RequestParts};

/// HTTP client for a PostgREST endpoint.
///
/// # Example
/// ```ignore
/// use supabase_client_query::{Filterable, Modifiable, OrderDirection, PostgrestClient};
///
/// let db = PostgrestClient::new(
///     "https://your-project.supabase.co/rest/v1",
///     &headers,
///     "public",
///     std::time::Duration::from_secs(120),
/// )?;
/// let resp = db
///     .from("countries")
///     .select("id, name")
///     .eq("continent", "Europe")
///     .order("name", OrderDirection::Ascending)
///     .execute()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    http: reqwest::Client,
    rest_url: String,
    base_url: Url,
    headers: HeaderMap,
    schema: String,
}

impl PostgrestClient {
    /// Create a client for `rest_url` (e.g. `https://xyz.supabase.co/rest/v1`).
    ///
    /// `headers` are sent with every request; `timeout` bounds each request.
    pub fn new(
        rest_url: &str,
        headers: &HashMap<String, String>,
        schema: &str,
        timeout: Duration,
    ) -> Result<Self, PostgrestError> {
        let rest_url = rest_url.trim_end_matches('/');
        let base_url = Url::parse(rest_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| PostgrestError::InvalidConfig(format!("Invalid REST URL: {rest_url}")))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        tracing::debug!(url = rest_url, schema, "Created PostgREST client");

        Ok(Self {
            http,
            rest_url: rest_url.to_string(),
            base_url,
            headers: to_header_map(headers)?,
            schema: schema.to_string(),
        })
    }

    /// Client with the default schema and timeout.
    pub fn with_defaults(
        rest_url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Self, PostgrestError> {
        Self::new(rest_url, headers, DEFAULT_SCHEMA, DEFAULT_POSTGREST_CLIENT_TIMEOUT)
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Use `token` as the bearer token for every later request.
    ///
    /// Builders created before this call keep the old token.
    pub fn auth(&mut self, token: &str) -> Result<(), PostgrestError> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| PostgrestError::InvalidConfig(format!("Invalid access token: {}", e)))?;
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    /// Start a query on a table or view.
    ///
    /// The name is percent-encoded as a single path segment.
    pub fn from(&self, table: &str) -> QueryBuilder {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(table);
        }
        QueryBuilder::new(
            self.http.clone(),
            self.headers.clone(),
            url.to_string(),
            self.schema.clone(),
        )
    }

    /// Same as [`from`](Self::from).
    pub fn table(&self, table: &str) -> QueryBuilder {
        self.from(table)
    }

    /// Call a Postgres function: `POST {rest_url}/rpc/{function}`.
    ///
    /// `params` must be a JSON object of named arguments, or `null` for none.
    pub fn rpc(&self, function: &str, params: JsonValue) -> Result<FilterBuilder, PostgrestError> {
        validate_identifier(function, "Function")?;

        let body = match params {
            JsonValue::Object(map) => {
                for key in map.keys() {
                    validate_identifier(key, "Parameter")?;
                }
                JsonValue::Object(map)
            }
            JsonValue::Null => JsonValue::Object(serde_json::Map::new()),
            _ => {
                return Err(PostgrestError::query_builder(
                    "RPC arguments must be a JSON object or null",
                ))
            }
        };

        let mut parts = RequestParts::new(Operation::Rpc, Method::POST);
        parts.body = Some(body);

        Ok(FilterBuilder::new(
            self.http.clone(),
            self.headers.clone(),
            format!("{}/rpc/{}", self.rest_url, function),
            self.schema.clone(),
            parts,
        ))
    }
}
