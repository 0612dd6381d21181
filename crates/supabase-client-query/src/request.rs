use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::error::PostgrestError;
use crate::filter::Filterable;
use crate::modifier::Modifiable;
use crate::postgrest::{build_postgrest_request, RenderedRequest};
use crate::postgrest_execute::execute_rest;
use crate::types::{PostgrestResponse, RequestParts};

/// A PostgREST request under construction.
///
/// Returned by the [`QueryBuilder`](crate::QueryBuilder) verbs and by
/// [`PostgrestClient::rpc`](crate::PostgrestClient::rpc). Chain filters
/// ([`Filterable`]) and modifiers ([`Modifiable`]), then call
/// [`execute`](Self::execute).
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    http: reqwest::Client,
    headers: HeaderMap,
    url: String,
    schema: String,
    parts: RequestParts,
}

impl FilterBuilder {
    pub(crate) fn new(
        http: reqwest::Client,
        headers: HeaderMap,
        url: String,
        schema: String,
        parts: RequestParts,
    ) -> Self {
        Self {
            http,
            headers,
            url,
            schema,
            parts,
        }
    }

    /// Upsert: the columns of the unique constraint to resolve conflicts on.
    pub fn on_conflict(mut self, columns: &str) -> Self {
        self.parts.on_conflict = Some(columns.to_string());
        self
    }

    /// Upsert: keep existing rows instead of merging into them.
    pub fn ignore_duplicates(mut self) -> Self {
        self.parts.ignore_duplicates = true;
        self
    }

    /// Fetch only the count (`HEAD` instead of `GET`). No effect on writes.
    pub fn head(mut self) -> Self {
        if self.parts.method == Method::GET {
            self.parts.method = Method::HEAD;
        }
        self
    }

    pub fn parts(&self) -> &RequestParts {
        &self.parts
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Render without sending.
    pub fn build(&self) -> Result<RenderedRequest, PostgrestError> {
        build_postgrest_request(&self.url, &self.parts, &self.schema)
    }

    /// Send the request.
    pub async fn execute(self) -> Result<PostgrestResponse, PostgrestError> {
        let request = self.build()?;
        execute_rest(&self.http, &self.headers, request).await
    }
}

impl Filterable for FilterBuilder {
    fn parts_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }
}

impl Modifiable for FilterBuilder {}
