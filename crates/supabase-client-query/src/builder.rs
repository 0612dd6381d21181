use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value as JsonValue;

use crate::request::FilterBuilder;
use crate::types::{Operation, RequestParts};

/// Entry point query builder created by `client.from("table")`.
///
/// Snapshots the client's URL, headers and schema at creation. Call
/// `.select()`, `.insert()`, `.upsert()`, `.update()` or `.delete()` to get a
/// [`FilterBuilder`].
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    http: reqwest::Client,
    headers: HeaderMap,
    url: String,
    schema: String,
}

impl QueryBuilder {
    pub(crate) fn new(http: reqwest::Client, headers: HeaderMap, url: String, schema: String) -> Self {
        Self {
            http,
            headers,
            url,
            schema,
        }
    }

    /// `{rest_url}/{table}`
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Start a SELECT query.
    /// Pass column expressions like "name, country_id" or "*".
    pub fn select(self, columns: &str) -> FilterBuilder {
        let mut parts = RequestParts::new(Operation::Select, Method::GET);
        parts.select = Some(if columns.is_empty() { "*" } else { columns }.to_string());
        self.into_filter_builder(parts)
    }

    /// Insert one row (object) or several (array of objects).
    pub fn insert(self, values: JsonValue) -> FilterBuilder {
        let mut parts = RequestParts::new(Operation::Insert, Method::POST);
        parts.body = Some(values);
        self.into_filter_builder(parts)
    }

    /// Insert, merging into rows that already exist.
    pub fn upsert(self, values: JsonValue) -> FilterBuilder {
        let mut parts = RequestParts::new(Operation::Upsert, Method::POST);
        parts.body = Some(values);
        self.into_filter_builder(parts)
    }

    /// Update the rows matched by the filters that follow.
    pub fn update(self, values: JsonValue) -> FilterBuilder {
        let mut parts = RequestParts::new(Operation::Update, Method::PATCH);
        parts.body = Some(values);
        self.into_filter_builder(parts)
    }

    /// Delete the rows matched by the filters that follow.
    pub fn delete(self) -> FilterBuilder {
        let parts = RequestParts::new(Operation::Delete, Method::DELETE);
        self.into_filter_builder(parts)
    }

    fn into_filter_builder(self, parts: RequestParts) -> FilterBuilder {
        FilterBuilder::new(self.http, self.headers, self.url, self.schema, parts)
    }
}

/// Two builders are equal when they target the same table with the same
/// headers and schema; the underlying HTTP client is not compared.
impl PartialEq for QueryBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.headers == other.headers && self.schema == other.schema
    }
}
