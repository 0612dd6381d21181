use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value as JsonValue;
use supabase_client_core::DEFAULT_SCHEMA;

use crate::error::PostgrestError;
use crate::types::{Operation, RequestParts};

/// A fully rendered PostgREST request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<JsonValue>,
}

/// Build the query string, headers and body PostgREST expects for `parts`
/// sent to `url`.
pub fn build_postgrest_request(
    url: &str,
    parts: &RequestParts,
    schema: &str,
) -> Result<RenderedRequest, PostgrestError> {
    let mut query = Vec::new();
    let mut headers = HeaderMap::new();

    if let Some(ref cols) = parts.select {
        // PostgREST rejects whitespace between column names
        let cleaned = cols
            .split(',')
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        query.push(("select".to_string(), cleaned));
    }

    query.extend(parts.filters.iter().map(|f| f.to_query_pair()));

    if !parts.orders.is_empty() {
        let order = parts
            .orders
            .iter()
            .map(|o| o.render())
            .collect::<Vec<_>>()
            .join(",");
        query.push(("order".to_string(), order));
    }
    if let Some(limit) = parts.limit {
        query.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(offset) = parts.offset {
        query.push(("offset".to_string(), offset.to_string()));
    }
    if let Some(ref columns) = parts.on_conflict {
        query.push(("on_conflict".to_string(), columns.clone()));
    }

    if parts.single {
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.pgrst.object+json"),
        );
    }

    if parts.body.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    let prefer = prefer_header(parts);
    if !prefer.is_empty() {
        headers.insert("Prefer", header_value(&prefer.join(","))?);
    }

    // Schema selection
    if schema != DEFAULT_SCHEMA {
        let profile = if parts.method == Method::GET || parts.method == Method::HEAD {
            "Accept-Profile"
        } else {
            "Content-Profile"
        };
        headers.insert(profile, header_value(schema)?);
    }

    Ok(RenderedRequest {
        method: parts.method.clone(),
        url: url.to_string(),
        query,
        headers,
        body: parts.body.clone(),
    })
}

/// Compose the `Prefer` header fragments (resolution, return, count).
fn prefer_header(parts: &RequestParts) -> Vec<&'static str> {
    let mut prefer = Vec::new();
    if parts.operation == Operation::Upsert {
        if parts.ignore_duplicates {
            prefer.push("resolution=ignore-duplicates");
        } else {
            prefer.push("resolution=merge-duplicates");
        }
    }
    match parts.operation {
        Operation::Insert | Operation::Upsert | Operation::Update | Operation::Delete => {
            prefer.push("return=representation");
        }
        Operation::Select | Operation::Rpc => {}
    }
    if let Some(count) = parts.count.prefer() {
        prefer.push(count);
    }
    prefer
}

fn header_value(value: &str) -> Result<HeaderValue, PostgrestError> {
    HeaderValue::from_str(value)
        .map_err(|e| PostgrestError::query_builder(format!("Invalid header value {value:?}: {e}")))
}
