use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use serde_json::Value as JsonValue;

use crate::error::PostgrestError;
use crate::postgrest::RenderedRequest;
use crate::types::PostgrestResponse;

/// Send a rendered PostgREST request and parse the response.
///
/// `client_headers` are the client-wide headers (apikey, Authorization,
/// custom headers); request-specific headers override them.
pub async fn execute_rest(
    http: &reqwest::Client,
    client_headers: &HeaderMap,
    request: RenderedRequest,
) -> Result<PostgrestResponse, PostgrestError> {
    let mut headers = client_headers.clone();
    headers.extend(request.headers);
    headers
        .entry(ACCEPT)
        .or_insert(HeaderValue::from_static("application/json"));

    tracing::debug!(
        method = %request.method,
        url = %request.url,
        "Executing PostgREST request"
    );

    let mut builder = http
        .request(request.method.clone(), &request.url)
        .headers(headers);
    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }
    if let Some(ref body) = request.body {
        builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let count = parse_count_from_headers(response.headers());

    // HEAD carries the count only
    if request.method == Method::HEAD {
        if status >= 400 {
            return Err(PostgrestError::Api {
                status,
                message: format!("HEAD request failed with status {}", status),
                code: None,
                details: None,
                hint: None,
            });
        }
        return Ok(PostgrestResponse {
            data: JsonValue::Null,
            count,
            status,
        });
    }

    let body_text = response.text().await?;

    if status >= 400 {
        return Err(parse_error_response(status, &body_text));
    }

    let data = if status == 204 || body_text.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_str(&body_text)?
    };

    Ok(PostgrestResponse {
        data,
        count,
        status,
    })
}

/// Total row count from a `Content-Range` header: `0-9/100` or `*/100`.
pub(crate) fn parse_count_from_headers(headers: &HeaderMap) -> Option<i64> {
    headers
        .get("content-range")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.rsplit_once('/'))
        .and_then(|(_, total)| total.parse::<i64>().ok())
}

/// PostgREST error format: `{ "message", "code", "details", "hint" }`.
pub(crate) fn parse_error_response(status: u16, body: &str) -> PostgrestError {
    let Ok(error_obj) = serde_json::from_str::<JsonValue>(body) else {
        return PostgrestError::Api {
            status,
            message: body.to_string(),
            code: None,
            details: None,
            hint: None,
        };
    };

    let field = |name: &str| {
        error_obj
            .get(name)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    };

    PostgrestError::Api {
        status,
        message: field("message").unwrap_or_else(|| "Unknown error".to_string()),
        code: field("code"),
        details: field("details"),
        hint: field("hint"),
    }
}
