use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use supabase_client_core::to_header_map;
use tracing::debug;

use crate::error::{FunctionsApiErrorResponse, FunctionsError};
use crate::types::*;

/// HTTP client for Supabase Edge Functions.
///
/// # Example
/// ```ignore
/// use supabase_client_functions::{FunctionsClient, InvokeOptions};
/// use serde_json::json;
///
/// let client = FunctionsClient::new("https://your-project.functions.supabase.co", &headers)?;
/// let response = client
///     .invoke("hello", InvokeOptions::new().body(json!({"name": "World"})))
///     .await?;
/// let data: serde_json::Value = response.json()?;
/// ```
#[derive(Debug, Clone)]
pub struct FunctionsClient {
    http: reqwest::Client,
    url: String,
    headers: HeaderMap,
}

impl FunctionsClient {
    /// Create a client for `functions_url`, the endpoint functions are
    /// served under.
    pub fn new(
        functions_url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Self, FunctionsError> {
        let http = reqwest::Client::builder().build()?;
        let url = functions_url.trim_end_matches('/').to_string();

        debug!(url = %url, "Created functions client");

        Ok(Self {
            http,
            url,
            headers: to_header_map(headers)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers sent with every invocation.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Use `token` as the bearer token for later invocations.
    pub fn set_auth(&mut self, token: &str) -> Result<(), FunctionsError> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| FunctionsError::InvalidConfig(format!("Invalid access token: {}", e)))?;
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    /// Invoke an Edge Function.
    ///
    /// # Errors
    /// * [`FunctionsError::InvalidFunctionName`] for an empty or path-like name.
    /// * [`FunctionsError::RelayError`] if the relay failed (`x-relay-error: true`).
    /// * [`FunctionsError::HttpError`] if the function returned a non-2xx status.
    /// * [`FunctionsError::Http`] on network failure.
    pub async fn invoke(
        &self,
        function_name: &str,
        options: InvokeOptions,
    ) -> Result<FunctionResponse, FunctionsError> {
        if function_name.is_empty() || function_name.contains(['/', '?', '#']) {
            return Err(FunctionsError::InvalidFunctionName(function_name.to_string()));
        }

        let url = format!("{}/{}", self.url, function_name);
        debug!(function = function_name, method = %options.method, "Invoking edge function");

        let mut headers = self.headers.clone();
        if let Some(ref region) = options.region {
            headers.insert("x-region", header_value("x-region", region)?);
        }

        let mut request = self.http.request(options.method, &url);
        request = match options.body {
            InvokeBody::Json(value) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                request.body(serde_json::to_vec(&value)?)
            }
            InvokeBody::Bytes(bytes) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
                request.body(bytes)
            }
            InvokeBody::Text(text) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
                request.body(text)
            }
            InvokeBody::None => request,
        };

        // Per-call headers win over everything above
        for (key, value) in &options.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                FunctionsError::InvalidConfig(format!("Invalid header name '{}': {}", key, e))
            })?;
            headers.insert(name, header_value(key, value)?);
        }

        let response = request.headers(headers).send().await?;

        let status = response.status().as_u16();
        let is_relay_error = response
            .headers()
            .get("x-relay-error")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        let resp_headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await?.to_vec();

        if is_relay_error {
            let message = parse_error_message(&body);
            debug!(status, message = %message, "Relay error from edge function");
            return Err(FunctionsError::RelayError { status, message });
        }

        if status >= 400 {
            let message = parse_error_message(&body);
            debug!(status, message = %message, "HTTP error from edge function");
            return Err(FunctionsError::HttpError { status, message });
        }

        Ok(FunctionResponse::new(status, resp_headers, body))
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, FunctionsError> {
    HeaderValue::from_str(value).map_err(|e| {
        FunctionsError::InvalidConfig(format!("Invalid header value for '{}': {}", name, e))
    })
}

/// Error message from a JSON error body, else the body as text.
fn parse_error_message(body: &[u8]) -> String {
    if let Ok(api_err) = serde_json::from_slice::<FunctionsApiErrorResponse>(body) {
        return api_err.error_message();
    }
    String::from_utf8_lossy(body).into_owned()
}
