use serde::Deserialize;
use serde_json::Value as JsonValue;
use supabase_client_core::InvalidConfiguration;

/// Error body returned by the Storage API.
///
/// `statusCode` arrives as a string from most deployments and as a number
/// from some self-hosted versions; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageApiErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "statusCode")]
    status_code: Option<JsonValue>,
}

impl StorageApiErrorResponse {
    /// `message`, else `error`, else "Unknown error".
    pub fn error_message(&self) -> String {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("Unknown error")
            .to_string()
    }

    /// The `statusCode` field as text, whichever JSON type it came in.
    pub fn status_code(&self) -> Option<String> {
        match self.status_code.as_ref()? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the Storage API.
    #[error("Storage API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Bad endpoint URL or header value.
    #[error("Invalid storage configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl StorageError {
    /// Build an [`Api`](Self::Api) error from a failed response's body.
    ///
    /// A body that is not a Storage error object yields `HTTP <status>`.
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<StorageApiErrorResponse>(body) {
            Ok(parsed) => parsed.error_message(),
            Err(_) => format!("HTTP {}", status),
        };
        StorageError::Api { status, message }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            StorageError::Api { status, .. } => Some(*status),
            StorageError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<InvalidConfiguration> for StorageError {
    fn from(err: InvalidConfiguration) -> Self {
        StorageError::InvalidConfig(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_message_wins_over_error_field() {
        let err = StorageError::from_response_body(
            404,
            r#"{"statusCode":"404","error":"not_found","message":"Bucket not found"}"#,
        );
        assert_eq!(err.to_string(), "Storage API error (404): Bucket not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn error_field_used_without_message() {
        let err = StorageError::from_response_body(409, r#"{"error":"Duplicate"}"#);
        assert!(matches!(err, StorageError::Api { status: 409, ref message } if message == "Duplicate"));
    }

    #[test]
    fn non_json_body() {
        let err = StorageError::from_response_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Storage API error (502): HTTP 502");
    }

    #[test]
    fn numeric_and_string_status_codes() {
        let text: StorageApiErrorResponse =
            serde_json::from_str(r#"{"statusCode":"400","message":"x"}"#).unwrap();
        let number: StorageApiErrorResponse =
            serde_json::from_str(r#"{"statusCode":400,"message":"x"}"#).unwrap();
        assert_eq!(text.status_code().as_deref(), Some("400"));
        assert_eq!(number.status_code().as_deref(), Some("400"));

        let empty: StorageApiErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.status_code(), None);
        assert_eq!(empty.error_message(), "Unknown error");
    }

    #[test]
    fn core_config_error_message_is_kept() {
        let err: StorageError = InvalidConfiguration::new("Invalid header name 'x y'").into();
        assert_eq!(
            err.to_string(),
            "Invalid storage configuration: Invalid header name 'x y'"
        );
        assert_eq!(err.status(), None);
    }
}
