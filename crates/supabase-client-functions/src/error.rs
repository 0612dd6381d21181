use serde::Deserialize;
use supabase_client_core::InvalidConfiguration;

/// Error response format from Supabase Edge Functions.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionsApiErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FunctionsApiErrorResponse {
    /// Extract the most informative error message from the response.
    pub fn error_message(&self) -> String {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("Unknown error")
            .to_string()
    }
}

/// Edge Functions-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum FunctionsError {
    /// HTTP transport error from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The function answered with a non-2xx status.
    #[error("Functions HTTP error ({status}): {message}")]
    HttpError { status: u16, message: String },

    /// The relay in front of the function failed (`x-relay-error: true`).
    #[error("Functions relay error ({status}): {message}")]
    RelayError { status: u16, message: String },

    /// Empty or malformed function name.
    #[error("Invalid function name: {0:?}")]
    InvalidFunctionName(String),

    /// Invalid configuration (bad header or token).
    #[error("Invalid functions configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InvalidConfiguration> for FunctionsError {
    fn from(err: InvalidConfiguration) -> Self {
        FunctionsError::InvalidConfig(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FunctionsError::HttpError {
            status: 400,
            message: "Bad Request".into(),
        };
        assert_eq!(err.to_string(), "Functions HTTP error (400): Bad Request");

        let err = FunctionsError::RelayError {
            status: 502,
            message: "Function not found".into(),
        };
        assert_eq!(err.to_string(), "Functions relay error (502): Function not found");

        let err = FunctionsError::InvalidFunctionName(String::new());
        assert_eq!(err.to_string(), "Invalid function name: \"\"");
    }

    #[test]
    fn api_error_response_message_priority() {
        let resp: FunctionsApiErrorResponse =
            serde_json::from_str(r#"{"error":"not_found","message":"Function not found"}"#).unwrap();
        assert_eq!(resp.error_message(), "Function not found");

        let resp: FunctionsApiErrorResponse =
            serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(resp.error_message(), "boom");

        let resp: FunctionsApiErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.error_message(), "Unknown error");
    }
}
