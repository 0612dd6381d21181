use supabase_client_core::InvalidConfiguration;

/// PostgREST-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum PostgrestError {
    /// HTTP transport error from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PostgREST answered with an error body.
    #[error("PostgREST error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<String>,
        hint: Option<String>,
    },

    /// Invalid configuration (bad header or URL).
    #[error("Invalid PostgREST configuration: {0}")]
    InvalidConfig(String),

    /// A builder was given something PostgREST cannot express.
    #[error("Query builder error: {0}")]
    QueryBuilder(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PostgrestError {
    pub(crate) fn query_builder(message: impl Into<String>) -> Self {
        Self::QueryBuilder(message.into())
    }

    /// The PostgreSQL / PostgREST error code (e.g. `"42P01"`), if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<InvalidConfiguration> for PostgrestError {
    fn from(err: InvalidConfiguration) -> Self {
        PostgrestError::InvalidConfig(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = PostgrestError::Api {
            status: 404,
            message: "relation \"public.missing\" does not exist".into(),
            code: Some("42P01".into()),
            details: None,
            hint: None,
        };
        assert_eq!(
            err.to_string(),
            "PostgREST error (404): relation \"public.missing\" does not exist"
        );
        assert_eq!(err.code(), Some("42P01"));
    }

    #[test]
    fn config_error_from_core() {
        let err: PostgrestError = InvalidConfiguration::new("Invalid header name 'a b'").into();
        assert!(matches!(err, PostgrestError::InvalidConfig(ref m) if m.contains("a b")));
        assert_eq!(err.code(), None);
    }
}
