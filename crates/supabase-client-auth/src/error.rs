use serde::Deserialize;
use std::fmt;
use supabase_client_core::InvalidConfiguration;

/// GoTrue error body. Different endpoints fill different fields.
#[derive(Debug, Clone, Deserialize)]
pub struct GoTrueErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl GoTrueErrorResponse {
    /// First present of `msg`, `message`, `error_description`, `error`.
    pub fn error_message(&self) -> String {
        [&self.msg, &self.message, &self.error_description, &self.error]
            .into_iter()
            .find_map(|field| field.as_deref())
            .unwrap_or("Unknown error")
            .to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from GoTrue.
    #[error("Auth API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_code: Option<AuthErrorCode>,
    },

    #[error("Invalid auth configuration: {0}")]
    InvalidConfig(String),

    /// No session is installed, or an expired token came without a refresh
    /// token.
    #[error("No active session")]
    NoSession,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl AuthError {
    /// Build an [`Api`](Self::Api) error from a failed response's body.
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<GoTrueErrorResponse>(body) {
            Ok(parsed) => AuthError::Api {
                status,
                message: parsed.error_message(),
                error_code: parsed.error_code.as_deref().map(AuthErrorCode::from),
            },
            Err(_) => AuthError::Api {
                status,
                message: format!("HTTP {}", status),
                error_code: None,
            },
        }
    }

    /// GoTrue's machine-readable code, when the server sent one.
    pub fn code(&self) -> Option<&AuthErrorCode> {
        match self {
            AuthError::Api { error_code, .. } => error_code.as_ref(),
            _ => None,
        }
    }
}

impl From<InvalidConfiguration> for AuthError {
    fn from(err: InvalidConfiguration) -> Self {
        AuthError::InvalidConfig(err.message().to_string())
    }
}

macro_rules! auth_error_codes {
    ($($variant:ident => $code:literal,)+) => {
        /// GoTrue `error_code` values this client distinguishes.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum AuthErrorCode {
            $($variant,)+
            Unknown(String),
        }

        impl AuthErrorCode {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => code.as_str(),
                }
            }
        }

        impl From<&str> for AuthErrorCode {
            fn from(s: &str) -> Self {
                match s {
                    $($code => Self::$variant,)+
                    other => Self::Unknown(other.to_string()),
                }
            }
        }
    };
}

auth_error_codes! {
    InvalidCredentials => "invalid_credentials",
    UserNotFound => "user_not_found",
    UserAlreadyExists => "user_already_exists",
    EmailNotConfirmed => "email_not_confirmed",
    SessionNotFound => "session_not_found",
    SessionExpired => "session_expired",
    RefreshTokenNotFound => "refresh_token_not_found",
    RefreshTokenAlreadyUsed => "refresh_token_already_used",
    BadJwt => "bad_jwt",
    WeakPassword => "weak_password",
    ValidationFailed => "validation_failed",
    OverRequestRateLimit => "over_request_rate_limit",
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
