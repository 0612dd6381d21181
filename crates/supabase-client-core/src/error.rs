/// Raised when the project URL, API key or an option value is malformed.
///
/// Construction never proceeds past this error, so no sub-client exists when
/// it is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid configuration: {message}")]
pub struct InvalidConfiguration {
    message: String,
}

impl InvalidConfiguration {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable reason, without the `Invalid configuration:` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}
