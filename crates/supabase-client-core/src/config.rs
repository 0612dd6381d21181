use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::session_storage::{MemoryStorage, SessionStorage};

/// Default timeout for PostgREST requests.
pub const DEFAULT_POSTGREST_CLIENT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default timeout for storage requests.
pub const DEFAULT_STORAGE_CLIENT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default database schema.
pub const DEFAULT_SCHEMA: &str = "public";

/// Header identifying this client library to the backend.
pub const CLIENT_INFO_HEADER: &str = "X-Client-Info";

/// Options for building a client.
///
/// Every field has a default, so `ClientOptions::default()` is a complete
/// configuration.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Database schema queries run against (defaults to "public")
    pub schema: String,
    /// Extra headers sent by the auth and database clients
    pub headers: HashMap<String, String>,
    /// Refresh an expired session's token automatically
    pub auto_refresh_token: bool,
    /// Save the session in `storage`
    pub persist_session: bool,
    /// Where the session is persisted
    pub storage: Arc<dyn SessionStorage>,
    pub postgrest_client_timeout: Duration,
    pub storage_client_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            headers: default_headers(),
            auto_refresh_token: true,
            persist_session: true,
            storage: Arc::new(MemoryStorage::new()),
            postgrest_client_timeout: DEFAULT_POSTGREST_CLIENT_TIMEOUT,
            storage_client_timeout: DEFAULT_STORAGE_CLIENT_TIMEOUT,
        }
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Add (or replace) a single extra header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add several extra headers, replacing any with the same name.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn auto_refresh_token(mut self, enabled: bool) -> Self {
        self.auto_refresh_token = enabled;
        self
    }

    pub fn persist_session(mut self, enabled: bool) -> Self {
        self.persist_session = enabled;
        self
    }

    /// Use a custom session storage backend.
    pub fn storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = storage;
        self
    }

    pub fn postgrest_client_timeout(mut self, timeout: Duration) -> Self {
        self.postgrest_client_timeout = timeout;
        self
    }

    pub fn storage_client_timeout(mut self, timeout: Duration) -> Self {
        self.storage_client_timeout = timeout;
        self
    }
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([(
        CLIENT_INFO_HEADER.to_string(),
        format!("supabase-rs/{}", env!("CARGO_PKG_VERSION")),
    )])
}
