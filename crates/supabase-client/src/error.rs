use supabase_client_auth::AuthError;
use supabase_client_core::InvalidConfiguration;
use supabase_client_functions::FunctionsError;
use supabase_client_query::PostgrestError;
use supabase_client_storage::StorageError;

/// Every error the client can return.
///
/// Sub-client errors are wrapped unmodified; their messages pass through.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// Empty or malformed URL or API key.
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfiguration),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Postgrest(#[from] PostgrestError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Functions(#[from] FunctionsError),

    /// Realtime subscriptions are not available from this client.
    #[error("Realtime is not supported by this client (endpoint {url})")]
    RealtimeUnsupported { url: String },
}

pub type SupabaseResult<T> = Result<T, SupabaseError>;
