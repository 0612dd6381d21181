//! Supabase client for Rust.
//!
//! [`create_client`] validates the project URL and API key, derives every
//! service endpoint and returns a [`Client`] that owns the auth, database
//! (PostgREST) and storage sub-clients. Edge function clients are built on
//! demand so they always carry the current session.
//!
//! ```ignore
//! use supabase_client::prelude::*;
//!
//! let mut client = create_client(
//!     "https://your-project.supabase.co",
//!     "your-anon-key",
//!     ClientOptions::default(),
//! )?;
//!
//! client.set_session(&access_token, &refresh_token).await?;
//! let rows = client
//!     .table("countries")
//!     .select("id, name")
//!     .eq("continent", "Europe")
//!     .order("name", OrderDirection::Ascending)
//!     .execute()
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod realtime;

pub use client::{create_client, Client};
pub use error::{SupabaseError, SupabaseResult};
pub use realtime::RealtimeHandle;

pub use supabase_client_core::{
    ClientOptions, Endpoints, InvalidConfiguration, MemoryStorage, SessionStorage,
};

pub use supabase_client_auth;
pub use supabase_client_core;
pub use supabase_client_functions;
pub use supabase_client_query;
pub use supabase_client_storage;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use supabase_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{create_client, Client, RealtimeHandle, SupabaseError, SupabaseResult};

    pub use supabase_client_core::{ClientOptions, MemoryStorage, SessionStorage};

    pub use supabase_client_query::{
        CountOption, FilterBuilder, FilterOperator, Filterable, IsValue, Modifiable,
        NullsPosition, OrderDirection, PostgrestClient, PostgrestError, PostgrestResponse,
        QueryBuilder,
    };

    pub use supabase_client_auth::{AuthClient, AuthError, AuthResponse, Session, User};

    pub use supabase_client_storage::{
        Bucket, BucketOptions, FileObject, FileOptions, SearchOptions, StorageBucketApi,
        StorageClient, StorageError,
    };

    pub use supabase_client_functions::{
        FunctionResponse, FunctionsClient, FunctionsError, InvokeBody, InvokeOptions,
    };
}
