//! Shared building blocks for the Supabase client crates.
//!
//! Holds the pieces every sub-client agrees on: connection validation,
//! endpoint derivation, the auth header shape, client options and the
//! session storage trait.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod headers;
pub mod session_storage;
pub mod validate;

pub use config::{
    ClientOptions, CLIENT_INFO_HEADER, DEFAULT_POSTGREST_CLIENT_TIMEOUT, DEFAULT_SCHEMA,
    DEFAULT_STORAGE_CLIENT_TIMEOUT,
};
pub use endpoints::{Endpoints, MANAGED_DOMAINS};
pub use error::InvalidConfiguration;
pub use headers::{auth_headers, to_header_map, API_KEY_HEADER, AUTHORIZATION_HEADER};
pub use session_storage::{MemoryStorage, SessionStorage};
pub use validate::{is_valid_api_key, is_valid_url, validate};
