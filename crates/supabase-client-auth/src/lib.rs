//! Supabase Auth (GoTrue) HTTP client.
//!
//! Talks to the GoTrue REST endpoints under `/auth/v1/...` and keeps the
//! current session, optionally persisted in a pluggable
//! [`SessionStorage`](supabase_client_core::SessionStorage) backend.
//!
//! # Usage
//!
//! ```ignore
//! use supabase_client_auth::{AuthClient, AuthClientOptions};
//!
//! let mut auth = AuthClient::new(
//!     "https://your-project.supabase.co/auth/v1",
//!     "your-anon-key",
//!     AuthClientOptions::default(),
//! )?;
//!
//! let response = auth.set_session(&access_token, &refresh_token).await?;
//! let user = auth.get_user(&access_token).await?;
//! auth.sign_out().await?;
//! ```

pub mod client;
pub mod error;
pub mod jwt;
pub mod types;

pub use client::{AuthClient, AuthClientOptions, DEFAULT_STORAGE_KEY};
pub use error::{AuthError, AuthErrorCode, GoTrueErrorResponse};
pub use types::*;
