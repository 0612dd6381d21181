//! Supabase Edge Functions HTTP client.
//!
//! [`FunctionsClient`] invokes functions served under a functions endpoint:
//! `https://<project>.functions.supabase.co` on managed hosting, or
//! `<base>/functions/v1` when self-hosted.

pub mod client;
pub mod error;
pub mod types;

pub use client::FunctionsClient;
pub use error::{FunctionsApiErrorResponse, FunctionsError};
pub use types::*;
