//! Supabase Storage HTTP client.
//!
//! Talks to the Storage REST endpoints under `/storage/v1/...`: bucket
//! management on [`StorageClient`] and object operations on
//! [`StorageBucketApi`].

pub mod bucket_api;
pub mod client;
pub mod error;
pub mod types;

pub use bucket_api::StorageBucketApi;
pub use client::StorageClient;
pub use error::{StorageApiErrorResponse, StorageError};
pub use types::*;
