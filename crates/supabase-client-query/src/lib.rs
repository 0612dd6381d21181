//! PostgREST query builder for Supabase.
//!
//! [`PostgrestClient`] targets a `/rest/v1` endpoint. `from(table)` returns a
//! [`QueryBuilder`]; its verbs return a [`FilterBuilder`] that accepts
//! filters ([`Filterable`]) and modifiers ([`Modifiable`]) before
//! `execute()`.

pub mod builder;
pub mod client;
pub mod error;
pub mod filter;
pub mod modifier;
pub mod postgrest;
pub mod postgrest_execute;
pub mod request;
pub mod types;

pub use builder::QueryBuilder;
pub use client::PostgrestClient;
pub use error::PostgrestError;
pub use filter::Filterable;
pub use modifier::Modifiable;
pub use postgrest::RenderedRequest;
pub use request::FilterBuilder;
pub use types::*;
