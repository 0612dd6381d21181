use std::collections::HashMap;

use serde_json::Value as JsonValue;
use supabase_client_auth::{AuthClient, AuthClientOptions, AuthResponse};
use supabase_client_core::{auth_headers, validate, ClientOptions, Endpoints};
use supabase_client_functions::FunctionsClient;
use supabase_client_query::{FilterBuilder, PostgrestClient, QueryBuilder};
use supabase_client_storage::StorageClient;
use tracing::debug;

use crate::error::{SupabaseError, SupabaseResult};
use crate::realtime::RealtimeHandle;

/// Create a client for the project at `supabase_url`.
///
/// Shorthand for [`Client::new`].
///
/// # Example
/// ```ignore
/// use supabase_client::{create_client, ClientOptions};
///
/// let client = create_client(
///     "https://xyz.supabase.co",
///     &std::env::var("SUPABASE_ANON_KEY")?,
///     ClientOptions::default(),
/// )?;
/// let countries = client.table("countries").select("*").execute().await?;
/// ```
pub fn create_client(
    supabase_url: &str,
    supabase_key: &str,
    options: ClientOptions,
) -> SupabaseResult<Client> {
    Client::new(supabase_url, supabase_key, options)
}

/// One entry point to a Supabase project's auth, database, storage and
/// functions services.
///
/// The database and storage sub-clients keep the headers they were built
/// with; [`set_session`](Self::set_session) re-authenticates the database
/// client only. [`functions`](Self::functions) builds a fresh client from the
/// current session on every call.
#[derive(Debug)]
pub struct Client {
    supabase_url: String,
    supabase_key: String,
    schema: String,
    endpoints: Endpoints,
    auth: AuthClient,
    postgrest: PostgrestClient,
    storage: StorageClient,
    realtime: RealtimeHandle,
}

impl Client {
    /// Validate the connection parameters, derive the service endpoints and
    /// build every sub-client. No request is made.
    pub fn new(
        supabase_url: &str,
        supabase_key: &str,
        options: ClientOptions,
    ) -> SupabaseResult<Self> {
        validate(supabase_url, supabase_key)?;
        let endpoints = Endpoints::derive(supabase_url);

        let auth = AuthClient::new(
            endpoints.auth(),
            supabase_key,
            AuthClientOptions::from(&options),
        )?;
        debug!(url = endpoints.auth(), "Initialized auth client");

        let access_token = auth.get_session().map(|s| s.access_token.clone());
        let bearer = access_token.as_deref().unwrap_or(supabase_key);

        let mut rest_headers = options.headers.clone();
        rest_headers.extend(auth_headers(supabase_key, access_token.as_deref()));
        let mut postgrest = PostgrestClient::new(
            endpoints.rest(),
            &rest_headers,
            &options.schema,
            options.postgrest_client_timeout,
        )?;
        postgrest.auth(bearer)?;
        debug!(url = endpoints.rest(), schema = %options.schema, "Initialized PostgREST client");

        let storage = StorageClient::new(
            endpoints.storage(),
            &auth_headers(supabase_key, access_token.as_deref()),
            options.storage_client_timeout,
        )?;
        debug!(url = endpoints.storage(), "Initialized storage client");

        let realtime = RealtimeHandle::Unsupported {
            url: endpoints.realtime().to_string(),
        };

        Ok(Self {
            supabase_url: supabase_url.to_string(),
            supabase_key: supabase_key.to_string(),
            schema: options.schema,
            endpoints,
            auth,
            postgrest,
            storage,
            realtime,
        })
    }

    // ─── Session ───────────────────────────────────────────────

    /// Install a session and make later database calls use its token.
    ///
    /// An expired access token is refreshed first; the refreshed token is the
    /// one the database client receives, not the `access_token` argument.
    pub async fn set_session(
        &mut self,
        access_token: &str,
        refresh_token: &str,
    ) -> SupabaseResult<AuthResponse> {
        let response = self.auth.set_session(access_token, refresh_token).await?;
        let token = response
            .session
            .as_ref()
            .map(|s| s.access_token.as_str())
            .unwrap_or(access_token);
        self.postgrest.auth(token)?;
        debug!("Session installed, PostgREST client re-authenticated");
        Ok(response)
    }

    /// `{apiKey, Authorization}` for the current session, or for the raw key
    /// when there is none.
    pub fn auth_headers(&self) -> HashMap<String, String> {
        let token = self.auth.get_session().map(|s| s.access_token.as_str());
        auth_headers(&self.supabase_key, token)
    }

    // ─── Sub-clients ───────────────────────────────────────────

    /// A functions client carrying the current auth headers.
    pub fn functions(&self) -> SupabaseResult<FunctionsClient> {
        Ok(FunctionsClient::new(
            self.endpoints.functions(),
            &self.auth_headers(),
        )?)
    }

    /// Start a query on a table or view.
    pub fn table(&self, table_name: &str) -> QueryBuilder {
        self.postgrest.from(table_name)
    }

    /// Same as [`table`](Self::table).
    pub fn from_(&self, table_name: &str) -> QueryBuilder {
        self.postgrest.from(table_name)
    }

    /// Call a Postgres function. `params` is a JSON object or `null`.
    pub fn rpc(&self, function: &str, params: JsonValue) -> SupabaseResult<FilterBuilder> {
        Ok(self.postgrest.rpc(function, params)?)
    }

    /// Always fails: realtime channels are not supported.
    pub fn realtime(&self) -> SupabaseResult<&RealtimeHandle> {
        match &self.realtime {
            RealtimeHandle::Unsupported { url } => {
                Err(SupabaseError::RealtimeUnsupported { url: url.clone() })
            }
        }
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Mutable access for sign-in, refresh and sign-out.
    ///
    /// Sessions installed this way do not re-authenticate the database
    /// client; use [`set_session`](Self::set_session) for that.
    pub fn auth_mut(&mut self) -> &mut AuthClient {
        &mut self.auth
    }

    pub fn postgrest(&self) -> &PostgrestClient {
        &self.postgrest
    }

    pub fn storage(&self) -> &StorageClient {
        &self.storage
    }

    // ─── Configuration ─────────────────────────────────────────

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn supabase_url(&self) -> &str {
        &self.supabase_url
    }

    pub fn supabase_key(&self) -> &str {
        &self.supabase_key
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}
