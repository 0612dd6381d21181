use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::json;
use supabase_client_core::{to_header_map, ClientOptions, MemoryStorage, SessionStorage};
use tracing::{debug, warn};
use url::Url;

use crate::error::AuthError;
use crate::jwt;
use crate::types::*;

/// Storage key the session is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "supabase.auth.token";

/// Session handling options for [`AuthClient`].
#[derive(Debug, Clone)]
pub struct AuthClientOptions {
    /// Extra headers sent with every auth request
    pub headers: HashMap<String, String>,
    /// Refresh an expired session in [`AuthClient::refresh_if_expired`]
    pub auto_refresh_token: bool,
    /// Save sessions in `storage` and restore them on construction
    pub persist_session: bool,
    pub storage: Arc<dyn SessionStorage>,
    pub storage_key: String,
}

impl Default for AuthClientOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            auto_refresh_token: true,
            persist_session: true,
            storage: Arc::new(MemoryStorage::new()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl From<&ClientOptions> for AuthClientOptions {
    fn from(options: &ClientOptions) -> Self {
        Self {
            headers: options.headers.clone(),
            auto_refresh_token: options.auto_refresh_token,
            persist_session: options.persist_session,
            storage: Arc::clone(&options.storage),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// HTTP client for the Supabase GoTrue auth API that also tracks the
/// current session.
///
/// Methods that install or drop a session take `&mut self`.
///
/// # Example
/// ```ignore
/// use supabase_client_auth::{AuthClient, AuthClientOptions};
///
/// let mut auth = AuthClient::new(
///     "https://your-project.supabase.co/auth/v1",
///     "your-anon-key",
///     AuthClientOptions::default(),
/// )?;
/// auth.sign_in_with_password_email("user@example.com", "password").await?;
/// let token = auth.get_session().map(|s| s.access_token.clone());
/// ```
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    auto_refresh_token: bool,
    persist_session: bool,
    storage: Arc<dyn SessionStorage>,
    storage_key: String,
    session: Option<Session>,
}

impl AuthClient {
    /// Create a new auth client.
    ///
    /// `auth_url` is the auth endpoint itself (e.g.
    /// `https://your-project.supabase.co/auth/v1`). With `persist_session`
    /// on, a session saved earlier in the storage backend is restored; this
    /// is a local lookup and makes no request.
    pub fn new(
        auth_url: &str,
        api_key: &str,
        options: AuthClientOptions,
    ) -> Result<Self, AuthError> {
        let base_url = Url::parse(auth_url.trim_end_matches('/'))?;

        let mut default_headers = to_header_map(&options.headers)?;
        default_headers.insert(
            "apikey",
            HeaderValue::from_str(api_key)
                .map_err(|e| AuthError::InvalidConfig(format!("Invalid API key header: {}", e)))?,
        );
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(AuthError::Http)?;

        let session = if options.persist_session {
            load_persisted_session(options.storage.as_ref(), &options.storage_key)
        } else {
            None
        };

        debug!(url = %base_url, restored_session = session.is_some(), "Created auth client");

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
            auto_refresh_token: options.auto_refresh_token,
            persist_session: options.persist_session,
            storage: options.storage,
            storage_key: options.storage_key,
            session,
        })
    }

    /// Get the base URL for the auth API.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    // ─── Session State ─────────────────────────────────────────

    /// The current session, if any. Local only; never refreshes.
    pub fn get_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Install a session from an access token and refresh token.
    ///
    /// A still-valid access token is checked against `GET /user` and
    /// installed as given. An expired or undecodable one is exchanged for a
    /// new session using `refresh_token`.
    ///
    /// Mirrors `supabase.auth.setSession({ access_token, refresh_token })`.
    pub async fn set_session(
        &mut self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<AuthResponse, AuthError> {
        let now = Utc::now().timestamp();
        let valid_until = jwt::expires_at(access_token).filter(|exp| *exp > now);

        let Some(expires_at) = valid_until else {
            if refresh_token.is_empty() {
                return Err(AuthError::NoSession);
            }
            let session = self.refresh_session(refresh_token).await?;
            let user = session.user.clone();
            return Ok(AuthResponse {
                session: Some(session),
                user: Some(user),
            });
        };

        let user = self.get_user(access_token).await?;
        let session = Session {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            expires_in: expires_at - now,
            expires_at: Some(expires_at),
            token_type: "bearer".to_string(),
            user: user.clone(),
        };
        self.save_session(session.clone())?;

        Ok(AuthResponse {
            session: Some(session),
            user: Some(user),
        })
    }

    /// Exchange a refresh token for a new session and install it.
    ///
    /// Mirrors `supabase.auth.refreshSession()`.
    pub async fn refresh_session(&mut self, refresh_token: &str) -> Result<Session, AuthError> {
        let body = json!({
            "refresh_token": refresh_token,
        });

        let url = self.url("/token?grant_type=refresh_token");
        let resp = self.http.post(url).json(&body).send().await?;
        let session = self.handle_session_response(resp).await?;
        self.save_session(session.clone())?;
        Ok(session)
    }

    /// Refresh the current session if it has expired and
    /// `auto_refresh_token` is on. Returns the session in effect afterwards.
    pub async fn refresh_if_expired(&mut self) -> Result<Option<Session>, AuthError> {
        let refresh_token = match &self.session {
            Some(session) if self.auto_refresh_token && session.is_expired() => {
                session.refresh_token.clone()
            }
            _ => return Ok(self.session.clone()),
        };
        debug!("Access token expired, refreshing session");
        self.refresh_session(&refresh_token).await.map(Some)
    }

    // ─── Sign Up / Sign In ─────────────────────────────────────

    /// Sign up a new user with email and password.
    ///
    /// When email confirmation is off, GoTrue returns a session right away
    /// and it is installed.
    pub async fn sign_up_with_email(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let body = json!({
            "email": email,
            "password": password,
        });

        let url = self.url("/signup");
        let resp = self.http.post(url).json(&body).send().await?;
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(parse_error(status, resp).await);
        }

        let text = resp.text().await?;
        let response = match serde_json::from_str::<Session>(&text) {
            Ok(session) => AuthResponse {
                user: Some(session.user.clone()),
                session: Some(session),
            },
            Err(_) => AuthResponse {
                session: None,
                user: Some(serde_json::from_str::<User>(&text)?),
            },
        };

        if let Some(session) = &response.session {
            self.save_session(session.clone())?;
        }
        Ok(response)
    }

    /// Sign in with email and password and install the returned session.
    ///
    /// Mirrors `supabase.auth.signInWithPassword({ email, password })`.
    pub async fn sign_in_with_password_email(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let body = json!({
            "email": email,
            "password": password,
        });

        let url = self.url("/token?grant_type=password");
        let resp = self.http.post(url).json(&body).send().await?;
        let session = self.handle_session_response(resp).await?;
        self.save_session(session.clone())?;
        Ok(session)
    }

    // ─── User ──────────────────────────────────────────────────

    /// Get the user associated with an access token.
    ///
    /// Mirrors `supabase.auth.getUser(jwt)`.
    pub async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = self.url("/user");
        let resp = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(parse_error(status, resp).await);
        }
        Ok(resp.json().await?)
    }

    // ─── Sign Out ──────────────────────────────────────────────

    /// Sign out the current session (global scope).
    ///
    /// The local and persisted session are dropped even when the logout
    /// request fails; the request's error is still returned.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.sign_out_with_scope(SignOutScope::Global).await
    }

    /// Sign out with a specific scope.
    pub async fn sign_out_with_scope(&mut self, scope: SignOutScope) -> Result<(), AuthError> {
        let Some(session) = self.remove_session() else {
            return Ok(());
        };

        let url = self.url(&format!("/logout?scope={}", scope));
        let resp = self
            .http
            .post(url)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(parse_error(status, resp).await);
        }
        Ok(())
    }

    // ─── Internal Helpers ──────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let current = url.path().trim_end_matches('/').to_string();
        // path may contain query string (e.g. "/token?grant_type=password")
        if let Some(query_start) = path.find('?') {
            url.set_path(&format!("{}{}", current, &path[..query_start]));
            url.set_query(Some(&path[query_start + 1..]));
        } else {
            url.set_path(&format!("{}{}", current, path));
        }
        url
    }

    fn save_session(&mut self, session: Session) -> Result<(), AuthError> {
        if self.persist_session {
            let serialized = serde_json::to_string(&session)?;
            self.storage.set_item(&self.storage_key, serialized);
        }
        self.session = Some(session);
        Ok(())
    }

    fn remove_session(&mut self) -> Option<Session> {
        if self.persist_session {
            self.storage.remove_item(&self.storage_key);
        }
        self.session.take()
    }

    async fn handle_session_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<Session, AuthError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(parse_error(status, resp).await);
        }

        let session: Session = resp.json().await?;
        Ok(session)
    }
}

fn load_persisted_session(storage: &dyn SessionStorage, key: &str) -> Option<Session> {
    let raw = storage.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(key, error = %e, "Ignoring unreadable persisted session");
            None
        }
    }
}

async fn parse_error(status: u16, resp: reqwest::Response) -> AuthError {
    let body = resp.text().await.unwrap_or_default();
    AuthError::from_response_body(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AUTH_URL: &str = "https://example.supabase.co/auth/v1";

    fn stored_session() -> Session {
        serde_json::from_value(json!({
            "access_token": "stored-jwt",
            "refresh_token": "stored-refresh",
            "expires_in": 3600,
            "expires_at": 4102444800i64,
            "token_type": "bearer",
            "user": { "id": "u1" }
        }))
        .unwrap()
    }

    #[test]
    fn url_building() {
        let client = AuthClient::new(AUTH_URL, "test-key", AuthClientOptions::default()).unwrap();
        let url = client.url("/user");
        assert_eq!(url.path(), "/auth/v1/user");
        assert!(url.query().is_none());

        let url = client.url("/token?grant_type=refresh_token");
        assert_eq!(url.path(), "/auth/v1/token");
        assert_eq!(url.query(), Some("grant_type=refresh_token"));
    }

    #[test]
    fn url_building_trailing_slash() {
        let client =
            AuthClient::new(&format!("{}/", AUTH_URL), "test-key", AuthClientOptions::default())
                .unwrap();
        assert_eq!(client.base_url().path(), "/auth/v1");
        assert_eq!(client.url("/user").path(), "/auth/v1/user");
    }

    #[test]
    fn starts_without_session() {
        let client = AuthClient::new(AUTH_URL, "test-key", AuthClientOptions::default()).unwrap();
        assert!(client.get_session().is_none());
    }

    #[test]
    fn restores_persisted_session() {
        let options = AuthClientOptions::default();
        options.storage.set_item(
            DEFAULT_STORAGE_KEY,
            serde_json::to_string(&stored_session()).unwrap(),
        );
        let client = AuthClient::new(AUTH_URL, "test-key", options).unwrap();
        assert_eq!(client.get_session(), Some(&stored_session()));
    }

    #[test]
    fn ignores_persisted_session_when_persistence_is_off() {
        let options = AuthClientOptions {
            persist_session: false,
            ..Default::default()
        };
        options.storage.set_item(
            DEFAULT_STORAGE_KEY,
            serde_json::to_string(&stored_session()).unwrap(),
        );
        let client = AuthClient::new(AUTH_URL, "test-key", options).unwrap();
        assert!(client.get_session().is_none());
    }

    #[test]
    fn unreadable_persisted_session_is_skipped() {
        let options = AuthClientOptions::default();
        options.storage.set_item(DEFAULT_STORAGE_KEY, "{not json".into());
        let client = AuthClient::new(AUTH_URL, "test-key", options).unwrap();
        assert!(client.get_session().is_none());
    }

    #[test]
    fn rejects_bad_extra_header() {
        let options = AuthClientOptions {
            headers: HashMap::from([("x-bad".to_string(), "a\r\nb".to_string())]),
            ..Default::default()
        };
        let err = AuthClient::new(AUTH_URL, "test-key", options).unwrap_err();
        assert!(matches!(err, AuthError::InvalidConfig(_)));
    }

    #[test]
    fn options_from_client_options() {
        let client_options = ClientOptions::new()
            .auto_refresh_token(false)
            .persist_session(false)
            .header("x-app", "demo");
        let options = AuthClientOptions::from(&client_options);
        assert!(!options.auto_refresh_token);
        assert!(!options.persist_session);
        assert_eq!(options.headers.get("x-app").map(String::as_str), Some("demo"));
        assert_eq!(options.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[tokio::test]
    async fn set_session_without_refresh_token_needs_valid_access_token() {
        let mut client =
            AuthClient::new(AUTH_URL, "test-key", AuthClientOptions::default()).unwrap();
        let err = client.set_session("not-a-jwt", "").await.unwrap_err();
        assert!(matches!(err, AuthError::NoSession));
        assert!(client.get_session().is_none());
    }

    #[tokio::test]
    async fn sign_out_without_session_is_a_no_op() {
        let mut client =
            AuthClient::new(AUTH_URL, "test-key", AuthClientOptions::default()).unwrap();
        client.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn refresh_if_expired_keeps_live_session() {
        let options = AuthClientOptions::default();
        options.storage.set_item(
            DEFAULT_STORAGE_KEY,
            serde_json::to_string(&stored_session()).unwrap(),
        );
        let mut client = AuthClient::new(AUTH_URL, "test-key", options).unwrap();
        let session = client.refresh_if_expired().await.unwrap();
        assert_eq!(session, Some(stored_session()));
    }
}
