//! Public-API tests for supabase-client-auth that need no running server.
//!
//! Wire-level behaviour (sign-in, refresh, sign-out against a GoTrue
//! endpoint) is covered by the `supabase-client` crate's tests, which run a
//! local mock server.

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use supabase_client_auth::{
    jwt, AuthClient, AuthClientOptions, AuthError, AuthErrorCode, GoTrueErrorResponse, Session,
    DEFAULT_STORAGE_KEY,
};
use supabase_client_core::{MemoryStorage, SessionStorage};

fn token_expiring_at(exp: i64) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": "u1", "role": "authenticated", "exp": exp }),
        &EncodingKey::from_secret(b"project-jwt-secret"),
    )
    .unwrap()
}

fn session_json(access_token: &str) -> String {
    json!({
        "access_token": access_token,
        "refresh_token": "refresh-1",
        "expires_in": 3600,
        "expires_at": 4102444800i64,
        "token_type": "bearer",
        "user": { "id": "u1", "email": "user@example.com" }
    })
    .to_string()
}

mod unit_tests {
    use super::*;

    #[test]
    fn auth_client_new_ok() {
        let client = AuthClient::new(
            "https://example.supabase.co/auth/v1",
            "test-key",
            AuthClientOptions::default(),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn auth_client_rejects_bad_url() {
        let err = AuthClient::new("not a url", "test-key", AuthClientOptions::default())
            .unwrap_err();
        assert!(matches!(err, AuthError::UrlParse(_)));
    }

    #[test]
    fn auth_client_keeps_api_key() {
        let client = AuthClient::new(
            "https://example.supabase.co/auth/v1",
            "test-key",
            AuthClientOptions::default(),
        )
        .unwrap();
        assert_eq!(client.api_key(), "test-key");
        assert_eq!(client.base_url().host_str(), Some("example.supabase.co"));
    }

    #[test]
    fn shared_storage_restores_session_across_clients() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        storage.set_item(DEFAULT_STORAGE_KEY, session_json("jwt-1"));

        let options = AuthClientOptions {
            storage: Arc::clone(&storage),
            ..Default::default()
        };
        let client =
            AuthClient::new("https://example.supabase.co/auth/v1", "test-key", options).unwrap();
        let session: &Session = client.get_session().unwrap();
        assert_eq!(session.access_token, "jwt-1");
        assert_eq!(session.user.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn custom_storage_key() {
        let options = AuthClientOptions {
            storage_key: "my-app.session".into(),
            ..Default::default()
        };
        options.storage.set_item(DEFAULT_STORAGE_KEY, session_json("ignored"));
        options.storage.set_item("my-app.session", session_json("jwt-2"));

        let client =
            AuthClient::new("https://example.supabase.co/auth/v1", "test-key", options).unwrap();
        assert_eq!(client.get_session().unwrap().access_token, "jwt-2");
    }

    #[test]
    fn jwt_expiry_is_read_without_secret() {
        let token = token_expiring_at(1_900_000_000);
        assert_eq!(jwt::expires_at(&token), Some(1_900_000_000));
        assert_eq!(jwt::expires_at("opaque-token"), None);
    }

    #[tokio::test]
    async fn expired_token_without_refresh_token_is_no_session() {
        let mut client = AuthClient::new(
            "https://example.supabase.co/auth/v1",
            "test-key",
            AuthClientOptions::default(),
        )
        .unwrap();
        let err = client
            .set_session(&token_expiring_at(1_000), "")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoSession));
        assert!(client.get_session().is_none());
    }

    #[test]
    fn error_response_message_priority() {
        let resp: GoTrueErrorResponse = serde_json::from_value(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials",
            "error_code": "invalid_credentials"
        }))
        .unwrap();
        assert_eq!(resp.error_message(), "Invalid login credentials");
        assert_eq!(
            AuthErrorCode::from(resp.error_code.as_deref().unwrap()),
            AuthErrorCode::InvalidCredentials
        );
    }

    #[test]
    fn api_error_display() {
        let err = AuthError::Api {
            status: 401,
            message: "JWT expired".into(),
            error_code: Some(AuthErrorCode::BadJwt),
        };
        assert_eq!(err.to_string(), "Auth API error (401): JWT expired");
    }
}
