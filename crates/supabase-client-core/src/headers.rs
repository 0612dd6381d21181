use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::InvalidConfiguration;

/// Header carrying the raw project API key.
pub const API_KEY_HEADER: &str = "apiKey";

/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Build the `{apiKey, Authorization}` pair sent to every sub-client.
///
/// `access_token` is the current session's token; without a session the raw
/// key doubles as the bearer token.
pub fn auth_headers(api_key: &str, access_token: Option<&str>) -> HashMap<String, String> {
    let token = access_token.unwrap_or(api_key);
    HashMap::from([
        (API_KEY_HEADER.to_string(), api_key.to_string()),
        (AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token)),
    ])
}

/// Convert a string header set into a `reqwest` header map.
pub fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, InvalidConfiguration> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            InvalidConfiguration::new(format!("Invalid header name '{}': {}", name, e))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            InvalidConfiguration::new(format!("Invalid header value for '{}': {}", name, e))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_api_key() {
        let headers = auth_headers("anon-key", None);
        assert_eq!(headers.get("apiKey").map(String::as_str), Some("anon-key"));
        assert_eq!(
            headers.get("Authorization").map(String::as_str),
            Some("Bearer anon-key")
        );
    }

    #[test]
    fn prefers_session_token() {
        let headers = auth_headers("anon-key", Some("user-jwt"));
        assert_eq!(headers.get("apiKey").map(String::as_str), Some("anon-key"));
        assert_eq!(
            headers.get("Authorization").map(String::as_str),
            Some("Bearer user-jwt")
        );
    }

    #[test]
    fn header_map_is_case_insensitive() {
        let map = to_header_map(&auth_headers("k", None)).unwrap();
        assert_eq!(map.get("apikey").unwrap(), "k");
        assert_eq!(map.get("authorization").unwrap(), "Bearer k");
    }

    #[test]
    fn rejects_illegal_header_value() {
        let headers = HashMap::from([("x-bad".to_string(), "line\nbreak".to_string())]);
        let err = to_header_map(&headers).unwrap_err();
        assert!(err.message().contains("x-bad"));
    }

    #[test]
    fn rejects_illegal_header_name() {
        let headers = HashMap::from([("bad name".to_string(), "v".to_string())]);
        assert!(to_header_map(&headers).is_err());
    }
}
