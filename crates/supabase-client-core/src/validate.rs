//! Shape checks for the project URL and API key.
//!
//! The key is only checked for a JWT-like shape. Nothing here decodes it or
//! verifies a signature.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::InvalidConfiguration;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(https?)://.+").expect("valid pattern"))
}

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_=-]+\.[A-Za-z0-9_=-]+\.[A-Za-z0-9_.+/=-]*$").expect("valid pattern")
    })
}

/// Check that `supabase_url` and `supabase_key` are usable.
///
/// Emptiness is reported before shape, URL before key.
pub fn validate(supabase_url: &str, supabase_key: &str) -> Result<(), InvalidConfiguration> {
    if supabase_url.is_empty() {
        return Err(InvalidConfiguration::new("supabase_url is required"));
    }
    if supabase_key.is_empty() {
        return Err(InvalidConfiguration::new("supabase_key is required"));
    }
    if !is_valid_url(supabase_url) {
        return Err(InvalidConfiguration::new("Invalid URL"));
    }
    if !is_valid_api_key(supabase_key) {
        return Err(InvalidConfiguration::new("Invalid API key"));
    }
    Ok(())
}

/// `http://...` or `https://...` with at least one character after the scheme.
pub fn is_valid_url(url: &str) -> bool {
    url_pattern().is_match(url)
}

/// Three dot-separated segments; the last one may be empty.
pub fn is_valid_api_key(key: &str) -> bool {
    key_pattern().is_match(key)
}
