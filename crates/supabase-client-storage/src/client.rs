use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::json;
use supabase_client_core::{to_header_map, DEFAULT_STORAGE_CLIENT_TIMEOUT};
use url::Url;

use crate::bucket_api::StorageBucketApi;
use crate::error::StorageError;
use crate::types::*;

/// HTTP client for the Supabase Storage API.
///
/// # Example
/// ```ignore
/// use supabase_client_storage::{BucketOptions, StorageClient};
///
/// let storage = StorageClient::new(
///     "https://your-project.supabase.co/storage/v1",
///     &headers,
///     std::time::Duration::from_secs(20),
/// )?;
/// storage.create_bucket("avatars", BucketOptions::new().public(true)).await?;
/// let avatars = storage.from("avatars");
/// ```
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: Url,
    headers: HeaderMap,
}

impl StorageClient {
    /// Create a client for `storage_url` (e.g.
    /// `https://xyz.supabase.co/storage/v1`).
    ///
    /// `headers` (normally `apiKey` and `Authorization`) are fixed for the
    /// life of the client.
    pub fn new(
        storage_url: &str,
        headers: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let base_url = Url::parse(storage_url.trim_end_matches('/'))?;
        let headers = to_header_map(headers)?;

        let http = reqwest::Client::builder()
            .default_headers(headers.clone())
            .timeout(timeout)
            .build()
            .map_err(StorageError::Http)?;

        tracing::debug!(url = %base_url, ?timeout, "Created storage client");

        Ok(Self {
            http,
            base_url,
            headers,
        })
    }

    /// Client with the default timeout.
    pub fn with_defaults(
        storage_url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Self, StorageError> {
        Self::new(storage_url, headers, DEFAULT_STORAGE_CLIENT_TIMEOUT)
    }

    /// Get the base URL for the storage API.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    // ─── Bucket Operations ───────────────────────────────────────

    /// List all buckets.
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>, StorageError> {
        let resp = self.http.get(self.url("/bucket")).send().await?;
        self.handle_response(resp).await
    }

    /// Get a bucket by ID.
    pub async fn get_bucket(&self, id: &str) -> Result<Bucket, StorageError> {
        let url = self.url(&format!("/bucket/{}", id));
        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    /// Create a new bucket named `id`.
    pub async fn create_bucket(
        &self,
        id: &str,
        options: BucketOptions,
    ) -> Result<CreateBucketResponse, StorageError> {
        let body = BucketRequest {
            id,
            name: id,
            options: &options,
        };
        let resp = self.http.post(self.url("/bucket")).json(&body).send().await?;
        self.handle_response(resp).await
    }

    /// Update a bucket's settings.
    pub async fn update_bucket(&self, id: &str, options: BucketOptions) -> Result<(), StorageError> {
        let url = self.url(&format!("/bucket/{}", id));
        let body = BucketRequest {
            id,
            name: id,
            options: &options,
        };
        let resp = self.http.put(url).json(&body).send().await?;
        self.handle_empty_response(resp).await
    }

    /// Remove every object in a bucket.
    pub async fn empty_bucket(&self, id: &str) -> Result<(), StorageError> {
        let url = self.url(&format!("/bucket/{}/empty", id));
        let resp = self.http.post(url).json(&json!({})).send().await?;
        self.handle_empty_response(resp).await
    }

    /// Delete a bucket. The bucket must be empty first.
    pub async fn delete_bucket(&self, id: &str) -> Result<(), StorageError> {
        let url = self.url(&format!("/bucket/{}", id));
        let resp = self.http.delete(url).json(&json!({})).send().await?;
        self.handle_empty_response(resp).await
    }

    /// Object operations scoped to a bucket.
    ///
    /// Mirrors `supabase.storage.from_('bucket')`.
    pub fn from(&self, bucket: &str) -> StorageBucketApi {
        StorageBucketApi::new(self.clone(), bucket.to_string())
    }

    // ─── Internal Helpers ────────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let current = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}{}", current, path));
        url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, StorageError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(parse_error(status, resp).await);
        }
        Ok(resp.json().await?)
    }

    pub(crate) async fn handle_empty_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<(), StorageError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(parse_error(status, resp).await);
        }
        Ok(())
    }

    pub(crate) async fn handle_bytes_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<Vec<u8>, StorageError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(parse_error(status, resp).await);
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

async fn parse_error(status: u16, resp: reqwest::Response) -> StorageError {
    let body = resp.text().await.unwrap_or_default();
    StorageError::from_response_body(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORAGE_URL: &str = "https://example.supabase.co/storage/v1";

    fn headers() -> HashMap<String, String> {
        HashMap::from([
            ("apiKey".to_string(), "test-key".to_string()),
            ("Authorization".to_string(), "Bearer test-key".to_string()),
        ])
    }

    #[test]
    fn client_base_url() {
        let client = StorageClient::with_defaults(STORAGE_URL, &headers()).unwrap();
        assert_eq!(client.base_url().path(), "/storage/v1");

        let client = StorageClient::with_defaults(&format!("{}/", STORAGE_URL), &headers()).unwrap();
        assert_eq!(client.base_url().path(), "/storage/v1");
    }

    #[test]
    fn client_keeps_headers() {
        let client = StorageClient::with_defaults(STORAGE_URL, &headers()).unwrap();
        assert_eq!(client.headers().get("apikey").unwrap(), "test-key");
        assert_eq!(client.headers().get("authorization").unwrap(), "Bearer test-key");
    }

    #[test]
    fn client_rejects_bad_url() {
        let err = StorageClient::with_defaults("storage", &headers()).unwrap_err();
        assert!(matches!(err, StorageError::UrlParse(_)));
    }

    #[test]
    fn url_building() {
        let client = StorageClient::with_defaults(STORAGE_URL, &headers()).unwrap();
        assert_eq!(client.url("/bucket").path(), "/storage/v1/bucket");
        assert_eq!(client.url("/bucket/avatars").path(), "/storage/v1/bucket/avatars");
    }
}
