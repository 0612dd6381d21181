use serde_json::json;

use crate::client::StorageClient;
use crate::error::StorageError;
use crate::types::*;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const DEFAULT_CACHE_CONTROL: &str = "3600";

/// File operations API scoped to a specific bucket.
///
/// Created via `StorageClient::from("bucket_name")`.
///
/// # Example
/// ```ignore
/// let avatars = storage.from("avatars");
/// avatars.upload("me.png", bytes, FileOptions::new().content_type("image/png")).await?;
/// let url = avatars.get_public_url("me.png");
/// ```
#[derive(Debug, Clone)]
pub struct StorageBucketApi {
    client: StorageClient,
    bucket_id: String,
}

impl StorageBucketApi {
    pub(crate) fn new(client: StorageClient, bucket_id: String) -> Self {
        Self { client, bucket_id }
    }

    /// Get the bucket ID this API is scoped to.
    pub fn bucket_id(&self) -> &str {
        &self.bucket_id
    }

    /// Upload a new object. Fails if one exists unless `upsert` is set.
    pub async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        options: FileOptions,
    ) -> Result<UploadResponse, StorageError> {
        self.send_object(reqwest::Method::POST, path, data, options).await
    }

    /// Replace an existing object.
    pub async fn update(
        &self,
        path: &str,
        data: Vec<u8>,
        options: FileOptions,
    ) -> Result<UploadResponse, StorageError> {
        self.send_object(reqwest::Method::PUT, path, data, options).await
    }

    /// Download an object's bytes.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let url = self.client.url(&self.object_path(path));
        let resp = self.client.http().get(url).send().await?;
        self.client.handle_bytes_response(resp).await
    }

    /// List objects under `prefix` (`None` for the bucket root).
    pub async fn list(
        &self,
        prefix: Option<&str>,
        options: SearchOptions,
    ) -> Result<Vec<FileObject>, StorageError> {
        let url = self.client.url(&format!("/object/list/{}", self.bucket_id));
        let body = ListRequest {
            prefix: prefix.unwrap_or(""),
            options,
        };
        let resp = self.client.http().post(url).json(&body).send().await?;
        self.client.handle_response(resp).await
    }

    /// Delete objects; returns the ones that were removed.
    pub async fn remove(&self, paths: &[&str]) -> Result<Vec<FileObject>, StorageError> {
        let url = self.client.url(&format!("/object/{}", self.bucket_id));
        let body = json!({ "prefixes": paths });
        let resp = self.client.http().delete(url).json(&body).send().await?;
        self.client.handle_response(resp).await
    }

    /// Create a URL granting access to an object for `expires_in` seconds.
    ///
    /// The returned URL is absolute.
    pub async fn create_signed_url(
        &self,
        path: &str,
        expires_in: u64,
    ) -> Result<SignedUrlResponse, StorageError> {
        let url = self
            .client
            .url(&format!("/object/sign/{}/{}", self.bucket_id, path));
        let body = json!({ "expiresIn": expires_in });

        let resp = self.client.http().post(url).json(&body).send().await?;
        let mut result: SignedUrlResponse = self.client.handle_response(resp).await?;

        if result.signed_url.starts_with('/') {
            let base = self.client.base_url().as_str().trim_end_matches('/');
            result.signed_url = format!("{}{}", base, result.signed_url);
        }
        Ok(result)
    }

    /// Public URL of an object in a public bucket. No request is made.
    pub fn get_public_url(&self, path: &str) -> String {
        let base = self.client.base_url().as_str().trim_end_matches('/');
        format!("{}/object/public/{}/{}", base, self.bucket_id, path)
    }

    fn object_path(&self, path: &str) -> String {
        format!("/object/{}/{}", self.bucket_id, path.trim_start_matches('/'))
    }

    async fn send_object(
        &self,
        method: reqwest::Method,
        path: &str,
        data: Vec<u8>,
        options: FileOptions,
    ) -> Result<UploadResponse, StorageError> {
        let url = self.client.url(&self.object_path(path));
        let content_type = options.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE);
        let cache_control = options.cache_control.as_deref().unwrap_or(DEFAULT_CACHE_CONTROL);

        let req = self
            .client
            .http()
            .request(method, url)
            .header("content-type", content_type)
            .header("cache-control", format!("max-age={}", cache_control))
            .header("x-upsert", if options.upsert.unwrap_or(false) { "true" } else { "false" })
            .body(data);

        let resp = req.send().await?;
        self.client.handle_response(resp).await
    }
}
