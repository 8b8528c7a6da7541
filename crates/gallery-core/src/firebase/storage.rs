//! Cloud Storage for Firebase

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{StoreError, StoreResult};
use crate::repository::ObjectStorage;

use super::config::FirebaseConfig;
use super::failure_message;

/// Same characters `encodeURIComponent` leaves alone, minus `!'()*`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// An uploaded object. The token comes back with the upload response and
/// is what makes the download URL durable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObjectRef {
    pub key: String,
    pub download_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    name: String,
    download_tokens: Option<String>,
}

impl ObjectMetadata {
    fn first_token(&self) -> Option<String> {
        self.download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()))
            .map(str::to_string)
    }
}

/// Read the object resource an upload answers with.
fn parse_upload_response(body: &str) -> StoreResult<StoredObjectRef> {
    let metadata: ObjectMetadata = serde_json::from_str(body)?;
    Ok(StoredObjectRef {
        download_token: metadata.first_token(),
        key: metadata.name,
    })
}

#[derive(Debug, Clone)]
pub struct FirebaseStorage {
    http: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl FirebaseStorage {
    pub fn new(http: reqwest::Client, config: &FirebaseConfig) -> Self {
        Self {
            http,
            endpoint: config.storage_endpoint().to_string(),
            bucket: config.storage_bucket.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/v0/b/{}/o/{}", self.endpoint, self.bucket, encode_component(key))
    }

    pub fn download_url(&self, key: &str, token: &str) -> String {
        format!("{}?alt=media&token={}", self.object_url(key), encode_component(token))
    }

    async fn metadata(&self, key: &str) -> StoreResult<ObjectMetadata> {
        let response = self.http.get(self.object_url(key)).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::DurableUrl {
                key: key.to_string(),
                message: failure_message(response).await,
            });
        }
        Ok(response.json::<ObjectMetadata>().await?)
    }
}

#[async_trait(?Send)]
impl ObjectStorage for FirebaseStorage {
    type Handle = StoredObjectRef;

    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> StoreResult<StoredObjectRef> {
        let url = format!(
            "{}/v0/b/{}/o?uploadType=media&name={}",
            self.endpoint,
            self.bucket,
            encode_component(key)
        );
        debug!(%key, len = bytes.len(), %content_type, "uploading object");
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|err| StoreError::Upload {
                key: key.to_string(),
                message: err.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(StoreError::Upload {
                key: key.to_string(),
                message: failure_message(response).await,
            });
        }
        let body = response.text().await?;
        parse_upload_response(&body)
    }

    async fn durable_url(&self, handle: &StoredObjectRef) -> StoreResult<String> {
        let token = match &handle.download_token {
            Some(token) => token.clone(),
            None => self.metadata(&handle.key).await?.first_token().ok_or_else(|| StoreError::DurableUrl {
                key: handle.key.clone(),
                message: "object has no download token".to_string(),
            })?,
        };
        Ok(self.download_url(&handle.key, &token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> FirebaseStorage {
        let config: FirebaseConfig =
            serde_json::from_str(r#"{"apiKey":"k","projectId":"demo","storageBucket":"demo.appspot.com"}"#).unwrap();
        FirebaseStorage::new(reqwest::Client::new(), &config)
    }

    #[test]
    fn test_key_slashes_are_encoded() {
        assert_eq!(encode_component("gallery/17_my photo.png"), "gallery%2F17_my%20photo.png");
    }

    #[test]
    fn test_download_url_shape() {
        let url = storage().download_url("gallery/1_a.png", "tok-1");
        assert_eq!(
            url,
            "https://firebasestorage.googleapis.com/v0/b/demo.appspot.com/o/gallery%2F1_a.png?alt=media&token=tok-1"
        );
    }

    #[test]
    fn test_first_download_token() {
        let metadata = ObjectMetadata {
            name: "k".into(),
            download_tokens: Some(" ,abc,def".into()),
        };
        assert_eq!(metadata.first_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_upload_response_yields_key_and_token() {
        let body = r#"{
            "name": "gallery/1760000000000_my photo.png",
            "bucket": "demo.appspot.com",
            "generation": "1760000000123456",
            "metageneration": "1",
            "contentType": "image/png",
            "timeCreated": "2026-10-16T09:30:00.123Z",
            "updated": "2026-10-16T09:30:00.123Z",
            "storageClass": "STANDARD",
            "size": "48213",
            "md5Hash": "kSgVbC2fP8Zy0m5GQe3U7w==",
            "contentEncoding": "identity",
            "contentDisposition": "inline; filename*=utf-8''my%20photo.png",
            "crc32c": "W0gD7A==",
            "etag": "CMD0yK2e8IgDEAE=",
            "downloadTokens": "5f0c1a4e-2b7d-4c39-9e61-0d8a7b3f2c11"
        }"#;
        let stored = parse_upload_response(body).unwrap();
        assert_eq!(stored.key, "gallery/1760000000000_my photo.png");
        assert_eq!(stored.download_token.as_deref(), Some("5f0c1a4e-2b7d-4c39-9e61-0d8a7b3f2c11"));
        assert_eq!(
            storage().download_url(&stored.key, stored.download_token.as_deref().unwrap()),
            "https://firebasestorage.googleapis.com/v0/b/demo.appspot.com/o/gallery%2F1760000000000_my%20photo.png\
             ?alt=media&token=5f0c1a4e-2b7d-4c39-9e61-0d8a7b3f2c11"
        );
    }

    #[test]
    fn test_upload_response_without_token_needs_metadata_lookup() {
        let stored = parse_upload_response(r#"{"name":"gallery/1_a.png","bucket":"b"}"#).unwrap();
        assert_eq!(stored.download_token, None);
        assert!(parse_upload_response(r#"{"bucket":"b"}"#).is_err());
    }
}
