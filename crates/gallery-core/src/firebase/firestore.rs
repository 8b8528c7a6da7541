//! Cloud Firestore

use serde_json::{json, Value};
use tracing::debug;

use crate::domain::{GalleryItem, NewGalleryDocument, StoreError, StoreResult};
use crate::projection::GalleryQuery;

use super::codec::{decode_run_query, encode_document};
use super::config::FirebaseConfig;
use super::failure_message;

/// Document ids are derived from the storage key, which is already unique
/// per upload. 20 hex characters, the length of a Firestore auto id.
pub fn document_id(storage_path: &str) -> String {
    blake3::hash(storage_path.as_bytes()).to_hex().as_str()[..20].to_string()
}

#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    documents_root: String,
}

impl FirestoreClient {
    pub fn new(http: reqwest::Client, config: &FirebaseConfig) -> Self {
        Self {
            http,
            endpoint: config.firestore_endpoint().to_string(),
            api_key: config.api_key.clone(),
            documents_root: format!("projects/{}/databases/{}/documents", config.project_id, config.database_id),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/v1/{}{}?key={}", self.endpoint, self.documents_root, method, self.api_key)
    }

    /// Body of the `commit` call creating one gallery document with a
    /// server-side `createdAt`.
    pub fn commit_body(&self, collection: &str, id: &str, document: &NewGalleryDocument) -> Value {
        json!({
            "writes": [{
                "update": {
                    "name": format!("{}/{}/{}", self.documents_root, collection, id),
                    "fields": encode_document(document),
                },
                "currentDocument": { "exists": false },
                "updateTransforms": [{
                    "fieldPath": "createdAt",
                    "setToServerValue": "REQUEST_TIME",
                }],
            }]
        })
    }

    pub fn query_body(query: &GalleryQuery) -> Value {
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": query.collection }],
                "orderBy": [{
                    "field": { "fieldPath": query.order_field },
                    "direction": if query.descending { "DESCENDING" } else { "ASCENDING" },
                }],
            }
        })
    }

    pub async fn add_document(&self, collection: &str, document: &NewGalleryDocument) -> StoreResult<String> {
        let id = document_id(&document.storage_path);
        let body = self.commit_body(collection, &id, document);
        let write_error = |message: String| StoreError::Write {
            collection: collection.to_string(),
            message,
        };

        let response = self
            .http
            .post(self.url(":commit"))
            .json(&body)
            .send()
            .await
            .map_err(|err| write_error(err.to_string()))?;
        if !response.status().is_success() {
            return Err(write_error(failure_message(response).await));
        }
        debug!(%collection, %id, "document committed");
        Ok(id)
    }

    /// Current contents of the queried collection, ordered by the query.
    pub async fn run_query(&self, query: &GalleryQuery) -> StoreResult<Vec<GalleryItem>> {
        let response = self
            .http
            .post(self.url(":runQuery"))
            .json(&Self::query_body(query))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::Query {
                collection: query.collection.clone(),
                message: failure_message(response).await,
            });
        }
        let body: Value = response.json().await?;
        Ok(query.apply(decode_run_query(body)?))
    }
}
