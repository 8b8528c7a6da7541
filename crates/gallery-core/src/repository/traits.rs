//! Repository Layer - Core Traits
//!
//! Object storage, the document store and local preview handles.
//! Everything runs on the browser event loop, so futures are not `Send`.

use async_trait::async_trait;

use crate::domain::{GalleryItem, NewGalleryDocument, SelectedFile, StoreResult};
use crate::projection::GalleryQuery;

/// Blob storage for the raw image bytes.
#[async_trait(?Send)]
pub trait ObjectStorage {
    /// Opaque reference to an uploaded object
    type Handle;

    /// Upload `bytes` under `key`
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> StoreResult<Self::Handle>;

    /// A URL that keeps resolving to the uploaded object
    async fn durable_url(&self, handle: &Self::Handle) -> StoreResult<String>;
}

/// Called with the full, ordered collection contents on every change.
pub type SnapshotListener = Box<dyn Fn(Vec<GalleryItem>)>;

/// Document database holding one record per gallery item.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Add a document to `collection`, returning the id the store assigned
    async fn add_document(&self, collection: &str, document: &NewGalleryDocument) -> StoreResult<String>;

    /// Start delivering snapshots for `query`. Delivery stops when the
    /// returned [`Subscription`] is dropped.
    fn subscribe(&self, query: GalleryQuery, listener: SnapshotListener) -> Subscription;
}

/// Live snapshot subscription; dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribe now instead of on drop
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Locally generated URL showing a selected file before it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

/// Source of preview handles. Every acquired handle must be released once.
pub trait PreviewRegistry {
    fn acquire(&mut self, file: &SelectedFile) -> PreviewHandle;

    fn release(&mut self, handle: PreviewHandle);
}
