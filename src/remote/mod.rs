//! Remote Collaborators
//!
//! Firebase Storage and Firestore behind the gallery's collaborator traits.
//! The backend is created once per page and reused until reload.

mod firestore;

use std::cell::OnceCell;
use std::rc::Rc;

use gallery_core::firebase::{FirebaseStorage, FirestoreClient};
use gallery_core::{
    DocumentStore, GalleryQuery, PendingKey, PendingUpload, SaveError, SavePipeline, SaveReport, SnapshotListener, StoreError,
    Subscription,
};
use tracing::info;

use crate::config::AppConfig;

use firestore::LiveFirestore;

pub struct Backend {
    pipeline: SavePipeline<FirebaseStorage, LiveFirestore>,
}

impl Backend {
    fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let firebase = config
            .firebase
            .as_ref()
            .ok_or_else(|| StoreError::NotConfigured("missing `firebase` section".to_string()))?;
        let http = reqwest::Client::new();
        let storage = FirebaseStorage::new(http.clone(), firebase);
        let documents = LiveFirestore::new(FirestoreClient::new(http, firebase), config.gallery.poll_interval_ms);
        info!(project = %firebase.project_id, bucket = %firebase.storage_bucket, "firebase backend ready");
        Ok(Self {
            pipeline: SavePipeline::new(storage, documents, config.gallery.collection.clone()),
        })
    }

    pub async fn save<F>(&self, batch: &[PendingUpload], on_saved: F) -> Result<SaveReport, SaveError>
    where
        F: FnMut(PendingKey, &str),
    {
        self.pipeline.save(batch, on_saved).await
    }

    /// Live, newest-first view of the gallery collection
    pub fn subscribe(&self, listener: SnapshotListener) -> Subscription {
        let query = GalleryQuery::newest_first(self.pipeline.collection());
        self.pipeline.documents().subscribe(query, listener)
    }
}

thread_local! {
    static BACKEND: OnceCell<Rc<Backend>> = const { OnceCell::new() };
}

/// The page-wide backend, created from `config` on first call.
pub fn connect(config: &AppConfig) -> Result<Rc<Backend>, StoreError> {
    BACKEND.with(|cell| {
        if let Some(backend) = cell.get() {
            return Ok(backend.clone());
        }
        let backend = Rc::new(Backend::connect(config)?);
        let _ = cell.set(backend.clone());
        Ok(backend)
    })
}

/// The backend if [`connect`] has succeeded before.
pub fn backend() -> Option<Rc<Backend>> {
    BACKEND.with(|cell| cell.get().cloned())
}
