//! Save Pipeline
//!
//! Uploads pending files one at a time and writes a gallery document for
//! each. The first failure ends the batch; documents written before it stay.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::domain::{NewGalleryDocument, PendingKey, PendingUpload, SaveError, StoreError};
use crate::repository::{DocumentStore, ObjectStorage};

/// Outcome of a batch where every item made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Document ids in batch order
    pub document_ids: Vec<String>,
}

pub struct SavePipeline<S, D> {
    storage: S,
    documents: D,
    collection: String,
    clock: fn() -> i64,
    last_stamp: Cell<Option<i64>>,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl<S, D> SavePipeline<S, D>
where
    S: ObjectStorage,
    D: DocumentStore,
{
    pub fn new(storage: S, documents: D, collection: impl Into<String>) -> Self {
        Self {
            storage,
            documents,
            collection: collection.into(),
            clock: now_millis,
            last_stamp: Cell::new(None),
        }
    }

    /// Replace the millisecond clock used for storage key prefixes
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// `{collection}/{millis}_{file name}`. The millisecond prefix strictly
    /// increases per pipeline, so two selections of the same file never
    /// share a key (and with it a document id).
    pub fn storage_key(&self, file_name: &str) -> String {
        format!("{}/{}_{}", self.collection, self.next_stamp(), file_name)
    }

    fn next_stamp(&self) -> i64 {
        let now = (self.clock)();
        let stamp = match self.last_stamp.get() {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last_stamp.set(Some(stamp));
        stamp
    }

    /// Persist `batch` in order. `on_saved` runs right after each document
    /// write so the caller can retire that pending entry.
    #[instrument(skip_all, fields(collection = %self.collection, items = batch.len()))]
    pub async fn save<F>(&self, batch: &[PendingUpload], mut on_saved: F) -> Result<SaveReport, SaveError>
    where
        F: FnMut(PendingKey, &str),
    {
        let mut document_ids = Vec::with_capacity(batch.len());
        for (index, upload) in batch.iter().enumerate() {
            let fail = |source: StoreError| SaveError {
                index,
                file_name: upload.file.name.clone(),
                saved: index,
                source,
            };

            let id = self.save_one(upload).await.map_err(fail).inspect_err(|err| {
                error!(error = %err, "save batch aborted");
            })?;
            on_saved(upload.key, &id);
            document_ids.push(id);
        }
        info!(saved = document_ids.len(), "save batch complete");
        Ok(SaveReport { document_ids })
    }

    async fn save_one(&self, upload: &PendingUpload) -> Result<String, StoreError> {
        let key = self.storage_key(&upload.file.name);
        let handle = self
            .storage
            .put(&key, &upload.file.bytes, &upload.file.content_type)
            .await?;
        let url = self.storage.durable_url(&handle).await?;

        let document = NewGalleryDocument {
            url,
            file_name: upload.file.name.clone(),
            storage_path: key.clone(),
            layout: upload.layout,
            caption: upload.caption.clone(),
        };
        let id = self.documents.add_document(&self.collection, &document).await?;
        info!(%key, id = %id, "gallery item saved");
        Ok(id)
    }
}

/// Shared "save in progress" flag. Only one ticket exists at a time.
#[derive(Debug, Clone, Default)]
pub struct SaveGate {
    busy: Arc<AtomicBool>,
}

impl SaveGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// `None` while another save holds the gate.
    pub fn try_acquire(&self) -> Option<SaveTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SaveTicket { busy: self.busy.clone() })
    }
}

/// Held for the duration of one save; dropping it reopens the gate.
#[derive(Debug)]
pub struct SaveTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for SaveTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
