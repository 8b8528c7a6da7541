//! In-memory collaborators for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use chrono::DateTime;

use crate::domain::{GalleryItem, NewGalleryDocument, SelectedFile, StoreError, StoreResult};
use crate::projection::GalleryQuery;

use super::traits::{DocumentStore, ObjectStorage, PreviewHandle, PreviewRegistry, SnapshotListener, Subscription};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Object storage keeping bytes in a map. `fail_put_at(n)` makes the n-th
/// upload (1-based) fail.
#[derive(Default)]
pub struct MemoryObjectStorage {
    objects: RefCell<HashMap<String, StoredObject>>,
    puts: Cell<usize>,
    fail_put_at: Cell<Option<usize>>,
}

impl MemoryObjectStorage {
    pub fn fail_put_at(&self, attempt: usize) {
        self.fail_put_at.set(Some(attempt));
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.borrow().len()
    }
}

#[async_trait(?Send)]
impl ObjectStorage for MemoryObjectStorage {
    type Handle = String;

    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> StoreResult<String> {
        let attempt = self.puts.get() + 1;
        self.puts.set(attempt);
        if self.fail_put_at.get() == Some(attempt) {
            return Err(StoreError::Upload {
                key: key.to_string(),
                message: "injected failure".to_string(),
            });
        }
        self.objects.borrow_mut().insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(key.to_string())
    }

    async fn durable_url(&self, handle: &String) -> StoreResult<String> {
        Ok(format!("memory://{handle}"))
    }
}

#[derive(Default)]
struct DocumentsInner {
    documents: Vec<(String, GalleryItem)>,
    listeners: Vec<(u64, GalleryQuery, SnapshotListener)>,
    next_listener: u64,
    writes: usize,
    fail_write_at: Option<usize>,
}

impl DocumentsInner {
    fn snapshot(&self, query: &GalleryQuery) -> Vec<GalleryItem> {
        let items = self
            .documents
            .iter()
            .filter(|(collection, _)| *collection == query.collection)
            .map(|(_, item)| item.clone())
            .collect();
        query.apply(items)
    }
}

/// Document store that notifies listeners synchronously after each write.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Rc<RefCell<DocumentsInner>>,
}

impl MemoryDocumentStore {
    pub fn fail_write_at(&self, attempt: usize) {
        self.inner.borrow_mut().fail_write_at = Some(attempt);
    }

    pub fn documents(&self, collection: &str) -> Vec<GalleryItem> {
        self.inner.borrow().snapshot(&GalleryQuery::newest_first(collection))
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self) {
        // listeners may read the store, so collect snapshots before calling out
        let deliveries: Vec<(u64, Vec<GalleryItem>)> = {
            let inner = self.inner.borrow();
            inner
                .listeners
                .iter()
                .map(|(id, query, _)| (*id, inner.snapshot(query)))
                .collect()
        };
        for (id, items) in deliveries {
            let inner = self.inner.borrow();
            if let Some((_, _, listener)) = inner.listeners.iter().find(|(lid, _, _)| *lid == id) {
                listener(items);
            }
        }
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryDocumentStore {
    async fn add_document(&self, collection: &str, document: &NewGalleryDocument) -> StoreResult<String> {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.writes += 1;
            if inner.fail_write_at == Some(inner.writes) {
                return Err(StoreError::Write {
                    collection: collection.to_string(),
                    message: "injected failure".to_string(),
                });
            }
            let seq = inner.documents.len() as i64 + 1;
            let id = format!("doc-{seq}");
            inner.documents.push((
                collection.to_string(),
                GalleryItem {
                    id: id.clone(),
                    url: document.url.clone(),
                    file_name: document.file_name.clone(),
                    layout: document.layout,
                    caption: document.caption.clone(),
                    storage_path: Some(document.storage_path.clone()),
                    created_at: DateTime::from_timestamp_millis(1_700_000_000_000 + seq),
                },
            ));
            id
        };
        self.notify();
        Ok(id)
    }

    fn subscribe(&self, query: GalleryQuery, listener: SnapshotListener) -> Subscription {
        let (id, initial) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener;
            inner.next_listener += 1;
            (id, inner.snapshot(&query))
        };
        listener(initial);
        self.inner.borrow_mut().listeners.push((id, query, listener));
        let weak: Weak<RefCell<DocumentsInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _, _)| *lid != id);
            }
        })
    }
}

#[derive(Debug, Default)]
struct LedgerInner {
    acquired: usize,
    released: usize,
    live: Vec<PreviewHandle>,
}

/// Shared view of what a [`CountingPreviews`] handed out.
#[derive(Debug, Clone, Default)]
pub struct PreviewLedger(Rc<RefCell<LedgerInner>>);

impl PreviewLedger {
    pub fn outstanding(&self) -> usize {
        self.0.borrow().live.len()
    }

    pub fn released(&self) -> usize {
        self.0.borrow().released
    }

    pub fn acquired(&self) -> usize {
        self.0.borrow().acquired
    }
}

/// Preview registry that counts acquisitions and releases.
#[derive(Debug, Default)]
pub struct CountingPreviews {
    ledger: PreviewLedger,
}

impl CountingPreviews {
    pub fn ledger(&self) -> PreviewLedger {
        self.ledger.clone()
    }

    pub fn outstanding(&self) -> usize {
        self.ledger.outstanding()
    }

    pub fn released(&self) -> usize {
        self.ledger.released()
    }
}

impl PreviewRegistry for CountingPreviews {
    fn acquire(&mut self, file: &SelectedFile) -> PreviewHandle {
        let mut inner = self.ledger.0.borrow_mut();
        inner.acquired += 1;
        let handle = PreviewHandle::new(format!("blob:preview/{}/{}", inner.acquired, file.name));
        inner.live.push(handle.clone());
        handle
    }

    fn release(&mut self, handle: PreviewHandle) {
        let mut inner = self.ledger.0.borrow_mut();
        let before = inner.live.len();
        inner.live.retain(|live| *live != handle);
        if inner.live.len() < before {
            inner.released += 1;
        }
    }
}
