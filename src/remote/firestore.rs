//! Polling Firestore Listener
//!
//! Firestore's streaming listen channel is not reachable over plain REST,
//! so snapshots come from re-running the query on a timer. A snapshot is
//! only delivered when the result changed.

use async_trait::async_trait;
use gallery_core::firebase::FirestoreClient;
use gallery_core::{
    DocumentStore, GalleryQuery, NewGalleryDocument, SnapshotFeed, SnapshotListener, StoreResult, Subscription,
};
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use tracing::{debug, warn};

pub struct LiveFirestore {
    client: FirestoreClient,
    poll_interval_ms: u32,
}

impl LiveFirestore {
    pub fn new(client: FirestoreClient, poll_interval_ms: u32) -> Self {
        Self {
            client,
            poll_interval_ms: poll_interval_ms.max(250),
        }
    }
}

#[async_trait(?Send)]
impl DocumentStore for LiveFirestore {
    async fn add_document(&self, collection: &str, document: &NewGalleryDocument) -> StoreResult<String> {
        self.client.add_document(collection, document).await
    }

    fn subscribe(&self, query: GalleryQuery, listener: SnapshotListener) -> Subscription {
        let (mut feed, subscription) = SnapshotFeed::new(listener);
        let client = self.client.clone();
        let interval = self.poll_interval_ms;

        spawn_local(async move {
            while !feed.is_cancelled() {
                match client.run_query(&query).await {
                    Ok(items) => {
                        let count = items.len();
                        if feed.push(items) {
                            debug!(collection = %query.collection, items = count, "gallery snapshot");
                        }
                    }
                    Err(err) => warn!(collection = %query.collection, error = %err, "gallery query failed"),
                }
                TimeoutFuture::new(interval).await;
            }
            debug!(collection = %query.collection, "gallery listener stopped");
        });

        subscription
    }
}
