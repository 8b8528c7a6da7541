//! Persisted Gallery Projection
//!
//! The persisted list is never edited locally. Each snapshot replaces it
//! wholesale, ordered by creation time, newest first.

use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::domain::GalleryItem;
use crate::repository::{SnapshotListener, Subscription};

/// Collection plus ordering, the only query shape the gallery uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryQuery {
    pub collection: String,
    pub order_field: String,
    pub descending: bool,
}

impl GalleryQuery {
    pub fn newest_first(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            order_field: "createdAt".to_string(),
            descending: true,
        }
    }

    /// Order a snapshot the way the store would. Items whose timestamp has
    /// not resolved yet sort last; ties keep their incoming order.
    pub fn apply(&self, mut items: Vec<GalleryItem>) -> Vec<GalleryItem> {
        let descending = self.descending;
        items.sort_by(|a, b| match (&a.created_at, &b.created_at) {
            (Some(a), Some(b)) if descending => b.cmp(a),
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        items
    }
}

/// Delivery side of a polled subscription. Repeated identical results
/// reach the listener once, and nothing reaches it after the paired
/// [`Subscription`] is gone.
pub struct SnapshotFeed {
    listener: SnapshotListener,
    last: Option<Vec<GalleryItem>>,
    cancelled: Rc<Cell<bool>>,
}

impl SnapshotFeed {
    pub fn new(listener: SnapshotListener) -> (Self, Subscription) {
        let cancelled = Rc::new(Cell::new(false));
        let stop = cancelled.clone();
        let feed = Self {
            listener,
            last: None,
            cancelled,
        };
        (feed, Subscription::new(move || stop.set(true)))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Offer a fresh query result. Returns whether the listener saw it.
    pub fn push(&mut self, items: Vec<GalleryItem>) -> bool {
        if self.is_cancelled() || self.last.as_ref() == Some(&items) {
            return false;
        }
        (self.listener)(items.clone());
        self.last = Some(items);
        true
    }
}

impl std::fmt::Debug for SnapshotFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotFeed")
            .field("last", &self.last.as_ref().map(Vec::len))
            .field("cancelled", &self.cancelled.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::Layout;
    use chrono::DateTime;

    fn item(id: &str, millis: Option<i64>) -> GalleryItem {
        GalleryItem {
            id: id.to_string(),
            url: format!("https://cdn/{id}"),
            file_name: format!("{id}.png"),
            layout: Layout::new(0.0, 0.0, 100.0, 100.0),
            caption: None,
            storage_path: None,
            created_at: millis.and_then(DateTime::from_timestamp_millis),
        }
    }

    #[test]
    fn test_newest_first_ordering() {
        let query = GalleryQuery::newest_first("gallery");
        let ordered = query.apply(vec![item("a", Some(1)), item("b", Some(3)), item("c", Some(2))]);
        let ids: Vec<_> = ordered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn test_unresolved_timestamps_sort_last() {
        let query = GalleryQuery::newest_first("gallery");
        let ordered = query.apply(vec![item("pending", None), item("old", Some(1))]);
        assert_eq!(ordered[0].id, "old");
        assert_eq!(ordered[1].id, "pending");
    }

    fn recording_feed() -> (SnapshotFeed, Subscription, Rc<RefCell<Vec<Vec<String>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let (feed, subscription) = SnapshotFeed::new(Box::new(move |items: Vec<GalleryItem>| {
            sink.borrow_mut().push(items.into_iter().map(|i| i.id).collect());
        }));
        (feed, subscription, seen)
    }

    #[test]
    fn test_feed_skips_unchanged_results() {
        let (mut feed, _subscription, seen) = recording_feed();
        assert!(feed.push(vec![item("a", Some(1))]));
        assert!(!feed.push(vec![item("a", Some(1))]));
        assert!(feed.push(vec![item("b", Some(2)), item("a", Some(1))]));

        assert_eq!(*seen.borrow(), vec![vec!["a"], vec!["b", "a"]]);
    }

    #[test]
    fn test_feed_delivers_empty_first_result() {
        let (mut feed, _subscription, seen) = recording_feed();
        assert!(feed.push(Vec::new()));
        assert!(!feed.push(Vec::new()));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_feed_stops_after_unsubscribe() {
        let (mut feed, subscription, seen) = recording_feed();
        assert!(feed.push(vec![item("a", Some(1))]));
        assert!(!feed.is_cancelled());

        drop(subscription);
        assert!(feed.is_cancelled());
        assert!(!feed.push(vec![item("b", Some(2))]));
        assert_eq!(seen.borrow().len(), 1);
    }
}
