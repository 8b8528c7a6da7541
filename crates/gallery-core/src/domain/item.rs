//! Gallery Item
//!
//! A persisted image placement, mirrored read-only from the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::layout::Layout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Assigned by the store
    pub id: String,
    pub url: String,
    pub file_name: String,
    pub layout: Layout,
    pub caption: Option<String>,
    /// Object key the image bytes were uploaded under
    pub storage_path: Option<String>,
    /// Assigned by the store; `None` until the server timestamp resolves
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields written for a new gallery document. `createdAt` is left to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGalleryDocument {
    pub url: String,
    pub file_name: String,
    pub storage_path: String,
    pub layout: Layout,
    pub caption: Option<String>,
}
