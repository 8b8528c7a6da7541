//! Gallery Core
//!
//! Layered the same way as the canvas frontend uses it:
//! - domain: layout records, gallery items, pending files, errors, config
//! - repository: collaborator contracts (object storage, document store, previews)
//! - pending / save / projection: the editing session and its two-phase commit
//! - firebase: REST clients for Cloud Storage and Firestore

pub mod domain;
pub mod repository;
pub mod pending;
pub mod save;
pub mod projection;
pub mod probe;
pub mod firebase;


pub use domain::{
    CanvasSize, GalleryConfig, GalleryItem, Layout, NewGalleryDocument, PendingFile, PendingKey,
    PendingUpload, SaveError, SelectedFile, SnapConfig, StoreError, StoreResult, MIN_SIZE,
};
pub use pending::PendingStore;
pub use projection::{GalleryQuery, SnapshotFeed};
pub use repository::{DocumentStore, ObjectStorage, PreviewHandle, PreviewRegistry, SnapshotListener, Subscription};
pub use save::{SaveGate, SavePipeline, SaveReport, SaveTicket};
