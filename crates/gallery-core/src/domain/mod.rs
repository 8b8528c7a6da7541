//! Domain Layer
//!
//! Plain data and rules. No I/O happens here.

mod config;
mod error;
mod item;
mod layout;
mod pending;

pub use config::{CanvasSize, GalleryConfig, SnapConfig};
pub use error::{SaveError, StoreError, StoreResult};
pub use item::{GalleryItem, NewGalleryDocument};
pub use layout::{Layout, MIN_SIZE};
pub use pending::{PendingFile, PendingKey, PendingUpload, SelectedFile};
