//! Pending Files
//!
//! Images chosen in the picker that have not been saved yet.

use std::fmt;
use std::sync::Arc;

use crate::repository::PreviewHandle;

use super::layout::Layout;

/// Stable identity of a pending entry for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PendingKey(pub u64);

impl fmt::Display for PendingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pending-{}", self.0)
    }
}

/// Raw file as delivered by the picker.
#[derive(Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    /// Build a file, guessing the MIME type from the name when the picker
    /// did not supply one.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let mut content_type = content_type.into();
        if content_type.trim().is_empty() {
            content_type = mime_guess::from_path(&name).first_or_octet_stream().to_string();
        }
        Self {
            name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A selected image with its preview handle and editable layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFile {
    pub key: PendingKey,
    pub file: SelectedFile,
    pub preview: PreviewHandle,
    pub layout: Layout,
    pub caption: Option<String>,
}

/// What the save pipeline needs from a pending entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub key: PendingKey,
    pub file: SelectedFile,
    pub layout: Layout,
    pub caption: Option<String>,
}

impl From<&PendingFile> for PendingUpload {
    fn from(pending: &PendingFile) -> Self {
        Self {
            key: pending.key,
            file: pending.file.clone(),
            layout: pending.layout,
            caption: pending.caption.clone(),
        }
    }
}
