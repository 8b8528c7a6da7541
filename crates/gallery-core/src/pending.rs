//! Pending-Item Store
//!
//! Ordered list of selected-but-unsaved images. The store owns the preview
//! registry so every path that drops an entry also releases its preview.

use tracing::{debug, info};

use crate::domain::{GalleryConfig, Layout, PendingFile, PendingKey, PendingUpload, SelectedFile};
use crate::probe::image_dimensions;
use crate::repository::PreviewRegistry;

pub struct PendingStore<P: PreviewRegistry> {
    items: Vec<PendingFile>,
    previews: P,
    config: GalleryConfig,
    next_key: u64,
}

impl<P: PreviewRegistry> PendingStore<P> {
    pub fn new(previews: P, config: GalleryConfig) -> Self {
        Self {
            items: Vec::new(),
            previews,
            config,
            next_key: 1,
        }
    }

    pub fn items(&self) -> &[PendingFile] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: PendingKey) -> Option<&PendingFile> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn previews(&self) -> &P {
        &self.previews
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Append one entry per file, duplicates included.
    pub fn add_files(&mut self, files: Vec<SelectedFile>) -> Vec<PendingKey> {
        let mut keys = Vec::with_capacity(files.len());
        for file in files {
            let index = self.items.len();
            let dimensions = image_dimensions(&file.bytes);
            if dimensions.is_none() {
                debug!(file = %file.name, "falling back to default aspect ratio");
            }
            let layout = Layout::initial(index, dimensions, &self.config);
            let preview = self.previews.acquire(&file);
            let key = PendingKey(self.next_key);
            self.next_key += 1;

            debug!(%key, file = %file.name, ?layout, "pending file added");
            self.items.push(PendingFile {
                key,
                file,
                preview,
                layout,
                caption: None,
            });
            keys.push(key);
        }
        info!(added = keys.len(), pending = self.items.len(), "files selected");
        keys
    }

    /// Commit a finished gesture. Returns `false` if the entry is gone.
    pub fn update_layout(&mut self, key: PendingKey, layout: Layout) -> bool {
        let min = self.config.min_size;
        match self.items.iter_mut().find(|item| item.key == key) {
            Some(item) => {
                item.layout = layout.with_min_size(min);
                true
            }
            None => false,
        }
    }

    /// Blank captions are stored as `None`.
    pub fn set_caption(&mut self, key: PendingKey, caption: &str) -> bool {
        let caption = Some(caption.trim()).filter(|c| !c.is_empty()).map(str::to_string);
        match self.items.iter_mut().find(|item| item.key == key) {
            Some(item) => {
                item.caption = caption;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: PendingKey) -> Option<PendingFile> {
        let index = self.items.iter().position(|item| item.key == key)?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<PendingFile> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.previews.release(removed.preview.clone());
        debug!(key = %removed.key, file = %removed.file.name, "pending file removed");
        Some(removed)
    }

    /// The entry reached the document store; drop it from the pending list.
    pub fn mark_saved(&mut self, key: PendingKey) -> bool {
        self.remove(key).is_some()
    }

    /// Release every preview and empty the list.
    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            self.previews.release(item.preview);
        }
    }

    /// Snapshot of the list for the save pipeline.
    pub fn batch(&self) -> Vec<PendingUpload> {
        self.items.iter().map(PendingUpload::from).collect()
    }
}

impl<P: PreviewRegistry> Drop for PendingStore<P> {
    fn drop(&mut self) {
        self.clear();
    }
}
