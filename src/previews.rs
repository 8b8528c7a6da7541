//! Preview Handles
//!
//! Object URLs for selected files. Each one pins a blob in memory until it
//! is revoked, so the pending store releases them explicitly.

use gallery_core::{PreviewHandle, PreviewRegistry, SelectedFile};
use tracing::{trace, warn};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::files::js_err;

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserPreviews;

fn object_url(file: &SelectedFile) -> Result<String, JsValue> {
    let bytes = js_sys::Uint8Array::from(&file.bytes[..]);
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    Url::create_object_url_with_blob(&blob)
}

impl PreviewRegistry for BrowserPreviews {
    fn acquire(&mut self, file: &SelectedFile) -> PreviewHandle {
        match object_url(file) {
            Ok(url) => {
                trace!(%url, file = %file.name, "preview created");
                PreviewHandle::new(url)
            }
            Err(err) => {
                warn!(file = %file.name, error = %js_err(err), "preview unavailable");
                PreviewHandle::new("")
            }
        }
    }

    fn release(&mut self, handle: PreviewHandle) {
        if handle.url().is_empty() {
            return;
        }
        if let Err(err) = Url::revoke_object_url(handle.url()) {
            warn!(url = %handle.url(), error = %js_err(err), "revoking preview failed");
        }
    }
}
