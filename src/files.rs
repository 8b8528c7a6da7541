//! File Picker Glue
//!
//! Turns the picker's `FileList` into in-memory `SelectedFile`s.

use gallery_core::SelectedFile;
use tracing::warn;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

/// Take the chosen files and clear the input so picking the same file
/// again still fires `change`.
pub fn take_selected(input: &HtmlInputElement) -> Vec<File> {
    let files = match input.files() {
        Some(list) => (0..list.length()).filter_map(|i| list.get(i)).collect(),
        None => Vec::new(),
    };
    input.set_value("");
    files
}

pub async fn read_file(file: &File) -> Result<SelectedFile, String> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_err)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile::new(file.name(), file.type_(), bytes))
}

/// Read files in selection order. Unreadable files are logged and skipped.
pub async fn read_files(files: Vec<File>) -> Vec<SelectedFile> {
    let mut selected = Vec::with_capacity(files.len());
    for file in &files {
        match read_file(file).await {
            Ok(file) => selected.push(file),
            Err(err) => warn!(file = %file.name(), error = %err, "could not read file"),
        }
    }
    selected
}
