//! Page Configuration
//!
//! The host page provides `window.__GALLERY_CONFIG__`:
//! `{ firebase: { apiKey, projectId, storageBucket }, gallery: { ... } }`.

use gallery_core::firebase::FirebaseConfig;
use gallery_core::GalleryConfig;
use serde::Deserialize;
use tracing::{info, warn};
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "__GALLERY_CONFIG__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Without it the canvas still works, but nothing can be saved or listed
    pub firebase: Option<FirebaseConfig>,
    pub gallery: GalleryConfig,
}

/// Read the page configuration, falling back to defaults.
pub fn load() -> AppConfig {
    let Some(window) = web_sys::window() else {
        return AppConfig::default();
    };
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).unwrap_or(JsValue::UNDEFINED);
    if raw.is_undefined() || raw.is_null() {
        warn!("window.{CONFIG_GLOBAL} is not set, using defaults");
        return AppConfig::default();
    }
    match serde_wasm_bindgen::from_value::<AppConfig>(raw) {
        Ok(config) => {
            info!(
                collection = %config.gallery.collection,
                firebase = config.firebase.is_some(),
                "configuration loaded"
            );
            config
        }
        Err(err) => {
            warn!(error = %err, "invalid gallery configuration, using defaults");
            AppConfig::default()
        }
    }
}
