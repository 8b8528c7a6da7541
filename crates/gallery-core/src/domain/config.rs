//! Gallery Configuration
//!
//! Every field has a default so a partial JSON object from the host page is
//! enough to override a single setting.

use serde::{Deserialize, Serialize};

use super::layout::MIN_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryConfig {
    /// Document collection and storage key prefix
    pub collection: String,
    pub min_size: f64,
    /// Width given to freshly selected images
    pub initial_width: f64,
    /// Diagonal offset between consecutive new items
    pub cascade_step: f64,
    /// Height/width ratio used when the image header cannot be read
    pub fallback_aspect: f64,
    pub snap: SnapConfig,
    pub canvas: CanvasSize,
    /// How often the gallery listener re-reads the collection
    pub poll_interval_ms: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            collection: "gallery".to_string(),
            min_size: MIN_SIZE,
            initial_width: 260.0,
            cascade_step: 24.0,
            fallback_aspect: 0.75,
            snap: SnapConfig::default(),
            canvas: CanvasSize::default(),
            poll_interval_ms: 3000,
        }
    }
}

impl GalleryConfig {
    /// Grid step when snapping is on
    pub fn snap_step(&self) -> Option<f64> {
        self.snap.step_if_enabled()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub enabled: bool,
    pub step: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { enabled: false, step: 8.0 }
    }
}

impl SnapConfig {
    pub fn step_if_enabled(&self) -> Option<f64> {
        (self.enabled && self.step.is_finite() && self.step > 0.0).then_some(self.step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self { width: 1200.0, height: 800.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: GalleryConfig =
            serde_json::from_str(r#"{"collection":"moodboard","snap":{"enabled":true}}"#).unwrap();
        assert_eq!(config.collection, "moodboard");
        assert_eq!(config.snap_step(), Some(8.0));
        assert_eq!(config.min_size, 80.0);
        assert_eq!(config.canvas, CanvasSize::default());
    }

    #[test]
    fn test_snap_disabled_by_default() {
        assert_eq!(GalleryConfig::default().snap_step(), None);
    }

    #[test]
    fn test_non_positive_step_disables_snap() {
        let snap = SnapConfig { enabled: true, step: 0.0 };
        assert_eq!(snap.step_if_enabled(), None);
    }
}
