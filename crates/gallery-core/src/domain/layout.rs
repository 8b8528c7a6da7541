//! Layout Record
//!
//! The `{x, y, w, h}` geometry of one item on the canvas, in CSS pixels
//! relative to the canvas origin.

use serde::{Deserialize, Serialize};

use super::config::GalleryConfig;

/// Smallest width or height an item may have.
pub const MIN_SIZE: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Layout {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Seed layout for the `index`-th pending item.
    ///
    /// Width is fixed, height follows the image aspect ratio (or the configured
    /// fallback when the dimensions could not be read). Items cascade
    /// diagonally by index so a batch never lands in one exact spot.
    pub fn initial(index: usize, dimensions: Option<(u32, u32)>, config: &GalleryConfig) -> Self {
        let min = config.min_size.max(1.0);
        let w = config.initial_width.max(min);
        let ratio = match dimensions {
            Some((width, height)) if width > 0 && height > 0 => height as f64 / width as f64,
            _ => config.fallback_aspect,
        };
        let h = (w * ratio).round().max(min);

        let step = config.cascade_step.max(0.0);
        let offset = if step > 0.0 {
            let span = (config.canvas.width - w).min(config.canvas.height - h).max(0.0);
            let slots = (span / step).floor() as usize + 1;
            (index % slots) as f64 * step
        } else {
            0.0
        };

        Self { x: offset, y: offset, w, h }
    }

    /// Enforce the minimum size invariant without moving the origin.
    pub fn with_min_size(self, min: f64) -> Self {
        Self {
            w: self.w.max(min),
            h: self.h.max(min),
            ..self
        }
    }

    /// Inline style placing an element at this layout inside a
    /// `position: relative` container.
    pub fn to_style(&self) -> String {
        format!(
            "transform: translate({}px, {}px); width: {}px; height: {}px;",
            self.x, self.y, self.w, self.h
        )
    }
}
