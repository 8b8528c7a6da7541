//! Image Dimension Probe
//!
//! Reads width and height from the image header only.

use std::io::Cursor;

use image::ImageReader;

/// `(width, height)` of an encoded image, or `None` if the format is
/// unknown or the header is damaged.
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format().ok()?;
    match reader.into_dimensions() {
        Ok(dimensions) => Some(dimensions),
        Err(err) => {
            tracing::debug!(error = %err, "image header unreadable");
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::RgbImage::new(width, height)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png fixture");
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_dimensions() {
        assert_eq!(image_dimensions(&encode_png(120, 80)), Some((120, 80)));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(image_dimensions(b"definitely not an image"), None);
    }

    #[test]
    fn test_truncated_header_is_none() {
        let png = encode_png(10, 10);
        assert_eq!(image_dimensions(&png[..12]), None);
    }
}
