//! Cover artwork handling.
//!
//! The cover is used two ways depending on configuration: embedded into
//! every output file, or written once as a `cover.jpg` side artifact
//! next to the finished files. Both forms are bounded thumbnails.

use std::path::Path;

use thiserror::Error;

/// Thumbnails are bounded to this many pixels on the longer edge.
const THUMBNAIL_EDGE: u32 = 300;

#[derive(Error, Debug)]
pub enum ArtworkError {
    #[error("cover image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode cover bytes and write a JPEG no larger than 300x300,
/// preserving aspect ratio. Covers that already fit are written at
/// their native size, never upscaled.
pub fn write_thumbnail(cover_bytes: &[u8], output: &Path) -> Result<(), ArtworkError> {
    let decoded = image::load_from_memory(cover_bytes)?;
    let bounded = if decoded.width() <= THUMBNAIL_EDGE && decoded.height() <= THUMBNAIL_EDGE {
        decoded
    } else {
        decoded.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE)
    };
    // JPEG has no alpha channel.
    bounded.to_rgb8().save(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb::<u8>([120, 80, 40]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .unwrap();
        bytes
    }

    #[test]
    fn thumbnail_is_bounded_to_300() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cover.jpg");

        write_thumbnail(&jpeg_bytes(900, 600), &out).unwrap();

        let written = image::open(&out).unwrap();
        assert!(written.width() <= 300);
        assert!(written.height() <= 300);
        // Aspect ratio preserved: 900x600 -> 300x200.
        assert_eq!(written.width(), 300);
        assert_eq!(written.height(), 200);
    }

    #[test]
    fn small_cover_is_not_upscaled() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cover.jpg");

        write_thumbnail(&jpeg_bytes(100, 80), &out).unwrap();

        let written = image::open(&out).unwrap();
        assert_eq!(written.width(), 100);
        assert_eq!(written.height(), 80);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cover.jpg");
        let err = write_thumbnail(b"not an image", &out).unwrap_err();
        assert!(matches!(err, ArtworkError::Image(_)));
    }
}
