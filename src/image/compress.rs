//! Conditional downscale and re-encode of validated images.
//!
//! The output stays JPEG unless the source is PNG, which is preserved for
//! transparency.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::StyleError;

/// Approximate byte size above which an in-bounds image is still
/// re-encoded.
pub const COMPRESSION_THRESHOLD: usize = 2 * 1024 * 1024;

/// Tunables for [`compress`].
#[derive(Debug, Clone)]
pub struct CompressOptions {
    /// Longest-axis bound after which the image is downscaled.
    pub max_dimension: u32,
    /// JPEG quality (1-100).
    pub quality: u8,
    /// Re-encode even when no trigger fires.
    pub force: bool,
    /// Byte-size trigger for re-encoding without resizing.
    pub size_threshold: usize,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_dimension: 1920,
            quality: 85,
            force: false,
            size_threshold: COMPRESSION_THRESHOLD,
        }
    }
}

/// Result of a [`compress`] call.
#[derive(Debug, Clone)]
pub struct CompressOutcome {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    /// False when compression was a no-op and `bytes` are the original.
    pub was_compressed: bool,
}

/// Downscale and re-encode `decoded` when it exceeds the dimension or
/// byte-size triggers (or when forced); otherwise pass the original bytes
/// through untouched.
///
/// Resizing scales the longer axis down to `max_dimension`, preserving
/// aspect ratio with integer rounding on the shorter axis.
pub fn compress(
    original: &[u8],
    decoded: &DynamicImage,
    source_mime: &str,
    opts: &CompressOptions,
) -> Result<CompressOutcome, StyleError> {
    let (width, height) = decoded.dimensions();
    let needs_resize = width > opts.max_dimension || height > opts.max_dimension;
    let needs_recompress = original.len() > opts.size_threshold;

    if !needs_resize && !needs_recompress && !opts.force {
        return Ok(CompressOutcome {
            bytes: original.to_vec(),
            mime_type: source_mime.to_string(),
            width,
            height,
            was_compressed: false,
        });
    }

    let working = if needs_resize {
        let ratio = f64::from(opts.max_dimension) / f64::from(width.max(height));
        let new_width = ((f64::from(width) * ratio).round() as u32).max(1);
        let new_height = ((f64::from(height) * ratio).round() as u32).max(1);
        decoded.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3)
    } else {
        decoded.clone()
    };
    let (out_width, out_height) = working.dimensions();

    let mut bytes = Vec::new();
    let mime_type = if source_mime == "image/png" {
        working.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        "image/png"
    } else {
        // JPEG has no alpha channel.
        let rgb = working.to_rgb8();
        let mut cursor = Cursor::new(&mut bytes);
        JpegEncoder::new_with_quality(&mut cursor, opts.quality).encode_image(&rgb)?;
        "image/jpeg"
    };

    Ok(CompressOutcome {
        bytes,
        mime_type: mime_type.to_string(),
        width: out_width,
        height: out_height,
        was_compressed: true,
    })
}
