//! Image Validator/Compressor
//!
//! Normalizes arbitrary user input into a size-bounded, MIME-safe payload
//! before anything is sent upstream. Pipeline: validate → decode →
//! validate dimensions → compress, failing fast at the first failing stage
//! with each stage's error propagated unchanged.

pub mod compress;
pub mod validate;

pub use compress::{COMPRESSION_THRESHOLD, CompressOptions, CompressOutcome, compress};
pub use validate::{
    ALLOWED_MIME_TYPES, FileCheck, LARGE_FILE_THRESHOLD, MAX_DIMENSION, MAX_FILE_SIZE,
    MIN_DIMENSION, ValidationWarning, validate_dimensions, validate_file,
};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::StyleError;
use crate::utils::mime;

/// A normalized, size-bounded image ready for upstream calls.
/// Immutable once produced.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub base64_data: String,
    pub width: u32,
    pub height: u32,
    pub byte_size: usize,
}

impl ImagePayload {
    /// Render as a `data:<mime>;base64,<payload>` string.
    pub fn to_data_url(&self) -> String {
        mime::to_data_url(&self.mime_type, &self.base64_data)
    }
}

/// Output of the full processing pipeline, with both byte sizes so
/// callers can report savings.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub payload: ImagePayload,
    pub original_size: usize,
    pub processed_size: usize,
    pub was_compressed: bool,
    pub warnings: Vec<ValidationWarning>,
}

impl ProcessedImage {
    /// Byte savings from compression, as a percentage of the original.
    pub fn savings_percent(&self) -> f64 {
        if !self.was_compressed || self.original_size == 0 {
            return 0.0;
        }
        let saved = self.original_size.saturating_sub(self.processed_size);
        saved as f64 / self.original_size as f64 * 100.0
    }
}

/// Run the full pipeline on raw file bytes with default compression
/// options.
pub fn process_file(bytes: &[u8], declared_mime: Option<&str>) -> Result<ProcessedImage, StyleError> {
    process_file_with(bytes, declared_mime, &CompressOptions::default())
}

/// Run the full pipeline on raw file bytes.
pub fn process_file_with(
    bytes: &[u8],
    declared_mime: Option<&str>,
    opts: &CompressOptions,
) -> Result<ProcessedImage, StyleError> {
    let check = validate_file(bytes, declared_mime)?;
    finish_pipeline(bytes, &check.mime_type, check.warnings, opts)
}

/// Run the pipeline on already-base64 input, skipping the file-level size
/// check. Camera-sourced input has already passed device-level limits.
pub fn process_base64(base64_data: &str, format: &str) -> Result<ProcessedImage, StyleError> {
    process_base64_with(base64_data, format, &CompressOptions::default())
}

/// Run the base64 pipeline with explicit compression options.
pub fn process_base64_with(
    base64_data: &str,
    format: &str,
    opts: &CompressOptions,
) -> Result<ProcessedImage, StyleError> {
    let bytes = BASE64.decode(base64_data.trim())?;
    let mime_type = validate::resolve_mime(&bytes, mime::from_format(format))?;
    finish_pipeline(&bytes, &mime_type, Vec::new(), opts)
}

fn finish_pipeline(
    bytes: &[u8],
    mime_type: &str,
    warnings: Vec<ValidationWarning>,
    opts: &CompressOptions,
) -> Result<ProcessedImage, StyleError> {
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = {
        use image::GenericImageView;
        decoded.dimensions()
    };
    validate_dimensions(width, height)?;

    let outcome = compress(bytes, &decoded, mime_type, opts)?;
    if outcome.was_compressed {
        tracing::debug!(
            original_size = bytes.len(),
            processed_size = outcome.bytes.len(),
            width = outcome.width,
            height = outcome.height,
            mime_type = %outcome.mime_type,
            "compressed input image"
        );
    }

    Ok(ProcessedImage {
        payload: ImagePayload {
            mime_type: outcome.mime_type.clone(),
            base64_data: BASE64.encode(&outcome.bytes),
            width: outcome.width,
            height: outcome.height,
            byte_size: outcome.bytes.len(),
        },
        original_size: bytes.len(),
        processed_size: outcome.bytes.len(),
        was_compressed: outcome.was_compressed,
        warnings,
    })
}
