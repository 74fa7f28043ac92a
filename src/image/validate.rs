//! Input validation for user-supplied images.
//!
//! All limits are resolved locally, before any remote call is attempted.

use crate::error::StyleError;
use crate::utils::mime;

/// Hard limit on input file size.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Files above this size pass validation but produce a warning.
pub const LARGE_FILE_THRESHOLD: usize = 5 * 1024 * 1024;

/// Minimum pixel size on either axis.
pub const MIN_DIMENSION: u32 = 200;

/// Maximum pixel size on either axis. Larger inputs are rejected outright,
/// not downscaled.
pub const MAX_DIMENSION: u32 = 4096;

/// MIME types accepted as input.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Non-fatal finding from validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Accepted, but large enough that compression will kick in.
    LargeFile { byte_size: usize },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LargeFile { byte_size } => {
                write!(f, "large input file ({byte_size} bytes), will be compressed")
            }
        }
    }
}

/// Outcome of file-level validation: the resolved MIME type plus any
/// non-fatal warnings.
#[derive(Debug, Clone)]
pub struct FileCheck {
    pub mime_type: String,
    pub warnings: Vec<ValidationWarning>,
}

/// Resolve the input's MIME type and check it against the allow-list.
///
/// Magic bytes win over the declared type; the declared type is the
/// fallback for formats `infer` cannot sniff.
pub(crate) fn resolve_mime(bytes: &[u8], declared: Option<&str>) -> Result<String, StyleError> {
    let resolved = mime::sniff(bytes)
        .or_else(|| declared.map(str::to_string))
        .ok_or_else(|| StyleError::InvalidType("unknown".to_string()))?;
    if !ALLOWED_MIME_TYPES.contains(&resolved.as_str()) {
        return Err(StyleError::InvalidType(resolved));
    }
    Ok(resolved)
}

/// Validate raw file bytes: size limits and MIME allow-list.
pub fn validate_file(bytes: &[u8], declared_mime: Option<&str>) -> Result<FileCheck, StyleError> {
    if bytes.len() > MAX_FILE_SIZE {
        return Err(StyleError::FileTooLarge {
            size: bytes.len(),
            max: MAX_FILE_SIZE,
        });
    }
    let mime_type = resolve_mime(bytes, declared_mime)?;

    let mut warnings = Vec::new();
    if bytes.len() > LARGE_FILE_THRESHOLD {
        warnings.push(ValidationWarning::LargeFile {
            byte_size: bytes.len(),
        });
    }
    Ok(FileCheck {
        mime_type,
        warnings,
    })
}

/// Validate decoded pixel dimensions against the fixed bounds.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), StyleError> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(StyleError::DimensionsTooSmall { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(StyleError::DimensionsTooLarge { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn oversized_file_is_rejected_before_type_checks() {
        let bytes = vec![0u8; MAX_FILE_SIZE + 1];
        let err = validate_file(&bytes, Some("image/jpeg")).unwrap_err();
        assert!(matches!(err, StyleError::FileTooLarge { .. }));
    }

    #[test]
    fn large_but_acceptable_file_warns() {
        let mut bytes = vec![0u8; LARGE_FILE_THRESHOLD + 1];
        bytes[..PNG_MAGIC.len()].copy_from_slice(PNG_MAGIC);
        let check = validate_file(&bytes, None).unwrap();
        assert_eq!(check.mime_type, "image/png");
        assert_eq!(check.warnings.len(), 1);
    }

    #[test]
    fn sniffed_type_wins_over_declared() {
        let mut bytes = vec![0u8; 64];
        bytes[..PNG_MAGIC.len()].copy_from_slice(PNG_MAGIC);
        let check = validate_file(&bytes, Some("image/jpeg")).unwrap();
        assert_eq!(check.mime_type, "image/png");
    }

    #[test]
    fn disallowed_type_is_rejected() {
        // GIF sniffs fine but is not on the allow-list.
        let bytes = b"GIF89a\x00\x00\x00\x00\x00\x00".to_vec();
        let err = validate_file(&bytes, None).unwrap_err();
        assert!(matches!(err, StyleError::InvalidType(ref t) if t == "image/gif"));
    }

    #[test]
    fn dimension_bounds() {
        assert!(validate_dimensions(200, 200).is_ok());
        assert!(validate_dimensions(4096, 4096).is_ok());
        assert!(matches!(
            validate_dimensions(199, 800),
            Err(StyleError::DimensionsTooSmall { .. })
        ));
        assert!(matches!(
            validate_dimensions(800, 4097),
            Err(StyleError::DimensionsTooLarge { .. })
        ));
    }
}
