//! MIME Type and Data-URL Utilities
//!
//! Detection from file bytes (magic numbers via the `infer` crate) with a
//! small extension map as fallback, plus data-URL packing/unpacking for
//! inline image payloads.

use crate::error::StyleError;

/// Guess MIME by inspecting bytes (magic numbers).
pub fn sniff(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Map a device-reported format name or extension to a MIME type.
pub fn from_format(format: &str) -> Option<&'static str> {
    match format.trim_start_matches('.').to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Render a `data:<mime>;base64,<payload>` string.
pub fn to_data_url(mime_type: &str, base64_data: &str) -> String {
    format!("data:{mime_type};base64,{base64_data}")
}

/// Split a data URL into its MIME type and base64 payload.
///
/// Inputs are never assumed to carry a particular MIME type; the type is
/// always read out of the URL itself.
pub fn split_data_url(url: &str) -> Result<(String, String), StyleError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| StyleError::InvalidInput("expected a data URL".to_string()))?;
    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| StyleError::InvalidInput("data URL is not base64-encoded".to_string()))?;
    if mime_type.is_empty() || payload.is_empty() {
        return Err(StyleError::InvalidInput("empty data URL".to_string()));
    }
    Ok((mime_type.to_string(), payload.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_prefers_magic_bytes() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(sniff(&png), Some("image/png".to_string()));
        assert_eq!(sniff(b"plain text"), None);
    }

    #[test]
    fn format_names_map_case_insensitively() {
        assert_eq!(from_format("JPEG"), Some("image/jpeg"));
        assert_eq!(from_format(".jpg"), Some("image/jpeg"));
        assert_eq!(from_format("heic"), Some("image/heic"));
        assert_eq!(from_format("tiff"), None);
    }

    #[test]
    fn data_url_round_trip() {
        let url = to_data_url("image/webp", "aGVsbG8=");
        let (mime, payload) = split_data_url(&url).unwrap();
        assert_eq!(mime, "image/webp");
        assert_eq!(payload, "aGVsbG8=");
    }

    #[test]
    fn split_rejects_non_data_urls() {
        assert!(split_data_url("https://example.com/a.png").is_err());
        assert!(split_data_url("data:image/png,rawdata").is_err());
    }
}
