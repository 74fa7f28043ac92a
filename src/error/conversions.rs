//! Type Conversions for StyleError
//!
//! From implementations for the external error types this crate touches.

use super::types::StyleError;

impl From<reqwest::Error> for StyleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StyleError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<image::ImageError> for StyleError {
    fn from(err: image::ImageError) -> Self {
        Self::CorruptedImage(err.to_string())
    }
}

impl From<base64::DecodeError> for StyleError {
    fn from(err: base64::DecodeError) -> Self {
        Self::CorruptedImage(format!("invalid base64 payload: {err}"))
    }
}
