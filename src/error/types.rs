//! Core error types for the styling client.
//!
//! Every failure surfaced by this crate is a `StyleError`. Each variant
//! carries enough detail for logs, classifies itself as retryable or not,
//! and maps to exactly one fixed user-facing message. Raw error text is
//! never shown to users.

use crate::capture::Capability;

/// Coarse-grained error category for classification and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input validation failures (file size, MIME type, dimensions)
    Validation,
    /// Device permission failures
    Permission,
    /// Transport-level failures (connection, timeout)
    Network,
    /// Remote service failures (5xx, empty or imageless responses)
    Server,
    /// Response content failures (malformed structured output)
    Parsing,
    /// Rate limiting by the remote service
    RateLimit,
    /// Credential failures
    Authentication,
    /// Bugs and unclassified failures
    Internal,
}

/// The error type for all styling operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StyleError {
    /// Input exceeds the maximum allowed byte size.
    #[error("file too large: {size} bytes (max {max})")]
    FileTooLarge { size: usize, max: usize },

    /// MIME type is not in the allow-list.
    #[error("unsupported image type: {0}")]
    InvalidType(String),

    /// Decoded pixel dimensions below the minimum.
    #[error("image dimensions too small: {width}x{height}")]
    DimensionsTooSmall { width: u32, height: u32 },

    /// Decoded pixel dimensions above the maximum.
    #[error("image dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// The image bytes could not be decoded.
    #[error("corrupted image: {0}")]
    CorruptedImage(String),

    /// Camera or photo library access was denied.
    #[error("permission denied for {0:?}")]
    PermissionDenied(Capability),

    /// The remote call succeeded but returned no content.
    #[error("empty response from styling service: {0}")]
    EmptyResponse(String),

    /// The remote content was not well-formed structured data.
    #[error("failed to parse service response: {0}")]
    ParseError(String),

    /// An image generation response contained no binary image part.
    #[error("no image data in generation response: {0}")]
    NoImageData(String),

    /// An image edit response contained no binary image part.
    #[error("image edit returned no image: {0}")]
    EditFailed(String),

    /// The retry budget for an operation was exhausted.
    #[error("{context}: retries exhausted after {attempts} attempts")]
    MaxRetriesExceeded {
        context: String,
        attempts: u32,
        #[source]
        source: Box<StyleError>,
    },

    /// The remote service returned a non-success HTTP status.
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// Transport-level HTTP failure (connection reset, DNS, TLS).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The request timed out at the transport level.
    #[error("request timed out: {0}")]
    TimeoutError(String),

    /// The remote service rate-limited the request.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The remote service rejected the credentials.
    #[error("authentication failed: {0}")]
    AuthenticationError(String),

    /// A caller-supplied argument was invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Something that should not happen happened.
    #[error("internal error: {0}")]
    InternalError(String),
}

impl StyleError {
    /// Convenience constructor for HTTP status errors.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
        }
    }

    /// Classify this error into a coarse category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileTooLarge { .. }
            | Self::InvalidType(_)
            | Self::DimensionsTooSmall { .. }
            | Self::DimensionsTooLarge { .. }
            | Self::CorruptedImage(_)
            | Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::PermissionDenied(_) => ErrorCategory::Permission,
            Self::HttpError(_) | Self::TimeoutError(_) => ErrorCategory::Network,
            Self::EmptyResponse(_) | Self::NoImageData(_) | Self::EditFailed(_) => {
                ErrorCategory::Server
            }
            Self::ParseError(_) => ErrorCategory::Parsing,
            Self::RateLimited(_) => ErrorCategory::RateLimit,
            Self::AuthenticationError(_) => ErrorCategory::Authentication,
            Self::ApiError { code, .. } => {
                if (500..=599).contains(code) {
                    ErrorCategory::Server
                } else {
                    ErrorCategory::Validation
                }
            }
            Self::MaxRetriesExceeded { source, .. } => source.category(),
            Self::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// Whether retrying the failed operation may succeed.
    ///
    /// Validation and parsing failures are deterministic and never retried.
    /// `MaxRetriesExceeded` is terminal: the budget is already spent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::EmptyResponse(_)
            | Self::NoImageData(_)
            | Self::EditFailed(_)
            | Self::HttpError(_)
            | Self::TimeoutError(_)
            | Self::RateLimited(_) => true,
            Self::ApiError { code, .. } => (500..=599).contains(code),
            _ => false,
        }
    }

    /// HTTP status code, when this error originated from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::MaxRetriesExceeded { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// The fixed, non-technical message to show the user for this error.
    ///
    /// This is a pure kind-to-string map; underlying detail stays in logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::FileTooLarge { .. } => {
                "That photo is too large. Please choose an image under 10MB."
            }
            Self::InvalidType(_) => {
                "That file type isn't supported. Please use a JPEG, PNG, WebP, or HEIC photo."
            }
            Self::DimensionsTooSmall { .. } => {
                "That image is too small to analyze. Please use a photo at least 200x200 pixels."
            }
            Self::DimensionsTooLarge { .. } => {
                "That image is too large to process. Please use a photo under 4096x4096 pixels."
            }
            Self::CorruptedImage(_) => "We couldn't read that image. Please try a different photo.",
            Self::PermissionDenied(_) => {
                "Access was denied. Please enable camera and photo permissions in your device settings."
            }
            Self::EmptyResponse(_) => {
                "The styling service didn't respond. Please try again in a moment."
            }
            Self::ParseError(_) => {
                "We couldn't understand the styling service's response. Please try again."
            }
            Self::NoImageData(_) => "We couldn't generate that outfit image. Please try again.",
            Self::EditFailed(_) => "That edit didn't go through. Please try again.",
            Self::MaxRetriesExceeded { .. } => {
                "The styling service is having trouble right now. Please try again in a moment."
            }
            Self::RateLimited(_) => {
                "We're sending requests a little too fast. Please wait a moment and try again."
            }
            Self::AuthenticationError(_) => {
                "The styling service rejected our credentials. Please check your configuration."
            }
            Self::ApiError { .. }
            | Self::HttpError(_)
            | Self::TimeoutError(_)
            | Self::InvalidInput(_)
            | Self::InternalError(_) => {
                "Something went wrong talking to the styling service. Please try again."
            }
        }
    }
}
