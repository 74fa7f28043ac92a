//! Device collaborator contracts.
//!
//! The camera/photo-picker and file system are external collaborators: the
//! presentation layer implements these traits against whatever platform it
//! runs on, and the core consumes them as narrow async primitives. User
//! cancellation is expressed as `None`, never as an error.

use async_trait::async_trait;

use crate::error::StyleError;

/// Where a photo is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoOrigin {
    Camera,
    Library,
}

/// Device capability gated by a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Camera,
    Photos,
}

/// Tri-state permission outcome reported by the device layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Partial access (e.g. a user-selected subset of the photo library).
    /// Treated as usable.
    Limited,
}

/// A photo handed over by the device layer, already base64-encoded.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub base64_data: String,
    /// Short format name as reported by the device, e.g. "jpeg".
    pub format: String,
}

/// Camera / photo-picker collaborator.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Current permission state without prompting.
    async fn check_permission(&self, capability: Capability) -> PermissionStatus;

    /// Prompt for permission if the platform allows it.
    async fn request_permission(&self, capability: Capability) -> PermissionStatus;

    /// Capture or pick a photo. `Ok(None)` means the user cancelled.
    async fn take_photo(&self, origin: PhotoOrigin) -> Result<Option<CapturedPhoto>, StyleError>;
}

/// File system collaborator (web builds): a single fallible primitive that
/// reads a user-selected file as a data URL.
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_as_data_url(&self, name: &str) -> Result<String, StyleError>;
}

/// Check-then-request flow for a capability. Denial maps to the typed
/// permission error; `Limited` counts as granted.
pub async fn ensure_permission(
    source: &dyn PhotoSource,
    capability: Capability,
) -> Result<(), StyleError> {
    match source.check_permission(capability).await {
        PermissionStatus::Granted | PermissionStatus::Limited => return Ok(()),
        PermissionStatus::Denied => {}
    }
    match source.request_permission(capability).await {
        PermissionStatus::Granted | PermissionStatus::Limited => Ok(()),
        PermissionStatus::Denied => Err(StyleError::PermissionDenied(capability)),
    }
}
