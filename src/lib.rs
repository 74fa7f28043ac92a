//! lookforge
//!
//! Client-side orchestration for AI outfit styling. The crate takes a
//! user-supplied clothing photo, normalizes it into a size-bounded
//! payload, and coordinates the remote generative calls that turn it into
//! a styled session: item/color analysis and fashion-DNA analysis run
//! concurrently, then one outfit image is generated per suggestion, fully
//! in parallel, with per-slot failure isolation, bounded retries, and
//! best-effort cancellation.
//!
//! This is an in-process library consumed by a presentation layer; it owns
//! no UI, no wire format of its own, and no device I/O. The camera/photo
//! picker and file system are consumed through the traits in [`capture`].
#![deny(unsafe_code)]

pub mod capture;
pub mod client;
pub mod error;
pub mod image;
pub mod orchestrator;
pub mod retry;
pub mod types;
pub mod utils;

pub use error::{ErrorCategory, StyleError};

/// Common imports for consumers.
pub mod prelude {
    pub use crate::capture::{
        Capability, CapturedPhoto, FileReader, PermissionStatus, PhotoOrigin, PhotoSource,
        ensure_permission,
    };
    pub use crate::client::{AnalysisClient, GenerativeBackend, HttpBackend};
    pub use crate::error::{ErrorCategory, StyleError};
    pub use crate::image::{
        CompressOptions, ImagePayload, ProcessedImage, process_base64, process_file,
    };
    pub use crate::orchestrator::{SessionState, StylingSession};
    pub use crate::retry::{RetryExecutor, RetryPolicy, with_retry};
    pub use crate::types::{
        AnalysisResult, FashionDna, OutfitKind, OutfitSeed, OutfitSuggestion,
    };
    pub use crate::utils::CancelHandle;
}
