//! Cancellation utilities
//!
//! Provides a first-class cancellation handle for a styling session. One
//! handle is associated with each session; any task observing a cancelled
//! handle after an await must discard its result rather than apply it.

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// A handle that can be used to request cancellation.
///
/// Cancellation is best-effort and local: already-dispatched remote
/// requests are not aborted at the transport level, their responses are
/// simply discarded on arrival.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a fresh, uncancelled handle.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Work observing this handle stops applying
    /// updates as soon as possible.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}
