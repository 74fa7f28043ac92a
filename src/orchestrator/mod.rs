//! Styling Orchestrator
//!
//! Top-level workflow controller for one styling session: runs the dual
//! analysis calls concurrently, fans out one image generation per outfit
//! suggestion, applies each outcome to its own slot, and honors a single
//! cancellation handle throughout.
//!
//! Session states: `Idle → ImageReady → Analyzing → Ready`, with `Aborted`
//! reachable from `Analyzing` on cancellation or clear.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use uuid::Uuid;

use crate::client::AnalysisClient;
use crate::error::StyleError;
use crate::image::ImagePayload;
use crate::types::{AnalysisResult, FashionDna, OutfitSuggestion};
use crate::utils::CancelHandle;

/// Lifecycle state of a [`StylingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ImageReady,
    Analyzing,
    Ready,
    Aborted,
}

/// One user-selected image through to its fully rendered (or failed)
/// styling result. Exactly one session is live at a time; selecting a new
/// image or clearing destroys all derived state.
pub struct StylingSession {
    id: Uuid,
    client: Arc<AnalysisClient>,
    state: SessionState,
    payload: Option<ImagePayload>,
    analysis: Option<AnalysisResult>,
    fashion_dna: Option<FashionDna>,
    suggestions: Vec<OutfitSuggestion>,
    cancel: CancelHandle,
}

impl StylingSession {
    pub fn new(client: Arc<AnalysisClient>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client,
            state: SessionState::Idle,
            payload: None,
            analysis: None,
            fashion_dna: None,
            suggestions: Vec::new(),
            cancel: CancelHandle::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn fashion_dna(&self) -> Option<&FashionDna> {
        self.fashion_dna.as_ref()
    }

    pub fn suggestions(&self) -> &[OutfitSuggestion] {
        self.suggestions.as_slice()
    }

    /// The session's abort signal. Cancelling it stops any in-flight run
    /// from applying further state updates; already-dispatched remote
    /// requests are not aborted at the transport level.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Install a normalized image, dropping any previous derived state.
    pub fn set_image(&mut self, payload: ImagePayload) {
        self.cancel.cancel();
        self.cancel = CancelHandle::new();
        self.payload = Some(payload);
        self.analysis = None;
        self.fashion_dna = None;
        self.suggestions.clear();
        self.state = SessionState::ImageReady;
    }

    /// Destroy all session state, releasing held image artifacts.
    pub fn clear(&mut self) {
        self.cancel.cancel();
        self.cancel = CancelHandle::new();
        self.payload = None;
        self.analysis = None;
        self.fashion_dna = None;
        self.suggestions.clear();
        self.state = SessionState::Idle;
    }

    /// Run the full styling workflow for the installed image.
    ///
    /// Item analysis and fashion DNA run concurrently and are each awaited
    /// to settlement. A DNA failure is logged and swallowed. An item
    /// analysis failure is the session-level error and populates nothing.
    /// On analysis success every suggestion slot is materialized in the
    /// generating state, then all generations run fully concurrently; each
    /// outcome replaces only its own slot, and all settle before the
    /// session is `Ready`.
    pub async fn run(&mut self) -> Result<(), StyleError> {
        let payload = self
            .payload
            .clone()
            .ok_or_else(|| StyleError::InvalidInput("no image installed".to_string()))?;
        self.state = SessionState::Analyzing;
        let cancel = self.cancel.clone();
        tracing::debug!(session = %self.id, "starting dual analysis");

        let (item, dna) = tokio::join!(
            self.client.analyze_item(&payload),
            self.client.analyze_fashion_dna(&payload),
        );
        if cancel.is_cancelled() {
            self.state = SessionState::Aborted;
            return Ok(());
        }

        match dna {
            Ok(d) => self.fashion_dna = Some(d),
            // Supplementary data: never block or fail the session over it.
            Err(e) => tracing::warn!(session = %self.id, error = %e, "fashion DNA analysis failed"),
        }

        let analysis = match item {
            Ok(a) => a,
            Err(e) => {
                self.state = SessionState::ImageReady;
                return Err(e);
            }
        };

        self.suggestions = analysis
            .suggestions
            .iter()
            .map(OutfitSuggestion::pending)
            .collect();
        let item_description = analysis.description.clone();
        let seeds = analysis.suggestions.clone();
        self.analysis = Some(analysis);

        // Fan-out: every generation call runs concurrently; outcomes come
        // back as (index, result) events and are applied serially, one
        // whole-slot replacement per event.
        let mut generations: FuturesUnordered<_> = seeds
            .iter()
            .enumerate()
            .map(|(index, seed)| {
                let client = self.client.clone();
                let item_description = item_description.clone();
                async move {
                    let outcome = client
                        .generate_outfit_image(&item_description, &seed.description, seed.kind)
                        .await;
                    (index, outcome)
                }
            })
            .collect();

        while let Some((index, outcome)) = generations.next().await {
            if cancel.is_cancelled() {
                self.state = SessionState::Aborted;
                return Ok(());
            }
            let slot = &self.suggestions[index];
            self.suggestions[index] = match outcome {
                Ok(image_url) => slot.completed(image_url),
                Err(e) => {
                    tracing::warn!(
                        session = %self.id,
                        slot = index,
                        error = %e,
                        "outfit image generation failed"
                    );
                    slot.failed(e.user_message())
                }
            };
        }

        // An abort raised between the last settlement and this point must
        // still win over Ready.
        if cancel.is_cancelled() {
            self.state = SessionState::Aborted;
            return Ok(());
        }
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Abort the session from the inside. Equivalent to cancelling the
    /// handle returned by [`Self::cancel_handle`].
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    /// Replace one suggestion's image via an edit instruction.
    ///
    /// A side operation outside the main state machine: valid any time the
    /// slot holds an image and is not mid-generation. Callers serialize
    /// edits per slot. On success only that slot's `image_url` changes.
    pub async fn edit_suggestion(
        &mut self,
        index: usize,
        instruction: &str,
    ) -> Result<(), StyleError> {
        let slot = self
            .suggestions
            .get(index)
            .ok_or_else(|| StyleError::InvalidInput(format!("no suggestion at index {index}")))?;
        if slot.is_generating {
            return Err(StyleError::InvalidInput(
                "suggestion is still generating".to_string(),
            ));
        }
        let current = slot.image_url.clone().ok_or_else(|| {
            StyleError::InvalidInput("suggestion has no image to edit".to_string())
        })?;

        let cancel = self.cancel.clone();
        let replacement = self.client.edit_outfit_image(&current, instruction).await?;
        if cancel.is_cancelled() {
            // Stale settlement after abort or clear: discard.
            return Ok(());
        }
        if let Some(slot) = self.suggestions.get_mut(index) {
            slot.image_url = Some(replacement);
        }
        Ok(())
    }
}
