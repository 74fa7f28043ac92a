//! Remote Analysis Client
//!
//! Issues the styling operations against the generative service: item and
//! color analysis, fashion DNA analysis, outfit image generation, and
//! post-hoc image edits. Every operation routes through the retry
//! executor with a human-readable context string, and maps raw failures
//! into the typed taxonomy.
//!
//! Failure policy, applied uniformly: an empty response is retryable (a
//! transient generation hiccup), malformed structured output is not
//! (retrying will not fix it), a missing image part is retryable.

mod http;
pub mod wire;

pub use http::{GenerativeBackend, HttpBackend};

use std::sync::Arc;

use secrecy::SecretString;
use serde::de::DeserializeOwned;

use crate::error::StyleError;
use crate::image::ImagePayload;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::types::{AnalysisResult, FashionDna, OutfitKind};
use crate::utils::mime;
use wire::{Blob, GenerateContentRequest, Part};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const ITEM_ANALYSIS_PROMPT: &str = "You are a personal fashion stylist. Analyze the clothing item \
in this photo. Respond with JSON only, no prose: itemName, originalPalette (dominant colors as hex \
strings), complimentaryPalette (pairing colors as hex strings), description, and suggestions, an \
array of three outfits each with type (casual, business or nightOut), description and colorsUsed.";

const FASHION_DNA_PROMPT: &str = "You are a fashion historian. Trace the fashion DNA of the \
garment in this photo. Respond with JSON only, no prose: era, styleMovements, designerInfluences, \
silhouette, fabricStory, culturalContext, investmentClassification, styleArchetype, editorialNotes.";

/// Client for the generative styling service.
pub struct AnalysisClient {
    backend: Arc<dyn GenerativeBackend>,
    retry: RetryExecutor,
    analysis_model: String,
    image_model: String,
}

impl std::fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisClient")
            .field("analysis_model", &self.analysis_model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}


impl AnalysisClient {
    pub fn builder() -> AnalysisClientBuilder {
        AnalysisClientBuilder::new()
    }

    /// Analyze the item: name, palettes, description and outfit seeds.
    pub async fn analyze_item(&self, image: &ImagePayload) -> Result<AnalysisResult, StyleError> {
        let request = GenerateContentRequest::from_parts(vec![
            inline_part(&image.mime_type, &image.base64_data),
            Part::Text {
                text: ITEM_ANALYSIS_PROMPT.to_string(),
            },
        ])
        .with_json_response();
        self.structured_call("item analysis", &self.analysis_model, request)
            .await
    }

    /// Historical/stylistic analysis. Independent of [`Self::analyze_item`];
    /// callers treat its failure as non-blocking.
    pub async fn analyze_fashion_dna(
        &self,
        image: &ImagePayload,
    ) -> Result<FashionDna, StyleError> {
        let request = GenerateContentRequest::from_parts(vec![
            inline_part(&image.mime_type, &image.base64_data),
            Part::Text {
                text: FASHION_DNA_PROMPT.to_string(),
            },
        ])
        .with_json_response();
        self.structured_call("fashion DNA analysis", &self.analysis_model, request)
            .await
    }

    /// Generate one outfit image. Returns a data URL.
    pub async fn generate_outfit_image(
        &self,
        item_description: &str,
        outfit_description: &str,
        style: OutfitKind,
    ) -> Result<String, StyleError> {
        let prompt = format!(
            "Generate a photorealistic flat-lay photo of a complete {style} outfit built around \
             this item: {item_description}. The outfit: {outfit_description}. Clean neutral \
             background, no people, no text."
        );
        let request = GenerateContentRequest::from_parts(vec![Part::Text { text: prompt }])
            .with_image_response();
        self.image_call("outfit image generation", request, StyleError::NoImageData)
            .await
    }

    /// Re-generate an existing outfit image with an edit instruction.
    /// Returns the replacement data URL.
    pub async fn edit_outfit_image(
        &self,
        current_image_url: &str,
        instruction: &str,
    ) -> Result<String, StyleError> {
        let (mime_type, data) = mime::split_data_url(current_image_url)?;
        let request = GenerateContentRequest::from_parts(vec![
            inline_part(&mime_type, &data),
            Part::Text {
                text: format!(
                    "Edit this outfit image: {instruction}. Keep the composition, framing and \
                     lighting consistent."
                ),
            },
        ])
        .with_image_response();
        self.image_call("outfit image edit", request, StyleError::EditFailed)
            .await
    }

    /// Call, extract JSON text, parse. The whole sequence sits inside the
    /// retry loop so that retryable extraction failures are retried and
    /// parse failures short-circuit.
    async fn structured_call<T: DeserializeOwned>(
        &self,
        context: &str,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<T, StyleError> {
        self.retry
            .execute(context, || {
                let request = request.clone();
                async move {
                    let response = self.backend.generate(model, request).await?;
                    let text = response
                        .first_text()
                        .ok_or_else(|| StyleError::EmptyResponse(context.to_string()))?;
                    serde_json::from_str::<T>(strip_code_fence(text))
                        .map_err(|e| StyleError::ParseError(format!("{context}: {e}")))
                }
            })
            .await
    }

    async fn image_call(
        &self,
        context: &str,
        request: GenerateContentRequest,
        missing_image: fn(String) -> StyleError,
    ) -> Result<String, StyleError> {
        self.retry
            .execute(context, || {
                let request = request.clone();
                async move {
                    let response = self.backend.generate(&self.image_model, request).await?;
                    let blob = response
                        .first_inline_data()
                        .ok_or_else(|| missing_image(context.to_string()))?;
                    Ok(mime::to_data_url(&blob.mime_type, &blob.data))
                }
            })
            .await
    }
}

fn inline_part(mime_type: &str, base64_data: &str) -> Part {
    Part::InlineData {
        inline_data: Blob {
            mime_type: mime_type.to_string(),
            data: base64_data.to_string(),
        },
    }
}

/// Models answer "JSON only" prompts wrapped in markdown fences often
/// enough that stripping them is table stakes.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Builder for [`AnalysisClient`].
pub struct AnalysisClientBuilder {
    base_url: String,
    api_key: Option<SecretString>,
    analysis_model: String,
    image_model: String,
    retry_policy: RetryPolicy,
    backend: Option<Arc<dyn GenerativeBackend>>,
}

impl AnalysisClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            retry_policy: RetryPolicy::default(),
            backend: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Model used for both analysis operations.
    pub fn analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis_model = model.into();
        self
    }

    /// Model used for image generation and edits.
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Swap in a custom transport. Takes precedence over `base_url`/`api_key`.
    pub fn backend(mut self, backend: Arc<dyn GenerativeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn build(self) -> Result<AnalysisClient, StyleError> {
        let backend = match self.backend {
            Some(backend) => backend,
            None => {
                let api_key = self.api_key.ok_or_else(|| {
                    StyleError::InvalidInput("an API key or custom backend is required".to_string())
                })?;
                Arc::new(HttpBackend::new(self.base_url, api_key))
            }
        };
        Ok(AnalysisClient {
            backend,
            retry: RetryExecutor::new(self.retry_policy),
            analysis_model: self.analysis_model,
            image_model: self.image_model,
        })
    }
}

impl Default for AnalysisClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
