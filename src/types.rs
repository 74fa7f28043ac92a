//! Data model for a styling session.
//!
//! These types cross the wire as the structured-JSON halves of the
//! generative service's responses, so field names follow the camelCase
//! schema the service is asked to produce.

use serde::{Deserialize, Serialize};

/// Outfit style requested from the generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutfitKind {
    Casual,
    Business,
    NightOut,
}

impl std::fmt::Display for OutfitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Casual => write!(f, "casual"),
            Self::Business => write!(f, "business"),
            Self::NightOut => write!(f, "night out"),
        }
    }
}

/// One outfit idea as returned inside an [`AnalysisResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitSeed {
    #[serde(rename = "type")]
    pub kind: OutfitKind,
    pub description: String,
    #[serde(default)]
    pub colors_used: Vec<String>,
}

/// Result of the item/color analysis call. Produced once per session,
/// read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub item_name: String,
    /// Dominant colors of the photographed item, as hex strings.
    pub original_palette: Vec<String>,
    /// Colors that pair well with the item, as hex strings.
    pub complimentary_palette: Vec<String>,
    pub description: String,
    pub suggestions: Vec<OutfitSeed>,
}

/// Historical/stylistic "fashion DNA" analysis. Best-effort supplementary
/// data; its absence never blocks a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FashionDna {
    pub era: String,
    #[serde(default)]
    pub style_movements: Vec<String>,
    #[serde(default)]
    pub designer_influences: Vec<String>,
    pub silhouette: String,
    pub fabric_story: String,
    pub cultural_context: String,
    pub investment_classification: String,
    pub style_archetype: String,
    pub editorial_notes: String,
}

/// One outfit slot in a session. Created in the generating state as soon
/// as analysis settles, then transitions exactly once to either an image
/// or an error. A later user edit may replace the image again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitSuggestion {
    #[serde(rename = "type")]
    pub kind: OutfitKind,
    pub description: String,
    #[serde(default)]
    pub colors_used: Vec<String>,
    /// Data URL of the generated outfit image, once generation succeeds.
    pub image_url: Option<String>,
    pub is_generating: bool,
    /// Fixed user-facing message, set when generation for this slot failed.
    pub error: Option<String>,
}

impl OutfitSuggestion {
    /// Materialize a pending slot from an analysis seed.
    pub fn pending(seed: &OutfitSeed) -> Self {
        Self {
            kind: seed.kind,
            description: seed.description.clone(),
            colors_used: seed.colors_used.clone(),
            image_url: None,
            is_generating: true,
            error: None,
        }
    }

    /// Terminal success state for this slot.
    pub(crate) fn completed(&self, image_url: String) -> Self {
        Self {
            image_url: Some(image_url),
            is_generating: false,
            error: None,
            ..self.clone()
        }
    }

    /// Terminal failure state for this slot.
    pub(crate) fn failed(&self, message: &'static str) -> Self {
        Self {
            image_url: None,
            is_generating: false,
            error: Some(message.to_string()),
            ..self.clone()
        }
    }
}
