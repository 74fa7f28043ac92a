//! HTTP transport for the generative service.
//!
//! `GenerativeBackend` is the seam between the client's operation logic
//! and the wire; tests swap in in-memory backends, production uses
//! [`HttpBackend`] over reqwest.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::wire::{GenerateContentRequest, GenerateContentResponse};
use crate::error::StyleError;

/// A transport capable of executing one `generateContent` call.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, StyleError>;
}

/// Production backend speaking the Gemini REST shape.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl GenerativeBackend for HttpBackend {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, StyleError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        );
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(classify_status(status, &body));
        }
        let parsed = serde_json::from_str::<GenerateContentResponse>(&body)
            .map_err(|e| StyleError::ParseError(format!("response envelope: {e}")))?;
        Ok(parsed)
    }
}

/// Map a non-success HTTP status to a typed error. Retryability follows
/// the status class: 5xx and 429 may succeed on retry, 4xx will not.
fn classify_status(status: u16, body: &str) -> StyleError {
    let body_sample: String = body.chars().take(200).collect();
    match status {
        429 => StyleError::RateLimited(body_sample),
        401 | 403 => StyleError::AuthenticationError(body_sample),
        400 => StyleError::InvalidInput(format!("service rejected request: {body_sample}")),
        _ => StyleError::api_error(status, body_sample),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_and_retryability() {
        assert!(matches!(
            classify_status(429, "slow down"),
            StyleError::RateLimited(_)
        ));
        assert!(classify_status(429, "").is_retryable());
        assert!(classify_status(503, "unavailable").is_retryable());
        assert!(!classify_status(401, "bad key").is_retryable());
        assert!(!classify_status(400, "bad payload").is_retryable());
        assert_eq!(classify_status(502, "x").status_code(), Some(502));
    }

    #[test]
    fn body_samples_are_truncated() {
        let long_body = "x".repeat(5000);
        match classify_status(500, &long_body) {
            StyleError::ApiError { message, .. } => assert_eq!(message.len(), 200),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
