//! HTTP-level client tests against a wiremock server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lookforge::prelude::*;

fn client(base_url: &str, max_retries: u32) -> AnalysisClient {
    AnalysisClient::builder()
        .base_url(base_url)
        .api_key("test-api-key")
        .retry_policy(
            RetryPolicy::new()
                .with_max_retries(max_retries)
                .with_base_delay(Duration::from_millis(1))
                .with_max_delay(Duration::from_millis(5)),
        )
        .build()
        .unwrap()
}

fn payload() -> ImagePayload {
    ImagePayload {
        mime_type: "image/jpeg".to_string(),
        base64_data: "aGVsbG8=".to_string(),
        width: 800,
        height: 600,
        byte_size: 5,
    }
}

fn text_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
}

#[tokio::test]
async fn analyze_item_parses_fenced_structured_response() {
    let server = MockServer::start().await;
    let analysis = json!({
        "itemName": "Wool coat",
        "originalPalette": ["#2f2f2f"],
        "complimentaryPalette": ["#c9b037"],
        "description": "A charcoal wool overcoat.",
        "suggestions": [
            { "type": "business", "description": "Grey suit underneath", "colorsUsed": ["#2f2f2f"] }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body(&format!(
            "```json\n{analysis}\n```"
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server.uri(), 0)
        .analyze_item(&payload())
        .await
        .unwrap();
    assert_eq!(result.item_name, "Wool coat");
    assert_eq!(result.suggestions.len(), 1);
    assert_eq!(result.suggestions[0].kind, OutfitKind::Business);
}

#[tokio::test]
async fn empty_response_is_retried_then_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server.uri(), 1)
        .analyze_item(&payload())
        .await
        .unwrap_err();
    match err {
        StyleError::MaxRetriesExceeded {
            attempts, source, ..
        } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*source, StyleError::EmptyResponse(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_structured_output_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_body("this is not json at all")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server.uri(), 3)
        .analyze_fashion_dna(&payload())
        .await
        .unwrap_err();
    assert!(matches!(err, StyleError::ParseError(_)));
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "cGl4ZWxz" } }
            ] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = client(&server.uri(), 3)
        .generate_outfit_image("a coat", "smart casual", OutfitKind::Casual)
        .await
        .unwrap();
    assert_eq!(url, "data:image/png;base64,cGl4ZWxz");
}

#[tokio::test]
async fn missing_image_part_maps_to_no_image_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("sorry, text only")))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server.uri(), 0)
        .generate_outfit_image("a coat", "smart casual", OutfitKind::NightOut)
        .await
        .unwrap_err();
    match err {
        StyleError::MaxRetriesExceeded { source, .. } => {
            assert!(matches!(*source, StyleError::NoImageData(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn authentication_failures_are_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server.uri(), 3)
        .analyze_item(&payload())
        .await
        .unwrap_err();
    assert!(matches!(err, StyleError::AuthenticationError(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn edit_sends_the_mime_type_from_the_data_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        // The inline part must carry the MIME type read out of the data
        // URL, not an assumed one.
        .and(body_partial_json(json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": "image/webp", "data": "b2xk" } },
                    { "text": "Edit this outfit image: add a scarf. Keep the composition, framing and lighting consistent." }
                ]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "bmV3" } }
            ] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = client(&server.uri(), 0)
        .edit_outfit_image("data:image/webp;base64,b2xk", "add a scarf")
        .await
        .unwrap();
    assert_eq!(url, "data:image/png;base64,bmV3");
}

#[tokio::test]
async fn non_data_url_edit_input_is_rejected_locally() {
    let server = MockServer::start().await;
    // No mock mounted: the request must never reach the server.
    let err = client(&server.uri(), 0)
        .edit_outfit_image("https://cdn.example.com/outfit.png", "add a scarf")
        .await
        .unwrap_err();
    assert!(matches!(err, StyleError::InvalidInput(_)));
}
