// Integration tests: tool calls through the OpenAI-compatible backend
//
// A mockito server stands in for the completion API.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use mockito::Matcher;
use serde_json::{json, Map, Value};
use std::io::Cursor;

use wingman::config::{AuthConfig, BackendConfig, Config, ServerConfig};
use wingman::server::WingmanServer;
use wingman::tools::{FailureKind, InvocationRequest, InvocationResult};

fn server_for(base_url: String, timeout_secs: u64) -> WingmanServer {
    let config = Config {
        server: ServerConfig::default(),
        auth: AuthConfig {
            bearer_token: "secret".to_string(),
            validate_identity: "15550001111".to_string(),
        },
        backend: BackendConfig {
            api_key: Some("sk-test".to_string()),
            base_url,
            timeout_secs,
            ..BackendConfig::default()
        },
    };
    WingmanServer::from_config(&config).expect("server should build")
}

fn completion_body(text: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn arguments(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn png_base64(width: u32, height: u32) -> String {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 80, 40]));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    BASE64.encode(bytes.into_inner())
}

#[tokio::test]
async fn test_improve_bio_round_trip() {
    let mut api = mockito::Server::new_async().await;
    let mock = api
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o",
            "max_tokens": 600
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Weekend hiker, weekday coffee snob."))
        .create_async()
        .await;

    let server = server_for(api.url(), 5);
    let result = server
        .dispatcher()
        .dispatch(InvocationRequest::new(
            "improve_bio",
            arguments(json!({"current_bio": "I like hiking"})),
        ))
        .await;

    mock.assert_async().await;
    let text = result.text();
    assert!(result.is_success());
    assert!(text.contains("Weekend hiker, weekday coffee snob."));
    assert!(text.contains("Bio Improvement Suggestions"));
}

#[tokio::test]
async fn test_backend_rejection_is_handler_error() {
    let mut api = mockito::Server::new_async().await;
    let _mock = api
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided: sk-test"}}"#)
        .create_async()
        .await;

    let server = server_for(api.url(), 5);
    let result = server
        .dispatcher()
        .dispatch(InvocationRequest::new(
            "generate_opener",
            arguments(json!({"match_info": "Plays chess"})),
        ))
        .await;

    match result {
        InvocationResult::Failure(failure) => {
            assert_eq!(failure.kind, FailureKind::HandlerError);
            assert!(failure.message.contains("401"));
            assert!(!failure.message.contains("sk-test"));
        }
        InvocationResult::Success(text) => panic!("expected failure, got {}", text),
    }
}

#[tokio::test]
async fn test_empty_choices_is_handler_error() {
    let mut api = mockito::Server::new_async().await;
    let _mock = api
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let server = server_for(api.url(), 5);
    let result = server
        .dispatcher()
        .dispatch(InvocationRequest::new(
            "plan_date",
            arguments(json!({"location": "Lisbon"})),
        ))
        .await;

    assert_eq!(result.failure_kind(), Some(FailureKind::HandlerError));
}

#[tokio::test]
async fn test_screenshot_is_sent_as_normalized_jpeg() {
    let mut api = mockito::Server::new_async().await;
    let mock = api
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""url":"data:image/jpeg;base64,"#.to_string()),
            Matcher::PartialJson(json!({"max_tokens": 1000})),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Great smile in photo two."))
        .create_async()
        .await;

    let server = server_for(api.url(), 5);
    let result = server
        .dispatcher()
        .dispatch(InvocationRequest::new(
            "analyze_profile_screenshot",
            arguments(json!({
                "image_base64": format!("data:image/png;base64,{}", png_base64(2048, 1024)),
                "analysis_type": "quick"
            })),
        ))
        .await;

    mock.assert_async().await;
    assert!(result.is_success());
    assert!(result.text().contains("Great smile"));
}

#[tokio::test]
async fn test_invalid_image_never_reaches_backend() {
    let mut api = mockito::Server::new_async().await;
    let mock = api
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let server = server_for(api.url(), 5);
    let result = server
        .dispatcher()
        .dispatch(InvocationRequest::new(
            "analyze_profile_screenshot",
            arguments(json!({"image_base64": "bm90IGFuIGltYWdl"})),
        ))
        .await;

    mock.assert_async().await;
    assert_eq!(result.failure_kind(), Some(FailureKind::HandlerError));
    assert!(result.text().contains("Could not process the image"));
}
