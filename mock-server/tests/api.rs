use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use model_mock_server::{app, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn router() -> axum::Router {
    app(ServerConfig::default())
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::CONTENT_LENGTH, body.len())
        .body(body.to_string())
        .unwrap()
}

fn content_type(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
}

// --- health ---

#[tokio::test]
async fn health_returns_plain_ok() {
    let resp = router().oneshot(get("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "text/plain");
    assert_eq!(&body_bytes(resp).await[..], b"OK");
}

// --- OpenAI-style ---

#[tokio::test]
async fn list_models_returns_one_descriptor() {
    let resp = router().oneshot(get("/v1/models")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = body_json(resp).await;
    let models = json["models"].as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0]["id"], "qwen2.5-coder:32b");
    assert_eq!(models[0]["object"], "model");
    assert_eq!(models[0]["created"], 1_700_000_000);
}

#[tokio::test]
async fn chat_completion_usage_adds_up() {
    let resp = router()
        .oneshot(json_request(
            "/v1/chat/completions",
            r#"{"model":"anything","messages":[{"role":"user","content":"hi"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = body_json(resp).await;
    let usage = &json["usage"];
    assert_eq!(usage["prompt_tokens"], 10);
    assert_eq!(usage["completion_tokens"], 20);
    assert_eq!(
        usage["total_tokens"].as_u64().unwrap(),
        usage["prompt_tokens"].as_u64().unwrap() + usage["completion_tokens"].as_u64().unwrap()
    );
    assert_eq!(json["choices"][0]["message"]["content"], "Hello! This is a mock response.");
}

#[tokio::test]
async fn chat_completion_ignores_non_json_body() {
    let resp = router()
        .oneshot(json_request("/v1/chat/completions", "not-json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn chat_completion_never_streams() {
    let resp = router()
        .oneshot(json_request(
            "/v1/chat/completions",
            r#"{"model":"m","messages":[],"stream":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("application/json"));
    let json: Value = body_json(resp).await;
    assert_eq!(json["object"], "chat.completion");
}

#[tokio::test]
async fn missing_content_length_counts_as_empty() {
    let req = Request::builder()
        .method("POST")
        .uri("/v1/chat/completions")
        .body(String::new())
        .unwrap();
    let resp = router().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- Ollama-style ---

#[tokio::test]
async fn tags_returns_one_local_model() {
    let resp = router().oneshot(get("/api/tags")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = body_json(resp).await;
    assert_eq!(json["models"][0]["name"], "qwen2.5-coder:32b");
    assert!(json["models"][0]["digest"].as_str().unwrap().starts_with("sha256:"));
}

#[tokio::test]
async fn version_is_fixed() {
    let resp = router().oneshot(get("/api/version")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = body_json(resp).await;
    assert_eq!(json, serde_json::json!({ "version": "0.1.0" }));
}

#[tokio::test]
async fn generate_without_stream_returns_single_object() {
    let resp = router()
        .oneshot(json_request("/api/generate", r#"{"model":"m","prompt":"hi"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = body_json(resp).await;
    assert_eq!(json["done"], true);
    assert_eq!(json["response"], "This is a mock response.");
    assert_eq!(json["prompt_eval_count"], 10);
    assert_eq!(json["eval_count"], 20);
    assert!(json["total_duration"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn generate_stream_sends_one_chunk_per_frame() {
    let resp = router()
        .oneshot(json_request("/api/generate", r#"{"stream": true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "application/x-ndjson");

    let mut body = resp.into_body();
    let mut chunks: Vec<Value> = Vec::new();
    while let Some(frame) = body.frame().await {
        let data = frame.unwrap().into_data().unwrap();
        let text = std::str::from_utf8(&data).unwrap();
        assert!(text.ends_with('\n'), "frame {} is not a whole line", chunks.len());
        assert_eq!(text.matches('\n').count(), 1, "frame {} holds more than one line", chunks.len());
        chunks.push(serde_json::from_str(text.trim_end()).unwrap());
    }

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0]["done"], false);
    assert_eq!(chunks[1]["done"], false);
    assert_eq!(chunks[2]["done"], true);
    assert_eq!(chunks[2]["eval_count"], 20);
}

#[tokio::test]
async fn generate_stream_false_is_not_streamed() {
    let resp = router()
        .oneshot(json_request("/api/generate", r#"{"stream": false}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("application/json"));
}

#[tokio::test]
async fn generate_malformed_json_returns_400() {
    let resp = router()
        .oneshot(json_request("/api/generate", "not-json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = body_json(resp).await;
    assert_eq!(json, serde_json::json!({ "error": "Invalid JSON in request body" }));
}

#[tokio::test]
async fn generate_empty_body_returns_400() {
    let resp = router()
        .oneshot(json_request("/api/generate", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pull_reports_success() {
    let resp = router()
        .oneshot(json_request("/api/pull", r#"{"name":"qwen2.5-coder:32b"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = body_json(resp).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["total"], json["completed"]);
}

#[tokio::test]
async fn embeddings_returns_768_constant_floats() {
    let resp = router()
        .oneshot(json_request("/api/embeddings", r#"{"model":"m","prompt":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = body_json(resp).await;
    let embedding = json["embedding"].as_array().unwrap();
    assert_eq!(embedding.len(), 768);
    assert!(embedding.iter().all(|v| v.as_f64() == Some(0.1)));
}

#[tokio::test]
async fn embeddings_malformed_json_returns_400() {
    let resp = router()
        .oneshot(json_request("/api/embeddings", "{broken"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = body_json(resp).await;
    assert_eq!(json["error"], "Invalid JSON in request body");
}

// --- size guard ---

#[tokio::test]
async fn oversized_declared_length_returns_413_before_parsing() {
    // Declared length is over the limit but the body is not JSON: a 400
    // would mean the handler parsed it.
    let req = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(http::header::CONTENT_LENGTH, "10485761")
        .body(String::from("not-json"))
        .unwrap();
    let resp = router().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json: Value = body_json(resp).await;
    assert_eq!(json["error"], "Request body too large");
    assert_eq!(json["max_bytes"], 10_485_760);
}

#[tokio::test]
async fn length_at_limit_is_accepted() {
    let config = ServerConfig {
        max_request_bytes: 16,
        ..ServerConfig::default()
    };
    let body = r#"{"stream":false}"#;
    assert_eq!(body.len(), 16);

    let resp = app(config)
        .oneshot(json_request("/api/generate", body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn size_guard_honours_configured_limit() {
    let config = ServerConfig {
        max_request_bytes: 8,
        ..ServerConfig::default()
    };
    let resp = app(config)
        .oneshot(json_request("/api/embeddings", r#"{"prompt":"too long"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn body_without_length_that_overflows_returns_413() {
    let config = ServerConfig {
        max_request_bytes: 8,
        ..ServerConfig::default()
    };
    let parts: Vec<Result<bytes::Bytes, std::io::Error>> = vec![
        Ok(bytes::Bytes::from_static(b"{\"prompt\":")),
        Ok(bytes::Bytes::from_static(b"\"streamed\"}")),
    ];
    let req = Request::builder()
        .method("POST")
        .uri("/api/embeddings")
        .body(Body::from_stream(futures_util::stream::iter(parts)))
        .unwrap();
    assert!(req.headers().get(http::header::CONTENT_LENGTH).is_none());

    let resp = app(config).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json: Value = body_json(resp).await;
    assert_eq!(
        json,
        serde_json::json!({ "error": "Request body too large", "max_bytes": 8 })
    );
}

#[tokio::test]
async fn size_guard_applies_to_unknown_paths() {
    let req = Request::builder()
        .method("POST")
        .uri("/nowhere")
        .header(http::header::CONTENT_LENGTH, "20000000")
        .body(String::new())
        .unwrap();
    let resp = router().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// --- not found ---

#[tokio::test]
async fn unknown_paths_return_empty_404() {
    for uri in ["/", "/nope", "/v1/embeddings", "/api/chat", "/health/extra"] {
        let resp = router().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {uri}");
        assert!(body_bytes(resp).await.is_empty(), "GET {uri}");

        let resp = router().oneshot(json_request(uri, "{}")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "POST {uri}");
        assert!(body_bytes(resp).await.is_empty(), "POST {uri}");
    }
}

#[tokio::test]
async fn wrong_method_on_known_path_returns_404() {
    let resp = router().oneshot(get("/v1/chat/completions")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());

    let resp = router().oneshot(json_request("/health", "{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn requests_are_independent() {
    use tower::Service;

    let mut app = router().into_service();

    let first = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("/v1/chat/completions", "{}"))
        .await
        .unwrap();
    let first: Value = body_json(first).await;

    let second = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("/v1/chat/completions", r#"{"model":"other"}"#))
        .await
        .unwrap();
    let second: Value = body_json(second).await;

    assert_eq!(first, second);
}
