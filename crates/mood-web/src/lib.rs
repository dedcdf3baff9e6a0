//! Mood Web Server
//!
//! Axum-based HTTP surface: analysis API, CORS, and the static client with
//! single-page fallback routing.

pub mod error;
pub mod routes;
pub mod state;

use std::path::{Path, PathBuf};

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use mood_core::Config;
use tower::ServiceExt as _;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use state::AppState;

/// Document served for paths with no matching static file.
pub const INDEX_FILE: &str = "index.html";

/// Request body limit for the analysis API. Five full-resolution JPEG frames
/// encoded as data URLs fit comfortably.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Create the application router serving static files from `static_root`.
pub fn create_router(state: AppState, static_root: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let index = ServeFile::new(static_root.join(INDEX_FILE)).map_request(read_only);
    let static_files = ServeDir::new(static_root)
        .call_fallback_on_method_not_allowed(true)
        .fallback(index);

    let api_routes = Router::new()
        .route("/analyze", post(routes::analyze::analyze_text))
        .route("/analyze-video", post(routes::analyze::analyze_video))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(static_files)
        .layer(middleware::from_fn(preflight))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Answer every `OPTIONS` request with an empty 200.
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

/// Serve the index document whatever the method of the original request.
fn read_only(mut request: Request) -> Request {
    if request.method() != Method::HEAD {
        *request.method_mut() = Method::GET;
    }
    request
}

/// Run the web server.
pub async fn run_server(config: Config, host: &str, port: u16, static_root: PathBuf) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let app = create_router(state, &static_root);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!(
        root = %static_root.display(),
        "Web server listening on http://{}:{}",
        host,
        port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use mood_core::completion::{CompletionRequest, CompletionService};
    use mood_core::{Analyzer, MoodError, MoodResult};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    enum Reply {
        Text(&'static str),
        Status(u16),
    }

    struct StubService(Reply);

    #[async_trait]
    impl CompletionService for StubService {
        async fn complete(&self, _request: &CompletionRequest) -> MoodResult<String> {
            match self.0 {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Status(status) => Err(MoodError::upstream(status, "Rate limit reached")),
            }
        }
    }

    const GOOD_REPLY: &str = r#"{"emotion":"усталость","title":"Усталость перед финалом","analysis":"Ты много работал.","suggestions":["Отдохни","Подыши","Поговори с командой"]}"#;

    fn static_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/web")
    }

    fn app(reply: Option<Reply>) -> Router {
        let analyzer = reply.map(|r| Analyzer::new(Arc::new(StubService(r))));
        create_router(AppState::new(analyzer), &static_root())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Response) {
        let response = app.oneshot(request).await.unwrap();
        (response.status(), response)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_text_success() {
        let request = post_json("/api/analyze", json!({ "text": "Я очень устал перед финалом" }));
        let (status, response) = send(app(Some(Reply::Text(GOOD_REPLY))), request).await;

        assert_eq!(status, StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["emotion"], "усталость");
        assert!(!body["emotion"].as_str().unwrap().contains(' '));
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_analyze_text_missing_text() {
        for body in [json!({}), json!({ "text": "" }), json!({ "text": 42 })] {
            let (status, response) =
                send(app(Some(Reply::Text(GOOD_REPLY))), post_json("/api/analyze", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, json!({ "error": "Текст не передан" }));
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _) = send(app(Some(Reply::Text(GOOD_REPLY))), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_free_text_reply_becomes_fallback() {
        let request = post_json("/api/analyze", json!({ "text": "тяжёлый день" }));
        let (status, response) = send(app(Some(Reply::Text("Просто отдохни."))), request).await;

        assert_eq!(status, StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["emotion"], "неизвестно");
        assert_eq!(body["title"], "Ваше состояние");
        assert_eq!(body["analysis"], "Просто отдохни.");
        assert_eq!(body["suggestions"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_video_empty_images() {
        let request = post_json("/api/analyze-video", json!({ "images": [] }));
        let (status, response) = send(app(Some(Reply::Text(GOOD_REPLY))), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Изображения не переданы" }));
    }

    #[tokio::test]
    async fn test_analyze_video_rejects_non_string_images() {
        let request = post_json("/api/analyze-video", json!({ "images": ["abc", 1] }));
        let (status, _) = send(app(Some(Reply::Text(GOOD_REPLY))), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_video_success() {
        let request = post_json("/api/analyze-video", json!({ "images": ["/9j/4AAQ"] }));
        let (status, response) = send(app(Some(Reply::Text(GOOD_REPLY))), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_json(response).await["title"], "Усталость перед финалом");
    }

    #[tokio::test]
    async fn test_analyze_video_accepts_large_frames() {
        let frame = format!("data:image/jpeg;base64,{}", "A".repeat(450_000));
        let images = vec![frame; 6];
        let request = post_json("/api/analyze-video", json!({ "images": images }));
        let (status, response) = send(app(Some(Reply::Text(GOOD_REPLY))), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_json(response).await["emotion"], "усталость");
    }

    #[tokio::test]
    async fn test_oversized_body_is_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze-video")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(vec![b' '; MAX_BODY_BYTES + 1]))
            .unwrap();
        let (status, response) = send(app(Some(Reply::Text(GOOD_REPLY))), request).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let request = post_json("/api/analyze", json!({ "text": "Я очень устал" }));
        let (status, response) = send(app(None), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_missing_credential_checked_before_input() {
        let request = post_json("/api/analyze-video", json!({ "images": [] }));
        let (status, _) = send(app(None), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_upstream_status_in_error() {
        let request = post_json("/api/analyze", json!({ "text": "Я очень устал" }));
        let (status, response) = send(app(Some(Reply::Status(429))), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("429"));
    }

    #[tokio::test]
    async fn test_options_always_ok() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/anything/at/all")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app(None), request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/analyze")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let (status, response) = send(app(None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_responses_carry_cors_headers() {
        let request = post_json("/api/analyze", json!({}));
        let (_, response) = send(app(None), request).await;
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_unknown_path_serves_index() {
        let request = Request::builder().uri("/foo/bar").body(Body::empty()).unwrap();
        let (status, response) = send(app(None), request).await;

        assert_eq!(status, StatusCode::OK);
        let expected = std::fs::read_to_string(static_root().join(INDEX_FILE)).unwrap();
        assert_eq!(body_text(response).await, expected);
    }

    #[tokio::test]
    async fn test_unknown_path_serves_index_for_any_method() {
        for method in ["POST", "PUT", "DELETE"] {
            let request = Request::builder()
                .method(method)
                .uri("/foo/bar")
                .body(Body::from("payload"))
                .unwrap();
            let (status, response) = send(app(None), request).await;

            assert_eq!(status, StatusCode::OK, "{} /foo/bar", method);
            let expected = std::fs::read_to_string(static_root().join(INDEX_FILE)).unwrap();
            assert_eq!(body_text(response).await, expected);
        }
    }

    #[tokio::test]
    async fn test_existing_static_file_served() {
        let request = Request::builder().uri("/app.js").body(Body::empty()).unwrap();
        let (status, response) = send(app(None), request).await;

        assert_eq!(status, StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.contains("javascript"));
    }
}
