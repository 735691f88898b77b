//! HTTP backends against local stand-ins for Gemini and the generation service.

use std::net::SocketAddr;

use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use gemini_client::GeminiClient;
use mcq_core::{
    ApiCredential, BackendError, CorrectAnswer, Difficulty, GeminiBackend, GenerationBackend,
    GenerationSettings, IntermediaryBackend, QuestionType,
};
use serde_json::{json, Value};

const MODEL_REPLY: &str = "```json
[
  {\"question\": \"What powers photosynthesis?\", \"options\": [\"Light\", \"Sound\", \"Heat\", \"Wind\"], \"correctAnswer\": [0], \"type\": \"single\", \"difficulty\": \"easy\", \"hint\": \"Look up\"},
  {\"question\": \"Select all that apply: products of photosynthesis\", \"options\": [\"Glucose\", \"Oxygen\", \"Nitrogen\", \"Iron\"], \"correctAnswer\": [0, 1]},
  {\"question\": \"Where does it happen?\", \"options\": [\"Chloroplast\", \"Nucleus\"], \"correctAnswer\": 0}
]
```";

async fn gemini(Json(body): Json<Value>) -> impl IntoResponse {
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    let text = if prompt.contains("Content: \"garbage\"") {
        "I'm sorry, I can't do that."
    } else {
        MODEL_REPLY
    };
    Json(json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}]
    }))
}

async fn generation_service(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer anon-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid JWT"})));
    }
    match body["content"].as_str() {
        Some("no key") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "GEMINI_API_KEY not configured in environment"})),
        ),
        Some("weird") => (StatusCode::OK, Json(json!({"data": []}))),
        _ => (
            StatusCode::OK,
            Json(json!({"mcqs": [
                {"question": "Capital of France?", "options": ["Paris", "Rome", "Oslo"], "correctAnswer": 0, "type": "single", "difficulty": "medium"},
                {"question": "Bad index", "options": ["a", "b"], "correctAnswer": 5, "type": "single", "difficulty": "medium"}
            ]})),
        ),
    }
}

async fn spawn() -> SocketAddr {
    let app = Router::new()
        .route("/v1beta/models/:call", post(gemini))
        .route("/functions/v1/generate-mcqs", post(generation_service));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn gemini_backend(addr: SocketAddr) -> GeminiBackend {
    let client = GeminiClient::new("test-key").with_base_url(format!("http://{addr}/v1beta"));
    GeminiBackend::new(client, "gemini-1.5-flash")
}

fn service_backend(addr: SocketAddr, key: &str) -> IntermediaryBackend {
    IntermediaryBackend::new(
        &format!("http://{addr}"),
        ApiCredential::new("MCQ_BACKEND_ANON_KEY", key).unwrap(),
    )
}

#[tokio::test]
async fn test_gemini_reply_is_normalized() {
    let addr = spawn().await;
    let settings = GenerationSettings::default()
        .with_difficulty(Difficulty::Hard)
        .with_explanations(false);

    let mcqs = gemini_backend(addr)
        .generate("photosynthesis notes", &settings)
        .await
        .unwrap();

    assert_eq!(mcqs.len(), 3);
    assert_eq!(mcqs[0].correct_answer, CorrectAnswer::Single(0));
    assert_eq!(mcqs[0].difficulty, Difficulty::Hard);
    assert_eq!(mcqs[0].hint.as_deref(), Some("Look up"));
    assert_eq!(mcqs[1].question_type, QuestionType::Multiple);
    assert_eq!(mcqs[2].options.len(), 2);
}

#[tokio::test]
async fn test_gemini_reply_truncated_to_requested_count() {
    let addr = spawn().await;
    let settings = GenerationSettings::default().with_num_questions(2);

    let mcqs = gemini_backend(addr).generate("notes", &settings).await.unwrap();
    assert_eq!(mcqs.len(), 2);
}

#[tokio::test]
async fn test_gemini_unparseable_reply() {
    let addr = spawn().await;
    let err = gemini_backend(addr)
        .generate("garbage", &GenerationSettings::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BackendError::Parse("Could not parse JSON response from AI".into())
    );
}

#[tokio::test]
async fn test_service_records_revalidated() {
    let addr = spawn().await;
    let mcqs = service_backend(addr, "anon-key")
        .generate("geography", &GenerationSettings::default())
        .await
        .unwrap();

    assert_eq!(mcqs.len(), 1);
    assert_eq!(mcqs[0].options[0], "Paris");
}

#[tokio::test]
async fn test_service_error_messages() {
    let addr = spawn().await;

    let err = service_backend(addr, "anon-key")
        .generate("no key", &GenerationSettings::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        BackendError::Backend("GEMINI_API_KEY not configured in environment".into())
    );

    let err = service_backend(addr, "wrong-key")
        .generate("geography", &GenerationSettings::default())
        .await
        .unwrap_err();
    assert_eq!(err, BackendError::Backend("Invalid JWT".into()));

    let err = service_backend(addr, "anon-key")
        .generate("weird", &GenerationSettings::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        BackendError::Format("Invalid response format from server".into())
    );
}

#[tokio::test]
async fn test_service_unknown_route_status() {
    let addr = spawn().await;
    let backend = IntermediaryBackend::new(
        &format!("http://{addr}/missing"),
        ApiCredential::new("MCQ_BACKEND_ANON_KEY", "anon-key").unwrap(),
    );

    let err = backend
        .generate("geography", &GenerationSettings::default())
        .await
        .unwrap_err();
    assert_eq!(err, BackendError::Backend("Server error: 404".into()));
}
