use axum::{body::Bytes, extract::Extension, http::StatusCode, Json};
use mcq_core::{GenerateReply, GenerationSettings};
use serde_json::Value;

use crate::server::app::AppState;

pub const MISSING_FIELDS: &str = "Missing content or settings";
pub const MISSING_KEY: &str = "GEMINI_API_KEY not configured in environment";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

type Reply = (StatusCode, Json<GenerateReply>);

fn error(status: StatusCode, message: impl Into<String>) -> Reply {
    (status, Json(GenerateReply::error(message)))
}

/// Generate questions for `{content, settings}`
///
/// Returns `{mcqs}` on success. Client mistakes answer 400, a missing model
/// key or a failed generation answers 500, always as `{error}`.
pub async fn generate_handler(Extension(state): Extension<AppState>, body: Bytes) -> Reply {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => return error(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e)),
    };

    let content = payload
        .get("content")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty());
    let settings = payload.get("settings").filter(|s| !s.is_null());
    let (Some(content), Some(settings)) = (content, settings) else {
        return error(StatusCode::BAD_REQUEST, MISSING_FIELDS);
    };

    let settings: GenerationSettings = match serde_json::from_value(settings.clone()) {
        Ok(settings) => settings,
        Err(e) => return error(StatusCode::BAD_REQUEST, format!("Invalid settings: {}", e)),
    };
    if let Err(e) = settings.validate() {
        return error(StatusCode::BAD_REQUEST, e.to_string());
    }

    let Some(backend) = state.backend.as_ref() else {
        tracing::error!("Generation requested without a configured model key");
        return error(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY);
    };

    match backend.generate(content, &settings).await {
        Ok(mcqs) => (StatusCode::OK, Json(GenerateReply::Mcqs { mcqs })),
        Err(e) => {
            tracing::error!(error = %e, "MCQ generation failed");
            error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Bare `OPTIONS` requests (preflights are answered by the CORS layer)
pub async fn options_handler() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> Reply {
    error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}
