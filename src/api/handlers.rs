use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::{AudioRef, GreetingResponse, OptionsResponse, SelectionResponse};
use crate::api::routes::AppState;
use crate::audio::public_url;
use crate::error::AppError;
use crate::podcast::{self, schema::SCHEMA_NAME, Selection, UserProfile};

pub const GREETING: &str = "🚀 Hello, Hackathon world!";
pub const SELECTION_MESSAGE: &str = "Audio generation triggered";

pub async fn index() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: GREETING.to_string(),
    })
}

pub async fn generate_options(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<OptionsResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let profile = UserProfile::from_json(&body)?;

    let prompt = podcast::build_prompt(&profile);
    let raw = state
        .completion
        .complete_structured(&prompt, SCHEMA_NAME, podcast::options_schema())
        .await?;
    let options = podcast::parse_options(&raw)?;

    tracing::info!("Generated {} podcast options", options.len());
    Ok(Json(OptionsResponse { options }))
}

pub async fn select_option(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SelectionResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let selection = Selection::from_json(&body)?;
    let chosen = selection.chosen();

    let audio = state.speech.synthesize(&chosen.script).await?;
    let artifact = state.audio.save(audio).await?;
    let audio_url = public_url(&request_origin(&headers, &state.fallback_host), &artifact.id);

    tracing::info!(
        "Synthesised '{}' into {} ({} bytes)",
        chosen.title,
        artifact.path.display(),
        artifact.bytes_written
    );

    Ok(Json(SelectionResponse {
        message: SELECTION_MESSAGE.to_string(),
        selected_title: chosen.title.clone(),
        audio: AudioRef { audio_url },
    }))
}

/// `scheme://host[:port]` of the inbound request.
fn request_origin(headers: &HeaderMap, fallback_host: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or(fallback_host);
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("http");

    format!("{}://{}", scheme, host)
}
