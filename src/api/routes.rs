use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use crate::audio::{AudioStore, AUDIO_ROUTE};
use crate::llm::CompletionProvider;
use crate::tts::SpeechProvider;

pub struct AppState {
    pub completion: Arc<dyn CompletionProvider>,
    pub speech: Arc<dyn SpeechProvider>,
    pub audio: Arc<AudioStore>,
    /// Used for audio URLs when a request carries no `Host` header.
    pub fallback_host: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let audio_files = ServeDir::new(state.audio.dir());

    Router::new()
        .route("/", get(handlers::index))
        .route("/generate_options", post(handlers::generate_options))
        .route("/select_option", post(handlers::select_option))
        .nest_service(AUDIO_ROUTE, audio_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
