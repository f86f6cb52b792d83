use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod audio;
mod config;
mod error;
mod llm;
mod podcast;
mod tts;

use api::routes::{create_router, AppState};
use audio::AudioStore;
use config::Config;
use llm::OpenAiClient;
use tts::ElevenLabsClient;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Podcast Forge Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Audio directory: {}", config.audio_dir.display());

    let audio = Arc::new(AudioStore::new(
        config.audio_dir.clone(),
        config.audio_retention,
    )?);
    if Arc::clone(&audio).spawn_sweeper().is_some() {
        tracing::info!(
            "Audio files expire after {}s",
            config.audio_retention.as_secs()
        );
    }

    let state = Arc::new(AppState {
        completion: Arc::new(OpenAiClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.openai_model.clone(),
            config.provider_timeout,
        )),
        speech: Arc::new(ElevenLabsClient::new(
            config.elevenlabs_api_key.clone(),
            config.elevenlabs_base_url.clone(),
            config.provider_timeout,
        )),
        audio,
        fallback_host: format!("localhost:{}", config.port),
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
