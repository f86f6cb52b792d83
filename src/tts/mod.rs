pub mod elevenlabs;
pub mod voice;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::AppError;

pub use elevenlabs::ElevenLabsClient;

/// Encoded audio as it arrives from the provider.
pub type AudioStream = BoxStream<'static, Result<Bytes, AppError>>;

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Start synthesising `text` with the fixed narrator voice.
    async fn synthesize(&self, text: &str) -> Result<AudioStream, AppError>;
}
