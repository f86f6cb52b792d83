use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Client;

use super::voice::{SynthesisRequest, OUTPUT_FORMAT, VOICE_ID};
use super::{AudioStream, SpeechProvider};
use crate::error::AppError;

/// Streaming text-to-speech client.
pub struct ElevenLabsClient {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    client: Client,
}

impl ElevenLabsClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client: Client::new(),
        }
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/text-to-speech/{}/stream?output_format={}",
            self.base_url, VOICE_ID, OUTPUT_FORMAT
        )
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Result<AudioStream, AppError> {
        let mut req = self
            .client
            .post(self.stream_url())
            .header("xi-api-key", &self.api_key)
            .json(&SynthesisRequest::new(text));

        if let Some(t) = self.timeout {
            req = req.timeout(t);
        }

        let resp = req.send().await?.error_for_status()?;
        let stream = resp.bytes_stream().map_err(AppError::from);
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_url_pins_voice_and_format() {
        let client = ElevenLabsClient::new("xi", "https://api.elevenlabs.io/v1/", None);
        assert_eq!(
            client.stream_url(),
            "https://api.elevenlabs.io/v1/text-to-speech/JBFqnCBsd6RMkjVDRZzb/stream?output_format=mp3_44100_128"
        );
    }
}
