pub mod openai;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

pub use openai::OpenAiClient;

/// A completion service able to answer under a strict JSON schema.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the raw structured JSON text, or `AppError::Refusal` when the
    /// model declines to answer.
    async fn complete_structured(
        &self,
        prompt: &str,
        schema_name: &str,
        schema: Value,
    ) -> Result<String, AppError>;
}
