use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CompletionProvider;
use crate::error::AppError;

/// Chat-completions client using `json_schema` structured output.
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Option<Duration>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    schema: Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete_structured(
        &self,
        prompt: &str,
        schema_name: &str,
        schema: Value,
    ) -> Result<String, AppError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema_name,
                    schema,
                    strict: true,
                },
            },
        };

        let mut req = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        if let Some(t) = self.timeout {
            req = req.timeout(t);
        }

        let resp = req.send().await?.error_for_status()?;
        let text = resp.text().await?;
        extract_content(&text)
    }
}

fn extract_content(raw: &str) -> Result<String, AppError> {
    let parsed: ChatResponse = serde_json::from_str(raw)?;
    let message = parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| AppError::MalformedResponse("response has no choices".into()))?;

    if let Some(refusal) = message.refusal {
        return Err(AppError::Refusal(refusal));
    }

    message
        .content
        .ok_or_else(|| AppError::MalformedResponse("response has no content".into()))
}
