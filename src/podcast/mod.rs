pub mod prompt;
pub mod schema;
pub mod selection;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub use prompt::build_prompt;
pub use schema::options_schema;
pub use selection::Selection;

/// Number of options the generator always produces.
pub const OPTION_COUNT: usize = 3;

pub const MISSING_PROFILE_KEYS: &str = "Missing required keys";

/// One candidate episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PodcastOption {
    pub title: String,
    pub description: String,
    /// Full spoken text of the episode.
    pub script: String,
    /// Descriptive metadata only. Synthesis always uses the fixed narrator voice.
    pub voice_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsEnvelope {
    pub options: Vec<PodcastOption>,
}

/// Listener profile. Values are kept as raw JSON and interpolated into the
/// prompt unchanged.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub growth_areas: Value,
    pub why: Option<Value>,
    pub reference_text: Option<Value>,
    pub length_minutes: Value,
    pub preferred_style: Option<Value>,
    pub voice_tone: Option<Value>,
}

impl UserProfile {
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let field = |key: &str| body.get(key).filter(|v| !v.is_null()).cloned();

        let (Some(growth_areas), Some(length_minutes)) =
            (field("growth_areas"), field("length_minutes"))
        else {
            return Err(AppError::MissingFields(MISSING_PROFILE_KEYS.into()));
        };

        Ok(Self {
            growth_areas,
            why: field("why"),
            reference_text: field("reference_text"),
            length_minutes,
            preferred_style: field("preferred_style"),
            voice_tone: field("voice_tone"),
        })
    }
}

/// Parse the provider's structured payload, enforcing the option shape and count.
pub fn parse_options(raw: &str) -> Result<Vec<PodcastOption>, AppError> {
    let envelope: OptionsEnvelope = serde_json::from_str(raw)?;

    if envelope.options.len() != OPTION_COUNT {
        return Err(AppError::MalformedResponse(format!(
            "expected {} options, got {}",
            OPTION_COUNT,
            envelope.options.len()
        )));
    }

    Ok(envelope.options)
}
