use serde_json::{json, Value};

use super::OPTION_COUNT;

pub const SCHEMA_NAME: &str = "podcast_options";

/// Strict output schema handed to the completion provider.
pub fn options_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "options": {
                "type": "array",
                "minItems": OPTION_COUNT,
                "maxItems": OPTION_COUNT,
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "script": { "type": "string" },
                        "voice_description": { "type": "string" }
                    },
                    "required": ["title", "description", "script", "voice_description"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["options"],
        "additionalProperties": false
    })
}
