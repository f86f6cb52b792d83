use serde::Serialize;

/// Narrator voice used for every episode.
pub const VOICE_ID: &str = "JBFqnCBsd6RMkjVDRZzb";
pub const OUTPUT_FORMAT: &str = "mp3_44100_128";
pub const MODEL_ID: &str = "eleven_multilingual_v2";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.0,
            similarity_boost: 1.0,
            style: 0.0,
            use_speaker_boost: true,
            speed: 1.0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SynthesisRequest<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: VoiceSettings,
}

impl<'a> SynthesisRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_fixed_voice_shaping() {
        let value = serde_json::to_value(SynthesisRequest::new("Hello")).unwrap();
        assert_eq!(value["text"], "Hello");
        assert_eq!(value["model_id"], MODEL_ID);
        assert_eq!(value["voice_settings"]["stability"], 0.0);
        assert_eq!(value["voice_settings"]["similarity_boost"], 1.0);
        assert_eq!(value["voice_settings"]["use_speaker_boost"], true);
        assert_eq!(value["voice_settings"]["speed"], 1.0);
    }
}
