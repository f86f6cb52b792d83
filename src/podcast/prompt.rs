use serde_json::Value;

use super::{UserProfile, OPTION_COUNT};

const PLACEHOLDER: &str = "N/A";

/// Render the generation prompt for a profile. Deterministic for a given input.
pub fn build_prompt(profile: &UserProfile) -> String {
    format!(
        "You are an expert podcast producer and writer.\n\
         Create exactly {count} distinct podcast episode options for a listener with this profile:\n\
         \n\
         - Growth areas: {growth_areas}\n\
         - Why they want to grow: {why}\n\
         - Reference material: {reference_text}\n\
         - Target length: {length_minutes} minutes\n\
         - Preferred style: {preferred_style}\n\
         - Voice tone: {voice_tone}\n\
         \n\
         For each option provide a title, a short description, the full spoken script \
         sized for the target length, and a description of the ideal narrator voice.\n\
         Ground every script in factual information from reputable sources.\n\
         Personalise each option to the growth areas and the reasons given above.\n\
         Make the {count} options varied in angle and format. At least one of them must \
         take a deliberately unconventional approach while staying relevant to the profile.",
        count = OPTION_COUNT,
        growth_areas = render(Some(&profile.growth_areas)),
        why = render(profile.why.as_ref()),
        reference_text = render(profile.reference_text.as_ref()),
        length_minutes = render(Some(&profile.length_minutes)),
        preferred_style = render(profile.preferred_style.as_ref()),
        voice_tone = render(profile.voice_tone.as_ref()),
    )
}

fn render(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}
