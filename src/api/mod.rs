pub mod handlers;
pub mod routes;

use serde::Serialize;

use crate::podcast::PodcastOption;

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub options: Vec<PodcastOption>,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub message: String,
    pub selected_title: String,
    pub audio: AudioRef,
}

#[derive(Debug, Serialize)]
pub struct AudioRef {
    pub audio_url: String,
}
