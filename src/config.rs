use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-2024-08-06";
const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_AUDIO_DIR: &str = "./audio";
const DEFAULT_RETENTION_SECS: u64 = 24 * 60 * 60;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server settings read from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub elevenlabs_api_key: String,
    pub elevenlabs_base_url: String,
    pub audio_dir: PathBuf,
    /// Zero disables expiry of generated audio.
    pub audio_retention: Duration,
    pub provider_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let port = match var("PORT") {
            Some(v) => parse("PORT", v)?,
            None => DEFAULT_PORT,
        };
        let retention_secs = match var("AUDIO_RETENTION_SECS") {
            Some(v) => parse("AUDIO_RETENTION_SECS", v)?,
            None => DEFAULT_RETENTION_SECS,
        };
        let provider_timeout = match var("PROVIDER_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(parse("PROVIDER_TIMEOUT_SECS", v)?)),
            None => None,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            elevenlabs_api_key: required("ELEVENLABS_API_KEY")?,
            elevenlabs_base_url: var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_string()),
            audio_dir: var("AUDIO_DIR")
                .unwrap_or_else(|| DEFAULT_AUDIO_DIR.to_string())
                .into(),
            audio_retention: Duration::from_secs(retention_secs),
            provider_timeout,
        })
    }
}

fn parse<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
