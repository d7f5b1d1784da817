use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Session Lens analyzer.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Generation backend used for summarization and report composition.
    pub generation_provider: GenerationProvider,
    /// Model identifier passed to the generation provider.
    pub generation_model: String,
    /// API key for the OpenAI provider; unused by Ollama.
    pub openai_api_key: Option<String>,
    /// Optional override for the OpenAI-compatible base URL.
    pub openai_base_url: Option<String>,
    /// Optional override for the local Ollama runtime URL.
    pub ollama_url: Option<String>,
    /// Maximum number of feedback items grouped into one chunk.
    pub feedback_chunk_size: usize,
    /// Maximum number of words grouped into one training-material chunk.
    pub material_chunk_words: usize,
    /// Upper bound on concurrent per-chunk generation calls.
    pub generation_concurrency: usize,
}

/// Supported generation backends for the analysis pipeline.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    /// Hosted OpenAI chat-completions API (or a compatible endpoint).
    OpenAI,
    /// Local Ollama runtime.
    Ollama,
}

const DEFAULT_FEEDBACK_CHUNK_SIZE: usize = 10;
const DEFAULT_MATERIAL_CHUNK_WORDS: usize = 1500;
const DEFAULT_GENERATION_CONCURRENCY: usize = 4;

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            generation_provider: load_env("GENERATION_PROVIDER")?.parse().map_err(|()| {
                ConfigError::InvalidValue("Invalid GENERATION_PROVIDER".to_string())
            })?,
            generation_model: load_env("GENERATION_MODEL")?,
            openai_api_key: load_env_optional("OPENAI_API_KEY"),
            openai_base_url: load_env_optional("OPENAI_BASE_URL"),
            ollama_url: load_env_optional("OLLAMA_URL"),
            feedback_chunk_size: load_positive("FEEDBACK_CHUNK_SIZE", DEFAULT_FEEDBACK_CHUNK_SIZE)?,
            material_chunk_words: load_positive(
                "MATERIAL_CHUNK_WORDS",
                DEFAULT_MATERIAL_CHUNK_WORDS,
            )?,
            generation_concurrency: load_positive(
                "GENERATION_CONCURRENCY",
                DEFAULT_GENERATION_CONCURRENCY,
            )?,
        })
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional positive integer variable, falling back to a default.
fn load_positive(key: &str, default: usize) -> Result<usize, ConfigError> {
    match load_env_optional(key) {
        None => Ok(default),
        Some(value) => {
            let parsed: usize = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))?;
            if parsed == 0 {
                return Err(ConfigError::InvalidValue(key.to_string()));
            }
            Ok(parsed)
        }
    }
}

impl std::str::FromStr for GenerationProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        provider = ?config.generation_provider,
        model = %config.generation_model,
        feedback_chunk_size = config.feedback_chunk_size,
        material_chunk_words = config.material_chunk_words,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_known_values() {
        assert!(matches!(
            "openai".parse::<GenerationProvider>(),
            Ok(GenerationProvider::OpenAI)
        ));
        assert!(matches!(
            "OLLAMA".parse::<GenerationProvider>(),
            Ok(GenerationProvider::Ollama)
        ));
        assert!("gemini".parse::<GenerationProvider>().is_err());
    }
}
