pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod openai;

pub use anthropic::*;
pub use gemini::*;
pub use mock::*;
pub use openai::*;

use thiserror::Error;

use crate::config::{ConfigError, SUPPORTED_PROVIDERS};

/// Response budget for screening calls. The answer is three short lines
/// plus a summary.
pub const MAX_RESPONSE_TOKENS: u32 = 500;

/// Per-request timeout for provider calls. Timeouts are a backend
/// responsibility, not orchestrator logic.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Cannot reach {provider} API: {reason}")]
    Connection { provider: String, reason: String },

    #[error("{provider} request timed out after {secs}s")]
    Timeout { provider: String, secs: u64 },

    #[error("{provider} returned error (status {status}): {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed {provider} response: {reason}")]
    MalformedResponse { provider: String, reason: String },
}

/// One interchangeable model provider. Turns an opaque instruction string
/// into an opaque response string and nothing else — no policy, no
/// persistence, no automatic retry.
pub trait ClassifierBackend: std::fmt::Debug {
    fn classify(&self, prompt: &str) -> Result<String, BackendError>;

    /// Provider name for logging.
    fn provider(&self) -> &'static str;

    /// Model in use, for logging.
    fn model(&self) -> &str;
}

/// Construct a backend by provider name.
///
/// Unknown names and unconfigured keys fail here, before any item is
/// processed. `model` overrides the provider default when given.
pub fn create_backend(
    provider: &str,
    api_key: &str,
    model: Option<&str>,
) -> Result<Box<dyn ClassifierBackend>, ConfigError> {
    // An unexpanded `${VAR}` placeholder means the loader found no value.
    if api_key.is_empty() || api_key.starts_with("${") {
        return Err(ConfigError::MissingApiKey(provider.to_string()));
    }

    match provider {
        "anthropic" => Ok(Box::new(AnthropicBackend::new(api_key, model))),
        "openai" => Ok(Box::new(OpenAiBackend::new(api_key, model))),
        "gemini" => Ok(Box::new(GeminiBackend::new(api_key, model))),
        other => Err(ConfigError::UnknownProvider {
            name: other.to_string(),
            supported: SUPPORTED_PROVIDERS,
        }),
    }
}

/// Shared blocking HTTP client construction for provider backends.
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

/// Map a reqwest transport error to a typed backend error.
pub(crate) fn map_transport_error(
    provider: &'static str,
    timeout_secs: u64,
    e: reqwest::Error,
) -> BackendError {
    if e.is_connect() {
        BackendError::Connection {
            provider: provider.to_string(),
            reason: e.to_string(),
        }
    } else if e.is_timeout() {
        BackendError::Timeout {
            provider: provider.to_string(),
            secs: timeout_secs,
        }
    } else {
        BackendError::HttpClient(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_config_error() {
        let err = create_backend("mistral", "sk-test", None).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider { .. }));
    }

    #[test]
    fn empty_api_key_is_config_error() {
        let err = create_backend("anthropic", "", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn unexpanded_placeholder_is_config_error() {
        let err = create_backend("openai", "${OPENAI_API_KEY}", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn each_supported_provider_constructs() {
        for provider in SUPPORTED_PROVIDERS {
            let backend = create_backend(provider, "sk-test", None).unwrap();
            assert_eq!(backend.provider(), *provider);
        }
    }

    #[test]
    fn model_override_applies() {
        let backend = create_backend("anthropic", "sk-test", Some("claude-haiku-3-5")).unwrap();
        assert_eq!(backend.model(), "claude-haiku-3-5");
    }
}
