use serde::{Deserialize, Serialize};

use super::{
    http_client, map_transport_error, BackendError, ClassifierBackend, MAX_RESPONSE_TOKENS,
    REQUEST_TIMEOUT_SECS,
};

const PROVIDER: &str = "anthropic";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API backend.
#[derive(Debug)]
pub struct AnthropicBackend {
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl AnthropicBackend {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            client: http_client(REQUEST_TIMEOUT_SECS),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl ClassifierBackend for AnthropicBackend {
    fn classify(&self, prompt: &str) -> Result<String, BackendError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_RESPONSE_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .map_err(|e| map_transport_error(PROVIDER, REQUEST_TIMEOUT_SECS, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BackendError::Api {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response.json().map_err(|e| {
            BackendError::MalformedResponse {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            }
        })?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| BackendError::MalformedResponse {
                provider: PROVIDER.to_string(),
                reason: "empty content array".to_string(),
            })
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_when_no_override() {
        let backend = AnthropicBackend::new("sk-test", None);
        assert_eq!(backend.model(), DEFAULT_MODEL);
    }

    #[test]
    fn model_override_is_kept() {
        let backend = AnthropicBackend::new("sk-test", Some("claude-haiku-3-5"));
        assert_eq!(backend.model(), "claude-haiku-3-5");
    }

    #[test]
    fn request_body_serializes() {
        let body = MessagesRequest {
            model: DEFAULT_MODEL,
            max_tokens: MAX_RESPONSE_TOKENS,
            messages: vec![Message {
                role: "user",
                content: "screen this",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
