use serde::{Deserialize, Serialize};

use super::{
    http_client, map_transport_error, BackendError, ClassifierBackend, MAX_RESPONSE_TOKENS,
    REQUEST_TIMEOUT_SECS,
};

const PROVIDER: &str = "openai";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI Chat Completions backend.
#[derive(Debug)]
pub struct OpenAiBackend {
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl OpenAiBackend {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            client: http_client(REQUEST_TIMEOUT_SECS),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

impl ClassifierBackend for OpenAiBackend {
    fn classify(&self, prompt: &str) -> Result<String, BackendError> {
        let body = ChatRequest {
            model: &self.model,
            max_tokens: MAX_RESPONSE_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
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

        let parsed: ChatResponse = response.json().map_err(|e| {
            BackendError::MalformedResponse {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| BackendError::MalformedResponse {
                provider: PROVIDER.to_string(),
                reason: "empty choices array".to_string(),
            })
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }
}
