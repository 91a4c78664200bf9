//! OpenAI-compatible chat-completions transport
//!
//! Every supported provider fronts an OpenAI-compatible chat-completions
//! surface (Gemini and Claude through their compatibility endpoints), so a
//! single codec serves all of them; transports differ only in base URL.

use super::ProviderTransport;
use async_trait::async_trait;
use relay_application::ports::invoker::InvokeError;
use relay_domain::{ChatTurn, Provider};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Pull a human-readable message out of an error body, falling back to the
/// status code alone.
fn error_detail(status: u16, payload: &Value) -> String {
    payload
        .get("error")
        .and_then(Value::as_object)
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

/// Transport speaking the OpenAI chat-completions dialect
pub struct OpenAiCompatTransport {
    provider: Provider,
    base_url: String,
}

impl OpenAiCompatTransport {
    pub fn new(provider: Provider, base_url: impl Into<String>) -> Self {
        Self {
            provider,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ProviderTransport for OpenAiCompatTransport {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(
        &self,
        client: &reqwest::Client,
        api_key: &str,
        model: &str,
        instruction: Option<&str>,
        turns: &[ChatTurn],
    ) -> Result<String, InvokeError> {
        // Instruction first, as the system message, then the turns in order
        let mut messages = Vec::with_capacity(turns.len() + 1);
        if let Some(instruction) = instruction {
            messages.push(WireMessage {
                role: "system",
                content: instruction,
            });
        }
        for turn in turns {
            messages.push(WireMessage {
                role: turn.role.as_str(),
                content: &turn.text,
            });
        }

        let payload = CompletionRequest {
            model,
            messages,
            stream: false,
        };

        debug!(provider = %self.provider, model, "sending chat completion request");

        let response = client
            .post(endpoint(&self.base_url, "/chat/completions"))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| InvokeError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(InvokeError::Status {
                code: status.as_u16(),
                detail: error_detail(status.as_u16(), &body),
            });
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|err| InvokeError::MalformedResponse(err.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                InvokeError::MalformedResponse("no assistant content in response".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_duplicate_slashes() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/", "/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint("https://api.openai.com/v1", "chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_error_detail_prefers_provider_message() {
        let payload = serde_json::json!({"error": {"message": "rate limited"}});
        assert_eq!(error_detail(429, &payload), "rate limited");
    }

    #[test]
    fn test_error_detail_falls_back_to_status() {
        assert_eq!(
            error_detail(500, &Value::Null),
            "request failed with status 500"
        );
    }
}
