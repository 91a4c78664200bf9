//! HTTP adapter for the agent invoker port

use super::TransportRegistry;
use async_trait::async_trait;
use relay_application::ports::invoker::{AgentInvoker, InvocationRequest, InvokeError};
use tracing::debug;

/// Invoker performing one HTTP exchange per invocation
///
/// Configuration problems (absent credential, blank model) are rejected
/// before any network I/O so they surface in the transcript without a
/// request ever leaving the process.
pub struct HttpAgentInvoker {
    client: reqwest::Client,
    registry: TransportRegistry,
}

impl HttpAgentInvoker {
    pub fn new(registry: TransportRegistry) -> Self {
        Self {
            client: reqwest::Client::new(),
            registry,
        }
    }

    pub fn with_default_transports() -> Self {
        Self::new(TransportRegistry::with_defaults())
    }
}

#[async_trait]
impl AgentInvoker for HttpAgentInvoker {
    async fn generate(&self, request: InvocationRequest) -> Result<String, InvokeError> {
        let api_key = request
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(InvokeError::MissingCredential(request.provider))?;
        if request.model.trim().is_empty() {
            return Err(InvokeError::MissingModel);
        }

        let transport = self.registry.get(request.provider).ok_or_else(|| {
            InvokeError::Transport(format!(
                "no transport registered for provider {}",
                request.provider
            ))
        })?;

        debug!(
            provider = %request.provider,
            model = %request.model,
            turns = request.turns.len(),
            "invoking agent"
        );

        transport
            .complete(
                &self.client,
                api_key,
                &request.model,
                request.instruction.as_deref(),
                &request.turns,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::OpenAiCompatTransport;
    use httpmock::prelude::*;
    use relay_domain::{ChatTurn, Provider};
    use std::sync::Arc;

    fn invoker_against(server: &MockServer) -> HttpAgentInvoker {
        let mut registry = TransportRegistry::new();
        registry.insert(Arc::new(OpenAiCompatTransport::new(
            Provider::OpenAi,
            server.base_url(),
        )));
        HttpAgentInvoker::new(registry)
    }

    fn request(api_key: Option<&str>) -> InvocationRequest {
        InvocationRequest {
            provider: Provider::OpenAi,
            model: "gpt-4o".to_string(),
            instruction: Some("You are terse.".to_string()),
            turns: vec![ChatTurn::user("hello")],
            api_key: api_key.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn generate_parses_assistant_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body(serde_json::json!({
                        "model": "gpt-4o",
                        "messages": [
                            {"role": "system", "content": "You are terse."},
                            {"role": "user", "content": "hello"},
                        ],
                        "stream": false,
                    }));
                then.status(200).json_body(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "hi there"}}],
                }));
            })
            .await;

        let invoker = invoker_against(&server);
        let reply = invoker.generate(request(Some("sk-test"))).await.unwrap();

        assert_eq!(reply, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_typed_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429)
                    .json_body(serde_json::json!({"error": {"message": "rate limited"}}));
            })
            .await;

        let invoker = invoker_against(&server);
        let result = invoker.generate(request(Some("sk-test"))).await;

        match result {
            Err(InvokeError::Status { code, detail }) => {
                assert_eq!(code, 429);
                assert_eq!(detail, "rate limited");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_response_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(serde_json::json!({"choices": []}));
            })
            .await;

        let invoker = invoker_against(&server);
        let result = invoker.generate(request(Some("sk-test"))).await;

        assert!(matches!(result, Err(InvokeError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn missing_credential_never_touches_the_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200);
            })
            .await;

        let invoker = invoker_against(&server);
        let result = invoker.generate(request(None)).await;

        assert!(matches!(
            result,
            Err(InvokeError::MissingCredential(Provider::OpenAi))
        ));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn blank_model_is_rejected_before_any_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200);
            })
            .await;

        let invoker = invoker_against(&server);
        let mut bad = request(Some("sk-test"));
        bad.model = "  ".to_string();
        let result = invoker.generate(bad).await;

        assert!(matches!(result, Err(InvokeError::MissingModel)));
        assert_eq!(mock.hits_async().await, 0);
    }
}
