//! Provider transports and the invoker adapter
//!
//! Each supported provider is reached through a [`ProviderTransport`]
//! selected from a lookup table keyed on the provider tag, so adding a
//! provider means adding a table entry rather than growing a conditional.

pub mod chat_completions;
mod invoker;
mod registry;

pub use chat_completions::OpenAiCompatTransport;
pub use invoker::HttpAgentInvoker;
pub use registry::TransportRegistry;

use async_trait::async_trait;
use relay_application::ports::invoker::InvokeError;
use relay_domain::{ChatTurn, Provider};

/// One request/response exchange with a specific provider
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    fn provider(&self) -> Provider;

    /// Perform exactly one completion call. No retries, no timeout.
    async fn complete(
        &self,
        client: &reqwest::Client,
        api_key: &str,
        model: &str,
        instruction: Option<&str>,
        turns: &[ChatTurn],
    ) -> Result<String, InvokeError>;
}

/// Default base URL for a provider's OpenAI-compatible surface
pub fn default_base_url(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAi => "https://api.openai.com/v1",
        Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        Provider::Claude => "https://api.anthropic.com/v1",
        Provider::DeepSeek => "https://api.deepseek.com/v1",
    }
}
