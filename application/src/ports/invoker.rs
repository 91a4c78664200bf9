//! Agent invoker port
//!
//! Defines the single call contract the orchestration core has with a
//! language-model provider.

use async_trait::async_trait;
use relay_domain::{ChatTurn, Provider};
use thiserror::Error;

/// Errors that can occur during an invocation
///
/// `MissingCredential` and `MissingModel` are configuration errors detected
/// before any network I/O; the rest are transport/response failures. The
/// chain executor converts every variant into soft-failure transcript text,
/// so none of these abort a run.
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("no API key available for {0}")]
    MissingCredential(Provider),

    #[error("no model identifier configured")]
    MissingModel,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request failed with status {code}: {detail}")]
    Status { code: u16, detail: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Everything needed for one request/response exchange
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub provider: Provider,
    pub model: String,
    /// System prompt; kept separate from the turns
    pub instruction: Option<String>,
    /// Ordered role-tagged segments; order is significant
    pub turns: Vec<ChatTurn>,
    /// Resolved credential: per-agent override or the run's credential map
    pub api_key: Option<String>,
}

/// Performs exactly one exchange with a language-model provider.
///
/// One outbound call per invocation. No retries and no timeouts: these are
/// deliberate policy choices, not omissions — a provider that never responds
/// stalls that one turn, and a failed call degrades one turn's content, not
/// the chain's control flow.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn generate(&self, request: InvocationRequest) -> Result<String, InvokeError>;
}
