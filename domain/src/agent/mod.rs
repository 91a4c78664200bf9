//! Agent configuration entities and identifiers

use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};

/// Identifier of an agent, unique within its circle (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sentinel id used for the judge's thinking indicator
    pub fn judge() -> Self {
        Self("judge".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        AgentId::new(s)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        AgentId::new(s)
    }
}

/// Identifier of a circle (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircleId(String);

impl CircleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CircleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CircleId {
    fn from(s: &str) -> Self {
        CircleId::new(s)
    }
}

/// Configuration of a single agent (Entity)
///
/// Mutated only by configuration tooling; read-only during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Opaque id, unique within the agent's circle
    pub id: AgentId,
    /// Display name shown in transcripts
    pub name: String,
    /// Instruction text; travels as the invocation's system prompt,
    /// never as a conversation turn
    pub instruction: String,
    /// Seed text folded into the agent's first context segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    /// Model identifier, provider-specific and free-form
    pub model: String,
    /// Which provider serves this agent
    pub provider: Provider,
    /// Per-agent credential override; falls back to the run's credential map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl AgentConfig {
    pub fn new(
        id: impl Into<AgentId>,
        name: impl Into<String>,
        instruction: impl Into<String>,
        model: impl Into<String>,
        provider: Provider,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            instruction: instruction.into(),
            seed: None,
            model: model.into(),
            provider,
            api_key: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// The judge shares the agent shape but is singular per run and belongs
/// to no circle.
pub type JudgeConfig = AgentConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_builder() {
        let agent = AgentConfig::new("a1", "Writer", "You write.", "gpt-4o", Provider::OpenAi)
            .with_seed("Topic: dragons")
            .with_api_key("sk-test");
        assert_eq!(agent.id.as_str(), "a1");
        assert_eq!(agent.seed.as_deref(), Some("Topic: dragons"));
        assert_eq!(agent.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_judge_sentinel_id() {
        assert_eq!(AgentId::judge().as_str(), "judge");
    }
}
