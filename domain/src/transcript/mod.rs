//! Transcript entities: the messages a run appends and the wire-level turns
//! handed to a provider.

use crate::agent::AgentId;
use crate::core::provider::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a transcript message or wire turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Sub-kind of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Ordinary content
    #[default]
    Content,
    /// Internal "turn received" placeholder signalling an agent is about
    /// to act; carries no conversational content
    TurnNotice,
}

/// One role-tagged text segment of a provider invocation
///
/// Distinct from [`Message`]: turns are what an agent receives, messages
/// are what the run records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// A transcript message (Entity)
///
/// Immutable once created; circles treat their message log as append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// Producing agent's display name; absent for plain system/user entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentId>,
    pub role: Role,
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// 1-based round number; absent for pre-round messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    #[serde(default, skip_serializing_if = "is_content")]
    pub kind: MessageKind,
    /// (model, provider) tag for assistant-authored entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<(String, Provider)>,
}

fn is_content(kind: &MessageKind) -> bool {
    *kind == MessageKind::Content
}

impl Message {
    fn new(id: impl Into<String>, role: Role, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            agent_name: None,
            agent_id: None,
            role,
            body: body.into(),
            created_at: Utc::now(),
            round: None,
            kind: MessageKind::Content,
            source: None,
        }
    }

    /// A user-authored entry, e.g. the run's initial prompt
    pub fn user(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id, Role::User, body)
    }

    /// A system-authored entry
    pub fn system(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id, Role::System, body)
    }

    /// The "turn received" placeholder emitted just before an agent acts
    pub fn turn_notice(id: impl Into<String>, agent_name: impl Into<String>) -> Self {
        let mut message = Self::new(id, Role::System, "Received prompt...");
        message.agent_name = Some(agent_name.into());
        message.kind = MessageKind::TurnNotice;
        message
    }

    /// An assistant-authored reply
    pub fn assistant(
        id: impl Into<String>,
        agent_name: impl Into<String>,
        agent_id: AgentId,
        body: impl Into<String>,
    ) -> Self {
        let mut message = Self::new(id, Role::Assistant, body);
        message.agent_name = Some(agent_name.into());
        message.agent_id = Some(agent_id);
        message
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    pub fn with_source(mut self, model: impl Into<String>, provider: Provider) -> Self {
        self.source = Some((model.into(), provider));
        self
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    pub fn is_turn_notice(&self) -> bool {
        self.kind == MessageKind::TurnNotice
    }
}
