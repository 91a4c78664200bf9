//! Circle entity and run progress

use crate::agent::{AgentConfig, CircleId};
use crate::transcript::Message;
use serde::{Deserialize, Serialize};

/// Progress counters for a circle's current run (Value Object)
///
/// Invariant: `0 <= sent <= total` where `total = agents * rounds`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProgress {
    pub sent: u32,
    pub total: u32,
}

/// One independent group of agents running its own relay (Entity)
///
/// The message log and run-state fields are reset at the start of every run
/// and mutated only by this circle's own chain executor (single writer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub id: CircleId,
    pub name: String,
    /// Turn order; significant and preserved
    pub agents: Vec<AgentConfig>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub progress: RunProgress,
}

impl Circle {
    pub fn new(id: impl Into<CircleId>, name: impl Into<String>, agents: Vec<AgentConfig>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            agents,
            messages: Vec::new(),
            final_output: None,
            error: None,
            running: false,
            progress: RunProgress::default(),
        }
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Clear all state from a previous run and mark the circle running.
    ///
    /// Must happen before the first new message of a run is appended.
    pub fn reset_for_run(&mut self, rounds: u32) {
        self.messages.clear();
        self.final_output = None;
        self.error = None;
        self.running = true;
        self.progress = RunProgress {
            sent: 0,
            total: self.agents.len() as u32 * rounds,
        };
    }

    /// Append a message to the run's transcript (append-only log).
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Count one assistant reply against the progress total.
    pub fn note_sent(&mut self) -> RunProgress {
        debug_assert!(self.progress.sent < self.progress.total);
        self.progress.sent += 1;
        self.progress
    }

    /// Record the chain's final context; set at most once per run.
    pub fn record_final_output(&mut self, output: impl Into<String>) {
        debug_assert!(self.final_output.is_none());
        self.final_output = Some(output.into());
        self.running = false;
    }

    /// Record a circle-level failure and stop the run for this circle.
    pub fn record_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.running = false;
    }

    pub fn has_settled(&self) -> bool {
        self.final_output.is_some() || self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::Provider;

    fn circle_with_agents(count: usize) -> Circle {
        let agents = (0..count)
            .map(|i| {
                AgentConfig::new(
                    format!("a{i}"),
                    format!("Agent {i}"),
                    "You are helpful.",
                    "gpt-4o",
                    Provider::OpenAi,
                )
            })
            .collect();
        Circle::new("c1", "Test Circle", agents)
    }

    #[test]
    fn test_reset_clears_previous_run_state() {
        let mut circle = circle_with_agents(2);
        circle.push_message(Message::system("m1", "old"));
        circle.record_final_output("stale output");
        circle.error = Some("stale error".to_string());

        circle.reset_for_run(3);

        assert!(circle.messages.is_empty());
        assert!(circle.final_output.is_none());
        assert!(circle.error.is_none());
        assert!(circle.running);
        assert_eq!(circle.progress, RunProgress { sent: 0, total: 6 });
    }

    #[test]
    fn test_note_sent_advances_progress() {
        let mut circle = circle_with_agents(2);
        circle.reset_for_run(1);
        assert_eq!(circle.note_sent(), RunProgress { sent: 1, total: 2 });
        assert_eq!(circle.note_sent(), RunProgress { sent: 2, total: 2 });
    }

    #[test]
    fn test_settling_clears_running() {
        let mut circle = circle_with_agents(1);
        circle.reset_for_run(1);
        circle.record_final_output("done");
        assert!(!circle.running);
        assert!(circle.has_settled());

        let mut failed = circle_with_agents(1);
        failed.reset_for_run(1);
        failed.record_error("boom");
        assert!(!failed.running);
        assert!(failed.has_settled());
    }
}
