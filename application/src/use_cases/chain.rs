//! Chain executor: drives one circle through its rounds
//!
//! One executor per circle per run, never reused. Turns within a circle are
//! strictly sequential — each turn's input depends on the previous turn's
//! output — so the only suspension points are the invoker calls.

use crate::ports::invoker::{AgentInvoker, InvocationRequest};
use crate::ports::observer::{RunObserver, RunTarget};
use crate::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use relay_domain::{
    AgentConfig, Circle, CredentialMap, Message, TurnBuilder, join_replies, soft_failure,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Run-scoped message id sequence for one target
pub(crate) struct MessageSeq {
    target: String,
    next: u32,
}

impl MessageSeq {
    pub(crate) fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            next: 0,
        }
    }

    pub(crate) fn next_id(&mut self) -> String {
        let id = format!("msg-{}-{}", self.target, self.next);
        self.next += 1;
        id
    }
}

pub(crate) struct ChainExecutor<I: AgentInvoker + ?Sized> {
    invoker: Arc<I>,
    observer: Arc<dyn RunObserver>,
    logger: Arc<dyn TranscriptLogger>,
    credentials: Arc<CredentialMap>,
}

impl<I: AgentInvoker + ?Sized> Clone for ChainExecutor<I> {
    fn clone(&self) -> Self {
        Self {
            invoker: Arc::clone(&self.invoker),
            observer: Arc::clone(&self.observer),
            logger: Arc::clone(&self.logger),
            credentials: Arc::clone(&self.credentials),
        }
    }
}

impl<I: AgentInvoker + ?Sized> ChainExecutor<I> {
    pub(crate) fn new(
        invoker: Arc<I>,
        observer: Arc<dyn RunObserver>,
        logger: Arc<dyn TranscriptLogger>,
        credentials: Arc<CredentialMap>,
    ) -> Self {
        Self {
            invoker,
            observer,
            logger,
            credentials,
        }
    }

    /// Drive the circle through `rounds` rounds and record its final output.
    ///
    /// The circle must already be reset for this run. Invoker failures are
    /// absorbed per turn as soft-failure replies; the chain itself always
    /// runs to completion.
    pub(crate) async fn run(
        &self,
        mut circle: Circle,
        prompt: Arc<String>,
        shared_context: Option<Arc<String>>,
        rounds: u32,
    ) -> Circle {
        let target = RunTarget::Circle(circle.id.clone());
        let mut seq = MessageSeq::new(circle.id.as_str());
        // Agent configs are read-only during a run
        let agents = circle.agents.clone();

        debug!(
            circle = %circle.id,
            agents = agents.len(),
            rounds,
            "starting telephone chain"
        );

        self.emit(
            &mut circle,
            &target,
            Message::user(seq.next_id(), prompt.as_str()),
        );

        let mut previous_round_context = prompt.as_str().to_string();

        for round in 0..rounds {
            let label = round + 1;
            self.emit(
                &mut circle,
                &target,
                Message::system(seq.next_id(), format!("--- Starting Round {label} ---"))
                    .with_round(label),
            );

            let mut round_replies: Vec<String> = Vec::with_capacity(agents.len());

            for (index, agent) in agents.iter().enumerate() {
                let contextual_text = if index == 0 {
                    previous_round_context.clone()
                } else {
                    join_replies(&round_replies)
                };
                // Shared context rides only on the very first turn of the run
                let shared = if round == 0 && index == 0 {
                    shared_context.as_deref().map(String::as_str)
                } else {
                    None
                };
                let turns = TurnBuilder::build(agent.seed.as_deref(), shared, &contextual_text);

                self.emit(
                    &mut circle,
                    &target,
                    Message::turn_notice(seq.next_id(), &agent.name).with_round(label),
                );

                self.observer.on_thinking_changed(Some(&agent.id));
                let reply = match self
                    .invoker
                    .generate(self.request_for(agent, turns))
                    .await
                {
                    Ok(text) => text,
                    Err(error) => {
                        warn!(circle = %circle.id, agent = %agent.id, %error, "turn failed");
                        soft_failure(error)
                    }
                };
                self.observer.on_thinking_changed(None);

                round_replies.push(reply.clone());
                self.emit(
                    &mut circle,
                    &target,
                    Message::assistant(seq.next_id(), &agent.name, agent.id.clone(), reply)
                        .with_round(label)
                        .with_source(&agent.model, agent.provider),
                );

                let progress = circle.note_sent();
                self.observer
                    .on_progress_changed(&circle.id, progress.sent, progress.total);
            }

            previous_round_context = join_replies(&round_replies);
        }

        let preview: String = previous_round_context.chars().take(200).collect();
        self.emit(
            &mut circle,
            &target,
            Message::system(
                seq.next_id(),
                format!("--- Chain Complete. Final context: {preview}... ---"),
            ),
        );

        circle.record_final_output(previous_round_context);
        debug!(circle = %circle.id, "telephone chain complete");
        circle
    }

    fn request_for(&self, agent: &AgentConfig, turns: Vec<relay_domain::ChatTurn>) -> InvocationRequest {
        let instruction = Some(agent.instruction.clone()).filter(|text| !text.trim().is_empty());
        let api_key = agent
            .api_key
            .clone()
            .or_else(|| self.credentials.get(&agent.provider).cloned());
        InvocationRequest {
            provider: agent.provider,
            model: agent.model.clone(),
            instruction,
            turns,
            api_key,
        }
    }

    fn emit(&self, circle: &mut Circle, target: &RunTarget, message: Message) {
        self.observer.on_message_appended(target, &message);
        if let Ok(payload) = serde_json::to_value(&message) {
            self.logger.log(TranscriptEvent::new(
                "message",
                serde_json::json!({ "circle": circle.id.as_str(), "message": payload }),
            ));
        }
        circle.push_message(message);
    }
}
