//! Judge coordinator: one invocation over every circle's final output
//!
//! Runs only after every circle task has settled. Circles that errored
//! without producing a final output are silently excluded; only circles
//! with an output are judged.

use crate::ports::invoker::{AgentInvoker, InvocationRequest};
use crate::ports::observer::{RunObserver, RunTarget};
use crate::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use crate::use_cases::chain::MessageSeq;
use relay_domain::{
    AgentId, ChatTurn, Circle, CredentialMap, JudgeConfig, Message, Verdict, judge_submissions,
    soft_failure,
};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) struct JudgeCoordinator<I: AgentInvoker + ?Sized> {
    invoker: Arc<I>,
    observer: Arc<dyn RunObserver>,
    logger: Arc<dyn TranscriptLogger>,
    credentials: Arc<CredentialMap>,
}

impl<I: AgentInvoker + ?Sized> JudgeCoordinator<I> {
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

    /// Judge the settled circles. Returns `None` when judging was skipped:
    /// no circle produced an output, or the judge is misconfigured. The
    /// thinking signal is cleared on every exit path.
    pub(crate) async fn run(&self, judge: &JudgeConfig, circles: &[Circle]) -> Option<Verdict> {
        let mut seq = MessageSeq::new("judge");

        let submissions: Vec<(String, String)> = circles
            .iter()
            .filter_map(|circle| {
                circle
                    .final_output
                    .clone()
                    .map(|output| (circle.name.clone(), output))
            })
            .collect();

        if submissions.is_empty() {
            warn!("no circle produced a final output; judging skipped");
            self.emit(
                &mut seq,
                "No circle produced a final output; judging skipped.",
            );
            return None;
        }

        if let Some(problem) = self.configuration_problem(judge) {
            warn!(%problem, "judge misconfigured; judging skipped");
            self.emit(
                &mut seq,
                format!("Judge configuration incomplete ({problem}); judging skipped."),
            );
            return None;
        }

        info!(submissions = submissions.len(), "judging started");
        self.emit(
            &mut seq,
            format!("--- Judging {} submissions ---", submissions.len()),
        );

        self.observer.on_thinking_changed(Some(&AgentId::judge()));
        let request = InvocationRequest {
            provider: judge.provider,
            model: judge.model.clone(),
            instruction: Some(judge.instruction.clone()),
            turns: vec![ChatTurn::user(judge_submissions(&submissions))],
            api_key: judge
                .api_key
                .clone()
                .or_else(|| self.credentials.get(&judge.provider).cloned()),
        };
        let text = match self.invoker.generate(request).await {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "judge invocation failed");
                soft_failure(error)
            }
        };
        self.observer.on_thinking_changed(None);

        let message = Message::assistant(seq.next_id(), &judge.name, AgentId::judge(), &text)
            .with_source(&judge.model, judge.provider);
        self.observer
            .on_message_appended(&RunTarget::Judge, &message);
        if let Ok(payload) = serde_json::to_value(&message) {
            self.logger.log(TranscriptEvent::new("verdict", payload));
        }

        Some(Verdict::new(&judge.name, &judge.model, judge.provider, text))
    }

    /// Which required judge field is missing, if any. Checked before any
    /// network I/O so a misconfigured judge never produces an invocation.
    fn configuration_problem(&self, judge: &JudgeConfig) -> Option<&'static str> {
        let has_key = judge
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
            || self.credentials.contains_key(&judge.provider);
        if !has_key {
            return Some("missing credential");
        }
        if judge.model.trim().is_empty() {
            return Some("missing model");
        }
        if judge.instruction.trim().is_empty() {
            return Some("missing instruction");
        }
        None
    }

    fn emit(&self, seq: &mut MessageSeq, body: impl Into<String>) {
        let message = Message::system(seq.next_id(), body);
        self.observer
            .on_message_appended(&RunTarget::Judge, &message);
        if let Ok(payload) = serde_json::to_value(&message) {
            self.logger.log(TranscriptEvent::new("message", payload));
        }
    }
}
