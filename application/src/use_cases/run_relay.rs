//! Run Relay use case
//!
//! Orchestrates the full run: every circle's telephone chain runs
//! concurrently with isolated failure domains, then the judge synthesizes
//! the surviving outputs.

use crate::ports::invoker::AgentInvoker;
use crate::ports::observer::{NoObserver, RunObserver};
use crate::ports::transcript_logger::{NoTranscriptLog, TranscriptEvent, TranscriptLogger};
use crate::use_cases::chain::ChainExecutor;
use crate::use_cases::judge::JudgeCoordinator;
use relay_domain::{Circle, CredentialMap, JudgeConfig, RelayResult};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Precondition violations, rejected before any message or network call
#[derive(Error, Debug)]
pub enum RunRelayError {
    #[error("No circles configured for the relay")]
    NoCircles,

    #[error("Initial prompt is empty")]
    EmptyPrompt,

    #[error("Circle '{0}' has no agents")]
    EmptyCircle(String),
}

/// Input for the RunRelay use case
#[derive(Debug, Clone)]
pub struct RunRelayInput {
    /// The circles to run; order is preserved in the result
    pub circles: Vec<Circle>,
    /// The judge invoked once after every circle settles
    pub judge: JudgeConfig,
    /// The run's initial prompt
    pub prompt: String,
    /// Rounds per circle; always >= 1
    pub rounds: u32,
    /// Optional blob attached to the very first turn of each circle
    pub shared_context: Option<String>,
    /// API keys keyed by provider; read-only during the run
    pub credentials: CredentialMap,
}

impl RunRelayInput {
    pub fn new(circles: Vec<Circle>, judge: JudgeConfig, prompt: impl Into<String>) -> Self {
        Self {
            circles,
            judge,
            prompt: prompt.into(),
            rounds: 1,
            shared_context: None,
            credentials: CredentialMap::new(),
        }
    }

    /// Set the round count, clamped upward to 1
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds.max(1);
        self
    }

    pub fn with_shared_context(mut self, context: impl Into<String>) -> Self {
        self.shared_context = Some(context.into());
        self
    }

    pub fn with_credentials(mut self, credentials: CredentialMap) -> Self {
        self.credentials = credentials;
        self
    }

    fn validate(&self) -> Result<(), RunRelayError> {
        if self.circles.is_empty() {
            return Err(RunRelayError::NoCircles);
        }
        if self.prompt.trim().is_empty() {
            return Err(RunRelayError::EmptyPrompt);
        }
        for circle in &self.circles {
            if circle.agents.is_empty() {
                return Err(RunRelayError::EmptyCircle(circle.name.clone()));
            }
        }
        Ok(())
    }
}

/// Use case for running every circle and judging the results
pub struct RunRelayUseCase<I: AgentInvoker + 'static> {
    invoker: Arc<I>,
    logger: Arc<dyn TranscriptLogger>,
}

impl<I: AgentInvoker + 'static> RunRelayUseCase<I> {
    pub fn new(invoker: Arc<I>) -> Self {
        Self {
            invoker,
            logger: Arc::new(NoTranscriptLog),
        }
    }

    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the run with no observer
    pub async fn execute(&self, input: RunRelayInput) -> Result<RelayResult, RunRelayError> {
        self.execute_with_observer(input, Arc::new(NoObserver)).await
    }

    /// Execute the run, surfacing messages, thinking state, and progress
    /// through the observer.
    pub async fn execute_with_observer(
        &self,
        input: RunRelayInput,
        observer: Arc<dyn RunObserver>,
    ) -> Result<RelayResult, RunRelayError> {
        input.validate()?;

        let RunRelayInput {
            circles,
            judge,
            prompt,
            rounds,
            shared_context,
            credentials,
        } = input;

        info!(circles = circles.len(), rounds, "starting relay run");
        self.logger.log(TranscriptEvent::new(
            "run_started",
            serde_json::json!({
                "prompt": prompt,
                "rounds": rounds,
                "circles": circles.len(),
            }),
        ));

        let credentials = Arc::new(credentials);
        let prompt_text = Arc::new(prompt.clone());
        let shared_context = shared_context.map(Arc::new);

        // All chains launch at the same logical instant; each task owns its
        // circle outright (single-writer). The pre-run snapshot lets a
        // panicking task still settle into an error record.
        let mut handles: Vec<(Circle, JoinHandle<Circle>)> = Vec::with_capacity(circles.len());

        for mut circle in circles {
            circle.reset_for_run(rounds);
            observer.on_progress_changed(&circle.id, 0, circle.progress.total);

            let executor = ChainExecutor::new(
                Arc::clone(&self.invoker),
                Arc::clone(&observer),
                Arc::clone(&self.logger),
                Arc::clone(&credentials),
            );
            let snapshot = circle.clone();
            let prompt_text = Arc::clone(&prompt_text);
            let shared_context = shared_context.clone();

            let handle = tokio::spawn(async move {
                executor.run(circle, prompt_text, shared_context, rounds).await
            });
            handles.push((snapshot, handle));
        }

        // Wait for every circle to settle; never short-circuit on failure.
        let mut circles: Vec<Circle> = Vec::with_capacity(handles.len());
        for (mut snapshot, handle) in handles {
            match handle.await {
                Ok(circle) => {
                    self.logger.log(TranscriptEvent::new(
                        "circle_settled",
                        serde_json::json!({
                            "circle": circle.id.as_str(),
                            "error": circle.error,
                        }),
                    ));
                    circles.push(circle);
                }
                Err(join_error) => {
                    warn!(circle = %snapshot.id, %join_error, "circle task failed");
                    snapshot.record_error(format!("circle task failed: {join_error}"));
                    self.logger.log(TranscriptEvent::new(
                        "circle_failed",
                        serde_json::json!({
                            "circle": snapshot.id.as_str(),
                            "error": snapshot.error,
                        }),
                    ));
                    circles.push(snapshot);
                }
            }
        }

        let verdict = JudgeCoordinator::new(
            Arc::clone(&self.invoker),
            Arc::clone(&observer),
            Arc::clone(&self.logger),
            Arc::clone(&credentials),
        )
        .run(&judge, &circles)
        .await;

        self.logger.log(TranscriptEvent::new(
            "run_completed",
            serde_json::json!({
                "completed": circles.iter().filter(|c| c.final_output.is_some()).count(),
                "failed": circles.iter().filter(|c| c.error.is_some()).count(),
                "judged": verdict.is_some(),
            }),
        ));
        info!("relay run complete");

        Ok(RelayResult {
            prompt,
            rounds,
            circles,
            verdict,
        })
    }
}
