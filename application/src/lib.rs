//! Application layer for circle-relay
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; adapters for the ports live in infrastructure and
//! presentation.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    invoker::{AgentInvoker, InvocationRequest, InvokeError},
    observer::{NoObserver, RunObserver, RunTarget},
    transcript_logger::{NoTranscriptLog, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::run_relay::{RunRelayError, RunRelayInput, RunRelayUseCase};
