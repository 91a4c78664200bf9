//! Infrastructure layer for circle-relay
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: HTTP provider transports, configuration file loading,
//! named-setup persistence, and JSONL transcript logging.

pub mod config;
pub mod logging;
pub mod providers;
pub mod setups;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileProvidersConfig};
pub use logging::JsonlTranscriptLogger;
pub use providers::{
    HttpAgentInvoker, OpenAiCompatTransport, ProviderTransport, TransportRegistry,
};
pub use setups::{RunSetup, SetupStore, SetupStoreError};
