//! Ports (interfaces) implemented by infrastructure and presentation adapters

pub mod invoker;
pub mod observer;
pub mod transcript_logger;
