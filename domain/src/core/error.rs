//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown provider tag: {0}")]
    UnknownProvider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_display() {
        let error = DomainError::UnknownProvider("cohere".to_string());
        assert!(error.to_string().contains("cohere"));
    }
}
