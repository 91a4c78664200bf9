//! Provider tag value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Supported language-model providers (Value Object)
///
/// This is a closed set: credentials and transports are keyed by this tag,
/// so an unknown tag is a configuration error rather than a Custom variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Gemini,
    Claude,
    DeepSeek,
}

impl Provider {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
            Provider::DeepSeek => "deepseek",
        }
    }

    /// All supported providers, in display order
    pub fn all() -> [Provider; 4] {
        [
            Provider::OpenAi,
            Provider::Gemini,
            Provider::Claude,
            Provider::DeepSeek,
        ]
    }

    /// Conventional environment variable holding this provider's API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Claude => "CLAUDE_API_KEY",
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::OpenAi
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "gemini" => Ok(Provider::Gemini),
            "claude" => Ok(Provider::Claude),
            "deepseek" => Ok(Provider::DeepSeek),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

impl Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// API keys keyed by provider tag; read-only during a run
pub type CredentialMap = HashMap<Provider, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in Provider::all() {
            let s = provider.to_string();
            let parsed: Provider = s.parse().unwrap();
            assert_eq!(provider, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed: Provider = "DeepSeek".parse().unwrap();
        assert_eq!(parsed, Provider::DeepSeek);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result: Result<Provider, _> = "cohere".parse();
        assert!(matches!(result, Err(DomainError::UnknownProvider(_))));
    }

    #[test]
    fn test_api_key_env_names() {
        assert_eq!(Provider::Claude.api_key_env(), "CLAUDE_API_KEY");
        assert_eq!(Provider::OpenAi.api_key_env(), "OPENAI_API_KEY");
    }
}
