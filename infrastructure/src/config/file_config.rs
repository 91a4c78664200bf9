//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! are deserialized directly. Credentials resolve from the direct value
//! first, then from the named environment variable.

use crate::providers::default_base_url;
use relay_domain::{CredentialMap, Provider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// OpenAI API settings (`[providers.openai]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (prefer the env var)
    pub api_key: Option<String>,
    /// Base URL of the chat-completions surface
    pub base_url: String,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: Provider::OpenAi.api_key_env().to_string(),
            api_key: None,
            base_url: default_base_url(Provider::OpenAi).to_string(),
        }
    }
}

/// Gemini API settings (`[providers.gemini]`), served through Google's
/// OpenAI-compatible endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: Provider::Gemini.api_key_env().to_string(),
            api_key: None,
            base_url: default_base_url(Provider::Gemini).to_string(),
        }
    }
}

/// Claude API settings (`[providers.claude]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClaudeConfig {
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for FileClaudeConfig {
    fn default() -> Self {
        Self {
            api_key_env: Provider::Claude.api_key_env().to_string(),
            api_key: None,
            base_url: default_base_url(Provider::Claude).to_string(),
        }
    }
}

/// DeepSeek API settings (`[providers.deepseek]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeepSeekConfig {
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for FileDeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key_env: Provider::DeepSeek.api_key_env().to_string(),
            api_key: None,
            base_url: default_base_url(Provider::DeepSeek).to_string(),
        }
    }
}

/// Provider settings (`[providers]`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileOpenAiConfig,
    pub gemini: FileGeminiConfig,
    pub claude: FileClaudeConfig,
    pub deepseek: FileDeepSeekConfig,
}

impl FileProvidersConfig {
    fn entries(&self) -> [(Provider, &str, Option<&str>, &str); 4] {
        [
            (
                Provider::OpenAi,
                self.openai.api_key_env.as_str(),
                self.openai.api_key.as_deref(),
                self.openai.base_url.as_str(),
            ),
            (
                Provider::Gemini,
                self.gemini.api_key_env.as_str(),
                self.gemini.api_key.as_deref(),
                self.gemini.base_url.as_str(),
            ),
            (
                Provider::Claude,
                self.claude.api_key_env.as_str(),
                self.claude.api_key.as_deref(),
                self.claude.base_url.as_str(),
            ),
            (
                Provider::DeepSeek,
                self.deepseek.api_key_env.as_str(),
                self.deepseek.api_key.as_deref(),
                self.deepseek.base_url.as_str(),
            ),
        ]
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Resolve the run's credential map: direct key first, then the named
    /// environment variable. Providers without a key are simply absent.
    pub fn credential_map(&self) -> CredentialMap {
        let mut credentials = CredentialMap::new();
        for (provider, env_name, direct, _) in self.providers.entries() {
            let key = direct
                .map(ToString::to_string)
                .filter(|key| !key.trim().is_empty())
                .or_else(|| std::env::var(env_name).ok())
                .filter(|key| !key.trim().is_empty());
            if let Some(key) = key {
                credentials.insert(provider, key);
            }
        }
        credentials
    }

    /// Per-provider base URLs for building the transport registry
    pub fn base_urls(&self) -> HashMap<Provider, String> {
        self.providers
            .entries()
            .into_iter()
            .map(|(provider, _, _, base_url)| (provider, base_url.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[providers.openai]
api_key = "sk-direct"

[providers.gemini]
base_url = "http://localhost:9000"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.openai.api_key.as_deref(), Some("sk-direct"));
        assert_eq!(config.providers.gemini.base_url, "http://localhost:9000");
        // Untouched sections keep their defaults
        assert_eq!(config.providers.claude.api_key_env, "CLAUDE_API_KEY");
    }

    #[test]
    fn test_direct_key_wins_over_environment() {
        let toml_str = r#"
[providers.deepseek]
api_key = "sk-file"
api_key_env = "RELAY_TEST_UNSET_VARIABLE"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let credentials = config.credential_map();
        assert_eq!(
            credentials.get(&Provider::DeepSeek).map(String::as_str),
            Some("sk-file")
        );
    }

    #[test]
    fn test_missing_keys_are_absent_from_the_map() {
        let mut scrubbed = FileConfig::default();
        // Point every provider at a variable that cannot exist
        scrubbed.providers.openai.api_key_env = "RELAY_TEST_UNSET_1".to_string();
        scrubbed.providers.gemini.api_key_env = "RELAY_TEST_UNSET_2".to_string();
        scrubbed.providers.claude.api_key_env = "RELAY_TEST_UNSET_3".to_string();
        scrubbed.providers.deepseek.api_key_env = "RELAY_TEST_UNSET_4".to_string();
        assert!(scrubbed.credential_map().is_empty());
    }

    #[test]
    fn test_base_urls_cover_every_provider() {
        let config = FileConfig::default();
        let urls = config.base_urls();
        for provider in Provider::all() {
            assert!(urls.contains_key(&provider));
        }
    }
}
