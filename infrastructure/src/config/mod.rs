//! Configuration file loading

mod file_config;
mod loader;

pub use file_config::{
    FileClaudeConfig, FileConfig, FileDeepSeekConfig, FileGeminiConfig, FileOpenAiConfig,
    FileProvidersConfig,
};
pub use loader::ConfigLoader;
