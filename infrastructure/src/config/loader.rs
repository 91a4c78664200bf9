//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./relay.toml` or `./.relay.toml`
    /// 3. Global: `<config dir>/circle-relay/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("circle-relay").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["relay.toml", ".relay.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.providers.openai.api_key.is_none());
        assert_eq!(config.providers.openai.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_global_config_path_names_the_app() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("circle-relay"));
    }
}
