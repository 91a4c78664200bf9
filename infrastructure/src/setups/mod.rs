//! Named run setup persistence
//!
//! A full run configuration (circles, judge, prompt, rounds, shared context)
//! is serializable to a named JSON blob and loadable back into the same
//! inputs as a fresh configuration. Credentials are deliberately not part of
//! a setup; they come from config or the environment at run time.

use relay_application::RunRelayInput;
use relay_domain::{Circle, CredentialMap, JudgeConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from the setup store
#[derive(Error, Debug)]
pub enum SetupStoreError {
    #[error("setup '{0}' not found")]
    NotFound(String),

    #[error("invalid setup name '{0}'")]
    InvalidName(String),

    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A saved run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSetup {
    pub circles: Vec<Circle>,
    pub judge: JudgeConfig,
    pub prompt: String,
    pub rounds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
}

impl RunSetup {
    /// Turn the setup back into run inputs, attaching run-time credentials
    pub fn into_input(self, credentials: CredentialMap) -> RunRelayInput {
        let mut input = RunRelayInput::new(self.circles, self.judge, self.prompt)
            .with_rounds(self.rounds)
            .with_credentials(credentials);
        if let Some(context) = self.shared_context {
            input = input.with_shared_context(context);
        }
        input
    }
}

/// Directory-backed store of named setups, one JSON file per setup
pub struct SetupStore {
    dir: PathBuf,
}

impl SetupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory
    pub fn open_default() -> Result<Self, SetupStoreError> {
        dirs::data_dir()
            .map(|d| Self::new(d.join("circle-relay").join("setups")))
            .ok_or(SetupStoreError::NoDataDir)
    }

    pub fn save(&self, name: &str, setup: &RunSetup) -> Result<PathBuf, SetupStoreError> {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(setup)?;
        std::fs::write(&path, json)?;
        debug!(name, path = %path.display(), "setup saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<RunSetup, SetupStoreError> {
        let path = self.path_for(name)?;
        let json = std::fs::read_to_string(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SetupStoreError::NotFound(name.to_string())
            } else {
                SetupStoreError::Io(err)
            }
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load a setup directly from a file path (not from the store)
    pub fn load_path(path: &Path) -> Result<RunSetup, SetupStoreError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Saved setup names, sorted
    pub fn list(&self) -> Result<Vec<String>, SetupStoreError> {
        let mut names = Vec::new();
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn delete(&self, name: &str) -> Result<(), SetupStoreError> {
        let path = self.path_for(name)?;
        std::fs::remove_file(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SetupStoreError::NotFound(name.to_string())
            } else {
                SetupStoreError::Io(err)
            }
        })
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SetupStoreError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(SetupStoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::{AgentConfig, Provider};

    fn sample_setup() -> RunSetup {
        let agents = vec![
            AgentConfig::new("a1", "Writer", "You write.", "gpt-4o", Provider::OpenAi)
                .with_seed("Topic: the last dragon"),
            AgentConfig::new("a2", "Critic", "You critique.", "gemini-pro", Provider::Gemini),
        ];
        RunSetup {
            circles: vec![Circle::new("c1", "Story Circle", agents)],
            judge: AgentConfig::new(
                "judge",
                "The Judge",
                "Pick the best.",
                "gpt-4o",
                Provider::OpenAi,
            ),
            prompt: "Write a paragraph.".to_string(),
            rounds: 2,
            shared_context: Some("Everyone likes dragons.".to_string()),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetupStore::new(dir.path());

        store.save("story", &sample_setup()).unwrap();
        let loaded = store.load("story").unwrap();

        assert_eq!(loaded.prompt, "Write a paragraph.");
        assert_eq!(loaded.rounds, 2);
        assert_eq!(loaded.circles.len(), 1);
        assert_eq!(loaded.circles[0].agents.len(), 2);
        assert_eq!(
            loaded.circles[0].agents[0].seed.as_deref(),
            Some("Topic: the last dragon")
        );
    }

    #[test]
    fn test_list_is_sorted_and_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetupStore::new(dir.path());
        store.save("zebra", &sample_setup()).unwrap();
        store.save("apple", &sample_setup()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a setup").unwrap();

        assert_eq!(store.list().unwrap(), vec!["apple", "zebra"]);
    }

    #[test]
    fn test_delete_and_missing_setup() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetupStore::new(dir.path());
        store.save("gone", &sample_setup()).unwrap();
        store.delete("gone").unwrap();

        assert!(matches!(
            store.load("gone"),
            Err(SetupStoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("gone"),
            Err(SetupStoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_on_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetupStore::new(dir.path().join("never-created"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_path_traversal_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetupStore::new(dir.path());
        assert!(matches!(
            store.save("../escape", &sample_setup()),
            Err(SetupStoreError::InvalidName(_))
        ));
        assert!(matches!(
            store.load(""),
            Err(SetupStoreError::InvalidName(_))
        ));
    }

    #[test]
    fn test_setup_restores_run_input() {
        let setup = sample_setup();
        let input = setup.into_input(CredentialMap::new());
        assert_eq!(input.rounds, 2);
        assert_eq!(input.prompt, "Write a paragraph.");
        assert_eq!(
            input.shared_context.as_deref(),
            Some("Everyone likes dragons.")
        );
        assert_eq!(input.circles.len(), 1);
    }
}
