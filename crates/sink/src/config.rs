use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_TARGET_FILE_PATH: &str = "CucumberMessageQueue/messages";

/// Configuration for a single protobuf file sink.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileSinkConfig {
    /// File the log is appended to. Parent directories are created on first use.
    pub target_file_path: PathBuf,
}

impl FileSinkConfig {
    pub fn new(target_file_path: impl Into<PathBuf>) -> Self {
        Self {
            target_file_path: target_file_path.into(),
        }
    }
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_FILE_PATH)
    }
}

/// One configured output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    File { path: PathBuf },
}

/// `cucumberMessages` section of the runner configuration.
///
/// ```json
/// { "enabled": true, "sinks": [{ "type": "file", "path": "out/messages" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct CucumberMessagesConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

impl CucumberMessagesConfig {
    /// Parse the section from JSON.
    ///
    /// # Errors
    /// Returns `ConfigError::Json` on malformed input or an unknown sink type.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// File sink configurations, empty when messages are disabled.
    pub fn file_sinks(&self) -> impl Iterator<Item = FileSinkConfig> + '_ {
        self.sinks
            .iter()
            .filter(|_| self.enabled)
            .map(|sink| match sink {
                SinkConfig::File { path } => FileSinkConfig::new(path.clone()),
            })
    }
}
