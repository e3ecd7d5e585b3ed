//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierSettings,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Classification backend settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// API credential. Required for the organize command.
    #[serde(default)]
    pub api_key: String,

    /// Optional OpenAI-compatible base URL. When empty, the default
    /// generative backend is used.
    #[serde(default)]
    pub base_url: String,

    /// Optional model name override.
    #[serde(default)]
    pub model: String,
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "~/.marksort".to_string()
}
