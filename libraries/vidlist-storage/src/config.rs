/// Storage configuration
use crate::backends::validate_key;
use crate::codec::DEFAULT_KEY;
use crate::error::{Result, StorageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "vidlist.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_key")]
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Process memory, nothing persists
    Memory,
    /// One JSON file per key under `data_dir`
    File,
}

impl StorageConfig {
    /// Load configuration from `vidlist.toml` and environment
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from the given file (if it exists) and environment
    ///
    /// Environment variables prefixed with `VIDLIST_` override file values,
    /// e.g. `VIDLIST_DATA_DIR=/var/lib/vidlist`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let path = path.as_ref();
        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(config::Environment::with_prefix("VIDLIST").try_parsing(true));

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_key(&self.key)?;

        if self.backend == BackendKind::File && self.data_dir.as_os_str().is_empty() {
            return Err(StorageError::Config(
                "data_dir is required for the file backend (set VIDLIST_DATA_DIR)".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_backend() -> BackendKind {
    BackendKind::File
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}
