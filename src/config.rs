use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Backend configuration, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Directory tree served by the backend. Mandatory and must exist.
    pub root_directory: PathBuf,
    /// Whether leading-dot entries appear in listings.
    #[serde(default)]
    pub show_hidden_files: bool,
}

impl BackendConfig {
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        BackendConfig {
            root_directory: root_directory.into(),
            show_hidden_files: false,
        }
    }

    pub fn load(config_file: &Path) -> Result<Self, AppError> {
        if !config_file.exists() {
            return Err(AppError::Config(format!(
                "config file not found under path: {}",
                config_file.display()
            )));
        }
        if config_file.is_dir() {
            return Err(AppError::Config(format!(
                "config path is not a file but a directory: {}",
                config_file.display()
            )));
        }

        let contents = std::fs::read_to_string(config_file)?;
        let config: BackendConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.root_directory.as_os_str().is_empty() {
            return Err(AppError::Config(
                "root directory value is not found in configuration".to_string(),
            ));
        }
        if !self.root_directory.is_dir() {
            return Err(AppError::Config(format!(
                "root directory does not exist: {}",
                self.root_directory.display()
            )));
        }
        Ok(())
    }
}
