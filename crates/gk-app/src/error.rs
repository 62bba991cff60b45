//! Error types for the gk-app service layer.

use std::path::PathBuf;

/// Application error type shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Simulation error: {0}")]
    Simulation(#[from] gk_sim::SimError),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gk-app operations.
pub type AppResult<T> = Result<T, AppError>;
