//! Application Error Handling

use crate::config::error::ConfigError;
use crate::core::error_handling::ContextualError;
use crate::plugin::api::PluginError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{count} configured option value(s) are invalid")]
    InvalidOptions { count: usize },
}

impl AppError {
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            operation: operation.into(),
            source,
        }
    }
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Plugin(e) => e.is_user_actionable(),
            AppError::Config(e) => e.is_user_actionable(),
            AppError::InvalidOptions { .. } => true,
            AppError::Io { .. } | AppError::Serialization(_) => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            AppError::Plugin(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::InvalidOptions { .. } => Some(self.to_string()),
            AppError::Io { .. } | AppError::Serialization(_) => None,
        }
    }
}
