//! Plugin Error Handling
//!
//! Error types for plugin operations: instantiation at discovery time,
//! hook execution, and configuration registration failures surfaced by
//! plugin hooks.

use crate::config::error::ConfigError;
use crate::core::error_handling::ContextualError;
use thiserror::Error;

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Error types for plugin system operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PluginError {
    /// Plugin failed to instantiate during discovery
    #[error("Failed to load plugin '{plugin_name}': {cause}")]
    LoadError { plugin_name: String, cause: String },

    /// Plugin hook failed
    #[error("Plugin '{plugin_name}' failed during '{operation}': {cause}")]
    ExecutionError {
        plugin_name: String,
        operation: String,
        cause: String,
    },

    /// Configuration target rejected a registration or lookup
    #[error("Configuration error: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    /// Generic plugin error
    #[error("{message}")]
    Generic { message: String },
}

impl PluginError {
    /// Convenience constructor for hook failures
    pub fn execution(
        plugin_name: impl Into<String>,
        operation: impl Into<String>,
        cause: impl std::fmt::Display,
    ) -> Self {
        PluginError::ExecutionError {
            plugin_name: plugin_name.into(),
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }

    /// Convenience constructor for instantiation failures
    pub fn load(plugin_name: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        PluginError::LoadError {
            plugin_name: plugin_name.into(),
            cause: cause.to_string(),
        }
    }
}

impl ContextualError for PluginError {
    fn is_user_actionable(&self) -> bool {
        match self {
            PluginError::ConfigError { source } => source.is_user_actionable(),
            _ => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            PluginError::ConfigError { source } => source.user_message(),
            _ => None,
        }
    }
}
