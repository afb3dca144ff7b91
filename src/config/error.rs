//! Configuration Error Handling
//!
//! Error types raised while registering options or resolving option values.

use crate::config::types::OptionKind;
use crate::core::error_handling::ContextualError;
use thiserror::Error;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised by a configuration target
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A different option is already registered under the same name
    #[error("Option '{name}' in group '{group}' is already registered with a different definition")]
    DuplicateOption { group: String, name: String },

    /// Group or option name is not a valid identifier
    #[error("Invalid {what} name '{name}'")]
    InvalidName { what: &'static str, name: String },

    /// Lookup of an option that was never registered
    #[error("No such option '{name}' in group '{group}'")]
    NoSuchOption { group: String, name: String },

    /// Value does not match the declared option kind
    #[error("Option '{group}.{name}' expects type {expected}, found {found}")]
    TypeMismatch {
        group: String,
        name: String,
        expected: OptionKind,
        found: String,
    },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    /// Configuration file is not valid TOML
    #[error("Failed to parse configuration file {path}: {message}")]
    Parse { path: String, message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        // Everything but IO failures points at something the user can fix in their file
        !matches!(self, ConfigError::Io { .. })
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}
