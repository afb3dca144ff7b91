//! Generic error handling utilities
//!
//! Provides unified top-level error reporting for both plugin and
//! configuration failures while keeping the detail level appropriate to the
//! kind of failure.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if the user can fix this error themselves (bad option
    /// value, malformed config file, invalid option name)
    fn is_user_actionable(&self) -> bool;

    /// The message to show the user for actionable errors
    fn user_message(&self) -> Option<String>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors are reported with their own message. System errors
/// (plugin load failures, IO) report the operation context at error level and
/// leave the underlying detail to the debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => {
            log::error!("FATAL: {}: {}", operation_context, user_msg);
        }
        _ => {
            log::error!("FATAL: {}", operation_context);
        }
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ConfigError;
    use crate::config::types::OptionKind;
    use crate::plugin::error::PluginError;

    #[test]
    fn test_config_errors_are_user_actionable() {
        let error = ConfigError::TypeMismatch {
            group: "compute".to_string(),
            name: "timeout".to_string(),
            expected: OptionKind::Integer,
            found: "string".to_string(),
        };

        assert!(error.is_user_actionable());
        let message = error.user_message().unwrap();
        assert!(message.contains("compute.timeout"));
        assert!(message.contains("integer"));
    }

    #[test]
    fn test_config_io_error_is_system_error() {
        let error = ConfigError::Io {
            path: "/nonexistent/testplugins.toml".to_string(),
            message: "No such file or directory".to_string(),
        };

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
    }

    #[test]
    fn test_plugin_load_error_is_system_error() {
        let error = PluginError::LoadError {
            plugin_name: "broken".to_string(),
            cause: "missing dependency".to_string(),
        };

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
    }

    #[test]
    fn test_plugin_error_wrapping_config_error_delegates() {
        let error: PluginError = ConfigError::InvalidName {
            what: "option",
            name: "1bad".to_string(),
        }
        .into();

        assert!(error.is_user_actionable());
        assert!(error.user_message().unwrap().contains("1bad"));
    }

    #[test]
    fn test_log_error_with_context_does_not_panic() {
        let error = PluginError::Generic {
            message: "boom".to_string(),
        };
        log_error_with_context(&error, "Loading test plugins");
    }
}
