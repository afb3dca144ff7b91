//! TOML settings file loading
//!
//! The settings file carries the host's own `[logging]` and `[discovery]`
//! tables. Every other table holds option values for plugin option groups.

use super::args::Args;
use crate::config::error::{ConfigError, ConfigResult};
use crate::plugin::api::DiscoveryConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// `[logging]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
    pub color: Option<bool>,
}

impl LoggingConfig {
    /// Apply command-line logging overrides
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(level) = &args.log_level {
            self.level = Some(level.clone());
        }
        if let Some(format) = &args.log_format {
            self.format = Some(format.clone());
        }
        if let Some(file) = &args.log_file {
            self.file = Some(file.clone());
        }
        if args.no_color {
            self.color = Some(false);
        }
    }
}

/// Parsed settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub discovery: DiscoveryConfig,

    /// Plugin option values, keyed by group
    #[serde(flatten)]
    pub options: toml::Table,
}

impl AppConfig {
    /// Platform-specific default settings location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("testplugins").join("testplugins.toml"))
    }

    /// Load the settings file
    ///
    /// An explicitly given file must exist. Without one, the default location
    /// is used when present and built-in defaults otherwise.
    pub fn load(config_file: Option<&Path>) -> ConfigResult<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply command-line overrides
    pub fn apply_args(&mut self, args: &Args) {
        self.logging.apply_args(args);
        for name in &args.plugin_exclusions {
            if !self.discovery.excluded_plugins.contains(name) {
                self.discovery.excluded_plugins.push(name.clone());
            }
        }
    }
}
