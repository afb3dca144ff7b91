//! Type definitions for the plugin system

use crate::plugin::traits::TestPlugin;
use std::path::PathBuf;

/// Where the host test runner should import a plugin's tests from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLocation {
    /// Directory containing the plugin's tests
    pub test_dir: PathBuf,
    /// Top-level import path the test directory is resolved against
    pub top_level: PathBuf,
}

impl TestLocation {
    pub fn new(test_dir: impl Into<PathBuf>, top_level: impl Into<PathBuf>) -> Self {
        Self {
            test_dir: test_dir.into(),
            top_level: top_level.into(),
        }
    }
}

/// A discovered, instantiated plugin and the name it was registered under
pub struct PluginRecord {
    pub name: String,
    pub instance: Box<dyn TestPlugin>,
}

impl std::fmt::Debug for PluginRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRecord")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
