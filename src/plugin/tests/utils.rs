//! Plugin Test Utilities
//!
//! Configurable mock plugins shared by the plugin test modules.

use crate::config::traits::ConfigTarget;
use crate::config::types::{OptionGroup, OptionSpec};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::TestPlugin;
use crate::plugin::types::TestLocation;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Per-hook call counters, shared between a mock and the test that owns it
#[derive(Debug, Default)]
pub struct CallCounts {
    pub load_tests: AtomicUsize,
    pub register_opts: AtomicUsize,
    pub get_opt_lists: AtomicUsize,
}

impl CallCounts {
    pub fn load_tests(&self) -> usize {
        self.load_tests.load(Ordering::SeqCst)
    }

    pub fn register_opts(&self) -> usize {
        self.register_opts.load(Ordering::SeqCst)
    }

    pub fn get_opt_lists(&self) -> usize {
        self.get_opt_lists.load(Ordering::SeqCst)
    }
}

/// Configurable mock plugin
#[derive(Debug, Clone)]
pub struct MockPlugin {
    pub name: String,
    pub groups: Vec<OptionGroup>,
    pub calls: Arc<CallCounts>,
    pub fail_load_tests: bool,
    pub fail_register_opts: bool,
    pub fail_get_opt_lists: bool,
}

impl MockPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            groups: Vec::new(),
            calls: Arc::new(CallCounts::default()),
            fail_load_tests: false,
            fail_register_opts: false,
            fail_get_opt_lists: false,
        }
    }

    pub fn with_groups(mut self, groups: Vec<OptionGroup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_failure_modes(
        mut self,
        fail_load_tests: bool,
        fail_register_opts: bool,
        fail_get_opt_lists: bool,
    ) -> Self {
        self.fail_load_tests = fail_load_tests;
        self.fail_register_opts = fail_register_opts;
        self.fail_get_opt_lists = fail_get_opt_lists;
        self
    }

    /// Location this mock reports from `load_tests`
    pub fn location(name: &str) -> TestLocation {
        TestLocation::new(format!("{name}_tests/tests"), format!("{name}_tests"))
    }

    fn failure(&self, operation: &str) -> PluginError {
        PluginError::execution(&self.name, operation, "mock failure")
    }
}

impl TestPlugin for MockPlugin {
    fn load_tests(&self) -> PluginResult<TestLocation> {
        self.calls.load_tests.fetch_add(1, Ordering::SeqCst);
        if self.fail_load_tests {
            return Err(self.failure("load_tests"));
        }
        Ok(Self::location(&self.name))
    }

    fn register_opts(&self, conf: &mut dyn ConfigTarget) -> PluginResult<()> {
        self.calls.register_opts.fetch_add(1, Ordering::SeqCst);
        if self.fail_register_opts {
            return Err(self.failure("register_opts"));
        }
        for group in &self.groups {
            conf.register_opts(&group.name, &group.options)?;
        }
        Ok(())
    }

    fn get_opt_lists(&self) -> PluginResult<Vec<OptionGroup>> {
        self.calls.get_opt_lists.fetch_add(1, Ordering::SeqCst);
        if self.fail_get_opt_lists {
            return Err(self.failure("get_opt_lists"));
        }
        Ok(self.groups.clone())
    }
}

/// A group of string options
pub fn group(name: &str, options: &[&str]) -> OptionGroup {
    OptionGroup::new(
        name,
        options.iter().map(|opt| OptionSpec::string(*opt)).collect(),
    )
}
