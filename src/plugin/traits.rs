//! Plugin Trait System
//!
//! The contract every external test plugin implements. A plugin contributes
//! two things to the host test runner:
//!
//! - **Test locations**: where the runner should import the plugin's tests from
//! - **Configuration options**: option groups registered on the shared
//!   configuration target and listed for sample-config generation
//!
//! All three hooks are required; there are no default implementations.

use crate::config::traits::ConfigTarget;
use crate::config::types::OptionGroup;
use crate::plugin::error::PluginResult;
use crate::plugin::types::TestLocation;

/// Base trait all test plugins must implement
pub trait TestPlugin: Send + Sync {
    /// Location information needed to load this plugin's tests
    fn load_tests(&self) -> PluginResult<TestLocation>;

    /// Register plugin-specific options on the shared configuration target
    ///
    /// Registration is not required to be atomic: options registered before
    /// a failure stay registered.
    fn register_opts(&self, conf: &mut dyn ConfigTarget) -> PluginResult<()>;

    /// Every option group this plugin defines, for sample-config generation
    ///
    /// May be empty.
    fn get_opt_lists(&self) -> PluginResult<Vec<OptionGroup>>;
}
