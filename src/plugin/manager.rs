//! Plugin Manager
//!
//! Owns the discovered test plugins and aggregates their hooks.
//!
//! Error policy differs per operation:
//! - Construction, test-location and option-list aggregation fail fast: the
//!   first plugin error is returned and later plugins are not called.
//! - Option registration is isolated per plugin: failures are logged and the
//!   remaining plugins still register their options.

use crate::config::traits::ConfigTarget;
use crate::config::types::OptionGroup;
use crate::plugin::discovery::{discover_plugins, DiscoveryConfig, ExtensionDiscovery};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::types::{PluginRecord, TestLocation};
use log::debug;
use std::collections::HashMap;

/// Manager for the lifecycle of external test plugins
#[derive(Debug)]
pub struct TestPluginManager {
    /// Loaded plugins in discovery order
    plugins: Vec<PluginRecord>,
}

impl TestPluginManager {
    /// Discover and instantiate every plugin registered under the configured
    /// extension point
    ///
    /// A plugin that fails to instantiate aborts construction with its error.
    pub fn with_discovery(
        discovery: &dyn ExtensionDiscovery,
        config: &DiscoveryConfig,
    ) -> PluginResult<Self> {
        let entries = discover_plugins(discovery, config);
        let mut plugins = Vec::with_capacity(entries.len());

        for entry in entries {
            match (entry.factory)() {
                Ok(instance) => {
                    debug!("Plugin '{}' loaded", entry.name);
                    plugins.push(PluginRecord {
                        name: entry.name,
                        instance,
                    });
                }
                Err(err) => return Err(Self::failure_hook(&entry.name, err)),
            }
        }

        log::info!("Loaded {} test plugins", plugins.len());
        Ok(Self { plugins })
    }

    /// Build a manager from already instantiated plugins
    pub fn from_records(plugins: Vec<PluginRecord>) -> Self {
        Self { plugins }
    }

    /// Called when a plugin fails to instantiate; logs and hands the error back
    /// for propagation
    fn failure_hook(plugin_name: &str, err: PluginError) -> PluginError {
        log::error!("Could not load '{}': {}", plugin_name, err);
        err
    }

    /// Test location of every plugin keyed by plugin name
    ///
    /// Stops at the first failing plugin and returns its error unchanged. A
    /// name registered twice keeps the last plugin's location.
    pub fn get_plugin_load_tests_tuple(&self) -> PluginResult<HashMap<String, TestLocation>> {
        let mut load_tests = HashMap::with_capacity(self.plugins.len());
        for plugin in &self.plugins {
            let location = plugin.instance.load_tests()?;
            debug!(
                "Plugin '{}' tests at {} (top level {})",
                plugin.name,
                location.test_dir.display(),
                location.top_level.display()
            );
            load_tests.insert(plugin.name.clone(), location);
        }
        Ok(load_tests)
    }

    /// Let every plugin register its options on `conf`
    ///
    /// A failing plugin is logged and skipped; it never prevents the others
    /// from registering.
    pub fn register_plugin_opts(&self, conf: &mut dyn ConfigTarget) {
        for plugin in &self.plugins {
            if let Err(err) = plugin.instance.register_opts(conf) {
                log::error!(
                    "Plugin {} raised an error trying to run register_opts: {}",
                    plugin.name,
                    err
                );
                debug!("register_opts failure detail for {}: {:?}", plugin.name, err);
            }
        }
    }

    /// Flat list of every option group declared by every plugin
    ///
    /// Plugin order and per-plugin group order are preserved. Stops at the
    /// first failing plugin and returns its error unchanged.
    pub fn get_plugin_options_list(&self) -> PluginResult<Vec<OptionGroup>> {
        let mut plugin_options = Vec::new();
        for plugin in &self.plugins {
            let opt_list = plugin.instance.get_opt_lists()?;
            if !opt_list.is_empty() {
                plugin_options.extend(opt_list);
            }
        }
        Ok(plugin_options)
    }

    /// Names of the loaded plugins in discovery order
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
