//! Plugin Discovery System
//!
//! Resolves the plugins registered under an extension point. Discovery is an
//! injected dependency of the manager:
//!
//! ## Compile-time registration
//! Plugin crates register themselves with the [`test_plugin!`](crate::test_plugin)
//! macro, which submits a [`PluginRegistration`] to an `inventory` table.
//! [`InventoryDiscovery`] reads that table. Iteration order follows link order
//! and is not guaranteed stable between builds.
//!
//! ## Static registration
//! [`StaticDiscovery`] holds an explicit, order-preserving list of factories,
//! for hosts that assemble their plugin set at runtime and for tests.

use crate::plugin::error::PluginResult;
use crate::plugin::traits::TestPlugin;
use serde::Deserialize;
use std::sync::Arc;

/// Extension point test plugins are registered under
pub const TEST_PLUGINS_NAMESPACE: &str = "testplugins.test_plugins";

/// Instantiates a plugin; invoked once per discovery
pub type PluginFactory = Arc<dyn Fn() -> PluginResult<Box<dyn TestPlugin>> + Send + Sync>;

/// A named, not yet instantiated plugin returned by discovery
#[derive(Clone)]
pub struct ExtensionEntry {
    pub name: String,
    pub factory: PluginFactory,
}

impl std::fmt::Debug for ExtensionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Discovery service resolving plugin implementations for an extension point
pub trait ExtensionDiscovery {
    /// All entries registered under `namespace`, in discovery order
    fn extensions(&self, namespace: &str) -> Vec<ExtensionEntry>;
}

/// Configuration for plugin discovery
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Extension point to query
    pub namespace: String,
    /// Plugin names dropped before instantiation
    #[serde(rename = "exclude")]
    pub excluded_plugins: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            namespace: TEST_PLUGINS_NAMESPACE.to_string(),
            excluded_plugins: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Default namespace with the given exclusions
    pub fn with_excludes(excludes: Vec<&str>) -> Self {
        Self {
            excluded_plugins: excludes.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// Query `discovery` and apply the configured exclusions
pub fn discover_plugins(
    discovery: &dyn ExtensionDiscovery,
    config: &DiscoveryConfig,
) -> Vec<ExtensionEntry> {
    let mut entries = discovery.extensions(&config.namespace);
    log::debug!(
        "Found {} plugin entries under '{}'",
        entries.len(),
        config.namespace
    );

    if !config.excluded_plugins.is_empty() {
        let before_exclusions = entries.len();
        entries.retain(|entry| !config.excluded_plugins.contains(&entry.name));
        log::debug!(
            "After exclusions {:?}: {} plugins (was {})",
            config.excluded_plugins,
            entries.len(),
            before_exclusions
        );
    }

    entries
}

/// Registration record submitted by [`test_plugin!`](crate::test_plugin)
pub struct PluginRegistration {
    pub namespace: &'static str,
    pub name: &'static str,
    pub factory: fn() -> PluginResult<Box<dyn TestPlugin>>,
}

inventory::collect!(PluginRegistration);

/// Register a test plugin for compile-time discovery
///
/// The plugin type must provide `fn new() -> PluginResult<Self>`; an `Err`
/// from `new` is reported as a load failure when the manager is constructed.
///
/// ```ignore
/// testplugins::test_plugin!(ComputePlugin, "compute");
/// testplugins::test_plugin!(ComputePlugin, "compute", "my.other_namespace");
/// ```
#[macro_export]
macro_rules! test_plugin {
    ($plugin_type:ty, $name:expr) => {
        $crate::test_plugin!(
            $plugin_type,
            $name,
            $crate::plugin::api::TEST_PLUGINS_NAMESPACE
        );
    };
    ($plugin_type:ty, $name:expr, $namespace:expr) => {
        $crate::inventory::submit! {
            $crate::plugin::api::PluginRegistration {
                namespace: $namespace,
                name: $name,
                factory: || {
                    <$plugin_type>::new().map(|plugin| {
                        Box::new(plugin) as Box<dyn $crate::plugin::api::TestPlugin>
                    })
                },
            }
        }
    };
}

/// Discovery backed by the `inventory` registration table
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryDiscovery;

impl InventoryDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl ExtensionDiscovery for InventoryDiscovery {
    fn extensions(&self, namespace: &str) -> Vec<ExtensionEntry> {
        inventory::iter::<PluginRegistration>()
            .filter(|registration| registration.namespace == namespace)
            .map(|registration| {
                let factory = registration.factory;
                ExtensionEntry {
                    name: registration.name.to_string(),
                    factory: Arc::new(factory),
                }
            })
            .collect()
    }
}

/// Order-preserving in-memory discovery
#[derive(Default, Clone)]
pub struct StaticDiscovery {
    entries: Vec<(String, ExtensionEntry)>,
}

impl StaticDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under the default test plugin namespace
    pub fn with_plugin<F>(self, name: &str, factory: F) -> Self
    where
        F: Fn() -> PluginResult<Box<dyn TestPlugin>> + Send + Sync + 'static,
    {
        self.with_namespaced_plugin(TEST_PLUGINS_NAMESPACE, name, factory)
    }

    /// Register a factory under an explicit namespace
    pub fn with_namespaced_plugin<F>(mut self, namespace: &str, name: &str, factory: F) -> Self
    where
        F: Fn() -> PluginResult<Box<dyn TestPlugin>> + Send + Sync + 'static,
    {
        self.entries.push((
            namespace.to_string(),
            ExtensionEntry {
                name: name.to_string(),
                factory: Arc::new(factory),
            },
        ));
        self
    }
}

impl ExtensionDiscovery for StaticDiscovery {
    fn extensions(&self, namespace: &str) -> Vec<ExtensionEntry> {
        self.entries
            .iter()
            .filter(|(entry_namespace, _)| entry_namespace == namespace)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}
