//! Public API for the plugin system
//!
//! External modules should import from here rather than directly from
//! internal modules. The process-wide plugin manager is created on first
//! access and shared by every caller afterwards.

use once_cell::sync::OnceCell;

pub use crate::plugin::discovery::{
    DiscoveryConfig, ExtensionDiscovery, ExtensionEntry, InventoryDiscovery, PluginFactory,
    PluginRegistration, StaticDiscovery, TEST_PLUGINS_NAMESPACE,
};
pub use crate::plugin::error::{PluginError, PluginResult};
pub use crate::plugin::manager::TestPluginManager;
pub use crate::plugin::traits::TestPlugin;
pub use crate::plugin::types::{PluginRecord, TestLocation};

/// Global plugin manager instance
static PLUGIN_MANAGER: OnceCell<TestPluginManager> = OnceCell::new();

/// Access the process-wide plugin manager
///
/// The first call discovers and instantiates every plugin registered with
/// [`test_plugin!`](crate::test_plugin) under [`TEST_PLUGINS_NAMESPACE`].
/// Later calls return the same instance without discovering again. If
/// construction fails the error is returned and the next call retries.
pub fn get_plugin_manager() -> PluginResult<&'static TestPluginManager> {
    init_plugin_manager(DiscoveryConfig::default())
}

/// Access the process-wide plugin manager, constructing it with `config` if
/// this is the first access
///
/// Concurrent first accesses block until one construction finishes. Once
/// the manager exists `config` is ignored.
pub fn init_plugin_manager(config: DiscoveryConfig) -> PluginResult<&'static TestPluginManager> {
    if let Some(manager) = PLUGIN_MANAGER.get() {
        log::debug!("Plugin manager already initialized; ignoring discovery config");
        return Ok(manager);
    }

    PLUGIN_MANAGER.get_or_try_init(|| {
        log::trace!("Initializing plugin manager for '{}'", config.namespace);
        TestPluginManager::with_discovery(&InventoryDiscovery::new(), &config)
    })
}
