//! Plugin System Module
//!
//! Discovers external test plugins, instantiates them once per process, and
//! aggregates their test locations and configuration options for the host
//! test runner.

// Internal modules - all access should go through api module
pub(crate) mod discovery;
pub(crate) mod error;
pub(crate) mod manager;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the plugin system
pub mod api;

#[cfg(test)]
mod tests;
