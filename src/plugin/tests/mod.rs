//! Test modules for the plugin system

mod utils;
