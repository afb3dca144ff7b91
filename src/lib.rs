pub mod app;
pub mod config;
pub mod core;
pub mod plugin;

// Used by the `test_plugin!` macro expansion in plugin crates
#[doc(hidden)]
pub use inventory;
