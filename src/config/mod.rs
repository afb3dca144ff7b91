//! Configuration Options Module
//!
//! Option declarations contributed by plugins, the registration target they
//! are registered against, value resolution, and sample generation.

pub mod error;
pub mod opts;
pub mod sample;
pub mod traits;
pub mod types;

pub use error::{ConfigError, ConfigResult};
pub use opts::{ConfigOpts, DEFAULT_GROUP};
pub use sample::generate_sample;
pub use traits::ConfigTarget;
pub use types::{OptionGroup, OptionKind, OptionSpec};
