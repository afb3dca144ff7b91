//! Configuration registration target
//!
//! The mutable object handed to plugins so they can declare their options.

use crate::config::error::ConfigResult;
use crate::config::types::OptionSpec;

/// Anything that accepts option registrations from plugins
pub trait ConfigTarget {
    /// Declare an option group, optionally with a help string
    ///
    /// Registering an existing group keeps its options; a help string
    /// replaces a missing one.
    fn register_group(&mut self, name: &str, help: Option<&str>) -> ConfigResult<()>;

    /// Declare a single option in `group`, creating the group if needed
    fn register_opt(&mut self, group: &str, opt: OptionSpec) -> ConfigResult<()>;

    /// Declare several options in `group`, stopping at the first rejection
    fn register_opts(&mut self, group: &str, opts: &[OptionSpec]) -> ConfigResult<()> {
        for opt in opts {
            self.register_opt(group, opt.clone())?;
        }
        Ok(())
    }
}
