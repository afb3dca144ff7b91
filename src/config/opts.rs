//! Concrete configuration target
//!
//! `ConfigOpts` collects option declarations from plugins and resolves their
//! values from a loaded TOML table, runtime overrides, or declared defaults.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::traits::ConfigTarget;
use crate::config::types::{OptionGroup, OptionSpec};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

/// Group that receives top-level scalar values in a loaded table
pub const DEFAULT_GROUP: &str = "DEFAULT";

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("option name pattern is valid")
});

#[derive(Debug, Clone, Default)]
struct GroupEntry {
    name: String,
    help: Option<String>,
    options: Vec<OptionSpec>,
}

/// Registered options plus the values loaded for them
#[derive(Debug, Clone, Default)]
pub struct ConfigOpts {
    /// Groups in registration order
    groups: Vec<GroupEntry>,

    /// Loaded values keyed by group, then option name
    values: BTreeMap<String, toml::Table>,

    /// Runtime overrides, taking precedence over loaded values
    overrides: HashMap<(String, String), toml::Value>,
}

impl ConfigOpts {
    /// Create an empty configuration with no registered options
    pub fn new() -> Self {
        Self::default()
    }

    /// Load option values from a parsed TOML table
    ///
    /// Tables become groups. Top-level scalars land in [`DEFAULT_GROUP`].
    /// Later loads overwrite earlier values key by key.
    pub fn load_table(&mut self, table: &toml::Table) {
        for (key, value) in table {
            match value {
                toml::Value::Table(group_values) => {
                    let entry = self.values.entry(key.clone()).or_default();
                    for (name, value) in group_values {
                        entry.insert(name.clone(), value.clone());
                    }
                }
                scalar => {
                    self.values
                        .entry(DEFAULT_GROUP.to_string())
                        .or_default()
                        .insert(key.clone(), scalar.clone());
                }
            }
        }
    }

    /// Read and load option values from a TOML file
    pub fn load_file(&mut self, path: &Path) -> ConfigResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let table = toml::from_str::<toml::Table>(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded {} option groups from {}", table.len(), path.display());
        self.load_table(&table);
        Ok(())
    }

    /// Set a value that wins over anything loaded from files
    pub fn set_override(
        &mut self,
        group: &str,
        name: &str,
        value: impl Into<toml::Value>,
    ) -> ConfigResult<()> {
        let value = value.into();
        let opt = self.find_opt(group, name)?;
        check_kind(group, opt, &value)?;
        self.overrides
            .insert((group.to_string(), name.to_string()), value);
        Ok(())
    }

    /// Resolve the effective value of a registered option
    ///
    /// Precedence is override, then loaded value, then declared default.
    /// `Ok(None)` means the option has no value at all.
    pub fn get(&self, group: &str, name: &str) -> ConfigResult<Option<toml::Value>> {
        let opt = self.find_opt(group, name)?;

        if let Some(value) = self.overrides.get(&(group.to_string(), name.to_string())) {
            return Ok(Some(value.clone()));
        }

        if let Some(value) = self.values.get(group).and_then(|g| g.get(name)) {
            check_kind(group, opt, value)?;
            return Ok(Some(value.clone()));
        }

        Ok(opt.default.clone())
    }

    /// Whether an option has been registered
    pub fn has_opt(&self, group: &str, name: &str) -> bool {
        self.find_opt(group, name).is_ok()
    }

    /// Help text declared for a group
    pub fn group_help(&self, group: &str) -> Option<&str> {
        self.find_group(group).and_then(|g| g.help.as_deref())
    }

    /// Every registered group with its options, in registration order
    pub fn registered_groups(&self) -> Vec<OptionGroup> {
        self.groups
            .iter()
            .map(|g| OptionGroup::new(g.name.clone(), g.options.clone()))
            .collect()
    }

    /// Loaded `(group, name)` pairs that no registered option claims
    pub fn unknown_options(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .flat_map(|(group, values)| {
                values
                    .keys()
                    .filter(move |name| !self.has_opt(group, name))
                    .map(move |name| (group.clone(), name.clone()))
            })
            .collect()
    }

    /// Resolve every registered option and collect the failures
    pub fn check_values(&self) -> Vec<ConfigError> {
        self.groups
            .iter()
            .flat_map(|g| g.options.iter().map(move |opt| (&g.name, &opt.name)))
            .filter_map(|(group, name)| self.get(group, name).err())
            .collect()
    }

    fn find_group(&self, group: &str) -> Option<&GroupEntry> {
        self.groups.iter().find(|g| g.name == group)
    }

    fn find_opt(&self, group: &str, name: &str) -> ConfigResult<&OptionSpec> {
        self.find_group(group)
            .and_then(|g| g.options.iter().find(|o| o.name == name))
            .ok_or_else(|| ConfigError::NoSuchOption {
                group: group.to_string(),
                name: name.to_string(),
            })
    }

    fn group_entry_mut(&mut self, group: &str) -> &mut GroupEntry {
        if let Some(index) = self.groups.iter().position(|g| g.name == group) {
            return &mut self.groups[index];
        }
        self.groups.push(GroupEntry {
            name: group.to_string(),
            ..GroupEntry::default()
        });
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }
}

impl ConfigTarget for ConfigOpts {
    fn register_group(&mut self, name: &str, help: Option<&str>) -> ConfigResult<()> {
        validate_name("group", name)?;
        let entry = self.group_entry_mut(name);
        if entry.help.is_none() {
            entry.help = help.map(str::to_string);
        }
        Ok(())
    }

    fn register_opt(&mut self, group: &str, opt: OptionSpec) -> ConfigResult<()> {
        validate_name("group", group)?;
        validate_name("option", &opt.name)?;
        if let Some(default) = &opt.default {
            check_kind(group, &opt, default)?;
        }

        let entry = self.group_entry_mut(group);
        match entry.options.iter().find(|o| o.name == opt.name) {
            Some(existing) if *existing == opt => {
                log::trace!("Option '{}.{}' already registered", group, opt.name);
                Ok(())
            }
            Some(_) => Err(ConfigError::DuplicateOption {
                group: group.to_string(),
                name: opt.name,
            }),
            None => {
                log::trace!("Registered option '{}.{}' ({})", group, opt.name, opt.kind);
                entry.options.push(opt);
                Ok(())
            }
        }
    }
}

fn validate_name(what: &'static str, name: &str) -> ConfigResult<()> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidName {
            what,
            name: name.to_string(),
        })
    }
}

fn check_kind(group: &str, opt: &OptionSpec, value: &toml::Value) -> ConfigResult<()> {
    if opt.kind.accepts(value) {
        Ok(())
    } else {
        Err(ConfigError::TypeMismatch {
            group: group.to_string(),
            name: opt.name.clone(),
            expected: opt.kind,
            found: value.type_str().to_string(),
        })
    }
}
