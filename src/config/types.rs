//! Option declarations
//!
//! The data model plugins use to describe the configuration options they
//! contribute: a typed option specification and a named group of options.

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Value type of a configuration option
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
}

impl OptionKind {
    /// Whether a TOML value is acceptable for this kind.
    ///
    /// Integers are accepted for float options.
    pub fn accepts(&self, value: &toml::Value) -> bool {
        matches!(
            (self, value),
            (OptionKind::String, toml::Value::String(_))
                | (OptionKind::Integer, toml::Value::Integer(_))
                | (OptionKind::Float, toml::Value::Float(_))
                | (OptionKind::Float, toml::Value::Integer(_))
                | (OptionKind::Boolean, toml::Value::Boolean(_))
                | (OptionKind::List, toml::Value::Array(_))
        )
    }
}

/// Declaration of a single configuration option
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSpec {
    pub name: String,
    pub kind: OptionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<toml::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Secret values are masked in generated samples and listings
    pub secret: bool,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            help: None,
            secret: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Boolean)
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::List)
    }

    pub fn with_default(mut self, default: impl Into<toml::Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// A named bucket of related options declared by a plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionGroup {
    pub name: String,
    pub options: Vec<OptionSpec>,
}

impl OptionGroup {
    pub fn new(name: impl Into<String>, options: Vec<OptionSpec>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_option_kind_names_round_trip_through_strings() {
        for kind in OptionKind::iter() {
            let name = kind.to_string();
            assert_eq!(name, name.to_lowercase());
            assert_eq!(OptionKind::from_str(&name).unwrap(), kind);
        }
        assert!(OptionKind::from_str("datetime").is_err());
    }

    #[test]
    fn test_option_kind_accepts_matching_values() {
        assert!(OptionKind::String.accepts(&toml::Value::from("x")));
        assert!(OptionKind::Integer.accepts(&toml::Value::from(3)));
        assert!(OptionKind::Boolean.accepts(&toml::Value::from(true)));
        assert!(OptionKind::List.accepts(&toml::Value::Array(vec![])));
        assert!(!OptionKind::Integer.accepts(&toml::Value::from("3")));
        assert!(!OptionKind::Boolean.accepts(&toml::Value::from(1)));
    }

    #[test]
    fn test_float_option_accepts_integers() {
        assert!(OptionKind::Float.accepts(&toml::Value::from(2.5)));
        assert!(OptionKind::Float.accepts(&toml::Value::from(2)));
        assert!(!OptionKind::Integer.accepts(&toml::Value::from(2.5)));
    }

    #[test]
    fn test_option_spec_builder() {
        let opt = OptionSpec::string("admin_password")
            .with_default("changeme")
            .with_help("Password for the admin user")
            .secret();

        assert_eq!(opt.name, "admin_password");
        assert_eq!(opt.kind, OptionKind::String);
        assert_eq!(opt.default, Some(toml::Value::from("changeme")));
        assert_eq!(opt.help.as_deref(), Some("Password for the admin user"));
        assert!(opt.secret);
    }

    #[test]
    fn test_option_group_serializes_to_json() {
        let group = OptionGroup::new(
            "compute",
            vec![OptionSpec::integer("build_timeout").with_default(300)],
        );
        let json = serde_json::to_value(&group).unwrap();

        assert_eq!(json["name"], "compute");
        assert_eq!(json["options"][0]["name"], "build_timeout");
        assert_eq!(json["options"][0]["kind"], "integer");
        assert_eq!(json["options"][0]["default"], 300);
        assert!(json["options"][0].get("help").is_none());
    }
}
