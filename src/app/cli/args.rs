//! Command-line arguments
//!
//! Global flags override the matching values of the settings file.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "testplugins")]
#[command(about = "Discover test plugins and manage the options they declare")]
#[command(version)]
#[command(after_help = " * can be specified multiple times or as a comma-separated list")]
pub struct Args {
    /// Settings file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Plugins to exclude from discovery*
    #[arg(
        long = "exclude-plugin",
        value_name = "NAMES",
        value_delimiter = ',',
        action = ArgAction::Append,
        global = true
    )]
    pub plugin_exclusions: Vec<String>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
          value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", global = true,
          value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List loaded plugins and where their tests live
    List,

    /// Show the option groups declared by plugins
    Options {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate a commented sample settings file from plugin options
    SampleConfig {
        /// Write to FILE instead of stdout
        #[arg(short = 'w', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Check configured option values against plugin declarations
    CheckConfig,
}
