//! Command implementations
//!
//! Each command works against an already constructed plugin manager and
//! writes its report to the given output.

use crate::app::cli::args::Command;
use crate::app::cli::config::AppConfig;
use crate::app::error::{AppError, AppResult};
use crate::config::opts::ConfigOpts;
use crate::config::sample::{generate_sample, merge_groups};
use crate::config::types::OptionGroup;
use crate::plugin::api::TestPluginManager;
use prettytable::{format, row, Table};
use std::io::Write;

/// Dispatch a parsed command
pub fn run_command(
    command: &Command,
    manager: &TestPluginManager,
    app_config: &AppConfig,
    out: &mut dyn Write,
) -> AppResult<()> {
    match command {
        Command::List => list_plugins(manager, out),
        Command::Options { json } => list_options(manager, *json, out),
        Command::SampleConfig { output } => match output {
            Some(path) => {
                let mut file = std::fs::File::create(path)
                    .map_err(|e| AppError::io(format!("create {}", path.display()), e))?;
                sample_config(manager, &mut file)?;
                log::info!("Wrote sample configuration to {}", path.display());
                Ok(())
            }
            None => sample_config(manager, out),
        },
        Command::CheckConfig => check_config(manager, app_config, out),
    }
}

/// Table of plugins and their test locations
pub fn list_plugins(manager: &TestPluginManager, out: &mut dyn Write) -> AppResult<()> {
    let load_tests = manager.get_plugin_load_tests_tuple()?;
    if load_tests.is_empty() {
        writeln!(out, "No test plugins found").map_err(|e| AppError::io("write output", e))?;
        return Ok(());
    }

    let mut names: Vec<&String> = load_tests.keys().collect();
    names.sort();

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["Plugin", "Test directory", "Top level"]);
    for name in names {
        let location = &load_tests[name];
        table.add_row(row![
            name,
            location.test_dir.display(),
            location.top_level.display()
        ]);
    }
    table
        .print(out)
        .map_err(|e| AppError::io("write output", e))?;
    Ok(())
}

/// Option groups declared by every plugin
pub fn list_options(manager: &TestPluginManager, json: bool, out: &mut dyn Write) -> AppResult<()> {
    let groups = manager.get_plugin_options_list()?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &groups)?;
        writeln!(out).map_err(|e| AppError::io("write output", e))?;
        return Ok(());
    }

    write_option_groups(&merge_groups(&groups), out).map_err(|e| AppError::io("write output", e))
}

fn write_option_groups(groups: &[OptionGroup], out: &mut dyn Write) -> std::io::Result<()> {
    for group in groups {
        writeln!(out, "[{}]", group.name)?;
        for opt in &group.options {
            let default = match (&opt.default, opt.secret) {
                (Some(_), true) => " = <secret>".to_string(),
                (Some(value), false) => format!(" = {}", value),
                (None, _) => String::new(),
            };
            write!(out, "  {} ({}){}", opt.name, opt.kind, default)?;
            match &opt.help {
                Some(help) => writeln!(out, "  # {}", help.lines().next().unwrap_or(""))?,
                None => writeln!(out)?,
            }
        }
    }
    Ok(())
}

/// Commented sample settings covering every plugin option
pub fn sample_config(manager: &TestPluginManager, out: &mut dyn Write) -> AppResult<()> {
    let groups = manager.get_plugin_options_list()?;
    out.write_all(generate_sample(&groups).as_bytes())
        .map_err(|e| AppError::io("write sample configuration", e))?;
    Ok(())
}

/// Register every plugin's options, then resolve each configured value
pub fn check_config(
    manager: &TestPluginManager,
    app_config: &AppConfig,
    out: &mut dyn Write,
) -> AppResult<()> {
    let mut conf = ConfigOpts::new();
    conf.load_table(&app_config.options);
    manager.register_plugin_opts(&mut conf);

    let write_err = |e| AppError::io("write output", e);

    for (group, name) in conf.unknown_options() {
        log::warn!("Unknown option '{}.{}' in settings", group, name);
        writeln!(out, "unknown: {}.{}", group, name).map_err(write_err)?;
    }

    let errors = conf.check_values();
    for error in &errors {
        writeln!(out, "invalid: {}", error).map_err(write_err)?;
    }

    if !errors.is_empty() {
        return Err(AppError::InvalidOptions {
            count: errors.len(),
        });
    }

    let registered: usize = conf
        .registered_groups()
        .iter()
        .map(|g| g.options.len())
        .sum();
    writeln!(out, "ok: {} options checked", registered).map_err(write_err)?;
    Ok(())
}
