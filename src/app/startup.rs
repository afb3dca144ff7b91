//! Application startup
//!
//! Parses arguments, loads settings, starts logging, constructs the
//! process-wide plugin manager and runs the requested command.

use crate::app::cli::args::Args;
use crate::app::cli::config::AppConfig;
use crate::app::commands::run_command;
use crate::app::error::AppResult;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::plugin::api::init_plugin_manager;
use clap::Parser;
use std::io::IsTerminal;

/// Run the application and return the process exit code
pub fn startup() -> i32 {
    let args = Args::parse();
    match run(args) {
        Ok(()) => 0,
        Err(e) => {
            log_error_with_context(&e, "testplugins could not complete the command");
            1
        }
    }
}

/// Run the application with already parsed arguments
pub fn run(args: Args) -> AppResult<()> {
    // Settings are read before logging starts because they configure it;
    // a load failure is reported once the logger is up
    let loaded = AppConfig::load(args.config_file.as_deref());

    let mut logging = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    logging.apply_args(&args);

    let use_color = logging.color.unwrap_or(true) && std::io::stderr().is_terminal();
    if let Err(e) = init_logging(
        logging.level.as_deref(),
        logging.format.as_deref(),
        logging.file.as_deref(),
        use_color,
    ) {
        eprintln!("Warning: could not initialise logging: {}", e);
    }

    let mut app_config = loaded?;
    app_config.apply_args(&args);
    log::debug!("Settings: {:?}", app_config);

    let manager = init_plugin_manager(app_config.discovery.clone())?;
    log::debug!("Loaded plugins: {:?}", manager.plugin_names());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(&args.command, manager, &app_config, &mut out)
}
