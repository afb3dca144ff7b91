//! Logging backend
//!
//! Everything in the crate logs through the `log` facade; the host binary
//! installs `flexi_logger` here with one of three line formats:
//! `text` (default), `ext` (with source location) or `json`.

use colored::Colorize;
use std::sync::{Mutex, OnceLock};

/// Handle of the running logger; kept alive for the process lifetime
static LOGGER_HANDLE: OnceLock<Mutex<flexi_logger::LoggerHandle>> = OnceLock::new();

/// Crate prefix stripped from log targets when rendering source locations
const TARGET_PREFIX: &str = "testplugins::";

/// Start the process logger
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let level_str = log_level.unwrap_or("info");
    let mut logger = Logger::try_with_str(level_str)?;

    logger = match (log_format.unwrap_or("text"), color_enabled) {
        ("json", _) => logger.format(json_format),
        ("ext", true) => logger.format(extended_color_format),
        ("ext", false) => logger.format(extended_format),
        (_, true) => logger.format(simple_color_format),
        (_, false) => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));
    Ok(())
}

/// Change the active log level of a started logger
pub fn set_log_level(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_new_spec(log_level)?;
    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

// "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        colored_level(record.level()),
        record.args()
    )
}

// "YYYY-MM-DD HH:mm:ss.fff INF message (plugin/manager.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        colored_level(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let json_obj = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line()),
    });

    match serde_json::to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

fn colored_level(level: log::Level) -> colored::ColoredString {
    let abbr = level_abbr(level);
    match level {
        log::Level::Error => abbr.red().bold(),
        log::Level::Warn => abbr.yellow(),
        log::Level::Info => abbr.green(),
        log::Level::Debug => abbr.blue(),
        log::Level::Trace => abbr.magenta(),
    }
}

/// Render `testplugins::plugin::manager` as `plugin/manager.rs:<line>`
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix(TARGET_PREFIX) {
        Some(module_path) => module_path.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexi_logger::DeferredNow;

    fn render(
        format: fn(
            &mut dyn std::io::Write,
            &mut DeferredNow,
            &log::Record,
        ) -> Result<(), std::io::Error>,
        target: &str,
        line: Option<u32>,
    ) -> String {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        let record = log::Record::builder()
            .level(log::Level::Error)
            .target(target)
            .line(line)
            .args(format_args!("Could not load 'broken'"))
            .build();

        format(&mut buffer, &mut now, &record).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_target_formatting_for_crate_modules() {
        assert_eq!(
            format_target_as_path("testplugins::plugin::manager", Some(42)),
            "plugin/manager.rs:42"
        );
        assert_eq!(
            format_target_as_path("testplugins::config::opts", None),
            "config/opts.rs"
        );
    }

    #[test]
    fn test_target_formatting_for_external_crates() {
        assert_eq!(
            format_target_as_path("other_crate::module", Some(7)),
            "other_crate/module:7"
        );
    }

    #[test]
    fn test_simple_format() {
        let output = render(simple_format, "testplugins::plugin::manager", Some(10));

        assert!(output.contains("ERR Could not load 'broken'"));
        assert!(!output.contains("plugin/manager.rs"));
    }

    #[test]
    fn test_extended_format_includes_location() {
        let output = render(extended_format, "testplugins::plugin::manager", Some(10));

        assert!(output.contains("ERR Could not load 'broken'"));
        assert!(output.ends_with("(plugin/manager.rs:10)"));
    }

    #[test]
    fn test_json_format() {
        let output = render(json_format, "testplugins::plugin::manager", Some(10));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["level"], "ERR");
        assert_eq!(value["message"], "Could not load 'broken'");
        assert_eq!(value["target"], "plugin/manager.rs:10");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_set_log_level_requires_started_logger() {
        if LOGGER_HANDLE.get().is_none() {
            assert!(set_log_level("debug").is_err());
        }
    }
}
