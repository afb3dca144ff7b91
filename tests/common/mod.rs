//! Common test utilities
//!
//! A `log::Log` implementation that keeps every record so tests can assert
//! on what the plugin manager logged.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};

pub struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

static INIT: Once = Once::new();

/// Install the capturing logger for this test binary
pub fn init_capture() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger is installed in this test binary");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Error-level messages that mention `needle`
pub fn error_logs_mentioning(needle: &str) -> Vec<String> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level == Level::Error && message.contains(needle))
        .map(|(_, message)| message.clone())
        .collect()
}
