//! Console logger for the desktop harness.
//!
//! The harness keeps the terminal in raw mode, so every line is terminated
//! with an explicit carriage return.

use std::io::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    max_level: Level,
}

impl ConsoleLogger {
    pub const fn new(max_level: Level) -> Self {
        Self { max_level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_str = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };

        let mut out = io::stdout();
        let _ = write!(
            out,
            "[{}] {}: {}\r\n",
            level_str,
            record.target(),
            record.args()
        );
        let _ = out.flush();
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger::new(Level::Debug);

/// Install the console logger. Safe to call more than once.
pub fn init(max_level: LevelFilter) {
    match log::set_logger(&LOGGER) {
        Ok(()) => log::set_max_level(max_level),
        Err(_) => {
            // logger already set
        }
    }
}
