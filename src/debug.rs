//! Unified file-based logging for kilomoco.
//!
//! Routes all `log::info!()` etc. to `/tmp/kilomoco_debug.log` on Unix
//! (`%TEMP%\kilomoco_debug.log` on Windows). Keeping diagnostics out of
//! stdout/stderr matters because the interactive TUI owns the terminal.
//!
//! The level comes from the `KILOMOCO_LOG` environment variable
//! (`error`, `warn`, `info`, `debug`, `trace`, or `off`); default `warn`.

use log::{Level, LevelFilter, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};

/// Environment variable controlling the log level.
pub const LOG_LEVEL_ENV: &str = "KILOMOCO_LOG";

fn level_from_env() -> LevelFilter {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Warn,
        },
        Err(_) => LevelFilter::Warn,
    }
}

fn log_file_path() -> std::path::PathBuf {
    #[cfg(unix)]
    {
        std::path::PathBuf::from("/tmp/kilomoco_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("kilomoco_debug.log")
    }
}

struct FileLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut guard) = self.file.lock()
            && let Some(file) = guard.as_mut()
        {
            let level = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN",
                Level::Info => "INFO",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            let _ = writeln!(file, "[{level}] {}: {}", record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock()
            && let Some(file) = guard.as_mut()
        {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// Install the file-based log bridge. Safe to call more than once; only
/// the first call installs a logger. Logging failures are swallowed — the
/// bridge must never take the application down.
pub fn init_log_bridge() {
    let level = level_from_env();
    if level == LevelFilter::Off {
        return;
    }

    let logger = LOGGER.get_or_init(|| {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path())
            .ok();
        FileLogger {
            level,
            file: Mutex::new(file),
        }
    });

    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}
