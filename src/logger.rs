use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use time::{OffsetDateTime, macros::format_description};

/// Stderr logger with optional colors and an optional append-only log file
pub struct Logger {
    pub severity: Level,
    pub file: Option<Mutex<File>>,
    pub enable_colors: bool,
}

impl Logger {
    pub fn new(severity: Level, file_path: Option<PathBuf>, enable_colors: bool) -> Self {
        let file = file_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(f) => Some(Mutex::new(f)),
                Err(e) => {
                    eprintln!("cannot open log file {:?}: {}", path, e);
                    None
                }
            }
        });

        Logger { severity, file, enable_colors }
    }

    fn timestamp() -> String {
        OffsetDateTime::now_utc()
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_default()
    }

    fn color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[36m",
            Level::Debug => "\x1b[35m",
            Level::Trace => "\x1b[37m",
        }
    }

    /// Install the logger, configured from `GALLERY_LOG` (or `RUST_LOG`),
    /// `GALLERY_LOG_FILE` and `NO_COLOR`
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("GALLERY_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::Info);
        let file_path = std::env::var_os("GALLERY_LOG_FILE").map(PathBuf::from);
        let enable_colors = std::env::var_os("NO_COLOR").is_none();

        let logger = Logger::new(severity, file_path, enable_colors);
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::timestamp();
        let level = record.level();
        let args = record.args();

        let line = if self.enable_colors {
            format!("{}[{timestamp}] {level}\x1b[0m {args}\n", Self::color(level))
        } else {
            format!("[{timestamp}] {level} {args}\n")
        };
        let _ = std::io::stderr().write_all(line.as_bytes());

        if let Some(file) = &self.file {
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "[{timestamp}] {level} {args}");
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut guard) = file.lock() {
                let _ = guard.flush();
            }
        }
    }
}
