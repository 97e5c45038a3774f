// Logging setup plus macros for hot paths that vanish in release builds

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    /// Append to a file; used while the full-screen interface owns the terminal.
    File(PathBuf),
}

#[must_use]
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Log file inside the local data directory, or the temp directory when the
/// platform has none.
#[must_use]
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .map_or_else(std::env::temp_dir, |dir| dir.join("hangman"))
        .join("hangman.log")
}

/// Installs env_logger. `RUST_LOG` takes precedence over `verbose`.
///
/// If the log file cannot be opened, logging falls back to stderr.
pub fn init_logging(verbose: u8, destination: &LogDestination) {
    let default_filter = level_for_verbosity(verbose).to_string().to_lowercase();
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let mut fallback = None;
    match destination {
        LogDestination::Stderr => {
            builder.target(Target::Stderr);
        }
        LogDestination::File(path) => match open_log_file(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                builder.target(Target::Stderr);
                fallback = Some(e);
            }
        },
    }

    if builder.try_init().is_err() {
        return;
    }
    if let Some(e) = fallback {
        log::warn!("Could not open log file, logging to stderr: {e}");
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::options().create(true).append(true).open(path)
}
