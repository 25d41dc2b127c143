use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_DIR_NAME: &str = "hangman-de";
const LOG_FILE_NAME: &str = "hangman.log";
const DEFAULT_LEVEL: &str = "warn";

// Conditional logging macros - only active in debug builds

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

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("could not open log file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("logger already initialized")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Location of the log file, `None` if the platform has no cache directory.
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open = || -> io::Result<File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };
    open().map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Route `log` output to the log file, or to stderr when there is no cache
/// directory. `RUST_LOG` takes precedence over `level`.
///
/// Returns the path of the log file, if one is used.
pub fn init_logging(level: Option<&str>) -> Result<Option<PathBuf>, LoggingError> {
    let env = env_logger::Env::default().default_filter_or(level.unwrap_or(DEFAULT_LEVEL));
    let mut builder = env_logger::Builder::from_env(env);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let path = log_file_path();
    match &path {
        Some(path) => {
            let file = open_log_file(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.try_init()?;
    info_log!("Logging initialized, writing to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_layout() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("hangman-de/hangman.log"));
        }
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = std::env::temp_dir().join("hangman_de_logging_test");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("test.log");

        let file = open_log_file(&path);
        assert!(file.is_ok());
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
