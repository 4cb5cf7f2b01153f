//! Runtime settings resolution.
//!
//! # Responsibility
//! - Resolve the library file path and logging settings from flags,
//!   environment variables and defaults.
//!
//! # Invariants
//! - Flags win over environment; blank environment values are ignored.

use booklog_core::LogLevel;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "BOOKLOG_DB_PATH";
pub const LOG_DIR_ENV: &str = "BOOKLOG_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "booklog.sqlite3";

/// Effective settings for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// Logging stays off when no directory is configured.
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolves settings from CLI flags and the process environment.
    pub fn resolve(
        db_flag: Option<PathBuf>,
        log_level: Option<LogLevel>,
        log_dir_flag: Option<PathBuf>,
    ) -> Self {
        Self::resolve_with(db_flag, log_level, log_dir_flag, |key| {
            std::env::var(key).ok()
        })
    }

    fn resolve_with(
        db_flag: Option<PathBuf>,
        log_level: Option<LogLevel>,
        log_dir_flag: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let from_env = |key: &str| {
            env(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        Self {
            db_path: db_flag
                .or_else(|| from_env(DB_PATH_ENV))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME)),
            log_level: log_level.unwrap_or_else(LogLevel::build_default),
            log_dir: log_dir_flag.or_else(|| from_env(LOG_DIR_ENV)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Settings, DB_PATH_ENV, DEFAULT_DB_FILE_NAME, LOG_DIR_ENV};
    use booklog_core::LogLevel;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let settings = Settings::resolve_with(None, None, None, |_| None);
        assert_eq!(settings.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(settings.log_level, LogLevel::build_default());
        assert_eq!(settings.log_dir, None);
    }

    #[test]
    fn env_fills_missing_flags_and_blank_env_is_ignored() {
        let settings = Settings::resolve_with(None, None, None, |key| match key {
            DB_PATH_ENV => Some(" /tmp/books.sqlite3 ".to_string()),
            LOG_DIR_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(settings.db_path, PathBuf::from("/tmp/books.sqlite3"));
        assert_eq!(settings.log_dir, None);
    }

    #[test]
    fn flags_win_over_env() {
        let settings = Settings::resolve_with(
            Some(PathBuf::from("mine.sqlite3")),
            Some(LogLevel::Warn),
            Some(PathBuf::from("/var/log/booklog")),
            |_| Some("/elsewhere".to_string()),
        );
        assert_eq!(settings.db_path, PathBuf::from("mine.sqlite3"));
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert_eq!(settings.log_dir, Some(PathBuf::from("/var/log/booklog")));
    }
}
