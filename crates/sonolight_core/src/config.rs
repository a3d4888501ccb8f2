//! Runtime configuration for storage and logging.
//!
//! # Responsibility
//! - Hold the data directory, log settings and store policies in one value.
//! - Resolve overrides from `SONOLIGHT_*` environment variables.
//!
//! # Invariants
//! - Defaults are usable without any environment: `./data`, `info` in
//!   release builds, missing files read as empty collections, 5 backups.
//! - Invalid environment values are reported, never silently ignored.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "SONOLIGHT_DATA_DIR";
pub const ENV_LOG_DIR: &str = "SONOLIGHT_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "SONOLIGHT_LOG_LEVEL";
pub const ENV_MISSING_FILES: &str = "SONOLIGHT_MISSING_FILES";
pub const ENV_BACKUP_KEEP: &str = "SONOLIGHT_BACKUP_KEEP";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BACKUP_KEEP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidMissingFilePolicy(String),
    InvalidBackupKeep(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidMissingFilePolicy(value) => write!(
                f,
                "unsupported missing file policy `{value}`; expected empty|error"
            ),
            Self::InvalidBackupKeep(value) => {
                write!(f, "backup keep count must be a non-negative integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Log verbosity accepted by the logging bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a case-insensitive level name; `warning` is accepted as `warn`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidLogLevel(value.trim().to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// `debug` for debug builds, `info` for release builds.
    pub fn default_for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What loading a collection does when its file does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFilePolicy {
    /// Treat the collection as empty. The file is created on first save.
    #[default]
    Empty,
    /// Fail with `StoreError::Missing`.
    Error,
}

impl MissingFilePolicy {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidMissingFilePolicy(value.trim().to_string())),
        }
    }
}

/// Rotating backup copies written before a collection file is overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupPolicy {
    pub enabled: bool,
    /// Number of newest backups retained per collection.
    pub keep: usize,
}

impl BackupPolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            keep: 0,
        }
    }

    /// Whether a save should produce a backup at all.
    pub fn is_active(&self) -> bool {
        self.enabled && self.keep > 0
    }
}

impl Default for BackupPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            keep: DEFAULT_BACKUP_KEEP,
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub log_level: LogLevel,
    pub missing_files: MissingFilePolicy,
    pub backups: BackupPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_dir: None,
            log_level: LogLevel::default_for_build(),
            missing_files: MissingFilePolicy::default(),
            backups: BackupPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from defaults and process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from defaults and a key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(dir) = read(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = LogLevel::parse(&level)?;
        }
        if let Some(policy) = read(ENV_MISSING_FILES) {
            config.missing_files = MissingFilePolicy::parse(&policy)?;
        }
        if let Some(keep) = read(ENV_BACKUP_KEEP) {
            let keep = keep
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidBackupKeep(keep.clone()))?;
            config.backups = if keep == 0 {
                BackupPolicy::disabled()
            } else {
                BackupPolicy {
                    enabled: true,
                    keep,
                }
            };
        }
        Ok(config)
    }
}
