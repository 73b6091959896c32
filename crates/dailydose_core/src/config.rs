//! Runtime configuration for the core.
//!
//! # Responsibility
//! - Collect storage, logging and hydration settings in one value.
//! - Apply environment overrides on top of defaults.
//! - Bootstrap the collection store from a configuration.
//!
//! # Invariants
//! - Unset variables keep their defaults; malformed ones are errors.
//! - `open_store` never touches the filesystem when `db_path` is `None`.

use crate::db::open_db_in_memory;
use crate::logging::{
    default_log_level, init_logging, parse_level, LogSettings, LoggingError, DEFAULT_MAX_FILES,
};
use crate::service::hydration_service::HydrationGoal;
use crate::store::{CollectionStore, CorruptPolicy, StoreError};
use log::{info, LevelFilter};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "DAILYDOSE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "DAILYDOSE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DAILYDOSE_LOG_DIR";
pub const ENV_LOG_MAX_FILES: &str = "DAILYDOSE_LOG_MAX_FILES";
pub const ENV_STRICT_LOAD: &str = "DAILYDOSE_STRICT_LOAD";
pub const ENV_WATER_GOAL: &str = "DAILYDOSE_WATER_GOAL";

#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    /// SQLite file; `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// Absolute log directory; `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
    /// Rotated log files kept besides the current one.
    pub log_max_files: usize,
    pub corrupt_policy: CorruptPolicy,
    pub water_goal_glasses: u32,
    pub water_glass_liters: f64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let hydration = HydrationGoal::default();
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
            log_max_files: DEFAULT_MAX_FILES,
            corrupt_policy: CorruptPolicy::default(),
            water_goal_glasses: hydration.glasses,
            water_glass_liters: hydration.liters_per_glass,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for {key}")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug)]
pub enum BootstrapError {
    Logging(LoggingError),
    Store(StoreError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "logging init failed: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<LoggingError> for BootstrapError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<StoreError> for BootstrapError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl CoreConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    /// - `InvalidValue` when a level, flag or count does not parse, or the
    ///   water goal is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let present = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = present(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = present(ENV_LOG_LEVEL) {
            config.log_level = parse_level(&level).map_err(|_| ConfigError::InvalidValue {
                key: ENV_LOG_LEVEL,
                value: level.clone(),
            })?;
        }
        if let Some(dir) = present(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(count) = present(ENV_LOG_MAX_FILES) {
            config.log_max_files = count.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_LOG_MAX_FILES,
                value: count.clone(),
            })?;
        }
        if let Some(strict) = present(ENV_STRICT_LOAD) {
            config.corrupt_policy = if parse_flag(ENV_STRICT_LOAD, &strict)? {
                CorruptPolicy::Surface
            } else {
                CorruptPolicy::DefaultEmpty
            };
        }
        if let Some(goal) = present(ENV_WATER_GOAL) {
            config.water_goal_glasses = match goal.parse::<u32>() {
                Ok(glasses) if glasses > 0 => glasses,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_WATER_GOAL,
                        value: goal,
                    })
                }
            };
        }
        Ok(config)
    }

    /// File logging settings, or `None` when no log directory is set.
    pub fn log_settings(&self) -> Option<LogSettings> {
        self.log_dir.as_ref().map(|dir| LogSettings {
            max_files: self.log_max_files,
            ..LogSettings::new(self.log_level, dir.clone())
        })
    }

    pub fn hydration_goal(&self) -> HydrationGoal {
        HydrationGoal {
            glasses: self.water_goal_glasses,
            liters_per_glass: self.water_glass_liters,
        }
    }
}

/// Starts logging when a log directory is configured, then opens the store.
///
/// # Errors
/// - `Logging` when the logger rejects the level or directory.
/// - `Store` when the database cannot be opened or migrated.
pub fn open_store(config: &CoreConfig) -> Result<CollectionStore, BootstrapError> {
    if let Some(settings) = config.log_settings() {
        init_logging(&settings)?;
    }

    let store = match &config.db_path {
        Some(path) => CollectionStore::open(path, config.corrupt_policy)?,
        None => CollectionStore::new(
            open_db_in_memory().map_err(StoreError::from)?,
            config.corrupt_policy,
        ),
    };
    info!(
        "event=store_open module=config status=ok mode={} strict={}",
        if config.db_path.is_some() { "file" } else { "memory" },
        config.corrupt_policy == CorruptPolicy::Surface
    );
    Ok(store)
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
