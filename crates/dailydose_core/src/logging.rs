//! Process-wide file logging.
//!
//! # Responsibility
//! - Start size-rotated `dailydose` log files from `LogSettings`.
//! - Record panics as log events.
//!
//! # Invariants
//! - Events carry ids, counts, slot names and durations. User-entered text
//!   (notes, titles, messages, panic payloads) never reaches the log.
//! - One logger per process: repeating identical settings is a no-op and
//!   different settings are refused with `AlreadyActive`.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "dailydose";
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 3;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    /// Absolute directory for the rotated files; created on start.
    pub dir: PathBuf,
    /// Size at which the current file is rotated.
    pub max_file_bytes: u64,
    /// Rotated files kept besides the current one.
    pub max_files: usize,
}

impl LogSettings {
    pub fn new(level: LevelFilter, dir: impl Into<PathBuf>) -> Self {
        Self {
            level,
            dir: dir.into(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
pub enum LoggingError {
    InvalidLevel(String),
    RelativeDir(PathBuf),
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// A logger with other settings is already running.
    AlreadyActive {
        active: Box<LogSettings>,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(text) => write!(
                f,
                "unsupported log level `{text}`; expected off|error|warn|info|debug|trace"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDir { dir, source } => write!(
                f,
                "cannot create log directory `{}`: {source}",
                dir.display()
            ),
            Self::Backend(err) => write!(f, "logger backend failed to start: {err}"),
            Self::AlreadyActive { active } => write!(
                f,
                "logging already active at `{}` with level {}",
                active.dir.display(),
                active.level
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            Self::InvalidLevel(_) | Self::RelativeDir(_) | Self::AlreadyActive { .. } => None,
        }
    }
}

/// Parses `off|error|warn|info|debug|trace`, case-insensitive.
pub fn parse_level(text: &str) -> Result<LevelFilter, LoggingError> {
    text.trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::InvalidLevel(text.trim().to_string()))
}

/// `Debug` in debug builds, `Info` in release builds.
pub fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Starts the file logger and installs the panic hook.
///
/// # Errors
/// - `RelativeDir` or `CreateDir` for an unusable directory.
/// - `AlreadyActive` when a logger with different settings runs.
/// - `Backend` when flexi_logger cannot start.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    if !settings.dir.is_absolute() {
        return Err(LoggingError::RelativeDir(settings.dir.clone()));
    }

    let active = ACTIVE.get_or_try_init(|| start(settings))?;
    if active.settings != *settings {
        return Err(LoggingError::AlreadyActive {
            active: Box::new(active.settings.clone()),
        });
    }
    Ok(())
}

/// Settings of the running logger, or `None` before `init_logging`.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE.get().map(|active| active.settings.clone())
}

fn start(settings: &LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.dir).map_err(|source| LoggingError::CreateDir {
        dir: settings.dir.clone(),
        source,
    })?;

    let spec = LogSpecification::builder().default(settings.level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(settings.max_file_bytes),
            Naming::Numbers,
            Cleanup::KeepLogFiles(settings.max_files),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LoggingError::Backend)?;

    install_panic_hook();
    info!(
        "event=logging_init module=logging status=ok version={} level={} max_file_bytes={} max_files={}",
        env!("CARGO_PKG_VERSION"),
        settings.level,
        settings.max_file_bytes,
        settings.max_files
    );

    Ok(ActiveLogger {
        settings: settings.clone(),
        _handle: handle,
    })
}

// Runs at most once: only reachable from the `ACTIVE` initializer.
fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=logging status=error location={} payload_bytes={}",
            location,
            payload_len(panic_info)
        );
        previous_hook(panic_info);
    }));
}

fn payload_len(info: &std::panic::PanicHookInfo<'_>) -> usize {
    if let Some(message) = info.payload().downcast_ref::<&str>() {
        message.len()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.len()
    } else {
        0
    }
}
