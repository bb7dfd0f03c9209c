//! Log output setup and the log sinks handed to the notifier
//!
//! `LogConfig` is initialized once by the binary. The notifier never touches
//! the global subscriber itself; it writes through whatever [`LogSink`] it
//! was given, so tests can capture records in memory.

use crate::errors::{NotifierError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Tracing target used for notification records
pub const NOTIFICATION_TARGET: &str = "blink::notification";

/// Where log output goes and how verbose it is
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log file, created along with its directory if missing
    pub path: PathBuf,
    /// Level for the `blink` targets (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            level: "info".to_string(),
        }
    }
}

/// `log/out.log` under the current directory
pub fn default_log_path() -> PathBuf {
    PathBuf::from("log").join("out.log")
}

/// Split a log file path into (directory, file name)
fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| NotifierError::Log(format!("log path {path:?} has no file name")))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}

/// Filter for `blink` targets at `level`
///
/// Notification records stay at info regardless of `level`; they are the
/// only durable trace of a popup.
pub fn log_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::new(format!("blink={level},{NOTIFICATION_TARGET}=info"))
}

/// Install the process-wide subscriber writing to `config.path`
///
/// The returned guard flushes buffered records on drop; hold it until exit.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(&config.path)?;
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(log_filter(&config.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| NotifierError::Log(e.to_string()))?;

    tracing::debug!("Logging to {:?}", config.path);
    Ok(guard)
}

/// Anything that can durably record an informational line
pub trait LogSink {
    fn info(&self, record: &str) -> Result<()>;
}

/// Forwards records to the current `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, record: &str) -> Result<()> {
        let installed = tracing::dispatcher::get_default(|dispatch| {
            !dispatch.is::<tracing::subscriber::NoSubscriber>()
        });
        if !installed {
            return Err(NotifierError::Log(
                "no log subscriber installed, call logging::init first".to_string(),
            ));
        }
        if !tracing::enabled!(target: NOTIFICATION_TARGET, tracing::Level::INFO) {
            return Err(NotifierError::Log(format!(
                "{NOTIFICATION_TARGET} records are filtered out at info level"
            )));
        }
        tracing::info!(target: NOTIFICATION_TARGET, "{}", record);
        Ok(())
    }
}

/// In-memory sink; clones share the same record list
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every record
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<String> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn info(&self, record: &str) -> Result<()> {
        if self.fail {
            return Err(NotifierError::Log("memory sink is closed".to_string()));
        }
        self.records
            .lock()
            .map_err(|e| NotifierError::Log(e.to_string()))?
            .push(record.to_string());
        Ok(())
    }
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn info(&self, record: &str) -> Result<()> {
        (**self).info(record)
    }
}
