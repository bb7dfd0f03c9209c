//! Errors surfaced by the notifier
//!
//! Every failure is reported once to the caller; nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors raised while showing a notification
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Display duration must be strictly positive
    #[error("Invalid duration: display time must be greater than 0 ms")]
    InvalidDuration,

    /// The log sink refused the notification record
    #[error("Log sink error: {0}")]
    Log(String),

    /// No display surface, or the windowing toolkit failed
    #[error("Display error: {0}")]
    Display(String),

    /// Configuration file could not be read or parsed
    #[error("Config error for {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// Color string is neither a known name nor #rrggbb
    #[error("Invalid color '{0}'. Expected #rrggbb or one of: black, white, red, green, blue, yellow, gray")]
    InvalidColor(String),

    /// Filesystem I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using NotifierError
pub type Result<T> = std::result::Result<T, NotifierError>;
