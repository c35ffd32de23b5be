use std::io;
use std::path::PathBuf;

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;

/// Errors raised by the file sink pipeline.
///
/// Construction-time variants (`CreateDirectory`, `Open`, `Spawn`,
/// `ConfigRead`) are returned synchronously by the fallible constructors.
/// Steady-state variants (`Write`, `Rotate`, `Reopen`) originate on the
/// worker thread and travel the status channel; producers never see them.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Failed to create the log directory.
    #[error("failed to create log directory {path}: {source}")]
    CreateDirectory {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Failed to open a log file in append-create mode.
    #[error("failed to open log file {path}: {source}")]
    Open {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Failed to spawn the background worker thread.
    #[error("failed to spawn sink worker: {0}")]
    Spawn(#[source] io::Error),

    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// A formatted line could not be written. The record is lost; the
    /// worker keeps running.
    #[error("write to {path} failed: {source}")]
    Write {
        /// The file the write was aimed at.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Renaming the full file to its backup name failed. Appending
    /// continues on the original (oversized) file.
    #[error("failed to rotate {path}: {source}")]
    Rotate {
        /// The file that could not be renamed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file handle was lost: the backup rename went through but the
    /// fresh file could not be opened. The worker cannot make progress
    /// on this file and stops.
    #[error("lost handle to {path} after rotation: {source}")]
    Reopen {
        /// The path that could not be reopened.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

impl SinkError {
    /// True for the one steady-state failure the worker cannot survive.
    #[must_use]
    pub fn is_handle_loss(&self) -> bool {
        matches!(self, SinkError::Reopen { .. })
    }
}
