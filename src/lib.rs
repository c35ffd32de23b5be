//! Leveled logging with a non-blocking file sink.
//!
//! The crate is built around the [`LogSink`] trait and three implementations:
//! - [`FileLogger`]: queues records into a bounded channel and writes them on
//!   a background thread, with size-based rotation and an `.err` mirror for
//!   `ERROR`-and-above records.
//! - [`ConsoleLogger`]: writes the same line format to stdout, inline.
//! - [`NoopLogSink`]: discards everything, for wiring and tests.
//!
//! The `sink_*` macros capture the call site (file, line, function) and work
//! against any sink. Log calls never block and never panic; a full queue
//! drops the record, and worker-side I/O failures are reported through
//! [`FileLogger::take_error`] instead of unwinding.

/// Wall-clock timestamps for lines and backup file names.
pub mod clock;
/// Handles configuration loading and sink options.
pub mod config;
/// Synchronous sink writing to stdout.
pub mod console;
/// Error type shared across the crate.
pub mod error;
/// The queued, rotating file sink.
pub mod file_sink;
/// Template substitution and line rendering.
pub mod format;
/// Severity levels and their parsing.
pub mod level;
/// Call-site capturing logging macros.
pub mod macros;
/// Sink that discards all records.
pub mod noop_sink;
/// Bounded lossy hand-off between producers and the worker.
pub mod queue;
/// Log events and their arguments.
pub mod record;
/// Append-only files with size-based rotation.
pub mod rotate;
/// The sink abstraction all loggers implement.
pub mod sink;
/// Background consumer draining the queue into files.
pub mod worker;

pub use config::{Config, SinkOptions};
pub use console::ConsoleLogger;
pub use error::{Result, SinkError};
pub use file_sink::FileLogger;
pub use level::LogLevel;
pub use noop_sink::NoopLogSink;
pub use record::{CallSite, LogArg, LogRecord};
pub use sink::LogSink;
