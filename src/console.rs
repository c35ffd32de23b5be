use std::io::{self, Write};

use crate::format::format_line;
use crate::level::LogLevel;
use crate::record::{CallSite, LogArg, LogRecord};
use crate::sink::LogSink;

/// Sink that writes formatted lines to standard output, inline on the calling
/// thread.
///
/// Lines use the same format as the file sink, so the two can be swapped
/// behind [`LogSink`] without changing what readers see. Write failures are
/// ignored; losing a console line is never worth interrupting the caller.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    /// Creates a console sink with the minimum level parsed from `level_str`.
    ///
    /// Unrecognized names fall back to `DEBUG`, so a typo widens the output
    /// rather than silencing it.
    #[must_use]
    pub fn new(level_str: &str) -> Self {
        Self::with_level(LogLevel::parse(level_str))
    }

    /// Creates a console sink with an explicit minimum level.
    #[must_use]
    pub const fn with_level(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the configured minimum level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }
}

impl LogSink for ConsoleLogger {
    fn log(&self, level: LogLevel, site: CallSite, template: &str, args: Vec<LogArg>) {
        if !self.enabled(level) {
            return;
        }
        let record = LogRecord::capture(level, site, template, args);
        let line = format_line(&record);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "{line}");
    }

    fn close(&self) {}
}
