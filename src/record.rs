use std::fmt;

use crate::clock;
use crate::level::LogLevel;

/// Identity of the application code that produced a log call.
///
/// Captured at compile time by the [`callsite!`](crate::callsite) macro, so a
/// line is always attributed to the caller and never to sink internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Source file as given by `file!()` (possibly a relative path; the
    /// formatter reduces it to its base name).
    pub file: &'static str,
    /// 1-based line number.
    pub line: u32,
    /// Path of the enclosing function.
    pub function: &'static str,
}

/// One argument carried alongside a message template.
///
/// Arguments stay unrendered while a record travels the queue; substitution
/// into the template happens once, on the worker thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    /// An owned string value.
    Str(String),
    /// A signed integer value.
    Int(i64),
    /// An unsigned integer value.
    Uint(u64),
    /// A floating point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A single character.
    Char(char),
}

impl fmt::Display for LogArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogArg::Str(v) => f.write_str(v),
            LogArg::Int(v) => write!(f, "{v}"),
            LogArg::Uint(v) => write!(f, "{v}"),
            LogArg::Float(v) => write!(f, "{v}"),
            LogArg::Bool(v) => write!(f, "{v}"),
            LogArg::Char(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for LogArg {
    fn from(v: &str) -> Self {
        LogArg::Str(v.to_string())
    }
}

impl From<String> for LogArg {
    fn from(v: String) -> Self {
        LogArg::Str(v)
    }
}

impl From<i64> for LogArg {
    fn from(v: i64) -> Self {
        LogArg::Int(v)
    }
}

impl From<i32> for LogArg {
    fn from(v: i32) -> Self {
        LogArg::Int(i64::from(v))
    }
}

impl From<u64> for LogArg {
    fn from(v: u64) -> Self {
        LogArg::Uint(v)
    }
}

impl From<u32> for LogArg {
    fn from(v: u32) -> Self {
        LogArg::Uint(u64::from(v))
    }
}

impl From<usize> for LogArg {
    fn from(v: usize) -> Self {
        LogArg::Uint(v as u64)
    }
}

impl From<f64> for LogArg {
    fn from(v: f64) -> Self {
        LogArg::Float(v)
    }
}

impl From<f32> for LogArg {
    fn from(v: f32) -> Self {
        LogArg::Float(f64::from(v))
    }
}

impl From<bool> for LogArg {
    fn from(v: bool) -> Self {
        LogArg::Bool(v)
    }
}

impl From<char> for LogArg {
    fn from(v: char) -> Self {
        LogArg::Char(v)
    }
}

/// Represents a single log event.
///
/// A record is immutable once built. Ownership passes from the producing
/// thread into the queue and from the queue into the worker; no stage shares
/// it with another.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// The severity level of the event.
    pub level: LogLevel,
    /// Wall-clock timestamp, already formatted (`YYYY-MM-DD HH:MM:SS:ss.mmm`).
    pub timestamp: String,
    /// Where in the application the event was logged.
    pub site: CallSite,
    /// The message template, placeholders unresolved.
    pub template: String,
    /// Arguments for the template, in order.
    pub args: Vec<LogArg>,
}

impl LogRecord {
    /// Builds a record for an event happening now.
    ///
    /// The timestamp is formatted here, on the producer thread; template
    /// substitution is left to the consumer.
    #[must_use]
    pub fn capture(
        level: LogLevel,
        site: CallSite,
        template: impl Into<String>,
        args: Vec<LogArg>,
    ) -> Self {
        Self {
            level,
            timestamp: clock::now_timestamp(),
            site,
            template: template.into(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_convert_from_common_types() {
        assert_eq!(LogArg::from("x"), LogArg::Str("x".to_string()));
        assert_eq!(LogArg::from(5_i32), LogArg::Int(5));
        assert_eq!(LogArg::from(5_u64), LogArg::Uint(5));
        assert_eq!(LogArg::from(2.5_f64), LogArg::Float(2.5));
        assert_eq!(LogArg::from(true), LogArg::Bool(true));
        assert_eq!(LogArg::from('c'), LogArg::Char('c'));
    }

    #[test]
    fn args_display_natural_form() {
        assert_eq!(LogArg::from("id").to_string(), "id");
        assert_eq!(LogArg::from(-3_i64).to_string(), "-3");
        assert_eq!(LogArg::from(false).to_string(), "false");
    }

    #[test]
    fn capture_stamps_the_record() {
        let site = CallSite {
            file: "src/record.rs",
            line: 1,
            function: "sinklog::record::tests",
        };
        let record = LogRecord::capture(LogLevel::Info, site, "up", vec![]);
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.template, "up");
        assert!(!record.timestamp.is_empty());
    }
}
