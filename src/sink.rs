use crate::level::LogLevel;
use crate::record::{CallSite, LogArg};

/// Destination for log events.
///
/// Implementations decide what "accept" means: the file sink enqueues for a
/// background thread, the console sink writes inline, the noop sink discards.
pub trait LogSink: Send + Sync {
    /// Accepts one event. Events below the sink's configured level are dropped.
    fn log(&self, level: LogLevel, site: CallSite, template: &str, args: Vec<LogArg>);

    /// Stops accepting events and releases whatever the sink holds.
    fn close(&self);

    fn debug(&self, site: CallSite, template: &str, args: Vec<LogArg>) {
        self.log(LogLevel::Debug, site, template, args);
    }

    fn trace(&self, site: CallSite, template: &str, args: Vec<LogArg>) {
        self.log(LogLevel::Trace, site, template, args);
    }

    fn info(&self, site: CallSite, template: &str, args: Vec<LogArg>) {
        self.log(LogLevel::Info, site, template, args);
    }

    fn warn(&self, site: CallSite, template: &str, args: Vec<LogArg>) {
        self.log(LogLevel::Warn, site, template, args);
    }

    fn error(&self, site: CallSite, template: &str, args: Vec<LogArg>) {
        self.log(LogLevel::Error, site, template, args);
    }

    fn fatal(&self, site: CallSite, template: &str, args: Vec<LogArg>) {
        self.log(LogLevel::Fatal, site, template, args);
    }
}
