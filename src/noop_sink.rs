use crate::{
    level::LogLevel,
    record::{CallSite, LogArg},
    sink::LogSink,
};

#[derive(Debug, Clone, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    #[inline]
    fn log(&self, _level: LogLevel, _site: CallSite, _template: &str, _args: Vec<LogArg>) {}

    #[inline]
    fn close(&self) {}
}
