//! Leveled logging macros for any [`LogSink`](crate::sink::LogSink).
//!
//! The macros capture the call site (file, line, enclosing function) at the
//! point of expansion, so attribution survives the hop through the queue.
//! Arguments are converted through [`LogArg::from`](crate::record::LogArg) and
//! carried unrendered; the template is resolved by the consuming side.

/// Path of the enclosing function, without a trailing `::f` probe segment.
#[macro_export]
macro_rules! function_path {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// Builds a [`CallSite`](crate::record::CallSite) for the expansion point.
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::record::CallSite {
            file: file!(),
            line: line!(),
            function: $crate::function_path!(),
        }
    };
}

#[macro_export]
macro_rules! sink_log {
    ($sink:expr, $lvl:expr, $tmpl:expr $(, $arg:expr)* $(,)?) => {{
        $sink.log(
            $lvl,
            $crate::callsite!(),
            $tmpl,
            vec![$($crate::record::LogArg::from($arg)),*],
        );
    }};
}

// ---------------------- LEVEL-SPECIFIC MACROS ----------------------

#[macro_export]
macro_rules! sink_debug { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::level::LogLevel::Debug, $($arg)*) } }

#[macro_export]
macro_rules! sink_trace { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::level::LogLevel::Trace, $($arg)*) } }

#[macro_export]
macro_rules! sink_info { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::level::LogLevel::Info, $($arg)*) } }

#[macro_export]
macro_rules! sink_warn { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::level::LogLevel::Warn, $($arg)*) } }

#[macro_export]
macro_rules! sink_error { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::level::LogLevel::Error, $($arg)*) } }

#[macro_export]
macro_rules! sink_fatal { ($sink:expr, $($arg:tt)*) => { $crate::sink_log!($sink, $crate::level::LogLevel::Fatal, $($arg)*) } }

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use crate::level::LogLevel;
    use crate::noop_sink::NoopLogSink;
    use crate::record::{CallSite, LogArg};
    use crate::sink::LogSink;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingSink {
        seen: Mutex<Vec<(LogLevel, CallSite, String, Vec<LogArg>)>>,
    }

    impl LogSink for CapturingSink {
        fn log(&self, level: LogLevel, site: CallSite, template: &str, args: Vec<LogArg>) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((level, site, template.to_string(), args));
            }
        }

        fn close(&self) {}
    }

    #[test]
    fn callsite_names_this_function() {
        let site = callsite!();
        assert!(site.file.ends_with("macros.rs"), "file: {}", site.file);
        assert!(
            site.function.ends_with("callsite_names_this_function"),
            "function: {}",
            site.function
        );
        assert!(site.line > 0);
    }

    #[test]
    fn macro_converts_arguments_in_order() {
        let sink = CapturingSink::default();
        sink_info!(sink, "x=%d y=%s", 5, "ok");

        let seen = sink.seen.lock().unwrap();
        let (level, _, template, args) = &seen[0];
        assert_eq!(*level, LogLevel::Info);
        assert_eq!(template, "x=%d y=%s");
        assert_eq!(args, &vec![LogArg::Int(5), LogArg::Str("ok".to_string())]);
    }

    #[test]
    fn every_level_macro_tags_its_level() {
        let sink = CapturingSink::default();
        sink_debug!(sink, "m");
        sink_trace!(sink, "m");
        sink_warn!(sink, "m");
        sink_error!(sink, "m");
        sink_fatal!(sink, "m");

        let seen = sink.seen.lock().unwrap();
        let levels: Vec<LogLevel> = seen.iter().map(|(l, ..)| *l).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Debug,
                LogLevel::Trace,
                LogLevel::Warn,
                LogLevel::Error,
                LogLevel::Fatal,
            ]
        );
    }

    #[test]
    fn macros_accept_a_noop_sink() {
        let sink = NoopLogSink;
        sink_debug!(sink, "discarded %d", 1);
        sink.close();
    }
}
