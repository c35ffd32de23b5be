//! Rendering of queued records into their final line form.
//!
//! Formatting is deliberately separate from capture: producers only stamp and
//! enqueue, while the worker (or the console sink, inline) calls into this
//! module to build the text that reaches a file or the terminal.

use crate::record::{LogArg, LogRecord};

/// Substitution verbs understood inside a message template.
const fn is_verb(c: char) -> bool {
    matches!(c, 'd' | 's' | 'v' | 'f' | 't' | 'c')
}

/// Substitutes arguments into a printf-style template.
///
/// Each recognized verb (`%d`, `%s`, `%v`, `%f`, `%t`, `%c`) consumes the next
/// argument in order and renders it in its natural form; the verb letter does
/// not constrain the argument's type. `%%` produces a literal percent sign.
///
/// Substitution is total: a verb with no argument left to consume stays in the
/// output verbatim, surplus arguments are ignored, and a `%` followed by an
/// unknown character passes through unchanged.
#[must_use]
pub fn render_template(template: &str, args: &[LogArg]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(v) if is_verb(v) => match args.get(next) {
                Some(arg) => {
                    chars.next();
                    next += 1;
                    out.push_str(&arg.to_string());
                }
                None => out.push('%'),
            },
            // Unknown verb or trailing '%': keep the percent, the following
            // character (if any) is emitted by the next iteration.
            _ => out.push('%'),
        }
    }
    out
}

/// Builds the full line for a record, without a trailing newline.
///
/// Output format: `[timestamp] [file : line] [function] [LEVEL] message`.
#[must_use]
pub fn format_line(record: &LogRecord) -> String {
    let message = render_template(&record.template, &record.args);
    format!(
        "[{}] [{} : {}] [{}] [{}] {}",
        record.timestamp,
        base_name(record.site.file),
        record.site.line,
        record.site.function,
        record.level.name(),
        message
    )
}

/// Reduces a source path to its final component.
///
/// `file!()` yields paths with the host separator, so both kinds are split on.
fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;
    use crate::record::CallSite;

    fn record(template: &str, args: Vec<LogArg>) -> LogRecord {
        LogRecord {
            level: LogLevel::Info,
            timestamp: "2026-01-02 03:04:05:05.678".to_string(),
            site: CallSite {
                file: "src/app/session.rs",
                line: 42,
                function: "app::session::start",
            },
            template: template.to_string(),
            args,
        }
    }

    #[test]
    fn substitutes_arguments_in_order() {
        let out = render_template("x=%d y=%s", &[LogArg::from(5), LogArg::from("ok")]);
        assert_eq!(out, "x=5 y=ok");
    }

    #[test]
    fn verb_without_argument_stays_literal() {
        let out = render_template("a=%d b=%d", &[LogArg::from(1)]);
        assert_eq!(out, "a=1 b=%d");
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        let out = render_template("plain", &[LogArg::from(1), LogArg::from(2)]);
        assert_eq!(out, "plain");
    }

    #[test]
    fn double_percent_is_an_escape() {
        let out = render_template("100%% done", &[]);
        assert_eq!(out, "100% done");
    }

    #[test]
    fn unknown_verb_passes_through() {
        let out = render_template("50%x and 1%", &[LogArg::from(9)]);
        assert_eq!(out, "50%x and 1%");
    }

    #[test]
    fn line_carries_all_fields_in_order() {
        let line = format_line(&record("x=%d", vec![LogArg::from(5)]));
        assert_eq!(
            line,
            "[2026-01-02 03:04:05:05.678] [session.rs : 42] [app::session::start] [INFO] x=5"
        );
    }

    #[test]
    fn file_path_is_reduced_to_base_name() {
        assert_eq!(base_name("src/log/worker.rs"), "worker.rs");
        assert_eq!(base_name(r"src\log\worker.rs"), "worker.rs");
        assert_eq!(base_name("plain.rs"), "plain.rs");
    }
}
