use std::sync::mpsc::{Receiver, SyncSender};

use crate::error::SinkError;
use crate::format::format_line;
use crate::level::LogLevel;
use crate::record::LogRecord;
use crate::rotate::RotatingFile;

/// The single consumer behind a file sink.
///
/// Runs on its own thread, draining the record queue until the queue closes.
/// For each record it renders the line, rotates whichever file is over its
/// limit, appends to the primary, and mirrors `ERROR` and above into the
/// second file.
///
/// I/O failures never reach the producing threads as panics: they are pushed
/// onto the bounded status channel (oldest report wins, the rest are dropped)
/// and the worker keeps going. The one exception is losing a file handle
/// outright, after which there is nothing to write into and the worker stops.
pub struct SinkWorker {
    pub(crate) rx: Receiver<LogRecord>,
    pub(crate) primary: RotatingFile,
    pub(crate) mirror: RotatingFile,
    pub(crate) status: SyncSender<SinkError>,
    pub(crate) done: SyncSender<bool>,
}

impl SinkWorker {
    /// Consumes the queue until it closes, then drops everything it holds.
    ///
    /// Dropping the `done` sender is the completion signal: it is never sent
    /// on, only closed, and both files are closed strictly before that
    /// happens.
    pub fn run(self) {
        let Self {
            rx,
            mut primary,
            mut mirror,
            status,
            done,
        } = self;

        while let Ok(record) = rx.recv() {
            let mut line = format_line(&record);
            line.push('\n');

            if !append_line(&mut primary, &line, &status) {
                break;
            }
            if record.level >= LogLevel::Error && !append_line(&mut mirror, &line, &status) {
                break;
            }
        }

        drop(primary);
        drop(mirror);
        drop(status);
        drop(done);
    }
}

/// Rotates `file` if it is over its limit, then appends one line.
///
/// Returns `false` only when the file handle is gone and the worker should
/// stop; every other failure is reported and absorbed.
fn append_line(file: &mut RotatingFile, line: &str, status: &SyncSender<SinkError>) -> bool {
    if file.over_limit() {
        if let Err(e) = file.rotate() {
            let lost = e.is_handle_loss();
            let _ = status.try_send(e);
            if lost {
                return false;
            }
        }
    }
    match file.append(line) {
        Ok(()) => true,
        Err(e) => {
            let lost = e.is_handle_loss();
            let _ = status.try_send(e);
            !lost
        }
    }
}
