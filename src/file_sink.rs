use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, sync_channel};
use std::thread::{self, JoinHandle};

use crate::config::{Config, SinkOptions};
use crate::error::{Result, SinkError};
use crate::level::LogLevel;
use crate::queue::RecordQueue;
use crate::record::{CallSite, LogArg, LogRecord};
use crate::rotate::RotatingFile;
use crate::sink::LogSink;
use crate::worker::SinkWorker;

/// Reports the worker can hold before further ones are dropped. One is enough
/// to learn the sink is unhealthy; a backlog of identical failures is not.
const STATUS_CAPACITY: usize = 16;

/// Bounded, non-blocking logger that writes to a pair of files.
///
/// # Architecture
///
/// 1. **Producers**: application threads call [`log`](LogSink::log) (usually
///    through the `sink_*` macros). Records below the minimum level return
///    immediately; the rest are stamped and enqueued without blocking. A full
///    queue drops the record.
/// 2. **Queue**: a bounded channel buffers records, preserving arrival order.
/// 3. **Consumer**: one background thread renders each record and appends it
///    to the primary file, mirroring `ERROR` and above into `<name>.err`.
///    Either file is rotated to `<path>_<unixSeconds>.back` when it reaches
///    the size limit.
///
/// # Shutdown
///
/// [`close_chan`](Self::close_chan) stops intake; records already queued are
/// still written. [`exit`](Self::exit) blocks until the worker has finished
/// and closed both files. [`close`](Self::close) does both in one call by
/// joining the worker thread. Logging after shutdown is a silent no-op.
///
/// # Failure
///
/// Worker-side I/O failures never panic and never surface to producers
/// mid-call; the most recent ones are queued for [`take_error`](Self::take_error).
/// Only the constructor reports errors eagerly, so a sink that starts is a
/// sink that was able to open its files.
pub struct FileLogger {
    level: LogLevel,
    queue: RecordQueue,
    exit_rx: Mutex<Receiver<bool>>,
    status_rx: Mutex<Receiver<SinkError>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    file_path: PathBuf,
}

impl FileLogger {
    /// Starts a file sink with default size and capacity limits.
    ///
    /// `level_str` is parsed case-insensitively; unrecognized names fall back
    /// to `DEBUG`. The directory is created if missing, and both the primary
    /// file and its `.err` mirror are opened before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::CreateDirectory`], [`SinkError::Open`] or
    /// [`SinkError::Spawn`] when the sink cannot be brought up.
    pub fn new(
        level_str: &str,
        directory: impl AsRef<Path>,
        file_name: impl Into<String>,
    ) -> Result<Self> {
        let options = SinkOptions {
            min_level: LogLevel::parse(level_str),
            directory: directory.as_ref().to_path_buf(),
            file_name: file_name.into(),
            ..SinkOptions::default()
        };
        Self::with_options(options)
    }

    /// Starts a file sink from a loaded config's `[logging]` section.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`with_options`](Self::with_options).
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_options(SinkOptions::from_config(config))
    }

    /// Starts a file sink with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::CreateDirectory`] if the directory cannot be
    /// created, [`SinkError::Open`] if either file cannot be opened, or
    /// [`SinkError::Spawn`] if the worker thread cannot start.
    pub fn with_options(options: SinkOptions) -> Result<Self> {
        fs::create_dir_all(&options.directory).map_err(|e| SinkError::CreateDirectory {
            path: options.directory.clone(),
            source: e,
        })?;

        let file_path = options.directory.join(&options.file_name);
        let mut err_name = file_path.clone().into_os_string();
        err_name.push(".err");
        let err_path = PathBuf::from(err_name);

        let primary = RotatingFile::open(file_path.clone(), options.max_file_size)?;
        let mirror = RotatingFile::open(err_path, options.max_file_size)?;

        let (queue, rx) = RecordQueue::bounded(options.queue_capacity);
        let (status_tx, status_rx) = sync_channel(STATUS_CAPACITY);
        let (done_tx, exit_rx) = sync_channel::<bool>(1);

        let worker = SinkWorker {
            rx,
            primary,
            mirror,
            status: status_tx,
            done: done_tx,
        };
        let handle = thread::Builder::new()
            .name("logger-worker".into())
            .spawn(move || worker.run())
            .map_err(SinkError::Spawn)?;

        Ok(Self {
            level: options.min_level,
            queue,
            exit_rx: Mutex::new(exit_rx),
            status_rx: Mutex::new(status_rx),
            worker: Mutex::new(Some(handle)),
            file_path,
        })
    }

    /// Stops intake. Queued records are still written; later log calls are
    /// dropped silently. Idempotent.
    pub fn close_chan(&self) {
        self.queue.close();
    }

    /// Blocks until the worker has drained the queue and closed both files.
    ///
    /// Returns the pair read from the completion channel: `(false, false)`
    /// once the worker is gone. Call [`close_chan`](Self::close_chan) first,
    /// or this blocks for as long as the sink keeps accepting records.
    pub fn exit(&self) -> (bool, bool) {
        match self.exit_rx.lock() {
            Ok(rx) => match rx.recv() {
                Ok(v) => (v, true),
                Err(_) => (false, false),
            },
            Err(_) => (false, false),
        }
    }

    /// Stops intake and waits for the worker to finish. Idempotent, and safe
    /// to call from several threads at once: a caller that finds the join
    /// handle already taken waits on the completion channel instead.
    pub fn close(&self) {
        self.queue.close();
        let handle = match self.worker.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        match handle {
            Some(handle) => {
                let _ = handle.join();
            }
            // Another close holds the join handle; wait on the completion
            // channel instead.
            None => {
                let _ = self.exit();
            }
        }
    }

    /// Takes the oldest unreported worker-side failure, if any.
    pub fn take_error(&self) -> Option<SinkError> {
        self.status_rx.lock().ok().and_then(|rx| rx.try_recv().ok())
    }

    /// Returns the path of the active primary log file.
    ///
    /// Useful for debugging or displaying the log location to the user.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the configured minimum level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl LogSink for FileLogger {
    fn log(&self, level: LogLevel, site: CallSite, template: &str, args: Vec<LogArg>) {
        if level < self.level {
            return;
        }
        let record = LogRecord::capture(level, site, template, args);
        self.queue.enqueue(record);
    }

    fn close(&self) {
        FileLogger::close(self);
    }
}
