use std::sync::RwLock;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

use crate::record::LogRecord;

/// Bounded, lossy hand-off between producer threads and the sink worker.
///
/// Enqueueing never blocks: when the queue is at capacity the record is
/// dropped on the spot. A slow or stalled disk therefore costs producers an
/// allocation at most, never a wait.
///
/// [`close`](Self::close) drops the sending half. Records already buffered
/// stay readable on the receiver until drained, which is what gives shutdown
/// its "close, then finish writing" order.
pub struct RecordQueue {
    tx: RwLock<Option<SyncSender<LogRecord>>>,
}

impl RecordQueue {
    /// Creates a queue holding at most `capacity` records, and the receiving
    /// end for the worker. A capacity of 0 is raised to 1.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, Receiver<LogRecord>) {
        let (tx, rx) = sync_channel(capacity.max(1));
        (
            Self {
                tx: RwLock::new(Some(tx)),
            },
            rx,
        )
    }

    /// Attempts to enqueue a record without blocking.
    ///
    /// Returns `false` when the record was dropped, either because the queue
    /// is full or because it has been closed.
    pub fn enqueue(&self, record: LogRecord) -> bool {
        match self.tx.read() {
            Ok(guard) => guard
                .as_ref()
                .is_some_and(|tx| tx.try_send(record).is_ok()),
            Err(_) => false,
        }
    }

    /// Closes the queue for new records. Idempotent.
    pub fn close(&self) {
        if let Ok(mut guard) = self.tx.write() {
            *guard = None;
        }
    }

    /// True once [`close`](Self::close) has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match self.tx.read() {
            Ok(guard) => guard.is_none(),
            Err(_) => true,
        }
    }
}
