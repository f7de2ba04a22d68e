//! Test doubles shared by the workspace's test suites.
//!
//! [`RecordingSink`] keeps every record it receives, [`FailingSink`] rejects
//! every write, and [`CountingSupplier`] counts how often a lazy message was
//! actually built.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging_sink::{LogSink, Record, SinkError, render_trace};

/// Owned copy of a [`Record`] captured by [`RecordingSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captured {
    /// Native priority.
    pub priority: i32,
    /// Tag, if the call carried one.
    pub tag: Option<String>,
    /// Message text.
    pub message: String,
    /// Display text of the attached error.
    pub cause: Option<String>,
    /// Rendered trace of the attached error, causes included.
    pub trace: Option<String>,
}

impl Captured {
    fn from_record(record: &Record<'_>) -> Self {
        Self {
            priority: record.priority(),
            tag: record.tag().map(str::to_owned),
            message: record.message().to_owned(),
            cause: record.cause().map(ToString::to_string),
            trace: record.cause().map(render_trace),
        }
    }
}

/// Sink that stores every record in memory.
///
/// Each write reports the message length as its byte count unless a fixed
/// count was configured with [`with_reply`](Self::with_reply).
#[derive(Debug)]
pub struct RecordingSink {
    records: Mutex<Vec<Captured>>,
    reply: Option<usize>,
    loggable: AtomicBool,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSink {
    /// Empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            reply: None,
            loggable: AtomicBool::new(true),
        }
    }

    /// Reports `bytes` from every write.
    #[must_use]
    pub fn with_reply(mut self, bytes: usize) -> Self {
        self.reply = Some(bytes);
        self
    }

    /// Sets the answer returned by [`LogSink::is_loggable`].
    pub fn set_loggable(&self, loggable: bool) {
        self.loggable.store(loggable, Ordering::Relaxed);
    }

    /// Snapshot of the captured records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<Captured> {
        self.lock().clone()
    }

    /// Messages of the captured records, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|record| record.message.clone()).collect()
    }

    /// Number of captured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every captured record.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Captured>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for RecordingSink {
    fn write(&self, record: &Record<'_>) -> Result<usize, SinkError> {
        let captured = Captured::from_record(record);
        let bytes = self.reply.unwrap_or(captured.message.len());
        self.lock().push(captured);
        Ok(bytes)
    }

    fn is_loggable(&self, _priority: i32, _tag: Option<&str>) -> bool {
        self.loggable.load(Ordering::Relaxed)
    }
}

/// Sink whose writes always fail with [`SinkError::Rejected`].
#[derive(Debug)]
pub struct FailingSink {
    reason: String,
    attempts: AtomicUsize,
}

impl FailingSink {
    /// Sink rejecting every record with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of writes attempted so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl LogSink for FailingSink {
    fn write(&self, _record: &Record<'_>) -> Result<usize, SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::Rejected(self.reason.clone()))
    }
}

/// Produces message suppliers and counts how many of them ran.
#[derive(Debug)]
pub struct CountingSupplier {
    message: String,
    calls: AtomicUsize,
}

impl CountingSupplier {
    /// Suppliers built from this value return `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// A one-shot supplier that bumps the call count when run.
    pub fn supplier(&self) -> impl FnOnce() -> String + '_ {
        move || {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.message.clone()
        }
    }

    /// Number of suppliers that ran.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
