//! crates/logging-sink/src/record.rs
//! The unit of work handed to a sink.

use std::error::Error;
use std::fmt;

/// A fully realised log entry that passed the severity gate.
///
/// Records borrow everything they carry; sinks that need to keep the data
/// must copy it.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    priority: i32,
    tag: Option<&'a str>,
    message: &'a str,
    cause: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Record<'a> {
    /// Creates a record without an attached error.
    #[must_use]
    pub const fn new(priority: i32, tag: Option<&'a str>, message: &'a str) -> Self {
        Self {
            priority,
            tag,
            message,
            cause: None,
        }
    }

    /// Attaches an optional error whose trace the sink should render.
    #[must_use]
    pub const fn with_cause(mut self, cause: Option<&'a (dyn Error + 'static)>) -> Self {
        self.cause = cause;
        self
    }

    /// Native priority of the record.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Tag identifying the call site, if any.
    #[must_use]
    pub const fn tag(&self) -> Option<&'a str> {
        self.tag
    }

    /// Message text.
    #[must_use]
    pub const fn message(&self) -> &'a str {
        self.message
    }

    /// Error attached to the record, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&'a (dyn Error + 'static)> {
        self.cause
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("priority", &self.priority)
            .field("tag", &self.tag)
            .field("message", &self.message)
            .field("cause", &self.cause.map(ToString::to_string))
            .finish()
    }
}
