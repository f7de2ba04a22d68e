//! crates/logging-sink/src/error.rs
//! Failures reported by sinks.

use std::io;

/// Error returned when a sink fails to record an accepted log entry.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The underlying writer reported an I/O failure.
    #[error("log sink write failed: {0}")]
    Io(#[from] io::Error),

    /// A previous writer panicked while holding the sink's lock.
    #[error("log sink lock poisoned by a panicking writer")]
    Poisoned,

    /// The message cannot be represented by the backend (for example an
    /// embedded NUL byte handed to syslog).
    #[error("log message cannot be encoded for this sink")]
    InvalidMessage,

    /// The backend refused the record.
    #[error("log sink rejected the record: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_error_converts_and_keeps_source() {
        let error = SinkError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert!(matches!(error, SinkError::Io(_)));
        assert!(error.to_string().contains("pipe closed"));
        assert_eq!(error.source().unwrap().to_string(), "pipe closed");
    }

    #[test]
    fn rejected_includes_reason() {
        let error = SinkError::Rejected("quota exceeded".to_owned());
        assert_eq!(
            error.to_string(),
            "log sink rejected the record: quota exceeded"
        );
    }
}
