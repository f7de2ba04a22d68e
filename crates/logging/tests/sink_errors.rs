//! Integration tests for sink failure propagation.

use std::io;

use logging::{Dispatcher, EmitError, Level};
use logging_sink::{LineSink, SinkError};
use test_support::FailingSink;

#[test]
fn sink_failure_reaches_the_caller_unchanged() {
    let dispatcher = Dispatcher::new(FailingSink::new("quota exceeded")).with_threshold(Level::Info);

    let error = dispatcher.warn("T", "m").unwrap_err();
    match error {
        EmitError::Sink(SinkError::Rejected(reason)) => assert_eq!(reason, "quota exceeded"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(dispatcher.sink().attempts(), 1);
}

#[test]
fn suppressed_calls_never_touch_a_failing_sink() {
    let dispatcher = Dispatcher::new(FailingSink::new("down")).with_threshold(Level::Error);

    assert_eq!(dispatcher.info("T", "m").unwrap(), 0);
    assert_eq!(dispatcher.warn_with("T", || "m").unwrap(), 0);
    assert_eq!(dispatcher.debug_err("T", None, None).unwrap(), 0);
    assert_eq!(dispatcher.sink().attempts(), 0);
}

#[test]
fn each_accepted_call_writes_once() {
    let dispatcher = Dispatcher::new(FailingSink::new("down")).with_threshold(Level::Verbose);
    for _ in 0..3 {
        assert!(dispatcher.error("T", "m").is_err());
    }
    assert_eq!(dispatcher.sink().attempts(), 3);
}

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn writer_errors_surface_as_io_sink_errors() {
    let dispatcher = Dispatcher::new(LineSink::new(BrokenPipe)).with_threshold(Level::Verbose);
    let error = dispatcher.info("T", "m").unwrap_err();
    match error {
        EmitError::Sink(SinkError::Io(source)) => {
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_message_is_reported_before_the_sink() {
    let dispatcher = Dispatcher::new(FailingSink::new("down")).with_threshold(Level::Info);
    let error = dispatcher.info_err("T", None, None).unwrap_err();
    assert!(matches!(error, EmitError::MissingMessage { level: Level::Info }));
    assert_eq!(dispatcher.sink().attempts(), 0);
}
