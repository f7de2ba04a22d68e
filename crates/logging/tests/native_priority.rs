//! Integration tests for native priority translation and end-to-end output.

use std::error::Error;
use std::fmt;

use logging::{Dispatcher, EmitError, Level, UnknownPriority, from_native, to_native};
use logging_sink::{LineSink, priority};
use proptest::prelude::*;
use test_support::RecordingSink;

#[derive(Debug)]
struct Wrapped {
    source: std::io::Error,
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("config reload failed")
    }
}

impl Error for Wrapped {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

// ============================================================================
// Translation tables
// ============================================================================

#[test]
fn round_trip_holds_for_all_tiers_but_fatal() {
    for tier in Level::TIERS {
        let native = to_native(tier).unwrap();
        let back = from_native(native).unwrap();
        if tier == Level::Fatal {
            assert_eq!(back, Level::Assert);
        } else {
            assert_eq!(back, tier);
        }
    }
}

#[test]
fn every_native_priority_round_trips() {
    for native in priority::ALL {
        let level = from_native(native).unwrap();
        assert_eq!(to_native(level), Some(native));
    }
}

#[test]
fn unknown_priority_is_reported_not_written() {
    let dispatcher = Dispatcher::new(RecordingSink::new()).with_threshold(Level::All);

    let error = dispatcher.println(99, Some("T"), "m").unwrap_err();
    assert!(matches!(
        error,
        EmitError::UnrecognizedPriority(UnknownPriority(99))
    ));
    assert_eq!(error.to_string(), "unrecognized native priority 99");
    assert!(dispatcher.sink().is_empty());
}

#[test]
fn raw_priority_is_checked_before_the_gate() {
    let dispatcher = Dispatcher::new(RecordingSink::new());
    assert!(dispatcher.println(-1, None, "m").unwrap_err().is_unrecognized_priority());
    assert_eq!(dispatcher.println(priority::ERROR, None, "m").unwrap(), 0);
}

proptest! {
    #[test]
    fn from_native_never_panics(native in any::<i32>()) {
        match from_native(native) {
            Ok(level) => {
                prop_assert!(priority::is_known(native));
                prop_assert!(!level.is_sentinel());
            }
            Err(error) => {
                prop_assert!(!priority::is_known(native));
                prop_assert_eq!(error.priority(), native);
            }
        }
    }
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn warn_threshold_drops_info_and_writes_warn() {
    let dispatcher = Dispatcher::new(LineSink::new(Vec::new())).with_threshold(Level::Warn);

    assert_eq!(dispatcher.info("TAG", "hello").unwrap(), 0);
    let written = dispatcher.warn("TAG", "hello").unwrap();

    let output = String::from_utf8(dispatcher.into_sink().into_inner()).unwrap();
    assert_eq!(output, "W/TAG: hello\n");
    assert_eq!(written, output.len());
}

#[test]
fn error_only_call_writes_description_and_trace() {
    let dispatcher = Dispatcher::new(LineSink::new(Vec::new())).with_threshold(Level::Error);
    let failure = Wrapped {
        source: std::io::Error::other("permission denied"),
    };

    dispatcher.error_failure("cfg", &failure).unwrap();

    let output = String::from_utf8(dispatcher.into_sink().into_inner()).unwrap();
    assert_eq!(
        output,
        "E/cfg: config reload failed\nconfig reload failed\nCaused by: permission denied\n"
    );
}

#[test]
fn fatal_is_written_with_the_assert_priority() {
    let dispatcher = Dispatcher::new(LineSink::new(Vec::new())).with_threshold(Level::Assert);
    dispatcher.fatal("core", "invariant broken").unwrap();

    let output = String::from_utf8(dispatcher.into_sink().into_inner()).unwrap();
    assert_eq!(output, "A/core: invariant broken\n");
}

#[test]
fn println_without_tag_omits_it() {
    let dispatcher = Dispatcher::new(LineSink::new(Vec::new())).with_threshold(Level::Info);
    dispatcher.println(priority::INFO, None, "untagged").unwrap();
    dispatcher.println_level(Level::Error, Some("T"), "tagged").unwrap();

    let output = String::from_utf8(dispatcher.into_sink().into_inner()).unwrap();
    assert_eq!(output, "I: untagged\nE/T: tagged\n");
}
