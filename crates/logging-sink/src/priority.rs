//! crates/logging-sink/src/priority.rs
//! Native priority encoding of the host log sink.
//!
//! The values match the host platform's logging API, where larger numbers are
//! more severe and `ASSERT` is the top priority. These are the only integers a
//! sink understands; the facade's own severity tiers are translated into them
//! at the sink boundary.

/// Most detailed output, usually disabled in release builds.
pub const VERBOSE: i32 = 2;
/// Debugging output.
pub const DEBUG: i32 = 3;
/// Informational output.
pub const INFO: i32 = 4;
/// Recoverable problems.
pub const WARN: i32 = 5;
/// Failures.
pub const ERROR: i32 = 6;
/// Conditions that should never happen.
pub const ASSERT: i32 = 7;

/// Every priority the host sink recognises, least severe first.
pub const ALL: [i32; 6] = [VERBOSE, DEBUG, INFO, WARN, ERROR, ASSERT];

/// Reports whether `priority` is one of the host's native priorities.
///
/// # Examples
///
/// ```
/// use logging_sink::priority;
///
/// assert!(priority::is_known(priority::WARN));
/// assert!(!priority::is_known(1));
/// assert!(!priority::is_known(8));
/// ```
#[must_use]
pub const fn is_known(priority: i32) -> bool {
    matches!(priority, VERBOSE..=ASSERT)
}

/// Single-letter label used when rendering a record as a line.
///
/// Unknown priorities render as `'?'`.
#[must_use]
pub const fn label(priority: i32) -> char {
    match priority {
        VERBOSE => 'V',
        DEBUG => 'D',
        INFO => 'I',
        WARN => 'W',
        ERROR => 'E',
        ASSERT => 'A',
        _ => '?',
    }
}
