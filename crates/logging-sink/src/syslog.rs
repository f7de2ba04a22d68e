//! Syslog backend built on libc `openlog`/`syslog`/`closelog`.
//!
//! Native priorities are translated to syslog severities at write time.
//!
//! syslog(3) keeps a single connection per process. Every [`SyslogSink`]
//! shares it: the first [`SyslogConfig::open`] sets the ident, and the
//! connection is closed when the last open sink is dropped.

use std::ffi::CString;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::SinkError;
use crate::priority;
use crate::record::Record;
use crate::sink::LogSink;
use crate::trace::render_trace;

/// Syslog facility codes matching the POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// User-level messages (LOG_USER), the default for applications.
    #[default]
    User = libc::LOG_USER,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (LOG_AUTH).
    Auth = libc::LOG_AUTH,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Parses a facility name. Matching is case-insensitive.
    ///
    /// Returns `None` for unrecognised names.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("unknown"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "auth" => Some(Self::Auth),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    /// Returns the lowercase facility name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Auth => "auth",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default ident passed to `openlog(3)`.
pub const DEFAULT_SYSLOG_TAG: &str = "gatelog";

/// Facility and ident used when opening the syslog connection.
///
/// # Examples
///
/// ```
/// use logging_sink::syslog::{SyslogConfig, SyslogFacility};
///
/// let config = SyslogConfig::new(SyslogFacility::Local5, "my-app");
/// assert_eq!(config.facility(), SyslogFacility::Local5);
/// assert_eq!(config.tag(), "my-app");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    tag: String,
}

impl SyslogConfig {
    /// Creates a configuration with the given facility and ident.
    pub fn new(facility: SyslogFacility, tag: impl Into<String>) -> Self {
        Self {
            facility,
            tag: tag.into(),
        }
    }

    /// Returns the configured facility.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured ident.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Opens the syslog connection and returns a sink bound to it.
    ///
    /// The ident of the first call is kept for the process lifetime because
    /// syslog(3) stores the pointer; later calls reuse it and only update
    /// the facility.
    pub fn open(&self) -> SyslogSink {
        static IDENT: OnceLock<Option<CString>> = OnceLock::new();
        let ident = IDENT.get_or_init(|| {
            CString::new(self.tag.as_str())
                .or_else(|_| CString::new(DEFAULT_SYSLOG_TAG))
                .ok()
        });
        let ident_ptr = ident.as_ref().map_or(std::ptr::null(), |ident| ident.as_ptr());
        let facility = self.facility as libc::c_int;

        CONNECTIONS.acquire(|| {
            // SAFETY: the ident pointer is either null (syslog then uses the
            // program name) or points into a static `OnceLock<CString>` that
            // lives for the rest of the process.
            unsafe {
                libc::openlog(ident_ptr, libc::LOG_PID, facility);
            }
        });

        SyslogSink {
            _guard: SyslogGuard { _private: () },
        }
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_TAG)
    }
}

/// Syslog severities matching POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// Critical conditions (LOG_CRIT).
    Critical = libc::LOG_CRIT,
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl SyslogPriority {
    /// Translates a native priority into a syslog severity.
    ///
    /// Syslog has no level below `LOG_DEBUG`, so `VERBOSE` and `DEBUG` share
    /// it. Unknown priorities yield `None`.
    pub const fn from_native(native: i32) -> Option<Self> {
        match native {
            priority::VERBOSE | priority::DEBUG => Some(Self::Debug),
            priority::INFO => Some(Self::Info),
            priority::WARN => Some(Self::Warning),
            priority::ERROR => Some(Self::Error),
            priority::ASSERT => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Sends `message` to syslog(3) with `priority` and returns its length.
///
/// Messages with embedded NUL bytes cannot be passed to syslog and are
/// reported as [`SinkError::InvalidMessage`].
pub fn syslog_message(priority: SyslogPriority, message: &str) -> Result<usize, SinkError> {
    let c_message = CString::new(message).map_err(|_| SinkError::InvalidMessage)?;

    // SAFETY: syslog is thread-safe once openlog has completed. `%s` keeps
    // `%` in the message from being read as a format directive, and both
    // strings are valid NUL-terminated C strings.
    unsafe {
        libc::syslog(priority as libc::c_int, c"%s".as_ptr(), c_message.as_ptr());
    }
    Ok(message.len())
}

/// Sink that forwards records to syslog(3).
///
/// Created by [`SyslogConfig::open`]. Dropping the last open sink closes
/// the connection.
#[derive(Debug)]
pub struct SyslogSink {
    _guard: SyslogGuard,
}

impl LogSink for SyslogSink {
    fn write(&self, record: &Record<'_>) -> Result<usize, SinkError> {
        let severity = SyslogPriority::from_native(record.priority()).ok_or_else(|| {
            SinkError::Rejected(format!("no syslog severity for priority {}", record.priority()))
        })?;

        let mut line = match record.tag() {
            Some(tag) => format!("[{tag}] {}", record.message()),
            None => record.message().to_owned(),
        };
        if let Some(cause) = record.cause() {
            line.push('\n');
            line.push_str(&render_trace(cause));
        }
        syslog_message(severity, &line)
    }

    fn is_loggable(&self, priority: i32, _tag: Option<&str>) -> bool {
        SyslogPriority::from_native(priority).is_some()
    }
}

static CONNECTIONS: Connections = Connections::new();

/// Number of live sinks sharing the process-wide syslog connection.
#[derive(Debug)]
struct Connections {
    open: Mutex<usize>,
}

impl Connections {
    const fn new() -> Self {
        Self {
            open: Mutex::new(0),
        }
    }

    /// Runs `open` and records one more user of the connection.
    fn acquire(&self, open: impl FnOnce()) {
        let mut count = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        open();
        *count += 1;
    }

    /// Releases one user and runs `close` once nobody is left.
    fn release(&self, close: impl FnOnce()) {
        let mut count = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        *count = count.saturating_sub(1);
        if *count == 0 {
            close();
        }
    }
}

#[derive(Debug)]
struct SyslogGuard {
    _private: (),
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        CONNECTIONS.release(|| {
            // SAFETY: closelog has no preconditions; the count reaching zero
            // means no other sink still writes through the connection.
            unsafe {
                libc::closelog();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_facility_is_user() {
        assert_eq!(SyslogFacility::default(), SyslogFacility::User);
    }

    #[test]
    fn from_name_is_case_insensitive_and_round_trips() {
        let facilities = [
            SyslogFacility::User,
            SyslogFacility::Daemon,
            SyslogFacility::Auth,
            SyslogFacility::Local0,
            SyslogFacility::Local7,
        ];
        for facility in facilities {
            assert_eq!(SyslogFacility::from_name(facility.as_str()), Some(facility));
            let upper = facility.as_str().to_ascii_uppercase();
            assert_eq!(SyslogFacility::from_name(&upper), Some(facility));
        }
        assert_eq!(SyslogFacility::from_name("local8"), None);
        assert_eq!(SyslogFacility::from_name(""), None);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(SyslogFacility::Local3.to_string(), "local3");
    }

    #[test]
    fn config_default_uses_default_tag() {
        let config = SyslogConfig::default();
        assert_eq!(config.facility(), SyslogFacility::User);
        assert_eq!(config.tag(), DEFAULT_SYSLOG_TAG);
    }

    #[test]
    fn native_priorities_map_onto_syslog_severities() {
        assert_eq!(SyslogPriority::from_native(priority::VERBOSE), Some(SyslogPriority::Debug));
        assert_eq!(SyslogPriority::from_native(priority::DEBUG), Some(SyslogPriority::Debug));
        assert_eq!(SyslogPriority::from_native(priority::INFO), Some(SyslogPriority::Info));
        assert_eq!(SyslogPriority::from_native(priority::WARN), Some(SyslogPriority::Warning));
        assert_eq!(SyslogPriority::from_native(priority::ERROR), Some(SyslogPriority::Error));
        assert_eq!(SyslogPriority::from_native(priority::ASSERT), Some(SyslogPriority::Critical));
        assert_eq!(SyslogPriority::from_native(1), None);
    }

    #[test]
    fn priority_values_match_libc_constants() {
        assert_eq!(SyslogPriority::Critical as i32, libc::LOG_CRIT);
        assert_eq!(SyslogPriority::Error as i32, libc::LOG_ERR);
        assert_eq!(SyslogPriority::Warning as i32, libc::LOG_WARNING);
        assert_eq!(SyslogPriority::Info as i32, libc::LOG_INFO);
        assert_eq!(SyslogPriority::Debug as i32, libc::LOG_DEBUG);
    }

    #[test]
    fn sink_writes_and_reports_length() {
        let sink = SyslogConfig::new(SyslogFacility::User, "gatelog-tests").open();
        let written = sink
            .write(&Record::new(priority::INFO, Some("T"), "syslog test %d"))
            .expect("syslog accepts message");
        assert_eq!(written, "[T] syslog test %d".len());
    }

    #[test]
    fn nul_bytes_are_rejected() {
        let _sink = SyslogConfig::default().open();
        let error = syslog_message(SyslogPriority::Info, "before\0after").expect_err("nul rejected");
        assert!(matches!(error, SinkError::InvalidMessage));
    }

    #[test]
    fn unknown_priority_is_rejected_and_not_loggable() {
        let sink = SyslogConfig::default().open();
        assert!(!sink.is_loggable(99, None));
        let error = sink
            .write(&Record::new(99, None, "m"))
            .expect_err("unknown priority rejected");
        assert!(matches!(error, SinkError::Rejected(_)));
    }

    #[test]
    fn connection_closes_only_after_the_last_release() {
        let connections = Connections::new();
        let mut opened = 0;
        let mut closed = 0;

        connections.acquire(|| opened += 1);
        connections.acquire(|| opened += 1);
        connections.release(|| closed += 1);
        assert_eq!(closed, 0);
        connections.release(|| closed += 1);
        assert_eq!((opened, closed), (2, 1));
        assert_eq!(*connections.open.lock().unwrap(), 0);
    }

    #[test]
    fn dropping_one_sink_leaves_the_other_writable() {
        let first = SyslogConfig::default().open();
        let second = SyslogConfig::new(SyslogFacility::Local0, "ignored-ident").open();
        drop(first);
        let written = second
            .write(&Record::new(priority::WARN, None, "still open"))
            .expect("shared connection stays usable");
        assert_eq!(written, "still open".len());
    }
}
