//! crates/logging/src/dispatcher/mod.rs
//! The gate-and-dispatch engine.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use logging_sink::{LogSink, Record};

use crate::config::LoggingConfig;
use crate::error::EmitError;
use crate::levels::Level;
use crate::native::{from_native, to_native};
use crate::policy::LevelPolicy;
use crate::Cause;

mod tiers;

/// Decides per call whether a message is realised and written to the sink.
///
/// The dispatcher owns one mutable value, the configured threshold, held in
/// an atomic so concurrent readers always observe a threshold that some
/// completed [`set_threshold`](Self::set_threshold) call stored. Every other
/// field is fixed at construction.
///
/// Each tier has five entry points, generated for `verbose`, `debug`,
/// `info`, `warn`, `error` and `fatal`:
///
/// | method | message |
/// |--------|---------|
/// | `info(tag, message)` | borrowed text |
/// | `info_with(tag, supplier)` | closure run only when the gate is open |
/// | `info_err(tag, message, cause)` | optional text plus optional error |
/// | `info_with_err(tag, supplier, cause)` | closure plus optional error |
/// | `info_failure(tag, cause)` | the error's own description |
///
/// `tag` accepts a `&str` or an `Option<&str>`; `None` writes an untagged
/// record.
///
/// A suppressed call returns `Ok(0)` without running the supplier, looking
/// at the error, or calling the sink. An accepted call performs exactly one
/// sink write and returns the sink's byte count.
///
/// # Examples
///
/// ```
/// use logging::{Dispatcher, Level};
/// use logging_sink::LineSink;
///
/// let dispatcher = Dispatcher::new(LineSink::new(Vec::new())).with_threshold(Level::Warn);
///
/// assert_eq!(dispatcher.info("net", "connected")?, 0);
/// let written = dispatcher.warn_with("net", || format!("retry {} of {}", 2, 5))?;
/// assert_eq!(written, "W/net: retry 2 of 5\n".len());
/// # Ok::<(), logging::EmitError>(())
/// ```
pub struct Dispatcher<S> {
    policy: LevelPolicy,
    threshold: AtomicU8,
    sink: S,
}

impl<S> Dispatcher<S> {
    /// Creates a dispatcher with the standard policy and a `Suppress`
    /// threshold: nothing is written until a threshold is configured.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self {
            policy: LevelPolicy::STANDARD,
            threshold: AtomicU8::new(Level::Suppress as u8),
            sink,
        }
    }

    /// Creates a dispatcher whose policy and threshold come from `config`.
    #[must_use]
    pub fn from_config(sink: S, config: &LoggingConfig) -> Self {
        let dispatcher = Self::new(sink).with_policy(config.level_policy());
        dispatcher.init_from(config);
        dispatcher
    }

    /// Replaces the rank policy. The current threshold is re-normalized.
    #[must_use]
    pub fn with_policy(mut self, policy: LevelPolicy) -> Self {
        let threshold = self.threshold();
        self.policy = policy;
        self.set_threshold(threshold);
        self
    }

    /// Sets the initial threshold.
    #[must_use]
    pub fn with_threshold(self, level: Level) -> Self {
        self.set_threshold(level);
        self
    }

    /// The rank policy in use.
    #[must_use]
    pub const fn policy(&self) -> &LevelPolicy {
        &self.policy
    }

    /// The sink accepted records are written to.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the dispatcher and returns its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The configured threshold.
    #[must_use]
    pub fn threshold(&self) -> Level {
        // Any stored value is a valid index; the fallback only guards the type.
        Level::from_index(self.threshold.load(Ordering::Relaxed)).unwrap_or(Level::Suppress)
    }

    /// Replaces the threshold for every subsequent call.
    ///
    /// Calls already past their gate check are unaffected.
    pub fn set_threshold(&self, level: Level) {
        let level = self.policy.normalize(level);
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    /// Parses the configured level and installs it as the threshold.
    ///
    /// Repeating the call re-parses and re-sets; an unrecognised or missing
    /// level resolves to `Suppress`. Returns the installed threshold.
    pub fn init_from(&self, config: &LoggingConfig) -> Level {
        let level = self.policy.parse_optional(config.level.as_deref());
        self.set_threshold(level);
        level
    }

    /// Reports whether a call at `level` would pass the gate.
    ///
    /// Sentinels are thresholds, not tiers, and are never enabled.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        !level.is_sentinel() && self.policy.passes_gate(self.threshold(), level)
    }
}

impl<S> Dispatcher<S>
where
    S: LogSink,
{
    /// Emits `message` at `level`.
    ///
    /// `tag` is either a `&str` or an `Option<&str>`; `None` sends the
    /// record untagged.
    pub fn emit<'t>(
        &self,
        level: Level,
        tag: impl Into<Option<&'t str>>,
        message: &str,
    ) -> Result<usize, EmitError> {
        if !self.is_enabled(level) {
            return Ok(0);
        }
        self.write(level, tag.into(), message, None)
    }

    /// Emits the message produced by `message` at `level`.
    ///
    /// The supplier runs at most once, synchronously, and only after the
    /// gate has passed.
    pub fn emit_with<'t, F, M>(
        &self,
        level: Level,
        tag: impl Into<Option<&'t str>>,
        message: F,
    ) -> Result<usize, EmitError>
    where
        F: FnOnce() -> M,
        M: AsRef<str>,
    {
        if !self.is_enabled(level) {
            return Ok(0);
        }
        let message = message();
        self.write(level, tag.into(), message.as_ref(), None)
    }

    /// Emits an optional message together with an optional error.
    ///
    /// When only the error is present its description becomes the message.
    /// When both are absent an accepted call fails with
    /// [`EmitError::MissingMessage`]; a suppressed call still returns `Ok(0)`.
    pub fn emit_err<'t>(
        &self,
        level: Level,
        tag: impl Into<Option<&'t str>>,
        message: Option<&str>,
        cause: Option<Cause<'_>>,
    ) -> Result<usize, EmitError> {
        if !self.is_enabled(level) {
            return Ok(0);
        }
        let tag = tag.into();
        match (message, cause) {
            (Some(message), cause) => self.write(level, tag, message, cause),
            (None, Some(cause)) => self.write(level, tag, &cause.to_string(), Some(cause)),
            (None, None) => Err(EmitError::MissingMessage { level }),
        }
    }

    /// Emits the message produced by `message` together with an optional
    /// error. The supplier follows the same rules as [`emit_with`](Self::emit_with).
    pub fn emit_with_err<'t, F, M>(
        &self,
        level: Level,
        tag: impl Into<Option<&'t str>>,
        message: F,
        cause: Option<Cause<'_>>,
    ) -> Result<usize, EmitError>
    where
        F: FnOnce() -> M,
        M: AsRef<str>,
    {
        if !self.is_enabled(level) {
            return Ok(0);
        }
        let message = message();
        self.write(level, tag.into(), message.as_ref(), cause)
    }

    /// Emits `cause`, using its description as the message.
    pub fn emit_failure<'t>(
        &self,
        level: Level,
        tag: impl Into<Option<&'t str>>,
        cause: Cause<'_>,
    ) -> Result<usize, EmitError> {
        if !self.is_enabled(level) {
            return Ok(0);
        }
        self.write(level, tag.into(), &cause.to_string(), Some(cause))
    }

    /// Emits `message` with a raw native priority.
    ///
    /// The priority is translated to a tier for the gate check. A priority
    /// outside the host's set fails with
    /// [`EmitError::UnrecognizedPriority`] before the gate is consulted, and
    /// nothing is written.
    pub fn println(&self, priority: i32, tag: Option<&str>, message: &str) -> Result<usize, EmitError> {
        let level = from_native(priority)?;
        if !self.is_enabled(level) {
            return Ok(0);
        }
        Ok(self.sink.write(&Record::new(priority, tag, message))?)
    }

    /// Emits `message` at `level`, converting to a native priority only at
    /// the sink boundary.
    pub fn println_level(&self, level: Level, tag: Option<&str>, message: &str) -> Result<usize, EmitError> {
        if !self.is_enabled(level) {
            return Ok(0);
        }
        self.write(level, tag, message, None)
    }

    /// Asks the sink whether it would accept `priority` and `tag`.
    ///
    /// Pass-through only; the threshold is not consulted.
    #[must_use]
    pub fn is_loggable(&self, priority: i32, tag: Option<&str>) -> bool {
        self.sink.is_loggable(priority, tag)
    }

    fn write(
        &self,
        level: Level,
        tag: Option<&str>,
        message: &str,
        cause: Option<Cause<'_>>,
    ) -> Result<usize, EmitError> {
        // Only tiers reach this point and every tier has a native priority.
        let Some(priority) = to_native(level) else {
            return Ok(0);
        };
        let record = Record::new(priority, tag, message).with_cause(cause);
        Ok(self.sink.write(&record)?)
    }
}

impl<S> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("policy", &self.policy)
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging_sink::priority;
    use std::cell::Cell;
    use std::io;
    use test_support::RecordingSink;

    fn dispatcher(threshold: Level) -> Dispatcher<RecordingSink> {
        Dispatcher::new(RecordingSink::new()).with_threshold(threshold)
    }

    #[test]
    fn new_dispatcher_suppresses_everything() {
        let dispatcher = Dispatcher::new(RecordingSink::new());
        assert_eq!(dispatcher.threshold(), Level::Suppress);
        for tier in Level::TIERS {
            assert_eq!(dispatcher.emit(tier, "T", "m").unwrap(), 0);
        }
        assert!(dispatcher.sink().is_empty());
    }

    #[test]
    fn accepted_emit_returns_sink_byte_count() {
        let dispatcher = dispatcher(Level::Warn);
        assert_eq!(dispatcher.emit(Level::Info, "TAG", "hello").unwrap(), 0);
        assert!(dispatcher.sink().is_empty());

        let written = dispatcher.emit(Level::Warn, "TAG", "hello").unwrap();
        assert_eq!(written, "hello".len());

        let records = dispatcher.sink().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].priority, priority::WARN);
        assert_eq!(records[0].tag.as_deref(), Some("TAG"));
        assert_eq!(records[0].message, "hello");
    }

    #[test]
    fn supplier_runs_only_when_gate_is_open() {
        let dispatcher = dispatcher(Level::Error);
        let calls = Cell::new(0);
        let supplier = || {
            calls.set(calls.get() + 1);
            "expensive".to_owned()
        };

        assert_eq!(dispatcher.emit_with(Level::Debug, "T", supplier).unwrap(), 0);
        assert_eq!(calls.get(), 0);

        dispatcher.emit_with(Level::Error, "T", supplier).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn error_only_call_uses_error_description() {
        let dispatcher = dispatcher(Level::Verbose);
        let cause = io::Error::other("connection reset");

        dispatcher.emit_err(Level::Error, "net", None, Some(&cause)).unwrap();
        dispatcher.emit_failure(Level::Error, "net", &cause).unwrap();

        let records = dispatcher.sink().records();
        assert_eq!(records.len(), 2);
        for record in records {
            assert_eq!(record.message, "connection reset");
            assert_eq!(record.cause.as_deref(), Some("connection reset"));
        }
    }

    #[test]
    fn missing_message_and_error_is_rejected_only_when_accepted() {
        let dispatcher = dispatcher(Level::Warn);
        assert_eq!(dispatcher.emit_err(Level::Info, "T", None, None).unwrap(), 0);

        let error = dispatcher
            .emit_err(Level::Warn, "T", None, None)
            .expect_err("precondition failure");
        assert!(matches!(error, EmitError::MissingMessage { level: Level::Warn }));
        assert!(dispatcher.sink().is_empty());
    }

    #[test]
    fn println_rejects_unknown_priority_without_writing() {
        let dispatcher = dispatcher(Level::All);
        let error = dispatcher.println(42, Some("T"), "m").expect_err("unknown priority");
        assert!(error.is_unrecognized_priority());
        assert!(dispatcher.sink().is_empty());
    }

    #[test]
    fn println_forwards_the_raw_priority() {
        let dispatcher = dispatcher(Level::Info);
        assert_eq!(dispatcher.println(priority::DEBUG, None, "quiet").unwrap(), 0);
        dispatcher.println(priority::ERROR, None, "loud").unwrap();

        let records = dispatcher.sink().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].priority, priority::ERROR);
        assert_eq!(records[0].tag, None);
    }

    #[test]
    fn println_level_converts_at_the_sink_boundary() {
        let dispatcher = dispatcher(Level::Verbose);
        dispatcher.println_level(Level::Fatal, Some("T"), "boom").unwrap();
        assert_eq!(dispatcher.sink().records()[0].priority, priority::ASSERT);
    }

    #[test]
    fn sentinel_levels_are_never_emitted() {
        let dispatcher = dispatcher(Level::All);
        assert!(!dispatcher.is_enabled(Level::All));
        assert!(!dispatcher.is_enabled(Level::Suppress));
        assert_eq!(dispatcher.println_level(Level::All, None, "m").unwrap(), 0);
        assert!(dispatcher.sink().is_empty());
    }

    #[test]
    fn set_threshold_takes_effect_immediately() {
        let dispatcher = dispatcher(Level::Suppress);
        assert!(!dispatcher.is_enabled(Level::Fatal));
        dispatcher.set_threshold(Level::Debug);
        assert!(dispatcher.is_enabled(Level::Debug));
        assert!(!dispatcher.is_enabled(Level::Verbose));
    }

    #[test]
    fn init_from_is_idempotent_and_fails_closed() {
        let dispatcher = dispatcher(Level::Verbose);
        let config = LoggingConfig::new("w");
        assert_eq!(dispatcher.init_from(&config), Level::Warn);
        assert_eq!(dispatcher.init_from(&config), Level::Warn);
        assert_eq!(dispatcher.threshold(), Level::Warn);

        assert_eq!(dispatcher.init_from(&LoggingConfig::default()), Level::Suppress);
        assert_eq!(dispatcher.threshold(), Level::Suppress);
    }

    #[test]
    fn simple_policy_normalizes_all_threshold() {
        let dispatcher = Dispatcher::new(RecordingSink::new())
            .with_policy(LevelPolicy::SIMPLE)
            .with_threshold(Level::All);
        assert_eq!(dispatcher.threshold(), Level::Verbose);
        assert!(dispatcher.is_enabled(Level::Verbose));
    }

    #[test]
    fn is_loggable_is_a_sink_pass_through() {
        let dispatcher = dispatcher(Level::Suppress);
        assert!(dispatcher.is_loggable(priority::VERBOSE, Some("T")));
    }

    #[test]
    fn debug_shows_policy_and_threshold() {
        let debug = format!("{:?}", dispatcher(Level::Info));
        assert!(debug.contains("Dispatcher"));
        assert!(debug.contains("Info"));
    }
}
