//! crates/logging/src/facade.rs
//! Process-wide dispatcher and the free functions that log through it.
//!
//! The surrounding application builds one [`GlobalDispatcher`] at startup
//! and hands it to [`install`]. Until then every emission returns `Ok(0)`:
//! an unconfigured process logs nothing.
//!
//! ```
//! use logging::{facade, Level, LoggingConfig};
//! use logging_sink::LineSink;
//!
//! facade::install_sink(LineSink::new(std::io::sink()), &LoggingConfig::new("i"))?;
//! assert_eq!(facade::threshold(), Level::Info);
//!
//! facade::info("startup", "listening")?;
//! logging::log_debug!("startup", "{} workers", 4)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::OnceLock;

use logging_sink::LogSink;

use crate::config::{LoggingConfig, StringTable};
use crate::dispatcher::Dispatcher;
use crate::error::EmitError;
use crate::levels::Level;
use crate::Cause;

/// The dispatcher type held process-wide.
pub type GlobalDispatcher = Dispatcher<Box<dyn LogSink>>;

static DISPATCHER: OnceLock<GlobalDispatcher> = OnceLock::new();

/// Returned by [`install`] when a dispatcher is already in place.
///
/// Carries the rejected dispatcher so its sink is not lost.
#[derive(Debug, thiserror::Error)]
#[error("a process-wide dispatcher is already installed")]
pub struct AlreadyInstalled(pub GlobalDispatcher);

impl AlreadyInstalled {
    /// Returns the dispatcher that was not installed.
    #[must_use]
    pub fn into_inner(self) -> GlobalDispatcher {
        self.0
    }
}

/// Installs the process-wide dispatcher. Only the first call succeeds.
pub fn install(dispatcher: GlobalDispatcher) -> Result<(), AlreadyInstalled> {
    DISPATCHER.set(dispatcher).map_err(AlreadyInstalled)
}

/// Builds a dispatcher over `sink` from `config` and installs it.
pub fn install_sink<S>(sink: S, config: &LoggingConfig) -> Result<(), AlreadyInstalled>
where
    S: LogSink + 'static,
{
    let sink: Box<dyn LogSink> = Box::new(sink);
    install(Dispatcher::from_config(sink, config))
}

/// The installed dispatcher, if any.
#[must_use]
pub fn global() -> Option<&'static GlobalDispatcher> {
    DISPATCHER.get()
}

/// Reports whether a dispatcher has been installed.
#[must_use]
pub fn is_installed() -> bool {
    DISPATCHER.get().is_some()
}

/// Re-seeds the installed dispatcher's threshold from `config`.
///
/// Returns `false` when nothing is installed. The policy chosen at install
/// time is kept; only the level is re-read.
pub fn init(config: &LoggingConfig) -> bool {
    let Some(dispatcher) = global() else {
        return false;
    };
    dispatcher.init_from(config);
    true
}

/// Like [`init`], reading the configuration from `table`.
pub fn init_from_table(table: &dyn StringTable) -> bool {
    init(&LoggingConfig::from_table(table))
}

/// Replaces the installed dispatcher's threshold.
///
/// Returns `false` when nothing is installed.
pub fn set_threshold(level: Level) -> bool {
    let Some(dispatcher) = global() else {
        return false;
    };
    dispatcher.set_threshold(level);
    true
}

/// The installed dispatcher's threshold, `Suppress` when nothing is
/// installed.
#[must_use]
pub fn threshold() -> Level {
    global().map_or(Level::Suppress, Dispatcher::threshold)
}

/// Reports whether a call at `level` would currently be written.
#[must_use]
pub fn is_enabled(level: Level) -> bool {
    global().is_some_and(|dispatcher| dispatcher.is_enabled(level))
}

/// See [`Dispatcher::emit`].
pub fn emit<'t>(
    level: Level,
    tag: impl Into<Option<&'t str>>,
    message: &str,
) -> Result<usize, EmitError> {
    global().map_or(Ok(0), |dispatcher| dispatcher.emit(level, tag, message))
}

/// See [`Dispatcher::emit_with`].
pub fn emit_with<'t, F, M>(
    level: Level,
    tag: impl Into<Option<&'t str>>,
    message: F,
) -> Result<usize, EmitError>
where
    F: FnOnce() -> M,
    M: AsRef<str>,
{
    global().map_or(Ok(0), |dispatcher| dispatcher.emit_with(level, tag, message))
}

/// See [`Dispatcher::emit_err`].
pub fn emit_err<'t>(
    level: Level,
    tag: impl Into<Option<&'t str>>,
    message: Option<&str>,
    cause: Option<Cause<'_>>,
) -> Result<usize, EmitError> {
    global().map_or(Ok(0), |dispatcher| dispatcher.emit_err(level, tag, message, cause))
}

/// See [`Dispatcher::emit_with_err`].
pub fn emit_with_err<'t, F, M>(
    level: Level,
    tag: impl Into<Option<&'t str>>,
    message: F,
    cause: Option<Cause<'_>>,
) -> Result<usize, EmitError>
where
    F: FnOnce() -> M,
    M: AsRef<str>,
{
    global().map_or(Ok(0), |dispatcher| {
        dispatcher.emit_with_err(level, tag, message, cause)
    })
}

/// See [`Dispatcher::emit_failure`].
pub fn emit_failure<'t>(
    level: Level,
    tag: impl Into<Option<&'t str>>,
    cause: Cause<'_>,
) -> Result<usize, EmitError> {
    global().map_or(Ok(0), |dispatcher| dispatcher.emit_failure(level, tag, cause))
}

/// See [`Dispatcher::println`].
pub fn println(priority: i32, tag: Option<&str>, message: &str) -> Result<usize, EmitError> {
    global().map_or(Ok(0), |dispatcher| dispatcher.println(priority, tag, message))
}

/// See [`Dispatcher::println_level`].
pub fn println_level(level: Level, tag: Option<&str>, message: &str) -> Result<usize, EmitError> {
    global().map_or(Ok(0), |dispatcher| dispatcher.println_level(level, tag, message))
}

macro_rules! tier_functions {
    ($($level:ident => $plain:ident, $with:ident, $err:ident, $with_err:ident, $failure:ident;)+) => {
        $(
            #[doc = concat!("Logs `message` at [`Level::", stringify!($level), "`].")]
            pub fn $plain<'t>(
                tag: impl Into<Option<&'t str>>,
                message: &str,
            ) -> Result<usize, EmitError> {
                emit(Level::$level, tag, message)
            }

            #[doc = concat!("Logs a lazily built message at [`Level::", stringify!($level), "`].")]
            pub fn $with<'t, F, M>(
                tag: impl Into<Option<&'t str>>,
                message: F,
            ) -> Result<usize, EmitError>
            where
                F: FnOnce() -> M,
                M: AsRef<str>,
            {
                emit_with(Level::$level, tag, message)
            }

            #[doc = concat!(
                "Logs an optional message with an optional error at [`Level::",
                stringify!($level),
                "`]."
            )]
            pub fn $err<'t>(
                tag: impl Into<Option<&'t str>>,
                message: Option<&str>,
                cause: Option<Cause<'_>>,
            ) -> Result<usize, EmitError> {
                emit_err(Level::$level, tag, message, cause)
            }

            #[doc = concat!(
                "Logs a lazily built message with an optional error at [`Level::",
                stringify!($level),
                "`]."
            )]
            pub fn $with_err<'t, F, M>(
                tag: impl Into<Option<&'t str>>,
                message: F,
                cause: Option<Cause<'_>>,
            ) -> Result<usize, EmitError>
            where
                F: FnOnce() -> M,
                M: AsRef<str>,
            {
                emit_with_err(Level::$level, tag, message, cause)
            }

            #[doc = concat!("Logs `cause` at [`Level::", stringify!($level), "`].")]
            pub fn $failure<'t>(
                tag: impl Into<Option<&'t str>>,
                cause: Cause<'_>,
            ) -> Result<usize, EmitError> {
                emit_failure(Level::$level, tag, cause)
            }
        )+
    };
}

tier_functions! {
    Verbose => verbose, verbose_with, verbose_err, verbose_with_err, verbose_failure;
    Debug => debug, debug_with, debug_err, debug_with_err, debug_failure;
    Info => info, info_with, info_err, info_with_err, info_failure;
    Warn => warn, warn_with, warn_err, warn_with_err, warn_failure;
    Error => error, error_with, error_err, error_with_err, error_failure;
    Fatal => fatal, fatal_with, fatal_err, fatal_with_err, fatal_failure;
}
