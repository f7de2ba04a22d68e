//! Per-tier entry points.

use logging_sink::LogSink;

use super::Dispatcher;
use crate::error::EmitError;
use crate::levels::Level;
use crate::Cause;

macro_rules! tier_methods {
    ($($level:ident => $plain:ident, $with:ident, $err:ident, $with_err:ident, $failure:ident;)+) => {
        impl<S> Dispatcher<S>
        where
            S: LogSink,
        {
            $(
                #[doc = concat!("Emits `message` at [`Level::", stringify!($level), "`].")]
                pub fn $plain<'t>(
                    &self,
                    tag: impl Into<Option<&'t str>>,
                    message: &str,
                ) -> Result<usize, EmitError> {
                    self.emit(Level::$level, tag, message)
                }

                #[doc = concat!(
                    "Emits a lazily built message at [`Level::", stringify!($level), "`].\n\n",
                    "The supplier runs only when the gate is open."
                )]
                pub fn $with<'t, F, M>(
                    &self,
                    tag: impl Into<Option<&'t str>>,
                    message: F,
                ) -> Result<usize, EmitError>
                where
                    F: FnOnce() -> M,
                    M: AsRef<str>,
                {
                    self.emit_with(Level::$level, tag, message)
                }

                #[doc = concat!(
                    "Emits an optional message with an optional error at [`Level::",
                    stringify!($level),
                    "`]. See [`Dispatcher::emit_err`]."
                )]
                pub fn $err<'t>(
                    &self,
                    tag: impl Into<Option<&'t str>>,
                    message: Option<&str>,
                    cause: Option<Cause<'_>>,
                ) -> Result<usize, EmitError> {
                    self.emit_err(Level::$level, tag, message, cause)
                }

                #[doc = concat!(
                    "Emits a lazily built message with an optional error at [`Level::",
                    stringify!($level),
                    "`]."
                )]
                pub fn $with_err<'t, F, M>(
                    &self,
                    tag: impl Into<Option<&'t str>>,
                    message: F,
                    cause: Option<Cause<'_>>,
                ) -> Result<usize, EmitError>
                where
                    F: FnOnce() -> M,
                    M: AsRef<str>,
                {
                    self.emit_with_err(Level::$level, tag, message, cause)
                }

                #[doc = concat!(
                    "Emits `cause` at [`Level::", stringify!($level), "`], described by its own message."
                )]
                pub fn $failure<'t>(
                    &self,
                    tag: impl Into<Option<&'t str>>,
                    cause: Cause<'_>,
                ) -> Result<usize, EmitError> {
                    self.emit_failure(Level::$level, tag, cause)
                }
            )+
        }
    };
}

tier_methods! {
    Verbose => verbose, verbose_with, verbose_err, verbose_with_err, verbose_failure;
    Debug => debug, debug_with, debug_err, debug_with_err, debug_failure;
    Info => info, info_with, info_err, info_with_err, info_failure;
    Warn => warn, warn_with, warn_err, warn_with_err, warn_failure;
    Error => error, error_with, error_err, error_with_err, error_failure;
    Fatal => fatal, fatal_with, fatal_err, fatal_with_err, fatal_failure;
}
