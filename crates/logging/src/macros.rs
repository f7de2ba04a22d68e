//! crates/logging/src/macros.rs
//! Formatting macros that defer `format!` until the gate has passed.
//!
//! Each macro takes a tag followed by `format!` arguments and evaluates to
//! the emission's `Result<usize, EmitError>`. Without a receiver the call
//! goes through the process-wide [`facade`](crate::facade); prefixing the
//! tag with `dispatcher =>` logs through that dispatcher instead.
//!
//! ```
//! use logging::{log_warn, Dispatcher, Level};
//! use logging_sink::LineSink;
//!
//! let dispatcher = Dispatcher::new(LineSink::new(Vec::new())).with_threshold(Level::Warn);
//! let written = log_warn!(dispatcher => "cache", "{} of {} entries evicted", 3, 10)?;
//! assert!(written > 0);
//!
//! // Nothing installed process-wide: the call is a no-op.
//! assert_eq!(logging::log_error!("cache", "unreachable")?, 0);
//! # Ok::<(), logging::EmitError>(())
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $dispatcher:expr => $tag:expr, $($arg:tt)+) => {
        $dispatcher.emit_with($level, $tag, || ::std::format!($($arg)+))
    };
    ($level:expr, $tag:expr, $($arg:tt)+) => {
        $crate::facade::emit_with($level, $tag, || ::std::format!($($arg)+))
    };
}

/// Logs a formatted message at [`Level::Verbose`](crate::Level::Verbose).
#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Verbose, $($arg)+)
    };
}

/// Logs a formatted message at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Debug, $($arg)+)
    };
}

/// Logs a formatted message at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Info, $($arg)+)
    };
}

/// Logs a formatted message at [`Level::Warn`](crate::Level::Warn).
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Warn, $($arg)+)
    };
}

/// Logs a formatted message at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Error, $($arg)+)
    };
}

/// Logs a formatted message at [`Level::Fatal`](crate::Level::Fatal).
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Fatal, $($arg)+)
    };
}
