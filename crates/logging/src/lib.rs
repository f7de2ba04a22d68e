#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` decides, per call, whether a log message is worth building and
//! forwards the ones that are to a [`LogSink`](logging_sink::LogSink). The
//! decision is a single comparison between the call's tier and a configured
//! threshold.
//!
//! # Design
//!
//! - [`Level`] is a plain tag: six tiers (`Verbose` through `Error`, plus the
//!   `Assert`/`Fatal` pair at the top) and two threshold sentinels,
//!   `Suppress` and `All`.
//! - [`LevelPolicy`] is the rank table that orders those tags. The gate
//!   passes when `rank(threshold) <= rank(candidate)`. Two policies ship
//!   built in and [`LevelPolicy::custom`] builds others.
//! - [`to_native`] and [`from_native`] translate between tiers and the
//!   sink's integer priorities. The translation is lossy: `Assert` and
//!   `Fatal` share one native priority.
//! - [`Dispatcher`] owns a policy, a sink and the only mutable state, the
//!   threshold. Message suppliers run only after the gate has passed.
//! - [`facade`] holds one process-wide dispatcher, installed by the
//!   application at startup, behind free functions and the `log_*!` macros.
//! - [`LoggingConfig`] seeds the threshold from a [`StringTable`]: a map,
//!   the environment, or a properties file.
//!
//! # Invariants
//!
//! - Unrecognised configuration resolves to [`Level::Suppress`]; a typo never
//!   turns logging on.
//! - A suppressed call never runs its supplier, never formats its error and
//!   never reaches the sink.
//! - Threshold reads and writes are atomic; a call sees some value stored by
//!   a completed [`Dispatcher::set_threshold`].
//! - Everything is synchronous: the caller blocks for the duration of the
//!   sink write.
//!
//! # Errors
//!
//! Emissions return [`EmitError`] when a raw priority is unknown, when an
//! accepted call carries neither a message nor an error, or when the sink
//! fails. Configuration loading returns [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use logging::{Dispatcher, LoggingConfig, Level};
//! use logging_sink::LineSink;
//!
//! let config = LoggingConfig::new("warn");
//! let dispatcher = Dispatcher::from_config(LineSink::new(Vec::new()), &config);
//!
//! assert_eq!(dispatcher.threshold(), Level::Warn);
//! assert_eq!(dispatcher.info("boot", "ready")?, 0);
//! dispatcher.error("boot", "disk missing")?;
//!
//! let output = String::from_utf8(dispatcher.into_sink().into_inner()).unwrap();
//! assert_eq!(output, "E/boot: disk missing\n");
//! # Ok::<(), logging::EmitError>(())
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Level`], [`PolicyKind`] and
//!   [`LoggingConfig`].
//! - `tracing`: a `tracing-subscriber` layer that gates `tracing` events
//!   through a dispatcher.

pub mod config;
mod dispatcher;
mod error;
pub mod facade;
mod levels;
mod macros;
mod native;
mod policy;

#[cfg(feature = "tracing")]
mod tracing_bridge;

/// An error attached to a log call.
pub type Cause<'a> = &'a (dyn std::error::Error + 'static);

pub use config::{ConfigError, EnvTable, LoggingConfig, PolicyKind, PropertiesTable, StringTable};
pub use dispatcher::Dispatcher;
pub use error::EmitError;
pub use levels::Level;
pub use native::{UnknownPriority, from_native, to_native};
pub use policy::{InvalidPolicy, LevelPolicy};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{GateLayer, init_tracing, init_tracing_with_filter, tier_for};
