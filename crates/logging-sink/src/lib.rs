#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` is the boundary between the gatelog facade and whatever
//! actually records a log line. It defines the host platform's native
//! priority encoding ([`priority`]), the [`LogSink`] capability the
//! dispatcher writes accepted records into, and two concrete sinks: the
//! line-oriented [`LineSink`] for any [`std::io::Write`] target and, on unix,
//! a [`syslog`] backend.
//!
//! # Design
//!
//! A sink receives a fully realised [`Record`]: the native priority, an
//! optional tag, the message text, and an optional error whose `source()`
//! chain is rendered by [`render_trace`]. Sinks take `&self` so a single
//! instance can be shared by every thread that logs; implementations that
//! wrap mutable writers guard them internally.
//!
//! # Invariants
//!
//! - One [`LogSink::write`] call per accepted record. Sinks never retry.
//! - The returned byte count is whatever the sink actually wrote.
//! - [`LogSink::is_loggable`] is advisory. The dispatcher's severity gate
//!   never consults it.
//!
//! # Errors
//!
//! Sink failures surface as [`SinkError`] and propagate unchanged to the
//! caller of the logging operation.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{priority, LineSink, LogSink, Record};
//!
//! let sink = LineSink::new(Vec::new());
//! let written = sink.write(&Record::new(priority::WARN, Some("net"), "retrying"))?;
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "W/net: retrying\n");
//! assert_eq!(written, output.len());
//! # Ok::<(), logging_sink::SinkError>(())
//! ```

mod error;
mod line_mode;
pub mod priority;
mod record;
mod sink;
#[cfg(unix)]
#[allow(unsafe_code)]
pub mod syslog;
mod trace;

pub use error::SinkError;
pub use line_mode::LineMode;
pub use record::Record;
pub use sink::{LineSink, LogSink};
pub use trace::{render_optional_trace, render_trace};
