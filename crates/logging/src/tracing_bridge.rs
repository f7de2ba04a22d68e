//! crates/logging/src/tracing_bridge.rs
//! Routes `tracing` events through a [`Dispatcher`].
//!
//! [`GateLayer`] is a `tracing-subscriber` layer. Each event's level is
//! mapped onto a tier, checked against the dispatcher's threshold, and
//! written to the dispatcher's sink with the event target as the tag.
//!
//! | tracing | tier |
//! |---------|------|
//! | `ERROR` | [`Level::Error`] |
//! | `WARN`  | [`Level::Warn`] |
//! | `INFO`  | [`Level::Info`] |
//! | `DEBUG` | [`Level::Debug`] |
//! | `TRACE` | [`Level::Verbose`] |
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logging::{init_tracing, Dispatcher, Level};
//! use logging_sink::LineSink;
//!
//! let dispatcher = Dispatcher::new(LineSink::new(std::io::stderr())).with_threshold(Level::Info);
//! init_tracing(Arc::new(dispatcher))?;
//!
//! tracing::info!(target: "net", "listening on {}", 8080);
//! ```

use std::fmt::{self, Write as _};
use std::sync::Arc;

use logging_sink::LogSink;
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::dispatcher::Dispatcher;
use crate::levels::Level;

/// Maps a tracing level onto a tier.
#[must_use]
pub const fn tier_for(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        tracing::Level::DEBUG => Level::Debug,
        tracing::Level::TRACE => Level::Verbose,
    }
}

/// A tracing layer that gates events through a shared [`Dispatcher`].
///
/// The threshold is read on every event, so changes made through the
/// dispatcher apply immediately. Sink failures are dropped: tracing gives a
/// layer no way to report them.
pub struct GateLayer<S> {
    dispatcher: Arc<Dispatcher<S>>,
}

impl<S> GateLayer<S> {
    /// Creates a layer over `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: Arc<Dispatcher<S>>) -> Self {
        Self { dispatcher }
    }

    /// The dispatcher events are routed through.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }
}

impl<S> Clone for GateLayer<S> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<S> fmt::Debug for GateLayer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateLayer")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl<S, R> Layer<R> for GateLayer<S>
where
    S: LogSink + 'static,
    R: Subscriber + for<'a> LookupSpan<'a>,
{
    // The threshold can change at any time, so no callsite is cached.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, R>) -> bool {
        self.dispatcher.is_enabled(tier_for(metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, R>) {
        let metadata = event.metadata();
        let level = tier_for(metadata.level());
        let _ = self.dispatcher.emit_with(level, metadata.target(), || {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            visitor.finish()
        });
    }
}

/// Collects the `message` field followed by the remaining fields as
/// `name=value` pairs.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(mut self) -> String {
        if self.message.is_empty() {
            return self.fields;
        }
        if !self.fields.is_empty() {
            self.message.push(' ');
            self.message.push_str(&self.fields);
        }
        self.message
    }

    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={value}", field.name());
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }
}

/// Installs a global tracing subscriber that routes events through
/// `dispatcher`.
///
/// Fails when another global subscriber is already set.
pub fn init_tracing<S>(dispatcher: Arc<Dispatcher<S>>) -> Result<(), TryInitError>
where
    S: LogSink + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(GateLayer::new(dispatcher))
        .try_init()
}

/// Like [`init_tracing`], with an extra filter layer in front of the gate.
pub fn init_tracing_with_filter<S, F>(
    dispatcher: Arc<Dispatcher<S>>,
    filter: F,
) -> Result<(), TryInitError>
where
    S: LogSink + 'static,
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(GateLayer::new(dispatcher))
        .try_init()
}
