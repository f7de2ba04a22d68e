use std::fmt;
use std::sync::Mutex;

use crate::line_mode::LineMode;

mod writing;

/// Line-oriented sink that renders records into an [`std::io::Write`] target.
///
/// Each record becomes `"<label>/<tag>: <message>"` where `<label>` is the
/// single-letter form of the native priority (see
/// [`priority::label`](crate::priority::label)). When the record has no tag
/// the `/<tag>` part is omitted. An attached error is rendered on the
/// following lines via [`render_trace`](crate::render_trace). The
/// configured [`LineMode`] decides whether a newline terminates the record.
///
/// The writer lives behind a mutex together with a reusable scratch buffer,
/// so one sink can be shared by every logging thread and a record is always
/// written in one piece.
///
/// # Examples
///
/// ```
/// use logging_sink::{priority, LineMode, LineSink, LogSink, Record};
///
/// let sink = LineSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// sink.write(&Record::new(priority::INFO, None, "ready"))?;
///
/// assert_eq!(sink.into_inner(), b"I: ready".to_vec());
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
pub struct LineSink<W> {
    state: Mutex<State<W>>,
    line_mode: LineMode,
}

struct State<W> {
    writer: W,
    scratch: String,
}

impl<W> LineSink<W> {
    /// Creates a sink that appends a newline after each record.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            state: Mutex::new(State {
                writer,
                scratch: String::new(),
            }),
            line_mode,
        }
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Consumes the sink and returns the wrapped writer.
    ///
    /// A writer left behind by a panicking thread is still returned.
    #[must_use]
    pub fn into_inner(self) -> W {
        match self.state.into_inner() {
            Ok(state) => state.writer,
            Err(poisoned) => poisoned.into_inner().writer,
        }
    }
}

impl<W> Default for LineSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl<W> fmt::Debug for LineSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("LineSink");
        match self.state.try_lock() {
            Ok(state) => debug.field("writer", &state.writer),
            Err(_) => debug.field("writer", &"<locked>"),
        };
        debug.field("line_mode", &self.line_mode).finish()
    }
}
