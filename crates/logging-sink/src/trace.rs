//! crates/logging-sink/src/trace.rs
//! Rendering of an error and its source chain.

use std::error::Error;
use std::fmt::Write as _;

/// Renders `error` followed by one `Caused by:` line per entry in its
/// [`source`](Error::source) chain.
///
/// # Examples
///
/// ```
/// use logging_sink::render_trace;
/// use std::io;
///
/// let error = io::Error::other("socket closed");
/// assert_eq!(render_trace(&error), "socket closed");
/// ```
#[must_use]
pub fn render_trace(error: &(dyn Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(rendered, "\nCaused by: {cause}");
        source = cause.source();
    }
    rendered
}

/// Like [`render_trace`] but accepts an absent error, which renders as an
/// empty string.
#[must_use]
pub fn render_optional_trace(error: Option<&(dyn Error + 'static)>) -> String {
    error.map(render_trace).unwrap_or_default()
}
