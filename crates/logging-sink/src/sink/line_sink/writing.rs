use super::{LineSink, State};
use crate::error::SinkError;
use crate::line_mode::LineMode;
use crate::priority;
use crate::record::Record;
use crate::sink::LogSink;
use crate::trace::render_trace;
use std::io::Write;

impl<W> LineSink<W>
where
    W: Write,
{
    /// Flushes the underlying writer.
    pub fn flush(&self) -> Result<(), SinkError> {
        let mut state = self.state.lock().map_err(|_| SinkError::Poisoned)?;
        state.writer.flush()?;
        Ok(())
    }
}

impl<W> State<W>
where
    W: Write,
{
    fn render(&mut self, record: &Record<'_>, line_mode: LineMode) -> Result<usize, SinkError> {
        let scratch = &mut self.scratch;
        scratch.clear();

        scratch.push(priority::label(record.priority()));
        if let Some(tag) = record.tag() {
            scratch.push('/');
            scratch.push_str(tag);
        }
        scratch.push_str(": ");
        scratch.push_str(record.message());

        if let Some(cause) = record.cause() {
            scratch.push('\n');
            scratch.push_str(&render_trace(cause));
        }
        if let Some(terminator) = line_mode.terminator() {
            scratch.push(terminator);
        }

        self.writer.write_all(scratch.as_bytes())?;
        Ok(scratch.len())
    }
}

impl<W> LogSink for LineSink<W>
where
    W: Write + Send,
{
    fn write(&self, record: &Record<'_>) -> Result<usize, SinkError> {
        let mut state = self.state.lock().map_err(|_| SinkError::Poisoned)?;
        state.render(record, self.line_mode)
    }
}
