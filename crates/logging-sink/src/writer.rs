use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging::{Output, PluginError, Sink};

use crate::line_mode::LineMode;

/// Sink that renders outputs into any [`std::io::Write`] target.
///
/// The writer sits behind a mutex so the sink can be shared between threads
/// and installed for several levels at once. Each output is rendered into one
/// buffer and handed to the writer with a single `write_all`, so concurrent
/// calls never interleave within a line. I/O failures are returned as sink
/// errors and can be downcast to [`io::Error`].
///
/// # Examples
///
/// ```
/// use logging::{Output, Sink};
/// use logging_sink::{LineMode, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.write(&Output::from("vanished")).unwrap();
/// sink.write(&Output::from("partial")).unwrap();
/// assert_eq!(sink.into_inner(), b"vanished\npartial\n".to_vec());
///
/// let sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// sink.write(&Output::from("ready")).unwrap();
/// assert_eq!(sink.into_inner(), b"ready".to_vec());
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl<W> WriterSink<W> {
    /// Creates a sink that terminates each output with a newline.
    pub const fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with an explicit [`LineMode`].
    pub const fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Runs `f` with exclusive access to the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }

    /// Swaps in a new writer, returning the previous one.
    pub fn replace_writer(&self, writer: W) -> W {
        std::mem::replace(&mut *self.lock(), writer)
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> WriterSink<W> {
    /// Writes `output` using an explicit [`LineMode`].
    pub fn write_with_mode(&self, output: &Output, line_mode: LineMode) -> io::Result<()> {
        let rendered = line_mode.render(output);
        self.lock().write_all(rendered.as_bytes())
    }

    /// Flushes the writer.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn write(&self, output: &Output) -> Result<(), PluginError> {
        self.write_with_mode(output, self.line_mode)?;
        Ok(())
    }
}

impl<W> Default for WriterSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl<W> fmt::Debug for WriterSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("writer", &*self.lock())
            .field("line_mode", &self.line_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::{Level, MessageBuilder, args};
    use serde_json::json;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_output_is_written_compact() {
        let sink = WriterSink::new(Vec::new());
        sink.write(&Output::Json(json!({"a": 1}))).unwrap();
        assert_eq!(sink.into_inner(), b"{\"a\":1}\n".to_vec());
    }

    #[test]
    fn record_output_is_rendered_as_plain_line() {
        let sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
        let record = MessageBuilder::build(Level::Warn, args!["1970-01-01T00:00:00Z", "low disk"]);
        sink.write(&Output::Record(record)).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "1970-01-01T00:00:00.000Z [WARN] low disk");
    }

    #[test]
    fn explicit_mode_overrides_default() {
        let sink = WriterSink::new(Vec::new());
        sink.write_with_mode(&Output::from("50%"), LineMode::WithoutNewline)
            .unwrap();
        sink.write(&Output::from(" done")).unwrap();
        assert_eq!(sink.into_inner(), b"50% done\n".to_vec());
    }

    #[test]
    fn io_errors_surface_as_sink_errors() {
        let sink = WriterSink::new(FailingWriter);
        let err = sink.write(&Output::from("x")).unwrap_err();
        let io_error = err.downcast::<io::Error>().expect("io error");
        assert_eq!(io_error.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn replace_writer_returns_previous_contents() {
        let sink = WriterSink::new(Vec::new());
        sink.write(&Output::from("first")).unwrap();
        let previous = sink.replace_writer(Vec::new());
        assert_eq!(previous, b"first\n".to_vec());
        assert!(sink.with_writer(|writer| writer.is_empty()));
    }
}
