//! Tracing output for the operator console.
//!
//! The subscriber formats each event into one line and hands it to a sink
//! function. In the browser the sinks are `console.log` / `console.error`.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Receives one formatted log line.
pub type Sink = fn(&str);

/// `MakeWriter` routing warnings and errors to `error`, the rest to `log`.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleWriter {
    log: Sink,
    error: Sink,
}

impl ConsoleWriter {
    pub fn new(log: Sink, error: Sink) -> Self {
        Self { log, error }
    }
}

/// Buffers one event and emits it when dropped.
pub struct LineWriter {
    sink: Sink,
    buf: Vec<u8>,
}

impl io::Write for LineWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        (self.sink)(line.trim_end());
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            sink: self.log,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        let sink = if *meta.level() <= Level::WARN {
            self.error
        } else {
            self.log
        };
        LineWriter {
            sink,
            buf: Vec::new(),
        }
    }
}

/// Install the global subscriber. Returns false if one is already set.
pub fn init(writer: ConsoleWriter, max_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(max_level)
        .without_time()
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Write;

    thread_local! {
        static LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
        static ERRORS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn log_sink(line: &str) {
        LOG.with(|l| l.borrow_mut().push(line.to_string()));
    }

    fn error_sink(line: &str) {
        ERRORS.with(|l| l.borrow_mut().push(line.to_string()));
    }

    #[test]
    fn test_line_writer_emits_on_drop() {
        let writer = ConsoleWriter::new(log_sink, error_sink);

        {
            let mut line = writer.make_writer();
            write!(line, "loaded ").unwrap();
            writeln!(line, "3 services").unwrap();
        }

        LOG.with(|l| assert_eq!(l.borrow().last().map(String::as_str), Some("loaded 3 services")));
    }

    #[test]
    fn test_events_route_by_level() {
        let writer = ConsoleWriter::new(log_sink, error_sink);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("session restored");
            tracing::error!("failed to load banners");
        });

        LOG.with(|l| assert!(l.borrow().iter().any(|line| line.contains("session restored"))));
        ERRORS.with(|l| {
            let errors = l.borrow();
            assert!(errors.iter().any(|line| line.contains("failed to load banners")));
            assert!(!errors.iter().any(|line| line.contains("session restored")));
        });
    }
}
