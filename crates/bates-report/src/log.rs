//! Fan-out report log.

use std::io;

use tracing::warn;

use crate::sink::ReportSink;

struct Slot {
    sink: Box<dyn ReportSink>,
    failed: bool,
}

/// Ordered list of sinks; every line goes to each sink in order.
///
/// A sink that fails to write is disabled for the rest of the run while the
/// others keep receiving lines. Sinks are flushed by [`ReportLog::close`], or
/// on drop if the log was never closed.
#[derive(Default)]
pub struct ReportLog {
    slots: Vec<Slot>,
    lines: usize,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.push_sink(Box::new(sink));
        self
    }

    pub fn push_sink(&mut self, sink: Box<dyn ReportSink>) {
        self.slots.push(Slot {
            sink,
            failed: false,
        });
    }

    /// Number of lines logged so far.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Writes `message` as one line to every active sink.
    pub fn line(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        self.lines += 1;
        for slot in self.slots.iter_mut().filter(|slot| !slot.failed) {
            if let Err(error) = slot.sink.write_line(message) {
                warn!(sink = slot.sink.name(), %error, "report sink failed, disabling it");
                slot.failed = true;
            }
        }
    }

    /// Flushes and releases every sink.
    ///
    /// # Errors
    ///
    /// Returns the first flush error; remaining sinks are still flushed.
    pub fn close(mut self) -> io::Result<()> {
        let slots = std::mem::take(&mut self.slots);
        let mut first_error = None;
        for mut slot in slots.into_iter().filter(|slot| !slot.failed) {
            if let Err(error) = slot.sink.flush() {
                warn!(sink = slot.sink.name(), %error, "failed to flush report sink");
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for ReportLog {
    fn drop(&mut self) {
        for slot in self.slots.iter_mut().filter(|slot| !slot.failed) {
            let _ = slot.sink.flush();
        }
    }
}
