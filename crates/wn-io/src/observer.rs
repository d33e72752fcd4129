//! `ResultWriterObserver<W>` — bridges `DesignObserver` to a `ResultWriter`.

use wn_pipeline::{DesignObserver, NetworkDesignResult};

use crate::writer::ResultWriter;
use crate::{IoError, IoResult};

/// A [`DesignObserver`] that writes the finished result to any
/// [`ResultWriter`] backend and closes it.
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  After `design()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ResultWriterObserver<W: ResultWriter> {
    writer:     W,
    last_error: Option<IoError>,
}

impl<W: ResultWriter> ResultWriterObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `design()` returns.
    pub fn take_error(&mut self) -> Option<IoError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: IoResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ResultWriter> DesignObserver for ResultWriterObserver<W> {
    fn on_design_complete(&mut self, result: &NetworkDesignResult) {
        let written = self.writer.write_result(result);
        self.store_err(written);
        let finished = self.writer.finish();
        self.store_err(finished);
    }
}
