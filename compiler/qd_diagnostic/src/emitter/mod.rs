//! Diagnostic rendering.
//!
//! [`TerminalEmitter`] prints rustc-style reports with source snippets;
//! [`JsonEmitter`] collects the same diagnostics and writes them as one
//! JSON array for editors and scripts.
//!
//! Emitters buffer nothing the caller can observe until [`finish`] runs,
//! which writes any trailing output (the error summary, the JSON array)
//! and flushes the writer.
//!
//! [`finish`]: DiagnosticEmitter::finish

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::io;

use crate::Diagnostic;

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    /// Render one diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Render several diagnostics in order.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Number of diagnostics emitted so far.
    fn error_count(&self) -> usize;

    /// Write trailing output and flush.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error hit while writing or flushing.
    fn finish(&mut self) -> io::Result<()>;
}
