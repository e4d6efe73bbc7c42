//! JSON output for tooling.
//!
//! The whole report is one pretty-printed array, written by
//! [`DiagnosticEmitter::finish`]. A clean query produces `[]`.

use std::io::{self, Write};

use serde::Serialize;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// Serialized form of a [`Diagnostic`].
#[derive(Serialize, Debug)]
struct JsonDiagnostic {
    code: &'static str,
    message: String,
    labels: Vec<JsonLabel>,
    notes: Vec<String>,
    suggestions: Vec<String>,
}

/// Serialized form of a [`Label`]. `line`/`column` are 1-based and only
/// present when the emitter knows the query text.
#[derive(Serialize, Debug)]
struct JsonLabel {
    start: u32,
    end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
    message: String,
    primary: bool,
}

/// Collects diagnostics and writes them as a JSON array on `finish`.
pub struct JsonEmitter<'src, W: Write> {
    writer: W,
    diagnostics: Vec<JsonDiagnostic>,
    source: Option<(&'src str, LineOffsetTable)>,
}

impl<'src, W: Write> JsonEmitter<'src, W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            diagnostics: Vec::new(),
            source: None,
        }
    }

    /// Attach the query text so labels also carry `line`/`column`.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some((source, LineOffsetTable::build(source)));
        self
    }

    fn convert_label(&self, label: &Label) -> JsonLabel {
        let position = self
            .source
            .as_ref()
            .map(|(text, table)| table.offset_to_line_col(text, label.span.start));
        JsonLabel {
            start: label.span.start,
            end: label.span.end,
            line: position.map(|(line, _)| line),
            column: position.map(|(_, column)| column),
            message: label.message.clone(),
            primary: label.is_primary,
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let labels = diagnostic
            .labels
            .iter()
            .map(|label| self.convert_label(label))
            .collect();
        self.diagnostics.push(JsonDiagnostic {
            code: diagnostic.code.as_str(),
            message: diagnostic.message.clone(),
            labels,
            notes: diagnostic.notes.clone(),
            suggestions: diagnostic.suggestions.clone(),
        });
    }

    fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    fn finish(&mut self) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.diagnostics)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
