//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//! When the query text is attached with [`TerminalEmitter::with_source`],
//! labels are rendered as source snippets with underlines; otherwise they
//! fall back to byte ranges.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean.
    ///
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Query text attached to an emitter, with its line table.
struct SourceContext<'src> {
    text: &'src str,
    lines: LineOffsetTable,
}

/// One label resolved against the source.
struct Marked<'a> {
    line: u32,
    line_text: &'a str,
    /// Character column (0-based) where the underline starts.
    start_char: usize,
    /// Underline width in characters, at least 1.
    width: usize,
    message: &'a str,
    is_primary: bool,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceContext<'src>>,
    file_path: Option<String>,
    error_count: usize,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` is used for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
            error_count: 0,
        }
    }

    /// Attach the query text so labels render as snippets.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(SourceContext {
            text: source,
            lines: LineOffsetTable::build(source),
        });
        self
    }

    /// Name shown in `--> path:line:col` headers.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_code(&mut self, code: &str) {
        self.write_colored(&format!("[{code}]"), colors::BOLD);
    }

    fn write_label_color(&mut self, text: &str, is_primary: bool) {
        let color = if is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        self.write_colored(text, color);
    }

    /// Labels without source: `--> 4..5: message`.
    fn write_plain_labels(&mut self, labels: &[Label]) {
        for label in labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_label_color(&label.message, label.is_primary);
            let _ = writeln!(self.writer);
        }
    }

    /// Resolve labels to lines and character columns, in source order.
    fn mark_labels<'a>(source: &SourceContext<'a>, labels: &'a [Label]) -> Vec<Marked<'a>> {
        let text = source.text;
        let mut marked: Vec<Marked<'a>> = labels
            .iter()
            .map(|label| {
                let start = (label.span.start as usize).min(text.len());
                let line = source.lines.line_from_offset(label.span.start);
                let line_start = source
                    .lines
                    .line_start_offset(line)
                    .map_or(0, |off| off as usize);
                let line_text = source.lines.line_text(text, line).unwrap_or("");
                let line_end = line_start + line_text.len();
                let end = (label.span.end as usize).clamp(start, line_end.max(start));
                Marked {
                    line,
                    line_text,
                    start_char: text.get(line_start..start).map_or(0, |s| s.chars().count()),
                    width: text.get(start..end).map_or(0, |s| s.chars().count()).max(1),
                    message: &label.message,
                    is_primary: label.is_primary,
                }
            })
            .collect();
        marked.sort_by_key(|m| (m.line, m.start_char));
        marked
    }

    fn write_location(&mut self, line: u32, col: u32) {
        let _ = write!(self.writer, "  ");
        self.write_colored("-->", colors::SECONDARY);
        match &self.file_path {
            Some(path) => {
                let _ = writeln!(self.writer, " {path}:{line}:{col}");
            }
            None => {
                let _ = writeln!(self.writer, " {line}:{col}");
            }
        }
    }

    fn write_gutter(&mut self, width: usize, line: Option<u32>) {
        let number = line.map_or_else(String::new, |n| n.to_string());
        self.write_colored(&format!("{number:>width$} |"), colors::SECONDARY);
    }

    fn write_snippets(&mut self, marked: &[Marked<'_>]) {
        let width = marked
            .iter()
            .map(|m| m.line.to_string().len())
            .max()
            .unwrap_or(1);

        self.write_gutter(width, None);
        let _ = writeln!(self.writer);

        let mut current_line = None;
        for m in marked {
            if current_line != Some(m.line) {
                current_line = Some(m.line);
                self.write_gutter(width, Some(m.line));
                let _ = writeln!(self.writer, " {}", m.line_text);
            }
            self.write_gutter(width, None);
            let _ = write!(self.writer, " {}", " ".repeat(m.start_char));
            let mark = if m.is_primary { "^" } else { "-" };
            self.write_label_color(&mark.repeat(m.width), m.is_primary);
            if !m.message.is_empty() {
                let _ = write!(self.writer, " ");
                self.write_label_color(m.message, m.is_primary);
            }
            let _ = writeln!(self.writer);
        }
    }

    fn write_trailer(&mut self, kind: &str, color: &str, text: &str) {
        let _ = write!(self.writer, "  = ");
        self.write_colored(kind, color);
        let _ = writeln!(self.writer, ": {text}");
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.error_count += 1;

        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        let anchor = diagnostic
            .primary_span()
            .or_else(|| diagnostic.labels.first().map(|l| l.span));
        match (self.source.take(), anchor) {
            (Some(source), Some(anchor)) => {
                let (line, col) = source.lines.offset_to_line_col(source.text, anchor.start);
                let marked = Self::mark_labels(&source, &diagnostic.labels);
                self.write_location(line, col);
                self.write_snippets(&marked);
                self.source = Some(source);
            }
            (source, _) => {
                self.source = source;
                self.write_plain_labels(&diagnostic.labels);
            }
        }

        for note in &diagnostic.notes {
            self.write_trailer("note", colors::BOLD, note);
        }
        for suggestion in &diagnostic.suggestions {
            self.write_trailer("help", colors::HELP, suggestion);
        }

        let _ = writeln!(self.writer);
    }

    fn error_count(&self) -> usize {
        self.error_count
    }

    /// Writes `error: could not tokenize query ...` when anything was
    /// emitted, then flushes.
    fn finish(&mut self) -> io::Result<()> {
        match self.error_count {
            0 => {}
            1 => {
                self.write_colored("error", colors::ERROR);
                writeln!(self.writer, ": could not tokenize query due to previous error")?;
            }
            n => {
                self.write_colored("error", colors::ERROR);
                writeln!(self.writer, ": could not tokenize query due to {n} previous errors")?;
            }
        }
        self.writer.flush()
    }
}
