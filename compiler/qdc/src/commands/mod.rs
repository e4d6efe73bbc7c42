//! Command handlers for the querydown CLI.
//!
//! Each submodule implements one command. The `*_file` entry points read
//! the input and bind stdout/stderr; the `*_source` functions take explicit
//! writers so they can be tested in-process. Option parsing and the shared
//! diagnostic reporting live here in the module root.

use std::io::{self, Write};

use qd_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use qd_diagnostic::Diagnostic;
use qd_lexer::LexError;

use crate::problem::render_lex_error;
use crate::CliError;

mod check;
mod explain;
mod kinds;
mod lex;

pub use check::{check_file, check_source};
pub use explain::{explain_code, write_explanation};
pub use kinds::{list_kinds, write_kinds};
pub use lex::{lex_file, lex_source};

/// Flags shared by every command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// `--json`: machine-readable output.
    pub json: bool,
    /// `--no-trivia`: drop `white` and `comment` tokens from dumps.
    pub no_trivia: bool,
    /// `--color=auto|always|never`.
    pub color: ColorMode,
}

impl Options {
    /// Parse the arguments after the command name.
    ///
    /// Returns the options and the single positional argument, if any.
    /// `-` is positional (stdin).
    pub fn parse(args: &[String]) -> Result<(Options, Option<String>), CliError> {
        let mut options = Options::default();
        let mut path = None;

        for arg in args {
            if arg == "--json" {
                options.json = true;
            } else if arg == "--no-trivia" {
                options.no_trivia = true;
            } else if let Some(mode) = arg.strip_prefix("--color=") {
                options.color = parse_color(mode)?;
            } else if arg == "-" || !arg.starts_with('-') {
                if path.is_some() {
                    return Err(CliError::UnexpectedArgument(arg.clone()));
                }
                path = Some(arg.clone());
            } else {
                return Err(CliError::UnknownOption(arg.clone()));
            }
        }

        Ok((options, path))
    }
}

fn parse_color(mode: &str) -> Result<ColorMode, CliError> {
    match mode {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        other => Err(CliError::InvalidColor(other.to_string())),
    }
}

/// Read the query text from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String, CliError> {
    tracing::debug!(path, "reading query");
    if path == "-" {
        return io::read_to_string(io::stdin()).map_err(|e| CliError::from_read("<stdin>", e));
    }
    std::fs::read_to_string(path).map_err(|e| CliError::from_read(path, e))
}

/// Name shown in diagnostics for `path`.
pub(crate) fn display_name(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}

/// Render lexer errors and write them with the emitter `options` selects.
///
/// JSON output is always a complete array, even when empty. Terminal
/// output ends with a summary line when there was anything to report.
pub(crate) fn report_lex_errors<W: Write>(
    writer: W,
    source: &str,
    name: &str,
    errors: &[LexError],
    options: &Options,
    is_tty: bool,
) -> io::Result<()> {
    let diagnostics: Vec<Diagnostic> = errors
        .iter()
        .map(|err| render_lex_error(err, source))
        .collect();

    if options.json {
        emit_with(JsonEmitter::new(writer).with_source(source), &diagnostics)
    } else {
        let emitter = TerminalEmitter::with_color_mode(writer, options.color, is_tty)
            .with_source(source)
            .with_file_path(name);
        emit_with(emitter, &diagnostics)
    }
}

fn emit_with(mut emitter: impl DiagnosticEmitter, diagnostics: &[Diagnostic]) -> io::Result<()> {
    emitter.emit_all(diagnostics);
    tracing::debug!(errors = emitter.error_count(), "reported lex errors");
    emitter.finish()
}
