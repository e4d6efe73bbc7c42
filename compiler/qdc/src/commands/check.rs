//! `qd check`: report lexical errors without dumping tokens.

use std::io::{self, IsTerminal, Write};

use qd_lexer::lex;

use super::{display_name, read_input, report_lex_errors, Options};
use crate::CliError;

/// Check a file (or stdin) for lexical errors.
///
/// Terminal diagnostics go to stderr; `--json` writes the diagnostic array
/// to stdout instead. Returns `Ok(false)` when there were errors.
pub fn check_file(path: &str, options: &Options) -> Result<bool, CliError> {
    let source = read_input(path)?;
    let stderr = io::stderr();
    let is_tty = stderr.is_terminal();
    check_source(
        &source,
        display_name(path),
        options,
        &mut io::stdout().lock(),
        &mut stderr.lock(),
        is_tty,
    )
}

/// Check `source`, writing the report to `out` (JSON or the success line)
/// and terminal diagnostics to `diag`.
pub fn check_source(
    source: &str,
    name: &str,
    options: &Options,
    out: &mut impl Write,
    diag: &mut impl Write,
    is_tty: bool,
) -> Result<bool, CliError> {
    let output = lex(source);

    if options.json {
        report_lex_errors(&mut *out, source, name, &output.errors, options, is_tty)?;
    } else if output.has_errors() {
        report_lex_errors(&mut *diag, source, name, &output.errors, options, is_tty)?;
    } else {
        writeln!(out, "{name}: ok ({} tokens)", output.significant().count())?;
    }
    out.flush()?;

    Ok(!output.has_errors())
}
