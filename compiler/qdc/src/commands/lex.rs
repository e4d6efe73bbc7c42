//! `qd lex`: print the token stream.

use std::io::{self, IsTerminal, Write};

use qd_lexer::{lex, Token};

use super::{display_name, read_input, report_lex_errors, Options};
use crate::CliError;

/// Lex a file (or stdin) and print its tokens to stdout.
///
/// Lexical errors go to stderr. Returns `Ok(false)` when there were any.
pub fn lex_file(path: &str, options: &Options) -> Result<bool, CliError> {
    let source = read_input(path)?;
    let stderr = io::stderr();
    let is_tty = stderr.is_terminal();
    lex_source(
        &source,
        display_name(path),
        options,
        &mut io::stdout().lock(),
        &mut stderr.lock(),
        is_tty,
    )
}

/// Lex `source`, writing the token dump to `out` and diagnostics to `diag`.
pub fn lex_source(
    source: &str,
    name: &str,
    options: &Options,
    out: &mut impl Write,
    diag: &mut impl Write,
    is_tty: bool,
) -> Result<bool, CliError> {
    let output = lex(source);
    let tokens: Vec<&Token<'_>> = output
        .tokens
        .iter()
        .filter(|token| !(options.no_trivia && token.is_trivia()))
        .collect();

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &tokens)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Tokens for '{name}' ({} tokens):", tokens.len())?;
        for token in &tokens {
            writeln!(out, "  {} @ {} {:?}", token.kind, token.span, token.text)?;
        }
    }
    out.flush()?;

    if output.has_errors() {
        report_lex_errors(&mut *diag, source, name, &output.errors, options, is_tty)?;
    }
    Ok(!output.has_errors())
}
