//! `qd kinds`: list every token kind name.

use std::io::{self, Write};

use qd_lexer::TokenKind;

use super::Options;
use crate::CliError;

/// Print every token kind name to stdout.
pub fn list_kinds(options: &Options) -> Result<bool, CliError> {
    write_kinds(&mut io::stdout().lock(), options)?;
    Ok(true)
}

/// Write the stable kind names in declaration order, one per line or as a
/// JSON array.
pub fn write_kinds(out: &mut impl Write, options: &Options) -> Result<(), CliError> {
    if options.json {
        serde_json::to_writer(&mut *out, &TokenKind::ALL)?;
        writeln!(out)?;
    } else {
        for kind in TokenKind::ALL {
            let mut tags = Vec::new();
            if kind.is_trivia() {
                tags.push("trivia");
            }
            if kind.is_error() {
                tags.push("error");
            }
            if tags.is_empty() {
                writeln!(out, "{kind}")?;
            } else {
                writeln!(out, "{kind} ({})", tags.join(", "))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
