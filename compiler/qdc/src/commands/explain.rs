//! `qd explain`: describe diagnostic codes.

use std::io::{self, Write};

use qd_diagnostic::ErrorCode;
use qd_lexer::lex;
use serde_json::json;

use super::{report_lex_errors, Options};
use crate::CliError;

/// Explain one code, or list every code when `code` is `None`.
pub fn explain_code(code: Option<&str>, options: &Options) -> Result<bool, CliError> {
    write_explanation(&mut io::stdout().lock(), code, options)?;
    Ok(true)
}

/// Write the explanation for `code` (or the full code list) to `out`.
///
/// A single code is followed by the report `qd check` prints for a query
/// that triggers it.
pub fn write_explanation(
    out: &mut impl Write,
    code: Option<&str>,
    options: &Options,
) -> Result<(), CliError> {
    let codes = match code {
        Some(text) => {
            let code =
                ErrorCode::parse(text).ok_or_else(|| CliError::UnknownErrorCode(text.to_string()))?;
            vec![code]
        }
        None => ErrorCode::ALL.to_vec(),
    };

    if options.json {
        let entries: Vec<_> = codes
            .iter()
            .map(|code| {
                json!({
                    "code": code.as_str(),
                    "description": code.description(),
                    "example": example_query(*code),
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
    } else if let &[code] = codes.as_slice() {
        writeln!(out, "{code}: {}", code.description())?;
        if let Some(query) = example_query(code) {
            writeln!(out)?;
            writeln!(out, "Example query: {query:?}")?;
            writeln!(out)?;
            let errors = lex(query).errors;
            report_lex_errors(&mut *out, query, "example", &errors, options, false)?;
        }
    } else {
        for code in codes {
            writeln!(out, "{code}  {}", code.description())?;
        }
    }
    out.flush()?;
    Ok(())
}

/// A query whose first lexical error carries `code`.
fn example_query(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::E0001 => Some("title:\"open"),
        ErrorCode::E0002 => Some("x ^ 1"),
        ErrorCode::E0003 => Some("'"),
        ErrorCode::E0004 => Some("title:\"a\\qb\""),
        ErrorCode::E0005 => Some("#issues /* never closed"),
        ErrorCode::E0006 => Some("a */"),
        ErrorCode::E0007 => Some("title|5"),
        ErrorCode::E0008 => Some("$count ->"),
        ErrorCode::E9001 => None,
    }
}
