//! Lex-time problem rendering.
//!
//! [`LexError`]s carry only a span and a kind. [`render_lex_error`] turns
//! them into [`Diagnostic`]s with an error code, a message quoting the
//! offending text, labels and help.

use qd_diagnostic::{Diagnostic, ErrorCode};
use qd_lexer::{Construct, LexError, LexErrorKind, Span};

/// Render a `LexError` into a `Diagnostic`.
///
/// `source` is the query the error was found in; it is only used to quote
/// the offending text in the message.
#[cold]
pub fn render_lex_error(err: &LexError, source: &str) -> Diagnostic {
    let span = err.span;
    let snippet = source.get(span.to_range()).unwrap_or("");
    match err.kind {
        LexErrorKind::Unterminated(construct) => render_unterminated(span, construct),

        LexErrorKind::MissingIdentifier(construct) => {
            Diagnostic::error(missing_name_code(construct))
                .with_message(format!("missing {}", construct.expected()))
                .with_label(span, "expected a name here")
        }

        LexErrorKind::UnexpectedChar => {
            let message = if snippet.is_empty() {
                "unexpected character".to_string()
            } else {
                format!("unexpected character `{}`", snippet.escape_debug())
            };
            Diagnostic::error(ErrorCode::E0002)
                .with_message(message)
                .with_label(span, "not valid here")
        }

        LexErrorKind::InvalidEscape => Diagnostic::error(ErrorCode::E0004)
            .with_message(format!(
                "invalid escape sequence `{}` in string",
                snippet.escape_debug()
            ))
            .with_label(span, "unknown escape")
            .with_note(
                r#"valid escapes are \a \b \f \n \r \t \v \\ \" \' \xH to \xHHHH, \uHHHH and \UHHHHHHHH"#,
            ),

        LexErrorKind::UnmatchedCommentClose => Diagnostic::error(ErrorCode::E0006)
            .with_message("`*/` without a matching `/*`")
            .with_label(span, "no block comment is open"),

        LexErrorKind::SourceTooLarge => Diagnostic::error(ErrorCode::E9001)
            .with_message(format!("query text exceeds {} bytes", u32::MAX))
            .with_note("byte offsets are 32-bit; split the query"),
    }
}

fn render_unterminated(span: Span, construct: Construct) -> Diagnostic {
    match construct {
        Construct::String => Diagnostic::error(ErrorCode::E0001)
            .with_message("unterminated string literal")
            .with_label(span, "string not closed")
            .with_suggestion("add a closing `\"` before the end of the line"),

        Construct::Char => Diagnostic::error(ErrorCode::E0003)
            .with_message("unterminated character literal")
            .with_label(span, "character literal not closed"),

        Construct::Comment => Diagnostic::error(ErrorCode::E0005)
            .with_message("unterminated block comment")
            .with_label(span, "comment opened here")
            .with_suggestion("close it with `*/`; block comments nest"),

        Construct::ScalarPipe | Construct::AggregatePipe | Construct::Alias => {
            Diagnostic::error(missing_name_code(construct))
                .with_message(format!("query ends before the {}", construct.expected()))
                .with_label(span, format!("{} opened here", construct.description()))
        }
    }
}

fn missing_name_code(construct: Construct) -> ErrorCode {
    match construct {
        Construct::Alias => ErrorCode::E0008,
        _ => ErrorCode::E0007,
    }
}
