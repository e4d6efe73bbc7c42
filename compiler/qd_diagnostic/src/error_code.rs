use std::fmt;

/// Error codes for all querydown diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unexpected character
    E0002,
    /// Unterminated character literal
    E0003,
    /// Invalid escape sequence
    E0004,
    /// Unterminated block comment
    E0005,
    /// `*/` without a matching `/*`
    E0006,
    /// Missing function name after a pipe
    E0007,
    /// Missing alias name after `->`
    E0008,

    // Internal Errors (E9xxx)
    /// Query text too large to tokenize
    E9001,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E9001,
    ];

    /// Get the error code as a string (e.g., "E0001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line summary of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unexpected character",
            ErrorCode::E0003 => "unterminated character literal",
            ErrorCode::E0004 => "invalid escape sequence",
            ErrorCode::E0005 => "unterminated block comment",
            ErrorCode::E0006 => "unmatched comment close",
            ErrorCode::E0007 => "missing function name after pipe",
            ErrorCode::E0008 => "missing alias name",
            ErrorCode::E9001 => "query too large",
        }
    }

    /// Look up a code from its string form, case-insensitively.
    ///
    /// Backs `qd explain <code>`.
    pub fn parse(code: &str) -> Option<ErrorCode> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
