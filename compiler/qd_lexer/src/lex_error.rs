//! Lexer error types.
//!
//! Errors never stop the scan. Each one records WHERE (`span`) and WHAT
//! (`kind`); rendering with codes, labels and help text happens in
//! `qd_diagnostic` consumers.

use std::fmt;

use crate::Span;

/// A construct that opens with one token and needs a later one to close.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Construct {
    /// `"` ... `"`
    String,
    /// `'` ... `'`
    Char,
    /// `/*` ... `*/`
    Comment,
    /// `|` followed by a function name.
    ScalarPipe,
    /// `%` followed by a function name.
    AggregatePipe,
    /// `->` followed by an alias name.
    Alias,
}

impl Construct {
    pub const fn description(self) -> &'static str {
        match self {
            Construct::String => "string literal",
            Construct::Char => "character literal",
            Construct::Comment => "block comment",
            Construct::ScalarPipe => "scalar pipe",
            Construct::AggregatePipe => "aggregate pipe",
            Construct::Alias => "alias",
        }
    }

    /// What the scanner expected to find to close or complete the construct.
    pub const fn expected(self) -> &'static str {
        match self {
            Construct::String => "closing `\"`",
            Construct::Char => "closing `'`",
            Construct::Comment => "closing `*/`",
            Construct::ScalarPipe => "scalar function name after `|`",
            Construct::AggregatePipe => "aggregate function name after `%`",
            Construct::Alias => "alias name after `->`",
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// What kind of lexer error occurred.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum LexErrorKind {
    /// A construct was still open at end of line or end of input.
    #[error("unterminated {0}")]
    Unterminated(Construct),
    /// A single-shot context found no identifier.
    #[error("missing {}", .0.expected())]
    MissingIdentifier(Construct),
    /// No rule in the active mode matched.
    #[error("unexpected character")]
    UnexpectedChar,
    /// Backslash sequence inside a string that is not a known escape.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// `*/` outside any block comment.
    #[error("`*/` without a matching `/*`")]
    UnmatchedCommentClose,
    /// Input too long for 32-bit byte offsets.
    #[error("query text exceeds {} bytes", u32::MAX)]
    SourceTooLarge,
}

/// A lexer error located in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

impl LexError {
    pub const fn new(span: Span, kind: LexErrorKind) -> Self {
        LexError { span, kind }
    }

    pub const fn unterminated(span: Span, construct: Construct) -> Self {
        Self::new(span, LexErrorKind::Unterminated(construct))
    }

    pub const fn missing_identifier(at: u32, construct: Construct) -> Self {
        Self::new(Span::point(at), LexErrorKind::MissingIdentifier(construct))
    }

    pub const fn unexpected_char(span: Span) -> Self {
        Self::new(span, LexErrorKind::UnexpectedChar)
    }

    pub const fn invalid_escape(span: Span) -> Self {
        Self::new(span, LexErrorKind::InvalidEscape)
    }

    /// `true` for errors raised because input ended or a line ended early.
    pub const fn is_unterminated(&self) -> bool {
        matches!(self.kind, LexErrorKind::Unterminated(_))
    }
}
