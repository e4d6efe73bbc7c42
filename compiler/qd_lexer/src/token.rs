//! Token kinds and the token record produced by the scanner.
//!
//! Every [`TokenKind`] has a stable dotted name (`string.escape.invalid`,
//! `qd-number`, ...). Theming layers key their styles on these names, so
//! they must never change once published.

use std::fmt;

use crate::Span;

/// Semantic classification of a token.
///
/// Discriminants are grouped by role:
/// - Tables and columns: 0-15
/// - Literals: 16-31
/// - Operators and pipes: 32-63
/// - Delimiters: 64-79
/// - Trivia: 112-127
/// - Errors: 240-255
///
/// With the `serde` feature, kinds serialize as their stable [`name`].
///
/// [`name`]: TokenKind::name
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "&'static str", try_from = "String")
)]
#[repr(u8)]
pub enum TokenKind {
    // === Tables and columns ===
    /// `#issues` at the start of a query.
    BaseTable = 0,
    /// `#labels` anywhere after the base table.
    TableWithMany = 1,
    /// Bare identifier in root context.
    Column = 2,
    /// `\sd`-style directive controlling a result column.
    ColumnControl = 3,
    /// `$` introducing a result column.
    ColumnPrefix = 4,
    /// Identifier following `|`.
    ScalarFunction = 5,
    /// Identifier following `%`.
    AggregateFunction = 6,
    /// Identifier following `->`.
    Alias = 7,

    // === Literals ===
    /// `@6M`, `@1d12h`.
    Duration = 16,
    /// `@now`, `@null`, `@true`.
    Constant = 17,
    /// `@2024-01-31`.
    Date = 18,
    /// Integer or decimal number.
    Number = 19,
    /// String or character body text.
    String = 20,
    /// Opening or closing `"`.
    StringQuote = 21,
    /// Recognised escape sequence inside a string.
    StringEscape = 22,

    // === Operators and pipes ===
    PathSeparator = 32,
    RangeSeparator = 33,
    Glob = 34,
    ScalarPipe = 35,
    AggregatePipe = 36,
    /// `++` / `--`.
    Has = 37,
    /// Arithmetic `+ - /`.
    Operator = 38,
    /// `:`, `!~~`, `..:>=..` and friends.
    ComparisonOperator = 39,
    /// `->`.
    AliasPrefix = 40,

    // === Delimiters ===
    DelimiterCurly = 64,
    DelimiterSquare = 65,
    DelimiterParenthesis = 66,

    // === Trivia ===
    White = 112,
    Comment = 113,

    // === Errors ===
    /// Backslash sequence that is not a recognised escape.
    StringEscapeInvalid = 240,
    /// Unterminated string or character literal.
    StringInvalid = 241,
    /// Input matching no rule in the active mode.
    Invalid = 242,
}

impl TokenKind {
    /// Every token kind, in discriminant order.
    pub const ALL: [TokenKind; 32] = [
        TokenKind::BaseTable,
        TokenKind::TableWithMany,
        TokenKind::Column,
        TokenKind::ColumnControl,
        TokenKind::ColumnPrefix,
        TokenKind::ScalarFunction,
        TokenKind::AggregateFunction,
        TokenKind::Alias,
        TokenKind::Duration,
        TokenKind::Constant,
        TokenKind::Date,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::StringQuote,
        TokenKind::StringEscape,
        TokenKind::PathSeparator,
        TokenKind::RangeSeparator,
        TokenKind::Glob,
        TokenKind::ScalarPipe,
        TokenKind::AggregatePipe,
        TokenKind::Has,
        TokenKind::Operator,
        TokenKind::ComparisonOperator,
        TokenKind::AliasPrefix,
        TokenKind::DelimiterCurly,
        TokenKind::DelimiterSquare,
        TokenKind::DelimiterParenthesis,
        TokenKind::White,
        TokenKind::Comment,
        TokenKind::StringEscapeInvalid,
        TokenKind::StringInvalid,
        TokenKind::Invalid,
    ];

    /// Stable name used by theming consumers.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::BaseTable => "base-table",
            TokenKind::TableWithMany => "table-with-many",
            TokenKind::Column => "column",
            TokenKind::ColumnControl => "column-control",
            TokenKind::ColumnPrefix => "column-prefix",
            TokenKind::ScalarFunction => "scalar-function",
            TokenKind::AggregateFunction => "aggregate-function",
            TokenKind::Alias => "alias",
            TokenKind::Duration => "duration",
            TokenKind::Constant => "constant",
            TokenKind::Date => "date",
            TokenKind::Number => "qd-number",
            TokenKind::String => "string",
            TokenKind::StringQuote => "string.quote",
            TokenKind::StringEscape => "string.escape",
            TokenKind::PathSeparator => "path-separator",
            TokenKind::RangeSeparator => "range-separator",
            TokenKind::Glob => "glob",
            TokenKind::ScalarPipe => "scalar-pipe",
            TokenKind::AggregatePipe => "aggregate-pipe",
            TokenKind::Has => "has",
            TokenKind::Operator => "operator",
            TokenKind::ComparisonOperator => "comparison-operator",
            TokenKind::AliasPrefix => "alias-prefix",
            TokenKind::DelimiterCurly => "delimiter.curly",
            TokenKind::DelimiterSquare => "delimiter.square",
            TokenKind::DelimiterParenthesis => "delimiter.parenthesis",
            TokenKind::White => "white",
            TokenKind::Comment => "comment",
            TokenKind::StringEscapeInvalid => "string.escape.invalid",
            TokenKind::StringInvalid => "string.invalid",
            TokenKind::Invalid => "invalid",
        }
    }

    /// Look up a kind by its stable name.
    pub fn from_name(name: &str) -> Option<TokenKind> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Whitespace and comments: kept for losslessness, skipped by parsers.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, TokenKind::White | TokenKind::Comment)
    }

    /// Kinds that always carry a lexical error.
    #[inline]
    pub const fn is_error(self) -> bool {
        (self as u8) >= 240
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TokenKind> for &'static str {
    fn from(kind: TokenKind) -> Self {
        kind.name()
    }
}

/// A name that is not one of [`TokenKind::ALL`]'s stable names.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("unknown token kind `{0}`")]
pub struct UnknownTokenKind(pub String);

impl TryFrom<&str> for TokenKind {
    type Error = UnknownTokenKind;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        TokenKind::from_name(name).ok_or_else(|| UnknownTokenKind(name.to_owned()))
    }
}

impl TryFrom<String> for TokenKind {
    type Error = UnknownTokenKind;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        TokenKind::from_name(&name).ok_or(UnknownTokenKind(name))
    }
}

/// A classified slice of the query text.
///
/// `text` borrows from the source, so `&source[span.to_range()] == text`
/// always holds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub const fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Token { kind, text, span }
    }

    #[inline]
    pub const fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} @ {}", self.kind, self.text, self.span)
    }
}
