//! Declarative per-mode rule tables.
//!
//! Each mode owns an ordered list of [`Entry`] values. The scanner tries them
//! top to bottom and the first rule whose pattern matches a non-empty prefix
//! wins. This is priority matching, not longest match: the order of entries
//! in each table *is* the grammar. For example, `comparison_operator` sits
//! above `range_separator`, which sits above `path_separator`, so `1..5`
//! yields a range separator and never two path separators.
//!
//! [`Entry::Include`] splices another mode's entries in place (only the
//! shared `whitespace` sub-grammar is included today).

use crate::lex_error::{Construct, LexErrorKind};
use crate::mode::Mode;
use crate::pattern::{self, Pattern};
use crate::TokenKind;

/// Mode-stack effect of a matched rule.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Action {
    None,
    Push(Mode),
    Pop,
    SwitchTo(Mode),
}

/// How a match is turned into tokens.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Emit {
    /// One token of the given kind.
    Kind(TokenKind),
    /// One delimiter token whose kind depends on the bracket character.
    Bracket,
    /// Three tokens: a one-byte `delimiter`, the `body`, a one-byte `delimiter`.
    Enclosed {
        delimiter: TokenKind,
        body: TokenKind,
    },
}

impl Emit {
    /// Kind of the token covering the first byte of the match.
    pub fn leading_kind(self, first: u8) -> TokenKind {
        match self {
            Emit::Kind(kind) => kind,
            Emit::Bracket => bracket_kind(first),
            Emit::Enclosed { delimiter, .. } => delimiter,
        }
    }
}

/// Delimiter kind for one of `{ } [ ] ( )`.
pub fn bracket_kind(byte: u8) -> TokenKind {
    match byte {
        b'{' | b'}' => TokenKind::DelimiterCurly,
        b'[' | b']' => TokenKind::DelimiterSquare,
        b'(' | b')' => TokenKind::DelimiterParenthesis,
        _ => TokenKind::Invalid,
    }
}

/// One `(pattern, kind, action)` matcher.
#[derive(Copy, Clone, Debug)]
pub struct Rule {
    /// Short identifier, unique within its table.
    pub name: &'static str,
    pub pattern: Pattern,
    pub emit: Emit,
    pub action: Action,
    /// Diagnostic raised whenever this rule matches.
    pub fault: Option<LexErrorKind>,
}

impl Rule {
    const fn new(name: &'static str, pattern: Pattern, kind: TokenKind) -> Self {
        Rule {
            name,
            pattern,
            emit: Emit::Kind(kind),
            action: Action::None,
            fault: None,
        }
    }

    const fn emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }

    const fn then(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    const fn fault(mut self, fault: LexErrorKind) -> Self {
        self.fault = Some(fault);
        self
    }
}

/// An item in a mode's table.
#[derive(Copy, Clone, Debug)]
pub enum Entry {
    Rule(Rule),
    /// Splice in the entries of another mode.
    Include(Mode),
}

/// What the scanner does when no entry of the active mode matches.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Fallback {
    /// One-character `invalid` token.
    InvalidChar,
    /// `invalid` token up to the end of the line (at least one character).
    InvalidLine,
    /// Zero-width `invalid` token for a missing identifier, then pop.
    Expect(Construct),
    /// Switch to another mode without consuming input.
    Defer(Mode),
}

/// Rule table of one mode.
#[derive(Debug)]
pub struct ModeTable {
    pub mode: Mode,
    pub entries: &'static [Entry],
    pub fallback: Fallback,
}

impl ModeTable {
    /// Rules in priority order, with includes expanded one level deep.
    pub fn rules(&self) -> impl Iterator<Item = &'static Rule> {
        self.entries.iter().flat_map(|entry| {
            let spliced: &'static [Entry] = match entry {
                Entry::Rule(_) => std::slice::from_ref(entry),
                Entry::Include(mode) => table(*mode).entries,
            };
            spliced.iter().filter_map(|e| match e {
                Entry::Rule(rule) => Some(rule),
                Entry::Include(_) => None,
            })
        })
    }
}

/// Rule table for `mode`.
pub fn table(mode: Mode) -> &'static ModeTable {
    match mode {
        Mode::BaseTable => &BASE_TABLE,
        Mode::Root => &ROOT,
        Mode::String => &STRING,
        Mode::Comment => &COMMENT,
        Mode::ScalarFunction => &SCALAR_FUNCTION,
        Mode::AggregateFunction => &AGGREGATE_FUNCTION,
        Mode::Alias => &ALIAS,
        Mode::Whitespace => &WHITESPACE,
    }
}

use Entry::{Include, Rule as R};

static WHITESPACE: ModeTable = ModeTable {
    mode: Mode::Whitespace,
    entries: &[
        R(Rule::new("white", pattern::whitespace, TokenKind::White)),
        R(
            Rule::new("comment_open", pattern::block_comment_open, TokenKind::Comment)
                .then(Action::Push(Mode::Comment)),
        ),
        R(Rule::new("line_comment", pattern::line_comment, TokenKind::Comment)),
        R(
            Rule::new("unmatched_close", pattern::block_comment_close, TokenKind::Invalid)
                .fault(LexErrorKind::UnmatchedCommentClose),
        ),
    ],
    fallback: Fallback::InvalidChar,
};

static BASE_TABLE: ModeTable = ModeTable {
    mode: Mode::BaseTable,
    entries: &[
        Include(Mode::Whitespace),
        R(Rule::new("base_table", pattern::table_ref, TokenKind::BaseTable)
            .then(Action::SwitchTo(Mode::Root))),
    ],
    fallback: Fallback::Defer(Mode::Root),
};

static ROOT: ModeTable = ModeTable {
    mode: Mode::Root,
    entries: &[
        Include(Mode::Whitespace),
        R(Rule::new("bracket", pattern::bracket, TokenKind::Invalid).emit(Emit::Bracket)),
        R(Rule::new("column", pattern::identifier, TokenKind::Column)),
        R(Rule::new("table_with_many", pattern::table_ref, TokenKind::TableWithMany)),
        R(Rule::new("duration", pattern::duration, TokenKind::Duration)),
        R(Rule::new("constant", pattern::constant, TokenKind::Constant)),
        R(Rule::new("date", pattern::date, TokenKind::Date)),
        R(Rule::new(
            "comparison",
            pattern::comparison_operator,
            TokenKind::ComparisonOperator,
        )),
        R(Rule::new("range", pattern::range_separator, TokenKind::RangeSeparator)),
        R(Rule::new("path", pattern::path_separator, TokenKind::PathSeparator)),
        R(Rule::new("glob", pattern::glob, TokenKind::Glob)),
        R(Rule::new("scalar_pipe", pattern::scalar_pipe, TokenKind::ScalarPipe)
            .then(Action::Push(Mode::ScalarFunction))),
        R(
            Rule::new("aggregate_pipe", pattern::aggregate_pipe, TokenKind::AggregatePipe)
                .then(Action::Push(Mode::AggregateFunction)),
        ),
        R(Rule::new("decimal", pattern::decimal, TokenKind::Number)),
        R(Rule::new("integer", pattern::integer, TokenKind::Number)),
        R(
            Rule::new("unterminated_string", pattern::unterminated_string, TokenKind::StringInvalid)
                .fault(LexErrorKind::Unterminated(Construct::String)),
        ),
        R(Rule::new("string_open", pattern::string_quote, TokenKind::StringQuote)
            .then(Action::Push(Mode::String))),
        R(Rule::new("char", pattern::char_plain, TokenKind::String)),
        R(
            Rule::new("char_escape", pattern::char_escaped, TokenKind::String).emit(
                Emit::Enclosed {
                    delimiter: TokenKind::String,
                    body: TokenKind::StringEscape,
                },
            ),
        ),
        R(Rule::new("unterminated_char", pattern::char_quote, TokenKind::StringInvalid)
            .fault(LexErrorKind::Unterminated(Construct::Char))),
        R(Rule::new("has", pattern::has, TokenKind::Has)),
        R(Rule::new("operator", pattern::arithmetic, TokenKind::Operator)),
        R(Rule::new("column_prefix", pattern::column_prefix, TokenKind::ColumnPrefix)),
        R(Rule::new("alias_prefix", pattern::alias_prefix, TokenKind::AliasPrefix)
            .then(Action::Push(Mode::Alias))),
        R(Rule::new("column_control", pattern::column_control, TokenKind::ColumnControl)),
    ],
    fallback: Fallback::InvalidChar,
};

static SCALAR_FUNCTION: ModeTable = ModeTable {
    mode: Mode::ScalarFunction,
    entries: &[R(Rule::new(
        "scalar_function",
        pattern::identifier,
        TokenKind::ScalarFunction,
    )
    .then(Action::Pop))],
    fallback: Fallback::Expect(Construct::ScalarPipe),
};

static AGGREGATE_FUNCTION: ModeTable = ModeTable {
    mode: Mode::AggregateFunction,
    entries: &[R(Rule::new(
        "aggregate_function",
        pattern::identifier,
        TokenKind::AggregateFunction,
    )
    .then(Action::Pop))],
    fallback: Fallback::Expect(Construct::AggregatePipe),
};

static ALIAS: ModeTable = ModeTable {
    mode: Mode::Alias,
    entries: &[
        Include(Mode::Whitespace),
        R(Rule::new("alias", pattern::identifier, TokenKind::Alias).then(Action::Pop)),
    ],
    fallback: Fallback::Expect(Construct::Alias),
};

static COMMENT: ModeTable = ModeTable {
    mode: Mode::Comment,
    entries: &[
        R(Rule::new("text", pattern::comment_text, TokenKind::Comment)),
        R(Rule::new("nested_open", pattern::block_comment_open, TokenKind::Comment)
            .then(Action::Push(Mode::Comment))),
        R(Rule::new("close", pattern::block_comment_close, TokenKind::Comment)
            .then(Action::Pop)),
        R(Rule::new("stray", pattern::comment_delimiter_char, TokenKind::Comment)),
    ],
    fallback: Fallback::InvalidChar,
};

static STRING: ModeTable = ModeTable {
    mode: Mode::String,
    entries: &[
        R(Rule::new("text", pattern::string_text, TokenKind::String)),
        R(Rule::new("escape", pattern::escape, TokenKind::StringEscape)),
        R(Rule::new("bad_escape", pattern::any_escape, TokenKind::StringEscapeInvalid)
            .fault(LexErrorKind::InvalidEscape)),
        R(Rule::new("close", pattern::string_quote, TokenKind::StringQuote).then(Action::Pop)),
    ],
    fallback: Fallback::InvalidLine,
};

#[cfg(test)]
mod tests;
