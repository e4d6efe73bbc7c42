//! Mode-switching tokenizer for querydown.
//!
//! Converts query text like `#issues due_date:<@6M|ago $title->t` into a
//! lossless stream of classified [`Token`]s. Whitespace and comments are
//! tokens too, so concatenating every token's text reproduces the input.
//!
//! # Architecture
//!
//! - [`mode`]: the lexical contexts and the explicit mode stack.
//! - [`pattern`]: hand-written prefix matchers.
//! - [`rules`]: one static, ordered rule table per mode. First match wins.
//! - [`scanner`]: the loop that drives the tables and applies mode actions.
//!
//! Errors never abort the scan. [`lex`] always returns the best-effort
//! token stream alongside every [`LexError`] encountered.
//!
//! # Example
//!
//! ```
//! use qd_lexer::{lex, TokenKind};
//!
//! let output = lex("#issues 1..5");
//! let kinds: Vec<TokenKind> = output.significant().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::BaseTable,
//!         TokenKind::Number,
//!         TokenKind::RangeSeparator,
//!         TokenKind::Number,
//!     ]
//! );
//! assert!(!output.has_errors());
//! ```

mod lex_error;
pub mod mode;
pub mod pattern;
pub mod rules;
pub mod scanner;
mod span;
mod token;

pub use lex_error::{Construct, LexError, LexErrorKind};
pub use mode::{Frame, Mode, ModeStack};
pub use scanner::Scanner;
pub use span::Span;
pub use token::{Token, TokenKind, UnknownTokenKind};

/// Result of tokenizing one query.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct LexOutput<'src> {
    /// Every token in source order, trivia and error tokens included.
    pub tokens: Vec<Token<'src>>,
    /// Lexical errors in the order they were found, followed by
    /// end-of-input diagnostics for constructs left open.
    pub errors: Vec<LexError>,
}

impl<'src> LexOutput<'src> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Tokens a parser cares about: everything except whitespace and comments.
    pub fn significant(&self) -> impl Iterator<Item = &Token<'src>> + '_ {
        self.tokens.iter().filter(|token| !token.is_trivia())
    }

    /// Strict view: the tokens if the scan was clean, otherwise the errors.
    pub fn into_result(self) -> Result<Vec<Token<'src>>, Vec<LexError>> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}

/// Tokenize a complete query.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> LexOutput<'_> {
    let mut scanner = Scanner::new(source);
    let tokens: Vec<Token<'_>> = scanner.by_ref().collect();
    let errors = scanner.finish();
    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "lexed");
    LexOutput { tokens, errors }
}

#[cfg(test)]
mod tests;
