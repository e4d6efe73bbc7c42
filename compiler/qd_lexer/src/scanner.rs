//! The scanner loop.
//!
//! Matches the head of the remaining input against the active mode's rule
//! table, emits the token(s) for the first match, applies the rule's mode
//! action and advances. Every step either consumes at least one byte or
//! strictly shrinks the mode stack, so the loop always terminates.

use std::collections::VecDeque;

use crate::lex_error::{LexError, LexErrorKind};
use crate::mode::ModeStack;
use crate::pattern;
use crate::rules::{self, Action, Emit, Fallback, Rule};
use crate::{Span, Token, TokenKind};

/// Incremental tokenizer over one query.
///
/// Yields tokens in source order. Errors accumulate on the side and are
/// collected with [`Scanner::finish`].
pub struct Scanner<'src> {
    source: &'src str,
    /// Byte offset of the next unconsumed byte.
    pos: u32,
    /// Source length; `pos == end` means done.
    end: u32,
    stack: ModeStack,
    /// Trailing tokens of a multi-token match.
    queued: VecDeque<Token<'src>>,
    errors: Vec<LexError>,
    /// End-of-input diagnostics have been emitted.
    closed: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut scanner = Scanner {
            source,
            pos: 0,
            end: 0,
            stack: ModeStack::new(),
            queued: VecDeque::new(),
            errors: Vec::new(),
            closed: false,
        };
        match u32::try_from(source.len()) {
            Ok(len) => scanner.end = len,
            Err(_) => {
                tracing::debug!(len = source.len(), "source too large to scan");
                scanner
                    .errors
                    .push(LexError::new(Span::point(0), LexErrorKind::SourceTooLarge));
                scanner.closed = true;
            }
        }
        scanner
    }

    /// Mode stack as of the last yielded token.
    pub fn mode_stack(&self) -> &ModeStack {
        &self.stack
    }

    /// Byte offset of the next unconsumed byte.
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Drain remaining tokens and return every error seen.
    pub fn finish(mut self) -> Vec<LexError> {
        while self.next().is_some() {}
        self.errors
    }

    fn slice(&self, start: u32, end: u32) -> Token<'src> {
        let span = Span::new(start, end);
        Token::new(TokenKind::Invalid, &self.source[span.to_range()], span)
    }

    fn token(&self, kind: TokenKind, start: u32, end: u32) -> Token<'src> {
        Token {
            kind,
            ..self.slice(start, end)
        }
    }

    /// Try every rule of the active mode; `None` when nothing matches.
    fn match_rule(&self) -> Option<(&'static Rule, u32)> {
        let rest = &self.source[self.pos as usize..];
        rules::table(self.stack.top())
            .rules()
            .find_map(|rule| match (rule.pattern)(rest) {
                0 => None,
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "match length <= rest.len(), which fits in u32"
                )]
                len => Some((rule, len as u32)),
            })
    }

    fn apply(&mut self, rule: &Rule, len: u32) -> Token<'src> {
        let start = self.pos;
        let end = start + len;
        let first = self.source.as_bytes()[start as usize];

        if let Some(kind) = rule.fault {
            self.errors.push(LexError::new(Span::new(start, end), kind));
        }

        let token = match rule.emit {
            Emit::Enclosed { delimiter, body } => {
                let inner = self.token(body, start + 1, end - 1);
                let close = self.token(delimiter, end - 1, end);
                self.queued.extend([inner, close]);
                self.token(delimiter, start, start + 1)
            }
            Emit::Kind(_) | Emit::Bracket => self.token(rule.emit.leading_kind(first), start, end),
        };

        match rule.action {
            Action::None => {}
            Action::Push(mode) => self.stack.push(mode, start),
            Action::Pop => {
                self.stack.pop();
            }
            Action::SwitchTo(mode) => self.stack.switch_to(mode),
        }

        tracing::trace!(rule = rule.name, kind = token.kind.name(), %start, %end, "match");
        self.pos = end;
        token
    }

    /// Recovery when no rule of the active mode matches.
    ///
    /// Returns `None` when the fallback only changed modes.
    fn recover(&mut self, fallback: Fallback) -> Option<Token<'src>> {
        let source = self.source;
        let rest = &source[self.pos as usize..];
        let start = self.pos;
        match fallback {
            Fallback::Defer(mode) => {
                self.stack.switch_to(mode);
                None
            }
            Fallback::Expect(construct) => {
                self.errors
                    .push(LexError::missing_identifier(start, construct));
                self.stack.pop();
                Some(self.slice(start, start))
            }
            Fallback::InvalidChar | Fallback::InvalidLine => {
                let len = match fallback {
                    Fallback::InvalidLine => pattern::rest_of_line(rest),
                    _ => rest
                        .as_bytes()
                        .first()
                        .map_or(0, |&b| pattern::utf8_char_width(b)),
                };
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "len <= rest.len(), which fits in u32"
                )]
                let end = start + len as u32;
                let span = Span::new(start, end);
                tracing::trace!(mode = self.stack.top().name(), %span, "no rule matched");
                self.errors.push(LexError::unexpected_char(span));
                self.pos = end;
                Some(self.slice(start, end))
            }
        }
    }

    /// One diagnostic per frame still open at end of input, outermost first.
    fn close_open_frames(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let end = self.end;
        let unterminated = self.stack.open_frames().iter().filter_map(|frame| {
            frame
                .mode
                .construct()
                .map(|construct| LexError::unterminated(Span::new(frame.opened_at, end), construct))
        });
        self.errors.extend(unterminated);
        tracing::debug!(
            depth = self.stack.depth(),
            errors = self.errors.len(),
            "end of input"
        );
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if let Some(token) = self.queued.pop_front() {
            return Some(token);
        }
        while self.pos < self.end {
            if let Some((rule, len)) = self.match_rule() {
                return Some(self.apply(rule, len));
            }
            let fallback = rules::table(self.stack.top()).fallback;
            if let Some(token) = self.recover(fallback) {
                return Some(token);
            }
        }
        self.close_open_frames();
        None
    }
}
