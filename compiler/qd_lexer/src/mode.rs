//! Lexical modes and the explicit mode stack.
//!
//! Nesting (comments inside comments, a pipe target inside an alias, ...)
//! is tracked on a heap-allocated stack of [`Frame`]s rather than by
//! recursion, so adversarial input like ten thousand nested `/*` only
//! grows a `Vec`.

use std::fmt;

use crate::lex_error::Construct;

/// A named lexical context. Each mode owns one rule table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Mode {
    /// The leading table reference. Bottom of every fresh stack.
    BaseTable,
    /// Where most query syntax lives.
    Root,
    /// Inside a double-quoted literal.
    String,
    /// Inside a `/* ... */` block. Re-entrant.
    Comment,
    /// One identifier after `|`.
    ScalarFunction,
    /// One identifier after `%`.
    AggregateFunction,
    /// One identifier after `->`.
    Alias,
    /// Shared trivia sub-grammar. Included into other tables, never pushed.
    Whitespace,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Mode::BaseTable => "base-table",
            Mode::Root => "root",
            Mode::String => "string",
            Mode::Comment => "comment",
            Mode::ScalarFunction => "scalar-function",
            Mode::AggregateFunction => "aggregate-function",
            Mode::Alias => "alias",
            Mode::Whitespace => "whitespace",
        }
    }

    /// The construct left open when input ends while this mode is pushed.
    pub const fn construct(self) -> Option<Construct> {
        match self {
            Mode::String => Some(Construct::String),
            Mode::Comment => Some(Construct::Comment),
            Mode::ScalarFunction => Some(Construct::ScalarPipe),
            Mode::AggregateFunction => Some(Construct::AggregatePipe),
            Mode::Alias => Some(Construct::Alias),
            Mode::BaseTable | Mode::Root | Mode::Whitespace => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry on the mode stack.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Frame {
    pub mode: Mode,
    /// Byte offset of the token that entered this mode.
    pub opened_at: u32,
}

/// Last-in-first-out stack of active modes.
///
/// # Invariant
///
/// Never empty. The bottom frame starts as [`Mode::BaseTable`] and is only
/// ever replaced by a switch, never popped.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ModeStack {
    frames: Vec<Frame>,
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeStack {
    pub fn new() -> Self {
        ModeStack {
            frames: vec![Frame {
                mode: Mode::BaseTable,
                opened_at: 0,
            }],
        }
    }

    /// The active mode.
    #[inline]
    pub fn top(&self) -> Mode {
        self.frames.last().map_or(Mode::Root, |frame| frame.mode)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// `true` once every pushed mode has been popped again.
    pub fn is_balanced(&self) -> bool {
        self.frames.len() == 1
    }

    /// Frames above the bottom, innermost last.
    pub fn open_frames(&self) -> &[Frame] {
        self.frames.get(1..).unwrap_or(&[])
    }

    pub(crate) fn push(&mut self, mode: Mode, opened_at: u32) {
        debug_assert!(mode != Mode::Whitespace, "whitespace is include-only");
        self.frames.push(Frame { mode, opened_at });
        tracing::trace!(mode = mode.name(), depth = self.frames.len(), "push mode");
    }

    /// Pop the active mode.
    ///
    /// Popping the bottom frame leaves the stack holding a single `root`
    /// frame and returns `None`.
    pub(crate) fn pop(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            let frame = self.frames.pop();
            tracing::trace!(to = self.top().name(), depth = self.frames.len(), "pop mode");
            frame
        } else {
            tracing::warn!("pop past bottom of mode stack; staying in root");
            self.frames.clear();
            self.frames.push(Frame {
                mode: Mode::Root,
                opened_at: 0,
            });
            None
        }
    }

    /// Replace the active mode in place, keeping the frame's opening offset.
    pub(crate) fn switch_to(&mut self, mode: Mode) {
        if let Some(frame) = self.frames.last_mut() {
            tracing::trace!(from = frame.mode.name(), to = mode.name(), "switch mode");
            frame.mode = mode;
        }
    }
}
