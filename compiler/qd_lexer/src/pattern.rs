//! Hand-written prefix matchers used by the rule tables.
//!
//! Every matcher has the shape [`Pattern`]: given the remaining input, it
//! returns the byte length of the prefix it matches, or `0` for no match.
//! Matchers only ever stop on ASCII bytes (or end of input), so a non-zero
//! length always lands on a UTF-8 character boundary.
//!
//! Line-anchored patterns (`//` comments, unterminated strings) treat both
//! `\n` and `\r` as the end of a line.

/// Prefix matcher: byte length of the match, `0` when the pattern fails.
pub type Pattern = fn(&str) -> usize;

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
fn is_line_end(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Returns the number of bytes in the UTF-8 character starting with `byte`.
#[inline]
pub(crate) fn utf8_char_width(byte: u8) -> usize {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Length of the run of bytes satisfying `pred`, starting at `from`.
#[inline]
fn run(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|&&b| pred(b)).count())
}

/// Offset of the first line terminator, or the input length.
fn line_end(bytes: &[u8]) -> usize {
    memchr::memchr2(b'\n', b'\r', bytes).unwrap_or(bytes.len())
}

fn ident_at(bytes: &[u8], from: usize) -> usize {
    match bytes.get(from) {
        Some(&b) if is_ident_start(b) => 1 + run(bytes, from + 1, is_ident_continue),
        _ => 0,
    }
}

/// `prefix` followed by an identifier.
fn prefixed_ident(s: &str, prefix: u8) -> usize {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&prefix) {
        return 0;
    }
    match ident_at(bytes, 1) {
        0 => 0,
        n => n + 1,
    }
}

#[inline]
fn byte(s: &str, b: u8) -> usize {
    usize::from(s.as_bytes().first() == Some(&b))
}

#[inline]
fn literal(s: &str, lit: &str) -> usize {
    if s.starts_with(lit) {
        lit.len()
    } else {
        0
    }
}

// ─── Trivia ─────────────────────────────────────────────────────

/// `[ \t\r\n]+`
pub fn whitespace(s: &str) -> usize {
    run(s.as_bytes(), 0, |b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

/// `/*`
pub fn block_comment_open(s: &str) -> usize {
    literal(s, "/*")
}

/// `*/`
pub fn block_comment_close(s: &str) -> usize {
    literal(s, "*/")
}

/// `//` up to the end of the line.
pub fn line_comment(s: &str) -> usize {
    if s.starts_with("//") {
        line_end(s.as_bytes())
    } else {
        0
    }
}

/// `[^/*]+`
pub fn comment_text(s: &str) -> usize {
    memchr::memchr2(b'/', b'*', s.as_bytes()).unwrap_or(s.len())
}

/// A lone `/` or `*` inside a block comment.
pub fn comment_delimiter_char(s: &str) -> usize {
    usize::from(matches!(s.as_bytes().first(), Some(b'/' | b'*')))
}

// ─── Names ──────────────────────────────────────────────────────

/// `[a-zA-Z_][a-zA-Z0-9_]*`
pub fn identifier(s: &str) -> usize {
    ident_at(s.as_bytes(), 0)
}

/// `#identifier`
pub fn table_ref(s: &str) -> usize {
    prefixed_ident(s, b'#')
}

/// `@identifier`
pub fn constant(s: &str) -> usize {
    prefixed_ident(s, b'@')
}

/// `\\[a-z][a-z0-9]*`
pub fn column_control(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes {
        [b'\\', first, ..] if first.is_ascii_lowercase() => {
            2 + run(bytes, 2, |b| b.is_ascii_lowercase() || b.is_ascii_digit())
        }
        _ => 0,
    }
}

// ─── Punctuation ────────────────────────────────────────────────

/// One of `{ } ( ) [ ]`.
pub fn bracket(s: &str) -> usize {
    usize::from(matches!(
        s.as_bytes().first(),
        Some(b'{' | b'}' | b'(' | b')' | b'[' | b']')
    ))
}

pub fn path_separator(s: &str) -> usize {
    byte(s, b'.')
}

pub fn glob(s: &str) -> usize {
    byte(s, b'*')
}

pub fn scalar_pipe(s: &str) -> usize {
    byte(s, b'|')
}

pub fn aggregate_pipe(s: &str) -> usize {
    byte(s, b'%')
}

pub fn column_prefix(s: &str) -> usize {
    byte(s, b'$')
}

pub fn alias_prefix(s: &str) -> usize {
    literal(s, "->")
}

/// `++` or `--`
pub fn has(s: &str) -> usize {
    if s.starts_with("++") || s.starts_with("--") {
        2
    } else {
        0
    }
}

/// `+ - * /`, except a `-` that starts `->`.
pub fn arithmetic(s: &str) -> usize {
    match s.as_bytes() {
        [b'-', b'>', ..] => 0,
        [b'+' | b'-' | b'*' | b'/', ..] => 1,
        _ => 0,
    }
}

/// `(\.\.)?(:|!)(~~|~|>=|>|<=|<)?(\.\.)?`
pub fn comparison_operator(s: &str) -> usize {
    let mut i = literal(s, "..");
    match s.as_bytes().get(i) {
        Some(b':' | b'!') => i += 1,
        _ => return 0,
    }
    let rest = &s[i..];
    i += ["~~", "~", ">=", ">", "<=", "<"]
        .iter()
        .map(|op| literal(rest, op))
        .find(|&n| n > 0)
        .unwrap_or(0);
    i + literal(&s[i..], "..")
}

/// `<?\.\.<?`
pub fn range_separator(s: &str) -> usize {
    let open = byte(s, b'<');
    if literal(&s[open..], "..") == 0 {
        return 0;
    }
    let dots = open + 2;
    dots + byte(&s[dots..], b'<')
}

// ─── Literals ───────────────────────────────────────────────────

/// `@(\d+[ymdwthsYMDWTHS])+`
pub fn duration(s: &str) -> usize {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'@') {
        return 0;
    }
    let mut end = 0;
    let mut i = 1;
    loop {
        let digits = run(bytes, i, |b| b.is_ascii_digit());
        if digits == 0 {
            break;
        }
        match bytes.get(i + digits) {
            Some(
                b'y' | b'm' | b'd' | b'w' | b't' | b'h' | b's' | b'Y' | b'M' | b'D' | b'W'
                | b'T' | b'H' | b'S',
            ) => {
                i += digits + 1;
                end = i;
            }
            _ => break,
        }
    }
    end
}

/// `@\d\d\d\d-\d\d-\d\d`
pub fn date(s: &str) -> usize {
    const SHAPE: &[u8; 11] = b"@dddd-dd-dd";
    let bytes = s.as_bytes();
    if bytes.len() < SHAPE.len() {
        return 0;
    }
    let fits = SHAPE.iter().zip(bytes).all(|(&want, &got)| match want {
        b'd' => got.is_ascii_digit(),
        other => other == got,
    });
    if fits {
        SHAPE.len()
    } else {
        0
    }
}

/// `\d*\.\d+([eE][-+]?\d+)?`
pub fn decimal(s: &str) -> usize {
    let bytes = s.as_bytes();
    let int = run(bytes, 0, |b| b.is_ascii_digit());
    if bytes.get(int) != Some(&b'.') {
        return 0;
    }
    let frac = run(bytes, int + 1, |b| b.is_ascii_digit());
    if frac == 0 {
        return 0;
    }
    let end = int + 1 + frac;
    if !matches!(bytes.get(end), Some(b'e' | b'E')) {
        return end;
    }
    let sign = usize::from(matches!(bytes.get(end + 1), Some(b'-' | b'+')));
    match run(bytes, end + 1 + sign, |b| b.is_ascii_digit()) {
        0 => end,
        exp => end + 1 + sign + exp,
    }
}

/// `\d+`
pub fn integer(s: &str) -> usize {
    run(s.as_bytes(), 0, |b| b.is_ascii_digit())
}

// ─── Strings ────────────────────────────────────────────────────

pub fn string_quote(s: &str) -> usize {
    byte(s, b'"')
}

/// `"` whose line ends before a closing quote: `"([^"\\]|\\.)*$`.
pub fn unterminated_string(s: &str) -> usize {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'"') {
        return 0;
    }
    let mut i = 1;
    loop {
        match bytes.get(i) {
            None => return i,
            Some(&b) if is_line_end(b) => return i,
            Some(b'"') => return 0,
            Some(b'\\') => match bytes.get(i + 1) {
                Some(&next) if !is_line_end(next) => i += 2,
                // `\` at a line end escapes nothing and is not text either.
                _ => return 0,
            },
            Some(_) => i += 1,
        }
    }
}

/// `[^\\"]+`
pub fn string_text(s: &str) -> usize {
    memchr::memchr2(b'\\', b'"', s.as_bytes()).unwrap_or(s.len())
}

/// `\\(?:[abfnrtv\\"']|x[0-9A-Fa-f]{1,4}|u[0-9A-Fa-f]{4}|U[0-9A-Fa-f]{8})`
pub fn escape(s: &str) -> usize {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'\\') {
        return 0;
    }
    let hex = |n: usize| run(bytes, 2, |b| b.is_ascii_hexdigit()).min(n);
    match bytes.get(1) {
        Some(b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\' | b'"' | b'\'') => 2,
        Some(b'x') => match hex(4) {
            0 => 0,
            n => 2 + n,
        },
        Some(b'u') if hex(4) == 4 => 6,
        Some(b'U') if hex(8) == 8 => 10,
        _ => 0,
    }
}

/// A backslash followed by any single character on the same line.
pub fn any_escape(s: &str) -> usize {
    match s.as_bytes() {
        [b'\\', next, ..] if !is_line_end(*next) => 1 + utf8_char_width(*next),
        _ => 0,
    }
}

/// `'[^\\']'`
pub fn char_plain(s: &str) -> usize {
    let mut chars = s.chars();
    if chars.next() != Some('\'') {
        return 0;
    }
    let Some(body) = chars.next() else {
        return 0;
    };
    if matches!(body, '\\' | '\'' | '\n' | '\r') || chars.next() != Some('\'') {
        return 0;
    }
    2 + body.len_utf8()
}

/// `'` escape `'`
pub fn char_escaped(s: &str) -> usize {
    if byte(s, b'\'') == 0 {
        return 0;
    }
    match escape(&s[1..]) {
        0 => 0,
        n if byte(&s[1 + n..], b'\'') == 1 => n + 2,
        _ => 0,
    }
}

/// A lone `'`.
pub fn char_quote(s: &str) -> usize {
    byte(s, b'\'')
}

/// Everything up to the end of the line, at least one character.
pub(crate) fn rest_of_line(s: &str) -> usize {
    let bytes = s.as_bytes();
    match line_end(bytes) {
        0 => bytes.first().map_or(0, |&b| utf8_char_width(b)),
        n => n,
    }
}
