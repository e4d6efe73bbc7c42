//! Span utility functions for diagnostic rendering.
//!
//! [`LineOffsetTable`] pre-computes line offsets once per query so that
//! every label lookup is a binary search instead of a scan.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use qd_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "#issues\ntitle:~bug";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 8), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 13), (2, 6));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start. `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "lexed sources are limited to u32 byte offsets"
    )]
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(line_breaks(source).map(|i| (i + 1) as u32));
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "line count <= source length, which fits in u32"
    )]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        (line_idx as u32) + 1
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column counts characters, not bytes, from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let offset = (offset as usize).min(source.len());

        let col_text = source.get(line_start..offset).unwrap_or("");
        let col = u32::try_from(col_text.chars().count()).unwrap_or(u32::MAX - 1) + 1;

        (line, col)
    }

    /// Get the byte offset of a line start (1-based line number).
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a 1-based line, without its line terminator.
    pub fn line_text<'src>(&self, source: &'src str, line: u32) -> Option<&'src str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches(['\n', '\r']))
    }

    /// Get the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Offset of the last byte of every line terminator.
///
/// `\n`, `\r\n` and a lone `\r` each end a line, matching the line ends
/// the lexer stops unterminated strings and `//` comments at.
fn line_breaks(source: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = source.as_bytes();
    memchr::memchr2_iter(b'\n', b'\r', bytes)
        .filter(move |&i| !(bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n')))
}
