//! Line store — rope-backed text storage addressed by `(line, col)`.
//!
//! The store owns the authoritative character data and exposes a strictly
//! line-addressed contract on top of a [`ropey::Rope`]:
//!
//! - **ropey** gives O(log n) insert/delete anywhere and cheap line lookup,
//!   so per-keystroke edits stay fast on large documents. We never
//!   reimplement text storage; we shape the rope's API into the line/column
//!   contract the rest of the crate relies on.
//!
//! - **Columns are char offsets** into the line's content, excluding its
//!   line break. `col == line_len(line)` is the valid end-of-line caret
//!   slot. Byte offsets never appear in the public API.
//!
//! - **There is always at least one line.** An empty document is one empty
//!   line; a rope is never line-less, so the invariant holds for free.
//!
//! Mutations validate first and fail with [`OutOfRange`] before touching the
//! rope — an invalid call leaves the document untouched. Every successful
//! mutation returns enough information ([`Deleted`], the end position of an
//! insert) for the caller to construct the inverse edit; the store itself
//! records nothing, which is what lets undo/redo replay call straight back
//! into it without recursive bookkeeping.

use ropey::{Rope, RopeSlice};

use crate::error::OutOfRange;
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// Deleted
// ---------------------------------------------------------------------------

/// What a deletion removed: the position the removed text started at and the
/// text itself. Inserting `text` back at `start` reverses the deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub start: Position,
    pub text: String,
}

// ---------------------------------------------------------------------------
// LineStore
// ---------------------------------------------------------------------------

/// The document's text, addressed by line and column.
#[derive(Debug, Clone)]
pub struct LineStore {
    rope: Rope,
}

impl LineStore {
    // -- Construction -------------------------------------------------------

    /// An empty store: one empty line.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// A store holding `text`. Line breaks (`\n`, `\r\n`, `\r`) split lines;
    /// text ending in a break gets a trailing empty line, matching how
    /// editors display such documents.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    // -- Queries ------------------------------------------------------------

    /// Number of lines. Always at least 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// True when the document holds no text at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// A line **including** its trailing break, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        (line < self.rope.len_lines()).then(|| self.rope.line(line))
    }

    /// A line **excluding** its trailing break, or `None` past the end.
    #[must_use]
    pub fn line_content(&self, line: usize) -> Option<RopeSlice<'_>> {
        let slice = self.line(line)?;
        let len = content_len(slice);
        Some(slice.slice(..len))
    }

    /// Chars in a line excluding its trailing break — the range of valid
    /// caret columns on that line is `0..=line_len(line)`.
    #[must_use]
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(content_len)
    }

    /// Index of the longest line by char count. Drives the horizontal
    /// scroll bound. Ties resolve to the earliest line.
    #[must_use]
    pub fn longest_line(&self) -> usize {
        let mut best = 0;
        let mut best_len = 0;
        for i in 0..self.line_count() {
            let len = self.line_len(i).unwrap_or(0);
            if len > best_len {
                best = i;
                best_len = len;
            }
        }
        best
    }

    /// Char count of the longest line.
    #[must_use]
    pub fn max_line_len(&self) -> usize {
        self.line_len(self.longest_line()).unwrap_or(0)
    }

    /// The character at `pos`, or `None` when `pos` does not sit on one
    /// (past the line content, or out of the document).
    #[must_use]
    pub fn char_at(&self, pos: Position) -> Option<char> {
        if pos.col >= self.line_len(pos.line)? {
            return None;
        }
        let idx = self.rope.line_to_char(pos.line) + pos.col;
        Some(self.rope.char(idx))
    }

    /// The whole document as a `String`. Allocates; render paths should
    /// iterate lines instead.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Addressing ---------------------------------------------------------

    /// Resolve `pos` to an absolute char index, or fail if it does not
    /// address the document.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] when `pos.line >= line_count()` or
    /// `pos.col > line_len(pos.line)`.
    pub fn char_index(&self, pos: Position) -> Result<usize, OutOfRange> {
        let len = self.line_len(pos.line).ok_or(OutOfRange::at(pos))?;
        if pos.col > len {
            return Err(OutOfRange::at(pos));
        }
        Ok(self.rope.line_to_char(pos.line) + pos.col)
    }

    /// The nearest valid position to `pos`: line clamped to the last line,
    /// column clamped to that line's length. Used after mutations that may
    /// have shortened the document out from under a remembered position.
    #[must_use]
    pub fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count() - 1);
        let col = pos.col.min(self.line_len(line).unwrap_or(0));
        Position::new(line, col)
    }

    // -- Mutation -----------------------------------------------------------

    /// Insert `text` at `pos`, splitting the line there if `text` contains
    /// line breaks. Returns the position just after the inserted text — the
    /// caret lands there, and deleting `[pos, returned)` reverses the insert.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `pos` does not address the document; nothing is
    /// inserted in that case.
    pub fn insert(&mut self, pos: Position, text: &str) -> Result<Position, OutOfRange> {
        let idx = self.char_index(pos)?;
        self.rope.insert(idx, text);
        Ok(end_after(pos, text))
    }

    /// Delete the single character (or line break) immediately **before**
    /// `pos` — backspace semantics. A break deletion merges `pos.line` into
    /// the line above. Returns `None`, deleting nothing, at the origin.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `pos` does not address the document.
    pub fn delete(&mut self, pos: Position) -> Result<Option<Deleted>, OutOfRange> {
        let idx = self.char_index(pos)?;
        if pos.is_zero() {
            return Ok(None);
        }

        let (start, start_idx) = if pos.col > 0 {
            (Position::new(pos.line, pos.col - 1), idx - 1)
        } else {
            // Column 0 below the first line: remove the previous line's
            // break, which may be one or two chars (\r\n).
            let prev = pos.line - 1;
            let prev_len = self.line_len(prev).unwrap_or(0);
            (
                Position::new(prev, prev_len),
                self.rope.line_to_char(prev) + prev_len,
            )
        };

        let text = self.rope.slice(start_idx..idx).to_string();
        self.rope.remove(start_idx..idx);
        Ok(Some(Deleted { start, text }))
    }

    /// Delete everything in `[range.start, range.end)`, merging lines as
    /// needed. An empty range deletes nothing (the returned text is empty).
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if either endpoint does not address the document;
    /// nothing is deleted in that case.
    pub fn delete_range(&mut self, range: Range) -> Result<Deleted, OutOfRange> {
        let start_idx = self.char_index(range.start)?;
        let end_idx = self.char_index(range.end)?;
        let text = self.rope.slice(start_idx..end_idx).to_string();
        self.rope.remove(start_idx..end_idx);
        Ok(Deleted {
            start: range.start,
            text,
        })
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Chars in a line slice excluding its trailing `\n`, `\r\n`, or `\r`.
fn content_len(line: RopeSlice<'_>) -> usize {
    let total = line.len_chars();
    if total == 0 {
        return 0;
    }
    match line.char(total - 1) {
        '\n' => {
            if total >= 2 && line.char(total - 2) == '\r' {
                total - 2
            } else {
                total - 1
            }
        }
        '\r' => total - 1,
        _ => total,
    }
}

/// The position just after `text` when inserted at `start`: newlines advance
/// the line and reset the column. `\r\n` counts as one break.
pub(crate) fn end_after(start: Position, text: &str) -> Position {
    let mut line = start.line;
    let mut col = start.col;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                line += 1;
                col = 0;
            }
            '\r' => {
                line += 1;
                col = 0;
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            _ => col += 1,
        }
    }

    Position::new(line, col)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines(store: &LineStore) -> Vec<String> {
        (0..store.line_count())
            .map(|i| store.line_content(i).unwrap().to_string())
            .collect()
    }

    // -- Construction & invariant -------------------------------------------

    #[test]
    fn empty_store_is_one_empty_line() {
        let store = LineStore::new();
        assert!(store.is_empty());
        assert_eq!(store.line_count(), 1);
        assert_eq!(store.line_len(0), Some(0));
    }

    #[test]
    fn from_text_splits_lines() {
        let store = LineStore::from_text("ab\ncd");
        assert_eq!(lines(&store), vec!["ab", "cd"]);
    }

    #[test]
    fn trailing_break_yields_trailing_empty_line() {
        let store = LineStore::from_text("ab\n");
        assert_eq!(lines(&store), vec!["ab", ""]);
    }

    #[test]
    fn crlf_counts_as_one_break() {
        let store = LineStore::from_text("ab\r\ncd");
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.line_len(0), Some(2));
        assert_eq!(store.line(0).unwrap().to_string(), "ab\r\n");
        assert_eq!(store.line_content(0).unwrap().to_string(), "ab");
    }

    // -- Queries ------------------------------------------------------------

    #[test]
    fn line_past_end_is_none() {
        let store = LineStore::from_text("ab");
        assert!(store.line(1).is_none());
        assert!(store.line_content(1).is_none());
        assert_eq!(store.line_len(1), None);
    }

    #[test]
    fn longest_line_by_char_count() {
        let store = LineStore::from_text("a\nccc\nbb");
        assert_eq!(store.longest_line(), 1);
        assert_eq!(store.max_line_len(), 3);
    }

    #[test]
    fn longest_line_tie_prefers_earliest() {
        let store = LineStore::from_text("aa\nbb");
        assert_eq!(store.longest_line(), 0);
    }

    #[test]
    fn char_at_content_only() {
        let store = LineStore::from_text("ab\ncd");
        assert_eq!(store.char_at(Position::new(0, 1)), Some('b'));
        assert_eq!(store.char_at(Position::new(1, 0)), Some('c'));
        // The end-of-line caret slot holds no character.
        assert_eq!(store.char_at(Position::new(0, 2)), None);
        assert_eq!(store.char_at(Position::new(5, 0)), None);
    }

    #[test]
    fn unicode_columns_are_chars() {
        let store = LineStore::from_text("café\n你好");
        assert_eq!(store.line_len(0), Some(4));
        assert_eq!(store.char_at(Position::new(0, 3)), Some('é'));
        assert_eq!(store.line_len(1), Some(2));
        assert_eq!(store.char_at(Position::new(1, 1)), Some('好'));
    }

    // -- Addressing ---------------------------------------------------------

    #[test]
    fn char_index_accepts_end_of_line() {
        let store = LineStore::from_text("ab\ncd");
        assert_eq!(store.char_index(Position::new(0, 2)), Ok(2));
        assert_eq!(store.char_index(Position::new(1, 0)), Ok(3));
    }

    #[test]
    fn char_index_rejects_past_content() {
        let store = LineStore::from_text("ab\ncd");
        // Column 3 on "ab" would sit inside the line break.
        assert_eq!(
            store.char_index(Position::new(0, 3)),
            Err(OutOfRange { line: 0, col: 3 })
        );
        assert_eq!(
            store.char_index(Position::new(2, 0)),
            Err(OutOfRange { line: 2, col: 0 })
        );
    }

    #[test]
    fn clamp_position_pulls_into_bounds() {
        let store = LineStore::from_text("hello\nhi");
        assert_eq!(
            store.clamp_position(Position::new(9, 9)),
            Position::new(1, 2)
        );
        assert_eq!(
            store.clamp_position(Position::new(0, 99)),
            Position::new(0, 5)
        );
        let valid = Position::new(0, 3);
        assert_eq!(store.clamp_position(valid), valid);
    }

    // -- Insert -------------------------------------------------------------

    #[test]
    fn insert_within_line() {
        let mut store = LineStore::from_text("hllo");
        let end = store.insert(Position::new(0, 1), "e").unwrap();
        assert_eq!(store.contents(), "hello");
        assert_eq!(end, Position::new(0, 2));
    }

    #[test]
    fn insert_multiline_splits_the_line() {
        let mut store = LineStore::new();
        let end = store.insert(Position::ZERO, "ab\ncd").unwrap();
        assert_eq!(lines(&store), vec!["ab", "cd"]);
        assert_eq!(end, Position::new(1, 2));
    }

    #[test]
    fn insert_in_middle_splits_around() {
        let mut store = LineStore::from_text("xz");
        let end = store.insert(Position::new(0, 1), "1\n2").unwrap();
        assert_eq!(lines(&store), vec!["x1", "2z"]);
        assert_eq!(end, Position::new(1, 1));
    }

    #[test]
    fn insert_at_end_of_line_lands_before_break() {
        let mut store = LineStore::from_text("ab\ncd");
        store.insert(Position::new(0, 2), "!").unwrap();
        assert_eq!(lines(&store), vec!["ab!", "cd"]);
    }

    #[test]
    fn insert_out_of_range_leaves_store_untouched() {
        let mut store = LineStore::from_text("ab");
        assert!(store.insert(Position::new(0, 3), "x").is_err());
        assert!(store.insert(Position::new(1, 0), "x").is_err());
        assert_eq!(store.contents(), "ab");
    }

    // -- Backspace delete ---------------------------------------------------

    #[test]
    fn delete_removes_char_before() {
        let mut store = LineStore::from_text("hello");
        let del = store.delete(Position::new(0, 5)).unwrap().unwrap();
        assert_eq!(store.contents(), "hell");
        assert_eq!(del.start, Position::new(0, 4));
        assert_eq!(del.text, "o");
    }

    #[test]
    fn delete_at_origin_is_noop() {
        let mut store = LineStore::from_text("hello");
        assert_eq!(store.delete(Position::ZERO).unwrap(), None);
        assert_eq!(store.contents(), "hello");
    }

    #[test]
    fn delete_at_column_zero_merges_lines() {
        let mut store = LineStore::from_text("ab\ncd");
        let del = store.delete(Position::new(1, 0)).unwrap().unwrap();
        assert_eq!(store.contents(), "abcd");
        assert_eq!(del.start, Position::new(0, 2));
        assert_eq!(del.text, "\n");
    }

    #[test]
    fn delete_merges_crlf_as_one_break() {
        let mut store = LineStore::from_text("ab\r\ncd");
        let del = store.delete(Position::new(1, 0)).unwrap().unwrap();
        assert_eq!(store.contents(), "abcd");
        assert_eq!(del.text, "\r\n");
    }

    #[test]
    fn delete_out_of_range_fails_loudly() {
        let mut store = LineStore::from_text("ab");
        assert!(store.delete(Position::new(0, 3)).is_err());
        assert_eq!(store.contents(), "ab");
    }

    // -- Range delete -------------------------------------------------------

    #[test]
    fn delete_range_within_line() {
        let mut store = LineStore::from_text("hello world");
        let del = store
            .delete_range(Range::new(Position::new(0, 5), Position::new(0, 11)))
            .unwrap();
        assert_eq!(store.contents(), "hello");
        assert_eq!(del.text, " world");
    }

    #[test]
    fn delete_range_across_lines_merges() {
        let mut store = LineStore::from_text("ab\ncd\nef");
        let del = store
            .delete_range(Range::new(Position::new(0, 1), Position::new(2, 1)))
            .unwrap();
        assert_eq!(store.contents(), "af");
        assert_eq!(del.text, "b\ncd\ne");
    }

    #[test]
    fn delete_empty_range_removes_nothing() {
        let mut store = LineStore::from_text("ab");
        let del = store
            .delete_range(Range::caret(Position::new(0, 1)))
            .unwrap();
        assert_eq!(store.contents(), "ab");
        assert_eq!(del.text, "");
    }

    #[test]
    fn delete_range_validates_both_ends() {
        let mut store = LineStore::from_text("ab\ncd");
        assert!(store
            .delete_range(Range::new(Position::new(0, 0), Position::new(0, 3)))
            .is_err());
        assert_eq!(store.contents(), "ab\ncd");
    }

    #[test]
    fn insert_then_delete_range_is_inverse() {
        let mut store = LineStore::from_text("hello\nworld");
        let pos = Position::new(0, 3);
        let end = store.insert(pos, "xy\nz").unwrap();
        store.delete_range(Range::new(pos, end)).unwrap();
        assert_eq!(store.contents(), "hello\nworld");
    }

    // -- end_after ----------------------------------------------------------

    #[test]
    fn end_after_plain_text() {
        assert_eq!(end_after(Position::new(3, 2), "ab"), Position::new(3, 4));
    }

    #[test]
    fn end_after_breaks_reset_column() {
        assert_eq!(end_after(Position::ZERO, "ab\ncd"), Position::new(1, 2));
        assert_eq!(end_after(Position::new(2, 7), "x\n"), Position::new(3, 0));
        assert_eq!(end_after(Position::ZERO, "a\r\nb"), Position::new(1, 1));
        assert_eq!(end_after(Position::ZERO, "a\rb"), Position::new(1, 1));
    }

    #[test]
    fn end_after_empty_is_start() {
        let p = Position::new(1, 4);
        assert_eq!(end_after(p, ""), p);
    }
}
