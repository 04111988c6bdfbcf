//! Content — the façade over store, history, cursor, and selection.
//!
//! Every consumer — renderer, input-method bridge, touch handler — talks to
//! the document through this one type. `Content` exclusively owns the
//! [`LineStore`], the [`History`], the [`Cursor`], and the [`Selection`];
//! nothing mutates them behind its back, and `&mut self` on every mutating
//! method makes each logical edit a single atomic state transition.
//!
//! An edit is: validate, mutate the store, record the inverse, move the
//! cursor, restart the selection — in that order. Validation failing means
//! nothing else happened; the document is never left half-edited.
//!
//! Defined no-ops (backspace at the origin, undo on an empty stack,
//! navigation past the document edge) return `false` and leave the whole
//! state — cursor and selection included — untouched.

use std::fmt;

use ropey::RopeSlice;
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::error::OutOfRange;
use crate::history::{Edit, History};
use crate::position::{Position, Range};
use crate::selection::Selection;
use crate::store::LineStore;

/// A mutable document with cursor, selection, and undo history.
#[derive(Debug, Default)]
pub struct Content {
    store: LineStore,
    history: History,
    cursor: Cursor,
    selection: Selection,
}

impl Content {
    // -- Construction -------------------------------------------------------

    /// An empty document: one empty line, cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding `text`, cursor at the origin.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            store: LineStore::from_text(text),
            history: History::new(),
            cursor: Cursor::new(),
            selection: Selection::new(),
        }
    }

    /// Atomically replace the whole document: the store is rebuilt, the
    /// cursor returns to the origin, the selection restarts, and the edit
    /// history is cleared (a replaced document has nothing to undo into).
    pub fn set_text(&mut self, text: &str) {
        self.store = LineStore::from_text(text);
        self.history.clear();
        self.cursor = Cursor::new();
        self.selection = Selection::new();
        debug!(lines = self.store.line_count(), "document replaced");
    }

    /// Cap (or uncap, with `None`) the undo depth.
    pub fn set_history_limit(&mut self, limit: Option<usize>) {
        self.history.set_limit(limit);
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `pos`. The cursor lands just after the inserted
    /// text and the selection restarts.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `pos` does not address the document — state is
    /// left untouched.
    pub fn insert(&mut self, pos: Position, text: &str) -> Result<(), OutOfRange> {
        let before = self.cursor.position();
        let end = self.store.insert(pos, text)?;
        if !text.is_empty() {
            self.history.record(Edit::insert(pos, text), before, end);
        }
        self.cursor.set(self.store.clamp_position(end));
        self.selection.restart();
        trace!(line = pos.line, col = pos.col, chars = text.chars().count(), "insert");
        Ok(())
    }

    /// Backspace before `pos`: remove one character, or one line break
    /// (merging `pos.line` into the line above). Returns `Ok(false)` at the
    /// origin, with state bit-for-bit unchanged.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `pos` does not address the document.
    pub fn delete(&mut self, pos: Position) -> Result<bool, OutOfRange> {
        let before = self.cursor.position();
        let Some(del) = self.store.delete(pos)? else {
            return Ok(false);
        };
        let start = del.start;
        self.history.record(Edit::delete(start, del.text), before, start);
        self.cursor.set(start);
        self.selection.restart();
        trace!(line = start.line, col = start.col, "delete");
        Ok(true)
    }

    /// Backspace at the cursor. With an active selection this deletes the
    /// selected range instead and collapses cursor and selection to its
    /// start. Returns whether anything was deleted.
    pub fn backspace(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let pos = self.cursor.position();
        self.delete(pos).expect("cursor position is always valid")
    }

    /// Delete `[range.start, range.end)`, merging lines as needed. The
    /// cursor collapses to `range.start`. An empty range is a no-op.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if either endpoint does not address the document —
    /// state is left untouched.
    pub fn delete_range(&mut self, range: Range) -> Result<(), OutOfRange> {
        let before = self.cursor.position();
        let del = self.store.delete_range(range)?;
        if del.text.is_empty() {
            return Ok(());
        }
        self.history
            .record(Edit::delete(del.start, del.text), before, del.start);
        self.cursor.set(range.start);
        self.selection.restart();
        trace!(
            start_line = range.start.line,
            start_col = range.start.col,
            "delete range"
        );
        Ok(())
    }

    /// Delete the active selection, collapsing cursor and selection to its
    /// start. Returns `false`, changing nothing, when no selection is
    /// active.
    pub fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection.range().filter(|r| !r.is_empty()) else {
            return false;
        };
        self.delete_range(range)
            .expect("selection endpoints are always valid");
        true
    }

    // -- Undo / redo --------------------------------------------------------

    /// Reverse the most recent edit, restoring the cursor to where it was
    /// before that edit. Returns `false`, changing nothing, when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.store) {
            Some(pos) => {
                self.cursor.set(self.store.clamp_position(pos));
                self.selection.restart();
                trace!("undo");
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone edit, restoring the cursor to
    /// where it was after that edit. Returns `false`, changing nothing,
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.store) {
            Some(pos) => {
                self.cursor.set(self.store.clamp_position(pos));
                self.selection.restart();
                trace!("redo");
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -- Cursor -------------------------------------------------------------

    /// Cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor.position()
    }

    /// Place the cursor at `pos` (a tap, a programmatic jump). Restarts the
    /// selection.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `pos` does not address the document.
    pub fn move_to(&mut self, pos: Position) -> Result<(), OutOfRange> {
        self.store.char_index(pos)?;
        self.cursor.set(pos);
        self.selection.restart();
        Ok(())
    }

    /// One step left. The selection anchor is dropped only when the cursor
    /// actually moved, so the no-op at the origin changes nothing.
    pub fn move_left(&mut self) -> bool {
        let moved = self.cursor.move_left(&self.store);
        if moved {
            self.selection.restart();
        }
        moved
    }

    /// One step right.
    pub fn move_right(&mut self) -> bool {
        let moved = self.cursor.move_right(&self.store);
        if moved {
            self.selection.restart();
        }
        moved
    }

    /// One line up, column clamped to the target line.
    pub fn move_up(&mut self) -> bool {
        let moved = self.cursor.move_up(&self.store);
        if moved {
            self.selection.restart();
        }
        moved
    }

    /// One line down, column clamped to the target line.
    pub fn move_down(&mut self) -> bool {
        let moved = self.cursor.move_down(&self.store);
        if moved {
            self.selection.restart();
        }
        moved
    }

    // -- Selection ----------------------------------------------------------

    /// Anchor a selection at the cursor. Movement through
    /// [`select_to`](Self::select_to) extends it from here.
    pub fn begin_selection(&mut self) {
        self.selection.set_anchor(self.cursor.position());
    }

    /// Extend the selection to `pos`, moving the cursor with it. Anchors at
    /// the current cursor first if no selection was in progress.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `pos` does not address the document.
    pub fn select_to(&mut self, pos: Position) -> Result<(), OutOfRange> {
        self.store.char_index(pos)?;
        if !self.selection.is_anchored() {
            self.selection.set_anchor(self.cursor.position());
        }
        self.cursor.set(pos);
        self.selection.extend_to(pos);
        Ok(())
    }

    /// Drop the selection anchor.
    pub fn clear_selection(&mut self) {
        self.selection.restart();
    }

    /// The active selection in document order, or `None` when inactive or
    /// empty.
    #[must_use]
    pub fn selection(&self) -> Option<Range> {
        self.selection.range().filter(|r| !r.is_empty())
    }

    // -- Queries ------------------------------------------------------------

    /// Number of lines; at least 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.store.line_count()
    }

    /// A line including its trailing break, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        self.store.line(line)
    }

    /// A line excluding its trailing break, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn line_content(&self, line: usize) -> Option<RopeSlice<'_>> {
        self.store.line_content(line)
    }

    /// Chars in a line excluding its trailing break.
    #[inline]
    #[must_use]
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.store.line_len(line)
    }

    /// Index of the longest line by char count.
    #[inline]
    #[must_use]
    pub fn longest_line(&self) -> usize {
        self.store.longest_line()
    }

    /// Char count of the longest line.
    #[inline]
    #[must_use]
    pub fn max_line_len(&self) -> usize {
        self.store.max_line_len()
    }

    /// The character at `pos`, if one sits there.
    #[inline]
    #[must_use]
    pub fn char_at(&self, pos: Position) -> Option<char> {
        self.store.char_at(pos)
    }

    /// The whole document as a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.store.contents()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.contents())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
