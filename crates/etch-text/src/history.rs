//! Edit history — a dual-stack undo/redo of single reversible edits.
//!
//! Every [`Content`](crate::content::Content) mutation is one history entry.
//! There is **no coalescing**: a keystroke's insert is its own record, so
//! undo steps back keystroke by keystroke. That trades undo-stack depth for
//! zero bookkeeping latency on the typing path.
//!
//! Each record carries the cursor position from before and after its edit.
//! Undo restores the before-position, redo the after-position, so a full
//! unwind recovers the original text *and* the original cursor exactly.
//!
//! Undoing applies the inverse straight to the store. The store records
//! nothing on its own — recording is an explicit call made only by the
//! façade's forward path — so replay cannot re-record itself.

use crate::position::{Position, Range};
use crate::store::{end_after, LineStore};

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// One reversible edit: the text involved and where it starts. That is
/// enough to run the edit in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// `text` was inserted at `start`. Inverse: delete `[start, end)`.
    Insert { start: Position, text: String },

    /// `text` was deleted from `start`. Inverse: insert it back.
    Delete { start: Position, text: String },
}

impl Edit {
    #[must_use]
    pub fn insert(start: Position, text: &str) -> Self {
        Self::Insert {
            start,
            text: text.to_string(),
        }
    }

    #[must_use]
    pub fn delete(start: Position, text: String) -> Self {
        Self::Delete { start, text }
    }

    /// Apply the inverse of this edit to the store.
    fn unapply(&self, store: &mut LineStore) {
        match self {
            Self::Insert { start, text } => {
                let end = end_after(*start, text);
                store
                    .delete_range(Range::new(*start, end))
                    .expect("history out of sync with store");
            }
            Self::Delete { start, text } => {
                store
                    .insert(*start, text)
                    .expect("history out of sync with store");
            }
        }
    }

    /// Re-apply this edit to the store.
    fn apply(&self, store: &mut LineStore) {
        match self {
            Self::Insert { start, text } => {
                store
                    .insert(*start, text)
                    .expect("history out of sync with store");
            }
            Self::Delete { start, text } => {
                let end = end_after(*start, text);
                store
                    .delete_range(Range::new(*start, end))
                    .expect("history out of sync with store");
            }
        }
    }
}

/// An edit plus the cursor positions bracketing it.
#[derive(Debug, Clone)]
struct Record {
    edit: Edit,
    cursor_before: Position,
    cursor_after: Position,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Undo and redo stacks over a line store.
///
/// Recording a new edit clears the redo stack — there is no branching
/// history. Unbounded by default; [`with_limit`](Self::with_limit) caps the
/// undo depth for embedders under memory pressure.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Record>,
    redo_stack: Vec<Record>,
    limit: Option<usize>,
}

impl History {
    /// An empty, unbounded history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: None,
        }
    }

    /// An empty history that keeps at most `limit` undoable edits,
    /// evicting the oldest beyond that.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Change the depth limit, evicting immediately if the stack already
    /// exceeds it. `None` removes the bound.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.enforce_limit();
    }

    /// Drop all recorded edits, keeping the configured limit.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Record an edit that was just applied to the store, with the cursor
    /// position before and after it. Clears the redo stack.
    pub fn record(&mut self, edit: Edit, cursor_before: Position, cursor_after: Position) {
        self.redo_stack.clear();
        self.undo_stack.push(Record {
            edit,
            cursor_before,
            cursor_after,
        });
        self.enforce_limit();
    }

    /// Reverse the most recent edit. Returns the cursor position from
    /// before that edit, or `None` (store untouched) when there is nothing
    /// to undo.
    pub fn undo(&mut self, store: &mut LineStore) -> Option<Position> {
        let record = self.undo_stack.pop()?;
        record.edit.unapply(store);
        let cursor = record.cursor_before;
        self.redo_stack.push(record);
        Some(cursor)
    }

    /// Re-apply the most recently undone edit. Returns the cursor position
    /// from after that edit, or `None` (store untouched) when there is
    /// nothing to redo.
    pub fn redo(&mut self, store: &mut LineStore) -> Option<Position> {
        let record = self.redo_stack.pop()?;
        record.edit.apply(store);
        let cursor = record.cursor_after;
        self.undo_stack.push(record);
        Some(cursor)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Evict oldest records past the limit. Only runs when a limit is set;
    /// eviction from the front is linear in the stack but bounded by it.
    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.remove(0);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Insert into the store and record it, the way the façade does.
    fn insert(store: &mut LineStore, h: &mut History, pos: Position, text: &str) {
        let before = pos;
        let end = store.insert(pos, text).unwrap();
        h.record(Edit::insert(pos, text), before, end);
    }

    /// Backspace at `pos` and record it.
    fn backspace(store: &mut LineStore, h: &mut History, pos: Position) {
        let del = store.delete(pos).unwrap().unwrap();
        h.record(Edit::delete(del.start, del.text), pos, del.start);
    }

    // -- Undo / redo basics -------------------------------------------------

    #[test]
    fn undo_insert_removes_it() {
        let mut store = LineStore::new();
        let mut h = History::new();

        insert(&mut store, &mut h, Position::ZERO, "ab\ncd");
        assert_eq!(store.contents(), "ab\ncd");

        let cursor = h.undo(&mut store).unwrap();
        assert_eq!(store.contents(), "");
        assert_eq!(cursor, Position::ZERO);
    }

    #[test]
    fn undo_delete_restores_it() {
        let mut store = LineStore::from_text("hello");
        let mut h = History::new();

        backspace(&mut store, &mut h, Position::new(0, 5));
        assert_eq!(store.contents(), "hell");

        let cursor = h.undo(&mut store).unwrap();
        assert_eq!(store.contents(), "hello");
        assert_eq!(cursor, Position::new(0, 5));
    }

    #[test]
    fn redo_reapplies() {
        let mut store = LineStore::new();
        let mut h = History::new();

        insert(&mut store, &mut h, Position::ZERO, "hi");
        h.undo(&mut store);

        let cursor = h.redo(&mut store).unwrap();
        assert_eq!(store.contents(), "hi");
        assert_eq!(cursor, Position::new(0, 2));
    }

    #[test]
    fn undo_redo_undo_cycle() {
        let mut store = LineStore::from_text("hello");
        let mut h = History::new();

        backspace(&mut store, &mut h, Position::new(0, 5));
        h.undo(&mut store);
        assert_eq!(store.contents(), "hello");
        h.redo(&mut store);
        assert_eq!(store.contents(), "hell");
        h.undo(&mut store);
        assert_eq!(store.contents(), "hello");
    }

    // -- Empty-stack no-ops -------------------------------------------------

    #[test]
    fn undo_on_empty_reports_nothing() {
        let mut store = LineStore::from_text("hi");
        let mut h = History::new();
        assert_eq!(h.undo(&mut store), None);
        assert_eq!(store.contents(), "hi");
    }

    #[test]
    fn redo_on_empty_reports_nothing() {
        let mut store = LineStore::from_text("hi");
        let mut h = History::new();
        assert_eq!(h.redo(&mut store), None);
        assert_eq!(store.contents(), "hi");
    }

    // -- Ordering -----------------------------------------------------------

    #[test]
    fn each_edit_is_its_own_entry() {
        let mut store = LineStore::new();
        let mut h = History::new();

        insert(&mut store, &mut h, Position::ZERO, "a");
        insert(&mut store, &mut h, Position::new(0, 1), "b");
        insert(&mut store, &mut h, Position::new(0, 2), "c");
        assert_eq!(h.undo_count(), 3);

        h.undo(&mut store);
        assert_eq!(store.contents(), "ab");
        h.undo(&mut store);
        assert_eq!(store.contents(), "a");
        h.undo(&mut store);
        assert_eq!(store.contents(), "");
    }

    #[test]
    fn full_unwind_then_full_replay() {
        let mut store = LineStore::new();
        let mut h = History::new();

        insert(&mut store, &mut h, Position::ZERO, "one\n");
        insert(&mut store, &mut h, Position::new(1, 0), "two");
        backspace(&mut store, &mut h, Position::new(1, 3));
        assert_eq!(store.contents(), "one\ntw");

        while h.undo(&mut store).is_some() {}
        assert_eq!(store.contents(), "");

        while h.redo(&mut store).is_some() {}
        assert_eq!(store.contents(), "one\ntw");
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut store = LineStore::new();
        let mut h = History::new();

        insert(&mut store, &mut h, Position::ZERO, "x");
        h.undo(&mut store);
        assert!(h.can_redo());

        insert(&mut store, &mut h, Position::ZERO, "y");
        assert!(!h.can_redo());
        assert_eq!(store.contents(), "y");
    }

    // -- Multiline edits ----------------------------------------------------

    #[test]
    fn undo_break_merge() {
        let mut store = LineStore::from_text("ab\ncd");
        let mut h = History::new();

        backspace(&mut store, &mut h, Position::new(1, 0));
        assert_eq!(store.contents(), "abcd");

        let cursor = h.undo(&mut store).unwrap();
        assert_eq!(store.contents(), "ab\ncd");
        assert_eq!(cursor, Position::new(1, 0));
    }

    #[test]
    fn redo_break_merge() {
        let mut store = LineStore::from_text("ab\ncd");
        let mut h = History::new();

        backspace(&mut store, &mut h, Position::new(1, 0));
        h.undo(&mut store);
        let cursor = h.redo(&mut store).unwrap();
        assert_eq!(store.contents(), "abcd");
        assert_eq!(cursor, Position::new(0, 2));
    }

    // -- Depth limit --------------------------------------------------------

    #[test]
    fn limit_evicts_oldest() {
        let mut store = LineStore::new();
        let mut h = History::with_limit(2);

        insert(&mut store, &mut h, Position::ZERO, "a");
        insert(&mut store, &mut h, Position::new(0, 1), "b");
        insert(&mut store, &mut h, Position::new(0, 2), "c");
        assert_eq!(h.undo_count(), 2);

        // "a" fell off the bottom: unwinding stops at "a".
        while h.undo(&mut store).is_some() {}
        assert_eq!(store.contents(), "a");
    }

    #[test]
    fn set_limit_evicts_immediately() {
        let mut store = LineStore::new();
        let mut h = History::new();

        for i in 0..4 {
            insert(&mut store, &mut h, Position::new(0, i), "x");
        }
        assert_eq!(h.undo_count(), 4);

        h.set_limit(Some(1));
        assert_eq!(h.undo_count(), 1);
    }

    // -- Clear --------------------------------------------------------------

    #[test]
    fn clear_drops_both_stacks() {
        let mut store = LineStore::new();
        let mut h = History::new();

        insert(&mut store, &mut h, Position::ZERO, "a");
        insert(&mut store, &mut h, Position::new(0, 1), "b");
        h.undo(&mut store);

        h.clear();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }
}
