//! Cursor — a single position with directional movement.
//!
//! The cursor does not own or borrow the store; movement methods take it as
//! a parameter, so the cursor stays a plain value type.
//!
//! Movement rules:
//!
//! - **Left** at column 0 wraps to the end of the previous line; **right**
//!   at the end of a line wraps to column 0 of the next. At the document
//!   edges the move is a no-op.
//! - **Up/down** keep the column, clamped to the target line's length.
//!   There is no remembered "desired column": each vertical step clamps
//!   from the column the cursor is on *now*, so moving through a short line
//!   loses the wider column for the steps after it.
//!
//! Every method returns whether the cursor actually moved; a `false` return
//! guarantees the cursor is bit-for-bit unchanged.

use crate::position::Position;
use crate::store::LineStore;

/// A caret in the document. Always holds a valid position for the store it
/// is used with; [`clamp`](Self::clamp) renormalizes after document edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    /// A cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pos: Position::ZERO,
        }
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.pos.line
    }

    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.pos.col
    }

    /// Place the cursor at `pos`. The caller guarantees validity; use
    /// [`clamp`](Self::clamp) when the position may be stale.
    #[inline]
    pub const fn set(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// Pull the cursor back inside the document after it shrank.
    pub fn clamp(&mut self, store: &LineStore) {
        self.pos = store.clamp_position(self.pos);
    }

    // -- Movement -----------------------------------------------------------

    /// One step left; wraps to the end of the previous line at column 0.
    /// No-op at the origin.
    pub fn move_left(&mut self, store: &LineStore) -> bool {
        if self.pos.col > 0 {
            self.pos.col -= 1;
            true
        } else if self.pos.line > 0 {
            self.pos.line -= 1;
            self.pos.col = store.line_len(self.pos.line).unwrap_or(0);
            true
        } else {
            false
        }
    }

    /// One step right; wraps to column 0 of the next line at line end.
    /// No-op at the document end.
    pub fn move_right(&mut self, store: &LineStore) -> bool {
        let len = store.line_len(self.pos.line).unwrap_or(0);
        if self.pos.col < len {
            self.pos.col += 1;
            true
        } else if self.pos.line + 1 < store.line_count() {
            self.pos.line += 1;
            self.pos.col = 0;
            true
        } else {
            false
        }
    }

    /// One line up, column clamped to the shorter line. No-op on line 0.
    pub fn move_up(&mut self, store: &LineStore) -> bool {
        if self.pos.line == 0 {
            return false;
        }
        self.pos.line -= 1;
        self.pos.col = self.pos.col.min(store.line_len(self.pos.line).unwrap_or(0));
        true
    }

    /// One line down, column clamped to the shorter line. No-op on the
    /// last line.
    pub fn move_down(&mut self, store: &LineStore) -> bool {
        if self.pos.line + 1 >= store.line_count() {
            return false;
        }
        self.pos.line += 1;
        self.pos.col = self.pos.col.min(store.line_len(self.pos.line).unwrap_or(0));
        true
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
