//! Selection — an anchored range, separate from the cursor.
//!
//! A selection is an anchor plus a head. The anchor is the end that stays
//! put; the head follows the pointer or cursor. Either may come first in
//! document order — [`range`](Selection::range) normalizes.
//!
//! When no anchor is set the selection is inactive and behaves as a
//! zero-length range wherever the cursor is. `restart` returns it to that
//! state; the façade calls it on every edit and on every plain cursor move.

use crate::position::{Position, Range};

/// An anchored span of the document, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    anchor: Option<Position>,
    head: Position,
}

impl Selection {
    /// An inactive selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            anchor: None,
            head: Position::ZERO,
        }
    }

    /// Drop the anchor; the selection becomes inactive.
    pub const fn restart(&mut self) {
        self.anchor = None;
    }

    /// Anchor the selection at `pos`. Head and anchor coincide until the
    /// first extension.
    pub const fn set_anchor(&mut self, pos: Position) {
        self.anchor = Some(pos);
        self.head = pos;
    }

    /// Move the head to `pos`, activating at `pos` first if no anchor was
    /// set.
    pub fn extend_to(&mut self, pos: Position) {
        if self.anchor.is_none() {
            self.anchor = Some(pos);
        }
        self.head = pos;
    }

    /// The anchored end, if any.
    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// True once an anchor is set, even while the span is still empty.
    #[inline]
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// The selected span in document order, or `None` when inactive.
    /// May be empty (anchor == head) — see [`is_active`](Self::is_active).
    #[must_use]
    pub fn range(&self) -> Option<Range> {
        self.anchor.map(|anchor| Range::ordered(anchor, self.head))
    }

    /// True when an anchor is set and the span is non-empty.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.range().is_some_and(|r| !r.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
