//! Layout engine — geometry over a read-only view of the document.
//!
//! A pure mapping in both directions: `(line, col)` to pixel `(x, y)` for
//! painting the caret and selection, and `(x, y)` back to `(line, col)` for
//! hit-testing taps. The engine borrows [`Content`] per query and owns no
//! text; its own state is just the metrics, the tab width, and the x origin
//! where column 0 starts (the gutter inset of the paint layer).
//!
//! # Tabs
//!
//! Tab stops are column-aligned, not fixed-width: a tab advances the pen to
//! the next multiple of `tab_width × advance(' ')`, so a tab after three
//! characters is narrower than a tab at the line start — the monospace-grid
//! behavior.
//!
//! # Scroll bounds
//!
//! `content_extent_x`/`content_extent_y` subtract half the viewport from
//! the content size so the last line and the widest line's end can be
//! scrolled toward the middle of the screen instead of pinning to its edge.

use etch_text::content::Content;
use etch_text::error::OutOfRange;
use etch_text::position::Position;

use crate::metrics::FontMetrics;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A pixel coordinate in content space: `(0, 0)` is the top-left of the
/// document, before any scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// LayoutEngine
// ---------------------------------------------------------------------------

/// Geometry queries over a document, parameterized by font metrics.
#[derive(Debug, Clone)]
pub struct LayoutEngine<M> {
    metrics: M,
    tab_width: u8,
    origin_x: f32,
}

impl<M: FontMetrics> LayoutEngine<M> {
    /// An engine with 4-column tabs and column 0 at x = 0.
    #[must_use]
    pub const fn new(metrics: M) -> Self {
        Self {
            metrics,
            tab_width: 4,
            origin_x: 0.0,
        }
    }

    // -- Configuration ------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Swap the metrics (font size or typeface changed).
    pub fn set_metrics(&mut self, metrics: M) {
        self.metrics = metrics;
    }

    #[inline]
    #[must_use]
    pub const fn tab_width(&self) -> u8 {
        self.tab_width
    }

    /// Set the tab stop width in columns, minimum 1.
    pub fn set_tab_width(&mut self, width: u8) {
        self.tab_width = width.max(1);
    }

    #[inline]
    #[must_use]
    pub const fn origin_x(&self) -> f32 {
        self.origin_x
    }

    /// Set the x where column 0 starts (gutter inset).
    pub const fn set_origin_x(&mut self, origin: f32) {
        self.origin_x = origin;
    }

    // -- Measurement --------------------------------------------------------

    /// Vertical extent of one line. Constant: every line is equally tall.
    #[inline]
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.metrics.line_height()
    }

    /// Pixel width of a run of characters, expanding tabs. Stops at a line
    /// break.
    #[must_use]
    pub fn measure<I: IntoIterator<Item = char>>(&self, chars: I) -> f32 {
        self.width_upto(chars, usize::MAX)
    }

    /// Pixel width of the first `col` characters of a run — the caret x
    /// offset for a cursor at that column.
    #[must_use]
    pub fn prefix_width<I: IntoIterator<Item = char>>(&self, chars: I, col: usize) -> f32 {
        self.width_upto(chars, col)
    }

    fn tab_stop(&self) -> f32 {
        f32::from(self.tab_width) * self.metrics.advance(' ')
    }

    fn width_upto<I: IntoIterator<Item = char>>(&self, chars: I, col: usize) -> f32 {
        let tab = self.tab_stop();
        let mut x = 0.0f32;
        for (i, ch) in chars.into_iter().enumerate() {
            if i >= col {
                break;
            }
            match ch {
                '\n' | '\r' => break,
                '\t' => x = next_tab_stop(x, tab),
                _ => x += self.metrics.advance(ch),
            }
        }
        x
    }

    // -- Position ↔ point ---------------------------------------------------

    /// Pixel coordinate of a text position: the top-left corner of the
    /// caret slot at `pos`.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `pos` does not address the document.
    #[allow(clippy::cast_precision_loss)]
    pub fn position_to_point(&self, content: &Content, pos: Position) -> Result<Point, OutOfRange> {
        let len = content.line_len(pos.line).ok_or(OutOfRange::at(pos))?;
        if pos.col > len {
            return Err(OutOfRange::at(pos));
        }
        let line = content
            .line_content(pos.line)
            .ok_or(OutOfRange::at(pos))?;
        Ok(Point::new(
            self.origin_x + self.prefix_width(line.chars(), pos.col),
            pos.line as f32 * self.line_height(),
        ))
    }

    /// The text position nearest a pixel coordinate — the tap hit-test.
    ///
    /// The line comes from the y band the point falls in, clamped into the
    /// document; the column is the caret boundary nearest to x
    /// (round-to-nearest, so tapping the right half of a glyph lands after
    /// it). Never fails: any point maps to some valid position.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn point_to_position(&self, content: &Content, x: f32, y: f32) -> Position {
        let line_height = self.line_height();
        let line = if line_height > 0.0 {
            ((y / line_height).floor().max(0.0) as usize).min(content.line_count() - 1)
        } else {
            0
        };

        let target = x - self.origin_x;
        if target <= 0.0 {
            return Position::new(line, 0);
        }

        let tab = self.tab_stop();
        let mut col = 0;
        let mut width = 0.0f32;
        if let Some(text) = content.line_content(line) {
            for ch in text.chars() {
                let next = match ch {
                    '\t' => next_tab_stop(width, tab),
                    _ => width + self.metrics.advance(ch),
                };
                if next >= target {
                    // Snap to whichever caret boundary is closer.
                    if target - width <= next - target {
                        return Position::new(line, col);
                    }
                    return Position::new(line, col + 1);
                }
                width = next;
                col += 1;
            }
        }
        Position::new(line, col)
    }

    // -- Scroll bounds ------------------------------------------------------

    /// Maximum horizontal scroll offset: the longest line's width (plus the
    /// origin inset) less half the viewport, floored at zero.
    #[must_use]
    pub fn content_extent_x(&self, content: &Content, viewport_width: f32) -> f32 {
        let widest = content
            .line_content(content.longest_line())
            .map_or(0.0, |line| self.measure(line.chars()));
        (self.origin_x + widest - viewport_width / 2.0).max(0.0)
    }

    /// Maximum vertical scroll offset: the document height less half the
    /// viewport, floored at zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn content_extent_y(&self, content: &Content, viewport_height: f32) -> f32 {
        (self.line_height() * content.line_count() as f32 - viewport_height / 2.0).max(0.0)
    }

    /// The inclusive range of lines a viewport at `scroll_y` shows — the
    /// lines a renderer must paint, partially visible edges included.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_lines(
        &self,
        content: &Content,
        scroll_y: f32,
        viewport_height: f32,
    ) -> (usize, usize) {
        let last_line = content.line_count() - 1;
        let line_height = self.line_height();
        if line_height <= 0.0 {
            return (0, last_line);
        }
        let first = ((scroll_y / line_height).floor().max(0.0) as usize).min(last_line);
        let last = (((scroll_y + viewport_height) / line_height).floor().max(0.0) as usize)
            .min(last_line);
        (first, last)
    }
}

/// The next column-aligned tab stop strictly after `x`.
fn next_tab_stop(x: f32, tab: f32) -> f32 {
    if tab <= 0.0 {
        return x;
    }
    ((x / tab).floor() + 1.0) * tab
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
