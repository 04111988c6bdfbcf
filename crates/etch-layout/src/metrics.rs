//! Font metrics — the seam between the core and whoever owns the font.
//!
//! The layout engine needs two numbers it cannot know itself: how far a
//! glyph advances the pen, and how tall a line is. Both belong to the
//! rendering/theming collaborator, so they arrive through the
//! [`FontMetrics`] trait rather than a baked-in font model.
//!
//! [`MonospaceMetrics`] is the provided implementation for grid fonts: one
//! cell per ordinary glyph, two cells for wide (CJK, emoji) glyphs, zero
//! for zero-width scalars — the same classification the terminal world
//! uses, via `unicode-width`.

use unicode_width::UnicodeWidthChar;

/// Horizontal advance and line height, as the font sees them.
///
/// `line_height` must be positive; `advance` must be non-negative and is
/// never asked about `\t` (the engine expands tabs itself, to column-aligned
/// stops).
pub trait FontMetrics {
    /// Pen advance of one glyph, in pixels.
    fn advance(&self, ch: char) -> f32;

    /// Vertical extent of one line, in pixels. Every line is this tall.
    fn line_height(&self) -> f32;
}

/// Grid-font metrics derived from a font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    cell_width: f32,
    line_height: f32,
}

/// Advance of one cell relative to the font size. The usual monospace
/// aspect; matches what a 2:1 terminal cell grid assumes.
const CELL_FACTOR: f32 = 0.6;

/// Line height relative to the font size.
const LINE_FACTOR: f32 = 1.2;

impl MonospaceMetrics {
    /// Metrics for a font of `font_size` pixels.
    #[must_use]
    pub fn new(font_size: f32) -> Self {
        Self {
            cell_width: font_size * CELL_FACTOR,
            line_height: font_size * LINE_FACTOR,
        }
    }

    /// Metrics with an explicit cell width and line height.
    #[must_use]
    pub const fn with_cell(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width,
            line_height,
        }
    }

    /// Width of one cell.
    #[inline]
    #[must_use]
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }
}

impl FontMetrics for MonospaceMetrics {
    fn advance(&self, ch: char) -> f32 {
        match ch {
            '\n' | '\r' => 0.0,
            // Wide glyphs take two cells, zero-width scalars none.
            #[allow(clippy::cast_precision_loss)]
            _ => self.cell_width * ch.width().unwrap_or(0) as f32,
        }
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
