//! # etch — an embeddable text-editor core
//!
//! This crate wires the workspace together into the one surface an
//! embedding widget talks to:
//!
//!   etch-text   → line store, undo history, cursor, selection, Content
//!   etch-layout → font metrics, tab expansion, position↔pixel mapping
//!
//! The [`Editor`] owns one [`Content`] and one [`LayoutEngine`]. External
//! input flows through it in three shapes:
//!
//!   key event      → cursor movement / newline / backspace
//!   committed text → insert at the cursor (the input-method entry point)
//!   tap or drag    → hit-test to a position, then move or select
//!
//! and the render side reads back through it: visible line range, cursor
//! pixel position, selection range, scroll bounds. The editor contains no
//! text-editing logic of its own — every rule lives in the member crates.
//!
//! The host platform's soft-keyboard handle is injected as an
//! [`InputSurface`] trait object at setup; the core never reaches for
//! process-wide state to show or hide it.

use tracing::{debug, trace};

pub use etch_layout::engine::{LayoutEngine, Point};
pub use etch_layout::metrics::{FontMetrics, MonospaceMetrics};
pub use etch_text::content::Content;
pub use etch_text::error::OutOfRange;
pub use etch_text::position::{Position, Range};

// ─── Input events ───────────────────────────────────────────────────────────

/// A directional or editing key, as delivered by the host's key handler.
/// Each maps onto exactly one core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Commits a line break at the cursor.
    Enter,
    /// Backspace: the selection if one is active, else one character.
    Backspace,
}

/// The host's soft-keyboard (or other input UI) handle, injected at setup.
///
/// The editor asks for the surface when editing focus arrives (a tap, an
/// explicit [`Editor::focus`]) and releases it on [`Editor::blur`]; what
/// "showing" means is entirely the host's business.
pub trait InputSurface {
    fn show_input(&mut self);
    fn hide_input(&mut self);
}

// ─── Editor ─────────────────────────────────────────────────────────────────

/// The embeddable editor: one document, one layout, one narrow interface.
pub struct Editor<M> {
    content: Content,
    layout: LayoutEngine<M>,
    viewport_width: f32,
    viewport_height: f32,
    input: Option<Box<dyn InputSurface>>,
}

impl<M: FontMetrics> Editor<M> {
    /// An empty editor rendered with `metrics`. The viewport starts at
    /// 0×0; the host sets it on resize.
    #[must_use]
    pub fn new(metrics: M) -> Self {
        Self {
            content: Content::new(),
            layout: LayoutEngine::new(metrics),
            viewport_width: 0.0,
            viewport_height: 0.0,
            input: None,
        }
    }

    // ─── Configuration ──────────────────────────────────────────────────

    /// Inject the host's input-surface handle.
    pub fn set_input_surface(&mut self, surface: Box<dyn InputSurface>) {
        self.input = Some(surface);
    }

    /// Tell the editor how large its viewport is, in pixels.
    pub const fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Replace the font metrics (typeface or size changed).
    pub fn set_metrics(&mut self, metrics: M) {
        self.layout.set_metrics(metrics);
    }

    /// Tab stop width in columns, minimum 1.
    pub fn set_tab_width(&mut self, width: u8) {
        self.layout.set_tab_width(width);
    }

    #[must_use]
    pub const fn tab_width(&self) -> u8 {
        self.layout.tab_width()
    }

    /// The x where column 0 starts (the paint layer's gutter inset).
    pub const fn set_origin_x(&mut self, origin: f32) {
        self.layout.set_origin_x(origin);
    }

    // ─── Document ───────────────────────────────────────────────────────

    /// Atomically replace the document: cursor to the origin, selection
    /// off, history cleared.
    pub fn set_text(&mut self, text: &str) {
        self.content.set_text(text);
        debug!(lines = self.content.line_count(), "set_text");
    }

    /// The whole document as a `String`.
    #[must_use]
    pub fn text(&self) -> String {
        self.content.contents()
    }

    /// Read access for the render side: line iteration, lengths, cursor,
    /// selection.
    #[must_use]
    pub const fn content(&self) -> &Content {
        &self.content
    }

    // ─── Editing ────────────────────────────────────────────────────────

    /// Insert committed text at the cursor — the input-method bridge calls
    /// this for every commit, one call per logical edit.
    pub fn commit_text(&mut self, text: &str) {
        let pos = self.content.cursor();
        self.content
            .insert(pos, text)
            .expect("cursor position is always valid");
        trace!(chars = text.chars().count(), "commit_text");
    }

    /// Backspace: deletes the selection if active, else the character
    /// before the cursor. Returns whether anything was deleted.
    pub fn backspace(&mut self) -> bool {
        self.content.backspace()
    }

    /// Reverse the most recent edit. `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.content.undo()
    }

    /// Re-apply the most recently undone edit. `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.content.redo()
    }

    /// Dispatch one key event. Returns whether the document or cursor
    /// changed, which is the host's repaint signal.
    pub fn key(&mut self, key: Key) -> bool {
        match key {
            Key::Left => self.content.move_left(),
            Key::Right => self.content.move_right(),
            Key::Up => self.content.move_up(),
            Key::Down => self.content.move_down(),
            Key::Enter => {
                self.commit_text("\n");
                true
            }
            Key::Backspace => self.content.backspace(),
        }
    }

    // ─── Touch ──────────────────────────────────────────────────────────

    /// A tap at a content-space pixel: move the cursor to the nearest
    /// position, drop any selection, and ask for the input surface.
    pub fn tap(&mut self, x: f32, y: f32) {
        let pos = self.layout.point_to_position(&self.content, x, y);
        self.content
            .move_to(pos)
            .expect("hit-test yields a valid position");
        trace!(line = pos.line, col = pos.col, "tap");
        if let Some(surface) = &mut self.input {
            surface.show_input();
        }
    }

    /// Start a drag-selection at a pixel: cursor and anchor move there.
    /// The gesture recognizer itself lives in the host; these two calls are
    /// the entire contract it needs.
    pub fn begin_selection_at(&mut self, x: f32, y: f32) {
        let pos = self.layout.point_to_position(&self.content, x, y);
        self.content
            .move_to(pos)
            .expect("hit-test yields a valid position");
        self.content.begin_selection();
    }

    /// Continue a drag-selection to a pixel: the head (and cursor) follow.
    pub fn extend_selection_to(&mut self, x: f32, y: f32) {
        let pos = self.layout.point_to_position(&self.content, x, y);
        self.content
            .select_to(pos)
            .expect("hit-test yields a valid position");
    }

    /// Editing focus arrived; ask the host to show its input surface.
    pub fn focus(&mut self) {
        if let Some(surface) = &mut self.input {
            surface.show_input();
        }
    }

    /// Editing focus left; ask the host to hide its input surface.
    pub fn blur(&mut self) {
        if let Some(surface) = &mut self.input {
            surface.hide_input();
        }
    }

    // ─── Render queries ─────────────────────────────────────────────────

    /// Cursor position in the document.
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.content.cursor()
    }

    /// Cursor position in pixels — where the caret is drawn.
    #[must_use]
    pub fn cursor_point(&self) -> Point {
        self.layout
            .position_to_point(&self.content, self.content.cursor())
            .expect("cursor position is always valid")
    }

    /// The active selection in document order, or `None`.
    #[must_use]
    pub fn selection(&self) -> Option<Range> {
        self.content.selection()
    }

    /// Vertical extent of one line.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.layout.line_height()
    }

    /// The inclusive line range visible at a vertical scroll offset.
    #[must_use]
    pub fn visible_lines(&self, scroll_y: f32) -> (usize, usize) {
        self.layout
            .visible_lines(&self.content, scroll_y, self.viewport_height)
    }

    /// Maximum horizontal scroll offset for the current viewport.
    #[must_use]
    pub fn max_scroll_x(&self) -> f32 {
        self.layout.content_extent_x(&self.content, self.viewport_width)
    }

    /// Maximum vertical scroll offset for the current viewport.
    #[must_use]
    pub fn max_scroll_y(&self) -> f32 {
        self.layout.content_extent_y(&self.content, self.viewport_height)
    }

    /// The layout engine itself, for hosts that hit-test or measure
    /// directly.
    #[must_use]
    pub const fn layout(&self) -> &LayoutEngine<M> {
        &self.layout
    }
}

impl Editor<MonospaceMetrics> {
    /// An editor with grid-font metrics derived from `font_size`.
    #[must_use]
    pub fn with_font_size(font_size: f32) -> Self {
        Self::new(MonospaceMetrics::new(font_size))
    }

    /// Re-derive the metrics from a new font size.
    pub fn set_font_size(&mut self, font_size: f32) {
        self.layout.set_metrics(MonospaceMetrics::new(font_size));
    }
}

impl Default for Editor<MonospaceMetrics> {
    /// A 16px editor — the host overrides via
    /// [`set_font_size`](Self::set_font_size) or [`Editor::new`].
    fn default() -> Self {
        Self::with_font_size(16.0)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
