//! # etch-layout — geometry for etch
//!
//! Maps between the content model's `(line, col)` addresses and pixel
//! coordinates, and computes the scroll bounds a viewport needs:
//!
//! - **[`metrics`]** — the `FontMetrics` seam and grid-font defaults
//! - **[`engine`]** — measurement, tab expansion, position↔point, extents
//!
//! Everything here is pure: the engine reads the document and returns
//! numbers. It never mutates text and holds no reference between calls.

pub mod engine;
pub mod metrics;
