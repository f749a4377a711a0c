//! Shared numeric constants for the drawing engine.

// ── Canvas ──────────────────────────────────────────────────────

/// Logical canvas width in canvas units.
pub const CANVAS_WIDTH: f64 = 500.0;

/// Height of a freshly inserted block.
pub const DEFAULT_HEIGHT: f64 = 400.0;

/// Distance from the bottom edge that triggers canvas growth.
pub const BOTTOM_MARGIN: f64 = 50.0;

/// Amount the canvas grows by each time the bottom margin is crossed.
pub const HEIGHT_STEP: f64 = 100.0;

/// Hydrated coordinates beyond this magnitude on either axis are dropped.
pub const MAX_COORDINATE: f64 = 1_000_000.0;

// ── Strokes ─────────────────────────────────────────────────────

/// Maximum distance between consecutive points before outlining.
pub const DENSIFY_GAP: f64 = 10.0;

/// Upper bound on points inserted into one segment while densifying.
pub const MAX_DENSIFY_STEPS: usize = 1024;

/// Segments used to approximate each round end cap.
pub const CAP_SEGMENTS: usize = 8;

/// Segments used to approximate a single-point dot.
pub const DOT_SEGMENTS: usize = 16;

/// Opacity applied to highlighter strokes.
pub const HIGHLIGHTER_OPACITY: f64 = 0.4;

// ── Eraser ──────────────────────────────────────────────────────

/// Number of trailing erase points outlined per query and drawn as the trail.
pub const ERASER_TAIL: usize = 5;

/// Trail color for the in-progress eraser path.
pub const ERASER_TRAIL_COLOR: &str = "rgba(150, 150, 150, 0.8)";

// ── Selection ───────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Drawn radius of a resize handle in canvas units.
pub const HANDLE_DRAW_RADIUS: f64 = 4.0;

/// Drag distance below which a transform leaves the bounds untouched.
pub const MOVE_THRESHOLD: f64 = 2.0;

/// Smallest width or height a resize may produce.
pub const MIN_RESIZE: f64 = 10.0;

/// Marquees not larger than this on either axis select nothing.
pub const MIN_MARQUEE: f64 = 5.0;

/// Divisor floor for proportional remapping of degenerate bounds.
pub const MIN_REMAP_EXTENT: f64 = 1.0;

// ── Input ───────────────────────────────────────────────────────

/// Touch contacts at least this wide or tall are treated as a resting palm.
pub const PALM_MIN_SIZE: f64 = 50.0;
