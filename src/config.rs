//! Engine configuration.
//!
//! Everything the engine would otherwise read from ambient UI preferences is
//! passed in here at construction time. All fields have defaults so a host can
//! deserialize a partial JSON object.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BOTTOM_MARGIN, CANVAS_WIDTH, DEFAULT_HEIGHT, DENSIFY_GAP, ERASER_TAIL, HANDLE_RADIUS_PX, HEIGHT_STEP,
    HIGHLIGHTER_OPACITY, MIN_MARQUEE, MIN_RESIZE, MOVE_THRESHOLD, PALM_MIN_SIZE,
};
use crate::tools::StyleSettings;

/// Tuning knobs and defaults for one drawing block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical canvas width in canvas units.
    pub canvas_width: f64,
    /// Height used when the host supplies none.
    pub initial_height: f64,
    /// Distance from the bottom edge that triggers growth.
    pub bottom_margin: f64,
    /// Growth increment.
    pub height_step: f64,
    /// Resize handle hit slop in screen pixels.
    pub handle_radius_px: f64,
    /// Transform deltas below this (on both axes) are ignored.
    pub move_threshold: f64,
    /// Smallest width/height a resize may produce.
    pub min_resize: f64,
    /// Marquees not larger than this on either axis select nothing.
    pub min_marquee: f64,
    /// Maximum gap between points before outlining.
    pub densify_gap: f64,
    /// Trailing erase points outlined per eraser query.
    pub eraser_tail: usize,
    /// Touch contacts at least this large are rejected as palms.
    pub palm_min_size: f64,
    /// Maximum undo snapshots kept; `None` keeps every one.
    pub history_limit: Option<usize>,
    /// Opacity of highlighter strokes.
    pub highlighter_opacity: f64,
    /// Swap pure black and white ink when rendering.
    pub dark_mode: bool,
    /// Default pen style.
    pub pen: StyleSettings,
    /// Default highlighter style.
    pub highlighter: StyleSettings,
    /// Default eraser width.
    pub eraser_size: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            initial_height: DEFAULT_HEIGHT,
            bottom_margin: BOTTOM_MARGIN,
            height_step: HEIGHT_STEP,
            handle_radius_px: HANDLE_RADIUS_PX,
            move_threshold: MOVE_THRESHOLD,
            min_resize: MIN_RESIZE,
            min_marquee: MIN_MARQUEE,
            densify_gap: DENSIFY_GAP,
            eraser_tail: ERASER_TAIL,
            palm_min_size: PALM_MIN_SIZE,
            history_limit: None,
            highlighter_opacity: HIGHLIGHTER_OPACITY,
            dark_mode: false,
            pen: StyleSettings::new("#000000", 2.0),
            highlighter: StyleSettings::new("#ff0", 8.0),
            eraser_size: 10.0,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PersistError::InvalidJson`] when the text is not valid JSON
    /// or a present field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, crate::PersistError> {
        Ok(serde_json::from_str(text)?)
    }
}
