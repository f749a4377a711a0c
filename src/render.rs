//! Rendering: derives a drawable scene from the engine state.
//!
//! This module is pure. It receives read-only views of the canvas, the active
//! gesture and the selection, and produces a [`Scene`]: a flat, back-to-front
//! list of filled outlines and overlay shapes in canvas coordinates. Backends
//! (the HTML canvas binding in [`crate::web`], or an SVG writer) only draw it.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::consts::{ERASER_TRAIL_COLOR, HANDLE_DRAW_RADIUS};
use crate::doc::{Background, CanvasState, Line, LineTool};
use crate::geometry::{Bounds, Point};
use crate::hit::ResizeAnchor;
use crate::input::{InputState, UiState};
use crate::outline::{Polygon, StrokeShape, dot, stroke_outline};
use crate::selection::remap_points;

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    /// A filled stroke outline.
    Stroke { outline: Polygon, color: String, opacity: f64 },
    /// Round-capped polyline showing the eraser's recent path.
    EraserTrail { points: Vec<Point>, width: f64, color: &'static str },
    /// Dashed rubber-band rectangle.
    Marquee(Bounds),
    /// Dashed box around the selection.
    SelectionBox(Bounds),
    /// Resize handle.
    Handle { anchor: ResizeAnchor, center: Point, radius: f64 },
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Background,
    /// Back to front.
    pub items: Vec<SceneItem>,
}

/// Summary counts, handy for logging and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SceneStats {
    pub strokes: usize,
    pub overlays: usize,
}

impl Scene {
    #[must_use]
    pub fn stats(&self) -> SceneStats {
        let strokes = self.items.iter().filter(|i| matches!(i, SceneItem::Stroke { .. })).count();
        SceneStats { strokes, overlays: self.items.len() - strokes }
    }
}

/// Derive the scene for the current state.
///
/// Layers, bottom first: persisted lines (members remapped to the live bounds
/// during a transform), the in-progress stroke, the eraser trail, the marquee,
/// then the selection box and its handles. The eraser trail is drawn
/// `eraser_size` wide.
#[must_use]
pub fn build_scene(doc: &CanvasState, input: &InputState, ui: &UiState, config: &EngineConfig, eraser_size: f64) -> Scene {
    let mut items = Vec::with_capacity(doc.lines.len() + 12);

    // Layer 1: persisted lines.
    let preview = match (input, &ui.selection) {
        (InputState::Transforming { kind, original, .. }, Some(sel)) => Some((*kind, *original, sel)),
        _ => None,
    };
    for line in &doc.lines {
        if line.tool == LineTool::Eraser {
            continue;
        }
        let item = match preview {
            Some((kind, original, sel)) if sel.contains(&line.id) => {
                let points = remap_points(&line.points, &original, &sel.bounds, kind);
                stroke_item(&points, line.tool, &line.color, line.size, config)
            }
            _ => line_item(line, config),
        };
        items.extend(item);
    }

    // Layer 2: gesture feedback.
    match input {
        InputState::Drawing { tool, color, size, points, .. } => {
            items.extend(stroke_item(points, *tool, color, *size, config));
        }
        InputState::Erasing { session, .. } => {
            let start = session.path.len().saturating_sub(config.eraser_tail.max(1));
            items.push(SceneItem::EraserTrail {
                points: session.path[start..].to_vec(),
                width: eraser_size,
                color: ERASER_TRAIL_COLOR,
            });
        }
        InputState::Selecting { marquee, .. } => items.push(SceneItem::Marquee(marquee.rect())),
        InputState::Idle | InputState::Transforming { .. } => {}
    }

    // Layer 3: selection UI.
    if let Some(sel) = &ui.selection {
        items.push(SceneItem::SelectionBox(sel.bounds));
        for anchor in ResizeAnchor::ALL {
            items.push(SceneItem::Handle { anchor, center: anchor.position(&sel.bounds), radius: HANDLE_DRAW_RADIUS });
        }
    }

    Scene { width: config.canvas_width, height: doc.height, background: doc.background, items }
}

fn line_item(line: &Line, config: &EngineConfig) -> Option<SceneItem> {
    if let [p] = line.points.as_slice() {
        return Some(SceneItem::Stroke {
            outline: dot(*p, line.size * 0.5),
            color: ink(&line.color, config.dark_mode),
            opacity: opacity(line.tool, config),
        });
    }
    stroke_item(&line.points, line.tool, &line.color, line.size, config)
}

fn stroke_item(points: &[Point], tool: LineTool, color: &str, size: f64, config: &EngineConfig) -> Option<SceneItem> {
    let shape = StrokeShape::for_tool(tool, size).with_densify_gap(config.densify_gap);
    let outline = stroke_outline(points, &shape);
    if outline.is_empty() {
        return None;
    }
    Some(SceneItem::Stroke { outline, color: ink(color, config.dark_mode), opacity: opacity(tool, config) })
}

fn opacity(tool: LineTool, config: &EngineConfig) -> f64 {
    if tool == LineTool::Highlighter { config.highlighter_opacity } else { 1.0 }
}

/// Display color for stored ink. In dark mode pure black and pure white swap
/// so default strokes stay visible; other colors pass through.
#[must_use]
pub fn ink(color: &str, dark_mode: bool) -> String {
    if !dark_mode {
        return color.to_owned();
    }
    match color.trim().to_ascii_lowercase().as_str() {
        "#000" | "#000000" | "black" => "#ffffff".to_owned(),
        "#fff" | "#ffffff" | "white" => "#000000".to_owned(),
        _ => color.to_owned(),
    }
}
