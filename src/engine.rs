//! The drawing engine: routes pointer events through the gesture state
//! machine and reports what the host must do as a list of [`Action`]s.
//!
//! `EngineCore` holds everything and depends on nothing browser-specific, so it
//! is driven directly by tests and the CLI. The wasm binding in [`crate::web`]
//! wraps it together with the canvas element.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::doc::{Background, CanvasState, Line, LineId};
use crate::error::EngineError;
use crate::eraser::{EraseSession, EraserParams};
use crate::geometry::{Bounds, Point, SurfaceTransform};
use crate::hit::hit_selection;
use crate::history::History;
use crate::input::{InputState, PointerEvent, UiState};
use crate::persist::{BlockAttrs, BlockUpdate};
use crate::render::{Scene, build_scene};
use crate::selection::{Marquee, Selection, TransformKind, apply_transform, drag_bounds, members_bounds, select};
use crate::tools::{Tool, ToolController};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// The scene changed; redraw.
    RenderNeeded,
    /// Persist these block attributes.
    Persist(BlockUpdate),
    /// Persist a new `paperType`.
    BackgroundChanged(Background),
    /// Suppress (`true`) or restore (`false`) page scrolling over the canvas.
    ScrollLock(bool),
    /// Set the CSS cursor over the canvas.
    SetCursor(String),
}

/// Core engine state. All logic that doesn't depend on the canvas element.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub config: EngineConfig,
    pub doc: CanvasState,
    pub tools: ToolController,
    pub input: InputState,
    pub ui: UiState,
    pub history: History,
    pub surface: SurfaceTransform,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            doc: CanvasState::new(config.initial_height, Background::default()),
            tools: ToolController::from_config(&config),
            input: InputState::Idle,
            ui: UiState::default(),
            history: History::new(config.history_limit),
            surface: SurfaceTransform::identity(config.canvas_width, config.initial_height),
            config,
        }
    }

    // --- Data inputs ---

    /// Replace the document with hydrated block attributes. Any gesture,
    /// selection and history is dropped.
    pub fn load(&mut self, attrs: BlockAttrs) {
        let height = attrs.height.unwrap_or(self.config.initial_height);
        info!(lines = attrs.lines.len(), height, background = attrs.background.as_str(), "loaded block");
        self.doc = CanvasState { lines: attrs.lines, height, background: attrs.background };
        self.input = InputState::Idle;
        self.ui = UiState::default();
        self.history.clear();
        self.surface.canvas_height = height;
    }

    /// Load block attributes from their JSON value.
    pub fn load_value(&mut self, value: &Value) {
        self.load(BlockAttrs::from_value(value));
    }

    /// Update where the rendering surface sits on screen.
    pub fn set_surface(&mut self, left: f64, top: f64, display_width: f64, display_height: f64) {
        self.surface = SurfaceTransform {
            left,
            top,
            display_width,
            display_height,
            canvas_width: self.config.canvas_width,
            canvas_height: self.doc.height,
        };
    }

    // --- Tool settings ---

    /// Switch tools. Clears the selection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GestureInProgress`] while a gesture is active;
    /// nothing changes in that case.
    pub fn set_tool(&mut self, tool: Tool) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() {
            return Err(EngineError::GestureInProgress { gesture: self.input.name() });
        }
        debug!(tool = tool.as_str(), "tool changed");
        self.tools.tool = tool;
        let mut actions = Vec::new();
        if self.clear_selection() {
            actions.push(Action::RenderNeeded);
        }
        if self.ui.cursor.take().is_some() {
            actions.push(Action::SetCursor("default".to_owned()));
        }
        Ok(actions)
    }

    /// Set the active tool's color.
    pub fn set_color(&mut self, color: &str) {
        self.tools.set_color(color);
    }

    /// Set the active tool's size.
    pub fn set_size(&mut self, size: f64) {
        self.tools.set_size(size);
    }

    /// Change the background pattern.
    pub fn set_background(&mut self, background: Background) -> Vec<Action> {
        self.doc.background = background;
        debug!(background = background.as_str(), "background changed");
        vec![Action::BackgroundChanged(background), self.persist(), Action::RenderNeeded]
    }

    // --- History ---

    /// Undo the last committed mutation. Ignored while a gesture is active.
    pub fn undo(&mut self) -> Vec<Action> {
        if !self.input.is_idle() || !self.history.undo(&mut self.doc.lines) {
            return Vec::new();
        }
        self.clear_selection();
        info!(lines = self.doc.len(), depth = self.history.undo_len(), "undo");
        vec![self.persist(), Action::RenderNeeded]
    }

    /// Redo the last undone mutation. Ignored while a gesture is active.
    pub fn redo(&mut self) -> Vec<Action> {
        if !self.input.is_idle() || !self.history.redo(&mut self.doc.lines) {
            return Vec::new();
        }
        self.clear_selection();
        info!(lines = self.doc.len(), depth = self.history.undo_len(), "redo");
        vec![self.persist(), Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, event: PointerEvent) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let p = self.surface.to_canvas(event.screen);
        let mut actions = Vec::new();

        match self.tools.tool {
            Tool::Pen | Tool::Highlighter | Tool::Eraser if event.is_palm(self.config.palm_min_size) => {
                debug!(pointer = event.pointer_id, "palm contact ignored");
                return actions;
            }
            tool @ (Tool::Pen | Tool::Highlighter) => {
                self.clear_selection();
                let (line_tool, style) = match (tool.line_tool(), self.tools.style()) {
                    (Some(line_tool), Some(style)) => (line_tool, style.clone()),
                    _ => return actions,
                };
                self.input = InputState::Drawing {
                    pointer: event.pointer_id,
                    tool: line_tool,
                    color: style.color,
                    size: style.size,
                    points: vec![p],
                };
                actions.push(Action::ScrollLock(true));
                if grow_canvas(&mut self.doc, &mut self.surface, &self.config, p.y) {
                    actions.push(self.persist());
                }
            }
            Tool::Eraser => {
                self.clear_selection();
                let params = self.eraser_params();
                let mut session = EraseSession::begin(&self.doc.lines, p);
                session.sweep(&mut self.doc.lines, &params);
                self.input = InputState::Erasing { pointer: event.pointer_id, session };
                actions.push(Action::ScrollLock(true));
            }
            Tool::Select => {
                let radius = self.surface.screen_dist_to_canvas(self.config.handle_radius_px);
                let hit = self
                    .ui
                    .selection
                    .as_ref()
                    .and_then(|sel| hit_selection(p, &sel.bounds, radius).map(|part| (part, sel.bounds)));
                self.input = match hit {
                    Some((part, original)) => InputState::Transforming {
                        pointer: event.pointer_id,
                        kind: TransformKind::from(part),
                        start: p,
                        original,
                    },
                    None => {
                        self.clear_selection();
                        InputState::Selecting { pointer: event.pointer_id, marquee: Marquee::new(p) }
                    }
                };
                actions.push(Action::ScrollLock(true));
            }
        }

        debug!(gesture = self.input.name(), pointer = event.pointer_id, x = p.x, y = p.y, "gesture started");
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Vec<Action> {
        if self.input.is_idle() {
            return self.hover(event);
        }
        if self.input.pointer() != Some(event.pointer_id) {
            return Vec::new();
        }
        let p = self.surface.to_canvas(event.screen);
        let params = self.eraser_params();
        let mut actions = Vec::new();

        match &mut self.input {
            InputState::Idle => {}
            InputState::Drawing { points, .. } => {
                points.push(p);
                if grow_canvas(&mut self.doc, &mut self.surface, &self.config, p.y) {
                    actions.push(Action::Persist(BlockUpdate::new(&self.doc.lines, self.doc.height)));
                }
            }
            InputState::Erasing { session, .. } => {
                session.extend(p);
                session.sweep(&mut self.doc.lines, &params);
            }
            InputState::Selecting { marquee, .. } => marquee.current = p,
            InputState::Transforming { kind, start, original, .. } => {
                if let Some(sel) = &mut self.ui.selection {
                    let delta = Point::new(p.x - start.x, p.y - start.y);
                    sel.bounds = drag_bounds(&sel.bounds, original, *kind, delta, self.config.move_threshold, self.config.min_resize);
                }
            }
        }

        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent) -> Vec<Action> {
        if self.input.pointer() != Some(event.pointer_id) {
            return Vec::new();
        }
        let mut actions = vec![Action::ScrollLock(false)];

        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::Drawing { tool, color, size, points, .. } => {
                if points.len() < 2 {
                    debug!(points = points.len(), "discarded tap");
                } else {
                    let line = Line::new(points, tool, color, size);
                    info!(id = %line.id, tool = tool.as_str(), points = line.points.len(), "stroke committed");
                    self.history.record(self.doc.lines.clone());
                    self.doc.lines.push(line);
                    actions.push(self.persist());
                }
            }
            InputState::Erasing { session, .. } => {
                if session.changed() {
                    info!(removed = session.removed, "erase committed");
                    self.history.record(session.before);
                    actions.push(self.persist());
                }
            }
            InputState::Selecting { marquee, .. } => {
                self.ui.selection = select(&self.doc.lines, &marquee.rect(), self.config.min_marquee);
                debug!(members = self.ui.selection.as_ref().map_or(0, |s| s.members.len()), "marquee finished");
            }
            InputState::Transforming { kind, original, .. } => {
                if let Some(sel) = &mut self.ui.selection {
                    if sel.bounds != original {
                        let next = apply_transform(&self.doc.lines, &sel.members, &original, &sel.bounds, kind);
                        info!(kind = kind.as_str(), members = sel.members.len(), "transform committed");
                        self.history.commit(&mut self.doc.lines, next);
                        // Snap the box to where the members landed.
                        if let Some(bounds) = members_bounds(&self.doc.lines, &sel.members) {
                            sel.bounds = bounds;
                        }
                        actions.push(self.persist());
                    }
                }
            }
        }

        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer left the surface: ends the gesture like a release.
    pub fn on_pointer_leave(&mut self, event: PointerEvent) -> Vec<Action> {
        self.on_pointer_up(event)
    }

    /// Pointer cancelled by the platform: ends the gesture like a release.
    pub fn on_pointer_cancel(&mut self, event: PointerEvent) -> Vec<Action> {
        self.on_pointer_up(event)
    }

    // --- Queries ---

    /// Derive the scene to draw.
    #[must_use]
    pub fn scene(&self) -> Scene {
        build_scene(&self.doc, &self.input, &self.ui, &self.config, self.tools.eraser_size)
    }

    /// Current persisted form of the block.
    #[must_use]
    pub fn update(&self) -> BlockUpdate {
        BlockUpdate::new(&self.doc.lines, self.doc.height)
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.doc.lines
    }

    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&Line> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.doc.height
    }

    #[must_use]
    pub fn background(&self) -> Background {
        self.doc.background
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tools.tool
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.ui.selection.as_ref()
    }

    /// Selection box mapped onto the screen, for hosts placing UI beside it.
    #[must_use]
    pub fn selection_screen_bounds(&self) -> Option<Bounds> {
        let bounds = self.ui.selection.as_ref()?.bounds;
        let min = self.surface.to_screen(Point::new(bounds.x, bounds.y));
        let max = self.surface.to_screen(Point::new(bounds.right(), bounds.bottom()));
        Some(Bounds::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.input.is_idle()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Internals ---

    fn persist(&self) -> Action {
        Action::Persist(self.update())
    }

    fn eraser_params(&self) -> EraserParams {
        EraserParams { size: self.tools.eraser_size, tail: self.config.eraser_tail, densify_gap: self.config.densify_gap }
    }

    /// Drop the selection. Returns `true` if there was one.
    fn clear_selection(&mut self) -> bool {
        self.ui.selection.take().is_some()
    }

    /// Idle pointer movement: keep the hover cursor in sync with the
    /// selection under the pointer.
    fn hover(&mut self, event: PointerEvent) -> Vec<Action> {
        if self.tools.tool != Tool::Select {
            return Vec::new();
        }
        let p = self.surface.to_canvas(event.screen);
        let radius = self.surface.screen_dist_to_canvas(self.config.handle_radius_px);
        let cursor = self
            .ui
            .selection
            .as_ref()
            .and_then(|sel| hit_selection(p, &sel.bounds, radius))
            .map_or("default", |part| part.cursor());

        if self.ui.cursor == Some(cursor) {
            return Vec::new();
        }
        self.ui.cursor = Some(cursor);
        vec![Action::SetCursor(cursor.to_owned())]
    }
}

/// Grow the canvas when `y` is within the bottom margin, keeping the surface
/// transform in step. Returns `true` if the height changed.
fn grow_canvas(doc: &mut CanvasState, surface: &mut SurfaceTransform, config: &EngineConfig, y: f64) -> bool {
    if !doc.grow_for(y, config.bottom_margin, config.height_step) {
        return false;
    }
    surface.grow(config.height_step);
    debug!(height = doc.height, "canvas grew");
    true
}
