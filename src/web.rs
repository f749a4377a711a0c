//! Browser binding: owns the `<canvas>` element, forwards DOM pointer events
//! to [`EngineCore`] and draws its [`Scene`] with the 2D context.
//!
//! Actions and block updates cross the boundary as JSON strings. The host
//! applies `set_cursor` and `scroll_lock` itself and persists `persist`
//! payloads into the block attributes.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Path2d};

use crate::config::EngineConfig;
use crate::doc::Background;
use crate::engine::{Action, EngineCore};
use crate::geometry::{Bounds, Point};
use crate::input::{PointerEvent, PointerKind};
use crate::persist::BlockAttrs;
use crate::render::{Scene, SceneItem};
use crate::tools::Tool;

/// Spacing of grid, ruled and dotted backgrounds in canvas units.
const PATTERN_SPACING: f64 = 20.0;
const PATTERN_DOT_RADIUS: f64 = 1.0;
const SELECTION_COLOR: &str = "#1E90FF";
const SELECTION_DASH: f64 = 4.0;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn actions_json(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(js_err)
}

/// The drawing engine bound to one canvas element.
#[wasm_bindgen]
pub struct WebEngine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: EngineCore,
}

#[wasm_bindgen]
impl WebEngine {
    /// Bind to `canvas`. `config_json` may be a partial configuration object.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is not valid JSON or the canvas has no 2D
    /// context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<WebEngine, JsValue> {
        let config = match config_json.as_deref() {
            Some(text) => EngineConfig::from_json(text).map_err(js_err)?,
            None => EngineConfig::default(),
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let engine = Self { canvas, ctx, core: EngineCore::new(config) };
        engine.sync_size();
        Ok(engine)
    }

    // --- Delegated data inputs ---

    /// Load the block attributes `{ lines, height, paperType }`.
    ///
    /// # Errors
    ///
    /// Fails if `attrs_json` is not valid JSON.
    pub fn load(&mut self, attrs_json: &str) -> Result<(), JsValue> {
        let attrs = BlockAttrs::from_json(attrs_json).map_err(js_err)?;
        self.core.load(attrs);
        self.sync_size();
        Ok(())
    }

    /// Current block attributes as JSON.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn update_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.update()).map_err(js_err)
    }

    /// # Errors
    ///
    /// Fails with a message while a gesture is in progress.
    pub fn set_tool(&mut self, tool: &str) -> Result<String, JsValue> {
        let tool = match tool {
            "pen" => Tool::Pen,
            "highlighter" => Tool::Highlighter,
            "eraser" => Tool::Eraser,
            "select" => Tool::Select,
            other => return Err(JsValue::from_str(&format!("unknown tool: {other}"))),
        };
        let actions = self.core.set_tool(tool).map_err(js_err)?;
        actions_json(&actions)
    }

    pub fn set_color(&mut self, color: &str) {
        self.core.set_color(color);
    }

    pub fn set_size(&mut self, size: f64) {
        self.core.set_size(size);
    }

    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn set_background(&mut self, paper_type: &str) -> Result<String, JsValue> {
        let actions = self.core.set_background(Background::parse(paper_type));
        self.sync_size();
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn undo(&mut self) -> Result<String, JsValue> {
        let actions = self.core.undo();
        self.sync_size();
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn redo(&mut self) -> Result<String, JsValue> {
        let actions = self.core.redo();
        self.sync_size();
        actions_json(&actions)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.core.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.core.can_redo()
    }

    /// Selection box in client coordinates as JSON, or `null`.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn selection_rect(&mut self) -> Result<String, JsValue> {
        self.refresh_surface();
        serde_json::to_string(&self.core.selection_screen_bounds()).map_err(js_err)
    }

    // --- Input events ---

    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn pointer_down(&mut self, pointer_id: i32, pointer_type: &str, client_x: f64, client_y: f64, width: f64, height: f64) -> Result<String, JsValue> {
        let event = self.event(pointer_id, pointer_type, client_x, client_y, width, height);
        let actions = self.core.on_pointer_down(event);
        self.sync_size();
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn pointer_move(&mut self, pointer_id: i32, pointer_type: &str, client_x: f64, client_y: f64, width: f64, height: f64) -> Result<String, JsValue> {
        let event = self.event(pointer_id, pointer_type, client_x, client_y, width, height);
        let actions = self.core.on_pointer_move(event);
        self.sync_size();
        actions_json(&actions)
    }

    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn pointer_up(&mut self, pointer_id: i32, pointer_type: &str, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let event = self.event(pointer_id, pointer_type, client_x, client_y, 0.0, 0.0);
        actions_json(&self.core.on_pointer_up(event))
    }

    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn pointer_leave(&mut self, pointer_id: i32, pointer_type: &str, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let event = self.event(pointer_id, pointer_type, client_x, client_y, 0.0, 0.0);
        actions_json(&self.core.on_pointer_leave(event))
    }

    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn pointer_cancel(&mut self, pointer_id: i32, pointer_type: &str, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let event = self.event(pointer_id, pointer_type, client_x, client_y, 0.0, 0.0);
        actions_json(&self.core.on_pointer_cancel(event))
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        draw(&self.ctx, &self.core.scene(), self.core.config.dark_mode)
    }
}

impl WebEngine {
    /// Refresh the surface transform from the element's current layout box.
    fn refresh_surface(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.core.set_surface(rect.left(), rect.top(), rect.width(), rect.height());
    }

    fn event(&mut self, pointer_id: i32, pointer_type: &str, client_x: f64, client_y: f64, width: f64, height: f64) -> PointerEvent {
        self.refresh_surface();
        PointerEvent::new(pointer_id, PointerKind::parse(pointer_type), Point::new(client_x, client_y)).with_contact(width, height)
    }

    /// Keep the element's intrinsic size in step with the canvas height.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sync_size(&self) {
        let width = self.core.config.canvas_width.round().max(0.0) as u32;
        let height = self.core.height().round().max(0.0) as u32;
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }
}

// =============================================================
// Drawing
// =============================================================

fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene, dark_mode: bool) -> Result<(), JsValue> {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, scene.width, scene.height);
    draw_background(ctx, scene, dark_mode)?;

    for item in &scene.items {
        match item {
            SceneItem::Stroke { outline, color, opacity } => {
                let path = Path2d::new_with_path_string(&outline.to_svg_path())?;
                ctx.set_global_alpha(*opacity);
                ctx.set_fill_style_str(color);
                ctx.fill_with_path_2d(&path);
                ctx.set_global_alpha(1.0);
            }
            SceneItem::EraserTrail { points, width, color } => draw_trail(ctx, points, *width, color),
            SceneItem::Marquee(rect) | SceneItem::SelectionBox(rect) => draw_dashed_rect(ctx, rect)?,
            SceneItem::Handle { center, radius, .. } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU)?;
                ctx.set_fill_style_str("#ffffff");
                ctx.fill();
                ctx.set_stroke_style_str(SELECTION_COLOR);
                ctx.set_line_width(1.0);
                ctx.stroke();
            }
        }
    }
    Ok(())
}

fn draw_background(ctx: &CanvasRenderingContext2d, scene: &Scene, dark_mode: bool) -> Result<(), JsValue> {
    let color = if dark_mode { "#374151" } else { "#e5e7eb" };
    ctx.set_stroke_style_str(color);
    ctx.set_fill_style_str(color);
    ctx.set_line_width(1.0);

    let (vertical, horizontal) = match scene.background {
        Background::Plain => return Ok(()),
        Background::Grid => (true, true),
        Background::Ruled => (false, true),
        Background::Dotted => {
            let mut y = PATTERN_SPACING;
            while y < scene.height {
                let mut x = PATTERN_SPACING;
                while x < scene.width {
                    ctx.begin_path();
                    ctx.arc(x, y, PATTERN_DOT_RADIUS, 0.0, std::f64::consts::TAU)?;
                    ctx.fill();
                    x += PATTERN_SPACING;
                }
                y += PATTERN_SPACING;
            }
            return Ok(());
        }
    };

    ctx.begin_path();
    if vertical {
        let mut x = PATTERN_SPACING;
        while x < scene.width {
            ctx.move_to(x, 0.0);
            ctx.line_to(x, scene.height);
            x += PATTERN_SPACING;
        }
    }
    if horizontal {
        let mut y = PATTERN_SPACING;
        while y < scene.height {
            ctx.move_to(0.0, y);
            ctx.line_to(scene.width, y);
            y += PATTERN_SPACING;
        }
    }
    ctx.stroke();
    Ok(())
}

fn draw_trail(ctx: &CanvasRenderingContext2d, points: &[Point], width: f64, color: &str) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    if rest.is_empty() {
        ctx.line_to(first.x, first.y);
    }
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.stroke();
}

fn draw_dashed_rect(ctx: &CanvasRenderingContext2d, rect: &Bounds) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH.into());
    dash_array.push(&SELECTION_DASH.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    ctx.set_line_dash(&js_sys::Array::new())?;
    Ok(())
}
