use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::doc::{Path, PathHistory};
use crate::export::{self, Artifact, ExportError};
use crate::geometry::{BufferSize, Point, SurfaceGeometry, SurfaceRect};
use crate::input::{InputState, PointerInput};
use crate::render::{CanvasPresenter, PaintCommand, PixmapSink, RenderSink, StrokeStyle};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A paint command the engine applied to its own raster. Hosts with a
    /// visible surface show that raster rather than replaying the command.
    Paint(PaintCommand),
    /// Pixels changed.
    RenderNeeded,
    /// A stroke was committed to the history at `index`.
    StrokeCommitted { index: usize, points: usize },
    /// The answer to [`EngineCore::has_content`] flipped.
    ContentChanged { has_content: bool },
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    geometry: SurfaceGeometry,
    style: StrokeStyle,
    history: PathHistory,
    input: InputState,
    raster: PixmapSink,
}

impl EngineCore {
    /// Create an engine for a buffer of `size`, displayed unscaled until the
    /// host reports the real rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Surface`] if the raster cannot be allocated.
    pub fn new(size: BufferSize) -> Result<Self, ExportError> {
        Self::with_style(size, StrokeStyle::default())
    }

    /// Like [`EngineCore::new`] with a custom stroke style.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Surface`] if the raster cannot be allocated.
    pub fn with_style(size: BufferSize, style: StrokeStyle) -> Result<Self, ExportError> {
        let raster =
            PixmapSink::new(size, &style).ok_or(ExportError::Surface { width: size.width, height: size.height })?;
        Ok(Self {
            geometry: SurfaceGeometry::unscaled(size),
            style,
            history: PathHistory::new(),
            input: InputState::default(),
            raster,
        })
    }

    // --- Geometry ---

    /// Resize notification: the surface's displayed rectangle changed.
    pub fn set_surface_rect(&mut self, rect: SurfaceRect) {
        self.geometry.rect = rect;
    }

    /// Map a device event to buffer coordinates with the current geometry.
    #[must_use]
    pub fn map_to_local(&self, input: &PointerInput) -> Option<Point> {
        self.geometry.map_to_local(input)
    }

    // --- Device events ---

    /// Press: begin a stroke at the mapped position.
    pub fn on_pointer_down(&mut self, input: &PointerInput) -> Vec<Action> {
        match self.map_to_local(input) {
            Some(point) => self.begin_stroke(point),
            None => Vec::new(),
        }
    }

    /// Move: extend the stroke in progress, if any.
    pub fn on_pointer_move(&mut self, input: &PointerInput) -> Vec<Action> {
        if !self.input.is_drawing() {
            return Vec::new();
        }
        match self.map_to_local(input) {
            Some(point) => self.extend_stroke(point),
            None => Vec::new(),
        }
    }

    /// Release: commit the stroke in progress.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_stroke()
    }

    /// The pointer left the surface; handled exactly like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_stroke()
    }

    // --- Stroke transitions ---

    /// Start a new stroke at `point`.
    ///
    /// A stroke already in progress is abandoned, not committed.
    pub fn begin_stroke(&mut self, point: Point) -> Vec<Action> {
        let had_content = self.has_content();
        if let InputState::Drawing { path } = &self.input {
            tracing::debug!(points = path.len(), "stroke restarted before release; discarding");
        }
        self.input = InputState::Drawing { path: Path::new(point) };

        let mut actions = Vec::new();
        self.paint(PaintCommand::MoveTo(point), &mut actions);
        if !had_content {
            actions.push(Action::ContentChanged { has_content: true });
        }
        actions
    }

    /// Append `point` to the stroke in progress. No-op while idle.
    pub fn extend_stroke(&mut self, point: Point) -> Vec<Action> {
        let InputState::Drawing { path } = &mut self.input else {
            return Vec::new();
        };
        path.push(point);

        let mut actions = Vec::new();
        self.paint(PaintCommand::LineTo(point), &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Commit the stroke in progress to the history. No-op while idle.
    pub fn end_stroke(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Drawing { path } => {
                let points = path.len();
                let index = self.history.push(path);
                tracing::debug!(index, points, "stroke committed");
                vec![Action::StrokeCommitted { index, points }]
            }
        }
    }

    /// Erase everything and return to idle. Safe to call in any state, any number of times.
    pub fn clear(&mut self) -> Vec<Action> {
        let had_content = self.has_content();
        self.history.clear();
        self.input = InputState::Idle;

        let mut actions = Vec::new();
        self.paint(PaintCommand::Clear, &mut actions);
        actions.push(Action::RenderNeeded);
        if had_content {
            tracing::debug!("signature cleared");
            actions.push(Action::ContentChanged { has_content: false });
        }
        actions
    }

    fn paint(&mut self, command: PaintCommand, actions: &mut Vec<Action>) {
        self.raster.apply(command);
        actions.push(Action::Paint(command));
    }

    // --- Export ---

    /// Encode the painted raster as PNG, or `Ok(None)` if nothing has been drawn.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Encode`] if PNG encoding fails.
    pub fn export_raster(&self) -> Result<Option<Artifact>, ExportError> {
        if !self.has_content() {
            tracing::debug!("raster export declined: nothing drawn");
            return Ok(None);
        }
        let artifact = export::encode_png(&self.raster)?;
        tracing::info!(bytes = artifact.bytes.len(), "raster export");
        Ok(Some(artifact))
    }

    /// Rebuild the drawing as SVG, or `None` if nothing has been drawn.
    ///
    /// The stroke in progress, if any, is included as the last path.
    #[must_use]
    pub fn export_vector(&self) -> Option<Artifact> {
        if !self.has_content() {
            tracing::debug!("vector export declined: nothing drawn");
            return None;
        }
        let paths = self.snapshot();
        let artifact = export::encode_svg(self.geometry.buffer, &self.style, &paths);
        tracing::info!(paths = paths.len(), bytes = artifact.bytes.len(), "vector export");
        Some(artifact)
    }

    // --- Queries ---

    /// Whether anything has been drawn: a committed path or a stroke in progress.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.history.is_empty() || self.input.is_drawing()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    #[must_use]
    pub fn history(&self) -> &PathHistory {
        &self.history
    }

    #[must_use]
    pub fn in_progress(&self) -> Option<&Path> {
        self.input.in_progress()
    }

    /// Committed paths followed by the stroke in progress, owned.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Path> {
        self.history.iter().chain(self.input.in_progress()).cloned().collect()
    }

    #[must_use]
    pub fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    #[must_use]
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    #[must_use]
    pub fn raster(&self) -> &PixmapSink {
        &self.raster
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    surface: CanvasPresenter,
    pub core: EngineCore,
}

impl Engine {
    /// Size the canvas to its container, bind a 2D context, and read its
    /// displayed rectangle.
    ///
    /// A canvas without a parent keeps its current buffer size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context or the raster cannot be allocated.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        if let Some(container) = canvas.parent_element() {
            let size = BufferSize::fit(f64::from(container.client_width()), viewport_height());
            canvas.set_width(size.width);
            canvas.set_height(size.height);
        }
        let size = BufferSize::new(canvas.width(), canvas.height());

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let core = EngineCore::new(size).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = CanvasPresenter::new(ctx);

        let mut engine = Self { canvas, surface, core };
        engine.on_resize();
        Ok(engine)
    }

    // --- Viewport ---

    /// Re-read the canvas's displayed rectangle. Call on every window resize.
    pub fn on_resize(&mut self) {
        let r = self.canvas.get_bounding_client_rect();
        self.core.set_surface_rect(SurfaceRect::new(r.left(), r.top(), r.width(), r.height()));
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, input: &PointerInput) -> Vec<Action> {
        let actions = self.core.on_pointer_down(input);
        self.present(actions)
    }

    pub fn on_pointer_move(&mut self, input: &PointerInput) -> Vec<Action> {
        let actions = self.core.on_pointer_move(input);
        self.present(actions)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_up();
        self.present(actions)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_leave();
        self.present(actions)
    }

    pub fn clear(&mut self) -> Vec<Action> {
        let actions = self.core.clear();
        self.present(actions)
    }

    /// Copy the engine's raster to the visible canvas if anything was painted;
    /// pass everything else to the host.
    fn present(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let (painted, host) = split_paint(actions);
        if painted {
            if let Err(e) = self.surface.present(self.core.raster()) {
                tracing::warn!(error = ?e, "failed to present raster on canvas");
            }
        }
        host
    }

    // --- Delegated export and queries ---

    /// # Errors
    ///
    /// Returns [`ExportError::Encode`] if PNG encoding fails.
    pub fn export_raster(&self) -> Result<Option<Artifact>, ExportError> {
        self.core.export_raster()
    }

    #[must_use]
    pub fn export_vector(&self) -> Option<Artifact> {
        self.core.export_vector()
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        self.core.has_content()
    }
}

/// Separate paint commands from host actions. Returns whether any paint
/// command was present and the remaining actions in order.
pub(crate) fn split_paint(actions: Vec<Action>) -> (bool, Vec<Action>) {
    let mut painted = false;
    let host = actions
        .into_iter()
        .filter(|action| {
            let paint = matches!(action, Action::Paint(_));
            painted |= paint;
            !paint
        })
        .collect();
    (painted, host)
}

/// Inner height of the browser window; unbounded outside a window.
fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| match w.inner_height() {
            Ok(v) => v.as_f64(),
            Err(_) => None,
        })
        .unwrap_or(f64::INFINITY)
}
