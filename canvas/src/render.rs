//! Rendering: live ink painted as strokes are captured.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`]
//! or a [`tiny_skia::Pixmap`]. Render sinks receive paint commands from the
//! engine and produce pixels; they never read or mutate the path history.
//!
//! [`PixmapSink`] is the raster the engine owns and encodes for raster export.
//! [`CanvasPresenter`] copies that raster onto a browser canvas so the user
//! sees their signature while drawing.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};
use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, ImageData};

use crate::consts::STROKE_WIDTH;
use crate::geometry::{BufferSize, Point};

// =============================================================
// Stroke style
// =============================================================

/// Opaque RGB stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// CSS hex notation, e.g. `#000000`.
    #[must_use]
    pub fn css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Shape drawn at the open ends of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    /// Keyword shared by Canvas 2D and SVG.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => Self::Butt,
            LineCap::Round => Self::Round,
            LineCap::Square => Self::Square,
        }
    }
}

/// Shape drawn where two segments of a stroke meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

impl LineJoin {
    /// Keyword shared by Canvas 2D and SVG.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => Self::Miter,
            LineJoin::Round => Self::Round,
            LineJoin::Bevel => Self::Bevel,
        }
    }
}

/// Style applied to every stroke, live and exported alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Width in drawing-buffer pixels.
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self { color: Color::BLACK, width: STROKE_WIDTH, cap: LineCap::Round, join: LineJoin::Round }
    }
}

// =============================================================
// Sink contract
// =============================================================

/// A paint instruction emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintCommand {
    /// A stroke began here; nothing is painted yet.
    MoveTo(Point),
    /// Paint a segment from the previous point to this one.
    LineTo(Point),
    /// Erase everything.
    Clear,
}

/// An abstract paint target.
pub trait RenderSink {
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    fn clear(&mut self);

    fn apply(&mut self, command: PaintCommand) {
        match command {
            PaintCommand::MoveTo(p) => self.move_to(p),
            PaintCommand::LineTo(p) => self.line_to(p),
            PaintCommand::Clear => self.clear(),
        }
    }
}

// =============================================================
// Pixmap sink
// =============================================================

/// Owned RGBA raster at drawing-buffer resolution, transparent when empty.
pub struct PixmapSink {
    pixmap: Pixmap,
    paint: Paint<'static>,
    stroke: Stroke,
    /// End of the last painted segment (or the stroke start).
    cursor: Option<Point>,
}

impl PixmapSink {
    /// Allocate a transparent raster. `None` if the size cannot be allocated.
    #[must_use]
    pub fn new(size: BufferSize, style: &StrokeStyle) -> Option<Self> {
        let pixmap = Pixmap::new(size.width, size.height)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(style.color.r, style.color.g, style.color.b, 255);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: to_f32(style.width),
            line_cap: style.cap.into(),
            line_join: style.join.into(),
            ..Stroke::default()
        };

        Some(Self { pixmap, paint, stroke, cursor: None })
    }

    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    #[must_use]
    pub fn size(&self) -> BufferSize {
        BufferSize::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Straight-alpha RGBA bytes, row-major, as canvas image data expects.
    #[must_use]
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Whether any pixel has been painted.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    fn stroke_segment(&mut self, from: Point, to: Point) {
        let mut pb = PathBuilder::new();
        pb.move_to(to_f32(from.x), to_f32(from.y));
        pb.line_to(to_f32(to.x), to_f32(to.y));
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(&path, &self.paint, &self.stroke, Transform::identity(), None);
        }
    }
}

impl RenderSink for PixmapSink {
    fn move_to(&mut self, point: Point) {
        self.cursor = Some(point);
    }

    fn line_to(&mut self, point: Point) {
        // A segment without a start behaves like Canvas 2D: the point opens the subpath.
        if let Some(from) = self.cursor {
            self.stroke_segment(from, point);
        }
        self.cursor = Some(point);
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.cursor = None;
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_f32(v: f64) -> f32 {
    v as f32
}

// =============================================================
// Canvas presenter
// =============================================================

/// Shows a [`PixmapSink`] on a browser canvas.
///
/// The canvas never strokes on its own; it only receives copies of the
/// pixmap, so the visible pixels and the exported PNG are one raster.
pub struct CanvasPresenter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPresenter {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Copy the whole raster onto the canvas at the origin.
    ///
    /// # Errors
    ///
    /// Returns the browser exception if the image data cannot be built or drawn.
    pub fn present(&self, raster: &PixmapSink) -> Result<(), JsValue> {
        let size = raster.size();
        let rgba = raster.to_rgba();
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba.as_slice()), size.width, size.height)?;
        self.ctx.put_image_data(&image, 0.0, 0.0)
    }
}
