//! Surface geometry and the screen-to-buffer coordinate mapper.
//!
//! A drawing surface has two sizes: the rectangle it occupies on screen (CSS
//! pixels, as reported by the layout engine) and the resolution of its internal
//! drawing buffer. Every recorded point lives in buffer space, so exported
//! geometry is independent of how large the surface happened to be displayed.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CONTAINER_GUTTER_PX, DEFAULT_BUFFER_HEIGHT, DEFAULT_BUFFER_WIDTH, HEIGHT_PER_WIDTH, MAX_BUFFER_HEIGHT,
    MAX_BUFFER_WIDTH, MAX_VIEWPORT_FRACTION,
};
use crate::input::PointerInput;

/// A point in either screen or drawing-buffer space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The surface's displayed rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Whether the rectangle has a finite, positive area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Drawing-buffer resolution in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
}

impl Default for BufferSize {
    fn default() -> Self {
        Self { width: DEFAULT_BUFFER_WIDTH, height: DEFAULT_BUFFER_HEIGHT }
    }
}

impl BufferSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size the buffer to fit a container.
    ///
    /// The width leaves a gutter inside the container and caps at 800 px. The
    /// height follows the container's aspect (60% of its width) but never takes
    /// more than half the viewport or 500 px. Both sides are floored to whole
    /// pixels and are at least 1.
    #[must_use]
    pub fn fit(container_width: f64, viewport_height: f64) -> Self {
        let width = (container_width - CONTAINER_GUTTER_PX).min(MAX_BUFFER_WIDTH);
        let height = (container_width * HEIGHT_PER_WIDTH)
            .min(viewport_height * MAX_VIEWPORT_FRACTION)
            .min(MAX_BUFFER_HEIGHT);
        Self { width: whole_pixels(width, MAX_BUFFER_WIDTH), height: whole_pixels(height, MAX_BUFFER_HEIGHT) }
    }
}

/// Floor to a pixel count in `1..=max`. NaN collapses to 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_pixels(value: f64, max: f64) -> u32 {
    value.floor().max(1.0).min(max) as u32
}

/// Mapping state between the displayed rectangle and the drawing buffer.
///
/// The rectangle must be refreshed whenever the surface may have moved or been
/// resized; a stale rectangle maps pointer positions to the wrong buffer
/// coordinates, which desyncs live ink from exported geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub rect: SurfaceRect,
    pub buffer: BufferSize,
}

impl SurfaceGeometry {
    /// Geometry for a surface displayed at exactly its buffer resolution at the origin.
    #[must_use]
    pub fn unscaled(buffer: BufferSize) -> Self {
        Self {
            rect: SurfaceRect::new(0.0, 0.0, f64::from(buffer.width), f64::from(buffer.height)),
            buffer,
        }
    }

    /// Per-axis buffer pixels per displayed pixel, or `None` for a degenerate
    /// rectangle or one so small the ratio overflows.
    #[must_use]
    pub fn scale(&self) -> Option<(f64, f64)> {
        if self.rect.is_degenerate() {
            return None;
        }
        let scale_x = f64::from(self.buffer.width) / self.rect.width;
        let scale_y = f64::from(self.buffer.height) / self.rect.height;
        (scale_x.is_finite() && scale_y.is_finite()).then_some((scale_x, scale_y))
    }

    /// Convert a client-space point (CSS pixels) to buffer coordinates.
    ///
    /// `None` unless both coordinates come out finite.
    #[must_use]
    pub fn client_to_local(&self, client: Point) -> Option<Point> {
        let (scale_x, scale_y) = self.scale()?;
        let local = Point { x: (client.x - self.rect.left) * scale_x, y: (client.y - self.rect.top) * scale_y };
        (local.x.is_finite() && local.y.is_finite()).then_some(local)
    }

    /// Map a device event to buffer coordinates.
    ///
    /// Touch events use their first active contact. Returns `None` when there
    /// is no contact or the geometry cannot produce a finite mapping; callers
    /// treat that as "no event".
    #[must_use]
    pub fn map_to_local(&self, input: &PointerInput) -> Option<Point> {
        self.client_to_local(input.primary()?)
    }
}
