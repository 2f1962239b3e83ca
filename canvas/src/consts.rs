//! Shared numeric and string constants for the canvas crate.

// ── Stroke style ────────────────────────────────────────────────

/// Default stroke width in drawing-buffer pixels.
pub const STROKE_WIDTH: f64 = 2.0;

// ── Surface sizing ──────────────────────────────────────────────

/// Horizontal padding subtracted from the container width before sizing the buffer.
pub const CONTAINER_GUTTER_PX: f64 = 32.0;

/// Upper bound on the drawing-buffer width in pixels.
pub const MAX_BUFFER_WIDTH: f64 = 800.0;

/// Upper bound on the drawing-buffer height in pixels.
pub const MAX_BUFFER_HEIGHT: f64 = 500.0;

/// Buffer height as a fraction of the container width.
pub const HEIGHT_PER_WIDTH: f64 = 0.6;

/// Buffer height never exceeds this fraction of the viewport height.
pub const MAX_VIEWPORT_FRACTION: f64 = 0.5;

/// Width of an unsized HTML canvas.
pub const DEFAULT_BUFFER_WIDTH: u32 = 300;

/// Height of an unsized HTML canvas.
pub const DEFAULT_BUFFER_HEIGHT: u32 = 150;

// ── Export ──────────────────────────────────────────────────────

/// XML namespace declared on the root of every vector export.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Stem shared by every delivered file name.
pub const FILE_STEM: &str = "firma-digital";
