//! Export pipeline: PNG from the painted raster, SVG from recorded geometry.
//!
//! Raster export encodes whatever the [`PixmapSink`] holds, so it is
//! pixel-for-pixel the live ink. Vector export ignores pixels entirely and
//! rebuilds the drawing from a snapshot of the recorded paths. Both outputs
//! depend only on their inputs; nothing time- or randomness-dependent ends up
//! in the artifact bytes.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use crate::consts::SVG_NAMESPACE;
use crate::doc::Path;
use crate::geometry::BufferSize;
use crate::render::{PixmapSink, StrokeStyle};

/// Error produced while building an export surface or artifact.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The raster surface could not be allocated at this size.
    #[error("cannot allocate a {width}x{height} raster surface")]
    Surface { width: u32, height: u32 },
    /// The image encoder rejected the raster.
    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml;charset=utf-8",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// An encoded export, owning its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl Artifact {
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    #[must_use]
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Encode the raster as PNG.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder fails.
pub fn encode_png(raster: &PixmapSink) -> Result<Artifact, ExportError> {
    let bytes = raster.pixmap().encode_png().map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(Artifact { format: ExportFormat::Png, bytes })
}

/// Build the SVG artifact for a path snapshot.
#[must_use]
pub fn encode_svg(size: BufferSize, style: &StrokeStyle, paths: &[Path]) -> Artifact {
    Artifact { format: ExportFormat::Svg, bytes: svg_document(size, style, paths).into_bytes() }
}

/// Serialize paths as an SVG document sized to the drawing buffer.
///
/// Each path with at least one segment becomes one stroked, unfilled `<path>`.
/// Single-point paths carry no segment and are skipped.
#[must_use]
pub fn svg_document(size: BufferSize, style: &StrokeStyle, paths: &[Path]) -> String {
    let mut out = format!(r#"<svg xmlns="{SVG_NAMESPACE}" width="{}" height="{}">"#, size.width, size.height);
    for d in paths.iter().filter_map(path_data) {
        out.push_str(&format!(
            r#"<path d="{d}" stroke="{}" stroke-width="{}" fill="none" stroke-linecap="{}" stroke-linejoin="{}"/>"#,
            style.color.css(),
            style.width,
            style.cap.as_str(),
            style.join.as_str(),
        ));
    }
    out.push_str("</svg>");
    out
}

/// Path data for one path: `M x0 y0` then `L x y` per later point.
///
/// Returns `None` for a path without a segment.
#[must_use]
pub fn path_data(path: &Path) -> Option<String> {
    if !path.has_segment() {
        return None;
    }
    let mut points = path.points().iter();
    let first = points.next()?;
    let mut d = format!("M {} {}", first.x, first.y);
    for p in points {
        d.push_str(&format!(" L {} {}", p.x, p.y));
    }
    Some(d)
}
