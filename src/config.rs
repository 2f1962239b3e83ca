//! Replay configuration parsed from environment variables.

use std::path::PathBuf;

use firma_canvas::export::ExportFormat;
use firma_canvas::geometry::BufferSize;

pub const DEFAULT_OUT_DIR: &str = ".";
pub const DEFAULT_CONTAINER_WIDTH: f64 = 832.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 1000.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number, got '{value}'")]
    InvalidDimension { var: &'static str, value: String },
    #[error("unknown {var}: '{value}' (expected 'png', 'svg' or 'both')")]
    InvalidFormat { var: &'static str, value: String },
}

/// Which artifacts a replay exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatChoice {
    Png,
    Svg,
    Both,
}

impl FormatChoice {
    #[must_use]
    pub fn formats(self) -> &'static [ExportFormat] {
        match self {
            Self::Png => &[ExportFormat::Png],
            Self::Svg => &[ExportFormat::Svg],
            Self::Both => &[ExportFormat::Png, ExportFormat::Svg],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub out_dir: PathBuf,
    pub container_width: f64,
    pub viewport_height: f64,
    pub format: FormatChoice,
}

impl ReplayConfig {
    /// Build typed replay config from environment variables.
    ///
    /// Optional:
    /// - `FIRMA_OUT_DIR`: default `.`
    /// - `FIRMA_CONTAINER_WIDTH`: default 832
    /// - `FIRMA_VIEWPORT_HEIGHT`: default 1000
    /// - `FIRMA_FORMAT`: `png`, `svg` or `both` (default)
    pub fn from_env() -> Result<Self, ConfigError> {
        let out_dir = std::env::var("FIRMA_OUT_DIR").unwrap_or_else(|_| DEFAULT_OUT_DIR.to_string());
        let container_width = parse_dimension(
            "FIRMA_CONTAINER_WIDTH",
            std::env::var("FIRMA_CONTAINER_WIDTH").ok().as_deref(),
            DEFAULT_CONTAINER_WIDTH,
        )?;
        let viewport_height = parse_dimension(
            "FIRMA_VIEWPORT_HEIGHT",
            std::env::var("FIRMA_VIEWPORT_HEIGHT").ok().as_deref(),
            DEFAULT_VIEWPORT_HEIGHT,
        )?;
        let format = parse_format(std::env::var("FIRMA_FORMAT").ok().as_deref())?;

        Ok(Self { out_dir: PathBuf::from(out_dir), container_width, viewport_height, format })
    }

    /// Drawing-buffer resolution for the configured container and viewport.
    #[must_use]
    pub fn buffer_size(&self) -> BufferSize {
        BufferSize::fit(self.container_width, self.viewport_height)
    }
}

pub(crate) fn parse_dimension(var: &'static str, raw: Option<&str>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ConfigError::InvalidDimension { var, value: raw.to_string() }),
    }
}

/// Clap value parser for dimension flags; same rules as the environment knobs.
pub(crate) fn dimension_arg(raw: &str) -> Result<f64, ConfigError> {
    parse_dimension("dimension", Some(raw), 0.0)
}

pub(crate) fn parse_format(raw: Option<&str>) -> Result<FormatChoice, ConfigError> {
    match raw.unwrap_or("both") {
        "png" => Ok(FormatChoice::Png),
        "svg" => Ok(FormatChoice::Svg),
        "both" => Ok(FormatChoice::Both),
        other => Err(ConfigError::InvalidFormat { var: "FIRMA_FORMAT", value: other.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
