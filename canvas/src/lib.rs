//! Signature capture and export engine.
//!
//! This crate is compiled to WebAssembly for the browser and as a plain Rust
//! library for native hosts. It owns the whole life of a signature: mapping
//! raw pointer and touch events into drawing-buffer coordinates, tracking the
//! stroke being drawn, painting live ink, and exporting the result as PNG or
//! SVG. The host layer only wires device events to the engine, shows its
//! "has content" state, and hands exported artifacts to the user.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`geometry`] | Surface geometry and the screen-to-buffer mapper |
//! | [`input`] | Device events and the stroke-capture state |
//! | [`doc`] | Recorded paths and the path history |
//! | [`render`] | Stroke style and render sinks (pixmap, Canvas 2D) |
//! | [`export`] | PNG and SVG export |
//! | [`deliver`] | Delivery contract, file delivery, and file naming |
//! | [`consts`] | Shared constants (stroke width, sizing limits, names) |

pub mod consts;
pub mod deliver;
pub mod doc;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod input;
pub mod render;
