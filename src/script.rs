//! Replay scripts: recorded device events fed through an [`EngineCore`].
//!
//! A script is a JSON array of tagged events, for example:
//!
//! ```json
//! [
//!   { "type": "resize", "left": 0, "top": 0, "width": 400, "height": 240 },
//!   { "type": "pointer_down", "x": 10, "y": 10 },
//!   { "type": "pointer_move", "x": 60, "y": 40 },
//!   { "type": "pointer_up" }
//! ]
//! ```
//!
//! Coordinates are client coordinates; they are mapped through the current
//! surface rect exactly as live browser events are.

use firma_canvas::engine::{Action, EngineCore};
use firma_canvas::geometry::{Point, SurfaceRect};
use firma_canvas::input::PointerInput;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// The surface was laid out at a new displayed rectangle.
    Resize(SurfaceRect),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PointerLeave,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    Clear,
}

/// Counts gathered while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub strokes: usize,
    /// Clears that actually removed a drawing.
    pub clears: usize,
}

/// Parse a JSON script.
///
/// # Errors
///
/// Returns the decoder error if `json` is not an array of known events.
pub fn parse(json: &str) -> Result<Vec<ScriptEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Feed `events` through `core` in order.
pub fn run(core: &mut EngineCore, events: &[ScriptEvent]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for event in events {
        let actions = apply(core, event);
        summary.events += 1;
        for action in &actions {
            match action {
                Action::StrokeCommitted { index, points } => {
                    summary.strokes += 1;
                    tracing::debug!(index, points, "stroke committed");
                }
                Action::ContentChanged { has_content: false } => summary.clears += 1,
                _ => {}
            }
        }
    }
    summary
}

fn apply(core: &mut EngineCore, event: &ScriptEvent) -> Vec<Action> {
    match event {
        ScriptEvent::Resize(rect) => {
            core.set_surface_rect(*rect);
            Vec::new()
        }
        ScriptEvent::PointerDown(p) => core.on_pointer_down(&PointerInput::Pointer(*p)),
        ScriptEvent::PointerMove(p) => core.on_pointer_move(&PointerInput::Pointer(*p)),
        ScriptEvent::TouchStart { touches } => core.on_pointer_down(&PointerInput::Touch(touches.clone())),
        ScriptEvent::TouchMove { touches } => core.on_pointer_move(&PointerInput::Touch(touches.clone())),
        ScriptEvent::PointerUp | ScriptEvent::TouchEnd => core.on_pointer_up(),
        ScriptEvent::PointerLeave => core.on_pointer_leave(),
        ScriptEvent::Clear => core.clear(),
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
