//! Input model: device events and the stroke-capture state.
//!
//! `PointerInput` is the device event as the host delivered it, still in client
//! (CSS pixel) coordinates. `InputState` is the capture state machine's current
//! state; the in-progress path lives inside the `Drawing` variant, so a path
//! being extended cannot exist while idle.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::Path;
use crate::geometry::Point;

/// A raw pointer or touch event in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Mouse or pen with a single position.
    Pointer(Point),
    /// Multi-touch event carrying every active contact, in contact order.
    Touch(Vec<Point>),
}

impl PointerInput {
    /// The position that drives drawing: the pointer itself or the first touch contact.
    #[must_use]
    pub fn primary(&self) -> Option<Point> {
        match self {
            Self::Pointer(p) => Some(*p),
            Self::Touch(contacts) => contacts.first().copied(),
        }
    }
}

impl From<&web_sys::MouseEvent> for PointerInput {
    fn from(ev: &web_sys::MouseEvent) -> Self {
        Self::Pointer(Point::new(f64::from(ev.client_x()), f64::from(ev.client_y())))
    }
}

impl From<&web_sys::TouchEvent> for PointerInput {
    fn from(ev: &web_sys::TouchEvent) -> Self {
        let list = ev.touches();
        let contacts = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
            .collect();
        Self::Touch(contacts)
    }
}

/// Stroke-capture state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No stroke in progress.
    #[default]
    Idle,
    /// A stroke is being captured.
    Drawing {
        /// Points recorded since the stroke began; never empty.
        path: Path,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// The path being captured, if a stroke is in progress.
    #[must_use]
    pub fn in_progress(&self) -> Option<&Path> {
        match self {
            Self::Idle => None,
            Self::Drawing { path } => Some(path),
        }
    }
}
