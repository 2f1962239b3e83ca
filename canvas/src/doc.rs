//! Document model: recorded paths and the path history.
//!
//! A `Path` is the point sequence of one stroke in drawing-buffer space. It is
//! never empty: it is created from the point where the stroke began and only
//! ever grows. `PathHistory` keeps completed paths in the order their strokes
//! ended; both the renderer and the exporters walk it in that order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::Serialize;

use crate::geometry::Point;

/// The recorded points of one stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Start a path at the point where the stroke began.
    #[must_use]
    pub fn new(first: Point) -> Self {
        Self { points: vec![first] }
    }

    /// Append a point. Recorded points are never rewritten.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the path has at least one line segment. A single-point path is a tap.
    #[must_use]
    pub fn has_segment(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Completed paths in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathHistory {
    paths: Vec<Path>,
}

impl PathHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed path; returns its index.
    pub fn push(&mut self, path: Path) -> usize {
        self.paths.push(path);
        self.paths.len() - 1
    }

    /// Drop every path.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<'a> IntoIterator for &'a PathHistory {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
