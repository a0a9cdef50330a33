//! Axis-aligned bounding box computation.
//!
//! Provides [`BoundingBox`] and helpers for computing the extent of traces
//! and whole scenes, used when a document carries no explicit viewport.

use crate::scene::Scene;
use crate::trace::Trace;
use crate::types::{Point, Scalar};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: Scalar,
    pub min_y: Scalar,
    pub max_x: Scalar,
    pub max_y: Scalar,
}

impl BoundingBox {
    /// An empty (inverted) bounding box.
    pub const EMPTY: Self = Self {
        min_x: Scalar::INFINITY,
        min_y: Scalar::INFINITY,
        max_x: Scalar::NEG_INFINITY,
        max_y: Scalar::NEG_INFINITY,
    };

    /// Check if this bounding box is valid (non-empty).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> Scalar {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> Scalar {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }

    /// Grow to include a point.
    pub fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Union with another box.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ---------------------------------------------------------------------------
// Trace and scene extents
// ---------------------------------------------------------------------------

/// Bounding box of all recorded sub-path points.
#[must_use]
pub fn trace_bbox(trace: &Trace) -> BoundingBox {
    let mut bb = BoundingBox::EMPTY;
    for sp in trace.sub_paths() {
        for &p in &sp.points {
            bb.include_point(p);
        }
    }
    bb
}

/// Bounding box of a scene, with every element's transform applied.
#[must_use]
pub fn scene_bbox(scene: &Scene) -> BoundingBox {
    let mut bb = BoundingBox::EMPTY;
    for el in &scene.elements {
        for sp in el.trace.sub_paths() {
            for &p in &sp.points {
                bb.include_point(el.transform * p);
            }
        }
    }
    bb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
