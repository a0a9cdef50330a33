//! The abstract drawing surface and its recording implementation.
//!
//! Path playback never emits curves: everything reaching a sink is a pen
//! move, a straight segment, a hole bracket, or a close mark. [`Trace`]
//! records the full operation stream as polyline sub-paths so backends
//! can serialize or measure it later.

use crate::types::Point;

// ---------------------------------------------------------------------------
// Sink trait
// ---------------------------------------------------------------------------

/// Receiver for flattened drawing operations.
pub trait TraceSink {
    /// Lift the pen and start a new sub-path at `p`.
    fn move_to(&mut self, p: Point);

    /// Draw a straight segment from the current point to `p`.
    fn line_to(&mut self, p: Point);

    /// Open a hole bracket: the most recent geometry carves out of the
    /// shape drawn before it.
    fn begin_hole(&mut self);

    /// Close the current hole bracket.
    fn end_hole(&mut self);

    /// Mark the current sub-path closed. Emits no geometry; in particular
    /// no segment back to the sub-path start is drawn.
    fn close_path(&mut self) {}
}

// ---------------------------------------------------------------------------
// Recording sink
// ---------------------------------------------------------------------------

/// One recorded sub-path: a polyline plus end-state flags.
///
/// `points` holds the starting pen position followed by every drawn
/// vertex, so a sub-path with `n` points draws `n - 1` segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubPath {
    pub points: Vec<Point>,
    pub closed: bool,
    pub hole: bool,
}

impl SubPath {
    /// Number of drawn segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// A sink that stores everything it receives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trace {
    sub_paths: Vec<SubPath>,
    hole_toggles: usize,
    in_hole: bool,
}

impl Trace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sub_paths(&self) -> &[SubPath] {
        &self.sub_paths
    }

    /// Number of completed `begin_hole`/`end_hole` brackets seen.
    #[must_use]
    pub const fn hole_toggles(&self) -> usize {
        self.hole_toggles
    }

    #[must_use]
    pub const fn has_holes(&self) -> bool {
        self.hole_toggles > 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sub_paths.iter().all(|sp| sp.points.is_empty())
    }
}

impl TraceSink for Trace {
    fn move_to(&mut self, p: Point) {
        self.sub_paths.push(SubPath {
            points: vec![p],
            closed: false,
            hole: false,
        });
    }

    fn line_to(&mut self, p: Point) {
        match self.sub_paths.last_mut() {
            Some(sp) => sp.points.push(p),
            // Drawing before any move: open a sub-path at the point.
            None => self.move_to(p),
        }
    }

    fn begin_hole(&mut self) {
        self.in_hole = true;
    }

    fn end_hole(&mut self) {
        if self.in_hole {
            self.in_hole = false;
            self.hole_toggles += 1;
            if let Some(sp) = self.sub_paths.last_mut() {
                sp.hole = true;
            }
        }
    }

    fn close_path(&mut self) {
        if let Some(sp) = self.sub_paths.last_mut() {
            sp.closed = true;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
