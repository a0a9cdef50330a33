//! Fixed-count flattening of Bezier segments.
//!
//! Curves are approximated by sampling at `n` evenly spaced parameter
//! values `t = i/n` for `i = 1..=n`. The start point (`t = 0`) is never
//! produced because the pen already sits there; the final sample lands
//! exactly on the curve's endpoint. The count is fixed by the caller's
//! style, never adapted to curvature.

use crate::types::{Point, Scalar};

/// Anything evaluable at a parameter in [0, 1].
pub trait Curve {
    /// Evaluate the point at parameter `t`.
    fn eval(&self, t: Scalar) -> Point;

    /// Flatten into exactly `segments` points at `t = i/segments`.
    ///
    /// The iterator is restartable in the sense that flattening the same
    /// segment again yields the same sequence; no state survives a run.
    fn flatten(self, segments: usize) -> Flattened<Self>
    where
        Self: Sized,
    {
        Flattened {
            curve: self,
            segments,
            index: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Cubic segments
// ---------------------------------------------------------------------------

/// Four control points of a cubic Bezier segment.
#[derive(Debug, Clone, Copy)]
pub struct CubicSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicSegment {
    /// Create a new cubic segment from four control points.
    #[must_use]
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the point at parameter `t` in [0, 1] using the Bernstein
    /// basis. At `t = 1` the weights collapse so the literal endpoint is
    /// returned exactly.
    #[expect(
        clippy::many_single_char_names,
        reason = "standard Bezier math variable names (a, b, c, d, s, t)"
    )]
    #[must_use]
    pub fn eval(&self, t: Scalar) -> Point {
        let s = 1.0 - t;
        let a = s * s * s;
        let b = 3.0 * s * s * t;
        let c = 3.0 * s * t * t;
        let d = t * t * t;
        Point::new(
            d.mul_add(
                self.p3.x,
                a.mul_add(self.p0.x, b.mul_add(self.p1.x, c * self.p2.x)),
            ),
            d.mul_add(
                self.p3.y,
                a.mul_add(self.p0.y, b.mul_add(self.p1.y, c * self.p2.y)),
            ),
        )
    }
}

impl Curve for CubicSegment {
    fn eval(&self, t: Scalar) -> Point {
        Self::eval(self, t)
    }
}

// ---------------------------------------------------------------------------
// Quadratic segments
// ---------------------------------------------------------------------------

/// Three control points of a quadratic Bezier segment.
#[derive(Debug, Clone, Copy)]
pub struct QuadSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadSegment {
    /// Create a new quadratic segment from three control points.
    #[must_use]
    pub const fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluate the point at parameter `t` in [0, 1] by nested linear
    /// interpolation (two lerp levels).
    #[must_use]
    pub fn eval(&self, t: Scalar) -> Point {
        let a = self.p0.lerp(self.p1, t);
        let b = self.p1.lerp(self.p2, t);
        a.lerp(b, t)
    }
}

impl Curve for QuadSegment {
    fn eval(&self, t: Scalar) -> Point {
        Self::eval(self, t)
    }
}

// ---------------------------------------------------------------------------
// Flattening iterator
// ---------------------------------------------------------------------------

/// Iterator over the sample points of a flattened curve.
#[derive(Debug, Clone)]
pub struct Flattened<C> {
    curve: C,
    segments: usize,
    index: usize,
}

impl<C: Curve> Iterator for Flattened<C> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index >= self.segments {
            return None;
        }
        self.index += 1;
        let t = self.index as Scalar / self.segments as Scalar;
        Some(self.curve.eval(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.segments - self.index;
        (remaining, Some(remaining))
    }
}

impl<C: Curve> ExactSizeIterator for Flattened<C> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EPSILON;

    fn arch() -> CubicSegment {
        CubicSegment::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        )
    }

    #[test]
    fn cubic_eval_endpoints() {
        let seg = arch();
        let p0 = seg.eval(0.0);
        assert!(p0.x.abs() < EPSILON);
        assert!(p0.y.abs() < EPSILON);
        let p1 = seg.eval(1.0);
        assert!((p1.x - 10.0).abs() < EPSILON);
        assert!(p1.y.abs() < EPSILON);
    }

    #[test]
    fn cubic_flatten_exact_count() {
        for n in [1, 2, 4, 100] {
            let points: Vec<Point> = arch().flatten(n).collect();
            assert_eq!(points.len(), n, "expected {n} samples");
        }
    }

    #[test]
    fn cubic_flatten_ends_on_endpoint() {
        let points: Vec<Point> = arch().flatten(4).collect();
        let last = points[3];
        assert!((last.x - 10.0).abs() < EPSILON, "end x: {}", last.x);
        assert!(last.y.abs() < EPSILON, "end y: {}", last.y);
    }

    #[test]
    fn cubic_flatten_excludes_start() {
        // First sample is at t = 1/n, never at t = 0.
        let points: Vec<Point> = arch().flatten(4).collect();
        let first = points[0];
        assert!(first.x > 0.0 || first.y > 0.0, "start point leaked: {first:?}");
    }

    #[test]
    fn degenerate_cubic_still_yields_count() {
        let p = Point::new(3.0, 4.0);
        let seg = CubicSegment::new(p, p, p, p);
        let points: Vec<Point> = seg.flatten(7).collect();
        assert_eq!(points.len(), 7);
        for q in points {
            assert!((q.x - 3.0).abs() < EPSILON);
            assert!((q.y - 4.0).abs() < EPSILON);
        }
    }

    #[test]
    fn flatten_is_restartable() {
        let a: Vec<Point> = arch().flatten(10).collect();
        let b: Vec<Point> = arch().flatten(10).collect();
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(&b) {
            assert!((p.x - q.x).abs() < EPSILON);
            assert!((p.y - q.y).abs() < EPSILON);
        }
    }

    #[test]
    fn flatten_reports_exact_size() {
        let mut it = arch().flatten(5);
        assert_eq!(it.len(), 5);
        it.next();
        assert_eq!(it.len(), 4);
    }

    // -- quadratic --

    #[test]
    fn quad_eval_endpoints_and_mid() {
        let seg = QuadSegment::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 0.0),
        );
        let p0 = seg.eval(0.0);
        assert!(p0.x.abs() < EPSILON && p0.y.abs() < EPSILON);
        let p1 = seg.eval(1.0);
        assert!((p1.x - 10.0).abs() < EPSILON && p1.y.abs() < EPSILON);
        // Apex of the parabola: B(0.5) = (p0 + 2*p1 + p2) / 4
        let mid = seg.eval(0.5);
        assert!((mid.x - 5.0).abs() < EPSILON);
        assert!((mid.y - 5.0).abs() < EPSILON);
    }

    #[test]
    fn quad_flatten_exact_count() {
        let seg = QuadSegment::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 0.0),
        );
        let points: Vec<Point> = seg.flatten(6).collect();
        assert_eq!(points.len(), 6);
        let last = points[5];
        assert!((last.x - 10.0).abs() < EPSILON);
    }

    #[test]
    fn zero_segments_yields_nothing() {
        assert_eq!(arch().flatten(0).count(), 0);
    }
}
