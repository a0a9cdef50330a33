//! Dash projection: splitting geometry into alternating drawn and gap runs.
//!
//! Two projectors write into a [`TraceSink`]:
//!
//! - [`dash_line`] walks a straight segment analytically, placing dash and
//!   gap boundaries at exact parametric positions.
//! - [`dash_curve`] consumes an already-flattened sample sequence and
//!   accumulates straight-line distance from a reference point, switching
//!   between drawing and gap as thresholds are crossed.
//!
//! Both start a fresh state per call, so every line, every curve, and
//! every sub-path begins in drawing mode.

use log::warn;

use crate::trace::TraceSink;
use crate::types::{Dash, Point};

/// Ceiling on boundary steps for one projected line. Dash patterns much
/// shorter than the segment would otherwise grind through millions of
/// boundaries; past the ceiling the endpoint is forced and the walk stops.
pub const MAX_DASH_STEPS: usize = 1 << 20;

/// Pen state while projecting dashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashMode {
    Drawing,
    Gap,
}

/// Projector state for the sampled curve walk.
#[derive(Debug, Clone, Copy)]
struct DashState {
    mode: DashMode,
    reference: Point,
}

// ---------------------------------------------------------------------------
// Straight lines — analytic walk
// ---------------------------------------------------------------------------

/// Project a dashed straight segment from `from` to `to` into the sink.
///
/// Boundaries alternate dash-end (drawn vertex) and gap-end (pen lift),
/// starting in drawing mode. The endpoint is always reached in drawing
/// mode: a walk that ends mid-dash completes the dash at `to`, and a walk
/// that ends in a gap forces `to` into a final drawn segment so the real
/// endpoint of the sub-path is never dropped.
pub fn dash_line<S: TraceSink>(sink: &mut S, from: Point, to: Point, dash: &Dash) {
    let distance = from.distance(to);
    // A segment no longer than one dash is drawn whole. Also covers
    // zero-length segments, since dash lengths are clamped positive.
    if distance <= dash.dash_length {
        sink.line_to(to);
        return;
    }

    let dash_t = dash.dash_length / distance;
    let space_t = dash.space_length / distance;

    let mut drawing = true;
    let mut t = dash_t;
    let mut last_drawn: Option<Point> = None;
    let mut steps = 0usize;

    while t <= 1.0 {
        let p = from.lerp(to, t);
        if drawing {
            sink.line_to(p);
            last_drawn = Some(p);
            t += space_t;
        } else {
            sink.move_to(p);
            t += dash_t;
        }
        drawing = !drawing;

        steps += 1;
        if steps >= MAX_DASH_STEPS {
            warn!("dash walk exceeded {MAX_DASH_STEPS} boundaries; forcing endpoint");
            break;
        }
    }

    if last_drawn != Some(to) {
        sink.line_to(to);
    }
}

// ---------------------------------------------------------------------------
// Curves — sampled accumulation
// ---------------------------------------------------------------------------

/// Project dashes over a flattened sample sequence.
///
/// Distances are measured straight-line from the reference point, not
/// along the arc, so very sparse sampling lets dashes overshoot their
/// nominal length. While drawing, samples within the dash length are
/// emitted; the first sample beyond it flips to gap without emitting and
/// becomes the new reference. While in a gap, samples are swallowed until
/// the gap length is reached, where the pen lifts to the sample and
/// drawing resumes.
pub fn dash_curve<S, I>(sink: &mut S, samples: I, dash: &Dash)
where
    S: TraceSink,
    I: IntoIterator<Item = Point>,
{
    let mut state: Option<DashState> = None;

    for p in samples {
        let Some(st) = state.as_mut() else {
            // First sample: zero distance from itself, always drawn.
            sink.line_to(p);
            state = Some(DashState {
                mode: DashMode::Drawing,
                reference: p,
            });
            continue;
        };

        let distance = st.reference.distance(p);
        match st.mode {
            DashMode::Drawing => {
                if distance <= dash.dash_length {
                    sink.line_to(p);
                } else {
                    st.reference = p;
                    st.mode = DashMode::Gap;
                }
            }
            DashMode::Gap => {
                if distance >= dash.space_length {
                    sink.move_to(p);
                    st.reference = p;
                    st.mode = DashMode::Drawing;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;
    use crate::types::EPSILON;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    // -- straight lines --

    #[test]
    fn short_line_is_drawn_whole() {
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        dash_line(&mut t, pt(0.0, 0.0), pt(3.0, 0.0), &Dash::new(5.0, 5.0));
        assert_eq!(t.sub_paths().len(), 1);
        assert_eq!(t.sub_paths()[0].points, vec![pt(0.0, 0.0), pt(3.0, 0.0)]);
    }

    #[test]
    fn even_pattern_walk() {
        // 20 units with dash 5 / gap 5: dashes [0,5] and [10,15], then a
        // gap boundary at the endpoint forces a final drawn point.
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        dash_line(&mut t, pt(0.0, 0.0), pt(20.0, 0.0), &Dash::new(5.0, 5.0));

        let sps = t.sub_paths();
        assert_eq!(sps.len(), 3, "two lifts expected: {sps:#?}");
        assert_eq!(sps[0].points, vec![pt(0.0, 0.0), pt(5.0, 0.0)]);
        assert_eq!(sps[1].points, vec![pt(10.0, 0.0), pt(15.0, 0.0)]);
        // Endpoint forced after the trailing gap boundary.
        let last = &sps[2].points;
        assert_eq!(last.last(), Some(&pt(20.0, 0.0)));
    }

    #[test]
    fn walk_ending_mid_dash_completes_at_endpoint() {
        // dash 8 / gap 4 over 20 units: boundaries at 8 (draw), 12 (lift),
        // 20 (draw) — the final dash ends exactly on the endpoint.
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        dash_line(&mut t, pt(0.0, 0.0), pt(20.0, 0.0), &Dash::new(8.0, 4.0));

        let sps = t.sub_paths();
        assert_eq!(sps.len(), 2);
        assert_eq!(sps[0].points, vec![pt(0.0, 0.0), pt(8.0, 0.0)]);
        assert_eq!(sps[1].points, vec![pt(12.0, 0.0), pt(20.0, 0.0)]);
    }

    #[test]
    fn walk_ending_mid_gap_forces_endpoint() {
        // dash 6 / gap 6 over 20 units: boundaries at 6 (draw), 12 (lift),
        // 18 (draw); the gap from 18 cannot complete, so the endpoint is
        // drawn anyway.
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        dash_line(&mut t, pt(0.0, 0.0), pt(20.0, 0.0), &Dash::new(6.0, 6.0));

        let sps = t.sub_paths();
        assert_eq!(sps.len(), 2);
        let last = &sps[1].points;
        assert_eq!(last.last(), Some(&pt(20.0, 0.0)), "endpoint not forced");
    }

    #[test]
    fn zero_length_line_emits_endpoint() {
        let mut t = Trace::new();
        t.move_to(pt(2.0, 2.0));
        dash_line(&mut t, pt(2.0, 2.0), pt(2.0, 2.0), &Dash::new(5.0, 5.0));
        assert_eq!(t.sub_paths()[0].points.len(), 2);
    }

    #[test]
    fn fine_pattern_still_reaches_endpoint() {
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        dash_line(&mut t, pt(0.0, 0.0), pt(10.0, 0.0), &Dash::new(0.001, 0.001));
        let last_sp = t.sub_paths().last().unwrap();
        assert_eq!(last_sp.points.last(), Some(&pt(10.0, 0.0)));
    }

    /// Sink that only counts operations; keeps ceiling tests cheap.
    #[derive(Default)]
    struct CountingSink {
        moves: usize,
        lines: usize,
        last: Option<Point>,
    }

    impl TraceSink for CountingSink {
        fn move_to(&mut self, p: Point) {
            self.moves += 1;
            self.last = Some(p);
        }
        fn line_to(&mut self, p: Point) {
            self.lines += 1;
            self.last = Some(p);
        }
        fn begin_hole(&mut self) {}
        fn end_hole(&mut self) {}
    }

    #[test]
    fn step_ceiling_bounds_pathological_patterns() {
        // Clamped zero-length pattern: the walk stops at the ceiling and
        // the endpoint is still forced.
        let mut sink = CountingSink::default();
        dash_line(&mut sink, pt(0.0, 0.0), pt(10.0, 0.0), &Dash::new(0.0, 0.0));
        assert!(sink.moves + sink.lines <= MAX_DASH_STEPS + 1);
        assert_eq!(sink.last, Some(pt(10.0, 0.0)));
    }

    // -- sampled curves --

    /// Evenly spaced samples along the x axis, 1 unit apart, from 1..=n.
    fn ruler(n: usize) -> Vec<Point> {
        (1..=n).map(|i| pt(i as f64, 0.0)).collect()
    }

    #[test]
    fn curve_first_sample_always_drawn() {
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        dash_curve(&mut t, ruler(1), &Dash::new(0.5, 0.5));
        assert_eq!(t.sub_paths()[0].points.len(), 2);
    }

    #[test]
    fn curve_alternates_drawing_and_gap() {
        // Samples at 1..=10; dash 3 / gap 2 measured from the reference:
        // samples 1..=4 drawn (ref 1, the dash boundary is inclusive),
        // 5 flips to gap without emitting (ref 5), 6 is swallowed, 7 ends
        // the gap (lift, ref 7), 8..=10 drawn.
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        dash_curve(&mut t, ruler(10), &Dash::new(3.0, 2.0));

        let sps = t.sub_paths();
        assert_eq!(sps.len(), 2, "one lift expected: {sps:#?}");
        assert_eq!(
            sps[0].points,
            vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), pt(3.0, 0.0), pt(4.0, 0.0)]
        );
        assert_eq!(
            sps[1].points,
            vec![pt(7.0, 0.0), pt(8.0, 0.0), pt(9.0, 0.0), pt(10.0, 0.0)]
        );
    }

    #[test]
    fn curve_gap_swallows_near_samples() {
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        // Gap longer than the whole sampled span: after the flip nothing
        // else is emitted.
        dash_curve(&mut t, ruler(5), &Dash::new(1.5, 100.0));
        let sps = t.sub_paths();
        assert_eq!(sps.len(), 1);
        // Samples 1 and 2 drawn, 3 flips to gap, 4 and 5 swallowed.
        assert_eq!(sps[0].points, vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)]);
    }

    #[test]
    fn curve_empty_samples_is_noop() {
        let mut t = Trace::new();
        dash_curve(&mut t, std::iter::empty(), &Dash::new(1.0, 1.0));
        assert!(t.is_empty());
    }

    #[test]
    fn curve_distances_are_chordal_not_arc() {
        // Two samples back at the reference's distance 0: stays drawing.
        let mut t = Trace::new();
        t.move_to(pt(0.0, 0.0));
        let loop_samples = vec![pt(1.0, 0.0), pt(0.9, 0.0), pt(1.1, 0.0)];
        dash_curve(&mut t, loop_samples, &Dash::new(0.5, 10.0));
        // All samples lie within the dash length of the first: all drawn.
        assert_eq!(t.sub_paths()[0].points.len(), 4);
        assert!((t.sub_paths()[0].points[3].x - 1.1).abs() < EPSILON);
    }
}
