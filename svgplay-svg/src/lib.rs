//! SVG writer for played-out scenes.
//!
//! Converts a [`Scene`] back into an SVG [`Document`] using the `svg`
//! crate.
//!
//! Key design points:
//! - Every element is written as a `<path>` of straight segments; curves
//!   were flattened during playback, so the output draws identically in
//!   renderers that disagree about curve tessellation.
//! - Path data is built as raw `d` strings to preserve `f64` precision
//!   (the `svg` crate's `Data` builder uses `f32`).
//! - Dash patterns are already baked into the geometry as separate
//!   sub-paths, so no `stroke-dasharray` attribute is ever emitted.
//! - Element transforms are serialized as `matrix(…)` attributes rather
//!   than applied to coordinates, keeping the written geometry in the
//!   same local units the source used.
//! - A trace with hole brackets fills with `fill-rule="evenodd"` so its
//!   interior sub-paths punch out.

use svg::node::element::Path as SvgPath;
use svg::Document;

use svgplay_graphics::bbox::scene_bbox;
use svgplay_graphics::scene::{Element, Scene};
use svgplay_graphics::trace::Trace;
use svgplay_graphics::types::{Affine, Color, Scalar};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a [`Scene`] to an SVG [`Document`].
#[must_use]
pub fn render(scene: &Scene) -> Document {
    render_with_options(scene, &RenderOptions::default())
}

/// Render a [`Scene`] to an SVG string.
#[must_use]
pub fn render_to_string(scene: &Scene) -> String {
    render(scene).to_string()
}

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Extra margin around a computed bounding box (in user units).
    /// Ignored when the source declared a viewport. Default: 1.0.
    pub margin: Scalar,
    /// Number of decimal places for coordinates. Default: 4.
    pub precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 1.0,
            precision: 4,
        }
    }
}

/// Render a [`Scene`] to an SVG [`Document`] with custom options.
#[must_use]
pub fn render_with_options(scene: &Scene, opts: &RenderOptions) -> Document {
    let mut doc = open_document(scene, opts);
    for element in &scene.elements {
        doc = doc.add(element_to_path(element, opts));
    }
    doc
}

// ---------------------------------------------------------------------------
// Element rendering
// ---------------------------------------------------------------------------

/// Render one traced element to an SVG `<path>` element.
fn element_to_path(element: &Element, opts: &RenderOptions) -> SvgPath {
    let d = trace_to_d(&element.trace, opts.precision);
    let fill = element
        .style
        .fill
        .map_or_else(|| "none".to_owned(), color_to_svg);

    let mut el = SvgPath::new().set("d", d).set("fill", fill);

    if element.trace.has_holes() {
        el = el.set("fill-rule", "evenodd");
    }

    match element.style.stroke {
        // An invisible stroke exists only to carry a dash pattern; the
        // dash already cut the geometry and the paint stays off.
        Some(stroke) if !stroke.color.is_invisible() => {
            el = el
                .set("stroke", color_to_svg(stroke.color))
                .set("stroke-width", fmt_scalar(stroke.width, opts.precision));
        }
        _ => el = el.set("stroke", "none"),
    }

    if element.transform.as_coeffs() != Affine::IDENTITY.as_coeffs() {
        el = el.set("transform", matrix_to_svg(element.transform, opts.precision));
    }

    el
}

// ---------------------------------------------------------------------------
// Trace → SVG "d" attribute
// ---------------------------------------------------------------------------

/// Convert a played-out [`Trace`] to an SVG path data string.
///
/// Each sub-path becomes `M` followed by `L` segments, with `Z` when the
/// sub-path was closed. Empty sub-paths are skipped.
fn trace_to_d(trace: &Trace, precision: usize) -> String {
    let mut d = String::with_capacity(trace.sub_paths().len() * 64);

    for sub_path in trace.sub_paths() {
        let Some((first, rest)) = sub_path.points.split_first() else {
            continue;
        };
        d.push('M');
        write_point(&mut d, first.x, first.y, precision);
        for p in rest {
            d.push('L');
            write_point(&mut d, p.x, p.y, precision);
        }
        if sub_path.closed {
            d.push('Z');
        }
    }

    d
}

/// Write "x,y" to the string with the given precision.
///
/// Normalizes negative zero to positive zero for cleaner output.
fn write_point(d: &mut String, x: Scalar, y: Scalar, precision: usize) {
    use std::fmt::Write;
    let x = if x == 0.0 { 0.0 } else { x };
    let y = if y == 0.0 { 0.0 } else { y };
    let _ = write!(d, "{x:.precision$},{y:.precision$}");
}

// ---------------------------------------------------------------------------
// Color / transform helpers
// ---------------------------------------------------------------------------

/// Convert a [`Color`] to an SVG paint string.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "color components are clamped to [0, 255]"
)]
fn color_to_svg(c: Color) -> String {
    if c.is_invisible() {
        return "none".to_owned();
    }
    let r = (c.r.clamp(0.0, 1.0) * 255.0).round() as u8;
    let g = (c.g.clamp(0.0, 1.0) * 255.0).round() as u8;
    let b = (c.b.clamp(0.0, 1.0) * 255.0).round() as u8;
    if c.a < 1.0 {
        format!("rgba({r},{g},{b},{})", fmt_scalar(c.a.clamp(0.0, 1.0), 4))
    } else if r == 0 && g == 0 && b == 0 {
        "black".to_owned()
    } else if r == 255 && g == 255 && b == 255 {
        "white".to_owned()
    } else {
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

fn matrix_to_svg(affine: Affine, precision: usize) -> String {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    format!(
        "matrix({},{},{},{},{},{})",
        fmt_scalar(a, precision),
        fmt_scalar(b, precision),
        fmt_scalar(c, precision),
        fmt_scalar(d, precision),
        fmt_scalar(e, precision),
        fmt_scalar(f, precision),
    )
}

/// Format a scalar to the given precision, stripping trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    // Strip trailing zeros after decimal point, but keep at least one digit.
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        trimmed.to_owned()
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

/// Start the output document with its viewBox and dimensions.
///
/// A declared viewport wins; otherwise the viewBox is fitted to the
/// transformed geometry plus the margin, and an empty scene falls back
/// to a 100×100 box.
fn open_document(scene: &Scene, opts: &RenderOptions) -> Document {
    let (vb_x, vb_y, vb_w, vb_h) = match scene.viewport {
        Some(viewport) => (0.0, 0.0, viewport.width, viewport.height),
        None => {
            let bb = scene_bbox(scene);
            let m = opts.margin;
            if bb.is_valid() {
                (
                    bb.min_x - m,
                    bb.min_y - m,
                    2.0f64.mul_add(m, bb.width()),
                    2.0f64.mul_add(m, bb.height()),
                )
            } else {
                (0.0, 0.0, 100.0, 100.0)
            }
        }
    };

    Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_scalar(vb_x, opts.precision),
                fmt_scalar(vb_y, opts.precision),
                fmt_scalar(vb_w, opts.precision),
                fmt_scalar(vb_h, opts.precision),
            ),
        )
        .set("width", fmt_scalar(vb_w, opts.precision))
        .set("height", fmt_scalar(vb_h, opts.precision))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
