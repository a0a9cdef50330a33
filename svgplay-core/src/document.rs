//! Document traversal.
//!
//! Walks an SVG document event by event and builds a [`Scene`]: every
//! drawable element is played into a trace and paired with its resolved
//! style and transform. Styles and transforms inherit through a stack
//! that mirrors element nesting, and `<style>` blocks feed the class map
//! used by everything after them.
//!
//! Error handling is two-tier. A geometry error poisons only its element:
//! the walk logs a warning, records a diagnostic, and keeps going. A
//! document the XML reader cannot parse fails the whole load.

use log::{debug, warn};
use svg::node::element::tag::{self, Type};
use svg::node::Attributes;
use svg::parser::Event;

use svgplay_graphics::flatten::{Curve, CubicSegment};
use svgplay_graphics::scene::{Element, Scene, Viewport};
use svgplay_graphics::trace::{Trace, TraceSink};
use svgplay_graphics::types::{Affine, Point, Scalar, Style, DEFAULT_CURVE_SEGMENTS};

use crate::error::{DocumentError, PathError, PathErrorKind, PathResult};
use crate::number::parse_length;
use crate::player::{play_path, PlayOptions};
use crate::resolver::parse_path;
use crate::style::{resolve_style, ClassMap};
use crate::tokenizer::tokenize_numbers;
use crate::transform::parse_transform;

/// Circle-from-cubics control distance, as a fraction of the radius.
const KAPPA: Scalar = 0.552_284_749_830_793_6;

// ---------------------------------------------------------------------------
// Options and diagnostics
// ---------------------------------------------------------------------------

/// Knobs for one document load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Bracket interior path sub-paths with hole markers.
    pub holes: bool,
    /// Override the flattening segment count for every element.
    pub curve_segments: Option<usize>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            holes: true,
            curve_segments: None,
        }
    }
}

/// A recoverable per-element failure, kept for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementError {
    /// Tag name of the element that failed.
    pub element: String,
    pub error: PathError,
}

impl std::fmt::Display for ElementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>: {}", self.element, self.error)
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Event-driven scene builder.
#[derive(Debug, Default)]
pub struct DocumentLoader {
    options: DocumentOptions,
    errors: Vec<ElementError>,
}

impl DocumentLoader {
    #[must_use]
    pub fn new(options: DocumentOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
        }
    }

    /// Diagnostics collected by the most recent [`load`](Self::load).
    #[must_use]
    pub fn errors(&self) -> &[ElementError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ElementError> {
        std::mem::take(&mut self.errors)
    }

    fn base_style(&self) -> Style {
        Style {
            curve_segments: self
                .options
                .curve_segments
                .unwrap_or(DEFAULT_CURVE_SEGMENTS),
            ..Style::default()
        }
    }

    /// Build a scene from document source.
    pub fn load(&mut self, source: &str) -> Result<Scene, DocumentError> {
        let parser = svg::read(source)
            .map_err(|e| DocumentError::new(format!("unreadable document: {e}")))?;

        let mut scene = Scene::new();
        let mut classes = ClassMap::new();
        let mut stack: Vec<(Style, Affine)> = Vec::new();
        let mut style = self.base_style();
        let mut transform = Affine::IDENTITY;
        let mut in_style = false;

        for event in parser {
            match event {
                Event::Tag(tag::Style, kind, _) => match kind {
                    Type::Start => {
                        stack.push((style, transform));
                        in_style = true;
                    }
                    Type::End => {
                        in_style = false;
                        if let Some(top) = stack.pop() {
                            (style, transform) = top;
                        }
                    }
                    Type::Empty => {}
                },
                Event::Tag(name, Type::Start, attributes) => {
                    stack.push((style, transform));
                    style = resolve_style(&style, &classes, |key| {
                        attributes.get(key).map(|v| v.to_string())
                    });
                    transform = transform * own_transform(&attributes);
                    self.visit(name, &attributes, style, transform, &mut scene);
                }
                Event::Tag(_, Type::End, _) => {
                    if let Some(top) = stack.pop() {
                        (style, transform) = top;
                    }
                }
                Event::Tag(name, Type::Empty, attributes) => {
                    let local_style = resolve_style(&style, &classes, |key| {
                        attributes.get(key).map(|v| v.to_string())
                    });
                    let local_transform = transform * own_transform(&attributes);
                    self.visit(name, &attributes, local_style, local_transform, &mut scene);
                }
                Event::Text(text) => {
                    if in_style {
                        classes.add_css(strip_cdata(text));
                    }
                }
                Event::Error(e) => {
                    return Err(DocumentError::new(format!("malformed document: {e}")));
                }
                _ => {}
            }
        }

        Ok(scene)
    }

    fn visit(
        &mut self,
        name: &str,
        attributes: &Attributes,
        style: Style,
        transform: Affine,
        scene: &mut Scene,
    ) {
        if name == tag::SVG {
            // The outermost svg element sets the viewport.
            if scene.viewport.is_none() {
                scene.viewport = read_viewport(attributes);
            }
            return;
        }
        if !is_shape(name) {
            debug!("ignoring <{name}>");
            return;
        }

        match trace_shape(name, attributes, &style, self.options.holes) {
            Ok(Some(trace)) => scene.push(Element {
                trace,
                style,
                transform,
            }),
            Ok(None) => {}
            Err(error) => {
                warn!("dropping <{name}>: {error}");
                self.errors.push(ElementError {
                    element: name.to_owned(),
                    error,
                });
            }
        }
    }
}

/// Load a document with default options; diagnostics ride along.
pub fn parse_document(source: &str) -> Result<(Scene, Vec<ElementError>), DocumentError> {
    let mut loader = DocumentLoader::new(DocumentOptions::default());
    let scene = loader.load(source)?;
    Ok((scene, loader.take_errors()))
}

// ---------------------------------------------------------------------------
// Attribute helpers
// ---------------------------------------------------------------------------

fn is_shape(name: &str) -> bool {
    matches!(
        name,
        tag::Path
            | tag::Rectangle
            | tag::Circle
            | tag::Ellipse
            | tag::Line
            | tag::Polyline
            | tag::Polygon
    )
}

fn strip_cdata(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("<![CDATA[")
        .and_then(|s| s.strip_suffix("]]>"))
        .unwrap_or(text)
}

fn own_transform(attributes: &Attributes) -> Affine {
    match attributes.get("transform") {
        Some(text) => parse_transform(text).unwrap_or_else(|| {
            warn!("unparseable transform {:?}; ignoring", &**text);
            Affine::IDENTITY
        }),
        None => Affine::IDENTITY,
    }
}

fn length_attr(attributes: &Attributes, name: &str) -> PathResult<Option<Scalar>> {
    match attributes.get(name) {
        Some(value) => parse_length(value)
            .map(Some)
            .map_err(|e| PathError::new(e.kind, format!("attribute {name:?}: {}", e.message))),
        None => Ok(None),
    }
}

fn read_viewport(attributes: &Attributes) -> Option<Viewport> {
    let width = attributes.get("width").and_then(|v| parse_length(v).ok())?;
    let height = attributes.get("height").and_then(|v| parse_length(v).ok())?;
    (width > 0.0 && height > 0.0).then_some(Viewport { width, height })
}

// ---------------------------------------------------------------------------
// Shape tracing
// ---------------------------------------------------------------------------

/// Trace one drawable element. `Ok(None)` means degenerate geometry that
/// is skipped without a diagnostic.
fn trace_shape(
    name: &str,
    attributes: &Attributes,
    style: &Style,
    holes: bool,
) -> PathResult<Option<Trace>> {
    let mut trace = Trace::new();
    match name {
        tag::Path => {
            if let Some(d) = attributes.get("d") {
                let path = parse_path(d)?;
                play_path(&path, style, PlayOptions { holes }, &mut trace);
            }
        }
        tag::Rectangle => trace_rect(attributes, &mut trace)?,
        tag::Circle => {
            let r = length_attr(attributes, "r")?.unwrap_or(0.0);
            trace_ellipse(attributes, r, r, style, &mut trace)?;
        }
        tag::Ellipse => {
            let rx = length_attr(attributes, "rx")?.unwrap_or(0.0);
            let ry = length_attr(attributes, "ry")?.unwrap_or(0.0);
            trace_ellipse(attributes, rx, ry, style, &mut trace)?;
        }
        tag::Line => trace_line(attributes, &mut trace)?,
        tag::Polyline => trace_poly(attributes, false, &mut trace)?,
        tag::Polygon => trace_poly(attributes, true, &mut trace)?,
        _ => {}
    }
    Ok((!trace.is_empty()).then_some(trace))
}

fn trace_rect(attributes: &Attributes, trace: &mut Trace) -> PathResult<()> {
    let x = length_attr(attributes, "x")?.unwrap_or(0.0);
    let y = length_attr(attributes, "y")?.unwrap_or(0.0);
    let width = length_attr(attributes, "width")?.unwrap_or(0.0);
    let height = length_attr(attributes, "height")?.unwrap_or(0.0);
    if width <= 0.0 || height <= 0.0 {
        debug!("skipping rect with degenerate size {width}x{height}");
        return Ok(());
    }

    trace.move_to(Point::new(x, y));
    trace.line_to(Point::new(x + width, y));
    trace.line_to(Point::new(x + width, y + height));
    trace.line_to(Point::new(x, y + height));
    trace.close_path();
    Ok(())
}

/// Four kappa cubics around the center, flattened a quarter at a time.
fn trace_ellipse(
    attributes: &Attributes,
    rx: Scalar,
    ry: Scalar,
    style: &Style,
    trace: &mut Trace,
) -> PathResult<()> {
    let cx = length_attr(attributes, "cx")?.unwrap_or(0.0);
    let cy = length_attr(attributes, "cy")?.unwrap_or(0.0);
    if rx <= 0.0 || ry <= 0.0 {
        debug!("skipping ellipse with degenerate radii {rx}x{ry}");
        return Ok(());
    }

    let kx = KAPPA * rx;
    let ky = KAPPA * ry;
    let quarters = [
        (
            Point::new(cx + rx, cy + ky),
            Point::new(cx + kx, cy + ry),
            Point::new(cx, cy + ry),
        ),
        (
            Point::new(cx - kx, cy + ry),
            Point::new(cx - rx, cy + ky),
            Point::new(cx - rx, cy),
        ),
        (
            Point::new(cx - rx, cy - ky),
            Point::new(cx - kx, cy - ry),
            Point::new(cx, cy - ry),
        ),
        (
            Point::new(cx + kx, cy - ry),
            Point::new(cx + rx, cy - ky),
            Point::new(cx + rx, cy),
        ),
    ];

    let segments = (style.curve_segments / 4).max(1);
    let mut pen = Point::new(cx + rx, cy);
    trace.move_to(pen);
    for (c1, c2, end) in quarters {
        for p in CubicSegment::new(pen, c1, c2, end).flatten(segments) {
            trace.line_to(p);
        }
        pen = end;
    }
    trace.close_path();
    Ok(())
}

fn trace_line(attributes: &Attributes, trace: &mut Trace) -> PathResult<()> {
    let x1 = length_attr(attributes, "x1")?.unwrap_or(0.0);
    let y1 = length_attr(attributes, "y1")?.unwrap_or(0.0);
    let x2 = length_attr(attributes, "x2")?.unwrap_or(0.0);
    let y2 = length_attr(attributes, "y2")?.unwrap_or(0.0);
    trace.move_to(Point::new(x1, y1));
    trace.line_to(Point::new(x2, y2));
    Ok(())
}

fn trace_poly(attributes: &Attributes, close: bool, trace: &mut Trace) -> PathResult<()> {
    let Some(points) = attributes.get("points") else {
        return Ok(());
    };
    let coords = tokenize_numbers(points)?;
    if coords.len() % 2 != 0 {
        return Err(PathError::new(
            PathErrorKind::Arity,
            "points list has an odd coordinate count",
        ));
    }

    let mut pairs = coords.chunks_exact(2).map(|c| Point::new(c[0], c[1]));
    let Some(first) = pairs.next() else {
        return Ok(());
    };
    trace.move_to(first);
    for p in pairs {
        trace.line_to(p);
    }
    if close {
        trace.close_path();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
