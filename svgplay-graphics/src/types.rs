//! Core types shared across the `svgplay` system.
//!
//! These types define the drawing model that path playback produces
//! geometry for: colors, dash patterns, stroke settings, and the per-element
//! style record.

pub use kurbo::{Affine, Point, Vec2};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias. All geometry runs on f64 for compatibility with
/// `kurbo` and WASM.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons.
pub const EPSILON: Scalar = 1e-9;

/// Smallest admissible dash or gap length. Shorter values are clamped so
/// that the dash walk always makes forward progress.
pub const MIN_DASH_LENGTH: Scalar = EPSILON;

/// Default number of line segments a curve is flattened into.
pub const DEFAULT_CURVE_SEGMENTS: usize = 100;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: Scalar,
    pub g: Scalar,
    pub b: Scalar,
    pub a: Scalar,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// An opaque color from RGB components.
    #[inline]
    #[must_use]
    pub const fn new(r: Scalar, g: Scalar, b: Scalar) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    #[must_use]
    pub const fn rgba(r: Scalar, g: Scalar, b: Scalar, a: Scalar) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color from 8-bit channel values.
    #[must_use]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            Scalar::from(r) / 255.0,
            Scalar::from(g) / 255.0,
            Scalar::from(b) / 255.0,
        )
    }

    /// Same color with a different alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(mut self, a: Scalar) -> Self {
        self.a = a;
        self
    }

    /// Whether the color contributes no paint at all.
    #[must_use]
    pub fn is_invisible(&self) -> bool {
        self.a <= 0.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ---------------------------------------------------------------------------
// Dash
// ---------------------------------------------------------------------------

/// A two-phase dash pattern: a drawn length followed by a gap length.
///
/// Both lengths are clamped to [`MIN_DASH_LENGTH`] on construction; zero or
/// negative inputs would otherwise stall the projection walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub dash_length: Scalar,
    pub space_length: Scalar,
}

impl Dash {
    #[must_use]
    pub fn new(dash_length: Scalar, space_length: Scalar) -> Self {
        Self {
            dash_length: dash_length.max(MIN_DASH_LENGTH),
            space_length: space_length.max(MIN_DASH_LENGTH),
        }
    }
}

// ---------------------------------------------------------------------------
// Stroke
// ---------------------------------------------------------------------------

/// Stroke paint settings for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: Scalar,
    /// Dash pattern; `None` strokes solid.
    pub dash: Option<Dash>,
}

impl Stroke {
    /// A solid stroke of unit width.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            width: 1.0,
            dash: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Resolved paint style for one element.
///
/// A style is closed: inheritance and class lookup happen while the
/// document is traversed, so by the time geometry is played every field
/// has its final value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Fill paint; `None` leaves the interior unpainted.
    pub fill: Option<Color>,
    /// Stroke paint; `None` leaves the outline unpainted.
    pub stroke: Option<Stroke>,
    /// Number of segments each curve is flattened into. Fixed per style,
    /// never adaptive.
    pub curve_segments: usize,
}

impl Style {
    /// Active dash pattern, if the stroke is dashed.
    #[must_use]
    pub fn dash(&self) -> Option<&Dash> {
        self.stroke.as_ref().and_then(|s| s.dash.as_ref())
    }
}

impl Default for Style {
    /// SVG defaults: black fill, no stroke.
    fn default() -> Self {
        Self {
            fill: Some(Color::BLACK),
            stroke: None,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn color_defaults() {
        assert_eq!(Color::default(), Color::BLACK);
        assert_eq!(Color::WHITE, Color::new(1.0, 1.0, 1.0));
        assert_eq!(Color::default().a, 1.0);
    }

    #[test]
    fn color_visibility() {
        assert!(Color::TRANSPARENT.is_invisible());
        assert!(Color::BLACK.with_alpha(0.0).is_invisible());
        assert!(!Color::BLACK.is_invisible());
    }

    #[test]
    fn color_from_u8_range() {
        let c = Color::from_u8(255, 0, 127);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 127.0 / 255.0).abs() < EPSILON);
    }

    #[test]
    fn dash_clamps_degenerate_lengths() {
        let d = Dash::new(0.0, -3.0);
        assert!(d.dash_length >= MIN_DASH_LENGTH);
        assert!(d.space_length >= MIN_DASH_LENGTH);

        let d = Dash::new(5.0, 2.0);
        assert_eq!(d.dash_length, 5.0);
        assert_eq!(d.space_length, 2.0);
    }

    #[test]
    fn style_defaults() {
        let s = Style::default();
        assert_eq!(s.fill, Some(Color::BLACK));
        assert!(s.stroke.is_none());
        assert_eq!(s.curve_segments, DEFAULT_CURVE_SEGMENTS);
        assert!(s.dash().is_none());
    }

    #[test]
    fn style_dash_lookup() {
        let mut s = Style::default();
        s.stroke = Some(Stroke {
            color: Color::BLACK,
            width: 2.0,
            dash: Some(Dash::new(4.0, 2.0)),
        });
        assert_eq!(s.dash().map(|d| d.dash_length), Some(4.0));
    }
}
