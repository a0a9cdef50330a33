//! Transform attribute parsing.
//!
//! Parses a transform list into one composed [`Affine`]. Operations
//! compose left to right the way documents mean them: in
//! `translate(…) scale(…)` the scale applies to the geometry first.
//! Angles are written in degrees and converted here.

use svgplay_graphics::types::{Affine, Scalar};

/// Parse a transform list. Any malformed operation fails the whole
/// attribute, so a caller can warn and keep the inherited transform.
#[must_use]
pub fn parse_transform(text: &str) -> Option<Affine> {
    let mut acc = Affine::IDENTITY;
    let mut rest = text.trim();

    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest.find(')')?;
        if close < open {
            return None;
        }

        let name = rest[..open].trim();
        let args = parse_arguments(&rest[open + 1..close])?;
        acc = acc * transform_op(name, &args)?;

        rest = rest[close + 1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }

    Some(acc)
}

fn parse_arguments(text: &str) -> Option<Vec<Scalar>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Scalar>().ok().filter(|v| v.is_finite()))
        .collect()
}

fn transform_op(name: &str, args: &[Scalar]) -> Option<Affine> {
    match (name, args) {
        ("matrix", &[a, b, c, d, e, f]) => Some(Affine::new([a, b, c, d, e, f])),
        ("translate", &[tx]) => Some(Affine::translate((tx, 0.0))),
        ("translate", &[tx, ty]) => Some(Affine::translate((tx, ty))),
        ("scale", &[s]) => Some(Affine::scale(s)),
        ("scale", &[sx, sy]) => Some(Affine::scale_non_uniform(sx, sy)),
        ("rotate", &[deg]) => Some(Affine::rotate(deg.to_radians())),
        ("rotate", &[deg, cx, cy]) => Some(
            Affine::translate((cx, cy))
                * Affine::rotate(deg.to_radians())
                * Affine::translate((-cx, -cy)),
        ),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
