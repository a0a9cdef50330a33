//! Numeric literal parsing for path data and attributes.
//!
//! Standard float parsing does all the work: `1.5e-3`, `-2.3E+2`, `.5`
//! and `1.` all go through [`str::parse`]. There is no hand-rolled
//! mantissa/exponent arithmetic. `NaN` is rejected because a coordinate
//! that is not a number poisons every comparison downstream.

use svgplay_graphics::types::Scalar;

use crate::error::{PathError, PathErrorKind, PathResult};

/// Parse one numeric lexeme.
pub fn parse_number(text: &str) -> PathResult<Scalar> {
    match text.parse::<Scalar>() {
        Ok(v) if v.is_nan() => Err(PathError::new(
            PathErrorKind::NumberParse,
            format!("{text:?} is not a number"),
        )),
        Ok(v) => Ok(v),
        Err(_) => Err(PathError::new(
            PathErrorKind::NumberParse,
            format!("invalid number {text:?}"),
        )),
    }
}

/// Parse a CSS-ish length: a plain number with an optional `px` suffix.
pub fn parse_length(text: &str) -> PathResult<Scalar> {
    let trimmed = text.trim();
    let bare = trimmed.strip_suffix("px").unwrap_or(trimmed);
    parse_number(bare.trim())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
