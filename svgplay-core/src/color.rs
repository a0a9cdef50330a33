//! Paint value parsing.
//!
//! Covers the color forms documents actually use: hex shorthand and
//! six-digit hex, `rgb()`/`rgba()` with integer or percentage components,
//! a small named table, and the `none` keyword. Anything else parses to
//! `None` so the caller can warn and keep the inherited paint.

use svgplay_graphics::types::{Color, Scalar};

/// A parsed paint value: either explicitly unpainted or a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    None,
    Color(Color),
}

/// Parse a fill/stroke attribute value.
#[must_use]
pub fn parse_paint(text: &str) -> Option<Paint> {
    let text = text.trim().to_ascii_lowercase();
    if text == "none" {
        return Some(Paint::None);
    }
    parse_color(&text).map(Paint::Color)
}

fn parse_color(text: &str) -> Option<Color> {
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(body) = text
        .strip_prefix("rgba")
        .or_else(|| text.strip_prefix("rgb"))
    {
        return parse_rgb(body);
    }
    named_color(text)
}

// ---------------------------------------------------------------------------
// Hex
// ---------------------------------------------------------------------------

fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |c: u8| (c as char).to_digit(16).map(|v| v as u8);
    let bytes = hex.as_bytes();
    match bytes.len() {
        // Shorthand: each nibble doubled, `#1af` = `#11aaff`.
        3 => {
            let r = nibble(bytes[0])?;
            let g = nibble(bytes[1])?;
            let b = nibble(bytes[2])?;
            Some(Color::from_u8(r * 17, g * 17, b * 17))
        }
        6 => {
            let channel = |i: usize| Some(nibble(bytes[i])? * 16 + nibble(bytes[i + 1])?);
            Some(Color::from_u8(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// rgb() / rgba()
// ---------------------------------------------------------------------------

fn parse_rgb(body: &str) -> Option<Color> {
    let inner = body.trim().strip_prefix('(')?.strip_suffix(')')?;
    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = match parts.get(3) {
        Some(part) => parse_alpha(part)?,
        None => 1.0,
    };
    Some(Color::rgba(r, g, b, a))
}

/// A channel is an integer in 0..=255 or a percentage.
fn parse_channel(part: &str) -> Option<Scalar> {
    let value = if let Some(percent) = part.strip_suffix('%') {
        percent.parse::<Scalar>().ok()? / 100.0
    } else {
        part.parse::<Scalar>().ok()? / 255.0
    };
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

fn parse_alpha(part: &str) -> Option<Scalar> {
    let value = if let Some(percent) = part.strip_suffix('%') {
        percent.parse::<Scalar>().ok()? / 100.0
    } else {
        part.parse::<Scalar>().ok()?
    };
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

fn named_color(name: &str) -> Option<Color> {
    let rgb = |r, g, b| Some(Color::from_u8(r, g, b));
    match name {
        "black" => rgb(0, 0, 0),
        "white" => rgb(255, 255, 255),
        "red" => rgb(255, 0, 0),
        "lime" => rgb(0, 255, 0),
        "blue" => rgb(0, 0, 255),
        "green" => rgb(0, 128, 0),
        "yellow" => rgb(255, 255, 0),
        "cyan" | "aqua" => rgb(0, 255, 255),
        "magenta" | "fuchsia" => rgb(255, 0, 255),
        "gray" | "grey" => rgb(128, 128, 128),
        "silver" => rgb(192, 192, 192),
        "maroon" => rgb(128, 0, 0),
        "olive" => rgb(128, 128, 0),
        "navy" => rgb(0, 0, 128),
        "teal" => rgb(0, 128, 128),
        "purple" => rgb(128, 0, 128),
        "orange" => rgb(255, 165, 0),
        "brown" => rgb(165, 42, 42),
        "pink" => rgb(255, 192, 203),
        "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn color_of(text: &str) -> Color {
        match parse_paint(text) {
            Some(Paint::Color(c)) => c,
            other => panic!("expected a color for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn keyword_none() {
        assert_eq!(parse_paint("none"), Some(Paint::None));
        assert_eq!(parse_paint("  NONE "), Some(Paint::None));
    }

    #[test]
    fn hex_six_digits() {
        assert_eq!(color_of("#ff0000"), Color::new(1.0, 0.0, 0.0));
        assert_eq!(color_of("#000000"), Color::BLACK);
        assert_eq!(color_of("#FFFFFF"), Color::WHITE);
    }

    #[test]
    fn hex_shorthand_doubles_nibbles() {
        assert_eq!(color_of("#f00"), color_of("#ff0000"));
        assert_eq!(color_of("#1af"), color_of("#11aaff"));
    }

    #[test]
    fn hex_bad_lengths_fail() {
        assert_eq!(parse_paint("#ff00"), None);
        assert_eq!(parse_paint("#ff000000ff"), None);
        assert_eq!(parse_paint("#gg0000"), None);
    }

    #[test]
    fn rgb_integers() {
        assert_eq!(color_of("rgb(255, 0, 0)"), Color::new(1.0, 0.0, 0.0));
        assert_eq!(color_of("rgb(0,0,0)"), Color::BLACK);
    }

    #[test]
    fn rgb_percentages() {
        assert_eq!(color_of("rgb(100%, 0%, 50%)"), Color::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn rgba_alpha_is_a_fraction() {
        let c = color_of("rgba(255, 255, 255, 0.5)");
        assert_eq!(c.a, 0.5);
        assert_eq!(color_of("rgba(0,0,0,50%)").a, 0.5);
    }

    #[test]
    fn rgb_out_of_range_clamps() {
        assert_eq!(color_of("rgb(300, -5, 0)"), Color::new(1.0, 0.0, 0.0));
        assert_eq!(color_of("rgba(0,0,0,1.5)").a, 1.0);
    }

    #[test]
    fn rgb_wrong_arity_fails() {
        assert_eq!(parse_paint("rgb(1,2)"), None);
        assert_eq!(parse_paint("rgb(1,2,3,4,5)"), None);
    }

    #[test]
    fn named_colors() {
        assert_eq!(color_of("red"), Color::new(1.0, 0.0, 0.0));
        assert_eq!(color_of("Lime"), Color::new(0.0, 1.0, 0.0));
        assert!(color_of("transparent").is_invisible());
        assert_eq!(parse_paint("mauve-ish"), None);
    }
}
