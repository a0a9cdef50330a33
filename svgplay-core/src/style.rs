//! Style resolution.
//!
//! Styles flow down the element tree. Each element starts from its
//! parent's resolved style and layers its own sources over it, weakest
//! first:
//!
//! 1. class declarations from `<style>` blocks, in `class` attribute order;
//! 2. the inline `style` attribute;
//! 3. presentation attributes (`fill`, `stroke`, `stroke-width`,
//!    `stroke-dasharray`).
//!
//! The class parser understands plain class selectors only. Unknown
//! properties are skipped; a property with an unparseable value logs a
//! warning and leaves the inherited value in place.

use std::collections::HashMap;

use log::{debug, warn};
use svgplay_graphics::types::{Color, Dash, Stroke, Style};

use crate::color::{parse_paint, Paint};
use crate::number::parse_length;

// ---------------------------------------------------------------------------
// Class declarations
// ---------------------------------------------------------------------------

/// Declarations gathered from `<style>` blocks, keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    classes: HashMap<String, Vec<(String, String)>>,
}

impl ClassMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stylesheet and merge its class rules. Rules for a class
    /// seen before are appended, so later blocks win in application order.
    pub fn add_css(&mut self, css: &str) {
        let css = strip_comments(css);
        for block in css.split('}') {
            let Some((selectors, declarations)) = block.split_once('{') else {
                continue;
            };
            let declarations = parse_declarations(declarations);
            if declarations.is_empty() {
                continue;
            }
            for selector in selectors.split(',') {
                let selector = selector.trim();
                let Some(name) = selector.strip_prefix('.') else {
                    debug!("ignoring non-class selector {selector:?}");
                    continue;
                };
                if name.is_empty() || name.contains(char::is_whitespace) {
                    continue;
                }
                self.classes
                    .entry(name.to_owned())
                    .or_default()
                    .extend(declarations.iter().cloned());
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[(String, String)]> {
        self.classes.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start..].find("*/") {
            Some(end) => rest = &rest[start + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Split `prop: value; prop: value` into trimmed pairs.
fn parse_declarations(text: &str) -> Vec<(String, String)> {
    text.split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim().to_owned();
            (!prop.is_empty() && !value.is_empty()).then_some((prop, value))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Property application
// ---------------------------------------------------------------------------

/// Apply one property to a style. Unknown properties are ignored.
pub fn apply_property(style: &mut Style, name: &str, value: &str) {
    match name {
        "fill" => match parse_paint(value) {
            Some(Paint::None) => style.fill = None,
            Some(Paint::Color(c)) => style.fill = Some(c),
            None => warn!("unparseable fill {value:?}; keeping inherited paint"),
        },
        "stroke" => match parse_paint(value) {
            Some(Paint::None) => style.stroke = None,
            Some(Paint::Color(c)) => stroke_mut(style).color = c,
            None => warn!("unparseable stroke {value:?}; keeping inherited paint"),
        },
        "stroke-width" => match parse_length(value) {
            Ok(width) if width >= 0.0 => stroke_mut(style).width = width,
            _ => warn!("unparseable stroke-width {value:?}"),
        },
        "stroke-dasharray" => apply_dasharray(style, value),
        _ => {}
    }
}

/// The element's stroke, created invisible if it has none yet. Width and
/// dash settings can then arrive before the stroke color does; a stroke
/// that never receives a color stays invisible but its dash still cuts
/// the geometry.
fn stroke_mut(style: &mut Style) -> &mut Stroke {
    style
        .stroke
        .get_or_insert_with(|| Stroke::solid(Color::TRANSPARENT))
}

fn apply_dasharray(style: &mut Style, value: &str) {
    if value.trim().eq_ignore_ascii_case("none") {
        if let Some(stroke) = style.stroke.as_mut() {
            stroke.dash = None;
        }
        return;
    }

    let lengths: Result<Vec<f64>, _> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_length)
        .collect();
    let dash = match lengths.as_deref() {
        Ok([dash]) => Dash::new(*dash, *dash),
        Ok([dash, space, ..]) => Dash::new(*dash, *space),
        Ok([]) | Err(_) => {
            warn!("unparseable stroke-dasharray {value:?}");
            return;
        }
    };
    stroke_mut(style).dash = Some(dash);
}

/// Apply an inline `style` attribute.
pub fn apply_inline(style: &mut Style, text: &str) {
    for (prop, value) in parse_declarations(text) {
        apply_property(style, &prop, &value);
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Presentation attributes, in application order.
const PRESENTATION_ATTRIBUTES: [&str; 4] = ["fill", "stroke", "stroke-width", "stroke-dasharray"];

/// Resolve an element's style from its parent and its attributes.
///
/// `attr` looks up one attribute by name; it abstracts over the XML
/// reader's attribute map.
pub fn resolve_style<F>(parent: &Style, classes: &ClassMap, attr: F) -> Style
where
    F: Fn(&str) -> Option<String>,
{
    let mut style = *parent;

    if let Some(list) = attr("class") {
        for name in list.split_whitespace() {
            if let Some(declarations) = classes.get(name) {
                for (prop, value) in declarations {
                    apply_property(&mut style, prop, value);
                }
            } else {
                debug!("class {name:?} has no declarations");
            }
        }
    }

    if let Some(inline) = attr("style") {
        apply_inline(&mut style, &inline);
    }

    for name in PRESENTATION_ATTRIBUTES {
        if let Some(value) = attr(name) {
            apply_property(&mut style, name, &value);
        }
    }

    style
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
