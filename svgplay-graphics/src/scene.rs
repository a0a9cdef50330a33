//! The assembled result of playing a whole document.

use crate::trace::Trace;
use crate::types::{Affine, Scalar, Style};

/// Document viewport dimensions, when the source declared them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: Scalar,
    pub height: Scalar,
}

/// One traced element with its resolved paint style and transform.
///
/// Geometry is recorded in local coordinates; the composed transform is
/// applied (or serialized) by the output backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub trace: Trace,
    pub style: Style,
    pub transform: Affine,
}

/// An ordered collection of traced elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub viewport: Option<Viewport>,
    pub elements: Vec<Element>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
