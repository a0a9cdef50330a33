//! Error types for path interpretation and document loading.

use std::fmt;

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// A byte-offset span in a source attribute string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-length span at the given position.
    #[must_use]
    pub const fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ---------------------------------------------------------------------------
// Path errors
// ---------------------------------------------------------------------------

/// Categories of path-data errors.
///
/// All of them fail the owning path element; siblings keep playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathErrorKind {
    /// A numeric lexeme did not parse to a finite number.
    NumberParse,
    /// Arguments did not fill whole groups for their command.
    Arity,
    /// A letter outside the supported command set.
    UnknownCommand,
}

impl fmt::Display for PathErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberParse => write!(f, "invalid number"),
            Self::Arity => write!(f, "wrong argument count"),
            Self::UnknownCommand => write!(f, "unknown command"),
        }
    }
}

/// An error produced while interpreting one path element.
#[derive(Debug, Clone, PartialEq)]
pub struct PathError {
    /// What went wrong.
    pub kind: PathErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Location in the attribute text, if available.
    pub span: Option<Span>,
}

impl PathError {
    /// Create a new error.
    #[must_use]
    pub fn new(kind: PathErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    /// Attach a source span.
    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = self.span {
            write!(f, "[{}..{}] ", span.start, span.end)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PathError {}

/// Convenience type alias for results using [`PathError`].
pub type PathResult<T> = Result<T, PathError>;

// ---------------------------------------------------------------------------
// Document errors
// ---------------------------------------------------------------------------

/// A fatal whole-document failure (malformed markup).
///
/// Per-element problems never surface here; those are recovered and
/// reported as diagnostics while loading continues.
#[derive(Debug, Clone)]
pub struct DocumentError {
    pub message: String,
}

impl DocumentError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DocumentError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_accessors() {
        let s = Span::new(3, 7);
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
        assert!(Span::at(5).is_empty());
    }

    #[test]
    fn error_display_with_span() {
        let err = PathError::new(PathErrorKind::Arity, "expected pairs of coordinates")
            .with_span(Span::new(10, 14));
        let s = format!("{err}");
        assert!(s.contains("[10..14]"), "missing span: {s}");
        assert!(s.contains("expected pairs"), "missing message: {s}");
    }

    #[test]
    fn error_display_without_span() {
        let err = PathError::new(PathErrorKind::NumberParse, "empty lexeme");
        let s = format!("{err}");
        assert!(!s.contains('['), "should not have span: {s}");
    }

    #[test]
    fn kind_display() {
        assert_eq!(format!("{}", PathErrorKind::UnknownCommand), "unknown command");
    }
}
