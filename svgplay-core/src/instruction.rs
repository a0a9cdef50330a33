//! Resolved path instructions.
//!
//! After resolution every coordinate is absolute and every shorthand is
//! expanded, so a playback pass needs no cursor arithmetic of its own.

use svgplay_graphics::types::Point;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Fully resolved command kinds.
///
/// Vertical, horizontal and smooth variants survive resolution as distinct
/// kinds even though their points are already absolute; diagnostics and
/// round-trip tooling want to know what the author wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    CurveTo,
    VerticalLineTo,
    HorizontalLineTo,
    SmoothCurveTo,
    ClosePath,
}

impl CommandKind {
    /// Points consumed per argument group after resolution.
    #[must_use]
    pub const fn points_per_group(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo | Self::VerticalLineTo | Self::HorizontalLineTo => 1,
            Self::CurveTo | Self::SmoothCurveTo => 3,
            Self::ClosePath => 0,
        }
    }
}

/// One resolved command with its absolute points.
///
/// A repeated source command (`L1,2 3,4`) stays one instruction whose
/// points hold every group in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub command: CommandKind,
    pub points: Vec<Point>,
}

impl Instruction {
    #[must_use]
    pub fn new(command: CommandKind, points: Vec<Point>) -> Self {
        Self { command, points }
    }

    /// Iterate argument groups. Each slice is `points_per_group` long;
    /// zero-arity commands yield nothing.
    pub fn groups(&self) -> impl Iterator<Item = &[Point]> {
        let size = self.command.points_per_group().max(1);
        self.points.chunks_exact(size)
    }
}

/// A whole resolved path.
pub type PathData = Vec<Instruction>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
