//! Instruction playback.
//!
//! The player walks resolved instructions and writes polyline geometry
//! into any [`TraceSink`]: moves open sub-paths, lines land directly or
//! through the dash projector, curves are flattened first. It also owns
//! the hole heuristic, which brackets interior sub-paths so a fill can
//! flip to the even-odd rule.

use svgplay_graphics::dash::{dash_curve, dash_line};
use svgplay_graphics::flatten::{CubicSegment, Curve};
use svgplay_graphics::trace::TraceSink;
use svgplay_graphics::types::{Point, Style};

use crate::instruction::{CommandKind, Instruction};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Playback switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOptions {
    /// Bracket interior sub-paths with hole markers.
    pub holes: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self { holes: true }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One-shot playback of a resolved path into a sink.
pub struct Player<'a, S: TraceSink> {
    sink: &'a mut S,
    style: &'a Style,
    options: PlayOptions,
    /// Pen position; `(0, 0)` until the first move, so a path that draws
    /// before moving starts from the origin.
    pen: Point,
    open: bool,
    move_count: usize,
}

impl<'a, S: TraceSink> Player<'a, S> {
    #[must_use]
    pub fn new(sink: &'a mut S, style: &'a Style, options: PlayOptions) -> Self {
        Self {
            sink,
            style,
            options,
            pen: Point::ZERO,
            open: false,
            move_count: 0,
        }
    }

    /// Play the whole path.
    ///
    /// The hole heuristic is positional: from the third move onward each
    /// move is preceded by a hole bracket, and a path with several
    /// sub-paths whose final command is not a close gets one more bracket
    /// at the end. Both halves only apply when holes are enabled.
    pub fn play(mut self, path: &[Instruction]) {
        for instruction in path {
            self.play_instruction(instruction);
        }

        let closed_end = matches!(path.last(), Some(i) if i.command == CommandKind::ClosePath);
        if self.options.holes && self.move_count > 1 && !closed_end {
            self.sink.begin_hole();
            self.sink.end_hole();
        }
    }

    fn play_instruction(&mut self, instruction: &Instruction) {
        match instruction.command {
            CommandKind::MoveTo => {
                for (index, group) in instruction.groups().enumerate() {
                    // Extra coordinate pairs on a move are implicit lines.
                    if index == 0 {
                        self.play_move(group[0]);
                    } else {
                        self.play_line(group[0]);
                    }
                }
            }
            CommandKind::LineTo
            | CommandKind::VerticalLineTo
            | CommandKind::HorizontalLineTo => {
                for group in instruction.groups() {
                    self.play_line(group[0]);
                }
            }
            CommandKind::CurveTo | CommandKind::SmoothCurveTo => {
                for group in instruction.groups() {
                    self.play_curve(group[0], group[1], group[2]);
                }
            }
            CommandKind::ClosePath => self.sink.close_path(),
        }
    }

    fn play_move(&mut self, to: Point) {
        if self.options.holes && self.move_count >= 2 {
            self.sink.begin_hole();
            self.sink.end_hole();
        }
        self.move_count += 1;
        self.sink.move_to(to);
        self.pen = to;
        self.open = true;
    }

    fn play_line(&mut self, to: Point) {
        self.ensure_open();
        match self.style.dash() {
            Some(dash) => dash_line(self.sink, self.pen, to, dash),
            None => self.sink.line_to(to),
        }
        self.pen = to;
    }

    fn play_curve(&mut self, c1: Point, c2: Point, to: Point) {
        self.ensure_open();
        let segment = CubicSegment::new(self.pen, c1, c2, to);
        let segments = self.style.curve_segments.max(1);
        match self.style.dash() {
            Some(dash) => dash_curve(self.sink, segment.flatten(segments), dash),
            None => {
                for p in segment.flatten(segments) {
                    self.sink.line_to(p);
                }
            }
        }
        self.pen = to;
    }

    /// Open a sub-path at the pen if drawing starts without a move. Does
    /// not count as a move for the hole heuristic.
    fn ensure_open(&mut self) {
        if !self.open {
            self.sink.move_to(self.pen);
            self.open = true;
        }
    }
}

/// Convenience wrapper over [`Player`].
pub fn play_path<S: TraceSink>(
    path: &[Instruction],
    style: &Style,
    options: PlayOptions,
    sink: &mut S,
) {
    Player::new(sink, style, options).play(path);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
