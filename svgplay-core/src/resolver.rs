//! Coordinate resolver.
//!
//! Turns tokenized command runs into absolute instructions. Relative
//! offsets are applied against a cursor threaded through the pass, and
//! the shorthand commands are expanded:
//!
//! * `V`/`H` borrow the missing coordinate from the cursor;
//! * `S` reflects the previous cubic's second control point across the
//!   cursor, or degenerates to the cursor itself when no control point
//!   has been seen.
//!
//! The reflection point survives across every command, including `M` and
//! `Z`. A smooth command after a move therefore reflects a control point
//! from the previous sub-path, exactly as written sources are rendered
//! by browsers that share this quirk.

use svgplay_graphics::types::Point;

use crate::error::{PathError, PathErrorKind, PathResult};
use crate::instruction::{CommandKind, Instruction, PathData};
use crate::tokenizer::{tokenize, CommandRun, RawCommand};

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Resolution state carried between command runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Endpoint of the most recent command, `(0, 0)` before any.
    pub last_point: Point,
    /// Second control point of the most recent `C`/`S`. Only those two
    /// commands write it, and nothing clears it.
    pub last_control: Option<Point>,
}

impl Cursor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_point: Point::ZERO,
            last_control: None,
        }
    }

    /// The first control point an `S` command should use.
    #[must_use]
    fn reflected_control(&self) -> Point {
        match self.last_control {
            Some(ctrl) => Point::new(
                2.0_f64.mul_add(self.last_point.x, -ctrl.x),
                2.0_f64.mul_add(self.last_point.y, -ctrl.y),
            ),
            None => self.last_point,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve one command run against a cursor.
///
/// Returns the absolute instruction and the cursor for the next run. An
/// argument count that is not a multiple of the command's arity is an
/// error; an empty argument list resolves to a pointless but harmless
/// instruction with no groups.
pub fn resolve(run: &CommandRun, cursor: Cursor) -> PathResult<(Instruction, Cursor)> {
    let arity = run.op.arity();

    if run.op == RawCommand::Close {
        if !run.args.is_empty() {
            return Err(PathError::new(
                PathErrorKind::Arity,
                format!(
                    "command {:?} takes no arguments, found {}",
                    run.op.letter(run.relative),
                    run.args.len()
                ),
            )
            .with_span(run.span));
        }
        return Ok((Instruction::new(CommandKind::ClosePath, Vec::new()), cursor));
    }

    if run.args.len() % arity != 0 {
        return Err(PathError::new(
            PathErrorKind::Arity,
            format!(
                "command {:?} takes arguments in groups of {}, found {}",
                run.op.letter(run.relative),
                arity,
                run.args.len()
            ),
        )
        .with_span(run.span));
    }

    let mut cursor = cursor;
    let mut points = Vec::with_capacity(run.args.len() / arity.max(1) * 3);

    let command = match run.op {
        RawCommand::Move | RawCommand::Line => {
            for group in run.args.chunks_exact(2) {
                let p = resolve_point(group[0], group[1], run.relative, cursor.last_point);
                cursor.last_point = p;
                points.push(p);
            }
            if run.op == RawCommand::Move {
                CommandKind::MoveTo
            } else {
                CommandKind::LineTo
            }
        }
        RawCommand::Vertical => {
            for &arg in &run.args {
                let y = if run.relative {
                    cursor.last_point.y + arg
                } else {
                    arg
                };
                let p = Point::new(cursor.last_point.x, y);
                cursor.last_point = p;
                points.push(p);
            }
            CommandKind::VerticalLineTo
        }
        RawCommand::Horizontal => {
            for &arg in &run.args {
                let x = if run.relative {
                    cursor.last_point.x + arg
                } else {
                    arg
                };
                let p = Point::new(x, cursor.last_point.y);
                cursor.last_point = p;
                points.push(p);
            }
            CommandKind::HorizontalLineTo
        }
        RawCommand::Cubic => {
            for group in run.args.chunks_exact(6) {
                let base = cursor.last_point;
                let c1 = resolve_point(group[0], group[1], run.relative, base);
                let c2 = resolve_point(group[2], group[3], run.relative, base);
                let end = resolve_point(group[4], group[5], run.relative, base);
                cursor.last_point = end;
                cursor.last_control = Some(c2);
                points.extend([c1, c2, end]);
            }
            CommandKind::CurveTo
        }
        RawCommand::Smooth => {
            for group in run.args.chunks_exact(4) {
                let base = cursor.last_point;
                let c1 = cursor.reflected_control();
                let c2 = resolve_point(group[0], group[1], run.relative, base);
                let end = resolve_point(group[2], group[3], run.relative, base);
                cursor.last_point = end;
                cursor.last_control = Some(c2);
                points.extend([c1, c2, end]);
            }
            CommandKind::SmoothCurveTo
        }
        RawCommand::Close => unreachable!("handled above"),
    };

    Ok((Instruction::new(command, points), cursor))
}

fn resolve_point(x: f64, y: f64, relative: bool, base: Point) -> Point {
    if relative {
        Point::new(base.x + x, base.y + y)
    } else {
        Point::new(x, y)
    }
}

/// Resolve a whole run list, threading the cursor from `(0, 0)`.
pub fn resolve_path(runs: &[CommandRun]) -> PathResult<PathData> {
    let mut cursor = Cursor::new();
    let mut path = Vec::with_capacity(runs.len());
    for run in runs {
        let (instruction, next) = resolve(run, cursor)?;
        cursor = next;
        path.push(instruction);
    }
    Ok(path)
}

/// Tokenize and resolve a `d` string in one step.
pub fn parse_path(source: &str) -> PathResult<PathData> {
    resolve_path(&tokenize(source)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn parsed(source: &str) -> PathData {
        parse_path(source).expect("path should resolve")
    }

    #[test]
    fn absolute_move_and_line() {
        let path = parsed("M10,20 L30,40");
        assert_eq!(path[0].command, CommandKind::MoveTo);
        assert_eq!(path[0].points, vec![pt(10.0, 20.0)]);
        assert_eq!(path[1].points, vec![pt(30.0, 40.0)]);
    }

    #[test]
    fn relative_groups_chain() {
        let path = parsed("m1,1 l2,0 2,0");
        assert_eq!(path[0].points, vec![pt(1.0, 1.0)]);
        assert_eq!(path[1].points, vec![pt(3.0, 1.0), pt(5.0, 1.0)]);
    }

    #[test]
    fn relative_move_groups_chain_too() {
        let path = parsed("m5,5 5,5");
        assert_eq!(path[0].points, vec![pt(5.0, 5.0), pt(10.0, 10.0)]);
    }

    // -- shorthand expansion --

    #[test]
    fn vertical_and_horizontal_borrow_coordinates() {
        let path = parsed("M10,20 V30 H40");
        assert_eq!(path[1].command, CommandKind::VerticalLineTo);
        assert_eq!(path[1].points, vec![pt(10.0, 30.0)]);
        assert_eq!(path[2].command, CommandKind::HorizontalLineTo);
        assert_eq!(path[2].points, vec![pt(40.0, 30.0)]);
    }

    #[test]
    fn relative_vertical_offsets_stack() {
        let path = parsed("M0,10 v5 5");
        assert_eq!(path[1].points, vec![pt(0.0, 15.0), pt(0.0, 20.0)]);
    }

    #[test]
    fn smooth_reflects_previous_control() {
        let path = parsed("M0,0 C0,5 5,5 5,0 S15,-5 15,0");
        assert_eq!(path[2].command, CommandKind::SmoothCurveTo);
        assert_eq!(
            path[2].points,
            vec![pt(5.0, -5.0), pt(15.0, -5.0), pt(15.0, 0.0)]
        );
    }

    #[test]
    fn smooth_without_control_uses_cursor() {
        let path = parsed("M10,10 S20,20 30,10");
        assert_eq!(path[1].points[0], pt(10.0, 10.0));
    }

    #[test]
    fn smooth_chain_reflects_within_one_run() {
        let path = parsed("M0,0 C0,5 5,5 5,0 S15,-5 15,0 25,5 25,0");
        // Second group reflects the first group's control (15,-5) across (15,0).
        assert_eq!(path[2].points[3], pt(15.0, 5.0));
    }

    #[test]
    fn control_point_survives_a_move() {
        let path = parsed("M0,0 C0,10 10,10 10,0 M20,0 S30,10 40,0");
        assert_eq!(path[3].points[0], pt(30.0, -10.0));
    }

    #[test]
    fn relative_cubic_offsets_from_group_start() {
        let path = parsed("M10,10 c0,5 5,5 5,0");
        assert_eq!(
            path[1].points,
            vec![pt(10.0, 15.0), pt(15.0, 15.0), pt(15.0, 10.0)]
        );
    }

    // -- errors and edge cases --

    #[test]
    fn leftover_arguments_fail() {
        let err = parse_path("L1,2 3").unwrap_err();
        assert_eq!(err.kind, PathErrorKind::Arity);
        assert!(err.message.contains("'L'"), "unexpected message: {err}");
    }

    #[test]
    fn close_with_arguments_fails() {
        let err = parse_path("M0,0 Z1").unwrap_err();
        assert_eq!(err.kind, PathErrorKind::Arity);
    }

    #[test]
    fn empty_argument_list_is_inert() {
        let path = parsed("M0,0 L");
        assert_eq!(path[1].command, CommandKind::LineTo);
        assert!(path[1].points.is_empty());
    }

    #[test]
    fn close_keeps_cursor() {
        let path = parsed("M5,5 L9,5 Z l1,0");
        // Relative line after Z resolves against the pre-Z endpoint.
        assert_eq!(path[3].points, vec![pt(10.0, 5.0)]);
    }
}
