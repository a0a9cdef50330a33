//! Path-data tokenizer.
//!
//! A byte-walking scanner over one `d` attribute string. Output is a list
//! of command runs: one recognized letter plus every numeric argument up
//! to the next letter. Numbers are parsed here, so the resolver only ever
//! sees clean scalars.
//!
//! Number lexing tolerates SVG's packed forms:
//!
//! | Input    | Lexemes       |
//! |----------|---------------|
//! | `1-2`    | `1`, `-2`     |
//! | `1.2.3`  | `1.2`, `.3`   |
//! | `1e-2`   | `1e-2`        |
//! | `1,2 3`  | `1`, `2`, `3` |
//!
//! Any alphabetic letter outside the command set (arcs included) fails
//! the whole element with an unknown-command error; playback can never
//! observe a command the grammar does not know.

use svgplay_graphics::types::Scalar;

use crate::error::{PathError, PathErrorKind, PathResult, Span};
use crate::number::parse_number;

// ---------------------------------------------------------------------------
// Command letters
// ---------------------------------------------------------------------------

/// Command letters of the path grammar, case collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawCommand {
    Move,
    Line,
    Cubic,
    Vertical,
    Horizontal,
    Smooth,
    Close,
}

impl RawCommand {
    /// Number of scalars per argument group.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Move | Self::Line => 2,
            Self::Cubic => 6,
            Self::Vertical | Self::Horizontal => 1,
            Self::Smooth => 4,
            Self::Close => 0,
        }
    }

    /// The source letter for this command in the requested case.
    #[must_use]
    pub const fn letter(self, relative: bool) -> char {
        let c = match self {
            Self::Move => 'M',
            Self::Line => 'L',
            Self::Cubic => 'C',
            Self::Vertical => 'V',
            Self::Horizontal => 'H',
            Self::Smooth => 'S',
            Self::Close => 'Z',
        };
        if relative {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }

    /// Decode a command byte. Lowercase selects the relative form.
    #[must_use]
    pub const fn from_letter(c: u8) -> Option<(Self, bool)> {
        let op = match c.to_ascii_uppercase() {
            b'M' => Self::Move,
            b'L' => Self::Line,
            b'C' => Self::Cubic,
            b'V' => Self::Vertical,
            b'H' => Self::Horizontal,
            b'S' => Self::Smooth,
            b'Z' => Self::Close,
            _ => return None,
        };
        Some((op, c.is_ascii_lowercase()))
    }
}

/// One command letter with its trailing arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRun {
    pub op: RawCommand,
    pub relative: bool,
    pub args: Vec<Scalar>,
    /// From the letter through the last argument.
    pub span: Span,
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Tokenize a `d` string into command runs.
pub fn tokenize(source: &str) -> PathResult<Vec<CommandRun>> {
    Tokenizer::new(source).tokenize()
}

/// Tokenize a bare coordinate list (the `points` attribute grammar):
/// numbers separated by commas and whitespace, no letters allowed.
pub fn tokenize_numbers(source: &str) -> PathResult<Vec<Scalar>> {
    let mut scanner = Tokenizer::new(source);
    let mut values = Vec::new();
    loop {
        scanner.skip_separators();
        let Some(&c) = scanner.src.get(scanner.pos) else {
            return Ok(values);
        };
        if c.is_ascii_alphabetic() {
            return Err(PathError::new(
                PathErrorKind::NumberParse,
                format!("unexpected letter {:?} in coordinate list", c as char),
            )
            .with_span(Span::new(scanner.pos, scanner.pos + 1)));
        }
        values.push(scanner.scan_number()?);
    }
}

struct Tokenizer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
        }
    }

    fn tokenize(mut self) -> PathResult<Vec<CommandRun>> {
        let mut runs: Vec<CommandRun> = Vec::new();

        loop {
            self.skip_separators();
            let Some(&c) = self.src.get(self.pos) else {
                return Ok(runs);
            };
            let start = self.pos;

            if c.is_ascii_alphabetic() {
                let Some((op, relative)) = RawCommand::from_letter(c) else {
                    return Err(PathError::new(
                        PathErrorKind::UnknownCommand,
                        format!("unknown path command {:?}", c as char),
                    )
                    .with_span(Span::new(start, start + 1)));
                };
                self.pos += 1;
                runs.push(CommandRun {
                    op,
                    relative,
                    args: Vec::new(),
                    span: Span::new(start, self.pos),
                });
            } else if is_number_start(c) {
                let value = self.scan_number()?;
                let Some(run) = runs.last_mut() else {
                    return Err(PathError::new(
                        PathErrorKind::Arity,
                        "number before any command",
                    )
                    .with_span(Span::new(start, self.pos)));
                };
                run.args.push(value);
                run.span.end = self.pos;
            } else {
                return Err(PathError::new(
                    PathErrorKind::NumberParse,
                    format!("unexpected character {:?}", c as char),
                )
                .with_span(Span::new(start, start + 1)));
            }
        }
    }

    /// Skip commas and ASCII whitespace.
    fn skip_separators(&mut self) {
        while let Some(&c) = self.src.get(self.pos) {
            if matches!(c, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | b',') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Scan one numeric lexeme starting at the current position.
    ///
    /// A sign or a second decimal point terminates the lexeme (packed
    /// coordinates), but an exponent's sign does not. An exponent letter
    /// not followed by digits is left unconsumed, so `1e` scans as `1`
    /// and the dangling `e` is reported as an unknown command.
    fn scan_number(&mut self) -> PathResult<Scalar> {
        let start = self.pos;

        if matches!(self.src.get(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        self.skip_digits();
        if self.src.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            self.skip_digits();
        }
        if matches!(self.src.get(self.pos), Some(b'e' | b'E')) {
            let mut peek = self.pos + 1;
            if matches!(self.src.get(peek), Some(b'+' | b'-')) {
                peek += 1;
            }
            if self.src.get(peek).is_some_and(u8::is_ascii_digit) {
                self.pos = peek;
                self.skip_digits();
            }
        }

        let span = Span::new(start, self.pos);
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("");
        parse_number(text).map_err(|e| e.with_span(span))
    }

    fn skip_digits(&mut self) {
        while self.src.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
    }
}

const fn is_number_start(c: u8) -> bool {
    c.is_ascii_digit() || matches!(c, b'.' | b'+' | b'-')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
