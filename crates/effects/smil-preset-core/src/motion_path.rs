//! Motion path parsing and scaling.
//!
//! Supports the path subset `M m L l C c H h V v Z z` with coordinates given
//! as fractions of the document. Scaling multiplies x by the document width
//! and y by the document height, independently.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EffectError, Result};
use crate::geometry::DocumentBounds;
use crate::value::fmt_number;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { relative: bool, to: [f64; 2] },
    LineTo { relative: bool, to: [f64; 2] },
    CurveTo {
        relative: bool,
        c1: [f64; 2],
        c2: [f64; 2],
        to: [f64; 2],
    },
    Horizontal { relative: bool, x: f64 },
    Vertical { relative: bool, y: f64 },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionPath {
    pub commands: Vec<PathCommand>,
}

impl MotionPath {
    pub fn parse(src: &str) -> Result<Self> {
        Parser::new(src).run()
    }

    /// Scale every coordinate by the document extent.
    pub fn scaled(&self, doc: &DocumentBounds) -> Self {
        let sx = doc.width;
        let sy = doc.height;
        let pt = |p: [f64; 2]| [p[0] * sx, p[1] * sy];
        let commands = self
            .commands
            .iter()
            .map(|c| match *c {
                PathCommand::MoveTo { relative, to } => PathCommand::MoveTo {
                    relative,
                    to: pt(to),
                },
                PathCommand::LineTo { relative, to } => PathCommand::LineTo {
                    relative,
                    to: pt(to),
                },
                PathCommand::CurveTo {
                    relative,
                    c1,
                    c2,
                    to,
                } => PathCommand::CurveTo {
                    relative,
                    c1: pt(c1),
                    c2: pt(c2),
                    to: pt(to),
                },
                PathCommand::Horizontal { relative, x } => PathCommand::Horizontal {
                    relative,
                    x: x * sx,
                },
                PathCommand::Vertical { relative, y } => PathCommand::Vertical {
                    relative,
                    y: y * sy,
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }
}

fn letter(relative: bool, upper: char) -> char {
    if relative {
        upper.to_ascii_lowercase()
    } else {
        upper
    }
}

impl fmt::Display for MotionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pair = |p: [f64; 2]| format!("{} {}", fmt_number(p[0]), fmt_number(p[1]));
        let parts: Vec<String> = self
            .commands
            .iter()
            .map(|c| match *c {
                PathCommand::MoveTo { relative, to } => format!("{} {}", letter(relative, 'M'), pair(to)),
                PathCommand::LineTo { relative, to } => format!("{} {}", letter(relative, 'L'), pair(to)),
                PathCommand::CurveTo {
                    relative,
                    c1,
                    c2,
                    to,
                } => format!(
                    "{} {} {} {}",
                    letter(relative, 'C'),
                    pair(c1),
                    pair(c2),
                    pair(to)
                ),
                PathCommand::Horizontal { relative, x } => {
                    format!("{} {}", letter(relative, 'H'), fmt_number(x))
                }
                PathCommand::Vertical { relative, y } => {
                    format!("{} {}", letter(relative, 'V'), fmt_number(y))
                }
                PathCommand::Close => "Z".to_string(),
            })
            .collect();
        f.write_str(&parts.join(" "))
    }
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn fail(&self, reason: impl Into<String>) -> EffectError {
        EffectError::MalformedMotionPath {
            reason: reason.into(),
            offset: self.pos,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || *b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn at_number(&mut self) -> bool {
        self.skip_separators();
        matches!(self.bytes.get(self.pos), Some(b) if b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.'))
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_separators();
        let start = self.pos;
        if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        let mut seen_digit = false;
        let mut seen_dot = false;
        while let Some(b) = self.bytes.get(self.pos) {
            match b {
                b'0'..=b'9' => seen_digit = true,
                b'.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.pos += 1;
        }
        if seen_digit && matches!(self.bytes.get(self.pos), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            while matches!(self.bytes.get(self.pos), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.pos == exp_start {
                self.pos = mark;
            }
        }
        if !seen_digit {
            self.pos = start;
            return Err(self.fail("expected number"));
        }
        self.src[start..self.pos].parse::<f64>().map_err(|_| {
            EffectError::MalformedMotionPath {
                reason: format!("invalid number '{}'", &self.src[start..self.pos]),
                offset: start,
            }
        })
    }

    fn pair(&mut self) -> Result<[f64; 2]> {
        Ok([self.number()?, self.number()?])
    }

    fn run(mut self) -> Result<MotionPath> {
        let mut commands = Vec::new();
        self.skip_separators();
        if self.pos >= self.bytes.len() {
            return Err(self.fail("empty path"));
        }
        while self.pos < self.bytes.len() {
            let cmd = self.bytes[self.pos] as char;
            if commands.is_empty() && !matches!(cmd, 'M' | 'm') {
                return Err(self.fail("path must start with a move command"));
            }
            self.pos += 1;
            let relative = cmd.is_ascii_lowercase();
            match cmd.to_ascii_uppercase() {
                'M' => {
                    commands.push(PathCommand::MoveTo {
                        relative,
                        to: self.pair()?,
                    });
                    // extra pairs after a move are implicit line-tos
                    while self.at_number() {
                        commands.push(PathCommand::LineTo {
                            relative,
                            to: self.pair()?,
                        });
                    }
                }
                'L' => loop {
                    commands.push(PathCommand::LineTo {
                        relative,
                        to: self.pair()?,
                    });
                    if !self.at_number() {
                        break;
                    }
                },
                'C' => loop {
                    commands.push(PathCommand::CurveTo {
                        relative,
                        c1: self.pair()?,
                        c2: self.pair()?,
                        to: self.pair()?,
                    });
                    if !self.at_number() {
                        break;
                    }
                },
                'H' => loop {
                    commands.push(PathCommand::Horizontal {
                        relative,
                        x: self.number()?,
                    });
                    if !self.at_number() {
                        break;
                    }
                },
                'V' => loop {
                    commands.push(PathCommand::Vertical {
                        relative,
                        y: self.number()?,
                    });
                    if !self.at_number() {
                        break;
                    }
                },
                'Z' => commands.push(PathCommand::Close),
                _ => {
                    self.pos -= 1;
                    return Err(self.fail(format!("unsupported path command '{cmd}'")));
                }
            }
            self.skip_separators();
        }
        Ok(MotionPath { commands })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_subset() {
        let path = MotionPath::parse("m0 0 c0.1,0 0.2 0.1 0.3,0.1 h0.2 v-0.1 L 1 1 z").unwrap();
        assert_eq!(path.commands.len(), 6);
        assert!(path.is_closed());
        assert_eq!(
            path.commands[1],
            PathCommand::CurveTo {
                relative: true,
                c1: [0.1, 0.0],
                c2: [0.2, 0.1],
                to: [0.3, 0.1]
            }
        );
    }

    #[test]
    fn implicit_line_after_move() {
        let path = MotionPath::parse("M0 0 0.5 0.5").unwrap();
        assert_eq!(
            path.commands[1],
            PathCommand::LineTo {
                relative: false,
                to: [0.5, 0.5]
            }
        );
    }

    #[test]
    fn scales_axes_independently() {
        let doc = DocumentBounds::new(200.0, 100.0);
        let path = MotionPath::parse("M0 0 L0.5 0.5 H1 V0.25").unwrap().scaled(&doc);
        assert_eq!(path.to_string(), "M 0 0 L 100 50 H 200 V 25");
    }

    #[test]
    fn rejects_grammar_violations() {
        assert!(matches!(
            MotionPath::parse(""),
            Err(EffectError::MalformedMotionPath { .. })
        ));
        assert!(matches!(
            MotionPath::parse("L0 0"),
            Err(EffectError::MalformedMotionPath { offset: 0, .. })
        ));
        assert!(matches!(
            MotionPath::parse("M0 0 Q1 1 2 2"),
            Err(EffectError::MalformedMotionPath { offset: 5, .. })
        ));
        assert!(matches!(
            MotionPath::parse("M0"),
            Err(EffectError::MalformedMotionPath { .. })
        ));
    }

    #[test]
    fn exponent_numbers() {
        let path = MotionPath::parse("M1e-1 0").unwrap();
        assert_eq!(
            path.commands[0],
            PathCommand::MoveTo {
                relative: false,
                to: [0.1, 0.0]
            }
        );
    }
}
