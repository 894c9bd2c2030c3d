//! Shape paths in the SVG path mini-language
//!
//! A [`Path`] is a flat token sequence: single-letter commands interleaved
//! with numeric operands. Operands alternate between the x and y axis in
//! emission order, starting with x, regardless of the command that precedes
//! them. Every consumer (extent calculation, projection) relies on this
//! parity; [`Path::validate`] checks that a path actually keeps it.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::PathError;

/// One element of a shape path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathToken {
    Command(char),
    Value(f32),
}

impl PathToken {
    pub fn as_value(&self) -> Option<f32> {
        match self {
            PathToken::Value(v) => Some(*v),
            PathToken::Command(_) => None,
        }
    }
}

/// Axis an operand belongs to, decided by its position among the operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coord {
    X,
    Y,
}

/// Operand arity for commands whose operands come in x/y pairs.
fn paired_arity(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'S' | 'Q' => Some(4),
        'C' => Some(6),
        'Z' => Some(0),
        _ => None,
    }
}

/// Parsed shape path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    tokens: SmallVec<[PathToken; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize path text.
    ///
    /// Letters are split from adjacent numbers, then the text is split on
    /// runs of whitespace and commas. Operand text that is not a number
    /// becomes `NaN` instead of an error; such paths render degenerately.
    /// Exponent notation is not recognized: the `e` is split off as a command.
    /// Operands are `f32`, so coordinates beyond about seven significant
    /// digits (e.g. `16777217`) are rounded to the nearest representable value.
    pub fn parse(input: &str) -> Self {
        let mut spaced = String::with_capacity(input.len() + 16);
        for c in input.chars() {
            if c.is_ascii_alphabetic() {
                spaced.push(' ');
                spaced.push(c);
                spaced.push(' ');
            } else {
                spaced.push(c);
            }
        }

        let tokens = spaced
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(|t| {
                let mut chars = t.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => PathToken::Command(c),
                    _ => PathToken::Value(t.parse::<f32>().unwrap_or(f32::NAN)),
                }
            })
            .collect();

        Self { tokens }
    }

    /// Build a path from tokens, rejecting anything that breaks operand pairing.
    pub fn from_tokens<I>(tokens: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = PathToken>,
    {
        let path = Self {
            tokens: tokens.into_iter().collect(),
        };
        path.validate()?;
        Ok(path)
    }

    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Operands tagged with the axis their position assigns them to.
    pub fn coordinates(&self) -> impl Iterator<Item = (Coord, f32)> + '_ {
        self.tokens
            .iter()
            .filter_map(PathToken::as_value)
            .enumerate()
            .map(|(i, v)| (if i % 2 == 0 { Coord::X } else { Coord::Y }, v))
    }

    /// New path with the same commands and every operand run through the
    /// transform for its axis. `self` is left untouched.
    pub fn map_coordinates<FX, FY>(&self, mut fx: FX, mut fy: FY) -> Path
    where
        FX: FnMut(f32) -> f32,
        FY: FnMut(f32) -> f32,
    {
        let mut even = true;
        let tokens = self
            .tokens
            .iter()
            .map(|t| match *t {
                PathToken::Command(c) => PathToken::Command(c),
                PathToken::Value(v) => {
                    let out = if even { fx(v) } else { fy(v) };
                    even = !even;
                    PathToken::Value(out)
                }
            })
            .collect();
        Path { tokens }
    }

    /// Check command/operand consistency.
    ///
    /// Accepted commands are M, L, T, S, Q, C and Z in either case. H, V and A
    /// are rejected since their operands are not x/y pairs.
    pub fn validate(&self) -> Result<(), PathError> {
        let mut current: Option<(char, usize, usize)> = None;
        let mut count = 0usize;

        for (index, token) in self.tokens.iter().enumerate() {
            match *token {
                PathToken::Command(command) => {
                    if let Some((prev, at, arity)) = current {
                        check_arity(prev, at, arity, count)?;
                    }
                    let arity = match paired_arity(command) {
                        Some(arity) => arity,
                        None if matches!(command.to_ascii_uppercase(), 'H' | 'V' | 'A') => {
                            return Err(PathError::UnpairedOperands { command, index });
                        }
                        None => return Err(PathError::UnknownCommand { command, index }),
                    };
                    current = Some((command, index, arity));
                    count = 0;
                }
                PathToken::Value(v) => {
                    if current.is_none() {
                        return Err(PathError::MissingCommand { index });
                    }
                    if v.is_nan() {
                        return Err(PathError::NotANumber { index });
                    }
                    count += 1;
                }
            }
        }

        match current {
            Some((command, at, arity)) => check_arity(command, at, arity, count),
            None => Ok(()),
        }
    }
}

fn check_arity(command: char, index: usize, arity: usize, count: usize) -> Result<(), PathError> {
    let ok = if arity == 0 {
        count == 0
    } else {
        count > 0 && count % arity == 0
    };
    if ok {
        Ok(())
    } else {
        Err(PathError::DanglingOperands {
            command,
            index,
            count,
            arity,
        })
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match token {
                PathToken::Command(c) => write!(f, "{c}")?,
                PathToken::Value(v) => write!(f, "{v}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PathToken::{Command as C, Value as V};

    #[test]
    fn parses_compact_path() {
        let p = Path::parse("M0,0L10,10Z");
        assert_eq!(
            p.tokens(),
            &[C('M'), V(0.0), V(0.0), C('L'), V(10.0), V(10.0), C('Z')]
        );
    }

    #[test]
    fn parses_mixed_separators_and_negatives() {
        let p = Path::parse("  M 1.5, -2 \n L3  4,5 6 z ");
        assert_eq!(
            p.tokens(),
            &[
                C('M'),
                V(1.5),
                V(-2.0),
                C('L'),
                V(3.0),
                V(4.0),
                V(5.0),
                V(6.0),
                C('z')
            ]
        );
    }

    #[test]
    fn malformed_operand_becomes_nan() {
        let p = Path::parse("M 1 -- L 2 3");
        let v = p.tokens()[2].as_value().unwrap();
        assert!(v.is_nan());
        assert_eq!(p.validate(), Err(PathError::NotANumber { index: 2 }));
    }

    #[test]
    fn display_reparses_to_same_tokens() {
        let p = Path::parse("M0.25,100L-3.5,7C1 2 3 4 5 6Z");
        let again = Path::parse(&p.to_string());
        assert_eq!(p, again);
    }

    #[test]
    fn empty_input_is_empty_path() {
        assert!(Path::parse("   ").is_empty());
        assert_eq!(Path::parse("").validate(), Ok(()));
    }

    #[test]
    fn coordinates_alternate_by_position() {
        let p = Path::parse("M 1 2 C 3 4 5 6 7 8 Z");
        let axes: Vec<Coord> = p.coordinates().map(|(c, _)| c).collect();
        assert_eq!(axes.len(), 8);
        assert!(axes.iter().step_by(2).all(|c| *c == Coord::X));
        assert!(axes.iter().skip(1).step_by(2).all(|c| *c == Coord::Y));
    }

    #[test]
    fn map_coordinates_leaves_source_intact() {
        let p = Path::parse("M 1 2 L 3 4");
        let moved = p.map_coordinates(|x| x * 10.0, |y| -y);
        assert_eq!(
            moved.tokens(),
            &[C('M'), V(10.0), V(-2.0), C('L'), V(30.0), V(-4.0)]
        );
        assert_eq!(p, Path::parse("M 1 2 L 3 4"));
    }

    #[test]
    fn validate_rejects_dangling_operands() {
        let err = Path::parse("M 0 0 L 10").validate().unwrap_err();
        assert_eq!(
            err,
            PathError::DanglingOperands {
                command: 'L',
                index: 3,
                count: 1,
                arity: 2
            }
        );
        assert!(Path::parse("M 0 0 Z 4").validate().is_err());
        assert!(Path::parse("M 0 0 C 1 2 3 4").validate().is_err());
    }

    #[test]
    fn validate_rejects_unpaired_and_unknown_commands() {
        assert_eq!(
            Path::parse("M 0 0 H 10").validate(),
            Err(PathError::UnpairedOperands {
                command: 'H',
                index: 3
            })
        );
        assert_eq!(
            Path::parse("M 0 0 X 1 1").validate(),
            Err(PathError::UnknownCommand {
                command: 'X',
                index: 3
            })
        );
        assert_eq!(
            Path::parse("1 2 M 0 0").validate(),
            Err(PathError::MissingCommand { index: 0 })
        );
    }

    #[test]
    fn from_tokens_validates() {
        assert!(Path::from_tokens([C('M'), V(0.0), V(1.0), C('Z')]).is_ok());
        assert!(Path::from_tokens([C('M'), V(0.0)]).is_err());
    }
}
