//! Colors as they appear in map options: CSS-style text in, `rgba(...)` out

use std::fmt;
use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, hex_digit1, multispace0};
use nom::combinator::{all_consuming, map, map_opt};
use nom::number::complete::float;
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;
use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;
use crate::interpolate::lerp_f32;

/// RGBA color with 8-bit color channels and a 0..1 alpha.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const SILVER: Color = Color::rgb(192, 192, 192);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            Self::rgba(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as f32 / 255.0,
            )
        } else {
            Self::rgb(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        }
    }

    /// Color at `pos` between `from` (0) and `to` (1).
    ///
    /// Color channels are rounded to the nearest integer; alpha stays
    /// fractional.
    pub fn tween(from: Color, to: Color, pos: f32) -> Color {
        let channel = |a: u8, b: u8| lerp_f32(a as f32, b as f32, pos).round() as u8;
        Color {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: lerp_f32(from.a, to.a, pos),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if let Some(c) = named_color(input) {
            return Ok(c);
        }
        all_consuming(alt((rgba_fn, rgb_fn, hex_color)))(input)
            .map(|(_, c)| c)
            .map_err(|_| ColorParseError(s.to_string()))
    }
}

fn named_color(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "silver" => Some(Color::SILVER),
        "gray" | "grey" => Some(Color::rgb(128, 128, 128)),
        "red" => Some(Color::rgb(255, 0, 0)),
        "green" => Some(Color::rgb(0, 128, 0)),
        "blue" => Some(Color::rgb(0, 0, 255)),
        "transparent" | "none" => Some(Color::TRANSPARENT),
        _ => None,
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn channel(input: &str) -> IResult<&str, u8> {
    map(ws(float), |v: f32| v.round().clamp(0.0, 255.0) as u8)(input)
}

fn alpha(input: &str) -> IResult<&str, f32> {
    map(ws(float), |v: f32| v.clamp(0.0, 1.0))(input)
}

/// `rgba(r, g, b, a)`
fn rgba_fn(input: &str) -> IResult<&str, Color> {
    map(
        preceded(
            tag_no_case("rgba"),
            delimited(
                ws(char('(')),
                tuple((channel, char(','), channel, char(','), channel, char(','), alpha)),
                ws(char(')')),
            ),
        ),
        |(r, _, g, _, b, _, a)| Color::rgba(r, g, b, a),
    )(input)
}

/// `rgb(r, g, b)`
fn rgb_fn(input: &str) -> IResult<&str, Color> {
    map(
        preceded(
            tag_no_case("rgb"),
            delimited(
                ws(char('(')),
                tuple((channel, char(','), channel, char(','), channel)),
                ws(char(')')),
            ),
        ),
        |(r, _, g, _, b)| Color::rgb(r, g, b),
    )(input)
}

/// `#rgb`, `#rrggbb` or `#rrggbbaa`
fn hex_color(input: &str) -> IResult<&str, Color> {
    map_opt(preceded(char('#'), hex_digit1), |hex: &str| match hex.len() {
        3 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            let (r, g, b) = ((v >> 8) & 0xF, (v >> 4) & 0xF, v & 0xF);
            Some(Color::rgb((r * 17) as u8, (g * 17) as u8, (b * 17) as u8))
        }
        6 => u32::from_str_radix(hex, 16).ok().map(Color::from_hex),
        8 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            // Keep 0x000000AA-style values in RRGGBBAA form.
            Some(Color::rgba(
                ((v >> 24) & 0xFF) as u8,
                ((v >> 16) & 0xFF) as u8,
                ((v >> 8) & 0xFF) as u8,
                (v & 0xFF) as f32 / 255.0,
            ))
        }
        _ => None,
    })(input)
}
