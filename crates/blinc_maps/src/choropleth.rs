//! Value-to-color mapping for map areas
//!
//! Two modes, chosen once per series: discrete value ranges or a two-color
//! gradient spread over the series' observed value extent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Color;
use crate::interpolate::position_in;
use crate::view::Domain1D;

/// One discrete range. Bounds are closed at `from` and open at `to`;
/// a missing bound is unbounded on that side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub from: Option<f32>,
    #[serde(default)]
    pub to: Option<f32>,
    pub color: Color,
}

impl ValueRange {
    pub fn new(from: Option<f32>, to: Option<f32>, color: Color) -> Self {
        Self { from, to, color }
    }

    pub fn contains(&self, value: f32) -> bool {
        self.from.map_or(true, |from| value >= from) && self.to.map_or(true, |to| value < to)
    }
}

/// Two-color gradient over the data extent.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub from: Color,
    pub to: Color,
    pub from_label: Option<String>,
    pub to_label: Option<String>,
}

impl Gradient {
    pub fn new(from: Color, to: Color) -> Self {
        Self {
            from,
            to,
            from_label: None,
            to_label: None,
        }
    }

    pub fn with_labels(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_label = Some(from.into());
        self.to_label = Some(to.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ColorScale {
    Ranges(Vec<ValueRange>),
    Gradient(Gradient),
}

/// Gradient position used when every value in the series is equal.
pub const DEGENERATE_GRADIENT_POS: f32 = 0.5;

impl ColorScale {
    /// Fill color for `value`.
    ///
    /// Missing and non-finite values map to `null_color`. With discrete
    /// ranges, later ranges take precedence over earlier ones; a value no
    /// range contains yields `None` and the shape keeps its default color.
    pub fn color_for(
        &self,
        value: Option<f32>,
        extent: Option<Domain1D>,
        null_color: Color,
    ) -> Option<Color> {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return Some(null_color);
        };

        match self {
            ColorScale::Ranges(ranges) => ranges
                .iter()
                .rev()
                .find(|r| r.contains(value))
                .map(|r| r.color),
            ColorScale::Gradient(g) => {
                let Some(extent) = extent else {
                    return Some(null_color);
                };
                let pos = match position_in(extent, value) {
                    Some(pos) => pos,
                    None => {
                        debug!(
                            min = extent.min,
                            max = extent.max,
                            "degenerate value extent, using gradient midpoint"
                        );
                        DEGENERATE_GRADIENT_POS
                    }
                };
                Some(Color::tween(g.from, g.to, pos))
            }
        }
    }
}

/// Min/max over the finite values; `None` when there are none.
pub fn value_extent<I>(values: I) -> Option<Domain1D>
where
    I: IntoIterator<Item = Option<f32>>,
{
    values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<Domain1D>, v| {
            Some(match acc {
                Some(d) => d.union(Domain1D::new(v, v)),
                None => Domain1D::new(v, v),
            })
        })
}
