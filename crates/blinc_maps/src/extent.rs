//! Bounding boxes and label centroids for shape paths

use serde::{Deserialize, Serialize};

use crate::path::{Coord, Path};
use crate::view::{Domain1D, Point};

/// Per-axis fractions placing a shape's label anchor inside its bounding box.
///
/// `0.5` on both axes is the geometric midpoint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CentroidBias {
    #[serde(default = "half")]
    pub x: f32,
    #[serde(default = "half")]
    pub y: f32,
}

fn half() -> f32 {
    0.5
}

impl Default for CentroidBias {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl CentroidBias {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds in data space.
///
/// [`Bounds::EMPTY`] uses infinities that never win a min/max comparison, so
/// shapes without coordinates can be folded into a union unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min_x: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        min_y: f32::INFINITY,
        max_y: f32::NEG_INFINITY,
    };

    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Bounds over every operand of `path`, assigned to axes by position.
    ///
    /// `NaN` operands are skipped but still consume their x/y slot.
    pub fn of_path(path: &Path) -> Self {
        let mut b = Self::EMPTY;
        for (coord, v) in path.coordinates() {
            if v.is_nan() {
                continue;
            }
            match coord {
                Coord::X => b.include_x(v),
                Coord::Y => b.include_y(v),
            }
        }
        b
    }

    pub fn include_x(&mut self, x: f32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
    }

    pub fn include_y(&mut self, y: f32) {
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// True when either axis received no coordinate.
    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn x_domain(&self) -> Option<Domain1D> {
        (self.min_x <= self.max_x).then(|| Domain1D::new(self.min_x, self.max_x))
    }

    pub fn y_domain(&self) -> Option<Domain1D> {
        (self.min_y <= self.max_y).then(|| Domain1D::new(self.min_y, self.max_y))
    }

    /// Label anchor interpolated between min and max on each axis.
    pub fn centroid(&self, bias: CentroidBias) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        Some(Point::new(
            self.min_x + self.width() * bias.x,
            self.min_y + self.height() * bias.y,
        ))
    }
}

/// Union of all bounds; [`Bounds::EMPTY`] for an empty input.
pub fn combined_bounds<I>(bounds: I) -> Bounds
where
    I: IntoIterator<Item = Bounds>,
{
    bounds.into_iter().fold(Bounds::EMPTY, Bounds::union)
}
