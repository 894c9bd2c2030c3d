//! Axis layout with map-aware extension points
//!
//! [`Axis`] carries the generic behavior a host axis has: discover extremes
//! from value-based series, then derive a pixels-per-unit scale. An
//! [`AxisStrategy`] runs at both points and may call through to the generic
//! behavior and adjust the result. [`MapAxes`] is the strategy for charts
//! showing map geometry.

use tracing::debug;

use crate::series::Series;
use crate::view::Domain1D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    X,
    Y,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    kind: AxisKind,
    /// Pixel length of the plot along this axis.
    len: f32,

    data_min: Option<f32>,
    data_max: Option<f32>,
    user_min: Option<f32>,
    user_max: Option<f32>,

    min: f32,
    max: f32,

    /// Pixels per data unit.
    scale: f32,
    /// Offset added in front of the scaled value, used to center content.
    min_pixel_padding: f32,
}

impl Axis {
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            len: 0.0,
            data_min: None,
            data_max: None,
            user_min: None,
            user_max: None,
            min: 0.0,
            max: 1.0,
            scale: 1.0,
            min_pixel_padding: 0.0,
        }
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn len(&self) -> f32 {
        self.len
    }

    pub fn set_len(&mut self, len: f32) {
        self.len = len.max(0.0);
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Currently visible domain.
    pub fn extremes(&self) -> Domain1D {
        Domain1D::new(self.min, self.max)
    }

    /// Domain covered by the data, once discovered.
    pub fn data_extremes(&self) -> Option<Domain1D> {
        match (self.data_min, self.data_max) {
            (Some(min), Some(max)) => Some(Domain1D::new(min, max)),
            _ => None,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn min_pixel_padding(&self) -> f32 {
        self.min_pixel_padding
    }

    /// Pin the visible extremes. Takes effect on the next layout pass.
    pub fn set_extremes(&mut self, min: Option<f32>, max: Option<f32>) {
        self.user_min = min;
        self.user_max = max;
    }

    /// Generic extreme discovery: union of value-based series.
    pub fn discover_extremes(&mut self, series: &[Series]) {
        let found = series
            .iter()
            .filter_map(|s| s.value_extremes(self.kind))
            .reduce(Domain1D::union);
        self.data_min = found.map(|d| d.min);
        self.data_max = found.map(|d| d.max);
    }

    /// Widen the data extremes to include `domain`.
    pub fn include_data(&mut self, domain: Domain1D) {
        self.data_min = Some(self.data_min.map_or(domain.min, |m| m.min(domain.min)));
        self.data_max = Some(self.data_max.map_or(domain.max, |m| m.max(domain.max)));
    }

    /// Resolve the visible extremes from user pins, falling back to data.
    pub fn apply_extremes(&mut self) {
        self.min = self.user_min.or(self.data_min).unwrap_or(0.0);
        self.max = self.user_max.or(self.data_max).unwrap_or(1.0);
    }

    /// Generic scale computation: stretch the domain over the full length.
    pub fn compute_translation(&mut self) {
        let span = self.max - self.min;
        let span = if span.is_finite() && span > 0.0 {
            span
        } else {
            1.0
        };
        self.scale = self.len / span;
        self.min_pixel_padding = 0.0;
    }

    pub(crate) fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub(crate) fn set_min_pixel_padding(&mut self, padding: f32) {
        self.min_pixel_padding = padding;
    }

    /// Data value to pixel offset along the axis.
    pub fn translate(&self, value: f32) -> f32 {
        (value - self.min) * self.scale + self.min_pixel_padding
    }

    /// Pixel offset along the axis to data value.
    pub fn to_value(&self, px: f32) -> f32 {
        if self.scale == 0.0 {
            return self.min;
        }
        (px - self.min_pixel_padding) / self.scale + self.min
    }
}

/// Hooks the layout pass calls in place of the generic axis behavior.
pub trait AxisStrategy: std::fmt::Debug {
    /// Find `axis`'s data extremes.
    fn discover_extremes(&self, axis: &mut Axis, series: &[Series]) {
        axis.discover_extremes(series);
    }

    /// Compute both axes' scales. X is laid out before Y.
    fn compute_translation(&self, x_axis: &mut Axis, y_axis: &mut Axis) {
        x_axis.compute_translation();
        y_axis.compute_translation();
    }
}

/// Plain cartesian layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct CartesianAxes;

impl AxisStrategy for CartesianAxes {}

/// Layout for charts with map geometry.
///
/// Extremes come from shape bounds for geometry series and from values for
/// everything else. With `lock_aspect`, both axes share one scale and the
/// axis with spare pixels is padded so the map sits centered.
#[derive(Clone, Copy, Debug)]
pub struct MapAxes {
    pub lock_aspect: bool,
}

impl Default for MapAxes {
    fn default() -> Self {
        Self { lock_aspect: true }
    }
}

impl AxisStrategy for MapAxes {
    fn discover_extremes(&self, axis: &mut Axis, series: &[Series]) {
        axis.discover_extremes(series);

        for map in series.iter().filter_map(Series::map_geometry) {
            let extent = map.extent();
            let domain = match axis.kind() {
                AxisKind::X => extent.x_domain(),
                AxisKind::Y => extent.y_domain(),
            };
            if let Some(domain) = domain {
                axis.include_data(domain);
            }
        }
    }

    fn compute_translation(&self, x_axis: &mut Axis, y_axis: &mut Axis) {
        x_axis.compute_translation();
        y_axis.compute_translation();
        if !self.lock_aspect {
            return;
        }

        let shared = x_axis.scale().min(y_axis.scale());
        x_axis.set_scale(shared);
        y_axis.set_scale(shared);

        let plot_ratio = x_axis.len() / y_axis.len();
        let map_ratio = x_axis.extremes().span() / y_axis.extremes().span();
        let pad = if map_ratio > plot_ratio {
            &mut *y_axis
        } else {
            &mut *x_axis
        };
        let used = pad.extremes().span() * shared;
        let padding = (pad.len() - used) / 2.0;
        debug!(axis = ?pad.kind(), scale = shared, padding, "map aspect lock");
        pad.set_min_pixel_padding(padding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{MapPoint, MapSeries, MapSeriesOptions, PointSeries, Shape};

    fn laid_out(len_x: f32, len_y: f32, x: (f32, f32), y: (f32, f32)) -> (Axis, Axis) {
        let mut xa = Axis::new(AxisKind::X);
        let mut ya = Axis::new(AxisKind::Y);
        xa.set_len(len_x);
        ya.set_len(len_y);
        xa.set_extremes(Some(x.0), Some(x.1));
        ya.set_extremes(Some(y.0), Some(y.1));
        xa.apply_extremes();
        ya.apply_extremes();
        (xa, ya)
    }

    #[test]
    fn aspect_lock_shares_smaller_scale_and_pads_y() {
        let (mut x, mut y) = laid_out(200.0, 200.0, (0.0, 100.0), (0.0, 50.0));
        MapAxes::default().compute_translation(&mut x, &mut y);
        assert_eq!(x.scale(), 2.0);
        assert_eq!(y.scale(), 2.0);
        assert_eq!(x.min_pixel_padding(), 0.0);
        assert_eq!(y.min_pixel_padding(), 50.0);
    }

    #[test]
    fn aspect_lock_pads_x_for_tall_maps() {
        let (mut x, mut y) = laid_out(300.0, 100.0, (0.0, 10.0), (0.0, 10.0));
        MapAxes::default().compute_translation(&mut x, &mut y);
        assert_eq!(x.scale(), 10.0);
        assert_eq!(y.min_pixel_padding(), 0.0);
        assert_eq!(x.min_pixel_padding(), 100.0);
        // The padded map is centered.
        assert_eq!(x.translate(0.0), 100.0);
        assert_eq!(x.translate(10.0), 200.0);
    }

    #[test]
    fn cartesian_axes_scale_independently() {
        let (mut x, mut y) = laid_out(200.0, 200.0, (0.0, 100.0), (0.0, 50.0));
        CartesianAxes.compute_translation(&mut x, &mut y);
        assert_eq!(x.scale(), 2.0);
        assert_eq!(y.scale(), 4.0);
    }

    #[test]
    fn map_extremes_combine_with_ordinary_series() {
        let series = vec![
            Series::Map(MapSeries::with_data(
                MapSeriesOptions::default(),
                vec![Shape::from_svg("M 0 0 L 100 0 L 100 50 Z")],
            )),
            Series::Points(PointSeries::new(vec![MapPoint::at(-20.0, 10.0)])),
        ];

        let mut x = Axis::new(AxisKind::X);
        let mut y = Axis::new(AxisKind::Y);
        MapAxes::default().discover_extremes(&mut x, &series);
        MapAxes::default().discover_extremes(&mut y, &series);
        assert_eq!(x.data_extremes(), Some(Domain1D::new(-20.0, 100.0)));
        assert_eq!(y.data_extremes(), Some(Domain1D::new(0.0, 50.0)));

        // The generic pass only sees the points.
        CartesianAxes.discover_extremes(&mut x, &series);
        assert_eq!(x.data_extremes(), Some(Domain1D::new(-20.0, -20.0)));
    }

    #[test]
    fn translate_and_to_value_are_inverse() {
        let (mut x, mut y) = laid_out(200.0, 200.0, (10.0, 110.0), (0.0, 50.0));
        MapAxes::default().compute_translation(&mut x, &mut y);
        let px = y.translate(20.0);
        assert!((y.to_value(px) - 20.0).abs() < 1e-4);
    }
}
