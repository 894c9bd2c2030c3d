//! Map chart model: axes, series and navigation in one place
//!
//! [`MapChart::layout`] runs the pass in a fixed order: axis extremes from
//! shape extents, scales with the aspect lock, then projection and colors.
//! Pointer handlers turn gestures into zooms that end in a single relayout.

use std::time::Duration;

use anyhow::Context;
use rustc_hash::FxHashMap;

use crate::axis::{Axis, AxisKind, AxisStrategy, MapAxes};
use crate::catalog::{join_values, place_bubbles, DataRow, MapCatalog};
use crate::color::Color;
use crate::config::{ChartKind, MapChartConfig};
use crate::input::{
    button_at, button_zoom, double_click_zoom, pinch_zoom, wheel_zoom, PinchTransform,
    ZoomButton, ZoomRequest,
};
use crate::legend::{legend_items, LegendItem};
use crate::project::{project_point, unproject_point};
use crate::series::{MapPoint, MapSeries, MapSeriesOptions, PointSeries, Series, Shape};
use crate::transition::ColorFade;
use crate::view::{Domain2D, Point, Rect};
use crate::zoom::{Clock, MapNavigator, SystemClock, ZoomPhase};

/// Render output for one shape of an area or line series.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedShape {
    pub series: usize,
    pub shape: usize,
    pub key: Option<String>,
    /// Projected outline as path text
    pub d: String,
    /// `None` for line series
    pub fill: Option<Color>,
    pub stroke: Color,
    pub stroke_width: f32,
    /// Plot-relative label position
    pub label_anchor: Option<Point>,
}

/// Render output for one visible point of a point series.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPoint {
    pub series: usize,
    pub point: usize,
    pub key: Option<String>,
    /// Plot-relative position
    pub position: Point,
    pub z: Option<f32>,
}

pub struct MapChart<C: Clock = SystemClock> {
    pub config: MapChartConfig,
    series: Vec<Series>,
    x_axis: Axis,
    y_axis: Axis,
    strategy: Box<dyn AxisStrategy>,
    navigator: MapNavigator<C>,
    /// Plot area within the chart, in chart pixels.
    plot: Rect,

    options: MapSeriesOptions,
    hover_color: Option<Color>,
    fades: FxHashMap<(usize, usize), ColorFade>,
}

impl MapChart<SystemClock> {
    pub fn new(config: MapChartConfig) -> anyhow::Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> MapChart<C> {
    pub fn with_clock(config: MapChartConfig, clock: C) -> anyhow::Result<Self> {
        config.validate().context("MapChart requires a valid config")?;
        let options = config.series_options()?;
        let hover_color = config.hover_color()?;
        let navigator = MapNavigator::with_clock(
            Duration::from_millis(config.navigation.animation_ms),
            clock,
        );
        let strategy = Box::new(MapAxes {
            lock_aspect: config.kind == ChartKind::Map,
        });

        Ok(Self {
            config,
            series: Vec::new(),
            x_axis: Axis::new(AxisKind::X),
            y_axis: Axis::new(AxisKind::Y),
            strategy,
            navigator,
            plot: Rect::default(),
            options,
            hover_color,
            fades: FxHashMap::default(),
        })
    }

    /// Replace the axis layout strategy.
    pub fn set_axis_strategy(&mut self, strategy: Box<dyn AxisStrategy>) {
        self.strategy = strategy;
    }

    pub fn add_series(&mut self, series: Series) -> usize {
        self.series.push(series);
        self.series.len() - 1
    }

    /// Add filled areas styled by the chart config.
    pub fn add_map(&mut self, shapes: Vec<Shape>) -> usize {
        let series = MapSeries::with_data(self.options.clone(), shapes);
        self.add_series(Series::Map(series))
    }

    /// Add stroked outlines styled by the chart config.
    pub fn add_map_line(&mut self, shapes: Vec<Shape>) -> usize {
        let series = MapSeries::with_data(self.options.clone(), shapes);
        self.add_series(Series::MapLine(series))
    }

    pub fn add_points(&mut self, points: Vec<MapPoint>) -> usize {
        self.add_series(Series::Points(PointSeries::new(points)))
    }

    /// Add the catalog map `name` as areas valued by `rows`. Returns the
    /// series index and the keys of rows that matched no area.
    pub fn add_joined_map(
        &mut self,
        catalog: &MapCatalog,
        name: &str,
        rows: &[DataRow],
    ) -> anyhow::Result<(usize, Vec<String>)> {
        let areas = catalog
            .get(name)
            .with_context(|| format!("map `{name}` is not in the catalog"))?;
        let joined = join_values(areas, rows, &self.config.join_by, self.config.centroid_bias);
        let index = self.add_map(joined.shapes);
        Ok((index, joined.unmatched))
    }

    /// Add bubbles placed on the areas of catalog map `name`.
    pub fn add_bubbles(
        &mut self,
        catalog: &MapCatalog,
        name: &str,
        rows: &[DataRow],
    ) -> anyhow::Result<usize> {
        let areas = catalog
            .get(name)
            .with_context(|| format!("map `{name}` is not in the catalog"))?;
        let points = place_bubbles(areas, rows, &self.config.join_by, self.config.centroid_bias);
        Ok(self.add_points(points))
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Mutable access to series `index`. Running hover fades of that series
    /// are dropped, since its shapes may change.
    pub fn series_mut(&mut self, index: usize) -> Option<&mut Series> {
        self.fades.retain(|&(series, _), _| series != index);
        self.series.get_mut(index)
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    pub fn plot(&self) -> Rect {
        self.plot
    }

    /// Place the plot inside the chart. Takes effect on the next layout.
    pub fn set_plot_origin(&mut self, origin: Point) {
        self.plot.x = origin.x;
        self.plot.y = origin.y;
    }

    /// Currently visible data rectangle.
    pub fn visible_rect(&self) -> Rect {
        Domain2D::new(self.x_axis.extremes(), self.y_axis.extremes()).to_rect()
    }

    pub fn zoom_phase(&mut self) -> ZoomPhase {
        self.navigator.phase()
    }

    /// Lay the chart out in a `plot_w` x `plot_h` plot.
    pub fn layout(&mut self, plot_w: f32, plot_h: f32) {
        self.plot.width = plot_w.max(0.0);
        self.plot.height = plot_h.max(0.0);
        self.x_axis.set_len(self.plot.width);
        self.y_axis.set_len(self.plot.height);

        self.strategy.discover_extremes(&mut self.x_axis, &self.series);
        self.strategy.discover_extremes(&mut self.y_axis, &self.series);
        self.x_axis.apply_extremes();
        self.y_axis.apply_extremes();
        self.strategy
            .compute_translation(&mut self.x_axis, &mut self.y_axis);

        for map in self.series.iter_mut().filter_map(Series::map_geometry_mut) {
            map.translate(&self.x_axis, &self.y_axis);
        }
    }

    /// Relayout at the current plot size.
    pub fn redraw(&mut self) {
        self.layout(self.plot.width, self.plot.height);
    }

    /// Zoom by `factor` about `focus` in data coordinates. Returns `false`
    /// when the request was dropped.
    pub fn map_zoom(&mut self, factor: f32, focus: Option<Point>) -> bool {
        let zoomed = self
            .navigator
            .zoom(&mut self.x_axis, &mut self.y_axis, factor, focus)
            .is_some();
        if zoomed {
            self.redraw();
        }
        zoomed
    }

    fn apply(&mut self, request: Option<ZoomRequest>) -> bool {
        let Some(request) = request else {
            return false;
        };
        let focus = request
            .focus
            .map(|px| unproject_point(px, &self.x_axis, &self.y_axis));
        self.map_zoom(request.factor, focus)
    }

    /// Chart-relative pointer double click.
    pub fn on_double_click(&mut self, pointer: Point) -> bool {
        let request = double_click_zoom(&self.config.navigation, self.plot, pointer);
        self.apply(request)
    }

    pub fn on_wheel(&mut self, pointer: Point, delta: f32) -> bool {
        let request = wheel_zoom(&self.config.navigation, self.plot, pointer, delta);
        self.apply(request)
    }

    /// Click that may land on a zoom button.
    pub fn on_click(&mut self, pointer: Point) -> bool {
        match button_at(&self.config.navigation, self.plot, pointer) {
            Some(button) => self.press_button(button),
            None => false,
        }
    }

    pub fn press_button(&mut self, button: ZoomButton) -> bool {
        let request = button_zoom(&self.config.navigation, button);
        self.apply(request)
    }

    pub fn on_pinch_end(&mut self, transform: PinchTransform) -> bool {
        let request = pinch_zoom(&self.config.navigation, self.plot, transform);
        self.apply(request)
    }

    /// Pointer entered a shape: stop its fade.
    pub fn on_hover_start(&mut self, series: usize, shape: usize) {
        self.fades.remove(&(series, shape));
    }

    /// Pointer left a shape: fade its fill back from the hover color.
    pub fn on_hover_end(&mut self, series: usize, shape: usize) {
        let (Some(hover), true) = (self.hover_color, self.config.fade_ms > 0) else {
            return;
        };
        let Some(Series::Map(map)) = self.series.get(series) else {
            return;
        };
        if map.shape(shape).is_none() {
            return;
        }
        let seconds = self.config.fade_ms as f32 / 1000.0;
        self.fades
            .insert((series, shape), ColorFade::new(hover, seconds));
    }

    /// Advance running fades. Returns `true` while any is still running.
    pub fn tick(&mut self, dt_seconds: f32) -> bool {
        for fade in self.fades.values_mut() {
            fade.step(dt_seconds);
        }
        self.fades.retain(|_, fade| !fade.is_finished());
        !self.fades.is_empty()
    }

    /// Shapes of area and line series from the last layout.
    pub fn render(&self) -> Vec<RenderedShape> {
        let mut out = Vec::new();
        for (si, series) in self.series.iter().enumerate() {
            let (map, filled) = match series {
                Series::Map(map) => (map, true),
                Series::MapLine(map) => (map, false),
                Series::Points(_) => continue,
            };
            let options = map.options();
            for (i, shape) in map.shapes().iter().enumerate() {
                let Some(projected) = shape.projected() else {
                    continue;
                };
                let normal = fill_of(map, shape);
                let color = match self.fades.get(&(si, i)) {
                    Some(fade) => fade.color(normal),
                    None => normal,
                };
                let (fill, stroke) = if filled {
                    (Some(color), options.border_color)
                } else {
                    (None, color)
                };
                out.push(RenderedShape {
                    series: si,
                    shape: i,
                    key: shape.key.clone(),
                    d: projected.to_string(),
                    fill,
                    stroke,
                    stroke_width: options.border_width,
                    label_anchor: shape.anchor(),
                });
            }
        }
        out
    }

    /// Visible points of point series.
    pub fn render_points(&self) -> Vec<RenderedPoint> {
        let mut out = Vec::new();
        for (si, series) in self.series.iter().enumerate() {
            let Series::Points(points) = series else {
                continue;
            };
            for (i, position) in points.pixel_positions(&self.x_axis, &self.y_axis) {
                let p = &points.points[i];
                out.push(RenderedPoint {
                    series: si,
                    point: i,
                    key: p.key.clone(),
                    position,
                    z: p.z,
                });
            }
        }
        out
    }

    /// Legend entries for series `index`.
    pub fn legend_items(&self, index: usize) -> Vec<LegendItem> {
        let scale = self
            .series
            .get(index)
            .and_then(Series::map_geometry)
            .and_then(|map| map.options().colors.as_ref());
        legend_items(
            scale,
            self.config.legend.layout,
            self.config.legend.value_decimals,
        )
    }

    /// Data point to plot-relative pixels.
    pub fn to_pixels(&self, p: Point) -> Point {
        project_point(p, &self.x_axis, &self.y_axis)
    }

    /// Plot-relative pixels to data point.
    pub fn to_data(&self, px: Point) -> Point {
        unproject_point(px, &self.x_axis, &self.y_axis)
    }
}

fn fill_of(map: &MapSeries, shape: &Shape) -> Color {
    shape.color().unwrap_or(map.options().color)
}
