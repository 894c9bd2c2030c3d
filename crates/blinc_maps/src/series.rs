//! Map shapes and the series variants a map chart can hold

use tracing::{debug, warn};

use crate::axis::{Axis, AxisKind};
use crate::choropleth::{value_extent, ColorScale};
use crate::color::Color;
use crate::extent::{combined_bounds, Bounds, CentroidBias};
use crate::path::Path;
use crate::project::{project_path, project_point};
use crate::view::{Domain1D, Point};

/// One map entity: an outline in data space plus the value that colors it.
#[derive(Clone, Debug)]
pub struct Shape {
    /// Join key / identifier.
    pub key: Option<String>,
    pub name: Option<String>,
    path: Path,
    value: Option<f32>,
    bias: CentroidBias,

    bounds: Bounds,
    centroid: Option<Point>,

    // Working render state; the source path and value are never touched.
    color: Option<Color>,
    projected: Option<Path>,
    anchor: Option<Point>,
}

impl Shape {
    pub fn new(path: Path) -> Self {
        Self {
            key: None,
            name: None,
            path,
            value: None,
            bias: CentroidBias::default(),
            bounds: Bounds::EMPTY,
            centroid: None,
            color: None,
            projected: None,
            anchor: None,
        }
    }

    /// Parse `path` text into a new shape.
    pub fn from_svg(path: &str) -> Self {
        Self::new(Path::parse(path))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Option<f32>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_bias(mut self, bias: CentroidBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> Option<f32> {
        self.value
    }

    pub fn bias(&self) -> CentroidBias {
        self.bias
    }

    /// Bounding box, valid after the shape was assigned to a series.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Label anchor in data space.
    pub fn centroid(&self) -> Option<Point> {
        self.centroid
    }

    /// Color chosen by the series' color scale.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Pixel-space path from the last layout pass.
    pub fn projected(&self) -> Option<&Path> {
        self.projected.as_ref()
    }

    /// Pixel-space label anchor from the last layout pass.
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    fn measure(&mut self) {
        self.bounds = Bounds::of_path(&self.path);
        self.centroid = self.bounds.centroid(self.bias);
    }
}

/// Presentation options of an area or line series.
#[derive(Clone, Debug, PartialEq)]
pub struct MapSeriesOptions {
    pub colors: Option<ColorScale>,
    pub null_color: Color,
    pub color: Color,
    pub border_color: Color,
    pub border_width: f32,
}

impl Default for MapSeriesOptions {
    fn default() -> Self {
        Self {
            colors: None,
            null_color: Color::rgb(0xF8, 0xF8, 0xF8),
            color: Color::rgb(0x2f, 0x7e, 0xd8),
            border_color: Color::SILVER,
            border_width: 1.0,
        }
    }
}

/// Series whose extent comes from shape geometry rather than values.
#[derive(Clone, Debug, Default)]
pub struct MapSeries {
    pub name: Option<String>,
    options: MapSeriesOptions,
    shapes: Vec<Shape>,
    extent: Bounds,
    values: Option<Domain1D>,
    colors_dirty: bool,
}

impl MapSeries {
    pub fn new(options: MapSeriesOptions) -> Self {
        Self {
            name: None,
            options,
            shapes: Vec::new(),
            extent: Bounds::EMPTY,
            values: None,
            colors_dirty: true,
        }
    }

    pub fn with_data(options: MapSeriesOptions, shapes: Vec<Shape>) -> Self {
        let mut series = Self::new(options);
        series.set_data(shapes);
        series
    }

    /// Replace all shapes.
    ///
    /// Measures every shape, the combined extent and the value extent. Shapes
    /// with malformed paths are kept and logged.
    pub fn set_data(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        for (i, shape) in self.shapes.iter_mut().enumerate() {
            if let Err(e) = shape.path.validate() {
                warn!(index = i, key = ?shape.key, error = %e, "malformed shape path");
            }
            shape.measure();
            shape.color = None;
            shape.projected = None;
            shape.anchor = None;
        }
        self.extent = combined_bounds(self.shapes.iter().map(|s| s.bounds));
        self.values = value_extent(self.shapes.iter().map(|s| s.value));
        self.colors_dirty = true;
        debug!(
            shapes = self.shapes.len(),
            min_x = self.extent.min_x,
            max_x = self.extent.max_x,
            min_y = self.extent.min_y,
            max_y = self.extent.max_y,
            "map series data assigned"
        );
    }

    /// Update one shape's value. Returns `false` for an unknown index.
    pub fn set_value(&mut self, index: usize, value: Option<f32>) -> bool {
        let Some(shape) = self.shapes.get_mut(index) else {
            return false;
        };
        if shape.value == value {
            return true;
        }
        shape.value = value;
        self.values = value_extent(self.shapes.iter().map(|s| s.value));
        self.colors_dirty = true;
        true
    }

    pub fn set_color_scale(&mut self, colors: Option<ColorScale>) {
        self.options.colors = colors;
        self.colors_dirty = true;
    }

    pub fn options(&self) -> &MapSeriesOptions {
        &self.options
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Index of the shape with join key `key`.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.shapes.iter().position(|s| s.key.as_deref() == Some(key))
    }

    /// Union of all shape bounds.
    pub fn extent(&self) -> Bounds {
        self.extent
    }

    /// Observed min/max of the shape values.
    pub fn value_extent(&self) -> Option<Domain1D> {
        self.values
    }

    /// Write each shape's mapped color. No-op until data, values or the
    /// color scale change again.
    pub fn translate_colors(&mut self) {
        if !self.colors_dirty {
            return;
        }
        if let Some(scale) = &self.options.colors {
            for shape in &mut self.shapes {
                shape.color = scale.color_for(shape.value, self.values, self.options.null_color);
            }
        }
        self.colors_dirty = false;
    }

    /// Project every shape into the axes' pixel space.
    pub fn translate(&mut self, x_axis: &Axis, y_axis: &Axis) {
        for shape in &mut self.shapes {
            shape.projected = Some(project_path(&shape.path, x_axis, y_axis));
            shape.anchor = shape.centroid.map(|c| project_point(c, x_axis, y_axis));
        }
        self.translate_colors();
    }
}

/// Value-positioned marker (map point or bubble).
#[derive(Clone, Debug, PartialEq)]
pub struct MapPoint {
    pub key: Option<String>,
    pub name: Option<String>,
    /// Data-space position; `None` hides the point.
    pub position: Option<Point>,
    /// Bubble size value.
    pub z: Option<f32>,
}

impl MapPoint {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            key: None,
            name: None,
            position: Some(Point::new(x, y)),
            z: None,
        }
    }
}

/// Ordinary series positioned by values.
#[derive(Clone, Debug, Default)]
pub struct PointSeries {
    pub name: Option<String>,
    pub points: Vec<MapPoint>,
}

impl PointSeries {
    pub fn new(points: Vec<MapPoint>) -> Self {
        Self { name: None, points }
    }

    fn extremes(&self, kind: AxisKind) -> Option<Domain1D> {
        let mut out: Option<Domain1D> = None;
        for p in self.points.iter().filter_map(|p| p.position) {
            let v = match kind {
                AxisKind::X => p.x,
                AxisKind::Y => p.y,
            };
            if !v.is_finite() {
                continue;
            }
            let d = Domain1D::new(v, v);
            out = Some(out.map_or(d, |o| o.union(d)));
        }
        out
    }

    /// Pixel positions for the current axes; hidden points are skipped.
    pub fn pixel_positions<'a>(
        &'a self,
        x_axis: &'a Axis,
        y_axis: &'a Axis,
    ) -> impl Iterator<Item = (usize, Point)> + 'a {
        self.points
            .iter()
            .enumerate()
            .filter_map(move |(i, p)| p.position.map(|pos| (i, project_point(pos, x_axis, y_axis))))
    }
}

/// The closed set of series kinds, fixed at construction.
#[derive(Clone, Debug)]
pub enum Series {
    /// Filled areas colored by value.
    Map(MapSeries),
    /// Outlines stroked by value.
    MapLine(MapSeries),
    /// Value-positioned markers.
    Points(PointSeries),
}

impl Series {
    /// Geometry-driven series, if this is one.
    pub fn map_geometry(&self) -> Option<&MapSeries> {
        match self {
            Series::Map(s) | Series::MapLine(s) => Some(s),
            Series::Points(_) => None,
        }
    }

    pub fn map_geometry_mut(&mut self) -> Option<&mut MapSeries> {
        match self {
            Series::Map(s) | Series::MapLine(s) => Some(s),
            Series::Points(_) => None,
        }
    }

    /// Value-derived extremes for the generic axis pass. Map geometry series
    /// contribute nothing here.
    pub fn value_extremes(&self, kind: AxisKind) -> Option<Domain1D> {
        match self {
            Series::Points(p) => p.extremes(kind),
            Series::Map(_) | Series::MapLine(_) => None,
        }
    }
}
