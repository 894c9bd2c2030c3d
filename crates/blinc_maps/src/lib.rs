//! blinc_maps
//!
//! Shape-based map charts for Blinc: choropleth areas, outlines and bubbles
//! drawn from vector-path geometry.
//!
//! Design goals:
//! - Parse map outlines once and reproject them on every pan, zoom and resize
//! - Keep map proportions with a shared pixels-per-unit scale on both axes
//! - Zoom inside the data bounds, one transition at a time

mod interpolate;
mod project;
mod view;

pub mod axis;
pub mod catalog;
pub mod chart;
pub mod choropleth;
pub mod color;
pub mod config;
pub mod error;
pub mod extent;
pub mod format;
pub mod input;
pub mod legend;
pub mod path;
pub mod series;
pub mod transition;
pub mod zoom;

pub use chart::{MapChart, RenderedPoint, RenderedShape};
pub use color::Color;
pub use error::{ColorParseError, ConfigError, ConfigResult, PathError};
pub use path::{Path, PathToken};
pub use project::{project_path, project_point, unproject_point};
pub use view::{Domain1D, Domain2D, Point, Rect};
pub use zoom::fit_to_box;

/// Common imports for map chart users.
pub mod prelude {
    pub use crate::axis::{Axis, AxisKind, AxisStrategy, CartesianAxes, MapAxes};
    pub use crate::catalog::{join_values, place_bubbles, DataRow, JoinIndex, MapArea, MapCatalog};
    pub use crate::chart::{MapChart, RenderedPoint, RenderedShape};
    pub use crate::choropleth::{ColorScale, Gradient, ValueRange};
    pub use crate::color::Color;
    pub use crate::config::{ChartKind, MapChartConfig, NavigationOptions};
    pub use crate::extent::{Bounds, CentroidBias};
    pub use crate::input::{PinchTransform, ZoomButton};
    pub use crate::legend::{LegendItem, LegendLayout};
    pub use crate::path::{Path, PathToken};
    pub use crate::series::{MapPoint, MapSeries, MapSeriesOptions, PointSeries, Series, Shape};
    pub use crate::view::{Domain1D, Domain2D, Point, Rect};
    pub use crate::zoom::{fit_to_box, Clock, MapNavigator, SystemClock, ZoomPhase};
}
