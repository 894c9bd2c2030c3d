//! Map chart configuration (TOML)
//!
//! Colors are kept as written and resolved into typed series options by
//! [`MapChartConfig::series_options`], so a bad color surfaces as a
//! [`ConfigError`] naming the offending text.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::choropleth::{ColorScale, Gradient, ValueRange};
use crate::color::Color;
use crate::error::{ConfigError, ConfigResult};
use crate::extent::CentroidBias;
use crate::legend::LegendLayout;
use crate::series::MapSeriesOptions;

/// Chart type. Aspect locking and pinch ratio locking apply to maps only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Map,
    Cartesian,
}

/// Top-level map chart configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MapChartConfig {
    #[serde(default)]
    pub kind: ChartKind,
    /// Fill for shapes without a value
    #[serde(default = "default_null_color")]
    pub null_color: String,
    #[serde(default = "default_border_color")]
    pub border_color: String,
    #[serde(default = "default_border_width")]
    pub border_width: f32,
    /// Fill used when no color scale applies
    #[serde(default = "default_series_color")]
    pub series_color: String,
    #[serde(default)]
    pub hover_color: Option<String>,
    /// Duration of the fade back from the hover color; 0 disables it
    #[serde(default = "default_animation_ms")]
    pub fade_ms: u64,
    #[serde(default)]
    pub color: ColorConfig,
    /// Label anchor bias for shapes that don't carry their own
    #[serde(default)]
    pub centroid_bias: CentroidBias,
    #[serde(default)]
    pub navigation: NavigationOptions,
    #[serde(default)]
    pub legend: LegendOptions,
    /// Property joining data rows onto map areas
    #[serde(default = "default_join_by")]
    pub join_by: String,
}

fn default_null_color() -> String {
    "#F8F8F8".to_string()
}

fn default_border_color() -> String {
    "silver".to_string()
}

fn default_border_width() -> f32 {
    1.0
}

fn default_series_color() -> String {
    "#2f7ed8".to_string()
}

fn default_animation_ms() -> u64 {
    500
}

fn default_join_by() -> String {
    "code".to_string()
}

impl Default for MapChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            null_color: default_null_color(),
            border_color: default_border_color(),
            border_width: default_border_width(),
            series_color: default_series_color(),
            hover_color: None,
            fade_ms: default_animation_ms(),
            color: ColorConfig::default(),
            centroid_bias: CentroidBias::default(),
            navigation: NavigationOptions::default(),
            legend: LegendOptions::default(),
            join_by: default_join_by(),
        }
    }
}

/// Value coloring: discrete `ranges` or a `gradient`, never both.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ColorConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<RangeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<GradientConfig>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RangeConfig {
    #[serde(default)]
    pub from: Option<f32>,
    #[serde(default)]
    pub to: Option<f32>,
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GradientConfig {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub from_label: Option<String>,
    #[serde(default)]
    pub to_label: Option<String>,
}

impl ColorConfig {
    /// Resolve into a color scale; `None` when nothing is configured.
    pub fn color_scale(&self) -> ConfigResult<Option<ColorScale>> {
        match (&self.gradient, self.ranges.is_empty()) {
            (Some(_), false) => Err(ConfigError::ConflictingColorScales),
            (Some(g), true) => {
                let from = g
                    .from
                    .as_deref()
                    .ok_or(ConfigError::MissingGradientColor("from"))?;
                let to = g
                    .to
                    .as_deref()
                    .ok_or(ConfigError::MissingGradientColor("to"))?;
                Ok(Some(ColorScale::Gradient(Gradient {
                    from: from.parse()?,
                    to: to.parse()?,
                    from_label: g.from_label.clone(),
                    to_label: g.to_label.clone(),
                })))
            }
            (None, false) => {
                let ranges = self
                    .ranges
                    .iter()
                    .map(|r| -> ConfigResult<ValueRange> {
                        Ok(ValueRange::new(r.from, r.to, r.color.parse()?))
                    })
                    .collect::<ConfigResult<Vec<_>>>()?;
                Ok(Some(ColorScale::Ranges(ranges)))
            }
            (None, true) => Ok(None),
        }
    }
}

/// Zoom and pan controls
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NavigationOptions {
    #[serde(default)]
    pub enable_buttons: bool,
    #[serde(default)]
    pub zoom_on_double_click: bool,
    #[serde(default)]
    pub zoom_on_mouse_wheel: bool,
    #[serde(default)]
    pub enable_touch_zoom: bool,
    /// Zoom transition length; no zoom starts while one is running
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    #[serde(default)]
    pub buttons: ButtonsOptions,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            enable_buttons: false,
            zoom_on_double_click: false,
            zoom_on_mouse_wheel: false,
            enable_touch_zoom: false,
            animation_ms: default_animation_ms(),
            buttons: ButtonsOptions::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Layout shared by both zoom buttons, plus each button's own settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ButtonsOptions {
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
    #[serde(default)]
    pub x: f32,
    #[serde(default = "default_button_size")]
    pub width: f32,
    #[serde(default = "default_button_size")]
    pub height: f32,
    #[serde(default = "default_zoom_in")]
    pub zoom_in: ButtonOptions,
    #[serde(default = "default_zoom_out")]
    pub zoom_out: ButtonOptions,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ButtonOptions {
    pub text: String,
    #[serde(default)]
    pub y: f32,
    pub factor: f32,
}

fn default_button_size() -> f32 {
    18.0
}

fn default_zoom_in() -> ButtonOptions {
    ButtonOptions {
        text: "+".to_string(),
        y: 0.0,
        factor: 0.5,
    }
}

fn default_zoom_out() -> ButtonOptions {
    ButtonOptions {
        text: "-".to_string(),
        y: 28.0,
        factor: 2.0,
    }
}

impl Default for ButtonsOptions {
    fn default() -> Self {
        Self {
            align: Align::default(),
            vertical_align: VerticalAlign::default(),
            x: 0.0,
            width: default_button_size(),
            height: default_button_size(),
            zoom_in: default_zoom_in(),
            zoom_out: default_zoom_out(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LegendOptions {
    #[serde(default)]
    pub layout: LegendLayout,
    /// Fraction digits in range names; unset keeps significant digits
    #[serde(default)]
    pub value_decimals: Option<usize>,
}

impl MapChartConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MapChartConfig =
            toml::from_str(content).context("Failed to parse map chart config")?;
        config.validate().context("Invalid map chart config")?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize map chart config")
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.series_options()?;
        if let Some(hover) = &self.hover_color {
            hover.parse::<Color>()?;
        }

        for (axis, value) in [("x", self.centroid_bias.x), ("y", self.centroid_bias.y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::BiasOutOfRange { axis, value });
            }
        }

        let buttons = &self.navigation.buttons;
        if !(buttons.width > 0.0 && buttons.height > 0.0) {
            return Err(ConfigError::InvalidButtonSize {
                width: buttons.width,
                height: buttons.height,
            });
        }
        for (button, factor) in [
            ("zoom_in", buttons.zoom_in.factor),
            ("zoom_out", buttons.zoom_out.factor),
        ] {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(ConfigError::InvalidZoomFactor { button, factor });
            }
        }
        Ok(())
    }

    /// Typed options for the map series this config describes.
    pub fn series_options(&self) -> ConfigResult<MapSeriesOptions> {
        Ok(MapSeriesOptions {
            colors: self.color.color_scale()?,
            null_color: self.null_color.parse()?,
            color: self.series_color.parse()?,
            border_color: self.border_color.parse()?,
            border_width: self.border_width,
        })
    }

    pub fn hover_color(&self) -> ConfigResult<Option<Color>> {
        Ok(self
            .hover_color
            .as_deref()
            .map(str::parse::<Color>)
            .transpose()?)
    }
}
