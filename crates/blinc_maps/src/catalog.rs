//! Named map datasets and joining data rows onto their areas
//!
//! A [`MapCatalog`] is owned by the host and handed to whatever builds the
//! charts; entries live until they are removed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::extent::{Bounds, CentroidBias};
use crate::path::Path as ShapePath;
use crate::series::{MapPoint, Shape};
use crate::view::Point;

/// One area of a map dataset.
///
/// Apart from the outline and the label bias, areas carry arbitrary
/// properties (`code`, `name`, ...) that data rows are joined on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapArea {
    pub path: String,
    #[serde(default, rename = "middleX", alias = "middle_x", skip_serializing_if = "Option::is_none")]
    pub middle_x: Option<f32>,
    #[serde(default, rename = "middleY", alias = "middle_y", skip_serializing_if = "Option::is_none")]
    pub middle_y: Option<f32>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl MapArea {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            middle_x: None,
            middle_y: None,
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Property as join text. Numbers are rendered; other kinds don't join.
    pub fn property(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Bias from `middleX`/`middleY`, falling back to `default` per axis.
    pub fn bias(&self, default: CentroidBias) -> CentroidBias {
        CentroidBias::new(
            self.middle_x.unwrap_or(default.x),
            self.middle_y.unwrap_or(default.y),
        )
    }

    /// Label anchor in data space.
    pub fn centroid(&self, default_bias: CentroidBias) -> Option<Point> {
        Bounds::of_path(&ShapePath::parse(&self.path)).centroid(self.bias(default_bias))
    }

    /// Shape keyed by the `join_by` property, without a value.
    pub fn to_shape(&self, join_by: &str, default_bias: CentroidBias) -> Shape {
        let mut shape = Shape::from_svg(&self.path).with_bias(self.bias(default_bias));
        if let Some(key) = self.property(join_by) {
            shape = shape.with_key(key);
        }
        if let Some(name) = self.property("name") {
            shape = shape.with_name(name);
        }
        shape
    }
}

/// Registry of map datasets by name.
#[derive(Clone, Debug, Default)]
pub struct MapCatalog {
    maps: FxHashMap<String, Vec<MapArea>>,
}

impl MapCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `areas` under `name`, returning any dataset it replaces.
    pub fn insert(&mut self, name: impl Into<String>, areas: Vec<MapArea>) -> Option<Vec<MapArea>> {
        self.maps.insert(name.into(), areas)
    }

    /// Parse a JSON array of areas and register it. Returns the area count.
    pub fn load_json(&mut self, name: impl Into<String>, json: &str) -> Result<usize> {
        let name = name.into();
        let areas: Vec<MapArea> = serde_json::from_str(json)
            .with_context(|| format!("Failed to parse map data `{name}`"))?;
        let count = areas.len();
        debug!(map = %name, areas = count, "map data loaded");
        self.maps.insert(name, areas);
        Ok(count)
    }

    pub fn load_json_file(&mut self, name: impl Into<String>, path: &Path) -> Result<usize> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.load_json(name, &json)
    }

    pub fn get(&self, name: &str) -> Option<&[MapArea]> {
        self.maps.get(name).map(Vec::as_slice)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<MapArea>> {
        self.maps.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// A data value to attach to a map area.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    /// Matched against the areas' join property
    pub key: String,
    #[serde(default)]
    pub value: Option<f32>,
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit position; bubbles otherwise sit at the area's centroid
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    /// Bubble size
    #[serde(default)]
    pub z: Option<f32>,
}

impl DataRow {
    pub fn new(key: impl Into<String>, value: impl Into<Option<f32>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Area lookup by join key. Hits are cached; on duplicate keys the last
/// area wins.
#[derive(Debug)]
pub struct JoinIndex<'a> {
    areas: &'a [MapArea],
    join_by: String,
    cache: FxHashMap<String, usize>,
}

impl<'a> JoinIndex<'a> {
    pub fn new(areas: &'a [MapArea], join_by: impl Into<String>) -> Self {
        Self {
            areas,
            join_by: join_by.into(),
            cache: FxHashMap::default(),
        }
    }

    pub fn position(&mut self, key: &str) -> Option<usize> {
        if let Some(&i) = self.cache.get(key) {
            return Some(i);
        }
        let join_by = self.join_by.as_str();
        let i = self
            .areas
            .iter()
            .rposition(|a| a.property(join_by).as_deref() == Some(key))?;
        self.cache.insert(key.to_string(), i);
        Some(i)
    }

    pub fn lookup(&mut self, key: &str) -> Option<&'a MapArea> {
        let i = self.position(key)?;
        self.areas.get(i)
    }
}

#[derive(Clone, Debug)]
pub struct JoinOutcome {
    /// One shape per area, valued where a row matched
    pub shapes: Vec<Shape>,
    /// Keys of rows that matched no area
    pub unmatched: Vec<String>,
}

/// Turn every area into a shape and attach row values by join key.
pub fn join_values(
    areas: &[MapArea],
    rows: &[DataRow],
    join_by: &str,
    default_bias: CentroidBias,
) -> JoinOutcome {
    let mut values: Vec<Option<f32>> = vec![None; areas.len()];
    let mut unmatched = Vec::new();
    let mut index = JoinIndex::new(areas, join_by);

    for row in rows {
        match index.position(&row.key) {
            Some(i) => values[i] = row.value,
            None => unmatched.push(row.key.clone()),
        }
    }
    if !unmatched.is_empty() {
        debug!(join_by, unmatched = unmatched.len(), "data rows without map area");
    }

    let shapes = areas
        .iter()
        .zip(values)
        .map(|(area, value)| area.to_shape(join_by, default_bias).with_value(value))
        .collect();
    JoinOutcome { shapes, unmatched }
}

/// Bubble points for `rows`. A row without its own position sits at its
/// area's centroid; without a matching area it has no position.
pub fn place_bubbles(
    areas: &[MapArea],
    rows: &[DataRow],
    join_by: &str,
    default_bias: CentroidBias,
) -> Vec<MapPoint> {
    let mut index = JoinIndex::new(areas, join_by);
    rows.iter()
        .map(|row| {
            let area = index.lookup(&row.key);
            let position = match (row.x, row.y) {
                (Some(x), Some(y)) => Some(Point::new(x, y)),
                _ => area.and_then(|a| a.centroid(default_bias)),
            };
            MapPoint {
                key: Some(row.key.clone()),
                name: row
                    .name
                    .clone()
                    .or_else(|| area.and_then(|a| a.property("name"))),
                position,
                z: row.z.or(row.value),
            }
        })
        .collect()
}
