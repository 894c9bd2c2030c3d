//! Legend entries derived from a series' color scale
//!
//! Only the entries are produced here; measuring and drawing them belongs to
//! the host legend.

use serde::{Deserialize, Serialize};

use crate::choropleth::{ColorScale, Gradient, ValueRange};
use crate::color::Color;
use crate::format::format_number;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendLayout {
    #[default]
    Horizontal,
    Vertical,
}

/// Linear gradient direction as `[x1, y1, x2, y2]` in symbol-box fractions.
pub type GradientVector = [f32; 4];

pub const HORIZONTAL_GRADIENT: GradientVector = [0.0, 0.0, 1.0, 0.0];
/// Bottom to top.
pub const VERTICAL_GRADIENT: GradientVector = [0.0, 1.0, 0.0, 0.0];

#[derive(Clone, Debug, PartialEq)]
pub enum LegendItem {
    /// One discrete value range.
    Range {
        name: String,
        color: Color,
        from: Option<f32>,
        to: Option<f32>,
    },
    /// The whole gradient as a single symbol.
    Gradient {
        /// Label drawn before the symbol: left, or top when vertical.
        first_label: Option<String>,
        /// Label drawn after the symbol.
        last_label: Option<String>,
        stops: [(f32, Color); 2],
        vector: GradientVector,
    },
}

impl LegendItem {
    pub fn name(&self) -> Option<&str> {
        match self {
            LegendItem::Range { name, .. } => Some(name),
            LegendItem::Gradient { .. } => None,
        }
    }
}

/// Legend entries for `scale`. Without a scale the series keeps the host's
/// ordinary legend symbol and gets no custom entries.
pub fn legend_items(
    scale: Option<&ColorScale>,
    layout: LegendLayout,
    value_decimals: Option<usize>,
) -> Vec<LegendItem> {
    match scale {
        None => Vec::new(),
        Some(ColorScale::Ranges(ranges)) => ranges
            .iter()
            .map(|range| LegendItem::Range {
                name: range_name(range, value_decimals),
                color: range.color,
                from: range.from,
                to: range.to,
            })
            .collect(),
        Some(ColorScale::Gradient(gradient)) => vec![gradient_item(gradient, layout)],
    }
}

/// `"< to"`, `"> from"` or `"from - to"`.
pub fn range_name(range: &ValueRange, value_decimals: Option<usize>) -> String {
    let fmt = |v: f32| format_number(v, value_decimals);
    match (range.from, range.to) {
        (None, Some(to)) => format!("< {}", fmt(to)),
        (Some(from), None) => format!("> {}", fmt(from)),
        (Some(from), Some(to)) => format!("{} - {}", fmt(from), fmt(to)),
        (None, None) => String::new(),
    }
}

fn gradient_item(gradient: &Gradient, layout: LegendLayout) -> LegendItem {
    let stops = [(0.0, gradient.from), (1.0, gradient.to)];
    match layout {
        LegendLayout::Horizontal => LegendItem::Gradient {
            first_label: gradient.from_label.clone(),
            last_label: gradient.to_label.clone(),
            stops,
            vector: HORIZONTAL_GRADIENT,
        },
        // High values on top.
        LegendLayout::Vertical => LegendItem::Gradient {
            first_label: gradient.to_label.clone(),
            last_label: gradient.from_label.clone(),
            stops,
            vector: VERTICAL_GRADIENT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Color = Color::rgb(10, 20, 30);

    #[test]
    fn range_names_follow_open_bounds() {
        let scale = ColorScale::Ranges(vec![
            ValueRange::new(None, Some(1000.0), A),
            ValueRange::new(Some(1000.0), Some(5000.0), A),
            ValueRange::new(Some(5000.0), None, A),
        ]);
        let names: Vec<_> = legend_items(Some(&scale), LegendLayout::Horizontal, Some(0))
            .iter()
            .filter_map(|i| i.name().map(str::to_string))
            .collect();
        assert_eq!(names, ["< 1,000", "1,000 - 5,000", "> 5,000"]);
    }

    #[test]
    fn value_decimals_apply_to_both_bounds() {
        let r = ValueRange::new(Some(0.5), Some(2.0), A);
        assert_eq!(range_name(&r, Some(2)), "0.50 - 2.00");
        assert_eq!(range_name(&r, None), "0.5 - 2");
    }

    #[test]
    fn vertical_gradient_swaps_labels() {
        let scale = ColorScale::Gradient(
            Gradient::new(Color::WHITE, Color::BLACK).with_labels("Low", "High"),
        );

        let h = legend_items(Some(&scale), LegendLayout::Horizontal, None);
        let LegendItem::Gradient { first_label, vector, stops, .. } = &h[0] else {
            panic!("expected gradient item");
        };
        assert_eq!(first_label.as_deref(), Some("Low"));
        assert_eq!(*vector, HORIZONTAL_GRADIENT);
        assert_eq!(stops[0], (0.0, Color::WHITE));

        let v = legend_items(Some(&scale), LegendLayout::Vertical, None);
        let LegendItem::Gradient { first_label, last_label, vector, .. } = &v[0] else {
            panic!("expected gradient item");
        };
        assert_eq!(first_label.as_deref(), Some("High"));
        assert_eq!(last_label.as_deref(), Some("Low"));
        assert_eq!(*vector, VERTICAL_GRADIENT);
    }

    #[test]
    fn no_scale_no_items() {
        assert!(legend_items(None, LegendLayout::Vertical, None).is_empty());
    }
}
