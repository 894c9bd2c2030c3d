//! Data space to pixel space for shape paths
//!
//! Pixel y grows downward while data y grows upward, so y is flipped against
//! the axis length. Path coordinates are rounded to whole pixels so adjacent
//! shapes share identical border coordinates.

use crate::axis::Axis;
use crate::path::Path;
use crate::view::Point;

/// Project `path` onto the plot. Returns a new path with the same commands.
pub fn project_path(path: &Path, x_axis: &Axis, y_axis: &Axis) -> Path {
    path.map_coordinates(
        |x| x_axis.translate(x).round(),
        |y| (y_axis.len() - y_axis.translate(y)).round(),
    )
}

/// Project a single data point without rounding.
pub fn project_point(p: Point, x_axis: &Axis, y_axis: &Axis) -> Point {
    Point::new(x_axis.translate(p.x), y_axis.len() - y_axis.translate(p.y))
}

/// Inverse of [`project_point`].
pub fn unproject_point(px: Point, x_axis: &Axis, y_axis: &Axis) -> Point {
    Point::new(x_axis.to_value(px.x), y_axis.to_value(y_axis.len() - px.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{AxisKind, AxisStrategy, MapAxes};
    use crate::path::PathToken::{Command as C, Value as V};

    fn axes() -> (Axis, Axis) {
        let mut x = Axis::new(AxisKind::X);
        let mut y = Axis::new(AxisKind::Y);
        x.set_len(200.0);
        y.set_len(200.0);
        x.set_extremes(Some(0.0), Some(100.0));
        y.set_extremes(Some(0.0), Some(50.0));
        x.apply_extremes();
        y.apply_extremes();
        MapAxes::default().compute_translation(&mut x, &mut y);
        (x, y)
    }

    #[test]
    fn projects_and_flips_y() {
        let (x, y) = axes();
        let src = Path::parse("M 0 0 L 100 50 Z");
        let out = project_path(&src, &x, &y);
        // scale 2, y padded by 50 px: y=0 -> 200 - 50, y=50 -> 200 - 150.
        assert_eq!(
            out.tokens(),
            &[C('M'), V(0.0), V(150.0), C('L'), V(200.0), V(50.0), C('Z')]
        );
        assert_eq!(src, Path::parse("M 0 0 L 100 50 Z"));
    }

    #[test]
    fn rounds_to_whole_pixels() {
        let (x, y) = axes();
        let out = project_path(&Path::parse("M 0.3 0.2"), &x, &y);
        assert_eq!(out.tokens(), &[C('M'), V(1.0), V(150.0)]);
    }

    #[test]
    fn nan_operands_stay_nan() {
        let (x, y) = axes();
        let out = project_path(&Path::parse("M -- 3"), &x, &y);
        assert!(out.tokens()[1].as_value().unwrap().is_nan());
        assert_eq!(out.tokens()[2], V(144.0));
    }

    #[test]
    fn unproject_inverts_projection() {
        let (x, y) = axes();
        let p = Point::new(37.0, 12.5);
        let back = unproject_point(project_point(p, &x, &y), &x, &y);
        assert!((back.x - p.x).abs() < 1e-4);
        assert!((back.y - p.y).abs() < 1e-4);
    }
}
