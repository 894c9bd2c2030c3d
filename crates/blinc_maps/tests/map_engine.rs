use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use blinc_maps::extent::Bounds;
use blinc_maps::path::PathToken::{Command as C, Value as V};
use blinc_maps::prelude::*;

const WORLD: &str = r#"[
    { "code": "N", "name": "North", "path": "M0,25L100,25L100,50L0,50Z" },
    { "code": "S", "name": "South", "path": "M0,0L100,0L100,25L0,25Z", "middleY": 0.2 }
]"#;

fn map_config() -> MapChartConfig {
    MapChartConfig::from_toml_str(
        r#"
        [color.gradient]
        from = "rgba(0,0,0,1)"
        to = "rgba(255,255,255,1)"
        from_label = "Low"
        to_label = "High"

        [navigation]
        enable_buttons = true
        zoom_on_double_click = true
        zoom_on_mouse_wheel = true
        animation_ms = 0
        "#,
    )
    .unwrap()
}

#[test]
fn path_text_round_trips_through_tokens() {
    let path = Path::parse("M0,0L10,10Z");
    assert_eq!(
        path.tokens(),
        &[C('M'), V(0.0), V(0.0), C('L'), V(10.0), V(10.0), C('Z')]
    );
    assert_eq!(Path::parse(&path.to_string()), path);
    assert!(path.validate().is_ok());
}

#[test]
fn shape_extent_and_centroid() {
    let shape = Path::parse("M 0 0 L 10 0 L 10 5 Z");
    let bounds = Bounds::of_path(&shape);
    assert_eq!(bounds, Bounds::new(0.0, 10.0, 0.0, 5.0));
    assert_eq!(
        bounds.centroid(CentroidBias::default()),
        Some(Point::new(5.0, 2.5))
    );
}

#[test]
fn axis_lock_shares_the_smaller_scale() {
    let mut x = Axis::new(AxisKind::X);
    let mut y = Axis::new(AxisKind::Y);
    x.set_len(200.0);
    y.set_len(200.0);
    x.set_extremes(Some(0.0), Some(100.0));
    y.set_extremes(Some(0.0), Some(50.0));
    x.apply_extremes();
    y.apply_extremes();

    MapAxes::default().compute_translation(&mut x, &mut y);
    assert_eq!(x.scale(), y.scale());
    assert_eq!(x.scale(), 2.0);
    assert!(y.min_pixel_padding() > 0.0);
}

#[test]
fn box_fit_clamps_oversized_candidate() {
    let fitted = fit_to_box(
        Rect::new(-10.0, 0.0, 120.0, 50.0),
        Rect::new(0.0, 0.0, 100.0, 50.0),
    );
    assert_eq!(fitted, Rect::new(0.0, 0.0, 100.0, 50.0));
}

#[test]
fn inverse_zooms_restore_the_view() {
    let mut chart = MapChart::new(map_config()).unwrap();
    chart.add_map(vec![Shape::from_svg("M0,0L1000,0L1000,1000L0,1000Z")]);
    chart.layout(400.0, 400.0);

    let focus = Some(Point::new(500.0, 500.0));
    assert!(chart.map_zoom(0.25, focus));
    let before = chart.visible_rect();

    assert!(chart.map_zoom(2.0, focus));
    assert!(chart.map_zoom(0.5, focus));
    let after = chart.visible_rect();
    assert!((before.x - after.x).abs() < 1e-3);
    assert!((before.y - after.y).abs() < 1e-3);
    assert!((before.width - after.width).abs() < 1e-3);
    assert!((before.height - after.height).abs() < 1e-3);
}

#[test]
fn gradient_colors_follow_values() {
    let mut chart = MapChart::new(map_config()).unwrap();
    chart.add_map(vec![
        Shape::from_svg("M0,0L1,1").with_value(0.0),
        Shape::from_svg("M1,1L2,2").with_value(5.0),
        Shape::from_svg("M2,2L3,3").with_value(10.0),
        Shape::from_svg("M3,3L4,4"),
    ]);
    chart.layout(100.0, 100.0);

    let fills: Vec<_> = chart.render().into_iter().map(|s| s.fill).collect();
    assert_eq!(fills[0], Some(Color::BLACK));
    assert_eq!(fills[1].map(|c| c.to_string()).as_deref(), Some("rgba(128,128,128,1)"));
    assert_eq!(fills[2], Some(Color::WHITE));
    assert_eq!(fills[3], Some(Color::rgb(0xF8, 0xF8, 0xF8)));

    let legend = chart.legend_items(0);
    assert_eq!(legend.len(), 1);
    assert!(matches!(
        &legend[0],
        LegendItem::Gradient { first_label: Some(l), .. } if l == "Low"
    ));
}

#[test]
fn replaced_shapes_do_not_inherit_hover_fades() {
    let mut config = map_config();
    config.hover_color = Some("white".to_string());
    let mut chart = MapChart::new(config).unwrap();
    chart.add_map(vec![Shape::from_svg("M0,0L10,10").with_value(1.0)]);
    chart.layout(100.0, 100.0);
    chart.on_hover_end(0, 0);

    if let Some(Series::Map(map)) = chart.series_mut(0) {
        map.set_data(vec![Shape::from_svg("M0,0L5,5")]);
    }
    chart.layout(100.0, 100.0);
    assert_eq!(chart.render()[0].fill, Some(Color::rgb(0xF8, 0xF8, 0xF8)));
}

#[test]
fn zoom_during_transition_leaves_view_unchanged() {
    let now = Rc::new(Cell::new(Instant::now()));
    let clock = {
        let now = now.clone();
        move || now.get()
    };
    let mut config = map_config();
    config.navigation.animation_ms = 500;

    let mut chart = MapChart::with_clock(config, clock).unwrap();
    chart.add_map(vec![Shape::from_svg("M0,0L100,0L100,100L0,100Z")]);
    chart.layout(100.0, 100.0);

    assert!(chart.map_zoom(0.5, None));
    let first = chart.visible_rect();
    assert_eq!(chart.zoom_phase(), ZoomPhase::Zooming);

    now.set(now.get() + Duration::from_millis(100));
    assert!(!chart.map_zoom(0.5, Some(Point::new(10.0, 10.0))));
    assert!(!chart.on_double_click(Point::new(10.0, 10.0)));
    assert_eq!(chart.visible_rect(), first);

    now.set(now.get() + Duration::from_millis(500));
    assert_eq!(chart.zoom_phase(), ZoomPhase::Idle);
}

#[test]
fn catalog_join_and_bubbles_render() {
    let mut catalog = MapCatalog::new();
    catalog.load_json("strip", WORLD).unwrap();

    let mut chart = MapChart::new(map_config()).unwrap();
    let rows = [DataRow::new("N", 3.0), DataRow::new("X", 1.0)];
    let (map, unmatched) = chart.add_joined_map(&catalog, "strip", &rows).unwrap();
    assert_eq!(unmatched, ["X"]);

    let bubbles = chart
        .add_bubbles(&catalog, "strip", &[DataRow::new("S", 7.0), DataRow::new("X", 1.0)])
        .unwrap();
    assert!(chart.add_bubbles(&catalog, "missing", &rows).is_err());

    chart.layout(200.0, 100.0);

    let shapes = chart.render();
    assert_eq!(shapes.len(), 2);
    assert!(shapes.iter().all(|s| s.series == map));
    assert_eq!(shapes[0].key.as_deref(), Some("N"));

    // Only the matched bubble is placed, at South's biased centroid (50, 5).
    let points = chart.render_points();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].series, bubbles);
    assert_eq!(points[0].z, Some(7.0));
    assert_eq!(points[0].position, chart.to_pixels(Point::new(50.0, 5.0)));
    assert_eq!(points[0].position, Point::new(100.0, 90.0));

    catalog.remove("strip");
    assert!(catalog.is_empty());
}

#[test]
fn point_series_extend_map_extremes() {
    let mut chart = MapChart::new(map_config()).unwrap();
    chart.add_map(vec![Shape::from_svg("M0,0L100,0L100,100Z")]);
    chart.add_points(vec![MapPoint::at(150.0, 50.0)]);
    chart.layout(200.0, 100.0);

    assert_eq!(chart.x_axis().data_extremes(), Some(Domain1D::new(0.0, 150.0)));
    assert_eq!(chart.visible_rect(), Rect::new(0.0, 0.0, 150.0, 100.0));
}

#[test]
fn custom_axis_strategy_replaces_map_layout() {
    let mut chart = MapChart::new(map_config()).unwrap();
    chart.add_map(vec![Shape::from_svg("M0,0L100,50")]);
    chart.add_points(vec![MapPoint::at(10.0, 10.0), MapPoint::at(20.0, 30.0)]);
    chart.set_axis_strategy(Box::new(CartesianAxes));
    chart.layout(100.0, 100.0);

    // Geometry no longer feeds the extremes; only the points do.
    assert_eq!(chart.visible_rect(), Rect::new(10.0, 10.0, 10.0, 20.0));
    assert_eq!(chart.x_axis().scale(), 10.0);
    assert_eq!(chart.y_axis().scale(), 5.0);
}

#[test]
fn config_file_loads_from_disk() {
    let dir = std::env::temp_dir().join(format!("blinc_maps_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("map.toml");
    std::fs::write(&file, "border_width = 2\n[legend]\nlayout = \"vertical\"\n").unwrap();

    let config = MapChartConfig::load(&file).unwrap();
    assert_eq!(config.border_width, 2.0);
    assert_eq!(config.legend.layout, LegendLayout::Vertical);

    assert!(MapChartConfig::load(&dir.join("absent.toml")).is_err());
    std::fs::remove_dir_all(&dir).ok();
}

#[derive(Clone, Default)]
struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn malformed_paths_are_kept_and_logged() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let series = tracing::subscriber::with_default(subscriber, || {
        MapSeries::with_data(
            MapSeriesOptions::default(),
            vec![
                Shape::from_svg("M 0 0 L 10").with_key("broken"),
                Shape::from_svg("M 0 0 L 10 10"),
            ],
        )
    });

    assert_eq!(series.shapes().len(), 2);
    assert_eq!(series.extent(), Bounds::new(0.0, 10.0, 0.0, 10.0));
    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("malformed shape path"));
    assert!(text.contains("broken"));
}
