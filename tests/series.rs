use market_analytics_wasm::domain::chart::{Chart, ChartKind};
use market_analytics_wasm::domain::market_data::{PlayerName, Series, SeriesPoint, Timestamp};
use wasm_bindgen_test::*;

fn point(t: u64, value: f64) -> SeriesPoint {
    SeriesPoint::new(Timestamp::from_millis(t), value)
}

#[wasm_bindgen_test]
fn from_points_restores_time_order() {
    let series = Series::from_points(
        PlayerName::from("Alice"),
        vec![point(30, 3.0), point(10, 1.0), point(20, 2.0)],
    );
    let times: Vec<u64> = series.points().iter().map(|p| p.timestamp.value()).collect();
    assert_eq!(times, vec![10, 20, 30]);
}

#[wasm_bindgen_test]
fn push_inserts_out_of_order_points_sorted() {
    let mut series = Series::new(PlayerName::from("Alice"));
    series.push(point(10, 1.0));
    series.push(point(30, 3.0));
    series.push(point(20, 2.0));
    let times: Vec<u64> = series.points().iter().map(|p| p.timestamp.value()).collect();
    assert_eq!(times, vec![10, 20, 30]);
}

#[wasm_bindgen_test]
fn same_millisecond_points_are_kept_in_arrival_order() {
    let mut series = Series::new(PlayerName::from("Alice"));
    series.push(point(10, 1.0));
    series.push(point(10, 2.0));
    assert_eq!(series.len(), 2);
    assert_eq!(series.points()[0].value, 1.0);
    assert_eq!(series.points()[1].value, 2.0);
}

#[wasm_bindgen_test]
fn bounds_cover_the_whole_series() {
    let series = Series::from_points(
        PlayerName::from("Bob"),
        vec![point(5, 9.0), point(15, 4.0), point(25, 12.5)],
    );
    let (start, end) = series.time_bounds().unwrap();
    assert_eq!(start.value(), 5);
    assert_eq!(end.value(), 25);
    assert_eq!(series.value_bounds().unwrap(), (4.0, 12.5));
}

#[wasm_bindgen_test]
fn points_in_uses_inclusive_bounds() {
    let series = Series::from_points(
        PlayerName::from("Bob"),
        (0..10).map(|t| point(t * 10, t as f64)).collect(),
    );
    let window = series.points_in(20.0, 50.0);
    let times: Vec<u64> = window.iter().map(|p| p.timestamp.value()).collect();
    assert_eq!(times, vec![20, 30, 40, 50]);
}

#[wasm_bindgen_test]
fn nearest_picks_the_closest_point() {
    let series = Series::from_points(
        PlayerName::from("Bob"),
        vec![point(0, 0.0), point(100, 1.0), point(200, 2.0)],
    );
    assert_eq!(series.nearest(40.0).unwrap().timestamp.value(), 0);
    assert_eq!(series.nearest(60.0).unwrap().timestamp.value(), 100);
    // Equidistant resolves to the earlier point.
    assert_eq!(series.nearest(150.0).unwrap().timestamp.value(), 100);
    assert_eq!(series.nearest(10_000.0).unwrap().timestamp.value(), 200);
    assert!(Series::new(PlayerName::from("Nobody")).nearest(50.0).is_none());
}

#[wasm_bindgen_test]
fn min_spacing_skips_zero_gaps() {
    let series = Series::from_points(
        PlayerName::from("Bob"),
        vec![point(0, 1.0), point(0, 2.0), point(30, 3.0), point(40, 4.0)],
    );
    assert_eq!(series.min_spacing(), Some(10.0));
}

#[wasm_bindgen_test]
fn empty_chart_keeps_full_default_viewport() {
    // Absent upstream data is a data-availability condition, not an error:
    // the chart stays empty on its default viewport.
    let mut chart = Chart::new("empty".to_string(), ChartKind::PriceLine, 800, 420);
    chart.set_series(vec![Series::new(PlayerName::from("Alice"))]);

    assert!(!chart.has_data());
    assert!(chart.viewport.is_degenerate());
    assert!(chart.hover(400.0).is_none());
    assert!(chart.visible_value_bounds().is_none());
}

#[wasm_bindgen_test]
fn reloading_series_resets_the_viewport_to_the_new_domain() {
    let mut chart = Chart::new("test".to_string(), ChartKind::PriceLine, 800, 420);
    chart.set_series(vec![Series::from_points(
        PlayerName::from("Alice"),
        (0..=10).map(|t| point(t * 10, 1.0)).collect(),
    )]);
    chart.viewport.zoom_at(0.5, 0.5, 0.0);
    assert!(!chart.viewport.is_full_extent());

    chart.set_series(vec![Series::from_points(
        PlayerName::from("Alice"),
        (0..=10).map(|t| point(500 + t * 10, 1.0)).collect(),
    )]);
    assert_eq!(chart.viewport.domain_start, 500.0);
    assert_eq!(chart.viewport.domain_end, 600.0);
    assert!(chart.viewport.is_full_extent());
}

#[wasm_bindgen_test]
fn domain_spans_all_series_of_the_chart() {
    let mut chart = Chart::new("test".to_string(), ChartKind::PriceLine, 800, 420);
    chart.set_series(vec![
        Series::from_points(PlayerName::from("Alice"), vec![point(100, 1.0), point(300, 2.0)]),
        Series::from_points(PlayerName::from("Bob"), vec![point(50, 1.0), point(250, 2.0)]),
    ]);
    assert_eq!(chart.viewport.domain_start, 50.0);
    assert_eq!(chart.viewport.domain_end, 300.0);
}
