use market_analytics_wasm::domain::chart::{Chart, ChartKind};
use market_analytics_wasm::domain::market_data::{PlayerName, Series, SeriesPoint, Timestamp};
use wasm_bindgen_test::*;

fn chart_with(points: Vec<(u64, f64)>) -> Chart {
    let points = points
        .into_iter()
        .map(|(t, v)| SeriesPoint::new(Timestamp::from_millis(t), v))
        .collect();
    let mut chart = Chart::new("hover".to_string(), ChartKind::PriceLine, 800, 420);
    chart.set_series(vec![Series::from_points(PlayerName::from("Alice"), points)]);
    chart
}

#[wasm_bindgen_test]
fn hover_reports_the_exact_data_pair() {
    let chart = chart_with((0..=10).map(|t| (t * 10, 100.0 + t as f64)).collect());
    let x = chart.viewport.time_to_x(50.0);

    let hover = chart.hover(x).unwrap();
    assert_eq!(hover.timestamp.value(), 50);
    assert_eq!(hover.value, 105.0);
    assert_eq!(hover.player.value(), "Alice");
}

#[wasm_bindgen_test]
fn hover_snaps_to_the_nearest_point() {
    let chart = chart_with(vec![(0, 1.0), (100, 2.0)]);
    let x = chart.viewport.time_to_x(70.0);
    assert_eq!(chart.hover(x).unwrap().timestamp.value(), 100);
}

#[wasm_bindgen_test]
fn hover_outside_the_canvas_returns_nothing() {
    let chart = chart_with(vec![(0, 1.0), (100, 2.0)]);
    assert!(chart.hover(-1.0).is_none());
    assert!(chart.hover(801.0).is_none());
}

#[wasm_bindgen_test]
fn hover_ignores_points_outside_the_visible_range() {
    let mut chart = chart_with((6..=10).map(|t| (t * 10, t as f64)).collect());
    // Zoom the viewport to [60, 80]; the points at 90 and 100 drop out.
    chart.viewport.visible_start = 60.0;
    chart.viewport.visible_end = 80.0;

    let inside = chart.hover(chart.viewport.time_to_x(79.0)).unwrap();
    assert_eq!(inside.timestamp.value(), 80);

    chart.viewport.visible_start = 95.0;
    chart.viewport.visible_end = 97.0;
    assert!(chart.hover(400.0).is_none());
}

#[wasm_bindgen_test]
fn hover_picks_the_closest_series_when_several_overlay() {
    let alice = Series::from_points(
        PlayerName::from("Alice"),
        vec![SeriesPoint::new(Timestamp::from_millis(40), 1.0)],
    );
    let bob = Series::from_points(
        PlayerName::from("Bob"),
        vec![SeriesPoint::new(Timestamp::from_millis(60), 2.0)],
    );
    let mut chart = Chart::new("hover".to_string(), ChartKind::PriceLine, 800, 420);
    chart.set_series(vec![alice, bob]);

    let near_bob = chart.hover(chart.viewport.time_to_x(58.0)).unwrap();
    assert_eq!(near_bob.player.value(), "Bob");

    let near_alice = chart.hover(chart.viewport.time_to_x(42.0)).unwrap();
    assert_eq!(near_alice.player.value(), "Alice");
}
