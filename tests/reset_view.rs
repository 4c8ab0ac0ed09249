use market_analytics_wasm::domain::chart::{Chart, ChartKind, InteractionController};
use market_analytics_wasm::domain::market_data::{PlayerName, Series, SeriesPoint, Timestamp};
use wasm_bindgen_test::*;

fn sample_chart() -> Chart {
    let points = (0..=100u64)
        .map(|t| SeriesPoint::new(Timestamp::from_millis(t), 7.5))
        .collect();
    let series = Series::from_points(PlayerName::from("Charlie"), points);
    let mut chart = Chart::new("test".to_string(), ChartKind::PriceLine, 800, 420);
    chart.set_series(vec![series]);
    chart
}

#[wasm_bindgen_test]
fn reset_restores_full_domain_after_any_history() {
    let mut chart = sample_chart();
    let mut controller = InteractionController::default();

    controller.zoom(&mut chart, 4.0, 620.0);
    controller.begin_drag(400.0, true);
    controller.drag_to(&mut chart, 150.0, true);
    controller.end_drag();
    controller.zoom(&mut chart, -1.0, 90.0);
    assert!(!chart.viewport.is_full_extent());

    assert!(controller.reset(&mut chart));
    assert_eq!(chart.viewport.visible_start, 0.0);
    assert_eq!(chart.viewport.visible_end, 100.0);
}

#[wasm_bindgen_test]
fn reset_is_idempotent() {
    let mut chart = sample_chart();
    let mut controller = InteractionController::default();

    controller.zoom(&mut chart, 2.0, 400.0);
    assert!(controller.reset(&mut chart));

    // Resetting an already-reset chart is a no-op.
    let before = chart.viewport.clone();
    assert!(!controller.reset(&mut chart));
    assert_eq!(chart.viewport, before);
}

#[wasm_bindgen_test]
fn reset_also_abandons_an_active_pan() {
    let mut chart = sample_chart();
    let mut controller = InteractionController::default();

    controller.zoom(&mut chart, 2.0, 400.0);
    controller.begin_drag(300.0, true);
    assert!(controller.is_panning());

    controller.reset(&mut chart);
    assert!(!controller.is_panning());
    assert!(chart.viewport.is_full_extent());
}
