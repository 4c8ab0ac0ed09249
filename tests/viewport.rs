use market_analytics_wasm::domain::chart::value_objects::Viewport;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn zoom_in_narrows_visible_range() {
    let mut vp = Viewport::full(0.0, 100.0, 800, 420);
    vp.zoom_at(0.5, 0.5, 0.0);
    assert!((vp.visible_start - 25.0).abs() < 1e-9);
    assert!((vp.visible_end - 75.0).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn pan_moves_viewport_without_changing_span() {
    let mut vp = Viewport::full(0.0, 100.0, 800, 420);
    vp.visible_start = 20.0;
    vp.visible_end = 80.0;
    vp.pan_by(10.0);
    assert!((vp.visible_start - 30.0).abs() < 1e-9);
    assert!((vp.visible_end - 90.0).abs() < 1e-9);
    assert!((vp.visible_span() - 60.0).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn time_to_x_calculates() {
    let vp = Viewport::full(0.0, 100.0, 200, 100);
    let x = vp.time_to_x(50.0);
    assert!((x - 100.0).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn x_to_time_inverts_time_to_x() {
    let mut vp = Viewport::full(0.0, 100.0, 800, 420);
    vp.zoom_at(0.4, 0.3, 0.0);
    for x in [0.0, 123.0, 400.0, 799.0] {
        let t = vp.x_to_time(x);
        assert!((vp.time_to_x(t) - x).abs() < 1e-6);
    }
}

#[wasm_bindgen_test]
fn zoom_round_trip_restores_full_domain() {
    let mut vp = Viewport::full(0.0, 100.0, 800, 420);
    vp.zoom_at(0.5, 0.5, 0.0);
    vp.zoom_at(2.0, 0.5, 0.0);
    // Growing back to the domain span snaps exactly onto the full extent.
    assert_eq!(vp.visible_start, 0.0);
    assert_eq!(vp.visible_end, 100.0);
    assert!(vp.is_full_extent());
}

#[wasm_bindgen_test]
fn degenerate_viewport_ignores_gestures() {
    let mut vp = Viewport::new(800, 420);
    assert!(vp.is_degenerate());
    let before = vp.clone();
    vp.zoom_at(0.5, 0.5, 0.0);
    vp.pan_by(25.0);
    assert_eq!(vp, before);
}
