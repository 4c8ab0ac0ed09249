use market_analytics_wasm::domain::chart::value_objects::Viewport;
use wasm_bindgen_test::*;

fn zoomed(start: f64, end: f64) -> Viewport {
    let mut vp = Viewport::full(0.0, 100.0, 800, 420);
    vp.visible_start = start;
    vp.visible_end = end;
    vp
}

#[wasm_bindgen_test]
fn zoom_out_clamps_to_full_domain() {
    let mut vp = zoomed(40.0, 60.0);
    vp.zoom_at(50.0, 0.5, 0.0);
    assert_eq!(vp.visible_start, 0.0);
    assert_eq!(vp.visible_end, 100.0);
}

#[wasm_bindgen_test]
fn zoom_in_respects_minimum_span() {
    let mut vp = Viewport::full(0.0, 100.0, 800, 420);
    vp.zoom_at(0.001, 0.5, 30.0);
    assert!((vp.visible_span() - 30.0).abs() < 1e-9);
    // Focal ratio 0.5 keeps the floor-clamped span centered.
    assert!((vp.visible_start - 35.0).abs() < 1e-9);
    assert!((vp.visible_end - 65.0).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn zoom_near_edge_shifts_back_inside_domain() {
    let mut vp = zoomed(70.0, 90.0);
    // Zooming out about the left edge would push the right bound past the
    // domain end; the viewport shifts back inside instead.
    vp.zoom_at(2.0, 0.0, 0.0);
    assert!((vp.visible_start - 60.0).abs() < 1e-9);
    assert_eq!(vp.visible_end, 100.0);
    assert!((vp.visible_span() - 40.0).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn pan_clamps_at_domain_edges() {
    let mut vp = zoomed(20.0, 80.0);
    vp.pan_by(1_000.0);
    assert_eq!(vp.visible_end, 100.0);
    assert!((vp.visible_start - 40.0).abs() < 1e-9);

    vp.pan_by(-1_000.0);
    assert_eq!(vp.visible_start, 0.0);
    assert!((vp.visible_end - 60.0).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn pan_on_full_extent_is_a_no_op() {
    let mut vp = Viewport::full(0.0, 100.0, 800, 420);
    vp.pan_by(15.0);
    assert!(vp.is_full_extent());
}

#[wasm_bindgen_test]
fn set_domain_discards_previous_zoom() {
    let mut vp = zoomed(20.0, 40.0);
    vp.set_domain(500.0, 900.0);
    assert_eq!(vp.visible_start, 500.0);
    assert_eq!(vp.visible_end, 900.0);
    assert!(vp.is_full_extent());
}
