#![cfg(feature = "render")]
use market_analytics_wasm::presentation::MarketAnalyticsApi;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn install_canvas(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
fn demo_market_renders_and_reacts_to_gestures() {
    install_canvas("price-it");
    install_canvas("volume-it");

    let mut api = MarketAnalyticsApi::new(
        "price-it".to_string(),
        "volume-it".to_string(),
        800,
        420,
        220,
    );
    api.load_demo_data();
    assert_eq!(api.players().length(), 3);

    assert!(api.handle_wheel("price", 1.0, 400.0).unwrap());
    assert!(api.begin_drag("price", 400.0, true).unwrap());
    assert!(api.drag_to("price", 300.0, true).unwrap());
    api.end_drag("price").unwrap();
    assert!(api.reset_view("price").unwrap());

    let viewport: serde_json::Value =
        serde_json::from_str(&api.viewport_json("price").unwrap()).unwrap();
    assert_eq!(viewport["visible_start"], viewport["domain_start"]);
}
