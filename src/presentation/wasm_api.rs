use js_sys::Array;
use serde::Serialize;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

use crate::application::AnalyticsService;
use crate::domain::{
    chart::{Chart, ChartKind, InteractionController},
    logging::{LogComponent, get_logger},
    market_data::{MarketSnapshot, PlayerName},
};
use crate::infrastructure::http::dto::MarketMetricsResponse;
use crate::infrastructure::rendering::CanvasChartRenderer;

/// WASM API for driving the analytics charts from plain JavaScript.
///
/// The existing dashboard page already polls the metrics endpoint itself, so
/// this facade takes the fetched JSON payload as-is (`setMetricsJson`) and
/// only owns the chart state and gesture handling. Minimal logic here - just
/// a bridge to the application layer.
#[wasm_bindgen]
pub struct MarketAnalyticsApi {
    service: AnalyticsService,
    snapshot: MarketSnapshot,
    selected: Option<PlayerName>,
    price_chart: Chart,
    volume_chart: Chart,
    price_controller: InteractionController,
    volume_controller: InteractionController,
    price_renderer: CanvasChartRenderer,
    volume_renderer: CanvasChartRenderer,
}

/// Viewport readback for JS callers, serialized as JSON.
#[derive(Serialize)]
struct ViewportDto {
    domain_start: f64,
    domain_end: f64,
    visible_start: f64,
    visible_end: f64,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl MarketAnalyticsApi {
    #[wasm_bindgen(constructor)]
    pub fn new(
        price_canvas_id: String,
        volume_canvas_id: String,
        width: u32,
        price_height: u32,
        volume_height: u32,
    ) -> Self {
        Self {
            service: AnalyticsService::new(),
            snapshot: MarketSnapshot::empty(),
            selected: None,
            price_chart: Chart::new(
                price_canvas_id.clone(),
                ChartKind::PriceLine,
                width,
                price_height,
            ),
            volume_chart: Chart::new(
                volume_canvas_id.clone(),
                ChartKind::VolumeBars,
                width,
                volume_height,
            ),
            price_controller: InteractionController::default(),
            volume_controller: InteractionController::default(),
            price_renderer: CanvasChartRenderer::new(price_canvas_id, width, price_height),
            volume_renderer: CanvasChartRenderer::new(volume_canvas_id, width, volume_height),
        }
    }

    /// Feed one `/api/market-metrics/<token>` payload into the charts.
    #[wasm_bindgen(js_name = setMetricsJson)]
    pub fn set_metrics_json(&mut self, json: &str) -> Result<(), JsValue> {
        let response: MarketMetricsResponse = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid metrics payload: {}", e)))?;
        let snapshot = response
            .into_domain()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        if self.selected.is_none()
            || self
                .selected
                .as_ref()
                .map(|p| !snapshot.metrics.contains_key(p))
                .unwrap_or(false)
        {
            self.selected = snapshot.default_player().cloned();
        }
        self.snapshot = snapshot;

        get_logger().info(
            LogComponent::Presentation("WasmApi"),
            &format!(
                "📥 Metrics payload applied: {} players, {} trades",
                self.snapshot.metrics.len(),
                self.snapshot.overview.total_trades
            ),
        );

        self.reload_charts();
        Ok(())
    }

    /// Seed the charts with the built-in two-week demo market.
    #[wasm_bindgen(js_name = loadDemoData)]
    pub fn load_demo_data(&mut self) {
        self.snapshot = self.service.demo_snapshot();
        self.selected = self.snapshot.default_player().cloned();
        self.reload_charts();
    }

    /// Tradeable player names in display order.
    pub fn players(&self) -> Array {
        self.snapshot
            .players()
            .map(|p| JsValue::from_str(p.value()))
            .collect()
    }

    #[wasm_bindgen(js_name = selectPlayer)]
    pub fn select_player(&mut self, name: &str) -> Result<(), JsValue> {
        let player = PlayerName::from(name);
        if !self.snapshot.metrics.contains_key(&player) {
            return Err(JsValue::from_str(&format!("Unknown player: {}", name)));
        }
        self.selected = Some(player);
        self.reload_charts();
        Ok(())
    }

    /// Wheel gesture on one chart. Positive notches zoom in. `target` is
    /// `"price"` or `"volume"`. Returns whether the viewport changed.
    #[wasm_bindgen(js_name = handleWheel)]
    pub fn handle_wheel(
        &mut self,
        target: &str,
        notches: f64,
        pointer_x: f64,
    ) -> Result<bool, JsValue> {
        let kind = parse_target(target)?;
        let changed = match kind {
            ChartKind::PriceLine => {
                self.price_controller
                    .zoom(&mut self.price_chart, notches, pointer_x)
            }
            ChartKind::VolumeBars => {
                self.volume_controller
                    .zoom(&mut self.volume_chart, notches, pointer_x)
            }
        };
        if changed {
            self.redraw(kind);
        }
        Ok(changed)
    }

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(
        &mut self,
        target: &str,
        pointer_x: f64,
        modifier_held: bool,
    ) -> Result<bool, JsValue> {
        let kind = parse_target(target)?;
        Ok(match kind {
            ChartKind::PriceLine => self.price_controller.begin_drag(pointer_x, modifier_held),
            ChartKind::VolumeBars => self.volume_controller.begin_drag(pointer_x, modifier_held),
        })
    }

    #[wasm_bindgen(js_name = dragTo)]
    pub fn drag_to(
        &mut self,
        target: &str,
        pointer_x: f64,
        modifier_held: bool,
    ) -> Result<bool, JsValue> {
        let kind = parse_target(target)?;
        let changed = match kind {
            ChartKind::PriceLine => {
                self.price_controller
                    .drag_to(&mut self.price_chart, pointer_x, modifier_held)
            }
            ChartKind::VolumeBars => {
                self.volume_controller
                    .drag_to(&mut self.volume_chart, pointer_x, modifier_held)
            }
        };
        if changed {
            self.redraw(kind);
        }
        Ok(changed)
    }

    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self, target: &str) -> Result<(), JsValue> {
        match parse_target(target)? {
            ChartKind::PriceLine => self.price_controller.end_drag(),
            ChartKind::VolumeBars => self.volume_controller.end_drag(),
        }
        Ok(())
    }

    /// Double-click reset to the full data domain.
    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view(&mut self, target: &str) -> Result<bool, JsValue> {
        let kind = parse_target(target)?;
        let changed = match kind {
            ChartKind::PriceLine => self.price_controller.reset(&mut self.price_chart),
            ChartKind::VolumeBars => self.volume_controller.reset(&mut self.volume_chart),
        };
        if changed {
            self.redraw(kind);
        }
        Ok(changed)
    }

    /// Current viewport of one chart as a JSON string.
    #[wasm_bindgen(js_name = viewportJson)]
    pub fn viewport_json(&self, target: &str) -> Result<String, JsValue> {
        let viewport = match parse_target(target)? {
            ChartKind::PriceLine => &self.price_chart.viewport,
            ChartKind::VolumeBars => &self.volume_chart.viewport,
        };
        let dto = ViewportDto {
            domain_start: viewport.domain_start,
            domain_end: viewport.domain_end,
            visible_start: viewport.visible_start,
            visible_end: viewport.visible_end,
            width: viewport.width,
            height: viewport.height,
        };
        serde_json::to_string(&dto).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn reload_charts(&mut self) {
        match &self.selected {
            Some(player) => {
                AnalyticsService::apply_to_chart(&self.snapshot, player, &mut self.price_chart);
                AnalyticsService::apply_to_chart(&self.snapshot, player, &mut self.volume_chart);
            }
            None => {
                self.price_chart.set_series(Vec::new());
                self.volume_chart.set_series(Vec::new());
            }
        }
        self.redraw(ChartKind::PriceLine);
        self.redraw(ChartKind::VolumeBars);
    }

    fn redraw(&self, kind: ChartKind) {
        let result = match kind {
            ChartKind::PriceLine => self.price_renderer.render(&self.price_chart),
            ChartKind::VolumeBars => self.volume_renderer.render(&self.volume_chart),
        };
        if let Err(e) = result {
            get_logger().error(
                LogComponent::Presentation("WasmApi"),
                &format!("❌ Redraw failed: {}", e),
            );
        }
    }
}

fn parse_target(target: &str) -> Result<ChartKind, JsValue> {
    ChartKind::from_str(target)
        .map_err(|_| JsValue::from_str(&format!("Unknown chart target: {}", target)))
}
