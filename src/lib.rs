use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::application::AnalyticsService;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;
pub mod time_utils;

/// Initialize logging and panic reporting; runs once at module load.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    // Console output plus the in-page debug console.
    let logger = Box::new(app::LeptosLogger::new(
        infrastructure::services::ConsoleLogger::new_development(),
    ));
    domain::logging::init_logger(logger);

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        "🚀 Market analytics module initialized",
    );
}

/// Mount the analytics view onto the document body.
#[wasm_bindgen]
pub fn mount_analytics(token: String) {
    use crate::app::App;
    use leptos::*;

    mount_to_body(move || view! { <App token=token /> });
}

/// Mount the analytics view into an existing container element, the way the
/// trading dashboard embeds it as a tab.
#[wasm_bindgen]
pub fn mount_analytics_in(container_id: String, token: String) -> Result<(), JsValue> {
    use crate::app::App;
    use leptos::*;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let element = document
        .get_element_by_id(&container_id)
        .ok_or_else(|| JsValue::from_str(&format!("Container '{}' not found", container_id)))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| JsValue::from_str("Container is not an HTML element"))?;

    mount_to(element, move || view! { <App token=token /> });
    Ok(())
}

/// Smoke test for the metrics endpoint: fetch one snapshot and log what the
/// charts would show.
#[wasm_bindgen]
pub async fn load_market_metrics(token: String) -> Result<(), JsValue> {
    get_logger().info(
        LogComponent::Infrastructure("Smoke"),
        "🧪 Testing market metrics loading...",
    );

    let service = AnalyticsService::new();
    match service.load_snapshot(&token).await {
        Ok(snapshot) => {
            get_logger().info(
                LogComponent::Infrastructure("Smoke"),
                &format!(
                    "✅ Snapshot loaded: {} trades, {} shares, {} players",
                    snapshot.overview.total_trades,
                    snapshot.overview.total_volume,
                    snapshot.overview.active_players
                ),
            );

            if let Some(player) = snapshot.default_player() {
                if let Some(metrics) = snapshot.get(player) {
                    let last = metrics
                        .last_price
                        .map(|p| format!("${:.2}", p.value()))
                        .unwrap_or_else(|| "n/a".to_string());
                    get_logger().info(
                        LogComponent::Infrastructure("Smoke"),
                        &format!(
                            "📊 {}: last {} ({:+.2}%), {} trades, {} points in price history",
                            player.value(),
                            last,
                            metrics.price_change_percent,
                            metrics.transaction_count,
                            metrics.price_history.len()
                        ),
                    );
                }
            }

            Ok(())
        }
        Err(e) => {
            get_logger().error(
                LogComponent::Infrastructure("Smoke"),
                &format!("❌ Failed to load market metrics: {}", e),
            );
            Err(JsValue::from_str(&e.to_string()))
        }
    }
}
