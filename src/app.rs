use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    application::AnalyticsService,
    domain::{
        chart::{Chart, ChartKind, HoverPoint, InteractionController},
        logging::{LogComponent, LogEntry, Logger, get_logger, get_time_provider},
    },
    global_state::{globals, selected_player_signal, snapshot_signal, tooltip_data_signal, tooltip_visible_signal},
    infrastructure::rendering::CanvasChartRenderer,
    infrastructure::services::ConsoleLogger,
};

/// How often the view re-polls the market-metrics endpoint.
const REFRESH_INTERVAL_MS: u32 = 5_000;

// 🔗 Global signals for the debug console (bridge to domain::logging)
thread_local! {
    static GLOBAL_LOGS: RwSignal<Vec<String>> = create_rw_signal(Vec::new());
    static IS_LOG_PAUSED: RwSignal<bool> = create_rw_signal(false);
}

/// 🎯 Tooltip payload for the data point under the pointer
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipData {
    pub chart_id: &'static str,
    pub x: f64,
    pub y: f64,
    pub formatted_text: String,
}

impl TooltipData {
    pub fn new(chart_id: &'static str, kind: ChartKind, hover: HoverPoint, x: f64, y: f64) -> Self {
        let when = format_tooltip_time(hover.timestamp.value());
        let formatted_text = match kind {
            ChartKind::PriceLine => format!(
                "{}\n🕑 {}\n💰 Price: ${:.2}",
                hover.player.value(),
                when,
                hover.value
            ),
            ChartKind::VolumeBars => format!(
                "{}\n🕑 {}\n📊 Volume: {:.0} shares",
                hover.player.value(),
                when,
                hover.value
            ),
        };
        Self { chart_id, x, y, formatted_text }
    }
}

fn format_tooltip_time(timestamp: u64) -> String {
    use chrono::{DateTime, Datelike, Timelike};
    match DateTime::from_timestamp_millis(timestamp as i64) {
        Some(date) => format!(
            "{:02}.{:02} {:02}:{:02}:{:02}",
            date.day(),
            date.month(),
            date.hour(),
            date.minute(),
            date.second()
        ),
        None => String::from("--"),
    }
}

/// 🌉 Bridge logger: mirrors every entry into the debug console signals and
/// forwards it to the browser console.
pub struct LeptosLogger {
    inner: ConsoleLogger,
}

impl LeptosLogger {
    pub fn new(inner: ConsoleLogger) -> Self {
        Self { inner }
    }
}

impl Logger for LeptosLogger {
    fn log(&self, entry: LogEntry) {
        let timestamp_str = get_time_provider().format_timestamp(entry.timestamp);
        let formatted = format!(
            "[{}] {} {}: {}",
            timestamp_str, entry.level, entry.component, entry.message
        );

        GLOBAL_LOGS.with(|logs| {
            IS_LOG_PAUSED.with(|paused| {
                if !paused.get_untracked() {
                    logs.update(|log_vec| {
                        log_vec.push(formatted);
                        while log_vec.len() > 100 {
                            log_vec.remove(0);
                        }
                    });
                }
            });
        });

        self.inner.log(entry);
    }
}

/// 🦀 Market Analytics root component
#[component]
pub fn App(token: String) -> impl IntoView {
    start_refresh_loop(token);

    view! {
        <style>
            {r#"
            .market-analytics {
                font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
                background: linear-gradient(135deg, #1e3c72 0%, #2a5298 100%);
                min-height: 100vh;
                width: 100%;
                max-width: none;
                padding: 20px;
                box-sizing: border-box;
                color: white;
            }

            .header {
                text-align: center;
                margin-bottom: 20px;
                background: rgba(255, 255, 255, 0.1);
                backdrop-filter: blur(10px);
                padding: 20px;
                border-radius: 15px;
                border: 1px solid rgba(255, 255, 255, 0.2);
            }

            .stat-row {
                display: flex;
                justify-content: center;
                gap: 40px;
                margin-top: 15px;
            }

            .stat-item {
                text-align: center;
            }

            .stat-value {
                font-size: 24px;
                font-weight: 700;
                color: #72c685;
                font-family: 'Courier New', monospace;
                text-shadow: 0 0 10px rgba(114, 198, 133, 0.3);
            }

            .stat-label {
                font-size: 12px;
                color: #a0a0a0;
                margin-top: 5px;
            }

            .player-tabs {
                display: flex;
                justify-content: center;
                gap: 8px;
                margin-bottom: 16px;
                flex-wrap: wrap;
            }

            .player-tab {
                background: rgba(255, 255, 255, 0.08);
                color: #d0d8e8;
                border: 1px solid rgba(255, 255, 255, 0.2);
                padding: 7px 16px;
                border-radius: 16px;
                cursor: pointer;
                font-size: 13px;
            }

            .player-tab:hover {
                background: rgba(255, 255, 255, 0.18);
            }

            .player-tab.active {
                background: #72c685;
                color: #10241a;
                font-weight: 700;
            }

            .charts {
                display: flex;
                flex-direction: column;
                align-items: center;
                gap: 14px;
                margin-bottom: 20px;
            }

            .chart-wrapper {
                position: relative;
                display: inline-block;
            }

            .chart-canvas {
                border: 2px solid #4a5d73;
                border-radius: 10px;
                background: #1a1f2b;
                cursor: crosshair;
                display: block;
            }

            .tooltip {
                position: absolute;
                background: rgba(0, 0, 0, 0.9);
                color: white;
                padding: 8px 12px;
                border-radius: 6px;
                font-size: 12px;
                font-family: 'Courier New', monospace;
                white-space: pre-line;
                pointer-events: none;
                z-index: 1000;
                border: 1px solid #4a5d73;
                box-shadow: 0 4px 12px rgba(0, 0, 0, 0.5);
                line-height: 1.4;
                transform: translate(10px, -100%);
            }

            .status {
                color: #72c685;
                font-size: 13px;
                text-align: center;
            }

            .status.error {
                color: #ff6b6b;
            }

            .hint {
                color: #8a93a5;
                font-size: 12px;
                text-align: center;
                margin-top: 4px;
            }

            .debug-console {
                background: rgba(0, 0, 0, 0.8);
                border-radius: 10px;
                padding: 15px;
                max-height: 300px;
                overflow-y: auto;
                border: 1px solid #4a5d73;
            }

            .debug-header {
                display: flex;
                justify-content: space-between;
                align-items: center;
                margin-bottom: 10px;
                color: #72c685;
                font-weight: bold;
            }

            .debug-btn {
                background: #4a5d73;
                color: white;
                border: none;
                padding: 5px 10px;
                border-radius: 5px;
                cursor: pointer;
                font-size: 12px;
                margin-left: 5px;
            }

            .debug-btn:hover {
                background: #5a6d83;
            }

            .debug-log {
                font-family: 'Courier New', monospace;
                font-size: 11px;
                line-height: 1.3;
            }

            .log-line {
                color: #e0e0e0;
                margin: 2px 0;
                padding: 1px 5px;
                border-radius: 3px;
            }
            "#}
        </style>
        <div class="market-analytics">
            <OverviewHeader />
            <PlayerSelector />
            <div class="charts">
                <div class="chart-wrapper">
                    <InteractiveChart canvas_id="price-canvas" kind=ChartKind::PriceLine width=860 height=420 />
                    <ChartTooltip chart_id="price-canvas" />
                </div>
                <div class="chart-wrapper">
                    <InteractiveChart canvas_id="volume-canvas" kind=ChartKind::VolumeBars width=860 height=220 />
                    <ChartTooltip chart_id="volume-canvas" />
                </div>
                <StatusLine />
            </div>
            <DebugConsole />
        </div>
    }
}

/// 📊 Market overview header fed by the aggregate counters
#[component]
fn OverviewHeader() -> impl IntoView {
    view! {
        <div class="header">
            <h1>"📈 Market Analytics"</h1>
            <p>"Player stock performance • live from the trading floor"</p>

            <div class="stat-row">
                <div class="stat-item">
                    <div class="stat-value">
                        {move || globals().total_trades.get().to_string()}
                    </div>
                    <div class="stat-label">"Total Trades"</div>
                </div>
                <div class="stat-item">
                    <div class="stat-value">
                        {move || globals().total_volume.get().to_string()}
                    </div>
                    <div class="stat-label">"Total Volume"</div>
                </div>
                <div class="stat-item">
                    <div class="stat-value">
                        {move || globals().active_players.get().to_string()}
                    </div>
                    <div class="stat-label">"Active Players"</div>
                </div>
                <div class="stat-item">
                    <div class="stat-value">
                        {move || if globals().is_live.get() { "🟢 LIVE" } else { "🔴 OFF" }}
                    </div>
                    <div class="stat-label">"Data Feed"</div>
                </div>
            </div>
        </div>
    }
}

/// Tabs picking which tradeable player the charts show
#[component]
fn PlayerSelector() -> impl IntoView {
    let players = move || {
        snapshot_signal()
            .get()
            .players()
            .cloned()
            .collect::<Vec<_>>()
    };

    view! {
        <div class="player-tabs">
            <For
                each=players
                key=|player| player.value().to_string()
                children=move |player| {
                    let label = player.value().to_string();
                    let selected = player.clone();
                    view! {
                        <button
                            class="player-tab"
                            class:active=move || {
                                selected_player_signal().get().as_ref() == Some(&player)
                            }
                            on:click=move |_| {
                                selected_player_signal().set(Some(selected.clone()));
                                get_logger().info(
                                    LogComponent::Presentation("PlayerSelector"),
                                    &format!("👤 Switched charts to {}", selected.value()),
                                );
                            }
                        >
                            {label}
                        </button>
                    }
                }
            />
        </div>
    }
}

/// 🎨 One interactive chart canvas: renders the selected player's series and
/// owns the gesture controller for its viewport.
#[component]
fn InteractiveChart(
    canvas_id: &'static str,
    kind: ChartKind,
    width: u32,
    height: u32,
) -> impl IntoView {
    let chart = Rc::new(RefCell::new(Chart::new(canvas_id.to_string(), kind, width, height)));
    let controller = Rc::new(RefCell::new(InteractionController::default()));
    let renderer = Rc::new(CanvasChartRenderer::new(canvas_id, width, height));

    let canvas_ref = create_node_ref::<Canvas>();
    let (mounted, set_mounted) = create_signal(false);

    create_effect(move |_| {
        if canvas_ref.get().is_some() {
            set_mounted.set(true);
        }
    });

    // Reload series and redraw whenever the snapshot or the player changes.
    {
        let chart = chart.clone();
        let renderer = renderer.clone();
        create_effect(move |_| {
            if !mounted.get() {
                return;
            }
            let snapshot = snapshot_signal().get();
            let player = selected_player_signal().get();
            let mut chart = chart.borrow_mut();
            match player {
                Some(player) => AnalyticsService::apply_to_chart(&snapshot, &player, &mut chart),
                None => chart.set_series(Vec::new()),
            }
            if let Err(e) = renderer.render(&chart) {
                get_logger().error(
                    LogComponent::Presentation("Chart"),
                    &format!("❌ Render failed on {}: {}", chart.id, e),
                );
            }
        });
    }

    let on_wheel = {
        let chart = chart.clone();
        let controller = controller.clone();
        let renderer = renderer.clone();
        move |ev: web_sys::WheelEvent| {
            ev.prevent_default();
            let delta = ev.delta_y();
            if delta == 0.0 {
                return;
            }
            // Wheel up zooms in; the controller only sees signed notches.
            let notches = if delta < 0.0 { 1.0 } else { -1.0 };
            let pointer_x = f64::from(ev.offset_x());
            let changed = controller
                .borrow_mut()
                .zoom(&mut chart.borrow_mut(), notches, pointer_x);
            if changed {
                let _ = renderer.render(&chart.borrow());
            }
        }
    };

    let on_mousedown = {
        let controller = controller.clone();
        move |ev: web_sys::MouseEvent| {
            let modifier_held = {
                let controller = controller.borrow();
                controller
                    .config()
                    .pan_modifier
                    .is_held(ev.shift_key(), ev.ctrl_key(), ev.alt_key())
            };
            let began = controller
                .borrow_mut()
                .begin_drag(f64::from(ev.offset_x()), modifier_held);
            globals().is_panning.set(began);
            if began {
                tooltip_visible_signal().set(false);
            }
        }
    };

    let on_mousemove = {
        let chart = chart.clone();
        let controller = controller.clone();
        let renderer = renderer.clone();
        move |ev: web_sys::MouseEvent| {
            let pointer_x = f64::from(ev.offset_x());
            let modifier_held = {
                let controller = controller.borrow();
                controller
                    .config()
                    .pan_modifier
                    .is_held(ev.shift_key(), ev.ctrl_key(), ev.alt_key())
            };

            if controller.borrow().is_panning() {
                let changed =
                    controller
                        .borrow_mut()
                        .drag_to(&mut chart.borrow_mut(), pointer_x, modifier_held);
                if !controller.borrow().is_panning() {
                    globals().is_panning.set(false);
                }
                if changed {
                    let _ = renderer.render(&chart.borrow());
                }
                return;
            }

            // Default drag-free behavior: tooltip for the nearest data point.
            match chart.borrow().hover(pointer_x) {
                Some(hover) => {
                    let data = TooltipData::new(
                        canvas_id,
                        kind,
                        hover,
                        pointer_x,
                        f64::from(ev.offset_y()),
                    );
                    tooltip_data_signal().set(Some(data));
                    tooltip_visible_signal().set(true);
                }
                None => tooltip_visible_signal().set(false),
            }
        }
    };

    let on_mouseup = {
        let controller = controller.clone();
        move |_ev: web_sys::MouseEvent| {
            controller.borrow_mut().end_drag();
            globals().is_panning.set(false);
        }
    };

    let on_mouseleave = {
        let controller = controller.clone();
        move |_ev: web_sys::MouseEvent| {
            controller.borrow_mut().end_drag();
            globals().is_panning.set(false);
            tooltip_visible_signal().set(false);
        }
    };

    let on_dblclick = {
        let chart = chart.clone();
        let controller = controller.clone();
        let renderer = renderer.clone();
        move |_ev: web_sys::MouseEvent| {
            let changed = controller.borrow_mut().reset(&mut chart.borrow_mut());
            if changed {
                let _ = renderer.render(&chart.borrow());
                get_logger().debug(
                    LogComponent::Presentation("Chart"),
                    "🔄 Viewport reset to full extent",
                );
            }
        }
    };

    view! {
        <canvas
            id=canvas_id
            node_ref=canvas_ref
            width=width
            height=height
            class="chart-canvas"
            on:wheel=on_wheel
            on:mousedown=on_mousedown
            on:mousemove=on_mousemove
            on:mouseup=on_mouseup
            on:mouseleave=on_mouseleave
            on:dblclick=on_dblclick
        />
    }
}

/// 🎯 Tooltip box anchored inside one chart wrapper
#[component]
fn ChartTooltip(chart_id: &'static str) -> impl IntoView {
    let visible_here = move || {
        tooltip_visible_signal().get()
            && tooltip_data_signal()
                .get()
                .map(|data| data.chart_id == chart_id)
                .unwrap_or(false)
    };

    view! {
        <div
            class="tooltip"
            style:display=move || if visible_here() { "block" } else { "none" }
            style:left=move || {
                tooltip_data_signal()
                    .get()
                    .map(|data| format!("{}px", data.x))
                    .unwrap_or_else(|| "0px".to_string())
            }
            style:top=move || {
                tooltip_data_signal()
                    .get()
                    .map(|data| format!("{}px", data.y))
                    .unwrap_or_else(|| "0px".to_string())
            }
        >
            {move || {
                tooltip_data_signal()
                    .get()
                    .map(|data| data.formatted_text)
                    .unwrap_or_default()
            }}
        </div>
    }
}

#[component]
fn StatusLine() -> impl IntoView {
    view! {
        <div
            class="status"
            class:error=move || globals().last_error.get().is_some()
        >
            {move || match globals().last_error.get() {
                Some(error) => format!("❌ {}", error),
                None if globals().is_loading.get() => "⏳ Refreshing market data...".to_string(),
                None => "✅ Market data up to date".to_string(),
            }}
        </div>
        <div class="hint">
            "scroll: zoom • shift+drag: pan • double-click: reset"
        </div>
    }
}

/// 🐛 Debug console bridged to domain::logging
#[component]
fn DebugConsole() -> impl IntoView {
    let logs = GLOBAL_LOGS.with(|logs| *logs);
    let is_paused = IS_LOG_PAUSED.with(|paused| *paused);

    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"🐛 Domain Logger Console"</span>
                <button
                    on:click=move |_| {
                        is_paused.update(|p| *p = !*p);
                        if is_paused.get() {
                            get_logger().info(
                                LogComponent::Presentation("DebugConsole"),
                                "🛑 Logging paused"
                            );
                        } else {
                            get_logger().info(
                                LogComponent::Presentation("DebugConsole"),
                                "▶️ Logging resumed"
                            );
                        }
                    }
                    class="debug-btn"
                >
                    {move || if is_paused.get() { "▶️ Resume" } else { "⏸️ Pause" }}
                </button>
                <button
                    on:click=move |_| {
                        GLOBAL_LOGS.with(|logs| logs.set(Vec::new()));
                        get_logger().info(
                            LogComponent::Presentation("DebugConsole"),
                            "🗑️ Log history cleared"
                        );
                    }
                    class="debug-btn"
                >
                    "🗑️ Clear"
                </button>
            </div>
            <div class="debug-log">
                <For
                    each=move || logs.get()
                    key=|log| log.clone()
                    children=move |log| {
                        view! { <div class="log-line">{log}</div> }
                    }
                />
            </div>
        </div>
    }
}

/// 🌐 Poll the metrics endpoint and push each snapshot into the global
/// signals. Errors keep the last good snapshot on screen.
fn start_refresh_loop(token: String) {
    use futures::StreamExt;

    spawn_local(async move {
        let service = AnalyticsService::new();
        let mut ticks = gloo_timers::future::IntervalStream::new(REFRESH_INTERVAL_MS);
        get_logger().info(
            LogComponent::Application("Refresh"),
            "🚀 Starting market metrics refresh loop",
        );

        loop {
            globals().is_loading.set(true);
            match service.load_snapshot(&token).await {
                Ok(snapshot) => {
                    globals().total_trades.set(snapshot.overview.total_trades);
                    globals().total_volume.set(snapshot.overview.total_volume);
                    globals().active_players.set(snapshot.overview.active_players);
                    if globals().selected_player.get_untracked().is_none() {
                        globals()
                            .selected_player
                            .set(snapshot.default_player().cloned());
                    }
                    globals().snapshot.set(snapshot);
                    globals().is_live.set(true);
                    globals().last_error.set(None);
                }
                Err(error) => {
                    globals().is_live.set(false);
                    globals().last_error.set(Some(error.to_string()));
                    get_logger().error(
                        LogComponent::Application("Refresh"),
                        &format!("❌ Metrics refresh failed: {}", error),
                    );
                }
            }
            globals().is_loading.set(false);

            ticks.next().await;
        }
    });
}
