use crate::domain::chart::{Chart, ChartKind};
use crate::domain::errors::NetworkResult;
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::market_data::{
    MarketSnapshot, OrderLevel, PlayerName, Price, Series, ShareCount, Timestamp, Trade,
    services::{MarketAnalysisService, TradeValidationService},
};
use crate::infrastructure::http::MarketMetricsClient;

/// Application service mediating between the metrics backend and the charts.
/// Shared by the Leptos view and the plain-JS embedding API.
pub struct AnalyticsService {
    client: MarketMetricsClient,
    analysis: MarketAnalysisService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            client: MarketMetricsClient::new(),
            analysis: MarketAnalysisService::new(),
        }
    }

    pub fn with_client(client: MarketMetricsClient) -> Self {
        Self { client, analysis: MarketAnalysisService::new() }
    }

    /// Fetch one analytics snapshot for a participant token.
    pub async fn load_snapshot(&self, token: &str) -> NetworkResult<MarketSnapshot> {
        let snapshot = self.client.fetch_snapshot(token).await?;

        get_logger().debug(
            LogComponent::Application("Analytics"),
            &format!(
                "Snapshot applied: {} players tracked, {} with trades",
                snapshot.metrics.len(),
                snapshot.metrics.values().filter(|m| m.has_trades()).count()
            ),
        );

        Ok(snapshot)
    }

    /// The series a chart of `kind` displays for `player`.
    pub fn chart_series(
        snapshot: &MarketSnapshot,
        player: &PlayerName,
        kind: ChartKind,
    ) -> Vec<Series> {
        let Some(metrics) = snapshot.get(player) else {
            return Vec::new();
        };
        match kind {
            ChartKind::PriceLine => vec![metrics.price_history.clone()],
            ChartKind::VolumeBars => vec![metrics.volume_history.clone()],
        }
    }

    /// Load `player`'s data into a chart; an unknown player or one without
    /// trades leaves the chart empty on its full default viewport.
    pub fn apply_to_chart(snapshot: &MarketSnapshot, player: &PlayerName, chart: &mut Chart) {
        chart.set_series(Self::chart_series(snapshot, player, chart.kind));
    }

    /// Deterministic snapshot mirroring the backend's test-game seeder:
    /// three tradeable players, two weeks of trades, drifting prices.
    /// Serves the standalone demo page and the integration tests.
    pub fn demo_snapshot(&self) -> MarketSnapshot {
        let players = [
            PlayerName::from("Alice"),
            PlayerName::from("Bob"),
            PlayerName::from("Charlie"),
        ];
        let base_prices = [10.0_f64, 10.0, 10.0];
        let start_ms: u64 = 1_700_000_000_000;
        let hour = 60 * 60 * 1000;

        let validation = TradeValidationService::new();
        let mut rng = DemoRng::new(0x5eed);
        let mut trades = Vec::new();
        for day in 0..14u64 {
            let trades_today = 5 + (rng.next() % 6) as u64;
            for _ in 0..trades_today {
                let idx = (rng.next() as usize) % players.len();
                // +/- 20% around a slowly rising base, as in the seeder.
                let drift = 1.0 + day as f64 * 0.01;
                let variation = 0.8 + 0.4 * rng.next_unit();
                let price = (base_prices[idx] * drift * variation * 100.0).round() / 100.0;
                let at = start_ms + day * 24 * hour + (rng.next() as u64 % (24 * hour));
                let trade = Trade::new(
                    players[idx].clone(),
                    Price::from(price),
                    ShareCount::from(1 + (rng.next() % 5)),
                    Timestamp::from_millis(at),
                );
                debug_assert!(validation.validate_trade(&trade).is_ok());
                trades.push(trade);
            }
        }
        trades.sort_by_key(|t| t.timestamp);

        let mut snapshot = MarketSnapshot::empty();
        for player in &players {
            let bids = [
                OrderLevel::new(Price::from(9.4), ShareCount::from(3)),
                OrderLevel::new(Price::from(9.1), ShareCount::from(5)),
            ];
            let asks = [
                OrderLevel::new(Price::from(10.6), ShareCount::from(2)),
                OrderLevel::new(Price::from(11.0), ShareCount::from(4)),
            ];
            snapshot.metrics.insert(
                player.clone(),
                self.analysis.player_metrics(player, &trades, &bids, &asks),
            );
        }
        snapshot.overview = self.analysis.market_overview(&trades, players.len());
        snapshot
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Tiny xorshift generator so the demo data is stable across runs.
struct DemoRng(u32);

impl DemoRng {
    fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn next_unit(&mut self) -> f64 {
        f64::from(self.next() % 10_000) / 10_000.0
    }
}
