use crate::domain::market_data::{
    MarketOverview, OrderBookDepth, OrderLevel, PlayerMetrics, PlayerName, Price, Series,
    SeriesPoint, Timestamp, Trade,
};
use std::collections::BTreeMap;

/// Milliseconds per volume bucket; the backend groups traded volume by hour.
pub const VOLUME_BUCKET_MS: u64 = 60 * 60 * 1000;

/// Order book depth shown per side, matching the backend's top-10 cut.
const ORDER_BOOK_DEPTH: usize = 10;

/// Summary statistics over one player's trade history.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub last_price: Option<Price>,
    pub avg_price: Option<Price>,
    pub high_price: Option<Price>,
    pub low_price: Option<Price>,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub total_volume: u64,
    pub transaction_count: usize,
}

impl PriceSummary {
    fn empty() -> Self {
        Self {
            last_price: None,
            avg_price: None,
            high_price: None,
            low_price: None,
            price_change: 0.0,
            price_change_percent: 0.0,
            total_volume: 0,
            transaction_count: 0,
        }
    }
}

/// Domain service rebuilding per-player market metrics from raw trades.
///
/// The backend precomputes the same values server-side; this service exists
/// for the offline/demo path and as the reference the decoded payload is
/// checked against in tests.
pub struct MarketAnalysisService;

impl MarketAnalysisService {
    pub fn new() -> Self {
        Self
    }

    /// Price history of one player: a point per trade, in trade order.
    pub fn price_series(&self, player: &PlayerName, trades: &[Trade]) -> Series {
        let points = trades
            .iter()
            .filter(|t| &t.player == player)
            .map(|t| SeriesPoint::new(t.timestamp, t.price.value()))
            .collect();
        Series::from_points(player.clone(), points)
    }

    /// Traded volume of one player grouped into hourly buckets.
    pub fn volume_series(&self, player: &PlayerName, trades: &[Trade]) -> Series {
        let mut buckets: BTreeMap<u64, u64> = BTreeMap::new();
        for trade in trades.iter().filter(|t| &t.player == player) {
            let bucket = trade.timestamp.value() / VOLUME_BUCKET_MS * VOLUME_BUCKET_MS;
            *buckets.entry(bucket).or_insert(0) += u64::from(trade.shares.value());
        }
        let points = buckets
            .into_iter()
            .map(|(ts, shares)| SeriesPoint::new(Timestamp::from_millis(ts), shares as f64))
            .collect();
        Series::from_points(player.clone(), points)
    }

    /// Last/avg/high/low price, change since the first trade, and volume
    /// totals over a chronological trade slice of a single player.
    pub fn summarize(&self, trades: &[Trade]) -> PriceSummary {
        if trades.is_empty() {
            return PriceSummary::empty();
        }

        let prices: Vec<f64> = trades.iter().map(|t| t.price.value()).collect();
        let first = prices[0];
        let last = prices[prices.len() - 1];
        let high = prices.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let low = prices.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let avg = prices.iter().sum::<f64>() / prices.len() as f64;
        let total_volume: u64 = trades.iter().map(|t| u64::from(t.shares.value())).sum();

        let (price_change, price_change_percent) = if trades.len() > 1 {
            let change = last - first;
            let percent = if first > 0.0 { change / first * 100.0 } else { 0.0 };
            (change, percent)
        } else {
            (0.0, 0.0)
        };

        PriceSummary {
            last_price: Some(Price::from(last)),
            avg_price: Some(Price::from(avg)),
            high_price: Some(Price::from(high)),
            low_price: Some(Price::from(low)),
            price_change,
            price_change_percent,
            total_volume,
            transaction_count: trades.len(),
        }
    }

    /// Best bid is the highest open buy price.
    pub fn best_bid(&self, bids: &[OrderLevel]) -> Option<Price> {
        bids.iter()
            .map(|level| level.price.value())
            .fold(None, |acc, p| match acc {
                None => Some(p),
                Some(best) => Some(best.max(p)),
            })
            .map(Price::from)
    }

    /// Best ask is the lowest open sell price.
    pub fn best_ask(&self, asks: &[OrderLevel]) -> Option<Price> {
        asks.iter()
            .map(|level| level.price.value())
            .fold(None, |acc, p| match acc {
                None => Some(p),
                Some(best) => Some(best.min(p)),
            })
            .map(Price::from)
    }

    /// Spread exists only while both sides of the book are populated.
    pub fn spread(&self, highest_bid: Option<Price>, lowest_ask: Option<Price>) -> Option<f64> {
        match (highest_bid, lowest_ask) {
            (Some(bid), Some(ask)) => Some(ask.value() - bid.value()),
            _ => None,
        }
    }

    /// Full per-player metrics from the game's trade log and the player's
    /// open order levels.
    pub fn player_metrics(
        &self,
        player: &PlayerName,
        trades: &[Trade],
        bids: &[OrderLevel],
        asks: &[OrderLevel],
    ) -> PlayerMetrics {
        let player_trades: Vec<Trade> = trades
            .iter()
            .filter(|t| &t.player == player)
            .cloned()
            .collect();
        let summary = self.summarize(&player_trades);
        let highest_bid = self.best_bid(bids);
        let lowest_ask = self.best_ask(asks);

        let mut sorted_bids = bids.to_vec();
        sorted_bids.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(std::cmp::Ordering::Equal));
        sorted_bids.truncate(ORDER_BOOK_DEPTH);
        let mut sorted_asks = asks.to_vec();
        sorted_asks.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));
        sorted_asks.truncate(ORDER_BOOK_DEPTH);

        PlayerMetrics {
            last_price: summary.last_price,
            price_change: summary.price_change,
            price_change_percent: summary.price_change_percent,
            avg_price: summary.avg_price,
            high_price: summary.high_price,
            low_price: summary.low_price,
            total_volume: summary.total_volume,
            spread: self.spread(highest_bid, lowest_ask),
            highest_bid,
            lowest_ask,
            transaction_count: summary.transaction_count,
            price_history: self.price_series(player, trades),
            volume_history: self.volume_series(player, trades),
            order_book: OrderBookDepth { bids: sorted_bids, asks: sorted_asks },
        }
    }

    /// Aggregate counters across the whole market.
    pub fn market_overview(&self, trades: &[Trade], active_players: usize) -> MarketOverview {
        MarketOverview {
            total_trades: trades.len(),
            total_volume: trades.iter().map(|t| u64::from(t.shares.value())).sum(),
            active_players,
        }
    }
}

impl Default for MarketAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain service validating incoming trade data
#[derive(Clone)]
pub struct TradeValidationService;

impl TradeValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate one trade with a descriptive error
    pub fn validate_trade(&self, trade: &Trade) -> Result<(), String> {
        if trade.player.value().is_empty() {
            return Err("Trade is missing a player name".to_string());
        }
        if !trade.price.value().is_finite() {
            return Err("Trade price must be a finite number".to_string());
        }
        if trade.price.value() <= 0.0 {
            return Err("Trade price must be positive".to_string());
        }
        if trade.shares.value() == 0 {
            return Err("Trade must move at least one share".to_string());
        }
        Ok(())
    }

    /// Validate a trade log slice. Timestamps must be non-decreasing; several
    /// trades may settle within the same millisecond.
    pub fn validate_trade_sequence(&self, trades: &[Trade]) -> Result<(), String> {
        for (i, pair) in trades.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(format!(
                    "Trades are not in chronological order at index {}",
                    i + 1
                ));
            }
        }
        Ok(())
    }
}

impl Default for TradeValidationService {
    fn default() -> Self {
        Self::new()
    }
}
