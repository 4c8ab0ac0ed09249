pub use super::value_objects::{PlayerName, Price, ShareCount, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain entity - a completed trade in one tradeable player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub player: PlayerName,
    pub price: Price,
    pub shares: ShareCount,
    pub timestamp: Timestamp,
}

impl Trade {
    pub fn new(player: PlayerName, price: Price, shares: ShareCount, timestamp: Timestamp) -> Self {
        Self { player, price, shares, timestamp }
    }
}

/// One point of a chart series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Domain entity - a named, time-ordered sequence of (timestamp, value) points
/// for one player. Values are prices for the line chart and traded share
/// counts for the volume chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: PlayerName,
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(name: PlayerName) -> Self {
        Self { name, points: Vec::new() }
    }

    /// Build a series from unordered points; ordering by time is restored here.
    pub fn from_points(name: PlayerName, mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { name, points }
    }

    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point while keeping time order. Points sharing a timestamp
    /// are kept in arrival order (several trades can land in the same
    /// millisecond).
    pub fn push(&mut self, point: SeriesPoint) {
        match self.points.last() {
            Some(last) if point.timestamp < last.timestamp => {
                let pos = self
                    .points
                    .partition_point(|p| p.timestamp <= point.timestamp);
                self.points.insert(pos, point);
            }
            _ => self.points.push(point),
        }
    }

    /// First and last timestamps of the series.
    pub fn time_bounds(&self) -> Option<(Timestamp, Timestamp)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    /// Smallest and largest value over the whole series.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.value, p.value)),
            Some((lo, hi)) => Some((lo.min(p.value), hi.max(p.value))),
        })
    }

    /// Points whose timestamps fall inside `[start, end]` (in milliseconds).
    pub fn points_in(&self, start: f64, end: f64) -> &[SeriesPoint] {
        let from = self.points.partition_point(|p| p.timestamp.as_f64() < start);
        let to = self.points.partition_point(|p| p.timestamp.as_f64() <= end);
        &self.points[from..to]
    }

    /// Point whose timestamp is closest to `time` (in milliseconds).
    pub fn nearest(&self, time: f64) -> Option<&SeriesPoint> {
        if self.points.is_empty() {
            return None;
        }
        let idx = self.points.partition_point(|p| p.timestamp.as_f64() < time);
        let after = self.points.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.points.get(i));
        match (before, after) {
            (Some(b), Some(a)) => {
                if (time - b.timestamp.as_f64()).abs() <= (a.timestamp.as_f64() - time).abs() {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }

    /// Smallest positive gap between consecutive points, in milliseconds.
    pub fn min_spacing(&self) -> Option<f64> {
        self.points
            .windows(2)
            .map(|w| w[1].timestamp.as_f64() - w[0].timestamp.as_f64())
            .filter(|gap| *gap > 0.0)
            .fold(None, |acc, gap| match acc {
                None => Some(gap),
                Some(min) => Some(min.min(gap)),
            })
    }
}

/// One price level of the order book depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderLevel {
    pub price: Price,
    pub shares: ShareCount,
}

impl OrderLevel {
    pub fn new(price: Price, shares: ShareCount) -> Self {
        Self { price, shares }
    }
}

/// Top-of-book depth: best bids first, best asks first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderBookDepth {
    pub bids: Vec<OrderLevel>,
    pub asks: Vec<OrderLevel>,
}

/// Per-player metrics as served by the market-metrics endpoint.
/// Statistics are `None` until the player has at least one recorded trade.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMetrics {
    pub last_price: Option<Price>,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub avg_price: Option<Price>,
    pub high_price: Option<Price>,
    pub low_price: Option<Price>,
    pub total_volume: u64,
    pub highest_bid: Option<Price>,
    pub lowest_ask: Option<Price>,
    pub spread: Option<f64>,
    pub transaction_count: usize,
    pub price_history: Series,
    pub volume_history: Series,
    pub order_book: OrderBookDepth,
}

impl PlayerMetrics {
    /// Metrics of a player with no trades and no open orders yet.
    pub fn empty(player: PlayerName) -> Self {
        Self {
            last_price: None,
            price_change: 0.0,
            price_change_percent: 0.0,
            avg_price: None,
            high_price: None,
            low_price: None,
            total_volume: 0,
            highest_bid: None,
            lowest_ask: None,
            spread: None,
            transaction_count: 0,
            price_history: Series::new(player.clone()),
            volume_history: Series::new(player),
            order_book: OrderBookDepth::default(),
        }
    }

    pub fn has_trades(&self) -> bool {
        self.transaction_count > 0
    }
}

/// Aggregate counters across the whole game market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_trades: usize,
    pub total_volume: u64,
    pub active_players: usize,
}

/// Full decoded payload of one analytics refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub metrics: BTreeMap<PlayerName, PlayerMetrics>,
    pub overview: MarketOverview,
}

impl MarketSnapshot {
    pub fn empty() -> Self {
        Self { metrics: BTreeMap::new(), overview: MarketOverview::default() }
    }

    /// Player names in stable (alphabetical) order for selectors and legends.
    pub fn players(&self) -> impl Iterator<Item = &PlayerName> {
        self.metrics.keys()
    }

    pub fn get(&self, player: &PlayerName) -> Option<&PlayerMetrics> {
        self.metrics.get(player)
    }

    /// First player that already has trades, falling back to the first player.
    pub fn default_player(&self) -> Option<&PlayerName> {
        self.metrics
            .iter()
            .find(|(_, m)| m.has_trades())
            .map(|(name, _)| name)
            .or_else(|| self.metrics.keys().next())
    }
}
