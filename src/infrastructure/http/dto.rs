use crate::domain::errors::{AppError, ParseResult};
use crate::domain::market_data::{
    MarketOverview, MarketSnapshot, OrderBookDepth, OrderLevel, PlayerMetrics, PlayerName, Price,
    Series, SeriesPoint, ShareCount, Timestamp,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// DTOs mirroring the `/api/market-metrics/<token>` JSON payload.
///
/// The backend serializes timestamps as naive-UTC ISO-8601 strings (Python
/// `datetime.isoformat()`, microseconds optional) and leaves statistics as
/// `null` until a player has trades.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketMetricsResponse {
    pub metrics: HashMap<String, PlayerMetricsDto>,
    pub market_overview: MarketOverviewDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMetricsDto {
    pub last_price: Option<f64>,
    #[serde(default)]
    pub price_change: f64,
    #[serde(default)]
    pub price_change_percent: f64,
    pub avg_price: Option<f64>,
    pub high_price: Option<f64>,
    pub low_price: Option<f64>,
    #[serde(default)]
    pub total_volume: u64,
    pub highest_bid: Option<f64>,
    pub lowest_ask: Option<f64>,
    pub spread: Option<f64>,
    #[serde(default)]
    pub price_history: Vec<PricePointDto>,
    #[serde(default)]
    pub volume_history: Vec<VolumePointDto>,
    #[serde(default)]
    pub order_book: OrderBookDto,
    #[serde(default)]
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePointDto {
    pub timestamp: String,
    pub price: f64,
    pub volume: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumePointDto {
    pub timestamp: String,
    pub volume: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBookDto {
    #[serde(default)]
    pub bids: Vec<OrderLevelDto>,
    #[serde(default)]
    pub asks: Vec<OrderLevelDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLevelDto {
    pub price: f64,
    pub shares: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOverviewDto {
    pub total_trades: usize,
    pub total_volume: u64,
    pub active_players: usize,
}

/// Parse a backend timestamp into epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> ParseResult<Timestamp> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| AppError::ParseError(format!("Bad timestamp '{}': {}", raw, e)))?;
    let millis = naive.and_utc().timestamp_millis();
    if millis < 0 {
        return Err(AppError::ParseError(format!(
            "Timestamp '{}' predates the epoch",
            raw
        )));
    }
    Ok(Timestamp::from_millis(millis as u64))
}

impl OrderLevelDto {
    fn into_domain(self) -> OrderLevel {
        OrderLevel::new(Price::from(self.price), ShareCount::from(self.shares))
    }
}

impl PlayerMetricsDto {
    /// Convert the DTO into a domain metrics entry for `player`.
    pub fn into_domain(self, player: PlayerName) -> ParseResult<PlayerMetrics> {
        let mut price_points = Vec::with_capacity(self.price_history.len());
        for point in &self.price_history {
            price_points.push(SeriesPoint::new(parse_timestamp(&point.timestamp)?, point.price));
        }
        let mut volume_points = Vec::with_capacity(self.volume_history.len());
        for point in &self.volume_history {
            volume_points.push(SeriesPoint::new(
                parse_timestamp(&point.timestamp)?,
                point.volume as f64,
            ));
        }

        Ok(PlayerMetrics {
            last_price: self.last_price.map(Price::from),
            price_change: self.price_change,
            price_change_percent: self.price_change_percent,
            avg_price: self.avg_price.map(Price::from),
            high_price: self.high_price.map(Price::from),
            low_price: self.low_price.map(Price::from),
            total_volume: self.total_volume,
            highest_bid: self.highest_bid.map(Price::from),
            lowest_ask: self.lowest_ask.map(Price::from),
            spread: self.spread,
            transaction_count: self.transaction_count,
            price_history: Series::from_points(player.clone(), price_points),
            volume_history: Series::from_points(player, volume_points),
            order_book: OrderBookDepth {
                bids: self.order_book.bids.into_iter().map(OrderLevelDto::into_domain).collect(),
                asks: self.order_book.asks.into_iter().map(OrderLevelDto::into_domain).collect(),
            },
        })
    }
}

impl MarketMetricsResponse {
    pub fn into_domain(self) -> ParseResult<MarketSnapshot> {
        let mut snapshot = MarketSnapshot::empty();
        for (name, dto) in self.metrics {
            let player = PlayerName::new(name)
                .map_err(AppError::ParseError)?;
            let metrics = dto.into_domain(player.clone())?;
            snapshot.metrics.insert(player, metrics);
        }
        snapshot.overview = MarketOverview {
            total_trades: self.market_overview.total_trades,
            total_volume: self.market_overview.total_volume,
            active_players: self.market_overview.active_players,
        };
        Ok(snapshot)
    }
}
