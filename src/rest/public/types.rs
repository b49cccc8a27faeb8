//! Types for public REST API endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{TimestampMilliSeconds, serde_as};
use time::OffsetDateTime;

use crate::types::KlineInterval;

/// Order book depths offered by the venue.
pub const DEPTH_LIMITS: &[u32] = &[10, 20, 50, 100, 1000];
/// Depth used when an unsupported one is requested.
pub const DEFAULT_DEPTH_LIMIT: u32 = 10;
/// Kline page sizes offered by the venue.
pub const KLINE_LIMITS: &[u32] = &[500, 1500];
/// Kline page size used when an unsupported one is requested.
pub const DEFAULT_KLINE_LIMIT: u32 = 500;
/// Trade page sizes offered by the venue.
pub const TRADE_LIMITS: &[u32] = &[100, 500];
/// Trade page size used when an unsupported one is requested.
pub const DEFAULT_TRADE_LIMIT: u32 = 100;
/// Underlying queried by default for the index price.
pub const DEFAULT_UNDERLYING: &str = "BTCUSDT";

/// Server time response.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Current server time.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub server_time: OffsetDateTime,
}

impl ServerTime {
    /// Server time in milliseconds since the UNIX epoch.
    pub fn unix_millis(&self) -> i64 {
        (self.server_time.unix_timestamp_nanos() / 1_000_000) as i64
    }
}

/// Request parameters for the order book.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBookRequest {
    /// Option symbol, e.g. `BTC-210129-40000-C`.
    pub symbol: String,
    /// Depth, one of [`DEPTH_LIMITS`]; anything else falls back to
    /// [`DEFAULT_DEPTH_LIMIT`].
    pub limit: u32,
}

impl OrderBookRequest {
    /// Create a request with the default depth.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Set the depth.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Request parameters for klines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KlinesRequest {
    /// Option symbol.
    pub symbol: String,
    /// Candle interval.
    pub interval: KlineInterval,
    /// Start of the window, milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// End of the window, milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Page size, one of [`KLINE_LIMITS`].
    pub limit: u32,
}

impl KlinesRequest {
    /// Create a request for the latest candles.
    pub fn new(symbol: impl Into<String>, interval: KlineInterval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            start_time: None,
            end_time: None,
            limit: DEFAULT_KLINE_LIMIT,
        }
    }

    /// Restrict the time window.
    pub fn between(mut self, start_time: Option<i64>, end_time: Option<i64>) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Request parameters for recent trades.
#[derive(Debug, Clone, Serialize)]
pub struct RecentTradesRequest {
    /// Option symbol.
    pub symbol: String,
    /// Page size, one of [`TRADE_LIMITS`].
    pub limit: u32,
}

impl RecentTradesRequest {
    /// Create a request with the default page size.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: DEFAULT_TRADE_LIMIT,
        }
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Request parameters for historical trades.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalTradesRequest {
    /// Option symbol.
    pub symbol: String,
    /// Trade id to start from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<u64>,
    /// Page size, one of [`TRADE_LIMITS`].
    pub limit: u32,
}

impl HistoricalTradesRequest {
    /// Create a request for the most recent page.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            from_id: None,
            limit: DEFAULT_TRADE_LIMIT,
        }
    }

    /// Start from the given trade id.
    pub fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}
