//! Common domain types for the Binance Options API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// The wire value of the side.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type for trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Limit order - rests at the given price, needs a time in force
    Limit,
    /// Market order - executes immediately, never carries a price
    Market,
    /// Stop order - triggers once the stop price is reached
    Stop,
}

impl OrderType {
    /// The wire value of the order type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::Stop => "STOP",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till canceled (default)
    #[default]
    GTC,
    /// Immediate or cancel - fill what's possible immediately, cancel rest
    IOC,
    /// Fill or kill - fill completely or not at all
    FOK,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TimeInForce::GTC => "GTC",
            TimeInForce::IOC => "IOC",
            TimeInForce::FOK => "FOK",
        };
        f.write_str(s)
    }
}

/// Kline (candlestick) interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlineInterval {
    /// 1 minute
    #[serde(rename = "1m")]
    Min1,
    /// 3 minutes
    #[serde(rename = "3m")]
    Min3,
    /// 5 minutes
    #[serde(rename = "5m")]
    Min5,
    /// 15 minutes
    #[serde(rename = "15m")]
    Min15,
    /// 30 minutes
    #[serde(rename = "30m")]
    Min30,
    /// 1 hour
    #[serde(rename = "1h")]
    Hour1,
    /// 2 hours
    #[serde(rename = "2h")]
    Hour2,
    /// 4 hours
    #[serde(rename = "4h")]
    Hour4,
    /// 6 hours
    #[serde(rename = "6h")]
    Hour6,
    /// 12 hours
    #[serde(rename = "12h")]
    Hour12,
    /// 1 day
    #[serde(rename = "1d")]
    Day1,
    /// 3 days
    #[serde(rename = "3d")]
    Day3,
    /// 1 week
    #[serde(rename = "1w")]
    Week1,
}

impl KlineInterval {
    /// The wire value of the interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            KlineInterval::Min1 => "1m",
            KlineInterval::Min3 => "3m",
            KlineInterval::Min5 => "5m",
            KlineInterval::Min15 => "15m",
            KlineInterval::Min30 => "30m",
            KlineInterval::Hour1 => "1h",
            KlineInterval::Hour2 => "2h",
            KlineInterval::Hour4 => "4h",
            KlineInterval::Hour6 => "6h",
            KlineInterval::Hour12 => "12h",
            KlineInterval::Day1 => "1d",
            KlineInterval::Day3 => "3d",
            KlineInterval::Week1 => "1w",
        }
    }
}

impl std::fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
