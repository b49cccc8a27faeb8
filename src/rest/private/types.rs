//! Types for private REST API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BinanceError;
use crate::types::{OrderSide, OrderType, Params, TimeInForce};

/// Request to place a new order.
///
/// The parameters sent depend on the order type:
/// - `LIMIT` needs a price and always carries a time in force (GTC unless set);
/// - `MARKET` never carries a price, a supplied one is dropped;
/// - `STOP` needs a stop price above zero.
///
/// # Example
///
/// ```rust
/// use binance_options_client::rest::private::NewOrderRequest;
/// use binance_options_client::types::{OrderSide, TimeInForce};
/// use rust_decimal::Decimal;
///
/// let request = NewOrderRequest::limit(
///     "BTC-210129-40000-C",
///     OrderSide::Buy,
///     Decimal::new(1, 1),
///     Decimal::new(1250, 0),
/// )
/// .time_in_force(TimeInForce::IOC);
/// ```
#[derive(Debug, Clone)]
pub struct NewOrderRequest {
    /// Option symbol.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Order quantity.
    pub quantity: Decimal,
    /// Limit price.
    pub price: Option<Decimal>,
    /// Time in force, only sent for `LIMIT` orders.
    pub time_in_force: Option<TimeInForce>,
    /// Trigger price, only sent for `STOP` orders.
    pub stop_price: Option<Decimal>,
    /// Client order id; generated by the client when absent.
    pub client_order_id: Option<String>,
    /// Receive window override.
    pub recv_window: Option<u64>,
}

impl NewOrderRequest {
    /// Create an order of any type.
    pub fn new(
        symbol: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            time_in_force: None,
            stop_price: None,
            client_order_id: None,
            recv_window: None,
        }
    }

    /// Create a limit order.
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::new(symbol, side, OrderType::Limit, quantity).price(price)
    }

    /// Create a market order.
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::new(symbol, side, OrderType::Market, quantity)
    }

    /// Create a stop order.
    pub fn stop(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self::new(symbol, side, OrderType::Stop, quantity).stop_price(stop_price)
    }

    /// Set the price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the time in force.
    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    /// Set the stop price.
    pub fn stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// Use the given client order id instead of a generated one.
    pub fn client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }

    /// Override the receive window.
    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    /// Build the order parameters, validating them for the order type.
    ///
    /// `newClientOrderId` is only set when the request carries one, and may
    /// only use letters, digits and `.:/_-`.
    pub fn to_params(&self) -> Result<Params, BinanceError> {
        let mut params = Params::new()
            .with("symbol", &self.symbol)
            .with("side", self.side)
            .with("type", self.order_type)
            .with("quantity", self.quantity);

        match self.order_type {
            OrderType::Limit => {
                let price = self.price.ok_or_else(|| {
                    BinanceError::InvalidParameter("price is required for LIMIT orders".to_string())
                })?;
                params.insert("price", price);
                params.insert("timeInForce", self.time_in_force.unwrap_or_default());
            }
            OrderType::Market => {}
            OrderType::Stop => {
                match self.stop_price {
                    Some(stop_price) if stop_price > Decimal::ZERO => {
                        params.insert("stopPrice", stop_price);
                    }
                    _ => {
                        return Err(BinanceError::InvalidParameter(
                            "stopPrice must be greater than 0".to_string(),
                        ));
                    }
                }
                params.insert_opt("price", self.price);
            }
        }

        if let Some(id) = &self.client_order_id {
            if !is_valid_client_order_id(id) {
                return Err(BinanceError::InvalidParameter(format!(
                    "newClientOrderId {id:?} may only use letters, digits and .:/_-"
                )));
            }
            params.insert("newClientOrderId", id);
        }
        Ok(params)
    }
}

fn is_valid_client_order_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '/' | '_' | '-'))
}

/// Reference to an existing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    /// The client order id given when placing the order
    ClientOrderId(String),
    /// The id assigned by the venue
    OrderId(u64),
}

/// Request to query or cancel one order.
#[derive(Debug, Clone)]
pub struct OrderLookup {
    /// Option symbol.
    pub symbol: String,
    /// The order.
    pub order: OrderRef,
    /// Receive window override.
    pub recv_window: Option<u64>,
}

impl OrderLookup {
    /// Look an order up by its client order id.
    pub fn by_client_order_id(
        symbol: impl Into<String>,
        client_order_id: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            order: OrderRef::ClientOrderId(client_order_id.into()),
            recv_window: None,
        }
    }

    /// Look an order up by the venue's order id.
    pub fn by_order_id(symbol: impl Into<String>, order_id: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order: OrderRef::OrderId(order_id),
            recv_window: None,
        }
    }

    /// Override the receive window.
    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        let params = Params::new().with("symbol", &self.symbol);
        match &self.order {
            OrderRef::ClientOrderId(id) => params.with("origClientOrderId", id),
            OrderRef::OrderId(id) => params.with("orderId", id),
        }
    }
}

/// Request for open orders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenOrdersRequest {
    /// Restrict to one symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Receive window override.
    #[serde(skip)]
    pub recv_window: Option<u64>,
}

impl OpenOrdersRequest {
    /// Request the open orders of one symbol.
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            recv_window: None,
        }
    }
}

/// Request to cancel every open order of a symbol.
#[derive(Debug, Clone, Serialize)]
pub struct CancelOpenOrdersRequest {
    /// Option symbol.
    pub symbol: String,
    /// Receive window override.
    #[serde(skip)]
    pub recv_window: Option<u64>,
}

impl CancelOpenOrdersRequest {
    /// Create a request for a symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            recv_window: None,
        }
    }
}

/// User data stream listen key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenKey {
    /// The key identifying the stream.
    pub listen_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYMBOL: &str = "BTC-210129-40000-C";

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_limit_order_defaults_to_gtc() {
        let params = NewOrderRequest::limit(SYMBOL, OrderSide::Buy, dec("0.5"), dec("1250"))
            .to_params()
            .unwrap();

        assert_eq!(
            params.to_query_string(),
            "price=1250&quantity=0.5&side=BUY&symbol=BTC-210129-40000-C&timeInForce=GTC&type=LIMIT"
        );
    }

    #[test]
    fn test_limit_order_keeps_chosen_time_in_force() {
        let params = NewOrderRequest::limit(SYMBOL, OrderSide::Sell, dec("1"), dec("10"))
            .time_in_force(TimeInForce::FOK)
            .to_params()
            .unwrap();
        assert_eq!(params.get("timeInForce"), Some("FOK"));
    }

    #[test]
    fn test_limit_order_requires_price() {
        let result = NewOrderRequest::new(SYMBOL, OrderSide::Buy, OrderType::Limit, dec("1"))
            .to_params();
        assert!(matches!(result, Err(BinanceError::InvalidParameter(_))));
    }

    #[test]
    fn test_market_order_drops_price() {
        let params = NewOrderRequest::market(SYMBOL, OrderSide::Buy, dec("1"))
            .price(dec("1250"))
            .time_in_force(TimeInForce::IOC)
            .to_params()
            .unwrap();

        assert!(!params.contains_key("price"));
        assert!(!params.contains_key("timeInForce"));
        assert_eq!(params.get("type"), Some("MARKET"));
    }

    #[test]
    fn test_stop_order_carries_stop_price() {
        let params = NewOrderRequest::stop(SYMBOL, OrderSide::Sell, dec("1"), dec("900"))
            .price(dec("880"))
            .to_params()
            .unwrap();

        assert_eq!(params.get("stopPrice"), Some("900"));
        assert_eq!(params.get("price"), Some("880"));
        assert!(!params.contains_key("timeInForce"));
    }

    #[test]
    fn test_stop_order_rejects_non_positive_stop_price() {
        for stop_price in ["0", "-1"] {
            let result = NewOrderRequest::stop(SYMBOL, OrderSide::Sell, dec("1"), dec(stop_price))
                .to_params();
            assert!(matches!(result, Err(BinanceError::InvalidParameter(_))));
        }

        let missing = NewOrderRequest::new(SYMBOL, OrderSide::Sell, OrderType::Stop, dec("1"))
            .to_params();
        assert!(matches!(missing, Err(BinanceError::InvalidParameter(_))));
    }

    #[test]
    fn test_supplied_client_order_id_is_kept() {
        let params = NewOrderRequest::market(SYMBOL, OrderSide::Buy, dec("1"))
            .client_order_id("my-order_1.a:b/c")
            .to_params()
            .unwrap();
        assert_eq!(params.get("newClientOrderId"), Some("my-order_1.a:b/c"));
    }

    #[test]
    fn test_client_order_id_must_be_url_safe() {
        for id in ["", "my order", "a#b", "a&b=c", "a%20b", "ordre-é"] {
            let result = NewOrderRequest::market(SYMBOL, OrderSide::Buy, dec("1"))
                .client_order_id(id)
                .to_params();
            assert!(
                matches!(result, Err(BinanceError::InvalidParameter(_))),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_order_lookup_params() {
        let by_client = OrderLookup::by_client_order_id("ETH-210326-1600-P", "x-1").to_params();
        assert_eq!(
            by_client.to_query_string(),
            "origClientOrderId=x-1&symbol=ETH-210326-1600-P"
        );

        let by_id = OrderLookup::by_order_id("ETH-210326-1600-P", 4611875134427365377).to_params();
        assert_eq!(
            by_id.to_query_string(),
            "orderId=4611875134427365377&symbol=ETH-210326-1600-P"
        );
    }

    #[test]
    fn test_listen_key_deserialize() {
        let key: ListenKey = serde_json::from_str(r#"{"listenKey": "abc123"}"#).unwrap();
        assert_eq!(key.listen_key, "abc123");
    }
}
