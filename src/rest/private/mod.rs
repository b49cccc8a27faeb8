//! Private REST API endpoints (signature required).
//!
//! These endpoints require API credentials to be configured on the client.
//! Every call is signed with `timestamp` and `recvWindow` added to its
//! parameters.

mod types;

pub use types::*;

use reqwest::Method;
use serde_json::Value;

use crate::error::BinanceError;
use crate::rest::endpoints::private;
use crate::rest::{ApiRequest, OptionsRestClient};
use crate::types::Params;

impl OptionsRestClient {
    /// Place a new order.
    ///
    /// The request is validated before anything is sent: a `STOP` order
    /// without a positive stop price or a `LIMIT` order without a price fails
    /// with [`BinanceError::InvalidParameter`]. A client order id is generated
    /// when the request has none.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use binance_options_client::auth::StaticCredentials;
    /// use binance_options_client::rest::OptionsRestClient;
    /// use binance_options_client::rest::private::NewOrderRequest;
    /// use binance_options_client::types::OrderSide;
    /// use rust_decimal::Decimal;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = OptionsRestClient::builder().credentials(credentials).build();
    ///
    ///     let request = NewOrderRequest::limit(
    ///         "BTC-210129-40000-C",
    ///         OrderSide::Buy,
    ///         Decimal::new(1, 0),
    ///         Decimal::new(1250, 0),
    ///     );
    ///     let order = client.place_order(&request).await?;
    ///     println!("{order}");
    ///     Ok(())
    /// }
    /// ```
    pub async fn place_order(&self, request: &NewOrderRequest) -> Result<Value, BinanceError> {
        let mut params = request.to_params()?;
        if !params.contains_key("newClientOrderId") {
            params.insert("newClientOrderId", self.next_client_order_id());
        }

        tracing::debug!(
            symbol = %request.symbol,
            side = %request.side,
            order_type = %request.order_type,
            client_order_id = params.get("newClientOrderId").unwrap_or_default(),
            "placing order"
        );

        self.send(
            ApiRequest::signed(Method::POST, private::ORDER)
                .params(params)
                .recv_window(request.recv_window),
        )
        .await
    }

    /// Query the status of an order.
    pub async fn get_order(&self, request: &OrderLookup) -> Result<Value, BinanceError> {
        self.send(
            ApiRequest::signed(Method::GET, private::ORDER)
                .params(request.to_params())
                .recv_window(request.recv_window),
        )
        .await
    }

    /// Cancel an order.
    pub async fn cancel_order(&self, request: &OrderLookup) -> Result<Value, BinanceError> {
        tracing::debug!(symbol = %request.symbol, order = ?request.order, "cancelling order");
        self.send(
            ApiRequest::signed(Method::DELETE, private::ORDER)
                .params(request.to_params())
                .recv_window(request.recv_window),
        )
        .await
    }

    /// Get open orders, optionally for one symbol.
    pub async fn get_open_orders(
        &self,
        request: Option<&OpenOrdersRequest>,
    ) -> Result<Value, BinanceError> {
        let (params, recv_window) = match request {
            Some(req) => (Params::from_serialize(req)?, req.recv_window),
            None => (Params::new(), None),
        };
        self.send(
            ApiRequest::signed(Method::GET, private::OPEN_ORDERS)
                .params(params)
                .recv_window(recv_window),
        )
        .await
    }

    /// Cancel every open order of a symbol.
    pub async fn cancel_open_orders(
        &self,
        request: &CancelOpenOrdersRequest,
    ) -> Result<Value, BinanceError> {
        tracing::debug!(symbol = %request.symbol, "cancelling open orders");
        self.send(
            ApiRequest::signed(Method::DELETE, private::OPEN_ORDERS)
                .params(Params::from_serialize(request)?)
                .recv_window(request.recv_window),
        )
        .await
    }

    /// Get account information.
    pub async fn get_account_info(&self) -> Result<Value, BinanceError> {
        self.send(ApiRequest::signed(Method::GET, private::ACCOUNT))
            .await
    }

    /// Create a listen key for the user data stream.
    pub async fn create_listen_key(&self) -> Result<ListenKey, BinanceError> {
        self.send_as(ApiRequest::signed(Method::POST, private::USER_DATA_STREAM))
            .await
    }

    /// Keep a listen key alive.
    pub async fn extend_listen_key(&self, listen_key: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("listenKey", listen_key);
        let request = ApiRequest::signed(Method::PUT, private::USER_DATA_STREAM);
        self.send(request.params(params)).await
    }

    /// Close a listen key.
    pub async fn close_listen_key(&self, listen_key: &str) -> Result<Value, BinanceError> {
        let params = Params::new().with("listenKey", listen_key);
        let request = ApiRequest::signed(Method::DELETE, private::USER_DATA_STREAM);
        self.send(request.params(params)).await
    }
}
