//! Public REST API endpoints (no signature required).

mod types;

pub use types::*;

use reqwest::Method;
use serde_json::Value;

use crate::error::BinanceError;
use crate::rest::endpoints::public;
use crate::rest::{ApiRequest, OptionsRestClient};
use crate::types::{Params, supported_or};

impl OptionsRestClient {
    /// Test connectivity to the API.
    pub async fn ping(&self) -> Result<Value, BinanceError> {
        self.public_get(public::PING, Params::new()).await
    }

    /// Get the server time.
    ///
    /// Useful to check the local clock against the receive window.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use binance_options_client::rest::OptionsRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = OptionsRestClient::new();
    ///     let time = client.get_server_time().await?;
    ///     println!("Server time: {} ({} ms)", time.server_time, time.unix_millis());
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_server_time(&self) -> Result<ServerTime, BinanceError> {
        self.send_as(ApiRequest::public(Method::GET, public::TIME))
            .await
    }

    /// Get information about the listed option contracts.
    pub async fn get_option_info(&self) -> Result<Value, BinanceError> {
        self.public_get(public::OPTION_INFO, Params::new()).await
    }

    /// Get exchange trading rules and symbol information.
    pub async fn get_exchange_info(&self) -> Result<Value, BinanceError> {
        self.public_get(public::EXCHANGE_INFO, Params::new()).await
    }

    /// Get the spot index price of an underlying, e.g. `BTCUSDT`.
    ///
    /// Defaults to [`DEFAULT_UNDERLYING`].
    pub async fn get_index(&self, underlying: Option<&str>) -> Result<Value, BinanceError> {
        let params = Params::new()
            .with("underlying", underlying.unwrap_or(DEFAULT_UNDERLYING));
        self.public_get(public::INDEX, params).await
    }

    /// Get 24 hour ticker statistics, for one symbol or all of them.
    pub async fn get_ticker(&self, symbol: Option<&str>) -> Result<Value, BinanceError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.public_get(public::TICKER, params).await
    }

    /// Get the mark price, for one symbol or all of them.
    pub async fn get_mark_price(&self, symbol: Option<&str>) -> Result<Value, BinanceError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.public_get(public::MARK, params).await
    }

    /// Get the order book of a symbol.
    ///
    /// An unsupported depth falls back to [`DEFAULT_DEPTH_LIMIT`].
    pub async fn get_order_book(&self, request: &OrderBookRequest) -> Result<Value, BinanceError> {
        let mut params = Params::from_serialize(request)?;
        params.insert(
            "limit",
            supported_or(request.limit, DEPTH_LIMITS, DEFAULT_DEPTH_LIMIT),
        );
        tracing::debug!(%params, "requesting order book");
        self.public_get(public::DEPTH, params).await
    }

    /// Get klines (candlesticks) of a symbol.
    ///
    /// An unsupported page size falls back to [`DEFAULT_KLINE_LIMIT`].
    pub async fn get_klines(&self, request: &KlinesRequest) -> Result<Value, BinanceError> {
        let mut params = Params::from_serialize(request)?;
        params.insert(
            "limit",
            supported_or(request.limit, KLINE_LIMITS, DEFAULT_KLINE_LIMIT),
        );
        self.public_get(public::KLINES, params).await
    }

    /// Get the most recent trades of a symbol.
    ///
    /// An unsupported page size falls back to [`DEFAULT_TRADE_LIMIT`].
    pub async fn get_recent_trades(
        &self,
        request: &RecentTradesRequest,
    ) -> Result<Value, BinanceError> {
        let mut params = Params::from_serialize(request)?;
        params.insert(
            "limit",
            supported_or(request.limit, TRADE_LIMITS, DEFAULT_TRADE_LIMIT),
        );
        self.public_get(public::TRADES, params).await
    }

    /// Get older trades of a symbol.
    ///
    /// Requires an API key but no signature.
    pub async fn get_historical_trades(
        &self,
        request: &HistoricalTradesRequest,
    ) -> Result<Value, BinanceError> {
        let mut params = Params::from_serialize(request)?;
        params.insert(
            "limit",
            supported_or(request.limit, TRADE_LIMITS, DEFAULT_TRADE_LIMIT),
        );
        let historical = ApiRequest::with_api_key(Method::GET, public::HISTORICAL_TRADES);
        self.send(historical.params(params)).await
    }
}
