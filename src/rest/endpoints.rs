//! Binance Options REST API endpoint constants.

/// Default base URL, the Binance Options testnet.
pub const BINANCE_OPTIONS_TESTNET_URL: &str = "https://testnet.binanceops.com";

/// Public endpoints (no authentication required).
pub mod public {
    /// Test connectivity.
    pub const PING: &str = "/api/v1/ping";
    /// Get server time.
    pub const TIME: &str = "/api/v1/time";
    /// Get option contract info.
    pub const OPTION_INFO: &str = "/api/v1/optionInfo";
    /// Get exchange info.
    pub const EXCHANGE_INFO: &str = "/api/v1/exchangeInfo";
    /// Get the spot index price of an underlying.
    pub const INDEX: &str = "/api/v1/index";
    /// Get 24 hour ticker statistics.
    pub const TICKER: &str = "/api/v1/ticker";
    /// Get mark price.
    pub const MARK: &str = "/api/v1/mark";
    /// Get order book.
    pub const DEPTH: &str = "/api/v1/depth";
    /// Get klines.
    pub const KLINES: &str = "/api/v1/klines";
    /// Get recent trades.
    pub const TRADES: &str = "/api/v1/trades";
    /// Get older trades (API key required).
    pub const HISTORICAL_TRADES: &str = "/api/v1/historicalTrades";
}

/// Private endpoints (signature required).
pub mod private {
    /// Place, query or cancel an order.
    pub const ORDER: &str = "/api/v1/order";
    /// Query or cancel all open orders.
    pub const OPEN_ORDERS: &str = "/api/v1/openOrders";
    /// Get account information.
    pub const ACCOUNT: &str = "/api/v1/account";
    /// Create, extend or close a user data stream listen key.
    pub const USER_DATA_STREAM: &str = "/api/v1/userDataStream";
}
