//! Binance Options REST API client.
//!
//! Every operation is a method of [`OptionsRestClient`]. Requests are
//! described by an [`ApiRequest`] and go through [`OptionsRestClient::send`],
//! which signs private calls and retries network failures.
//!
//! ```rust,ignore
//! use binance_options_client::rest::OptionsRestClient;
//! use binance_options_client::rest::public::OrderBookRequest;
//!
//! async fn best_levels(client: &OptionsRestClient) -> binance_options_client::Result<()> {
//!     let book = client.get_order_book(&OrderBookRequest::new("BTC-210129-40000-C")).await?;
//!     println!("{}", book);
//!     Ok(())
//! }
//! ```

mod client;
mod endpoints;
pub mod private;
pub mod public;
pub mod retry;

pub use client::{
    API_KEY_HEADER, ApiRequest, DEFAULT_MAX_TRIES, DEFAULT_RECV_WINDOW, DEFAULT_RETRY_INTERVAL,
    DEFAULT_TIMEOUT, OptionsRestClient, OptionsRestClientBuilder, Security,
};
pub use endpoints::*;
