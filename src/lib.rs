//! # Binance Options Client
//!
//! An async Rust client library for the Binance Options REST API.
//!
//! ## Features
//!
//! - Market data and order lifecycle endpoints (place, query, cancel)
//! - HMAC-SHA256 signing over a canonical, order-independent query string
//! - Thread-safe client order id generation
//! - Retries of network failures with a fixed backoff
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binance_options_client::rest::OptionsRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OptionsRestClient::new();
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {:?}", time);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::BinanceError;
pub use types::common::{KlineInterval, OrderSide, OrderType, TimeInForce};

/// Result type alias using BinanceError
pub type Result<T> = std::result::Result<T, BinanceError>;
