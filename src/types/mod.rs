//! Common types used across the Binance Options client library.

pub mod common;
pub mod params;

pub use common::*;
pub use params::{Params, supported_or};
