//! Authentication module for the Binance Options API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - HMAC-SHA256 query signing for private endpoints
//! - Client order id generation for new orders

mod client_order_id;
mod credentials;
mod signature;

pub use client_order_id::{
    ClientOrderIdProvider, CountingClientOrderId, DEFAULT_CLIENT_ORDER_ID_TAG,
    INITIAL_ORDER_COUNT, current_time_millis,
};
pub use credentials::{
    API_KEY_VAR, API_SECRET_VAR, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use signature::{SIGNATURE_PARAM, hmac_sha256_hex, sign_query};
