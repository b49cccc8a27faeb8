//! HMAC-SHA256 request signing for Binance private endpoints.
//!
//! Signed endpoints expect the query string to end with a `signature`
//! parameter computed as:
//! ```text
//! hex(HMAC-SHA256(api_secret, canonical_query_string))
//! ```
//!
//! The signature covers every other parameter, including `timestamp` and
//! `recvWindow`, exactly as they are sent.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::BinanceError;
use crate::types::Params;

type HmacSha256 = Hmac<Sha256>;

/// Name of the query parameter carrying the signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// Sign a parameter set for Binance's private API.
///
/// # Returns
///
/// The canonical query string of `params` followed by
/// `&signature=<lowercase hex digest>`.
///
/// # Example
///
/// ```rust
/// use binance_options_client::auth::{Credentials, sign_query};
/// use binance_options_client::types::Params;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret");
/// let params = Params::new()
///     .with("symbol", "BTC-210129-40000-C")
///     .with("timestamp", 1611849600000u64);
/// let query = sign_query(&credentials, &params)?;
/// assert!(query.starts_with("symbol=BTC-210129-40000-C&timestamp=1611849600000&signature="));
/// # Ok(())
/// # }
/// ```
pub fn sign_query(credentials: &Credentials, params: &Params) -> Result<String, BinanceError> {
    let query = params.to_query_string();
    let signature = hmac_sha256_hex(credentials.expose_secret(), &query)?;

    if query.is_empty() {
        Ok(format!("{SIGNATURE_PARAM}={signature}"))
    } else {
        Ok(format!("{query}&{SIGNATURE_PARAM}={signature}"))
    }
}

/// Compute the lowercase hex HMAC-SHA256 of `payload` keyed by `secret`.
///
/// An empty secret is refused, a signature made with it would only be
/// rejected by the venue.
pub fn hmac_sha256_hex(secret: &str, payload: &str) -> Result<String, BinanceError> {
    if secret.is_empty() {
        return Err(BinanceError::Auth("API secret must not be empty.".to_string()));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BinanceError::Auth(format!("Invalid HMAC key: {e}")))?;
    mac.update(payload.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}
