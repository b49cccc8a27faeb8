//! Error types for the Binance Options client library.

use thiserror::Error;

/// The main error type for all Binance Options client operations.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP client failed before a request could be sent
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Network-level failure that persisted through the retry budget
    #[error("HTTP request failed (up to {max_tries} attempt(s)): {source}")]
    Transport {
        /// Attempts allowed per request
        max_tries: u32,
        /// The failure of the last attempt
        #[source]
        source: reqwest_middleware::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Binance answered with a non-success HTTP status
    #[error("Binance API error: {0}")]
    Api(ApiError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A request parameter was rejected before anything was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

impl BinanceError {
    /// Whether the error was produced locally, before any network activity.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            BinanceError::Auth(_)
                | BinanceError::InvalidParameter(_)
                | BinanceError::MissingCredentials
        )
    }

    /// The venue error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            BinanceError::Api(error) => Some(error),
            _ => None,
        }
    }
}

/// An error reported by the venue.
///
/// Binance answers failed calls with a non-2xx status and a body such as
/// `{"code": -1121, "msg": "Invalid symbol."}`. The raw body is kept so that
/// payloads in an unexpected shape are not lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// The venue error code, when the body carried one
    pub code: Option<i64>,
    /// Human-readable error message
    pub message: String,
    /// The raw response body
    pub body: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "HTTP {} ({}): {}", self.status, code, self.message),
            None => write!(f, "HTTP {}: {}", self.status, self.message),
        }
    }
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, code: Option<i64>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            code,
            body: message.clone(),
            message,
        }
    }

    /// Build an API error from a response status and its raw body.
    ///
    /// Falls back to the raw body as the message when it is not the usual
    /// `{"code", "msg"}` object.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            code: Option<i64>,
            msg: Option<String>,
        }

        let body = body.into();
        let parsed = serde_json::from_str::<ErrorBody>(&body).ok();
        let code = parsed.as_ref().and_then(|b| b.code);
        let message = parsed
            .and_then(|b| b.msg)
            .unwrap_or_else(|| body.clone());

        Self {
            status,
            code,
            message,
            body,
        }
    }

    /// Check if the venue rejected the request signature.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == Some(error_codes::INVALID_SIGNATURE)
    }

    /// Check if the request timestamp fell outside the receive window.
    pub fn is_outside_recv_window(&self) -> bool {
        self.code == Some(error_codes::INVALID_TIMESTAMP)
    }

    /// Check if the API key was rejected.
    pub fn is_rejected_api_key(&self) -> bool {
        self.code == Some(error_codes::REJECTED_MBX_KEY) || self.status == 401
    }

    /// Check if the referenced order does not exist.
    pub fn is_unknown_order(&self) -> bool {
        matches!(
            self.code,
            Some(error_codes::NO_SUCH_ORDER) | Some(error_codes::CANCEL_REJECTED)
        )
    }

    /// Check if the venue is throttling this client.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
            || self.status == 418
            || self.code == Some(error_codes::TOO_MANY_REQUESTS)
    }
}

/// Known Binance error codes for pattern matching.
pub mod error_codes {
    /// Unknown error while processing the request
    pub const UNKNOWN: i64 = -1000;
    /// Too many requests
    pub const TOO_MANY_REQUESTS: i64 = -1003;
    /// Timestamp outside of the receive window
    pub const INVALID_TIMESTAMP: i64 = -1021;
    /// Signature for this request is not valid
    pub const INVALID_SIGNATURE: i64 = -1022;
    /// A mandatory parameter was not sent
    pub const MANDATORY_PARAM_EMPTY_OR_MALFORMED: i64 = -1102;
    /// Invalid symbol
    pub const BAD_SYMBOL: i64 = -1121;
    /// New order rejected
    pub const NEW_ORDER_REJECTED: i64 = -2010;
    /// Cancel rejected
    pub const CANCEL_REJECTED: i64 = -2011;
    /// Order does not exist
    pub const NO_SUCH_ORDER: i64 = -2013;
    /// Invalid API key, IP, or permissions for action
    pub const REJECTED_MBX_KEY: i64 = -2015;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_binance_body() {
        let body = r#"{"code":-1022,"msg":"Signature for this request is not valid."}"#;
        let error = ApiError::from_response(400, body);
        assert_eq!(error.status, 400);
        assert_eq!(error.code, Some(-1022));
        assert_eq!(error.message, "Signature for this request is not valid.");
        assert!(error.is_invalid_signature());
        assert!(!error.is_unknown_order());
    }

    #[test]
    fn test_api_error_from_plain_body() {
        let error = ApiError::from_response(404, "Not Found");
        assert_eq!(error.code, None);
        assert_eq!(error.message, "Not Found");
        assert_eq!(error.body, "Not Found");
        assert_eq!(error.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(400, Some(-2013), "Order does not exist.");
        assert_eq!(error.to_string(), "HTTP 400 (-2013): Order does not exist.");
        assert!(error.is_unknown_order());
    }

    #[test]
    fn test_local_errors() {
        assert!(BinanceError::MissingCredentials.is_local());
        assert!(BinanceError::InvalidParameter("stopPrice".into()).is_local());
        assert!(!BinanceError::Api(ApiError::new(500, None, "boom")).is_local());
    }
}
