//! Errors raised by the ledger and content store seams

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    /// The node answered with a JSON-RPC error object
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The node answered with neither `result` nor `error`
    #[error("JSON-RPC response for {0} carried no result")]
    EmptyResult(String),

    /// The node exposes no unlocked account to send from
    #[error("Ledger reported no accounts")]
    NoAccounts,

    /// Return data did not decode against the contract ABI
    #[error(transparent)]
    Abi(#[from] alloy_sol_types::Error),

    /// `serde_json` error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// HTTP transport error
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Local file error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MarketError {
    /// Human-readable message, in the style of the HTTP client's error strings
    pub fn describe(&self) -> String {
        match self {
            MarketError::Http(e) if e.is_timeout() => "Request timed out (30s)".to_string(),
            MarketError::Http(e) if e.is_connect() => format!("Connection failed: {}", e),
            other => other.to_string(),
        }
    }
}
