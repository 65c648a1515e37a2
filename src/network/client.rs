//! HTTP plumbing shared by the ledger and content store clients

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::network::error::MarketError;

/// A JSON-RPC 2.0 endpoint
#[async_trait]
pub trait JsonRpc: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, MarketError>;
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// Pull `result` out of a JSON-RPC response body
fn parse_rpc_response(method: &str, body: &[u8]) -> Result<Value, MarketError> {
    let response: RpcResponse = serde_json::from_slice(body)?;
    if let Some(error) = response.error {
        return Err(MarketError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    response
        .result
        .ok_or_else(|| MarketError::EmptyResult(method.to_string()))
}

/// JSON-RPC over HTTP POST
pub struct HttpJsonRpc {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpJsonRpc {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        HttpJsonRpc {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl JsonRpc for HttpJsonRpc {
    async fn request(&self, method: &str, params: Value) -> Result<Value, MarketError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let start = Instant::now();
        let body = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .bytes()
            .await?;
        tracing::debug!(
            rpc_id = id,
            method,
            time_ms = start.elapsed().as_millis() as u64,
            "JSON-RPC round trip"
        );
        parse_rpc_response(method, &body)
    }
}

/// `Authorization` header value for HTTP basic auth
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {}", encoded)
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result() {
        let body = br#"{"jsonrpc":"2.0","id":1,"result":"0x2a"}"#;
        let value = parse_rpc_response("eth_call", body).unwrap();
        assert_eq!(value, json!("0x2a"));
    }

    #[test]
    fn test_parse_error_object() {
        let body = br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#;
        match parse_rpc_response("eth_sendTransaction", body) {
            Err(MarketError::Rpc { code, message }) => {
                assert_eq!(code, -32000);
                assert_eq!(message, "execution reverted");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_result() {
        let body = br#"{"jsonrpc":"2.0","id":1}"#;
        assert!(matches!(
            parse_rpc_response("eth_accounts", body),
            Err(MarketError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_basic_auth_header() {
        assert_eq!(basic_auth_header("user", "pass"), "Basic dXNlcjpwYXNz");
    }
}
