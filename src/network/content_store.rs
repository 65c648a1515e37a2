//! IPFS HTTP API client - blobs in, content identifiers out

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::StorageAuth;
use crate::network::client::basic_auth_header;
use crate::network::error::MarketError;

/// Content-addressed blob storage
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store `buffer` and return its content identifier
    async fn add(&self, buffer: Vec<u8>) -> Result<String, MarketError>;
}

/// Body of a successful `/api/v0/add`
#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

fn parse_add_response(body: &str) -> Result<String, MarketError> {
    // With several parts the API streams one JSON object per line; one part, one line.
    let line = body.lines().find(|l| !l.trim().is_empty()).unwrap_or(body);
    let response: AddResponse = serde_json::from_str(line)?;
    Ok(response.hash)
}

pub struct IpfsStore {
    client: reqwest::Client,
    add_url: String,
    auth: Option<StorageAuth>,
}

impl IpfsStore {
    pub fn new(client: reqwest::Client, add_url: impl Into<String>, auth: Option<StorageAuth>) -> Self {
        IpfsStore {
            client,
            add_url: add_url.into(),
            auth,
        }
    }
}

#[async_trait]
impl ContentStore for IpfsStore {
    async fn add(&self, buffer: Vec<u8>) -> Result<String, MarketError> {
        let size = buffer.len();
        let form = Form::new().part("file", Part::bytes(buffer).file_name("upload"));

        let mut req_builder = self.client.post(&self.add_url).multipart(form);
        if let Some(auth) = &self.auth {
            req_builder =
                req_builder.header("Authorization", basic_auth_header(&auth.username, &auth.password));
        }

        tracing::info!(url = %self.add_url, size, "Adding blob to IPFS");
        let body = req_builder
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_add_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one request, answer it with `body`, hand back the raw request text
    async fn serve_once(body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/v0/add", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 4096];
            // The multipart body ends with the closing boundary `--<boundary>--\r\n`
            while !String::from_utf8_lossy(&raw).ends_with("--\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (url, handle)
    }

    fn direct_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn test_add_posts_file_part_with_basic_auth() {
        let (url, handle) = serve_once(r#"{"Name":"upload","Hash":"QmStored","Size":"9"}"#).await;
        let auth = StorageAuth {
            username: "project".into(),
            password: "secret".into(),
        };
        let store = IpfsStore::new(direct_client(), url, Some(auth));

        let content_id = store.add(b"png bytes".to_vec()).await.unwrap();
        assert_eq!(content_id, "QmStored");

        let request = handle.await.unwrap();
        let lowered = request.to_lowercase();
        assert!(request.starts_with("POST /api/v0/add "));
        assert!(lowered.contains("content-type: multipart/form-data; boundary="));
        assert!(lowered.contains(&format!(
            "authorization: {}",
            basic_auth_header("project", "secret").to_lowercase()
        )));
        assert!(request.contains("name=\"file\""));
        assert!(request.contains("png bytes"));
    }

    #[tokio::test]
    async fn test_add_without_auth_sends_no_authorization() {
        let (url, handle) = serve_once(r#"{"Name":"upload","Hash":"QmOpen","Size":"3"}"#).await;
        let store = IpfsStore::new(direct_client(), url, None);

        assert_eq!(store.add(vec![1, 2, 3]).await.unwrap(), "QmOpen");
        let request = handle.await.unwrap().to_lowercase();
        assert!(!request.contains("authorization:"));
        assert!(request.contains("name=\"file\""));
    }

    #[test]
    fn test_parse_add_response() {
        let body = r#"{"Name":"upload","Hash":"QmT78zSuBmuS4z925WZfrqQ1qHaJ56DQaTfyMUF7F8ff5o","Size":"19"}"#;
        assert_eq!(
            parse_add_response(body).unwrap(),
            "QmT78zSuBmuS4z925WZfrqQ1qHaJ56DQaTfyMUF7F8ff5o"
        );
    }

    #[test]
    fn test_parse_add_response_with_trailing_newline() {
        let body = "{\"Name\":\"upload\",\"Hash\":\"QmA\",\"Size\":\"3\"}\n";
        assert_eq!(parse_add_response(body).unwrap(), "QmA");
    }

    #[test]
    fn test_parse_add_response_rejects_error_body() {
        let body = r#"{"Message":"file argument 'path' is required","Code":1,"Type":"error"}"#;
        assert!(parse_add_response(body).is_err());
    }
}
