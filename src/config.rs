//! Target environment configuration, resolved once at startup

use alloy_primitives::Address;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_CONTRACT_ADDRESS, DEFAULT_GATEWAY_HOST, DEFAULT_RPC_URL,
    DEFAULT_STORAGE_API,
};

/// Credentials for hosted IPFS APIs that require a project id/secret
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageAuth {
    pub username: String,
    pub password: String,
}

/// Where the contract, the IPFS API and the gateway live.
///
/// Every key is optional in `config.yaml`; missing keys keep their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketConfig {
    pub contract_address: Address,
    pub storage_gateway_host: String,
    pub storage_api_endpoint: String,
    pub rpc_url: String,
    pub storage_auth: Option<StorageAuth>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            storage_gateway_host: String::from(DEFAULT_GATEWAY_HOST),
            storage_api_endpoint: String::from(DEFAULT_STORAGE_API),
            rpc_url: String::from(DEFAULT_RPC_URL),
            storage_auth: None,
        }
    }
}

impl MarketConfig {
    /// `~/.nftmarket/config.yaml`, falling back to the working directory
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join("config.yaml")
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(MarketConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(MarketConfig::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Gateway URL an image with `content_id` is served from
    pub fn gateway_url(&self, content_id: &str) -> String {
        format!("https://{}/ipfs/{}", self.storage_gateway_host, content_id)
    }

    /// Full URL of the IPFS `add` call
    pub fn add_endpoint(&self) -> String {
        format!("{}/add", self.storage_api_endpoint.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = MarketConfig::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, MarketConfig::default());
        assert_eq!(
            config.contract_address.to_string().to_lowercase(),
            "0x932e3a5c656ea9278f3ced2f213db985a400d901"
        );
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "contractAddress: \"0x0000000000000000000000000000000000000001\"\n\
             storageGatewayHost: gateway.example.org\n\
             rpcUrl: http://10.0.0.2:8545\n\
             storageAuth:\n  username: project\n  password: secret"
        )
        .unwrap();

        let config = MarketConfig::load_from(&path).unwrap();
        assert_eq!(config.contract_address, Address::with_last_byte(1));
        assert_eq!(config.storage_gateway_host, "gateway.example.org");
        assert_eq!(config.rpc_url, "http://10.0.0.2:8545");
        assert_eq!(config.storage_api_endpoint, DEFAULT_STORAGE_API);
        assert_eq!(
            config.storage_auth,
            Some(StorageAuth {
                username: "project".into(),
                password: "secret".into(),
            })
        );
    }

    #[test]
    fn test_storage_api_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "storageApiEndpoint: http://localhost:5001/api/v0\n").unwrap();

        let config = MarketConfig::load_from(&path).unwrap();
        assert_eq!(config.storage_api_endpoint, "http://localhost:5001/api/v0");
        assert_eq!(config.add_endpoint(), "http://localhost:5001/api/v0/add");
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "contractAddress: not-an-address\n").unwrap();
        assert!(MarketConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_urls() {
        let mut config = MarketConfig::default();
        config.storage_api_endpoint = "http://localhost:5001/api/v0/".into();
        assert_eq!(config.add_endpoint(), "http://localhost:5001/api/v0/add");
        assert_eq!(
            config.gateway_url("QmHash"),
            "https://ipfs.infura.io/ipfs/QmHash"
        );
    }
}
