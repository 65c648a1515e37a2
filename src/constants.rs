//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use alloy_primitives::{address, Address};

/// Marketplace contract the client talks to when no config overrides it
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("932E3A5C656ea9278f3CEd2F213db985A400D901");

/// Host serving `/ipfs/<cid>` for uploaded images
pub const DEFAULT_GATEWAY_HOST: &str = "ipfs.infura.io";

/// IPFS HTTP API base (the `add` call is appended)
pub const DEFAULT_STORAGE_API: &str = "https://ipfs.infura.io:5001/api/v0";

/// JSON-RPC endpoint of a local development node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Shown until something real has been uploaded or fetched
pub const PLACEHOLDER_CONTENT_ID: &str = "QmSsDpzKmFRxU4mq7MdajqTL6P4urW1oPZoY1eDPwUAJyS";

/// Directory under $HOME holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".nftmarket";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "nftmarket.log";

/// Upper bound on entries kept in the activity panel
pub const MAX_ACTIVITY: usize = 100;

/// Application name
pub const APP_NAME: &str = "NFT Marketplace";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
