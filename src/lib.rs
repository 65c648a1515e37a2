//! # NFT Marketplace TUI
//!
//! A terminal client for a single NFT marketplace contract.
//!
//! ## Features
//! - Upload an image to IPFS and mint a token pointing at it
//! - Look up a token's content id and owner
//! - List a token for sale, read its price, buy it
//! - Running total of minted tokens
//! - Activity log of accepted transactions
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime) - JSON-RPC ledger, IPFS store, file reads

pub mod config;
pub mod constants;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::{MarketConfig, StorageAuth};
pub use models::{ActivityEntry, Operation, SalePrice, SessionState, TokenId, TokenView, UploadSlot};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ContentStore, ContractClient, IpfsStore, Marketplace, MarketError, NetworkActor};
