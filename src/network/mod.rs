//! Network layer - ledger JSON-RPC, IPFS uploads and file reads
//!
//! The Network actor receives commands from the App layer and sends back responses.

pub mod actor;
pub mod client;
pub mod content_store;
pub mod contract;
pub mod error;

pub use actor::NetworkActor;
pub use client::{create_client, HttpJsonRpc, JsonRpc};
pub use content_store::{ContentStore, IpfsStore};
pub use contract::{ContractClient, Marketplace};
pub use error::MarketError;
