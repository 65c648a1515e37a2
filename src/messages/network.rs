//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use alloy_primitives::{Address, B256, U256};

use crate::models::{Operation, SalePrice, TokenId, TokenView};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Ask the ledger for an account to act as
    InitSession { id: u64 },
    /// Read a file fully into memory
    ReadFile { id: u64, path: PathBuf },
    /// Store the buffer, then mint a token for the returned content id
    UploadAndMint {
        id: u64,
        from: Address,
        buffer: Vec<u8>,
    },
    FetchTotalTokens { id: u64 },
    /// Content id and owner of one token
    FetchToken { id: u64, token_id: TokenId },
    ListForSale {
        id: u64,
        from: Address,
        token_id: TokenId,
        price: U256,
    },
    /// `buy(token_id)` with `price` attached as value
    Purchase {
        id: u64,
        from: Address,
        token_id: TokenId,
        price: U256,
    },
    FetchSalePrice { id: u64, token_id: TokenId },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    SessionReady {
        id: u64,
        account: Address,
    },
    /// The environment could not supply a ledger connection
    SessionFailed {
        id: u64,
        message: String,
    },
    FileLoaded {
        id: u64,
        path: PathBuf,
        buffer: Vec<u8>,
    },
    /// The store accepted the upload; minting follows under the same id
    Uploaded {
        id: u64,
        content_id: String,
    },
    Minted {
        id: u64,
        content_id: String,
        tx_hash: B256,
    },
    TotalTokens {
        id: u64,
        count: U256,
    },
    Token {
        id: u64,
        view: TokenView,
    },
    /// A sale listing or purchase was accepted by the node
    TransactionSent {
        id: u64,
        operation: Operation,
        token_id: TokenId,
        tx_hash: B256,
    },
    SalePrice {
        id: u64,
        price: SalePrice,
    },
    Failed {
        id: u64,
        operation: Operation,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::SessionReady { id, .. } => *id,
            NetworkResponse::SessionFailed { id, .. } => *id,
            NetworkResponse::FileLoaded { id, .. } => *id,
            NetworkResponse::Uploaded { id, .. } => *id,
            NetworkResponse::Minted { id, .. } => *id,
            NetworkResponse::TotalTokens { id, .. } => *id,
            NetworkResponse::Token { id, .. } => *id,
            NetworkResponse::TransactionSent { id, .. } => *id,
            NetworkResponse::SalePrice { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }

    /// Check if this is a terminal response (no more messages expected for this id)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NetworkResponse::Uploaded { .. })
    }
}
