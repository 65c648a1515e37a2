use alloy_primitives::{Address, B256, U256};
use std::path::PathBuf;

/// Token ids are whatever the contract counts them in
pub type TokenId = U256;

/// Remote operations the client can issue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    InitSession,
    ReadFile,
    Upload,
    Mint,
    TotalTokens,
    FetchToken,
    ListForSale,
    Purchase,
    FetchSalePrice,
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Operation::InitSession => "init session",
            Operation::ReadFile => "read file",
            Operation::Upload => "upload",
            Operation::Mint => "mint",
            Operation::TotalTokens => "total tokens",
            Operation::FetchToken => "get token",
            Operation::ListForSale => "sell",
            Operation::Purchase => "buy",
            Operation::FetchSalePrice => "get price",
        }
    }
}

/// Connection to the ledger
#[derive(Clone, Debug, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Connecting,
    Ready {
        account: Address,
    },
    Failed {
        message: String,
    },
}

impl SessionState {
    pub fn account(&self) -> Option<Address> {
        match self {
            SessionState::Ready { account } => Some(*account),
            _ => None,
        }
    }
}

/// Result of one Fetch Token, tagged with the id it was fetched for
#[derive(Clone, Debug, PartialEq)]
pub struct TokenView {
    pub token_id: TokenId,
    pub content_id: String,
    pub owner: Address,
}

/// Result of one Fetch Sale Price; zero means not listed
#[derive(Clone, Debug, PartialEq)]
pub struct SalePrice {
    pub token_id: TokenId,
    pub price: U256,
}

/// The file waiting to be uploaded
#[derive(Clone, Debug, PartialEq, Default)]
pub enum UploadSlot {
    #[default]
    Empty,
    /// Read in flight; submission stays disabled
    Reading { id: u64, path: PathBuf },
    Ready {
        id: u64,
        path: PathBuf,
        buffer: Vec<u8>,
    },
}

impl UploadSlot {
    pub fn is_ready(&self) -> bool {
        matches!(self, UploadSlot::Ready { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            UploadSlot::Empty => String::from("no file selected"),
            UploadSlot::Reading { path, .. } => format!("reading {}...", path.display()),
            UploadSlot::Ready { path, buffer, .. } => {
                format!("{} ({} bytes) ready", path.display(), buffer.len())
            }
        }
    }
}

/// A write call the ledger accepted
#[derive(Clone, Debug)]
pub struct ActivityEntry {
    pub operation: Operation,
    pub detail: String,
    pub tx_hash: B256,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Parse a decimal form field into a 256-bit amount
pub fn parse_amount(text: &str) -> Option<U256> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(text, 10).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), Some(U256::from(100u64)));
        assert_eq!(parse_amount(" 3 "), Some(U256::from(3u64)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("-1"), None);
        assert_eq!(parse_amount("0x10"), None);
        assert_eq!(parse_amount("1.5"), None);
    }

    #[test]
    fn test_upload_slot_ready() {
        assert!(!UploadSlot::Empty.is_ready());
        let reading = UploadSlot::Reading {
            id: 1,
            path: PathBuf::from("a.png"),
        };
        assert!(!reading.is_ready());
        let ready = UploadSlot::Ready {
            id: 1,
            path: PathBuf::from("a.png"),
            buffer: vec![1, 2, 3],
        };
        assert!(ready.is_ready());
        assert_eq!(ready.describe(), "a.png (3 bytes) ready");
    }
}
