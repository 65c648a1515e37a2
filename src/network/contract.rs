//! Marketplace contract bindings over JSON-RPC

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::TokenId;
use crate::network::client::JsonRpc;
use crate::network::error::MarketError;

sol! {
    function mint(string tokenUrl) external returns (uint256);

    function getNumberOfTokens() external view returns (uint256);

    function getTokenUrl(uint256 tokenId) external view returns (string);

    function getTokenOwner(uint256 tokenId) external view returns (address);

    function setForSale(uint256 tokenId, uint256 price) external;

    function buy(uint256 tokenId) external payable;

    function getTokenPrice(uint256 tokenId) external view returns (uint256);
}

/// The remote ledger as seen by the client: the node's accounts plus the
/// marketplace contract's methods. Writes resolve to the transaction hash.
#[async_trait]
pub trait Marketplace: Send + Sync {
    async fn accounts(&self) -> Result<Vec<Address>, MarketError>;

    async fn mint(&self, from: Address, content_id: &str) -> Result<B256, MarketError>;

    async fn number_of_tokens(&self) -> Result<U256, MarketError>;

    async fn token_url(&self, token_id: TokenId) -> Result<String, MarketError>;

    async fn token_owner(&self, token_id: TokenId) -> Result<Address, MarketError>;

    async fn set_for_sale(
        &self,
        from: Address,
        token_id: TokenId,
        price: U256,
    ) -> Result<B256, MarketError>;

    async fn buy(&self, from: Address, token_id: TokenId, value: U256)
        -> Result<B256, MarketError>;

    async fn token_price(&self, token_id: TokenId) -> Result<U256, MarketError>;
}

/// Handle to the contract deployed at `address`
pub struct ContractClient<R> {
    rpc: R,
    address: Address,
}

impl<R: JsonRpc> ContractClient<R> {
    pub fn new(rpc: R, address: Address) -> Self {
        ContractClient { rpc, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// `eth_call` against the latest block
    async fn call<C: SolCall + Send>(&self, call: C) -> Result<C::Return, MarketError> {
        let data = Bytes::from(call.abi_encode());
        let params = json!([{ "to": self.address, "data": data }, "latest"]);
        let result = self.rpc.request("eth_call", params).await?;
        let output: Bytes = serde_json::from_value(result)?;
        Ok(C::abi_decode_returns(&output)?)
    }

    /// `eth_sendTransaction`, signed by the node for `from`
    async fn send<C: SolCall + Send>(
        &self,
        from: Address,
        call: C,
        value: Option<U256>,
    ) -> Result<B256, MarketError> {
        let mut tx = json!({
            "from": from,
            "to": self.address,
            "data": Bytes::from(call.abi_encode()),
        });
        if let Some(value) = value {
            tx["value"] = json!(value);
        }
        let result = self.rpc.request("eth_sendTransaction", Value::Array(vec![tx])).await?;
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl<R: JsonRpc> Marketplace for ContractClient<R> {
    async fn accounts(&self) -> Result<Vec<Address>, MarketError> {
        let result = self.rpc.request("eth_accounts", json!([])).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn mint(&self, from: Address, content_id: &str) -> Result<B256, MarketError> {
        let call = mintCall {
            tokenUrl: content_id.to_string(),
        };
        self.send(from, call, None).await
    }

    async fn number_of_tokens(&self) -> Result<U256, MarketError> {
        self.call(getNumberOfTokensCall {}).await
    }

    async fn token_url(&self, token_id: TokenId) -> Result<String, MarketError> {
        self.call(getTokenUrlCall { tokenId: token_id }).await
    }

    async fn token_owner(&self, token_id: TokenId) -> Result<Address, MarketError> {
        self.call(getTokenOwnerCall { tokenId: token_id }).await
    }

    async fn set_for_sale(
        &self,
        from: Address,
        token_id: TokenId,
        price: U256,
    ) -> Result<B256, MarketError> {
        let call = setForSaleCall {
            tokenId: token_id,
            price,
        };
        self.send(from, call, None).await
    }

    async fn buy(
        &self,
        from: Address,
        token_id: TokenId,
        value: U256,
    ) -> Result<B256, MarketError> {
        self.send(from, buyCall { tokenId: token_id }, Some(value))
            .await
    }

    async fn token_price(&self, token_id: TokenId) -> Result<U256, MarketError> {
        self.call(getTokenPriceCall { tokenId: token_id }).await
    }
}
