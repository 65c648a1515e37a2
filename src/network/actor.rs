//! Network actor - runs ledger, content store and file reads in the Tokio runtime

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Operation, SalePrice, TokenView};
use crate::network::content_store::ContentStore;
use crate::network::contract::Marketplace;
use crate::network::error::MarketError;

/// Network actor that executes commands against the remote services
pub struct NetworkActor {
    ledger: Arc<dyn Marketplace>,
    store: Arc<dyn ContentStore>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        ledger: Arc<dyn Marketplace>,
        store: Arc<dyn ContentStore>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            ledger,
            store,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            tracing::info!(in_flight = self.active_requests.len(), "Network actor shutting down");
                            break;
                        }
                        Some(command) => {
                            let ledger = self.ledger.clone();
                            let store = self.store.clone();
                            let response_tx = self.response_tx.clone();

                            // Each command runs to completion on its own; none are cancelled
                            self.active_requests.spawn(async move {
                                execute(ledger.as_ref(), store.as_ref(), command, &response_tx).await;
                            });
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

fn failed(id: u64, operation: Operation, error: MarketError) -> NetworkResponse {
    tracing::error!(id, operation = operation.as_str(), error = %error, "Remote call failed");
    NetworkResponse::Failed {
        id,
        operation,
        message: error.describe(),
    }
}

/// Execute one command, sending every response it produces
async fn execute(
    ledger: &dyn Marketplace,
    store: &dyn ContentStore,
    command: NetworkCommand,
    response_tx: &mpsc::UnboundedSender<NetworkResponse>,
) {
    let response = match command {
        NetworkCommand::InitSession { id } => {
            tracing::info!(id, "Requesting ledger accounts");
            let accounts = ledger
                .accounts()
                .await
                .and_then(|accounts| accounts.first().copied().ok_or(MarketError::NoAccounts));
            match accounts {
                Ok(account) => {
                    tracing::info!(id, %account, "Session ready");
                    NetworkResponse::SessionReady { id, account }
                }
                Err(e) => {
                    tracing::error!(id, error = %e, "Failed to load ledger session");
                    NetworkResponse::SessionFailed {
                        id,
                        message: e.describe(),
                    }
                }
            }
        }

        NetworkCommand::ReadFile { id, path } => match tokio::fs::read(&path).await {
            Ok(buffer) => {
                tracing::info!(id, path = %path.display(), size = buffer.len(), "File loaded");
                NetworkResponse::FileLoaded { id, path, buffer }
            }
            Err(e) => failed(id, Operation::ReadFile, e.into()),
        },

        NetworkCommand::UploadAndMint { id, from, buffer } => {
            tracing::info!(id, size = buffer.len(), "Submitting file to IPFS");
            let content_id = match store.add(buffer).await {
                Ok(content_id) => content_id,
                Err(e) => {
                    let _ = response_tx.send(failed(id, Operation::Upload, e));
                    return;
                }
            };
            tracing::info!(id, %content_id, "Upload stored");
            let _ = response_tx.send(NetworkResponse::Uploaded {
                id,
                content_id: content_id.clone(),
            });

            match ledger.mint(from, &content_id).await {
                Ok(tx_hash) => {
                    tracing::info!(id, %content_id, %tx_hash, "Mint sent");
                    NetworkResponse::Minted {
                        id,
                        content_id,
                        tx_hash,
                    }
                }
                Err(e) => failed(id, Operation::Mint, e),
            }
        }

        NetworkCommand::FetchTotalTokens { id } => match ledger.number_of_tokens().await {
            Ok(count) => {
                tracing::info!(id, %count, "Total tokens");
                NetworkResponse::TotalTokens { id, count }
            }
            Err(e) => failed(id, Operation::TotalTokens, e),
        },

        NetworkCommand::FetchToken { id, token_id } => {
            tracing::info!(id, %token_id, "Fetching token");
            let reads = futures_util::future::try_join(
                ledger.token_url(token_id),
                ledger.token_owner(token_id),
            )
            .await;
            match reads {
                Ok((content_id, owner)) => NetworkResponse::Token {
                    id,
                    view: TokenView {
                        token_id,
                        content_id,
                        owner,
                    },
                },
                Err(e) => failed(id, Operation::FetchToken, e),
            }
        }

        NetworkCommand::ListForSale {
            id,
            from,
            token_id,
            price,
        } => {
            tracing::info!(id, %token_id, %price, "Selling token");
            match ledger.set_for_sale(from, token_id, price).await {
                Ok(tx_hash) => NetworkResponse::TransactionSent {
                    id,
                    operation: Operation::ListForSale,
                    token_id,
                    tx_hash,
                },
                Err(e) => failed(id, Operation::ListForSale, e),
            }
        }

        NetworkCommand::Purchase {
            id,
            from,
            token_id,
            price,
        } => {
            tracing::info!(id, %token_id, %price, "Buying token");
            match ledger.buy(from, token_id, price).await {
                Ok(tx_hash) => NetworkResponse::TransactionSent {
                    id,
                    operation: Operation::Purchase,
                    token_id,
                    tx_hash,
                },
                Err(e) => failed(id, Operation::Purchase, e),
            }
        }

        NetworkCommand::FetchSalePrice { id, token_id } => {
            match ledger.token_price(token_id).await {
                Ok(price) => {
                    tracing::info!(id, %token_id, %price, "Selling price");
                    NetworkResponse::SalePrice {
                        id,
                        price: SalePrice { token_id, price },
                    }
                }
                Err(e) => failed(id, Operation::FetchSalePrice, e),
            }
        }

        NetworkCommand::Shutdown => return,
    };

    let _ = response_tx.send(response);
}
