/// JSON-RPC 2.0 wallet provider
///
/// Talks to an external signer endpoint (wallet daemon or node with managed
/// accounts) over the standard Ethereum JSON-RPC methods: eth_accounts,
/// eth_sendTransaction, eth_getTransactionReceipt.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::config::RPC_TIMEOUT_SECS;
use super::provider::WalletProvider;
use super::types::TransactionRequest;
use crate::errors::WalletError;
use crate::logger::{self, LogTag};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorBody>,
}

/// Error object of a JSON-RPC response; `message` is the human-readable
/// provider message (e.g. "User rejected the request")
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Mined-transaction receipt; only the status field matters here
#[derive(Debug, Deserialize)]
struct Receipt {
    status: Option<String>,
}

pub struct JsonRpcWallet {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcWallet {
    pub fn new(url: impl Into<String>) -> Result<Self, WalletError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(RPC_TIMEOUT_SECS))
            .build()
            .map_err(|e| WalletError::Rpc(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Perform one JSON-RPC call, returning the raw result value
    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcCallError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcCallError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcCallError::Transport(format!("HTTP {}", status)));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| RpcCallError::Transport(e.to_string()))?;

        if let Some(error) = body.error {
            logger::debug(
                LogTag::Wallet,
                &format!("{} rejected by provider: {} ({})", method, error.message, error.code),
            );
            return Err(RpcCallError::Provider(error.message));
        }

        body.result
            .ok_or_else(|| RpcCallError::Transport("response carries no result".to_string()))
    }
}

/// Split between transport failures and provider-reported errors so callers
/// can map provider messages to the right wallet error
enum RpcCallError {
    Transport(String),
    Provider(String),
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        let result = self
            .call("eth_accounts", json!([]))
            .await
            .map_err(|e| match e {
                RpcCallError::Transport(msg) | RpcCallError::Provider(msg) => {
                    WalletError::Rpc(msg)
                }
            })?;

        serde_json::from_value(result).map_err(|e| WalletError::Rpc(e.to_string()))
    }

    async fn send_transaction(
        &self,
        from: &str,
        tx: &TransactionRequest,
    ) -> Result<String, WalletError> {
        let params = json!([{
            "from": from,
            "to": tx.to,
            "data": tx.data,
            "value": format!("0x{:x}", tx.value),
        }]);

        let result = self
            .call("eth_sendTransaction", params)
            .await
            .map_err(|e| match e {
                RpcCallError::Transport(msg) => WalletError::Rpc(msg),
                // Signing rejections arrive as provider errors
                RpcCallError::Provider(msg) => WalletError::Submission(msg),
            })?;

        serde_json::from_value(result).map_err(|e| WalletError::Rpc(e.to_string()))
    }

    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<bool>, WalletError> {
        let result = self
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await
            .map_err(|e| match e {
                RpcCallError::Transport(msg) | RpcCallError::Provider(msg) => {
                    WalletError::Rpc(msg)
                }
            })?;

        if result.is_null() {
            return Ok(None);
        }

        let receipt: Receipt =
            serde_json::from_value(result).map_err(|e| WalletError::Rpc(e.to_string()))?;
        Ok(Some(receipt.status.as_deref() == Some("0x1")))
    }
}
