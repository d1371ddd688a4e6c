/// Test doubles for the wallet provider seam
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Notify;

use super::provider::WalletProvider;
use super::types::TransactionRequest;
use crate::errors::WalletError;
use crate::solver::SwapRoute;

/// A route with the shape of a real solver response
pub fn test_route() -> Arc<SwapRoute> {
    Arc::new(SwapRoute {
        token_in: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
        token_out: "0x4200000000000000000000000000000000000006".to_string(),
        amount_in: 10_000_000,
        min_amount_out: 4_950_000_000_000_000,
        router: "0x1111111111111111111111111111111111111111".to_string(),
        calldata: "0xabc123".to_string(),
        estimated_gas: 120_000,
        fee_tier: Some(3000),
    })
}

/// Scriptable wallet provider
///
/// Records every submission; receipt polls consume the scripted sequence and
/// report "not mined" once it is exhausted.
pub struct MockProvider {
    accounts: Vec<String>,
    send_result: Result<String, WalletError>,
    /// When set, send_transaction blocks until notified (an open signing
    /// prompt)
    send_gate: Option<Arc<Notify>>,
    receipts: Mutex<VecDeque<Option<bool>>>,
    sent: Arc<Mutex<Vec<(String, TransactionRequest)>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            send_result: Ok(
                "0x9999999999999999999999999999999999999999999999999999999999999999".to_string(),
            ),
            send_gate: None,
            receipts: Mutex::new(VecDeque::new()),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_accounts(mut self, accounts: &[&str]) -> Self {
        self.accounts = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_send_error(mut self, message: &str) -> Self {
        self.send_result = Err(WalletError::Submission(message.to_string()));
        self
    }

    pub fn with_send_gate(mut self, gate: Arc<Notify>) -> Self {
        self.send_gate = Some(gate);
        self
    }

    pub fn with_receipts(self, receipts: &[Option<bool>]) -> Self {
        *self.receipts.lock() = receipts.iter().copied().collect();
        self
    }

    /// Handle on the submission log, usable after the provider is moved
    /// into a session
    pub fn sent_log(&self) -> Arc<Mutex<Vec<(String, TransactionRequest)>>> {
        Arc::clone(&self.sent)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        Ok(self.accounts.clone())
    }

    async fn send_transaction(
        &self,
        from: &str,
        tx: &TransactionRequest,
    ) -> Result<String, WalletError> {
        if let Some(gate) = &self.send_gate {
            gate.notified().await;
        }
        self.sent.lock().push((from.to_string(), tx.clone()));
        self.send_result.clone()
    }

    async fn transaction_receipt(&self, _tx_hash: &str) -> Result<Option<bool>, WalletError> {
        Ok(self.receipts.lock().pop_front().unwrap_or(None))
    }
}
