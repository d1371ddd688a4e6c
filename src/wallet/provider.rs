/// Wallet provider seam
use async_trait::async_trait;

use super::types::TransactionRequest;
use crate::errors::WalletError;

/// An external signer the session can attach to
///
/// The connection protocol behind a provider is external; the session
/// depends only on these observable operations.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the provider currently exposes; the first one becomes the
    /// connected address
    async fn accounts(&self) -> Result<Vec<String>, WalletError>;

    /// Hand a transaction to the provider for signing and broadcast
    ///
    /// Resolves with the transaction hash once the user approves; a
    /// rejection surfaces as `WalletError::Submission` with the provider's
    /// message. May stay outstanding for as long as the signing prompt is
    /// open.
    async fn send_transaction(
        &self,
        from: &str,
        tx: &TransactionRequest,
    ) -> Result<String, WalletError>;

    /// Receipt status for a broadcast transaction
    ///
    /// `None` while unmined, then `Some(true)` on success or `Some(false)`
    /// on revert.
    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<bool>, WalletError>;
}
