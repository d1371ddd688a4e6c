/// Wallet session: connection state and transaction submission
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use super::config::{RECEIPT_MAX_ATTEMPTS, RECEIPT_RETRY_DELAY_MS};
use super::provider::WalletProvider;
use super::types::{ConnectionState, TransactionOutcome, TransactionRequest};
use crate::errors::WalletError;
use crate::logger::{self, LogTag};
use crate::solver::SwapRoute;

/// A named provider the user can connect through
pub struct Connector {
    pub name: String,
    pub provider: Arc<dyn WalletProvider>,
}

struct ActiveConnection {
    connector_index: usize,
    address: String,
}

/// Thin state projection over the external wallet provider
///
/// Holds the static connector list and at most one active connection. The
/// signing channel is effectively single-slot; the session controller is
/// responsible for not submitting a second route while one awaits signature.
pub struct WalletSession {
    connectors: Vec<Connector>,
    active: RwLock<Option<ActiveConnection>>,
}

impl WalletSession {
    pub fn new(connectors: Vec<Connector>) -> Self {
        Self {
            connectors,
            active: RwLock::new(None),
        }
    }

    /// Names of the available connectors, in selection order
    pub fn connector_names(&self) -> Vec<String> {
        self.connectors.iter().map(|c| c.name.clone()).collect()
    }

    /// Connect through a connector (the first one when no index is given)
    ///
    /// The provider's first account becomes the connected address.
    pub async fn connect(&self, connector_index: Option<usize>) -> Result<String, WalletError> {
        let index = connector_index.unwrap_or(0);
        let connector = self
            .connectors
            .get(index)
            .ok_or(WalletError::UnknownConnector { index })?;

        let accounts = connector.provider.accounts().await?;
        let address = accounts
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::NoAccounts {
                connector: connector.name.clone(),
            })?;

        *self.active.write() = Some(ActiveConnection {
            connector_index: index,
            address: address.clone(),
        });

        logger::info(
            LogTag::Wallet,
            &format!("Connected {} via '{}'", address, connector.name),
        );

        Ok(address)
    }

    pub fn disconnect(&self) {
        if let Some(active) = self.active.write().take() {
            logger::info(LogTag::Wallet, &format!("Disconnected {}", active.address));
        }
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        match &*self.active.read() {
            Some(active) => ConnectionState::Connected {
                address: active.address.clone(),
                connector: self.connectors[active.connector_index].name.clone(),
            },
            None => ConnectionState::Disconnected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.active.read().is_some()
    }

    /// Connected address, if any
    pub fn address(&self) -> Option<String> {
        self.active.read().as_ref().map(|a| a.address.clone())
    }

    /// Submit a route's transaction for signing
    ///
    /// The payload is exactly `{to: route.router, data: route.calldata,
    /// value: 0}`. Returns immediately with an outcome channel that starts
    /// Pending; the signing prompt and receipt polling run in the
    /// background, so the caller never blocks on the user.
    pub fn submit(
        &self,
        route: &Arc<SwapRoute>,
    ) -> Result<watch::Receiver<TransactionOutcome>, WalletError> {
        let (provider, from) = {
            let guard = self.active.read();
            let active = guard.as_ref().ok_or(WalletError::NotConnected)?;
            (
                self.connectors[active.connector_index].provider.clone(),
                active.address.clone(),
            )
        };

        let tx = TransactionRequest {
            to: route.router.clone(),
            data: route.calldata.clone(),
            value: 0,
        };

        logger::info(
            LogTag::Tx,
            &format!("Submitting transaction to {} from {}", tx.to, from),
        );

        let (sender, receiver) = watch::channel(TransactionOutcome::Pending);
        tokio::spawn(drive_submission(provider, from, tx, sender));

        Ok(receiver)
    }
}

/// Background task: signing prompt, broadcast, then receipt polling
async fn drive_submission(
    provider: Arc<dyn WalletProvider>,
    from: String,
    tx: TransactionRequest,
    sender: watch::Sender<TransactionOutcome>,
) {
    let tx_hash = match provider.send_transaction(&from, &tx).await {
        Ok(hash) => hash,
        Err(e) => {
            logger::warning(LogTag::Tx, &format!("Submission failed: {}", e));
            let _ = sender.send(TransactionOutcome::Failed {
                reason: e.to_string(),
            });
            return;
        }
    };

    logger::info(LogTag::Tx, &format!("Transaction broadcast: {}", tx_hash));

    for attempt in 1..=RECEIPT_MAX_ATTEMPTS {
        tokio::time::sleep(Duration::from_millis(RECEIPT_RETRY_DELAY_MS)).await;

        match provider.transaction_receipt(&tx_hash).await {
            Ok(Some(true)) => {
                logger::info(LogTag::Tx, &format!("Transaction confirmed: {}", tx_hash));
                let _ = sender.send(TransactionOutcome::Success { tx_hash });
                return;
            }
            Ok(Some(false)) => {
                logger::warning(LogTag::Tx, &format!("Transaction reverted: {}", tx_hash));
                let _ = sender.send(TransactionOutcome::Failed {
                    reason: "Transaction reverted".to_string(),
                });
                return;
            }
            Ok(None) => {
                logger::debug(
                    LogTag::Tx,
                    &format!("Receipt poll {}/{}: not mined", attempt, RECEIPT_MAX_ATTEMPTS),
                );
            }
            Err(e) => {
                logger::debug(
                    LogTag::Tx,
                    &format!(
                        "Receipt poll {}/{} failed: {}",
                        attempt, RECEIPT_MAX_ATTEMPTS, e
                    ),
                );
            }
        }
    }

    // No receipt within the polling window; outcome stays pending
    logger::warning(
        LogTag::Tx,
        &format!("Gave up polling receipt for {}", tx_hash),
    );
}
