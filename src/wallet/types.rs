/// Wallet session and transaction types
use serde::{Deserialize, Serialize};

/// Connection state projected from the active provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected { address: String, connector: String },
}

/// Payload handed to the wallet provider for signing
///
/// All supported flows are token-to-token swaps routed through an
/// approval/router pattern, so `value` is always 0; native-asset-in swaps
/// are outside the current route contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub to: String,
    pub data: String,
    pub value: u128,
}

/// Outcome of a submitted transaction
///
/// Delivered asynchronously; a submission is not guaranteed to ever reach a
/// terminal state (the user may dismiss the signing prompt indefinitely).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    Pending,
    Success { tx_hash: String },
    Failed { reason: String },
}

impl TransactionOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionOutcome::Pending)
    }
}

impl std::fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionOutcome::Pending => write!(f, "PENDING"),
            TransactionOutcome::Success { tx_hash } => write!(f, "SUCCESS ({})", tx_hash),
            TransactionOutcome::Failed { reason } => write!(f, "FAILED ({})", reason),
        }
    }
}
