/// Intent lifecycle types
use std::sync::Arc;

use crate::solver::SwapRoute;
use crate::wallet::TransactionOutcome;

/// Monotonically increasing intent identifier
///
/// Doubles as the request identity for response fencing: a completion is
/// applied only to the intent that requested it, and only while that intent
/// is still resolving.
pub type IntentId = u64;

/// Lifecycle state of a single intent
///
/// Resolving -> Proposed -> Signing -> Settled, with Resolving -> Failed on
/// solver errors. Failed and Settled are terminal; the user starts a new
/// intent instead of reviving an old one. Intents progress independently of
/// each other.
#[derive(Debug, Clone)]
pub enum IntentState {
    /// Route resolution in flight
    Resolving,
    /// Route received and presented for confirmation
    Proposed(Arc<SwapRoute>),
    /// Route resolution failed; terminal
    Failed,
    /// Submitted to the wallet, awaiting signature/receipt
    Signing,
    /// Final outcome reported by the wallet; terminal
    Settled(TransactionOutcome),
}

impl IntentState {
    /// Short label for state displays
    pub fn label(&self) -> &'static str {
        match self {
            IntentState::Resolving => "resolving",
            IntentState::Proposed(_) => "proposed",
            IntentState::Failed => "failed",
            IntentState::Signing => "signing",
            IntentState::Settled(_) => "settled",
        }
    }
}

/// One submitted intent and where it stands
#[derive(Debug, Clone)]
pub struct Intent {
    pub id: IntentId,
    pub text: String,
    pub state: IntentState,
}
