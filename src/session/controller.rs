/// Swap session controller
///
/// Orchestrates one full intent lifecycle: takes raw text, invokes the
/// solver, appends the resulting message, and on user confirmation hands the
/// route to the wallet session. All collaborators are injected; the
/// controller owns no ambient state.
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use super::intent::{Intent, IntentId, IntentState};
use crate::chains::ZERO_ADDRESS;
use crate::conversation::{ConversationStore, Message};
use crate::errors::{RouteResolutionError, WalletError};
use crate::logger::{self, LogTag};
use crate::solver::{IntentSolver, SwapRoute};
use crate::wallet::{TransactionOutcome, WalletSession};

/// Reply shown when route resolution fails; the underlying error goes to the
/// log, never to the conversation
const ROUTE_FAILURE_REPLY: &str = "Sorry, I couldn't calculate a route for that. Try again.";

/// Proposal wording for a resolved route
fn proposal_content(route: &SwapRoute) -> String {
    format!(
        "I found a route! Swap {} wei for at least {} wei. Ready to sign?",
        route.amount_in, route.min_amount_out
    )
}

pub struct SwapSessionController {
    store: Arc<ConversationStore>,
    solver: Arc<dyn IntentSolver>,
    wallet: Arc<WalletSession>,
    intents: Arc<RwLock<HashMap<IntentId, Intent>>>,
    next_id: AtomicU64,
    /// Single signing slot: at most one route awaits user signature
    signing_slot: Arc<Mutex<Option<IntentId>>>,
}

impl SwapSessionController {
    pub fn new(
        store: Arc<ConversationStore>,
        solver: Arc<dyn IntentSolver>,
        wallet: Arc<WalletSession>,
    ) -> Self {
        Self {
            store,
            solver,
            wallet,
            intents: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(0),
            signing_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Register a new intent from user text
    ///
    /// Synchronous part of submission: the user message is appended and the
    /// loading flag raised before any network activity. Empty text after
    /// trimming is a no-op.
    pub fn begin_intent(&self, text: &str) -> Option<IntentId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        self.store.append(Message::user(text));
        self.store.set_loading(true);
        self.intents.write().insert(
            id,
            Intent {
                id,
                text: text.to_string(),
                state: IntentState::Resolving,
            },
        );

        logger::info(LogTag::Session, &format!("Intent #{} registered: {}", id, text));

        Some(id)
    }

    /// Resolve a registered intent into a route
    ///
    /// Exactly one solver call; the completion appends its message at
    /// completion time, so concurrent intents land in completion order.
    pub async fn resolve_intent(&self, id: IntentId) {
        let text = {
            let intents = self.intents.read();
            match intents.get(&id) {
                Some(intent) if matches!(intent.state, IntentState::Resolving) => {
                    intent.text.clone()
                }
                _ => {
                    logger::warning(
                        LogTag::Session,
                        &format!("Intent #{} is not awaiting resolution", id),
                    );
                    return;
                }
            }
        };

        // Zero address keeps quote-only requests working while disconnected
        let caller = self
            .wallet
            .address()
            .unwrap_or_else(|| ZERO_ADDRESS.to_string());

        let result = self.solver.resolve(&text, &caller).await;
        self.apply_resolution(id, result);
    }

    /// Non-blocking submission: synchronous registration plus a spawned
    /// resolution
    pub fn submit_intent(self: Arc<Self>, text: &str) -> Option<IntentId> {
        let id = self.begin_intent(text)?;
        tokio::spawn(async move {
            self.resolve_intent(id).await;
        });
        Some(id)
    }

    /// Apply a resolution outcome to its intent
    ///
    /// Fenced by request identity: the result lands only if the intent is
    /// still resolving; anything else means this completion is stale and is
    /// discarded without touching the conversation.
    fn apply_resolution(&self, id: IntentId, result: Result<SwapRoute, RouteResolutionError>) {
        let applied = {
            let mut intents = self.intents.write();
            match intents.get_mut(&id) {
                Some(intent) if matches!(intent.state, IntentState::Resolving) => {
                    match result {
                        Ok(route) => {
                            let route = Arc::new(route);
                            intent.state = IntentState::Proposed(Arc::clone(&route));
                            Some(Some(route))
                        }
                        Err(e) => {
                            logger::warning(
                                LogTag::Session,
                                &format!("Route resolution failed for intent #{}: {}", id, e),
                            );
                            intent.state = IntentState::Failed;
                            Some(None)
                        }
                    }
                }
                _ => None,
            }
        };

        match applied {
            Some(Some(route)) => {
                self.store
                    .append(Message::proposal(proposal_content(&route), route));
                logger::info(LogTag::Session, &format!("Intent #{} proposed", id));
            }
            Some(None) => {
                self.store.append(Message::agent(ROUTE_FAILURE_REPLY));
            }
            None => {
                logger::warning(
                    LogTag::Session,
                    &format!("Discarding stale resolution for intent #{}", id),
                );
            }
        }

        self.store.set_loading(false);
    }

    /// Confirm a proposed route and hand it to the wallet for signing
    ///
    /// Guard-and-reject on every precondition: wallet connected, signing
    /// slot free, intent actually proposed. A rejection changes no state and
    /// appends no message. On success the intent enters Signing and the
    /// outcome channel is returned; the terminal outcome is projected onto
    /// the intent (no new conversation message) by a background watcher.
    pub fn confirm_proposal(
        &self,
        id: IntentId,
    ) -> Result<watch::Receiver<TransactionOutcome>, WalletError> {
        if !self.wallet.is_connected() {
            return Err(WalletError::NotConnected);
        }

        let route = {
            let mut slot = self.signing_slot.lock();
            if let Some(busy) = *slot {
                return Err(WalletError::SigningSlotBusy { intent_id: busy });
            }

            let mut intents = self.intents.write();
            let intent = intents
                .get_mut(&id)
                .ok_or(WalletError::InvalidIntentState { intent_id: id })?;
            let route = match &intent.state {
                IntentState::Proposed(route) => Arc::clone(route),
                _ => return Err(WalletError::InvalidIntentState { intent_id: id }),
            };

            intent.state = IntentState::Signing;
            *slot = Some(id);
            route
        };

        logger::info(
            LogTag::Session,
            &format!("Intent #{} confirmed, requesting signature", id),
        );

        match self.wallet.submit(&route) {
            Ok(receiver) => {
                self.watch_outcome(id, receiver.clone());
                Ok(receiver)
            }
            Err(e) => {
                // Submission never started; put the proposal back
                let mut intents = self.intents.write();
                if let Some(intent) = intents.get_mut(&id) {
                    intent.state = IntentState::Proposed(route);
                }
                *self.signing_slot.lock() = None;
                Err(e)
            }
        }
    }

    /// Project the terminal outcome onto the intent and free the signing slot
    fn watch_outcome(&self, id: IntentId, mut receiver: watch::Receiver<TransactionOutcome>) {
        let intents = Arc::clone(&self.intents);
        let signing_slot = Arc::clone(&self.signing_slot);

        tokio::spawn(async move {
            loop {
                let outcome = receiver.borrow().clone();
                if outcome.is_terminal() {
                    if let Some(intent) = intents.write().get_mut(&id) {
                        intent.state = IntentState::Settled(outcome.clone());
                    }
                    *signing_slot.lock() = None;
                    logger::info(
                        LogTag::Session,
                        &format!("Intent #{} settled: {}", id, outcome),
                    );
                    return;
                }

                if receiver.changed().await.is_err() {
                    // Outcome channel closed while still pending; release the
                    // slot so the session stays usable
                    *signing_slot.lock() = None;
                    logger::warning(
                        LogTag::Session,
                        &format!("Intent #{} outcome still pending, signing slot released", id),
                    );
                    return;
                }
            }
        });
    }

    /// State of one intent
    pub fn intent_state(&self, id: IntentId) -> Option<IntentState> {
        self.intents.read().get(&id).map(|i| i.state.clone())
    }

    /// All intents ordered by id
    pub fn intents(&self) -> Vec<Intent> {
        let mut intents: Vec<Intent> = self.intents.read().values().cloned().collect();
        intents.sort_by_key(|i| i.id);
        intents
    }

    /// Most recent intent still awaiting confirmation
    pub fn latest_proposal_id(&self) -> Option<IntentId> {
        self.intents
            .read()
            .values()
            .filter(|i| matches!(i.state, IntentState::Proposed(_)))
            .map(|i| i.id)
            .max()
    }

    /// Intent currently holding the signing slot
    pub fn awaiting_signature(&self) -> Option<IntentId> {
        *self.signing_slot.lock()
    }
}
