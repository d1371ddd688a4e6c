/// Session controller test suite
///
/// Exercises the full intent lifecycle against scripted solver and wallet
/// doubles: synchronous appends, verbatim proposals, failure degradation,
/// connection gating, exact submission payloads, completion ordering,
/// response fencing, and the single signing slot.
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;

use super::controller::SwapSessionController;
use super::intent::{IntentId, IntentState};
use crate::chains::ZERO_ADDRESS;
use crate::conversation::{ConversationStore, MessageKind, MessageRole};
use crate::errors::{RouteResolutionError, WalletError};
use crate::solver::{IntentSolver, SwapRoute};
use crate::wallet::testing::{test_route, MockProvider};
use crate::wallet::{Connector, TransactionOutcome, WalletSession};

const CONNECTED_ADDRESS: &str = "0xcaller00000000000000000000000000000000aa";

// =============================================================================
// TEST DOUBLES
// =============================================================================

struct ScriptedResolution {
    result: Result<SwapRoute, RouteResolutionError>,
    /// When set, the resolution blocks until notified (an in-flight network
    /// call)
    gate: Option<Arc<Notify>>,
}

/// Solver double scripted per intent text
struct MockSolver {
    script: Mutex<HashMap<String, ScriptedResolution>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockSolver {
    fn new() -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn on(self, text: &str, result: Result<SwapRoute, RouteResolutionError>) -> Self {
        self.script.lock().insert(
            text.to_string(),
            ScriptedResolution { result, gate: None },
        );
        self
    }

    fn on_gated(
        self,
        text: &str,
        result: Result<SwapRoute, RouteResolutionError>,
        gate: Arc<Notify>,
    ) -> Self {
        self.script.lock().insert(
            text.to_string(),
            ScriptedResolution {
                result,
                gate: Some(gate),
            },
        );
        self
    }
}

#[async_trait]
impl IntentSolver for MockSolver {
    async fn resolve(
        &self,
        raw_text: &str,
        caller_address: &str,
    ) -> Result<SwapRoute, RouteResolutionError> {
        self.calls
            .lock()
            .push((raw_text.to_string(), caller_address.to_string()));

        let entry = self
            .script
            .lock()
            .remove(raw_text)
            .expect("unscripted intent text");
        if let Some(gate) = entry.gate {
            gate.notified().await;
        }
        entry.result
    }
}

// =============================================================================
// HARNESS
// =============================================================================

struct Harness {
    controller: Arc<SwapSessionController>,
    store: Arc<ConversationStore>,
    wallet: Arc<WalletSession>,
    solver: Arc<MockSolver>,
    sent: Arc<Mutex<Vec<(String, crate::wallet::TransactionRequest)>>>,
}

fn harness(solver: MockSolver, provider: MockProvider) -> Harness {
    let sent = provider.sent_log();
    let store = Arc::new(ConversationStore::new());
    let wallet = Arc::new(WalletSession::new(vec![Connector {
        name: "mock".to_string(),
        provider: Arc::new(provider),
    }]));
    let solver = Arc::new(solver);
    let controller = Arc::new(SwapSessionController::new(
        Arc::clone(&store),
        solver.clone() as Arc<dyn IntentSolver>,
        Arc::clone(&wallet),
    ));

    Harness {
        controller,
        store,
        wallet,
        solver,
        sent,
    }
}

fn owned_route() -> SwapRoute {
    (*test_route()).clone()
}

/// Wait for the background outcome watcher to settle an intent
///
/// Sleeps (not yields) so a paused test clock can auto-advance through the
/// receipt poller's delays.
async fn wait_for_settled(controller: &SwapSessionController, id: IntentId) -> TransactionOutcome {
    for _ in 0..1000 {
        if let Some(IntentState::Settled(outcome)) = controller.intent_state(id) {
            return outcome;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    panic!("intent #{} never settled", id);
}

// =============================================================================
// RESOLUTION FLOW
// =============================================================================

#[tokio::test]
async fn user_message_appends_synchronously() {
    let h = harness(
        MockSolver::new().on("Swap 10 USDC to ETH on Optimism", Ok(owned_route())),
        MockProvider::new(),
    );

    let id = h
        .controller
        .begin_intent("Swap 10 USDC to ETH on Optimism")
        .unwrap();

    // Before any resolution: exactly one user message, loading raised
    let messages = h.store.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, MessageRole::User);
    assert_eq!(messages[1].content, "Swap 10 USDC to ETH on Optimism");
    assert!(h.store.is_loading());
    assert!(matches!(
        h.controller.intent_state(id),
        Some(IntentState::Resolving)
    ));
}

#[tokio::test]
async fn empty_intent_is_a_noop() {
    let h = harness(MockSolver::new(), MockProvider::new());

    assert!(h.controller.begin_intent("   ").is_none());
    assert_eq!(h.store.len(), 1);
    assert!(!h.store.is_loading());
}

#[tokio::test]
async fn successful_resolution_appends_proposal_verbatim() {
    let h = harness(
        MockSolver::new().on("Swap 10 USDC to ETH on Optimism", Ok(owned_route())),
        MockProvider::new(),
    );

    let id = h
        .controller
        .begin_intent("Swap 10 USDC to ETH on Optimism")
        .unwrap();
    h.controller.resolve_intent(id).await;

    let messages = h.store.messages();
    assert_eq!(messages.len(), 3);
    let proposal = &messages[2];
    assert_eq!(proposal.role, MessageRole::Agent);
    assert_eq!(proposal.kind, MessageKind::TransactionProposal);
    // Route carried unchanged field-for-field
    assert_eq!(**proposal.route.as_ref().unwrap(), owned_route());

    assert!(!h.store.is_loading());
    assert!(matches!(
        h.controller.intent_state(id),
        Some(IntentState::Proposed(_))
    ));

    // Disconnected resolution quotes against the zero address
    assert_eq!(h.solver.calls.lock()[0].1, ZERO_ADDRESS);
}

#[tokio::test]
async fn failed_resolution_appends_generic_text() {
    let h = harness(
        MockSolver::new().on(
            "swap everything",
            Err(RouteResolutionError::HttpStatus { status: 500 }),
        ),
        MockProvider::new(),
    );

    let id = h.controller.begin_intent("swap everything").unwrap();
    h.controller.resolve_intent(id).await;

    let messages = h.store.messages();
    assert_eq!(messages.len(), 3);
    let reply = &messages[2];
    assert_eq!(reply.role, MessageRole::Agent);
    assert_eq!(reply.kind, MessageKind::Text);
    assert!(reply.route.is_none());
    // Generic notice, not the raw cause
    assert!(!reply.content.contains("500"));

    assert!(!h.store.is_loading());
    assert!(matches!(
        h.controller.intent_state(id),
        Some(IntentState::Failed)
    ));
    assert!(h.controller.latest_proposal_id().is_none());
}

#[tokio::test]
async fn completions_append_in_completion_order() {
    let gate = Arc::new(Notify::new());
    let first_route = owned_route();
    let second_route = SwapRoute {
        calldata: "0xdef456".to_string(),
        ..owned_route()
    };

    let h = harness(
        MockSolver::new()
            .on_gated("swap first", Ok(first_route), gate.clone())
            .on("swap second", Ok(second_route.clone())),
        MockProvider::new(),
    );

    let first = h.controller.begin_intent("swap first").unwrap();
    let second = h.controller.begin_intent("swap second").unwrap();

    let controller = Arc::clone(&h.controller);
    let blocked = tokio::spawn(async move {
        controller.resolve_intent(first).await;
    });

    // The second intent resolves while the first is still in flight
    h.controller.resolve_intent(second).await;
    gate.notify_one();
    blocked.await.unwrap();

    let messages = h.store.messages();
    // greeting, user x2, then proposals in completion order
    assert_eq!(messages.len(), 5);
    assert_eq!(
        messages[3].route.as_ref().unwrap().calldata,
        second_route.calldata
    );
    assert_eq!(messages[4].route.as_ref().unwrap().calldata, "0xabc123");

    assert!(matches!(
        h.controller.intent_state(first),
        Some(IntentState::Proposed(_))
    ));
    assert!(matches!(
        h.controller.intent_state(second),
        Some(IntentState::Proposed(_))
    ));
}

#[tokio::test]
async fn stale_resolution_is_discarded() {
    let h = harness(
        MockSolver::new().on("swap once", Err(RouteResolutionError::Network("down".into()))),
        MockProvider::new(),
    );

    let id = h.controller.begin_intent("swap once").unwrap();
    h.controller.resolve_intent(id).await;
    let settled_len = h.store.len();

    // A second completion for the same request identity must not re-apply
    h.controller.resolve_intent(id).await;
    assert_eq!(h.store.len(), settled_len);
    assert!(matches!(
        h.controller.intent_state(id),
        Some(IntentState::Failed)
    ));

    // Unknown ids are ignored outright
    h.controller.resolve_intent(999).await;
    assert_eq!(h.store.len(), settled_len);
}

// =============================================================================
// CONFIRMATION FLOW
// =============================================================================

#[tokio::test]
async fn confirm_while_disconnected_is_rejected() {
    let h = harness(
        MockSolver::new().on("swap it", Ok(owned_route())),
        MockProvider::new().with_accounts(&[CONNECTED_ADDRESS]),
    );

    let id = h.controller.begin_intent("swap it").unwrap();
    h.controller.resolve_intent(id).await;
    let len_before = h.store.len();

    let result = h.controller.confirm_proposal(id);
    assert!(matches!(result, Err(WalletError::NotConnected)));

    // No submission, no state change, no message
    assert!(h.sent.lock().is_empty());
    assert_eq!(h.store.len(), len_before);
    assert!(matches!(
        h.controller.intent_state(id),
        Some(IntentState::Proposed(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn confirm_submits_exact_payload_once() {
    let h = harness(
        MockSolver::new().on("swap it", Ok(owned_route())),
        MockProvider::new()
            .with_accounts(&[CONNECTED_ADDRESS])
            .with_receipts(&[Some(true)]),
    );

    h.wallet.connect(None).await.unwrap();
    let id = h.controller.begin_intent("swap it").unwrap();
    h.controller.resolve_intent(id).await;
    let len_before = h.store.len();

    h.controller.confirm_proposal(id).unwrap();
    assert_eq!(h.controller.awaiting_signature(), Some(id));

    let outcome = wait_for_settled(&h.controller, id).await;
    assert!(matches!(outcome, TransactionOutcome::Success { .. }));
    assert_eq!(h.controller.awaiting_signature(), None);

    // Exactly one submission with the exact payload
    let calls = h.sent.lock().clone();
    assert_eq!(calls.len(), 1);
    let (from, tx) = &calls[0];
    let route = owned_route();
    assert_eq!(from, CONNECTED_ADDRESS);
    assert_eq!(tx.to, route.router);
    assert_eq!(tx.data, route.calldata);
    assert_eq!(tx.value, 0);

    // Outcome piggybacks on the proposal; no message is synthesized
    assert_eq!(h.store.len(), len_before);

    // A settled intent is no longer confirmable
    assert!(matches!(
        h.controller.confirm_proposal(id),
        Err(WalletError::InvalidIntentState { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn rejected_signature_settles_as_failed() {
    let h = harness(
        MockSolver::new().on("swap it", Ok(owned_route())),
        MockProvider::new()
            .with_accounts(&[CONNECTED_ADDRESS])
            .with_send_error("User rejected the request"),
    );

    h.wallet.connect(None).await.unwrap();
    let id = h.controller.begin_intent("swap it").unwrap();
    h.controller.resolve_intent(id).await;
    let len_before = h.store.len();

    h.controller.confirm_proposal(id).unwrap();
    let outcome = wait_for_settled(&h.controller, id).await;

    match outcome {
        TransactionOutcome::Failed { reason } => {
            assert!(reason.contains("User rejected the request"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    // Inline on the intent only; the conversation flows on untouched
    assert_eq!(h.store.len(), len_before);
    assert_eq!(h.controller.awaiting_signature(), None);
}

#[tokio::test(start_paused = true)]
async fn signing_slot_admits_one_route_at_a_time() {
    let prompt = Arc::new(Notify::new());
    let h = harness(
        MockSolver::new()
            .on("swap a", Ok(owned_route()))
            .on(
                "swap b",
                Ok(SwapRoute {
                    calldata: "0xdef456".to_string(),
                    ..owned_route()
                }),
            ),
        MockProvider::new()
            .with_accounts(&[CONNECTED_ADDRESS])
            .with_send_gate(prompt.clone())
            .with_receipts(&[Some(true), Some(true)]),
    );

    h.wallet.connect(None).await.unwrap();
    let a = h.controller.begin_intent("swap a").unwrap();
    h.controller.resolve_intent(a).await;
    let b = h.controller.begin_intent("swap b").unwrap();
    h.controller.resolve_intent(b).await;

    // First confirmation parks at the open signing prompt
    h.controller.confirm_proposal(a).unwrap();
    assert_eq!(h.controller.awaiting_signature(), Some(a));

    // Second confirmation is rejected without reaching the provider
    assert!(matches!(
        h.controller.confirm_proposal(b),
        Err(WalletError::SigningSlotBusy { intent_id }) if intent_id == a
    ));
    assert!(h.sent.lock().is_empty());
    assert!(matches!(
        h.controller.intent_state(b),
        Some(IntentState::Proposed(_))
    ));

    // Approve the first prompt; the slot frees and b becomes confirmable
    prompt.notify_one();
    wait_for_settled(&h.controller, a).await;
    assert_eq!(h.controller.awaiting_signature(), None);

    h.controller.confirm_proposal(b).unwrap();
    prompt.notify_one();
    let outcome = wait_for_settled(&h.controller, b).await;
    assert!(matches!(outcome, TransactionOutcome::Success { .. }));
    assert_eq!(h.sent.lock().len(), 2);
}

#[tokio::test]
async fn latest_proposal_tracks_newest_confirmable_intent() {
    let h = harness(
        MockSolver::new()
            .on("swap a", Ok(owned_route()))
            .on("swap b", Ok(owned_route())),
        MockProvider::new(),
    );

    assert!(h.controller.latest_proposal_id().is_none());

    let a = h.controller.begin_intent("swap a").unwrap();
    h.controller.resolve_intent(a).await;
    assert_eq!(h.controller.latest_proposal_id(), Some(a));

    let b = h.controller.begin_intent("swap b").unwrap();
    h.controller.resolve_intent(b).await;
    assert_eq!(h.controller.latest_proposal_id(), Some(b));

    // Older proposals stay visible and inert in history
    let proposals: Vec<_> = h
        .store
        .messages()
        .into_iter()
        .filter(|m| m.kind == MessageKind::TransactionProposal)
        .collect();
    assert_eq!(proposals.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn connected_resolution_quotes_against_wallet_address() {
    let h = harness(
        MockSolver::new().on("swap it", Ok(owned_route())),
        MockProvider::new().with_accounts(&[CONNECTED_ADDRESS]),
    );

    h.wallet.connect(None).await.unwrap();
    let id = h.controller.begin_intent("swap it").unwrap();
    h.controller.resolve_intent(id).await;

    assert_eq!(h.solver.calls.lock()[0].1, CONNECTED_ADDRESS);
}
