/// Append-only conversation store
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{Message, MessageKind};
use crate::solver::SwapRoute;

/// Greeting seeded as the first agent message of every session
pub const GREETING: &str =
    "gm. I am Orbit. Tell me what you want to swap (e.g., \"Swap 10 USDC to ETH on Optimism\").";

/// Capacity of the appended-message feed; lagging observers miss messages,
/// the store never blocks an append on them.
const FEED_CAPACITY: usize = 64;

/// Single source of truth for the message sequence
///
/// History is append-only; insertion order is the sole ordering signal. The
/// loading flag is transient UI state, true exactly while a route resolution
/// is in flight, and never persisted into history.
pub struct ConversationStore {
    messages: RwLock<Vec<Message>>,
    loading: AtomicBool,
    feed: broadcast::Sender<Message>,
}

impl ConversationStore {
    /// Create a store seeded with the greeting
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            messages: RwLock::new(vec![Message::agent(GREETING)]),
            loading: AtomicBool::new(false),
            feed,
        }
    }

    /// Append a message at the end of the history
    ///
    /// Never reorders or removes. Observers subscribed to the feed receive
    /// the message after it is visible in the history.
    pub fn append(&self, message: Message) {
        self.messages.write().push(message.clone());
        let _ = self.feed.send(message);
    }

    /// Order-preserving snapshot of the history
    pub fn messages(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Toggle the transient loading flag
    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Route of the most recent transaction proposal, if any
    ///
    /// Derived from history; older proposals stay visible and inert.
    pub fn last_route(&self) -> Option<Arc<SwapRoute>> {
        self.messages
            .read()
            .iter()
            .rev()
            .find(|m| m.kind == MessageKind::TransactionProposal)
            .and_then(|m| m.route.clone())
    }

    /// Subscribe to messages appended after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.feed.subscribe()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
