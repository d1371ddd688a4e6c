/// Conversation message types
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::solver::SwapRoute;

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Agent => write!(f, "agent"),
        }
    }
}

/// What a message carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    TransactionProposal,
}

/// Immutable record in the conversation
///
/// Created when the user submits text or the agent answers; never edited or
/// removed afterwards. A proposal owns its route; the signing step receives
/// a reference, not a copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub kind: MessageKind,
    /// Present iff kind is TransactionProposal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Arc<SwapRoute>>,
}

impl Message {
    /// Create a user text message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            kind: MessageKind::Text,
            route: None,
        }
    }

    /// Create an agent text message
    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Agent,
            content: content.into(),
            kind: MessageKind::Text,
            route: None,
        }
    }

    /// Create an agent transaction proposal carrying a route
    pub fn proposal(content: impl Into<String>, route: Arc<SwapRoute>) -> Self {
        Self {
            role: MessageRole::Agent,
            content: content.into(),
            kind: MessageKind::TransactionProposal,
            route: Some(route),
        }
    }
}
