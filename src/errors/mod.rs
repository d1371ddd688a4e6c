/// Structured error taxonomy for Orbit
///
/// Two families: route resolution (solver side) and wallet (connection and
/// transaction dispatch). No error here is fatal to a session; every failure
/// degrades to a visible, recoverable state.

// =============================================================================
// ROUTE RESOLUTION ERRORS
// =============================================================================

/// Failure to turn an intent into a swap route
///
/// Carries no partial route data; a failed resolution yields nothing.
#[derive(Debug, Clone)]
pub enum RouteResolutionError {
    /// Intent text was empty after trimming
    EmptyIntent,
    /// Transport-level failure reaching the solver
    Network(String),
    /// Solver answered with a non-success status
    HttpStatus { status: u16 },
    /// Solver response could not be decoded as a swap route
    Decode(String),
    /// Solver did not answer within the configured deadline
    Timeout { timeout_secs: u64 },
}

impl std::fmt::Display for RouteResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteResolutionError::EmptyIntent => write!(f, "Intent text is empty"),
            RouteResolutionError::Network(msg) => write!(f, "Solver network error: {}", msg),
            RouteResolutionError::HttpStatus { status } => {
                write!(f, "Solver returned HTTP {}", status)
            }
            RouteResolutionError::Decode(msg) => {
                write!(f, "Solver response is not a swap route: {}", msg)
            }
            RouteResolutionError::Timeout { timeout_secs } => {
                write!(f, "Solver timed out after {}s", timeout_secs)
            }
        }
    }
}

impl std::error::Error for RouteResolutionError {}

impl From<reqwest::Error> for RouteResolutionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RouteResolutionError::Timeout {
                timeout_secs: crate::solver::config::SOLVE_TIMEOUT_SECS,
            }
        } else if err.is_decode() {
            RouteResolutionError::Decode(err.to_string())
        } else {
            RouteResolutionError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RouteResolutionError {
    fn from(err: serde_json::Error) -> Self {
        RouteResolutionError::Decode(err.to_string())
    }
}

// =============================================================================
// WALLET ERRORS
// =============================================================================

/// Failure in the wallet session or transaction dispatch
#[derive(Debug, Clone)]
pub enum WalletError {
    /// Signature flow attempted without an active wallet session
    NotConnected,
    /// Connector index outside the configured list
    UnknownConnector { index: usize },
    /// Provider reported no accounts on connect
    NoAccounts { connector: String },
    /// Another route is already awaiting user signature
    SigningSlotBusy { intent_id: u64 },
    /// The intent is not in a confirmable state
    InvalidIntentState { intent_id: u64 },
    /// Transport or protocol failure talking to the provider
    Rpc(String),
    /// Signing rejected or transaction reverted, with the provider's message
    Submission(String),
}

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletError::NotConnected => write!(f, "Wallet is not connected"),
            WalletError::UnknownConnector { index } => {
                write!(f, "No wallet connector at index {}", index)
            }
            WalletError::NoAccounts { connector } => {
                write!(f, "Connector '{}' exposes no accounts", connector)
            }
            WalletError::SigningSlotBusy { intent_id } => {
                write!(f, "Intent #{} is already awaiting signature", intent_id)
            }
            WalletError::InvalidIntentState { intent_id } => {
                write!(f, "Intent #{} has no route awaiting confirmation", intent_id)
            }
            WalletError::Rpc(msg) => write!(f, "Wallet provider error: {}", msg),
            WalletError::Submission(msg) => write!(f, "Transaction submission failed: {}", msg),
        }
    }
}

impl std::error::Error for WalletError {}

impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        WalletError::Rpc(err.to_string())
    }
}
