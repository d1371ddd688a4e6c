/// Intent solver client
/// Turns free-text swap intents into executable routes by calling the
/// external solver service. Pure request/response mapping; retry policy, if
/// any, belongs to the caller.

pub mod client;
pub mod config;
pub mod types;

pub use client::{IntentSolver, SolverClient};
pub use types::{IntentRequest, SwapRoute};
