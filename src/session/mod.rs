/// Swap session orchestration
/// One full intent lifecycle: raw text in, route resolution, proposal,
/// user confirmation, transaction dispatch.

pub mod controller;
pub mod intent;

#[cfg(test)]
mod tests;

pub use controller::SwapSessionController;
pub use intent::{Intent, IntentId, IntentState};
