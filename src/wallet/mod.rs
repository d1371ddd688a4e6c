/// Wallet connection and transaction dispatch
/// Projection over an external wallet provider: connected address,
/// connect/disconnect, and asynchronous transaction submission outcomes.

pub mod config;
pub mod provider;
pub mod rpc;
pub mod session;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use provider::WalletProvider;
pub use rpc::JsonRpcWallet;
pub use session::{Connector, WalletSession};
pub use types::{ConnectionState, TransactionOutcome, TransactionRequest};
