use std::sync::Arc;

use orbit::{
    arguments,
    configs::{read_configs, Configs},
    conversation::ConversationStore,
    logger::{self, LogTag},
    paths,
    session::SwapSessionController,
    shell,
    solver::{IntentSolver, SolverClient},
    wallet::{Connector, JsonRpcWallet, WalletSession},
};

/// Main entry point for Orbit
///
/// Wires the session components from configuration and hands control to the
/// interactive shell. The session context is explicit: every component is
/// constructed here and injected, nothing is ambient.
#[tokio::main]
async fn main() {
    // Directories must exist before the logger opens its file
    if let Err(e) = paths::ensure_all_directories() {
        eprintln!("Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if arguments::is_help_requested() {
        arguments::print_help();
        return;
    }

    logger::info(LogTag::System, "Orbit starting up...");

    let config_path = arguments::config_path();
    let configs = if config_path.exists() {
        match read_configs(&config_path) {
            Ok(configs) => configs,
            Err(e) => {
                logger::error(LogTag::Config, &e);
                std::process::exit(1);
            }
        }
    } else {
        logger::warning(
            LogTag::Config,
            &format!(
                "{} not found, using default local endpoints",
                config_path.display()
            ),
        );
        Configs::default()
    };

    let solver = match SolverClient::new(&configs.solver_url) {
        Ok(solver) => Arc::new(solver) as Arc<dyn IntentSolver>,
        Err(e) => {
            logger::error(LogTag::Solver, &format!("Failed to build solver client: {}", e));
            std::process::exit(1);
        }
    };

    let mut connectors = Vec::new();
    for entry in &configs.connectors {
        match JsonRpcWallet::new(&entry.rpc_url) {
            Ok(provider) => connectors.push(Connector {
                name: entry.name.clone(),
                provider: Arc::new(provider),
            }),
            Err(e) => {
                logger::error(
                    LogTag::Wallet,
                    &format!("Failed to build connector '{}': {}", entry.name, e),
                );
                std::process::exit(1);
            }
        }
    }

    let chain_names: Vec<&str> = orbit::chains::SUPPORTED_CHAINS
        .iter()
        .map(|c| c.name)
        .collect();
    logger::info(
        LogTag::System,
        &format!(
            "Solver at {}, {} wallet connector(s), chains: {}",
            configs.solver_url,
            connectors.len(),
            chain_names.join(", ")
        ),
    );

    let store = Arc::new(ConversationStore::new());
    let wallet = Arc::new(WalletSession::new(connectors));
    let controller = Arc::new(SwapSessionController::new(
        Arc::clone(&store),
        solver,
        Arc::clone(&wallet),
    ));

    match shell::run(controller, store, wallet).await {
        Ok(()) => logger::info(LogTag::System, "Session closed"),
        Err(e) => {
            logger::error(LogTag::System, &format!("Shell failed: {}", e));
            logger::flush();
            std::process::exit(1);
        }
    }

    logger::flush();
}
