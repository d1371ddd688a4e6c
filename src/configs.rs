/// Runtime configuration loaded from configs.json
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::solver::config::DEFAULT_SOLVER_API;

/// A wallet connector entry: a named external signer endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub name: String,
    pub rpc_url: String,
}

/// Runtime configuration
///
/// Chains are a static registry (see `chains.rs`) and deliberately not part
/// of this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configs {
    pub solver_url: String,
    pub connectors: Vec<ConnectorConfig>,
}

impl Default for Configs {
    fn default() -> Self {
        Self {
            solver_url: DEFAULT_SOLVER_API.to_string(),
            connectors: vec![ConnectorConfig {
                name: "injected".to_string(),
                rpc_url: "http://127.0.0.1:8545".to_string(),
            }],
        }
    }
}

/// Reads configs.json from the given path
pub fn read_configs<P: AsRef<Path>>(path: P) -> Result<Configs, String> {
    let data = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read {}: {}", path.as_ref().display(), e))?;
    let configs: Configs =
        serde_json::from_str(&data).map_err(|e| format!("Invalid configs.json: {}", e))?;

    if configs.connectors.is_empty() {
        return Err("configs.json must list at least one wallet connector".to_string());
    }

    Ok(configs)
}
