/// HTTP client for the intent solver service
use async_trait::async_trait;
use std::time::Duration;

use super::config::SOLVE_TIMEOUT_SECS;
use super::types::{IntentRequest, SwapRoute};
use crate::errors::RouteResolutionError;
use crate::logger::{self, LogTag};

/// Injection seam for route resolution
///
/// The controller depends on this trait, never on the HTTP client directly,
/// so sessions are testable without a running solver.
#[async_trait]
pub trait IntentSolver: Send + Sync {
    /// Resolve a free-text intent into an executable swap route
    async fn resolve(
        &self,
        raw_text: &str,
        caller_address: &str,
    ) -> Result<SwapRoute, RouteResolutionError>;
}

/// Solver service client
///
/// Exactly one network request per `resolve` call: no retries, no caching.
/// Every call is a fresh quote since routes embed time-sensitive estimates.
pub struct SolverClient {
    client: reqwest::Client,
    solver_url: String,
}

impl SolverClient {
    pub fn new(solver_url: impl Into<String>) -> Result<Self, RouteResolutionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SOLVE_TIMEOUT_SECS))
            .build()
            .map_err(|e| RouteResolutionError::Network(e.to_string()))?;

        Ok(Self {
            client,
            solver_url: solver_url.into(),
        })
    }
}

#[async_trait]
impl IntentSolver for SolverClient {
    async fn resolve(
        &self,
        raw_text: &str,
        caller_address: &str,
    ) -> Result<SwapRoute, RouteResolutionError> {
        let raw_text = raw_text.trim();
        if raw_text.is_empty() {
            return Err(RouteResolutionError::EmptyIntent);
        }

        logger::debug(
            LogTag::Solver,
            &format!("Resolving intent for {}: {}", caller_address, raw_text),
        );

        let request = IntentRequest {
            raw_text: raw_text.to_string(),
            user_address: caller_address.to_string(),
        };

        let response = self
            .client
            .post(&self.solver_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteResolutionError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let route: SwapRoute = response.json().await?;
        route.validate().map_err(RouteResolutionError::Decode)?;

        logger::debug(
            LogTag::Solver,
            &format!(
                "Route resolved: {} -> {} via {} (gas estimate {})",
                route.token_in, route.token_out, route.router, route.estimated_gas
            ),
        );

        Ok(route)
    }
}
