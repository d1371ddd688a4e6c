/// Solver service configuration - hardcoded parameters

/// Default solver endpoint (overridable via configs.json)
pub const DEFAULT_SOLVER_API: &str = "http://127.0.0.1:8000/solve_intent";

/// Route resolution timeout (seconds)
///
/// Routes embed time-sensitive gas/price estimates, so a slow answer is
/// worth less than a fast failure.
pub const SOLVE_TIMEOUT_SECS: u64 = 15;
