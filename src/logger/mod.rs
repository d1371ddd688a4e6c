//! Structured logging for Orbit
//!
//! Tagged, level-filtered logging with:
//! - Per-module debug control via --debug-<module> flags
//! - Standard levels (Error/Warning/Info/Debug/Verbose)
//! - Dual output: colored console + file persistence
//!
//! ## Usage
//!
//! ```ignore
//! use orbit::logger::{self, LogTag};
//!
//! logger::info(LogTag::Session, "Intent registered");
//! logger::error(LogTag::Solver, "Route resolution failed");
//! logger::debug(LogTag::Wallet, "Receipt poll attempt 3"); // --debug-wallet
//! ```
//!
//! Call `logger::init()` once at startup, after the data directories exist.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Scans command-line arguments for --debug-<module>/--verbose flags and
/// opens the log file. Must run once before any logging occurs.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the matching --debug-<module> flag is provided.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (gated by --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush pending file writes (call during shutdown)
pub fn flush() {
    file::flush_file_logging();
}
