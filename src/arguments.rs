/// Command line argument scanning
///
/// Orbit takes a handful of flags; they are scanned from a raw argv snapshot
/// rather than parsed into a full CLI tree. Logger debug flags
/// (--debug-<module>, --verbose) are consumed by the logger's own
/// initialization from the same snapshot.
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

/// Snapshot of process arguments taken at startup
pub static CMD_ARGS: Lazy<Vec<String>> = Lazy::new(|| env::args().collect());

/// Check whether a literal flag is present
pub fn has_flag(flag: &str) -> bool {
    CMD_ARGS.iter().any(|arg| arg == flag)
}

/// Check if help was requested
pub fn is_help_requested() -> bool {
    has_flag("--help") || has_flag("-h")
}

/// Resolve the configuration file path (--config <path> or the default)
pub fn config_path() -> PathBuf {
    let args = &*CMD_ARGS;
    for (i, arg) in args.iter().enumerate() {
        if arg == "--config" {
            if let Some(path) = args.get(i + 1) {
                return PathBuf::from(path);
            }
        }
    }
    crate::paths::get_default_config_path()
}

/// Print usage information
pub fn print_help() {
    println!("Orbit - intent-driven swap agent");
    println!();
    println!("USAGE:");
    println!("    orbit [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    -h, --help              Print this help text");
    println!("    --config <path>         Use a specific configs.json");
    println!("    --verbose               Show verbose logs for all modules");
    println!("    --debug-<module>        Enable debug logs for one module");
    println!("                            (e.g. --debug-solver, --debug-wallet)");
    println!();
    println!("CHAT COMMANDS:");
    println!("    Type a swap intent in plain language to request a route.");
    println!("    /connect [n]            Connect wallet (connector n, default first)");
    println!("    /disconnect             Disconnect wallet");
    println!("    /sign [id]              Sign a proposed route (latest when omitted)");
    println!("    /intents                Show intent states");
    println!("    /quit                   Exit");
}
