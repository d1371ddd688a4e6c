/// Filesystem locations for Orbit data
/// All runtime files (logs, configuration) live under a single data root
use std::path::PathBuf;

/// Resolve the data root directory
///
/// Uses the platform data directory (`~/.local/share/orbit` on Linux) and
/// falls back to the working directory when no home is available.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("orbit"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Directory for log files
pub fn get_logs_dir() -> PathBuf {
    get_data_dir().join("logs")
}

/// Path of the main log file
pub fn get_log_file_path() -> PathBuf {
    get_logs_dir().join("orbit.log")
}

/// Default path of the runtime configuration file
pub fn get_default_config_path() -> PathBuf {
    PathBuf::from("configs.json")
}

/// Create all required directories
///
/// Must run before logger initialization so the log file can be created.
pub fn ensure_all_directories() -> Result<(), String> {
    std::fs::create_dir_all(get_logs_dir())
        .map_err(|e| format!("Failed to create logs directory: {}", e))?;
    Ok(())
}
