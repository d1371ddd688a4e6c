/// File persistence for log output
///
/// Plain-text log lines (no ANSI codes) appended to the log file under the
/// data directory. Failures to write never interrupt the program.
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Open the log file for appending
pub fn init_file_logging() {
    let path = crate::paths::get_log_file_path();
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            *LOG_FILE.lock() = Some(file);
        }
        Err(e) => {
            eprintln!("Logger: failed to open {}: {}", path.display(), e);
        }
    }
}

/// Append one line to the log file
pub fn write_to_file(line: &str) {
    let mut guard = LOG_FILE.lock();
    if let Some(file) = guard.as_mut() {
        let _ = writeln!(file, "{}", line);
    }
}

/// Flush pending writes (shutdown path)
pub fn flush_file_logging() {
    let mut guard = LOG_FILE.lock();
    if let Some(file) = guard.as_mut() {
        let _ = file.flush();
    }
}
