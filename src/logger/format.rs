//! Log formatting and output
//!
//! Colorized console lines with fixed-width tag/level columns, hex
//! address/hash highlighting, word wrapping, and plain-text file mirroring.

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{stdout, ErrorKind, Write};

/// Column widths for alignment
const TAG_WIDTH: usize = 8;
const LEVEL_WIDTH: usize = 7;

/// Maximum console line length before wrapping
const MAX_LINE_LENGTH: usize = 140;

/// Hex addresses (20 bytes) and transaction hashes (32 bytes)
static HEX_ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"0x[0-9a-fA-F]{40}\b").expect("Invalid address pattern"));
static TX_HASH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"0x[0-9a-fA-F]{64}\b").expect("Invalid tx hash pattern"));

/// Format and output a log message to console and file
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let prefix = format!(
        "{} [{}] [{}] ",
        time.dimmed(),
        format_tag(&tag),
        format_level(level)
    );
    let prefix_width = time.len() + TAG_WIDTH + LEVEL_WIDTH + 7;

    let available = MAX_LINE_LENGTH.saturating_sub(prefix_width).max(40);
    let chunks = wrap_text(message, available);

    print_stdout_safe(&format!("{}{}", prefix, highlight_message(&chunks[0])));

    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    write_to_file(&format!(
        "{} [{}] [{}] {}",
        timestamp,
        tag.as_str(),
        level.as_str(),
        chunks[0]
    ));

    if chunks.len() > 1 {
        let continuation = " ".repeat(prefix_width);
        for chunk in &chunks[1..] {
            print_stdout_safe(&format!("{}{}", continuation, highlight_message(chunk)));
            write_to_file(&format!(
                "{} [{}] [{}] {}",
                timestamp,
                tag.as_str(),
                level.as_str(),
                chunk
            ));
        }
    }
}

/// Format a tag with its color, padded to the tag column
fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.as_str(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Chat => padded.bright_white().bold(),
        LogTag::Solver => padded.bright_blue().bold(),
        LogTag::Wallet => padded.bright_magenta().bold(),
        LogTag::Session => padded.bright_green().bold(),
        LogTag::Tx => padded.bright_cyan().bold(),
        LogTag::Config => padded.bright_white().bold(),
        LogTag::Test => padded.bright_blue().bold(),
        LogTag::Other(_) => padded.white().bold(),
    }
}

/// Format a level, padded to the level column
fn format_level(level: LogLevel) -> ColoredString {
    let padded = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.yellow().bold(),
        _ => padded.white().bold(),
    }
}

/// Highlight hex addresses, transaction hashes, and status words
fn highlight_message(message: &str) -> String {
    // Hashes first: an address pattern would also match the head of a hash
    let highlighted = TX_HASH_PATTERN
        .replace_all(message, |caps: &regex::Captures| {
            let hash = &caps[0];
            format!(
                "{}...{}",
                hash[..10].bright_yellow().bold(),
                hash[hash.len() - 8..].bright_yellow().bold()
            )
        })
        .to_string();

    let highlighted = HEX_ADDRESS_PATTERN
        .replace_all(&highlighted, |caps: &regex::Captures| {
            let addr = &caps[0];
            format!(
                "{}...{}",
                addr[..6].bright_cyan().bold(),
                addr[addr.len() - 4..].bright_cyan().bold()
            )
        })
        .to_string();

    highlighted
        .replace("SUCCESS", &"SUCCESS".green().bold().to_string())
        .replace("FAILED", &"FAILED".red().bold().to_string())
        .replace("PENDING", &"PENDING".yellow().bold().to_string())
}

/// Print to stdout, exiting quietly on a broken pipe
fn print_stdout_safe(message: &str) {
    if let Err(e) = writeln!(stdout(), "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
    let _ = stdout().flush();
}

/// Wrap text at word boundaries, respecting existing newlines
///
/// Words longer than the width (URLs, calldata) are left on their own line
/// rather than broken apart.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for line in text.split('\n') {
        if line.len() <= max_width {
            result.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + word.len() + 1 <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                result.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            result.push(current);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}
