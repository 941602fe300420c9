//! Command-file parsing and test-case discovery.
//!
//! Turns each textual command line into a typed [`Command`] and locates
//! `input.txt` files for batch runs.

use std::path::{Path, PathBuf};

use monitor_core::error::ParseError;
use monitor_core::models::TimeMode;
use tracing::warn;

/// File name looked up by [`find_input_files`].
pub const INPUT_FILE_NAME: &str = "input.txt";

/// File name written next to each discovered input in batch mode.
pub const OUTPUT_FILE_NAME: &str = "output.txt";

// ── Command ───────────────────────────────────────────────────────────────────

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `1 <timestamp>;<category>;<severity>`
    Insert {
        timestamp: i64,
        category: String,
        severity: f64,
    },
    /// `2 <category>`
    CategoryStats { category: String },
    /// `3 <mode> <timestamp>`
    TimeStats { mode: TimeMode, timestamp: i64 },
    /// `4 <mode> <category> <timestamp>`
    CategoryTimeStats {
        mode: TimeMode,
        category: String,
        timestamp: i64,
    },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse one command line.
///
/// `line_no` is the 1-based position of the line, carried into any
/// [`ParseError`]. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str, line_no: usize) -> Result<Option<Command>, ParseError> {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return Ok(None);
    }

    let (op, rest) = match line.find(char::is_whitespace) {
        Some(split) => line.split_at(split),
        None => (line, ""),
    };

    let command = match op.parse::<u8>() {
        Ok(1) => parse_insert(rest, line_no)?,
        Ok(2) => {
            let mut args = rest.split_whitespace();
            Command::CategoryStats {
                category: require(args.next(), "category", line_no)?.to_string(),
            }
        }
        Ok(3) => {
            let mut args = rest.split_whitespace();
            let mode = parse_mode(require(args.next(), "mode", line_no)?, line_no)?;
            let timestamp = parse_timestamp(require(args.next(), "timestamp", line_no)?, line_no)?;
            Command::TimeStats { mode, timestamp }
        }
        Ok(4) => {
            let mut args = rest.split_whitespace();
            let mode = parse_mode(require(args.next(), "mode", line_no)?, line_no)?;
            let category = require(args.next(), "category", line_no)?.to_string();
            let timestamp = parse_timestamp(require(args.next(), "timestamp", line_no)?, line_no)?;
            Command::CategoryTimeStats {
                mode,
                category,
                timestamp,
            }
        }
        _ => {
            return Err(ParseError::UnknownOperation {
                line: line_no,
                op: op.to_string(),
            })
        }
    };

    Ok(Some(command))
}

/// Find every `input.txt` under `dir`, recursively, sorted by path.
pub fn find_input_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Test-case directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == INPUT_FILE_NAME)
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// `<timestamp>;<category>;<severity>`; fields past the third are ignored.
fn parse_insert(rest: &str, line_no: usize) -> Result<Command, ParseError> {
    let mut fields = rest.trim().split(';');

    let timestamp_field = fields.next().map(str::trim).filter(|f| !f.is_empty());
    let timestamp = parse_timestamp(require(timestamp_field, "timestamp", line_no)?, line_no)?;

    // Category text is kept verbatim, surrounding whitespace included.
    let category = require(fields.next().filter(|f| !f.is_empty()), "category", line_no)?;

    let severity_field = fields.next().map(str::trim).filter(|f| !f.is_empty());
    let severity_text = require(severity_field, "severity", line_no)?;
    let severity = severity_text
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidSeverity {
            line: line_no,
            value: severity_text.to_string(),
        })?;

    Ok(Command::Insert {
        timestamp,
        category: category.to_string(),
        severity,
    })
}

fn require<'a>(
    value: Option<&'a str>,
    field: &'static str,
    line_no: usize,
) -> Result<&'a str, ParseError> {
    value.ok_or(ParseError::MissingField {
        line: line_no,
        field,
    })
}

fn parse_timestamp(text: &str, line_no: usize) -> Result<i64, ParseError> {
    text.parse::<i64>()
        .map_err(|_| ParseError::InvalidTimestamp {
            line: line_no,
            value: text.to_string(),
        })
}

fn parse_mode(text: &str, line_no: usize) -> Result<TimeMode, ParseError> {
    text.parse::<TimeMode>()
        .map_err(|_| ParseError::InvalidMode {
            line: line_no,
            value: text.to_string(),
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
