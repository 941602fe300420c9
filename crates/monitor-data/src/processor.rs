//! Command execution against an owned [`LogIndex`].

use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use monitor_core::error::{MonitorError, Result};
use monitor_core::formatting::{format_not_found, format_stats, INSERT_ACK};
use monitor_core::index::LogIndex;
use monitor_core::models::Stats;
use monitor_core::settings::OutputFormat;
use serde::Serialize;
use tracing::{debug, warn};

use crate::reader::{parse_command, Command};

// ── Response ──────────────────────────────────────────────────────────────────

/// Outcome of one executed command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Response {
    Inserted,
    NotFound { category: String },
    Stats(Stats),
}

impl Response {
    /// Render as a single output line, without the trailing newline.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(match self {
                Response::Inserted => INSERT_ACK.to_string(),
                Response::NotFound { category } => format_not_found(category),
                Response::Stats(stats) => format_stats(stats),
            }),
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }

    fn from_lookup(category: String, stats: Option<Stats>) -> Self {
        match stats {
            Some(stats) => Response::Stats(stats),
            None => Response::NotFound { category },
        }
    }
}

// ── ProcessSummary ────────────────────────────────────────────────────────────

/// Counters collected while processing one command stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Lines read, blank ones included.
    pub lines: usize,
    pub inserts: usize,
    pub queries: usize,
    /// Queries answered with "no entries for log type".
    pub not_found: usize,
    /// Malformed lines that produced no output.
    pub skipped: usize,
}

// ── CommandProcessor ──────────────────────────────────────────────────────────

/// Owns a [`LogIndex`] and applies parsed commands to it.
pub struct CommandProcessor {
    index: LogIndex,
    format: OutputFormat,
}

impl CommandProcessor {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_index(LogIndex::new(), format)
    }

    /// Start from an already populated index.
    pub fn with_index(index: LogIndex, format: OutputFormat) -> Self {
        Self { index, format }
    }

    pub fn index(&self) -> &LogIndex {
        &self.index
    }

    /// Consume the processor, handing back its index.
    pub fn into_index(self) -> LogIndex {
        self.index
    }

    /// Apply one command.
    pub fn execute(&mut self, command: Command) -> Response {
        match command {
            Command::Insert {
                timestamp,
                category,
                severity,
            } => {
                self.index.insert(timestamp, &category, severity);
                Response::Inserted
            }
            Command::CategoryStats { category } => {
                let stats = self.index.stats_by_category(&category);
                Response::from_lookup(category, stats)
            }
            Command::TimeStats { mode, timestamp } => {
                Response::Stats(self.index.stats_by_time(mode, timestamp))
            }
            Command::CategoryTimeStats {
                mode,
                category,
                timestamp,
            } => {
                let stats = self
                    .index
                    .stats_by_category_and_time(&category, mode, timestamp);
                Response::from_lookup(category, stats)
            }
        }
    }

    /// Read commands line by line from `reader`, writing one response line
    /// per executed command to `writer`.
    ///
    /// Blank lines are ignored. Malformed lines are logged and skipped
    /// without output; processing continues with the next line. Invalid
    /// UTF-8 is replaced with U+FFFD rather than aborting the stream.
    pub fn process<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        writer: &mut W,
    ) -> Result<ProcessSummary> {
        self.process_with(reader, writer, MonitorError::Io, MonitorError::Io)
    }

    /// [`CommandProcessor::process`] with caller-chosen wrapping of read and
    /// write failures, so file-backed callers can attach paths.
    pub(crate) fn process_with<R, W, RE, WE>(
        &mut self,
        mut reader: R,
        writer: &mut W,
        read_err: RE,
        write_err: WE,
    ) -> Result<ProcessSummary>
    where
        R: BufRead,
        W: Write,
        RE: Fn(io::Error) -> MonitorError,
        WE: Fn(io::Error) -> MonitorError,
    {
        let mut summary = ProcessSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).map_err(&read_err)? == 0 {
                break;
            }
            summary.lines += 1;
            let line_no = summary.lines;
            let line = decode_line(&buf, line_no);

            let command = match parse_command(&line, line_no) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    warn!(line = e.line(), error = %e, "skipping malformed command");
                    summary.skipped += 1;
                    continue;
                }
            };

            let response = self.execute(command);
            match &response {
                Response::Inserted => summary.inserts += 1,
                Response::NotFound { .. } => {
                    summary.queries += 1;
                    summary.not_found += 1;
                }
                Response::Stats(_) => summary.queries += 1,
            }

            let rendered = response.render(self.format)?;
            writeln!(writer, "{}", rendered).map_err(&write_err)?;
        }

        debug!(
            lines = summary.lines,
            inserts = summary.inserts,
            queries = summary.queries,
            skipped = summary.skipped,
            records = self.index.len(),
            "command stream processed"
        );

        Ok(summary)
    }
}

/// Strip the `\n` / `\r\n` terminator and decode, replacing invalid UTF-8.
fn decode_line(raw: &[u8], line_no: usize) -> Cow<'_, str> {
    let mut bytes = raw.strip_suffix(b"\n").unwrap_or(raw);
    bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

    let line = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = line {
        warn!(line = line_no, "invalid UTF-8 in command line; replaced");
    }
    line
}

// ── Tests ─────────────────────────────────────────────────────────────────────
