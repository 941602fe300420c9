use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

// ── OutputFormat ───────────────────────────────────────────────────────────────

/// How response lines are rendered in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `Min: .., Max: .., Mean: ..` lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Aggregate severity statistics over a log command file
#[derive(Parser, Debug, Clone)]
#[command(
    name = "log-monitor",
    about = "Aggregate severity statistics over a log command file",
    version
)]
pub struct Settings {
    /// Command file to read
    #[arg(long, short, default_value = "testcases/test1/input.txt")]
    pub input: PathBuf,

    /// File that receives one response line per command
    #[arg(long, short, default_value = "testcases/test1/output.txt")]
    pub output: PathBuf,

    /// Process every input.txt found under this directory instead
    #[arg(long, conflicts_with_all = ["input", "output"])]
    pub testcases: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, env = "LOG_MONITOR_LEVEL", default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse settings from the process arguments, exiting on `--help` or
    /// invalid input.
    pub fn load() -> Self {
        Settings::parse()
    }

    /// Parse an explicit argument list (the first element is the program
    /// name). Used by tests.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Settings::try_parse_from(args)
    }

    /// Level actually used for logging; `--debug` overrides `--log-level`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            self.log_level.as_str()
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
