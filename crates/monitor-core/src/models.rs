use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A single ingested log record.
///
/// Records are created once by [`LogIndex::insert`](crate::index::LogIndex::insert)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Caller-supplied timestamp. Any value is accepted, in any order.
    pub timestamp: i64,
    /// Category (log type) the record belongs to. Compared byte-for-byte.
    pub category: String,
    /// Severity value aggregated by every query.
    pub severity: f64,
}

impl LogRecord {
    pub fn new(timestamp: i64, category: impl Into<String>, severity: f64) -> Self {
        Self {
            timestamp,
            category: category.into(),
            severity,
        }
    }
}

/// Direction of a time-window filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    /// Records strictly earlier than the threshold.
    Before,
    /// Records strictly later than the threshold.
    After,
}

impl TimeMode {
    /// `true` when `timestamp` falls on the selected side of `threshold`.
    ///
    /// The threshold itself never matches.
    pub fn matches(self, timestamp: i64, threshold: i64) -> bool {
        match self {
            TimeMode::Before => timestamp < threshold,
            TimeMode::After => timestamp > threshold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeMode::Before => "BEFORE",
            TimeMode::After => "AFTER",
        }
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `BEFORE` nor `AFTER`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTimeMode(pub String);

impl fmt::Display for UnknownTimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown time mode {:?} (expected BEFORE or AFTER)", self.0)
    }
}

impl std::error::Error for UnknownTimeMode {}

impl FromStr for TimeMode {
    type Err = UnknownTimeMode;

    /// Case-sensitive: only the exact strings `BEFORE` and `AFTER` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BEFORE" => Ok(TimeMode::Before),
            "AFTER" => Ok(TimeMode::After),
            other => Err(UnknownTimeMode(other.to_string())),
        }
    }
}

/// Min / max / mean severity over a set of matching records.
///
/// `count` is the number of records that contributed. When it is zero all
/// three statistics are `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

impl Stats {
    /// The zero triple reported when no record matched a filter.
    pub const EMPTY: Stats = Stats {
        min: 0.0,
        max: 0.0,
        mean: 0.0,
        count: 0,
    };

    /// `true` when no record contributed to these statistics.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
