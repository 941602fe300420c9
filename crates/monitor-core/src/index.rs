//! In-memory log index and the aggregate queries it answers.
//!
//! Records live once in an insertion-ordered arena. A secondary index maps
//! each category to the arena positions of its records, so category queries
//! scan only their bucket (O(k)) while time queries scan everything (O(n)).

use std::collections::HashMap;

use crate::models::{LogRecord, Stats, TimeMode};

// ── SeverityAccumulator ───────────────────────────────────────────────────────

/// Single-pass min / max / sum / count accumulator.
///
/// Extremes start as `None` rather than sentinel values; they are only
/// converted to the zero triple in [`SeverityAccumulator::finish`].
#[derive(Debug, Default)]
struct SeverityAccumulator {
    min: Option<f64>,
    max: Option<f64>,
    sum: f64,
    count: usize,
}

impl SeverityAccumulator {
    fn add(&mut self, severity: f64) {
        self.min = Some(match self.min {
            Some(m) => propagating_min(m, severity),
            None => severity,
        });
        self.max = Some(match self.max {
            Some(m) => propagating_max(m, severity),
            None => severity,
        });
        self.sum += severity;
        self.count += 1;
    }

    fn finish(self) -> Stats {
        match (self.min, self.max) {
            (Some(min), Some(max)) if self.count > 0 => Stats {
                min,
                max,
                mean: self.sum / self.count as f64,
                count: self.count,
            },
            _ => Stats::EMPTY,
        }
    }
}

// `f64::min`/`max` discard NaN; aggregation must propagate it instead.
fn propagating_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn propagating_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

// ── LogIndex ──────────────────────────────────────────────────────────────────

/// Owns every ingested [`LogRecord`] plus a per-category secondary index.
///
/// Invariants:
/// - every record sits in `records` exactly once and its position appears in
///   exactly one bucket of `by_category`, the one named by its category;
/// - no bucket is ever empty. Buckets are created on first insert and only
///   [`LogIndex::clear`] removes them.
#[derive(Debug, Default)]
pub struct LogIndex {
    records: Vec<LogRecord>,
    by_category: HashMap<String, Vec<usize>>,
}

impl LogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one record. Always succeeds.
    pub fn insert(&mut self, timestamp: i64, category: &str, severity: f64) {
        let position = self.records.len();
        self.records.push(LogRecord::new(timestamp, category, severity));

        match self.by_category.get_mut(category) {
            Some(bucket) => bucket.push(position),
            None => {
                self.by_category.insert(category.to_string(), vec![position]);
            }
        }
    }

    /// Min / max / mean severity of every record in `category`.
    ///
    /// Returns `None` when the category has never been inserted.
    pub fn stats_by_category(&self, category: &str) -> Option<Stats> {
        let bucket = self.by_category.get(category)?;
        let mut acc = SeverityAccumulator::default();
        for &position in bucket {
            acc.add(self.records[position].severity);
        }
        Some(acc.finish())
    }

    /// Statistics over every record strictly before or after `threshold`.
    ///
    /// Never reports "not found": zero matches yield [`Stats::EMPTY`].
    pub fn stats_by_time(&self, mode: TimeMode, threshold: i64) -> Stats {
        let mut acc = SeverityAccumulator::default();
        for record in &self.records {
            if mode.matches(record.timestamp, threshold) {
                acc.add(record.severity);
            }
        }
        acc.finish()
    }

    /// Statistics over the records of `category` strictly before or after
    /// `threshold`.
    ///
    /// `None` is reserved for a category that was never inserted; a known
    /// category with no record in the window yields [`Stats::EMPTY`].
    pub fn stats_by_category_and_time(
        &self,
        category: &str,
        mode: TimeMode,
        threshold: i64,
    ) -> Option<Stats> {
        let bucket = self.by_category.get(category)?;
        let mut acc = SeverityAccumulator::default();
        for &position in bucket {
            let record = &self.records[position];
            if mode.matches(record.timestamp, threshold) {
                acc.add(record.severity);
            }
        }
        Some(acc.finish())
    }

    /// Total number of records ingested.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    /// Every category seen so far, in no particular order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys().map(String::as_str)
    }

    /// Number of records in `category`; `0` when it is unknown.
    pub fn category_len(&self, category: &str) -> usize {
        self.by_category.get(category).map_or(0, Vec::len)
    }

    /// Drop every record and bucket.
    pub fn clear(&mut self) {
        self.records.clear();
        self.by_category.clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
