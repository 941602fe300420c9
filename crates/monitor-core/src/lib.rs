//! Core domain for the log monitor.
//!
//! Holds the record and statistics models, the in-memory [`index::LogIndex`]
//! that answers every aggregate query, a lock-guarded handle for sharing it
//! across threads, and the error, formatting and settings types used by the
//! outer crates.

pub mod error;
pub mod formatting;
pub mod index;
pub mod models;
pub mod settings;
pub mod shared;

pub use error::{MonitorError, ParseError, Result};
pub use index::LogIndex;
pub use models::{LogRecord, Stats, TimeMode};
pub use shared::SharedLogIndex;
