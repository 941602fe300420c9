//! Command ingestion layer for the log monitor.
//!
//! Parses command files line by line into typed requests, executes them
//! against an owned [`monitor_core::LogIndex`], and runs single files or
//! whole test-case directories.

pub mod pipeline;
pub mod processor;
pub mod reader;
