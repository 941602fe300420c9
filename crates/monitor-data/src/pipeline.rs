//! File-level entry points: one command file, or a directory of test cases.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use monitor_core::error::{MonitorError, Result};
use monitor_core::settings::OutputFormat;
use tracing::{debug, info, warn};

use crate::processor::{CommandProcessor, ProcessSummary};
use crate::reader::{find_input_files, OUTPUT_FILE_NAME};

/// Results of a batch run over a test-case directory.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Input files processed successfully, with their counters.
    pub completed: Vec<(PathBuf, ProcessSummary)>,
    /// Input files that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Process the command file at `input` with a fresh index and write the
/// responses to `output`, creating its parent directory when missing.
pub fn process_file(input: &Path, output: &Path, format: OutputFormat) -> Result<ProcessSummary> {
    let read_err = |source: io::Error| MonitorError::FileRead {
        path: input.to_path_buf(),
        source,
    };
    let reader = File::open(input).map(BufReader::new).map_err(read_err)?;

    let write_err = |source: io::Error| MonitorError::FileWrite {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut writer = File::create(output).map(BufWriter::new).map_err(write_err)?;

    let mut processor = CommandProcessor::new(format);
    let summary = processor.process_with(reader, &mut writer, read_err, write_err)?;
    writer.flush().map_err(write_err)?;

    debug!(
        "Processed {} -> {}: {} inserts, {} queries, {} skipped",
        input.display(),
        output.display(),
        summary.inserts,
        summary.queries,
        summary.skipped
    );

    Ok(summary)
}

/// Run every `input.txt` under `dir`, each against its own index, writing
/// `output.txt` beside it.
///
/// A failing case is logged and recorded; the remaining cases still run.
pub fn process_testcases(dir: &Path, format: OutputFormat) -> Result<BatchSummary> {
    let inputs = find_input_files(dir);
    if inputs.is_empty() {
        return Err(MonitorError::NoInputFiles(dir.to_path_buf()));
    }

    let mut batch = BatchSummary::default();
    for input in inputs {
        let output = input.with_file_name(OUTPUT_FILE_NAME);
        match process_file(&input, &output, format) {
            Ok(summary) => batch.completed.push((input, summary)),
            Err(e) => {
                warn!(input = %input.display(), error = %e, "test case failed");
                batch.failed.push((input, e.to_string()));
            }
        }
    }

    info!(
        completed = batch.completed.len(),
        failed = batch.failed.len(),
        "test cases processed"
    );

    Ok(batch)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_case(root: &Path, name: &str, content: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("input.txt");
        std::fs::write(&path, content).unwrap();
        path
    }

    // ── process_file ─────────────────────────────────────────────────────────

    #[test]
    fn test_process_file_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = write_case(dir.path(), "test1", "1 10;ERROR;5.0\n1 20;ERROR;3.0\n2 ERROR\n");
        let output = dir.path().join("out").join("output.txt");

        let summary = process_file(&input, &output, OutputFormat::Text).unwrap();

        assert_eq!(summary.inserts, 2);
        assert_eq!(summary.queries, 1);
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "No output\nNo output\nMin: 3, Max: 5, Mean: 4\n");
    }

    #[test]
    fn test_process_file_missing_input() {
        let dir = TempDir::new().unwrap();
        let err = process_file(
            &dir.path().join("absent.txt"),
            &dir.path().join("output.txt"),
            OutputFormat::Text,
        )
        .unwrap_err();

        assert!(matches!(err, MonitorError::FileRead { .. }));
        assert!(!dir.path().join("output.txt").exists());
    }

    #[test]
    fn test_process_file_empty_input_creates_empty_output() {
        let dir = TempDir::new().unwrap();
        let input = write_case(dir.path(), "empty", "");
        let output = dir.path().join("output.txt");

        let summary = process_file(&input, &output, OutputFormat::Text).unwrap();

        assert_eq!(summary, ProcessSummary::default());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_process_file_invalid_utf8_keeps_going() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        std::fs::write(&input, b"1 10;ERROR;5.0\n\xff\xfe\n2 ERROR\n").unwrap();
        let output = dir.path().join("output.txt");

        let summary = process_file(&input, &output, OutputFormat::Text).unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "No output\nMin: 5, Max: 5, Mean: 5\n"
        );
    }

    // ── process_testcases ────────────────────────────────────────────────────

    #[test]
    fn test_process_testcases_isolates_indexes() {
        let dir = TempDir::new().unwrap();
        write_case(dir.path(), "test1", "1 10;ERROR;5.0\n2 ERROR\n");
        write_case(dir.path(), "test2", "2 ERROR\n");

        let batch = process_testcases(dir.path(), OutputFormat::Text).unwrap();

        assert!(batch.is_success());
        assert_eq!(batch.completed.len(), 2);
        let second = std::fs::read_to_string(dir.path().join("test2/output.txt")).unwrap();
        assert_eq!(second, "No entries for log type: ERROR\n");
    }

    #[test]
    fn test_process_testcases_empty_dir() {
        let dir = TempDir::new().unwrap();
        let err = process_testcases(dir.path(), OutputFormat::Text).unwrap_err();
        assert!(matches!(err, MonitorError::NoInputFiles(_)));
    }
}
