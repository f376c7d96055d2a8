//! Batch extraction over a directory of saved pages
//!
//! ```text
//! pages/{id}.txt ──decode──▶ ReviewExtractor ──render──▶ cleaned/{id}.txt
//! ```
//!
//! Runs sequentially. An unreadable page is logged and skipped; a failure to
//! write a record aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{ExtractedRecord, RunStats};
use crate::parser::ReviewExtractor;
use crate::storage::{PageStore, RecordWriter};
use crate::utils::decode_lossy;

/// What happened to one source file
#[derive(Debug)]
pub enum CleanOutcome {
    /// Record extracted and written
    Written {
        source: PathBuf,
        output: PathBuf,
        populated: usize,
    },
    /// Source could not be read
    Skipped { source: PathBuf, reason: String },
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct CleanReport {
    pub stats: RunStats,
    pub outcomes: Vec<CleanOutcome>,
}

/// Extracts every page in a store and writes one record per page
pub struct CleanPipeline {
    extractor: ReviewExtractor,
    writer: RecordWriter,
}

impl CleanPipeline {
    pub fn new(writer: RecordWriter) -> Self {
        Self {
            extractor: ReviewExtractor::new(),
            writer,
        }
    }

    /// Process every page file in the store, sorted by file name
    ///
    /// A missing or empty pages directory yields an empty report.
    ///
    /// # Errors
    ///
    /// Returns an error if the pages directory cannot be listed or a record
    /// cannot be written
    pub fn run(&self, store: &PageStore) -> Result<CleanReport> {
        self.run_with_progress(store, |_, _, _| {})
    }

    /// Like [`run`](Self::run), calling `progress(position, total, source)`
    /// before each file is processed
    pub fn run_with_progress<F>(&self, store: &PageStore, mut progress: F) -> Result<CleanReport>
    where
        F: FnMut(usize, usize, &Path),
    {
        let files = store.page_files()?;
        let mut report = CleanReport::default();

        if files.is_empty() {
            tracing::warn!(dir = %store.dir().display(), "No pages to process");
            return Ok(report);
        }

        tracing::info!(
            files = files.len(),
            dir = %store.dir().display(),
            output = %self.writer.output_dir().display(),
            "Starting extraction"
        );

        let total = files.len();
        for (position, source) in (1..).zip(files) {
            progress(position, total, &source);
            let outcome = self.process_file(&source)?;
            match &outcome {
                CleanOutcome::Written { .. } => report.stats.record_processed(),
                CleanOutcome::Skipped { .. } => report.stats.record_skipped(),
            }
            report.outcomes.push(outcome);
        }

        tracing::info!(
            processed = report.stats.processed,
            skipped = report.stats.skipped,
            "Completed extraction"
        );

        Ok(report)
    }

    fn process_file(&self, source: &Path) -> Result<CleanOutcome> {
        tracing::info!(path = %source.display(), "Processing page");

        let bytes = match fs::read(source) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %source.display(), error = %e, "Skipping unreadable page");
                return Ok(CleanOutcome::Skipped {
                    source: source.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        let record = self.extract_bytes(&bytes);
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = self.writer.write(&stem, &record)?;

        Ok(CleanOutcome::Written {
            source: source.to_path_buf(),
            output,
            populated: record.populated_fields(),
        })
    }

    /// Decode raw page bytes and extract the record
    pub fn extract_bytes(&self, bytes: &[u8]) -> ExtractedRecord {
        self.extractor.extract(&decode_lossy(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::StorageError;
    use tempfile::TempDir;

    #[test]
    fn test_extract_bytes_latin1_fallback() {
        let temp = TempDir::new().unwrap();
        let pipeline = CleanPipeline::new(RecordWriter::new(temp.path()).unwrap());

        // "Café" with a Windows-1252 é
        let bytes = b"<html><head><title>Caf\xe9</title></head></html>";
        let record = pipeline.extract_bytes(bytes);
        assert_eq!(record.name.as_deref(), Some("Café"));
    }

    #[test]
    fn test_run_on_missing_directory() {
        let temp = TempDir::new().unwrap();
        let pipeline = CleanPipeline::new(RecordWriter::new(&temp.path().join("out")).unwrap());
        let store = PageStore::open(&temp.path().join("missing"), "index.txt");

        let report = pipeline.run(&store).unwrap();
        assert_eq!(report.stats.total(), 0);
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn test_progress_reported_before_each_file() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        let out = temp.path().join("out");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("2.txt"), "<title>Two</title>").unwrap();
        fs::write(pages.join("1.txt"), "<title>One</title>").unwrap();

        let pipeline = CleanPipeline::new(RecordWriter::new(&out).unwrap());
        let store = PageStore::open(&pages, "index.txt");

        let mut seen = Vec::new();
        let report = pipeline
            .run_with_progress(&store, |position, total, source| {
                let name = source.file_name().unwrap().to_string_lossy().into_owned();
                // the record for this file must not exist yet
                let written = out.join(&name).exists();
                seen.push((position, total, name, written));
            })
            .unwrap();

        assert_eq!(
            seen,
            vec![
                (1, 2, "1.txt".to_string(), false),
                (2, 2, "2.txt".to_string(), false),
            ]
        );
        assert_eq!(report.stats.processed, 2);
    }

    #[test]
    fn test_write_failure_aborts_run() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        let out = temp.path().join("out");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("1.txt"), "<title>One</title>").unwrap();

        let pipeline = CleanPipeline::new(RecordWriter::new(&out).unwrap());
        fs::remove_dir_all(&out).unwrap();

        let err = pipeline
            .run(&PageStore::open(&pages, "index.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Storage(StorageError::Io { .. })
        ));
    }
}
