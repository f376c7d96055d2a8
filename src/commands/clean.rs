use anyhow::{Context, Result};
use std::path::PathBuf;

use albumscrape::config::Config;
use albumscrape::pipeline::{CleanOutcome, CleanPipeline};
use albumscrape::storage::{PageStore, RecordWriter};

/// Extract a text record from every downloaded page
pub fn clean(
    config: Config,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let input_dir = input_dir.unwrap_or_else(|| config.storage.pages_dir.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.storage.cleaned_dir.clone());

    println!("Extracting Review Records");
    println!("=========================");
    println!("Input:  {}", input_dir.display());
    println!("Output: {}", output_dir.display());

    if !input_dir.is_dir() {
        println!("\nPages directory not found: {}", input_dir.display());
        return Ok(());
    }

    let store = PageStore::open(&input_dir, &config.storage.index_file);
    let writer = RecordWriter::new(&output_dir).context("Failed to prepare output directory")?;
    let pipeline = CleanPipeline::new(writer);

    let report = pipeline
        .run_with_progress(&store, |position, total, source| {
            println!("[{position}/{total}] Processing {}", source.display());
        })
        .context("Extraction failed")?;

    if report.outcomes.is_empty() {
        println!("\nNo pages to process");
        return Ok(());
    }

    for outcome in &report.outcomes {
        if let CleanOutcome::Skipped { source, reason } = outcome {
            println!("Skipped {}: {reason}", source.display());
        }
    }

    println!("\nExtraction Summary");
    println!("==================");
    println!("Processed: {}", report.stats.processed);
    println!("Skipped:   {}", report.stats.skipped);

    Ok(())
}
