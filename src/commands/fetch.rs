use anyhow::{Context, Result};
use std::path::PathBuf;

use albumscrape::config::Config;
use albumscrape::crawler::{download_pages, PageFetcher};
use albumscrape::storage::{read_url_list, PageStore};
use albumscrape::utils::format_bytes;

/// Download every page listed in the URLs file
pub async fn fetch(
    config: Config,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let input = input.unwrap_or_else(|| config.storage.urls_file.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.storage.pages_dir.clone());

    let urls = read_url_list(&input)
        .with_context(|| format!("Failed to read URLs file: {}", input.display()))?;

    println!("Downloading Review Pages");
    println!("========================");
    println!("URLs:   {} (from {})", urls.len(), input.display());
    println!("Output: {}", output_dir.display());

    let store = PageStore::new(&output_dir, &config.storage.index_file)
        .context("Failed to prepare pages directory")?;
    let fetcher = PageFetcher::from_config(&config).context("Failed to create fetcher")?;

    let report = download_pages(&fetcher, &urls, &store).await?;

    for entry in &report.entries {
        println!("[{}/{}] {}", entry.id, urls.len(), entry.url);
    }

    if let Some((url, error)) = &report.stopped_at {
        println!("\nStopped at {url}: {error}");
    }

    println!("\nDownload Summary");
    println!("================");
    println!("Saved:   {}", report.entries.len());
    println!("Pending: {}", urls.len() - report.entries.len());
    println!("Size:    {}", format_bytes(report.bytes));
    println!("Index:   {}", store.index_path().display());

    Ok(())
}
