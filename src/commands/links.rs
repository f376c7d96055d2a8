use anyhow::{Context, Result};
use std::path::PathBuf;

use albumscrape::config::Config;
use albumscrape::crawler::{ReviewListCrawler, StopReason};
use albumscrape::storage::write_url_list;

/// Collect review links from the listing and write them to the URLs file
pub async fn links(
    mut config: Config,
    max_links: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(max_links) = max_links {
        config.site.max_links = max_links;
    }
    let output = output.unwrap_or_else(|| config.storage.urls_file.clone());

    println!("Collecting Review Links");
    println!("=======================");
    println!("Listing: {}{}", config.site.base_url, config.site.listing_path);
    println!("Limit:   {}", config.site.max_links);

    let crawler =
        ReviewListCrawler::from_config(&config).context("Failed to create listing crawler")?;
    let collection = crawler.collect_links().await;

    for page in &collection.pages {
        println!(
            "Page {:>3}: {} links ({} new)",
            page.page, page.found, page.new_links
        );
    }

    match &collection.stop {
        StopReason::CapReached => println!("Reached link limit"),
        StopReason::FetchFailed { page, status } => match status {
            Some(code) => println!("Stopped at page {page}: status {code}"),
            None => println!("Stopped at page {page}: request failed"),
        },
        StopReason::NoNewLinks { page } => println!("Stopped at page {page}: no new links"),
    }

    if collection.links.is_empty() {
        tracing::warn!("No review links found");
    }

    write_url_list(&output, &collection.links)
        .with_context(|| format!("Failed to write URLs file: {}", output.display()))?;

    println!("\nSaved {} links to {}", collection.links.len(), output.display());
    Ok(())
}
