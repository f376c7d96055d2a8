//! Common test utilities

use std::fs;
use std::path::Path;

/// Test fixture paths
pub const FIXTURES_DIR: &str = "tests/fixtures/html";

/// Load an HTML fixture by file name
#[allow(dead_code)]
pub fn load_fixture(filename: &str) -> String {
    let path = format!("{FIXTURES_DIR}/{filename}");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

/// Listing page HTML linking to each of the given hrefs
#[allow(dead_code)]
pub fn listing_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<li><a href=\"{href}\">Review</a></li>\n"))
        .collect();

    format!(
        "<html><body><nav><a href=\"/about/\">About</a></nav><ul>\n{anchors}</ul></body></html>"
    )
}

/// Review links `/reviews/albums/album-{n}/` for every n in the range
#[allow(dead_code)]
pub fn review_paths(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|n| format!("/reviews/albums/album-{n}/")).collect()
}

/// Write raw pages into a directory
#[allow(dead_code)]
pub fn write_pages(dir: &Path, pages: &[(&str, &[u8])]) {
    fs::create_dir_all(dir).unwrap();
    for (name, content) in pages {
        fs::write(dir.join(name), content).unwrap();
    }
}
