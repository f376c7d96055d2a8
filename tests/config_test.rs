//! Tests for config module

use albumscrape::config::Config;
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_KEYS: &[&str] = &[
    "ALBUMSCRAPE_BASE_URL",
    "ALBUMSCRAPE_MAX_LINKS",
    "ALBUMSCRAPE_REQUEST_TIMEOUT",
    "ALBUMSCRAPE_PAGES_DIR",
    "ALBUMSCRAPE_LOG_FORMAT",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.site.base_url, "https://pitchfork.com");
    assert_eq!(config.site.max_links, 200);
    assert_eq!(config.request_timeout(), Duration::from_secs(20));
    assert_eq!(config.listing_timeout(), Duration::from_secs(15));
    assert_eq!(config.storage.urls_file, PathBuf::from("urls.txt"));
    assert_eq!(config.storage.index_file, "index.txt");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_exists() {
    let config_path = Path::new("config.toml");
    assert!(
        config_path.exists(),
        "config.toml should exist in project root"
    );
}

#[test]
fn test_shipped_config_loads() {
    let config = Config::from_file(Path::new("config.toml")).expect("config.toml should parse");
    assert!(config.validate().is_ok());
    assert_eq!(config.site.listing_path, "/reviews/albums/?page={page}");
    assert_eq!(config.site.link_pattern, Config::default().site.link_pattern);
}

#[test]
fn test_from_file_partial() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[site]\nbase_url = \"http://localhost:8080\"\n\n[storage]\npages_dir = \"raw\""
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.site.base_url, "http://localhost:8080");
    assert_eq!(config.storage.pages_dir, PathBuf::from("raw"));
    assert_eq!(config.crawler.requests_per_second, 10);
}

#[test]
fn test_from_file_invalid_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[site\nbase_url = ").unwrap();
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_load_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[site]\nlisting_path = \"/reviews/albums/\"").unwrap();
    assert!(Config::load(Some(file.path())).is_err());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("ALBUMSCRAPE_BASE_URL", "http://127.0.0.1:9999");
    std::env::set_var("ALBUMSCRAPE_MAX_LINKS", "25");
    std::env::set_var("ALBUMSCRAPE_REQUEST_TIMEOUT", "5");
    std::env::set_var("ALBUMSCRAPE_PAGES_DIR", "/tmp/pages");
    std::env::set_var("ALBUMSCRAPE_LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.site.base_url, "http://127.0.0.1:9999");
    assert_eq!(config.site.max_links, 25);
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
    assert_eq!(config.storage.pages_dir, PathBuf::from("/tmp/pages"));
    assert_eq!(config.logging.format, "json");
}

#[test]
#[serial]
fn test_from_env_ignores_unparseable_numbers() {
    clear_env();
    std::env::set_var("ALBUMSCRAPE_MAX_LINKS", "lots");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.site.max_links, 200);
}
