//! Parser integration tests using HTML fixture files
//!
//! Covers every field cascade against realistic pages:
//! - JSON-LD driven review (several objects in one block)
//! - Markup-only review (title, article paragraphs, byline, data attributes)
//! - `@graph` structured data with microdata body and script timestamps
//! - Page without any recognizable source

mod common;

use albumscrape::parser::{extract, ReviewExtractor};
use common::load_fixture;
use proptest::prelude::*;

// ============================================================================
// Fixture Tests
// ============================================================================

#[test]
fn test_structured_review_fixture() {
    let record = extract(&load_fixture("structured_review.html"));

    assert_eq!(record.name.as_deref(), Some("Blue Hour"));
    assert_eq!(
        record.description.as_deref(),
        Some("A patient, glowing record about late nights.")
    );
    assert_eq!(record.author_names, vec!["Jane Doe", "John Smith", "Ann Lee"]);
    assert_eq!(record.review_body.as_deref(), Some("Structured body text."));
    assert_eq!(
        record.info_slice_fields,
        vec!["Genre: Rock", "Label: Night Owl", "Reviewed: March 1, 2024"]
    );
    assert_eq!(record.publish_date.as_deref(), Some("2024-03-01T09:00:00Z"));
}

#[test]
fn test_markup_review_fixture() {
    let record = extract(&load_fixture("markup_review.html"));

    assert_eq!(record.name.as_deref(), Some("Quiet Machines"));
    assert!(record.description.is_none());
    assert_eq!(record.author_names, vec!["Jane A. Doe"]);
    assert_eq!(
        record.review_body.as_deref(),
        Some("The first paragraph wraps lines.\n\n\n\nThe second paragraph.")
    );
    assert_eq!(record.info_slice_fields, vec!["Score: 8.1"]);
    assert_eq!(record.publish_date.as_deref(), Some("2023-11-05"));
}

#[test]
fn test_graph_review_fixture() {
    let record = extract(&load_fixture("graph_review.html"));

    assert_eq!(record.name.as_deref(), Some("Северный ветер"));
    assert_eq!(record.author_names, vec!["Graph Author", "Иван Петров"]);
    assert_eq!(record.review_body.as_deref(), Some("Graph body."));
    assert!(record.info_slice_fields.is_empty());
    assert_eq!(
        record.publish_date.as_deref(),
        Some("2022-07-14T10:00:00.000Z")
    );
}

#[test]
fn test_empty_page_fixture() {
    let record = extract(&load_fixture("empty_page.html"));
    assert!(record.is_empty(), "Unexpected fields: {record:?}");
}

// ============================================================================
// Field Properties
// ============================================================================

#[test]
fn test_missing_name_sources() {
    let html = r#"<html><head><meta name="description" content="Only a description"></head>
        <body><p>No title, no heading.</p></body></html>"#;
    let record = extract(html);
    assert!(record.name.is_none());
    assert_eq!(record.description.as_deref(), Some("Only a description"));
}

#[test]
fn test_meta_author_list() {
    let html = r#"<html><head><meta name="author" content="Jane Doe; John Smith and Jane Doe"></head></html>"#;
    assert_eq!(extract(html).author_names, vec!["Jane Doe", "John Smith"]);
}

#[test]
fn test_two_objects_in_one_block() {
    let html = "<html><head><script type=\"application/ld+json\">\n\
        {\"@type\": \"Review\", \"name\": \"First\"}\n\
        {\"@type\": \"Review\", \"name\": \"Second\", \"author\": \"Writer\"}\n\
        </script></head></html>";
    let page = albumscrape::parser::Page::parse(html);
    assert_eq!(page.structured.len(), 2);

    let record = ReviewExtractor::new().extract_page(&page);
    assert_eq!(record.name.as_deref(), Some("First"));
    assert_eq!(record.author_names, vec!["Writer"]);
}

#[test]
fn test_description_json_unwrap() {
    let html = r#"<html><head><meta name="description" content='{"description":"Real text"}'></head></html>"#;
    assert_eq!(extract(html).description.as_deref(), Some("Real text"));

    let html = r#"<html><head><meta name="description" content='{"other":"x"}'></head></html>"#;
    assert_eq!(extract(html).description.as_deref(), Some(r#"{"other":"x"}"#));
}

#[test]
fn test_article_body_beats_article_paragraphs() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"@type": "NewsArticle", "articleBody": "From structured data"}</script>
        </head><body><article><p>From markup</p></article></body></html>"#;
    assert_eq!(
        extract(html).review_body.as_deref(),
        Some("From structured data")
    );
}

#[test]
fn test_info_slice_attribute_fallback() {
    let html = r#"<html><body>
        <div class="details"><span data-testid="product-info-123">Best New Music</span></div>
        <div data-testid="track-list">Ignored</div>
        </body></html>"#;
    assert_eq!(extract(html).info_slice_fields, vec!["Best New Music"]);
}

#[test]
fn test_byline_capitalization() {
    let html = r#"<html><body><p>By Jane A. Doe</p></body></html>"#;
    assert_eq!(extract(html).author_names, vec!["Jane A. Doe"]);

    let html = r#"<html><body><p>by jane doe</p></body></html>"#;
    assert!(extract(html).author_names.is_empty());
}

#[test]
fn test_malformed_structured_data_is_ignored() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"name": "unterminated</script>
        <title>Fallback Title</title>
        </head></html>"#;
    let record = extract(html);
    assert_eq!(record.name.as_deref(), Some("Fallback Title"));
}

#[test]
fn test_record_serializes_to_json() {
    let record = extract(&load_fixture("structured_review.html"));
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["name"], "Blue Hour");
    assert_eq!(json["publish_date"], "2024-03-01T09:00:00Z");
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_extract_is_idempotent_on_fixtures() {
    for name in [
        "structured_review.html",
        "markup_review.html",
        "graph_review.html",
        "empty_page.html",
    ] {
        let html = load_fixture(name);
        assert_eq!(extract(&html), extract(&html), "Fixture {name} differs");
    }
}

proptest! {
    #[test]
    fn prop_extract_is_idempotent(raw in "(<[a-z]{1,7}( class=\"[a-z\\- ]{0,12}\")?>|[A-Za-z .;]{0,16}|</[a-z]{1,7}>){0,24}") {
        prop_assert_eq!(extract(&raw), extract(&raw));
    }

    #[test]
    fn prop_fields_are_trimmed_and_deduplicated(raw in "(<p( class=\"author\")?>[A-Za-z ]{0,12}</p>){0,12}") {
        let record = extract(&raw);

        let mut seen = std::collections::HashSet::new();
        for name in &record.author_names {
            prop_assert!(!name.is_empty());
            prop_assert_eq!(name.trim(), name.as_str());
            prop_assert!(seen.insert(name.clone()));
        }

        if let Some(body) = &record.review_body {
            prop_assert_eq!(body.trim(), body.as_str());
        }
    }
}
