//! CSS selectors used by the review extraction cascades
//!
//! Every list is ordered by preference: the first entry is tried first.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // <meta> sources
    static ref META_TITLE: Vec<Selector> = vec![
        parse_selector!(r#"meta[property="og:title"]"#),
        parse_selector!(r#"meta[name="title"]"#),
    ];

    static ref META_DESCRIPTION: Vec<Selector> = vec![
        parse_selector!(r#"meta[name="description"]"#),
        parse_selector!(r#"meta[property="og:description"]"#),
        parse_selector!(r#"meta[name="parsely-metadata"]"#),
    ];

    static ref META_AUTHOR: Vec<Selector> = vec![
        parse_selector!(r#"meta[name="author"]"#),
        parse_selector!(r#"meta[property="article:author"]"#),
        parse_selector!(r#"meta[name="parsely-author"]"#),
    ];

    static ref META_PUBLISHED: Vec<Selector> = vec![
        parse_selector!(r#"meta[property="article:published_time"]"#),
        parse_selector!(r#"meta[name="publishDate"]"#),
        parse_selector!(r#"meta[name="parsely-post-pubdate"]"#),
    ];

    // Document structure
    static ref TITLE: Selector = parse_selector!("title");
    static ref HEADING: Selector = parse_selector!("h1");
    static ref STRUCTURED_DATA: Selector = parse_selector!(r#"script[type="application/ld+json"]"#);
    static ref SCRIPT: Selector = parse_selector!("script");
    static ref TIME: Selector = parse_selector!("time");

    // Body sources
    static ref BODY_MARKERS: Vec<Selector> = vec![
        parse_selector!(r#"[itemprop="reviewBody"]"#),
        parse_selector!(r#"[itemprop="articleBody"]"#),
    ];

    static ref BODY_REGIONS: Vec<Selector> = vec![
        parse_selector!("article"),
        parse_selector!(r#"[role="article"]"#),
        parse_selector!("main"),
    ];

    static ref PARAGRAPH: Selector = parse_selector!("p");
    static ref BLOCK: Selector = parse_selector!("p, div");

    // Info slice fallback when no class matches
    static ref INFO_ATTRIBUTES: Selector = parse_selector!(
        r#"[data-testid*="info"], [data-qa*="info"], [aria-label*="Info"], [aria-label*="info"]"#
    );

    // Author sources
    static ref AUTHOR_ITEMPROP: Selector = parse_selector!(r#"[itemprop="author"]"#);

    static ref AUTHOR_CLASSES: Vec<Selector> = vec![
        parse_selector!("a.author-link"),
        parse_selector!(".byline"),
        parse_selector!(".article-author"),
        parse_selector!(".author-name"),
        parse_selector!(".author"),
    ];

    static ref BYLINE_CANDIDATES: Selector =
        parse_selector!("p, span, div, li, a, small, em, strong");
}

/// `<meta>` selectors, one ordered list per field
pub struct MetaSelectors {
    pub title: &'static [Selector],
    pub description: &'static [Selector],
    pub author: &'static [Selector],
    pub published: &'static [Selector],
}

impl MetaSelectors {
    pub fn new() -> Self {
        Self {
            title: &META_TITLE,
            description: &META_DESCRIPTION,
            author: &META_AUTHOR,
            published: &META_PUBLISHED,
        }
    }
}

impl Default for MetaSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for document-level structure and body text
pub struct ContentSelectors {
    pub title: &'static Selector,
    pub heading: &'static Selector,
    pub structured_data: &'static Selector,
    pub script: &'static Selector,
    pub time: &'static Selector,
    pub body_markers: &'static [Selector],
    pub body_regions: &'static [Selector],
    pub paragraph: &'static Selector,
    pub block: &'static Selector,
    pub info_attributes: &'static Selector,
}

impl ContentSelectors {
    pub fn new() -> Self {
        Self {
            title: &TITLE,
            heading: &HEADING,
            structured_data: &STRUCTURED_DATA,
            script: &SCRIPT,
            time: &TIME,
            body_markers: &BODY_MARKERS,
            body_regions: &BODY_REGIONS,
            paragraph: &PARAGRAPH,
            block: &BLOCK,
            info_attributes: &INFO_ATTRIBUTES,
        }
    }
}

impl Default for ContentSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for author and byline elements
pub struct AuthorSelectors {
    pub itemprop: &'static Selector,
    pub classes: &'static [Selector],
    pub byline_candidates: &'static Selector,
}

impl AuthorSelectors {
    pub fn new() -> Self {
        Self {
            itemprop: &AUTHOR_ITEMPROP,
            classes: &AUTHOR_CLASSES,
            byline_candidates: &BYLINE_CANDIDATES,
        }
    }
}

impl Default for AuthorSelectors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_selectors_creation() {
        let selectors = MetaSelectors::new();
        assert_eq!(selectors.title.len(), 2);
        assert_eq!(selectors.description.len(), 3);
        assert_eq!(selectors.author.len(), 3);
        assert_eq!(selectors.published.len(), 3);
    }

    #[test]
    fn test_content_selectors_creation() {
        let selectors = ContentSelectors::default();
        assert_eq!(selectors.body_markers.len(), 2);
        assert_eq!(selectors.body_regions.len(), 3);
    }

    #[test]
    fn test_author_selectors_order() {
        let selectors = AuthorSelectors::new();
        assert_eq!(selectors.classes.len(), 5);
    }

    #[test]
    fn test_info_attribute_selector_matches() {
        let selectors = ContentSelectors::new();
        let doc = scraper::Html::parse_document(
            r#"<div data-testid="product-info-123">x</div><div data-qa="other">y</div>"#,
        );
        assert_eq!(doc.select(selectors.info_attributes).count(), 1);
    }
}
