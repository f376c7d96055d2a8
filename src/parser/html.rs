//! Review page field extraction
//!
//! Each field is recovered by a cascade of heuristics. A heuristic is a plain
//! function from the parsed page to an optional value; the cascade returns the
//! first value any heuristic produces. Authors are the exception and are
//! collected from every source (see [`crate::parser::authors`]).

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::models::ExtractedRecord;
use crate::parser::authors;
use crate::parser::sanitize::{
    collapsed_text, dedupe_normalized, multiline_text, non_empty, stripped_text,
};
use crate::parser::selectors::{AuthorSelectors, ContentSelectors, MetaSelectors};
use crate::parser::structured::{self, first_string, string_property};

lazy_static! {
    static ref SCRIPT_PUBLISH_DATE: Regex =
        Regex::new(r#"["']publishDate["']\s*:\s*["']([^"']+)["']"#)
            .expect("Invalid regex pattern");
    static ref ISO_TIMESTAMP: Regex =
        Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?Z")
            .expect("Invalid regex pattern");
}

/// Class substrings marking info slice regions (matched lowercase)
const INFO_SLICE_MARKERS: &[&str] = &[
    "info-slice",
    "infoslice",
    "infoslicelist",
    "infoslicelistitem",
];

/// A parsed document together with its structured data
///
/// Built once per extraction and dropped when the record is returned.
pub struct Page {
    pub document: Html,
    pub structured: Vec<Value>,
}

impl Page {
    pub fn parse(raw: &str) -> Self {
        let document = Html::parse_document(raw);
        let structured = structured::parse_structured_data(&document);
        Self {
            document,
            structured,
        }
    }
}

/// One step of a field cascade
pub type Heuristic<T> = fn(&ReviewExtractor, &Page) -> Option<T>;

/// Review page extractor
///
/// Holds references to the precompiled selector sets, so it is cheap to
/// construct.
pub struct ReviewExtractor {
    pub(crate) meta: MetaSelectors,
    pub(crate) content: ContentSelectors,
    pub(crate) authors: AuthorSelectors,
}

impl ReviewExtractor {
    const NAME: &'static [Heuristic<String>] = &[
        Self::name_from_meta,
        Self::name_from_title,
        Self::name_from_heading,
        Self::name_from_structured_data,
    ];

    const REVIEW_BODY: &'static [Heuristic<String>] = &[
        Self::body_from_structured_data,
        Self::body_from_marked_element,
        Self::body_from_article_region,
    ];

    const INFO_SLICES: &'static [Heuristic<Vec<String>>] = &[
        Self::info_slices_by_class,
        Self::info_slices_by_attribute,
    ];

    const PUBLISH_DATE: &'static [Heuristic<String>] = &[
        Self::publish_date_from_meta,
        Self::publish_date_from_structured_data,
        Self::publish_date_from_scripts,
        Self::publish_date_from_time_element,
    ];

    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: MetaSelectors::new(),
            content: ContentSelectors::new(),
            authors: AuthorSelectors::new(),
        }
    }

    /// Extract every field from raw markup
    ///
    /// Never fails: a field whose sources are all missing is left empty.
    pub fn extract(&self, raw: &str) -> ExtractedRecord {
        let page = Page::parse(raw);
        self.extract_page(&page)
    }

    /// Extract every field from an already parsed page
    pub fn extract_page(&self, page: &Page) -> ExtractedRecord {
        let record = ExtractedRecord {
            name: self.cascade(page, Self::NAME),
            description: self.description(page),
            author_names: authors::collect(self, page),
            review_body: self.cascade(page, Self::REVIEW_BODY),
            info_slice_fields: self
                .cascade(page, Self::INFO_SLICES)
                .unwrap_or_default(),
            publish_date: self.cascade(page, Self::PUBLISH_DATE),
        };

        tracing::debug!(
            structured_items = page.structured.len(),
            populated = record.populated_fields(),
            authors = record.author_names.len(),
            "Extracted review record"
        );

        record
    }

    /// Run heuristics in order and return the first value produced
    fn cascade<T>(&self, page: &Page, steps: &[Heuristic<T>]) -> Option<T> {
        steps.iter().find_map(|step| step(self, page))
    }

    /// Content of the first element matched by each selector, in selector order
    pub(crate) fn meta_content(&self, document: &Html, selectors: &[Selector]) -> Option<String> {
        selectors.iter().find_map(|selector| {
            document
                .select(selector)
                .next()
                .and_then(|meta| meta.value().attr("content"))
                .and_then(non_empty)
        })
    }

    // name

    fn name_from_meta(&self, page: &Page) -> Option<String> {
        self.meta_content(&page.document, self.meta.title)
    }

    fn name_from_title(&self, page: &Page) -> Option<String> {
        let title = page.document.select(self.content.title).next()?;
        non_empty(&collapsed_text(&title))
    }

    fn name_from_heading(&self, page: &Page) -> Option<String> {
        let heading = page.document.select(self.content.heading).next()?;
        non_empty(&collapsed_text(&heading))
    }

    fn name_from_structured_data(&self, page: &Page) -> Option<String> {
        first_string(&page.structured, "name")
    }

    // description

    fn description(&self, page: &Page) -> Option<String> {
        let raw = self.meta_content(&page.document, self.meta.description)?;
        Some(unwrap_description(&raw).unwrap_or(raw))
    }

    // review body

    fn body_from_structured_data(&self, page: &Page) -> Option<String> {
        first_string(&page.structured, "reviewBody")
            .or_else(|| first_string(&page.structured, "articleBody"))
    }

    fn body_from_marked_element(&self, page: &Page) -> Option<String> {
        let element = self
            .content
            .body_markers
            .iter()
            .find_map(|selector| page.document.select(selector).next())?;

        match paragraph_texts(&element, self.content.block) {
            Some(texts) => {
                let texts: Vec<String> = texts.into_iter().filter(|t| !t.is_empty()).collect();
                non_empty(&texts.join("\n\n"))
            }
            None => non_empty(&multiline_text(&element)),
        }
    }

    fn body_from_article_region(&self, page: &Page) -> Option<String> {
        let region = self
            .content
            .body_regions
            .iter()
            .find_map(|selector| page.document.select(selector).next())?;

        // empty paragraphs keep their slot in the join
        match paragraph_texts(&region, self.content.paragraph) {
            Some(texts) => non_empty(&texts.join("\n\n")),
            None => non_empty(&multiline_text(&region)),
        }
    }

    // info slices

    fn info_slices_by_class(&self, page: &Page) -> Option<Vec<String>> {
        let texts = page
            .document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| {
                element.value().attr("class").is_some_and(|class| {
                    let class = class.to_lowercase();
                    INFO_SLICE_MARKERS.iter().any(|marker| class.contains(marker))
                })
            })
            .map(|element| stripped_text(&element, " "));

        non_empty_list(dedupe_normalized(texts))
    }

    fn info_slices_by_attribute(&self, page: &Page) -> Option<Vec<String>> {
        let texts = page
            .document
            .select(self.content.info_attributes)
            .map(|element| stripped_text(&element, " "));

        non_empty_list(dedupe_normalized(texts))
    }

    // publish date

    fn publish_date_from_meta(&self, page: &Page) -> Option<String> {
        self.meta_content(&page.document, self.meta.published)
    }

    fn publish_date_from_structured_data(&self, page: &Page) -> Option<String> {
        first_string(&page.structured, "datePublished")
    }

    fn publish_date_from_scripts(&self, page: &Page) -> Option<String> {
        page.document.select(self.content.script).find_map(|script| {
            let text = script.text().collect::<String>();
            SCRIPT_PUBLISH_DATE
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .or_else(|| ISO_TIMESTAMP.find(&text))
                .and_then(|m| non_empty(m.as_str()))
        })
    }

    fn publish_date_from_time_element(&self, page: &Page) -> Option<String> {
        let time = page.document.select(self.content.time).next()?;
        time.value()
            .attr("datetime")
            .or_else(|| time.value().attr("data-datetime"))
            .and_then(non_empty)
    }
}

impl Default for ReviewExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Nested `description` of a JSON object stuffed into a meta tag
///
/// Returns `None` when the value is not such an object, so the caller keeps
/// the raw string.
fn unwrap_description(raw: &str) -> Option<String> {
    if !raw.trim_start().starts_with('{') {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(raw).ok()?;
    parsed
        .as_object()
        .and_then(|map| string_property(map, "description"))
}

/// Collapsed texts of descendant elements matched by `selector`
///
/// `None` when the element has no such descendants.
fn paragraph_texts(element: &ElementRef<'_>, selector: &Selector) -> Option<Vec<String>> {
    let texts: Vec<String> = element
        .select(selector)
        .filter(|child| child.id() != element.id())
        .map(|child| collapsed_text(&child))
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts)
    }
}

fn non_empty_list(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
