use crawl_logging::crawl_debug;
use listing_core::ProductRecord;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::normalize::{parse_price, parse_rating, trim_or_none};

/// Records and pagination reference found on one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedPage {
    pub records: Vec<ProductRecord>,
    /// Absolute URL of the next page; `None` on the final page.
    pub next_page: Option<String>,
    pub blocks_seen: usize,
    pub blocks_dropped: usize,
}

pub trait PageExtractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedPage;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractorError {
    #[error("invalid selector {0:?}")]
    InvalidSelector(String),
    #[error("invalid site origin {0:?}")]
    InvalidOrigin(String),
}

/// CSS selectors describing the listing layout. Fields holding several
/// selectors are tried in order; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSelectors {
    pub listing: String,
    pub name: Vec<String>,
    pub price_whole: String,
    pub price_fraction: String,
    pub rating: String,
    pub badge: String,
    pub link: Vec<String>,
    pub next_page: Vec<String>,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            listing: "div.s-main-slot div.s-result-item".to_string(),
            name: vec!["h2.a-size-base-plus span".to_string(), "h2 span".to_string()],
            price_whole: "span.a-price-whole".to_string(),
            price_fraction: "span.a-price-fraction".to_string(),
            rating: "span.a-icon-alt".to_string(),
            badge: "span.a-badge-text".to_string(),
            link: vec!["h2 a[href]".to_string(), "a.a-link-normal[href]".to_string()],
            next_page: vec![
                "ul.a-pagination li.a-last a[href]".to_string(),
                "a.s-pagination-next[href]".to_string(),
            ],
        }
    }
}

struct CompiledSelectors {
    listing: Selector,
    name: Vec<Selector>,
    price_whole: Selector,
    price_fraction: Selector,
    rating: Selector,
    badge: Selector,
    link: Vec<Selector>,
    next_page: Vec<Selector>,
}

impl CompiledSelectors {
    fn compile(raw: &ListingSelectors) -> Result<Self, ExtractorError> {
        Ok(Self {
            listing: compile(&raw.listing)?,
            name: compile_all(&raw.name)?,
            price_whole: compile(&raw.price_whole)?,
            price_fraction: compile(&raw.price_fraction)?,
            rating: compile(&raw.rating)?,
            badge: compile(&raw.badge)?,
            link: compile_all(&raw.link)?,
            next_page: compile_all(&raw.next_page)?,
        })
    }
}

/// Extractor for search-result pages of a single site layout.
pub struct ListingExtractor {
    origin: Url,
    selectors: CompiledSelectors,
}

impl ListingExtractor {
    pub fn new(origin: &str, selectors: &ListingSelectors) -> Result<Self, ExtractorError> {
        let origin =
            Url::parse(origin).map_err(|_| ExtractorError::InvalidOrigin(origin.to_string()))?;
        if origin.cannot_be_a_base() {
            return Err(ExtractorError::InvalidOrigin(origin.to_string()));
        }
        Ok(Self {
            origin,
            selectors: CompiledSelectors::compile(selectors)?,
        })
    }

    /// Extractor with the default layout selectors.
    pub fn for_origin(origin: &str) -> Result<Self, ExtractorError> {
        Self::new(origin, &ListingSelectors::default())
    }

    fn extract_block(&self, block: ElementRef) -> Option<ProductRecord> {
        let sel = &self.selectors;

        let name = sel
            .name
            .iter()
            .find_map(|s| trim_or_none(select_text(block, s).as_deref()).filter(|n| !n.is_empty()));
        let price = match (
            select_own_text(block, &sel.price_whole),
            select_own_text(block, &sel.price_fraction),
        ) {
            (Some(whole), Some(fraction)) => parse_price(&whole, &fraction),
            _ => None,
        };
        let rating = select_text(block, &sel.rating).and_then(|raw| parse_rating(&raw));

        let (Some(name), Some(price), Some(rating)) = (name, price, rating) else {
            return None;
        };

        let badge = trim_or_none(select_text(block, &sel.badge).as_deref())
            .filter(|badge| !badge.is_empty());
        let link = sel
            .link
            .iter()
            .find_map(|s| block.select(s).find_map(|a| a.value().attr("href")))
            .and_then(|href| resolve_reference(href, &self.origin));

        Some(ProductRecord {
            name,
            price,
            rating,
            badge,
            link,
        })
    }
}

impl PageExtractor for ListingExtractor {
    fn extract(&self, html: &str) -> ExtractedPage {
        let doc = Html::parse_document(html);
        let mut page = ExtractedPage::default();

        for block in doc.select(&self.selectors.listing) {
            page.blocks_seen += 1;
            match self.extract_block(block) {
                Some(record) => page.records.push(record),
                None => page.blocks_dropped += 1,
            }
        }

        page.next_page = self
            .selectors
            .next_page
            .iter()
            .find_map(|s| doc.select(s).find_map(|a| a.value().attr("href")))
            .and_then(|href| resolve_reference(href, &self.origin));

        if page.blocks_dropped > 0 {
            crawl_debug!(
                "Dropped {} of {} listing blocks with unresolved fields",
                page.blocks_dropped,
                page.blocks_seen
            );
        }
        page
    }
}

/// Makes `reference` absolute against the site origin. Fragment-only,
/// `javascript:` and empty references resolve to nothing.
pub fn resolve_reference(reference: &str, origin: &Url) -> Option<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    if trimmed.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.into());
    }
    origin.join(trimmed).ok().map(Into::into)
}

/// Full text content of the first match.
fn select_text(block: ElementRef, selector: &Selector) -> Option<String> {
    block
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// Direct text children of the first match, skipping nested elements such as
/// a decimal separator span.
fn select_own_text(block: ElementRef, selector: &Selector) -> Option<String> {
    let el = block.select(selector).next()?;
    let mut text = String::new();
    for child in el.children() {
        if let Node::Text(fragment) = child.value() {
            text.push_str(fragment);
        }
    }
    Some(text)
}

fn compile(raw: &str) -> Result<Selector, ExtractorError> {
    Selector::parse(raw).map_err(|_| ExtractorError::InvalidSelector(raw.to_string()))
}

fn compile_all(raw: &[String]) -> Result<Vec<Selector>, ExtractorError> {
    raw.iter().map(|s| compile(s)).collect()
}
