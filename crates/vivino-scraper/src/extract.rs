//! Wine card extraction from rendered search results.
//!
//! The engine only relies on [`RecordExtractor`]: zero-or-more records per
//! page, in page order, with an empty result meaning the listing is exhausted.

use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use vivino_core::WineRecord;

use crate::error::ScraperError;
use crate::session::FetchedPage;

/// Turns a fetched page into the records it lists.
pub trait RecordExtractor {
    /// # Errors
    ///
    /// Implementations return [`ScraperError::Extraction`] when the page
    /// cannot be interpreted at all.
    fn extract(&self, page: &FetchedPage) -> Result<Vec<WineRecord>, ScraperError>;
}

/// Selector set for the search results wine cards.
pub struct CardExtractor {
    card: Selector,
    name: Selector,
    link: Selector,
    thumb: Selector,
    country: Selector,
    region: Selector,
    average: Selector,
    ratings: Selector,
    price: Selector,
    background_url: Regex,
}

impl Default for CardExtractor {
    fn default() -> Self {
        let sel = |css: &str| Selector::parse(css).expect("valid card selector");
        Self {
            card: sel(".card.card-lg"),
            name: sel(".wine-card__name"),
            link: sel("a[href]"),
            thumb: sel("figure"),
            country: sel(r#".wine-card__region [data-item-type="country"]"#),
            region: sel(".wine-card__region .link-color-alt-grey"),
            average: sel(".average__number"),
            ratings: sel(".average__stars .text-micro"),
            price: sel(".wine-price-value"),
            background_url: Regex::new(r#"url\(\s*["']?([^"')]+?)["']?\s*\)"#)
                .expect("valid background-image regex"),
        }
    }
}

impl CardExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, card: ElementRef<'_>, page_url: Option<&Url>) -> WineRecord {
        WineRecord {
            name: element_text(card, &self.name),
            link: card
                .select(&self.link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| resolve(href, page_url)),
            thumb: card
                .select(&self.thumb)
                .next()
                .and_then(|figure| figure.value().attr("style"))
                .and_then(|style| self.background_url.captures(style))
                .and_then(|cap| cap.get(1))
                .map(|m| absolute_asset(m.as_str())),
            country: element_text(card, &self.country),
            region: element_text(card, &self.region),
            average_rating: element_text(card, &self.average).and_then(|t| numerize(&t)),
            ratings: element_text(card, &self.ratings).map_or(0, |t| parse_rating_count(&t)),
            price: element_text(card, &self.price).and_then(|t| numerize(&t)),
        }
    }
}

impl RecordExtractor for CardExtractor {
    fn extract(&self, page: &FetchedPage) -> Result<Vec<WineRecord>, ScraperError> {
        let document = Html::parse_document(&page.body);
        let page_url = Url::parse(&page.url).ok();
        let records = document
            .select(&self.card)
            .map(|card| self.record(card, page_url.as_ref()))
            .collect::<Vec<_>>();
        tracing::trace!(url = %page.url, count = records.len(), "cards extracted");
        Ok(records)
    }
}

/// Whitespace-collapsed text of the first match, `None` when absent or blank.
fn element_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
}

fn resolve(href: &str, page_url: Option<&Url>) -> String {
    page_url
        .and_then(|base| base.join(href).ok())
        .map_or_else(|| href.to_owned(), |u| u.to_string())
}

/// Thumbnails are served protocol-relative (`//images.vivino.com/...`).
fn absolute_asset(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else {
        src.to_owned()
    }
}

/// Parses a display number such as `"4.3"`, `"$24.99"`, `"€12,50"` or
/// `"$1,299.00"`.
///
/// When both separators appear the later one is the decimal mark. A lone
/// comma followed by exactly three digits is a thousands separator;
/// otherwise it is the decimal mark.
/// Trailing garbage after the number is ignored.
#[must_use]
pub fn numerize(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalised = if let (Some(dot), Some(comma)) = (kept.rfind('.'), kept.rfind(',')) {
        if comma > dot {
            kept.replace('.', "").replacen(',', ".", 1)
        } else {
            kept.replace(',', "")
        }
    } else if let Some(pos) = kept.rfind(',') {
        let tail = &kept[pos + 1..];
        if tail.len() == 3 && tail.bytes().all(|b| b.is_ascii_digit()) {
            kept.replace(',', "")
        } else {
            kept.replacen(',', ".", 1).replace(',', "")
        }
    } else {
        kept
    };

    let mut seen_dot = false;
    let prefix: String = normalised
        .chars()
        .take_while(|c| {
            if *c == '.' {
                if seen_dot {
                    return false;
                }
                seen_dot = true;
            }
            true
        })
        .collect();

    prefix.parse::<f64>().ok()
}

/// Parses `"1,234 ratings"` into `1234`; anything without digits is `0`.
#[must_use]
pub fn parse_rating_count(text: &str) -> u64 {
    let digits: String = text
        .replace("ratings", "")
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
