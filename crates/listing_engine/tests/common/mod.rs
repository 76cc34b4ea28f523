//! Markup builders mimicking the search-results layout.
#![allow(dead_code)]

pub struct Listing<'a> {
    pub name: Option<&'a str>,
    pub price: Option<(&'a str, &'a str)>,
    pub rating: Option<&'a str>,
    pub badge: Option<&'a str>,
    pub href: Option<&'a str>,
}

impl<'a> Listing<'a> {
    pub fn valid(name: &'a str, whole: &'a str, fraction: &'a str, rating: &'a str) -> Self {
        Self {
            name: Some(name),
            price: Some((whole, fraction)),
            rating: Some(rating),
            badge: None,
            href: None,
        }
    }

    pub fn badge(mut self, badge: &'a str) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn href(mut self, href: &'a str) -> Self {
        self.href = Some(href);
        self
    }

    pub fn without_rating(mut self) -> Self {
        self.rating = None;
        self
    }

    pub fn html(&self) -> String {
        let mut out = String::from(r#"<div class="s-result-item s-asin" data-component-type="s-search-result">"#);
        if let Some(name) = self.name {
            let href = self.href.unwrap_or("");
            if href.is_empty() {
                out.push_str(&format!(r#"<h2 class="a-size-base-plus"><span>{name}</span></h2>"#));
            } else {
                out.push_str(&format!(
                    r#"<h2 class="a-size-base-plus"><a class="a-link-normal" href="{href}"><span>{name}</span></a></h2>"#
                ));
            }
        }
        if let Some((whole, fraction)) = self.price {
            out.push_str(&format!(
                r#"<span class="a-price"><span class="a-price-whole">{whole}<span class="a-price-decimal">,</span></span><span class="a-price-fraction">{fraction}</span><span class="a-price-symbol">€</span></span>"#
            ));
        }
        if let Some(rating) = self.rating {
            out.push_str(&format!(
                r#"<i class="a-icon a-icon-star-small"><span class="a-icon-alt">{rating}</span></i>"#
            ));
        }
        if let Some(badge) = self.badge {
            out.push_str(&format!(r#"<span class="a-badge"><span class="a-badge-text">{badge}</span></span>"#));
        }
        out.push_str("</div>");
        out
    }
}

/// A full results page. `next` is written as the pagination "next" link.
pub fn results_page(listings: &[Listing], next: Option<&str>) -> String {
    let blocks: String = listings.iter().map(Listing::html).collect();
    let pagination = match next {
        Some(href) => format!(
            r#"<ul class="a-pagination"><li class="a-normal"><a href="/s?k=x">1</a></li><li class="a-last"><a href="{href}">Suivant</a></li></ul>"#
        ),
        None => r#"<ul class="a-pagination"><li class="a-disabled a-last">Suivant</li></ul>"#.to_string(),
    };
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Résultats</title></head><body><div class="s-main-slot s-result-list">{blocks}</div>{pagination}</body></html>"#
    )
}
