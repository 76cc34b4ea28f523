use listing_core::{seed_url, CrawlPolicy, CrawlState, ConfigError, DEFAULT_ORIGIN};

#[test]
fn seed_url_encodes_category_as_search_query() {
    assert_eq!(
        seed_url(DEFAULT_ORIGIN, "laptop").unwrap(),
        "https://www.amazon.fr/s?k=laptop"
    );
    assert_eq!(
        seed_url("http://127.0.0.1:8080", "  café & thé ").unwrap(),
        "http://127.0.0.1:8080/s?k=caf%C3%A9+%26+th%C3%A9"
    );
}

#[test]
fn blank_category_is_a_configuration_error() {
    assert_eq!(seed_url(DEFAULT_ORIGIN, ""), Err(ConfigError::EmptyCategory));
    assert_eq!(seed_url(DEFAULT_ORIGIN, " \t\n"), Err(ConfigError::EmptyCategory));
}

#[test]
fn origin_must_be_http_url() {
    assert!(matches!(
        seed_url("not a url", "laptop"),
        Err(ConfigError::InvalidOrigin { .. })
    ));
    assert!(matches!(
        seed_url("ftp://example.com", "laptop"),
        Err(ConfigError::InvalidOrigin { .. })
    ));
}

#[test]
fn start_rejects_zero_page_limit() {
    let err = CrawlState::start("laptop", DEFAULT_ORIGIN, CrawlPolicy { max_pages: Some(0) })
        .unwrap_err();
    assert_eq!(err, ConfigError::ZeroPageLimit);
}

#[test]
fn start_rejects_empty_category() {
    let err = CrawlState::start("", DEFAULT_ORIGIN, CrawlPolicy::default()).unwrap_err();
    assert_eq!(err, ConfigError::EmptyCategory);
}
