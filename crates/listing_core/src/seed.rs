use thiserror::Error;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "https://www.amazon.fr";
const SEARCH_PATH: &str = "/s";
const QUERY_KEY: &str = "k";

/// Invalid crawl input, reported before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("invalid site origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },
    #[error("page limit must be at least 1")]
    ZeroPageLimit,
}

/// Builds the first search-results URL for `category` on `origin`.
pub fn seed_url(origin: &str, category: &str) -> Result<String, ConfigError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(ConfigError::EmptyCategory);
    }

    let mut url = parse_origin(origin)?;
    url.set_path(SEARCH_PATH);
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut().append_pair(QUERY_KEY, category);
    Ok(url.into())
}

fn parse_origin(origin: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidOrigin {
        origin: origin.to_string(),
        reason,
    };
    let url = Url::parse(origin.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}
