use std::collections::HashSet;

use url::Url;

use crate::{seed_url, ConfigError, Effect, ProductRecord, StopReason};

/// Externally imposed limits on one crawl run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrawlPolicy {
    /// Maximum number of pages to fetch; `None` follows pagination until it ends.
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlPhase {
    Fetching { url: String },
    Done { reason: StopReason },
}

/// State of a single crawl run. Owned by whoever drives it; never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlState {
    category: String,
    policy: CrawlPolicy,
    phase: CrawlPhase,
    visited: HashSet<String>,
    visited_count: usize,
    accumulated: Vec<ProductRecord>,
}

/// The finished result set of one crawl run.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlOutcome {
    pub category: String,
    pub records: Vec<ProductRecord>,
    pub pages_visited: usize,
    pub stop_reason: StopReason,
}

impl CrawlState {
    /// Validates the input and seeds the run with the first search page.
    pub fn start(
        category: &str,
        origin: &str,
        policy: CrawlPolicy,
    ) -> Result<(Self, Vec<Effect>), ConfigError> {
        if policy.max_pages == Some(0) {
            return Err(ConfigError::ZeroPageLimit);
        }
        let url = seed_url(origin, category)?;
        let state = Self {
            category: category.trim().to_string(),
            policy,
            phase: CrawlPhase::Fetching { url: url.clone() },
            visited: HashSet::new(),
            visited_count: 0,
            accumulated: Vec::new(),
        };
        Ok((state, vec![Effect::FetchPage { url }]))
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn phase(&self) -> &CrawlPhase {
        &self.phase
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, CrawlPhase::Done { .. })
    }

    pub fn pending_url(&self) -> Option<&str> {
        match &self.phase {
            CrawlPhase::Fetching { url } => Some(url),
            CrawlPhase::Done { .. } => None,
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    pub fn accumulated(&self) -> &[ProductRecord] {
        &self.accumulated
    }

    pub fn has_visited(&self, url: &str) -> bool {
        self.visited.contains(&visit_key(url))
    }

    /// Converts the state into its result set.
    ///
    /// A run that never reached `Done` is reported as cancelled.
    pub fn into_outcome(self) -> CrawlOutcome {
        let stop_reason = match self.phase {
            CrawlPhase::Done { reason } => reason,
            CrawlPhase::Fetching { .. } => StopReason::Cancelled,
        };
        CrawlOutcome {
            category: self.category,
            records: self.accumulated,
            pages_visited: self.visited_count,
            stop_reason,
        }
    }

    pub(crate) fn record_page(
        &mut self,
        url: &str,
        final_url: Option<&str>,
        records: Vec<ProductRecord>,
    ) {
        self.visited.insert(visit_key(url));
        if let Some(final_url) = final_url {
            self.visited.insert(visit_key(final_url));
        }
        self.visited_count += 1;
        self.accumulated.extend(records);
    }

    pub(crate) fn page_limit_reached(&self) -> Option<usize> {
        self.policy
            .max_pages
            .filter(|limit| self.visited_count >= *limit)
    }

    pub(crate) fn continue_with(&mut self, url: String) {
        self.phase = CrawlPhase::Fetching { url };
    }

    pub(crate) fn finish(&mut self, reason: StopReason) {
        self.phase = CrawlPhase::Done { reason };
    }
}

/// Key used by the cycle guard: the URL without its fragment.
pub fn visit_key(url: &str) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.into()
        }
        Err(_) => trimmed.to_string(),
    }
}
