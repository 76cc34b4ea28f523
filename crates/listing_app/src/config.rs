use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use listing_engine::{CrawlPolicy, CrawlSettings, EngineConfig, FetchSettings, ListingSelectors};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Settings read from the optional RON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub origin: String,
    pub max_pages: Option<usize>,
    pub output_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            origin: CrawlSettings::default().origin,
            max_pages: None,
            output_dir: PathBuf::from("output"),
            log_file: None,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            user_agent: None,
            accept_language: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Command-line flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(origin) = &cli.origin {
            self.origin = origin.clone();
        }
        if cli.max_pages.is_some() {
            self.max_pages = cli.max_pages;
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if cli.log_file.is_some() {
            self.log_file = cli.log_file.clone();
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut fetch = FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        };
        if let Some(agent) = &self.user_agent {
            fetch.user_agent = agent.clone();
        }
        if let Some(language) = &self.accept_language {
            fetch.accept_language = language.clone();
        }

        EngineConfig {
            fetch,
            crawl: CrawlSettings {
                origin: self.origin.clone(),
                policy: CrawlPolicy {
                    max_pages: self.max_pages,
                },
            },
            selectors: ListingSelectors::default(),
            output_dir: self.output_dir.clone(),
        }
    }
}
