use crawl_logging::{crawl_error, crawl_info, crawl_warn};
use listing_core::{update, ConfigError, CrawlPolicy, CrawlState, Effect, Msg, DEFAULT_ORIGIN};
use tokio_util::sync::CancellationToken;

use crate::extract::PageExtractor;
use crate::fetch::Fetcher;
use crate::sink::ResultSink;
use crate::{CrawlEvent, CrawlReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Scheme and host of the site; seed and relative links are resolved against it.
    pub origin: String,
    pub policy: CrawlPolicy,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            policy: CrawlPolicy::default(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: CrawlEvent);
}

/// Discards progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: CrawlEvent) {}
}

/// Runs one crawl to completion.
///
/// Pages are fetched strictly one after another. Fetch failures, pagination
/// cycles, the page ceiling and cancellation all end the run with whatever was
/// accumulated; the sink is called exactly once. Only invalid input is an error,
/// and it is returned before anything is fetched.
pub async fn run_crawl(
    category: &str,
    settings: &CrawlSettings,
    fetcher: &dyn Fetcher,
    extractor: &dyn PageExtractor,
    sink: &dyn ResultSink,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> Result<CrawlReport, ConfigError> {
    let (mut state, mut effects) = CrawlState::start(category, &settings.origin, settings.policy)?;
    crawl_info!(
        "Crawl started category={:?} seed={}",
        state.category(),
        state.pending_url().unwrap_or_default()
    );

    while let Some(effect) = effects.pop() {
        let msg = match effect {
            Effect::FetchPage { url } => {
                if cancel.is_cancelled() {
                    Msg::CancelRequested
                } else {
                    visit_page(&url, fetcher, extractor, progress).await
                }
            }
            Effect::Finish { reason } => {
                crawl_info!("Crawl of {:?} finished: {}", state.category(), reason);
                continue;
            }
        };
        (state, effects) = update(state, msg);
    }

    let outcome = state.into_outcome();
    let publish_error = match sink.publish(&outcome.category, &outcome.records).await {
        Ok(()) => None,
        Err(err) => {
            crawl_error!("Publishing results for {:?} failed: {}", outcome.category, err);
            Some(err.to_string())
        }
    };

    let report = CrawlReport {
        record_count: outcome.records.len(),
        category: outcome.category,
        pages_visited: outcome.pages_visited,
        stop_reason: outcome.stop_reason,
        publish_error,
    };
    progress.emit(CrawlEvent::Finished(report.clone()));
    Ok(report)
}

async fn visit_page(
    url: &str,
    fetcher: &dyn Fetcher,
    extractor: &dyn PageExtractor,
    progress: &dyn ProgressSink,
) -> Msg {
    let output = match fetcher.fetch(url).await {
        Ok(output) => output,
        Err(err) => {
            crawl_warn!("Fetch of {} failed: {}", url, err);
            progress.emit(CrawlEvent::FetchFailed {
                url: url.to_string(),
                kind: err.kind.clone(),
            });
            return Msg::FetchFailed {
                url: url.to_string(),
                reason: err.to_string(),
            };
        }
    };
    progress.emit(CrawlEvent::PageFetched {
        url: url.to_string(),
        bytes: output.metadata.byte_len,
    });

    let page = extractor.extract(&output.body);
    crawl_info!(
        "Extracted {} records from {} ({} blocks dropped), next={:?}",
        page.records.len(),
        url,
        page.blocks_dropped,
        page.next_page
    );
    progress.emit(CrawlEvent::PageExtracted {
        url: url.to_string(),
        records: page.records.len(),
        dropped: page.blocks_dropped,
        next_page: page.next_page.clone(),
    });

    let final_url = output.metadata.final_url;
    if final_url != url {
        crawl_info!("{} was served from {}", url, final_url);
    }
    Msg::PageExtracted {
        url: url.to_string(),
        final_url: (final_url != url).then_some(final_url),
        records: page.records,
        next_page: page.next_page,
    }
}
