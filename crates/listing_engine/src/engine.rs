use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use crawl_logging::{crawl_info, crawl_warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::driver::{run_crawl, CrawlSettings, ProgressSink};
use crate::extract::{ExtractorError, ListingExtractor, ListingSelectors, PageExtractor};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::sink::{JsonFileSink, ResultSink};
use crate::{CrawlEvent, EngineEvent, FetchError, JobId};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub crawl: CrawlSettings,
    pub selectors: ListingSelectors,
    pub output_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            fetch: FetchSettings::default(),
            crawl: CrawlSettings::default(),
            selectors: ListingSelectors::default(),
            output_dir,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("http client setup failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("extractor setup failed: {0}")]
    Extractor(#[from] ExtractorError),
    #[error("async runtime setup failed: {0}")]
    Runtime(#[from] std::io::Error),
}

/// The collaborators every crawl run uses. Shared read-only between runs.
pub struct Pipeline {
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn PageExtractor>,
    pub sink: Arc<dyn ResultSink>,
    pub settings: CrawlSettings,
}

enum EngineCommand {
    Enqueue { job_id: JobId, category: String },
    Cancel { job_id: JobId },
}

/// Runs independent crawls on a background runtime. Each job owns its crawl
/// state; only the immutable pipeline is shared.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: thread::JoinHandle<()>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let pipeline = Pipeline {
            fetcher: Arc::new(ReqwestFetcher::new(config.fetch)?),
            extractor: Arc::new(ListingExtractor::new(
                &config.crawl.origin,
                &config.selectors,
            )?),
            sink: Arc::new(JsonFileSink::new(config.output_dir)),
            settings: config.crawl,
        };
        Self::with_pipeline(pipeline)
    }

    pub fn with_pipeline(pipeline: Pipeline) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let pipeline = Arc::new(pipeline);

        let worker = thread::spawn(move || {
            let tokens: Arc<Mutex<HashMap<JobId, CancellationToken>>> = Arc::default();
            let mut running: Vec<JoinHandle<()>> = Vec::new();

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Enqueue { job_id, category } => {
                        let token = CancellationToken::new();
                        if let Ok(mut tokens) = tokens.lock() {
                            tokens.insert(job_id, token.clone());
                        }
                        running.retain(|task| !task.is_finished());
                        running.push(runtime.spawn(run_job(
                            job_id,
                            category,
                            pipeline.clone(),
                            event_tx.clone(),
                            token,
                            tokens.clone(),
                        )));
                    }
                    EngineCommand::Cancel { job_id } => {
                        if let Some(token) = tokens.lock().ok().and_then(|t| t.get(&job_id).cloned()) {
                            token.cancel();
                        }
                    }
                }
            }

            // Handle dropped: stop remaining crawls at their next cycle and let
            // them publish what they have.
            cancel_all(&tokens);
            runtime.block_on(async {
                for task in running {
                    let _ = task.await;
                }
            });
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            worker,
        })
    }

    pub fn enqueue(&self, job_id: JobId, category: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Enqueue {
            job_id,
            category: category.into(),
        });
    }

    /// Stops the job before its next page fetch.
    pub fn cancel(&self, job_id: JobId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { job_id });
    }

    /// Blocks for the next event; `None` once the worker has gone away.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Cancels running crawls and waits until each has published its results.
    pub fn shutdown(self) {
        drop(self.cmd_tx);
        if self.worker.join().is_err() {
            crawl_warn!("Engine worker thread panicked during shutdown");
        }
    }
}

fn cancel_all(tokens: &Mutex<HashMap<JobId, CancellationToken>>) {
    if let Ok(tokens) = tokens.lock() {
        tokens.values().for_each(CancellationToken::cancel);
    }
}

struct ChannelProgressSink {
    job_id: JobId,
    tx: mpsc::Sender<EngineEvent>,
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: CrawlEvent) {
        let _ = self.tx.send(EngineEvent::Crawl {
            job_id: self.job_id,
            event,
        });
    }
}

async fn run_job(
    job_id: JobId,
    category: String,
    pipeline: Arc<Pipeline>,
    event_tx: mpsc::Sender<EngineEvent>,
    token: CancellationToken,
    tokens: Arc<Mutex<HashMap<JobId, CancellationToken>>>,
) {
    crawl_info!("Job {} crawling category {:?}", job_id, category);
    let progress = ChannelProgressSink {
        job_id,
        tx: event_tx.clone(),
    };
    let result = run_crawl(
        &category,
        &pipeline.settings,
        pipeline.fetcher.as_ref(),
        pipeline.extractor.as_ref(),
        pipeline.sink.as_ref(),
        &progress,
        &token,
    )
    .await;

    if let Err(err) = result {
        crawl_warn!("Job {} rejected: {}", job_id, err);
        let _ = event_tx.send(EngineEvent::Rejected {
            job_id,
            reason: err.to_string(),
        });
    }
    if let Ok(mut tokens) = tokens.lock() {
        tokens.remove(&job_id);
    }
}
