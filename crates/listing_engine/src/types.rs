use std::fmt;

use listing_core::StopReason;

pub type JobId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub body: String,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub encoding_label: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "undecodable body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Summary of a finished crawl run, handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub category: String,
    pub pages_visited: usize,
    pub record_count: usize,
    pub stop_reason: StopReason,
    /// Set when the result sink could not store the records.
    pub publish_error: Option<String>,
}

/// Progress notifications emitted while a crawl runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    PageFetched {
        url: String,
        bytes: u64,
    },
    PageExtracted {
        url: String,
        records: usize,
        dropped: usize,
        next_page: Option<String>,
    },
    FetchFailed {
        url: String,
        kind: FailureKind,
    },
    Finished(CrawlReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Crawl { job_id: JobId, event: CrawlEvent },
    /// The crawl was refused before any fetch, e.g. blank category.
    Rejected { job_id: JobId, reason: String },
}
