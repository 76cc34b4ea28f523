#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { url: String },
    Finish { reason: StopReason },
}

/// Why a crawl run reached `Done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The last page carried no next-page reference.
    LastPage,
    /// The next-page reference pointed at an already visited page.
    CycleDetected { url: String },
    PageLimitReached { limit: usize },
    FetchFailed { url: String, reason: String },
    Cancelled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::LastPage => write!(f, "last page reached"),
            StopReason::CycleDetected { url } => write!(f, "pagination cycle at {url}"),
            StopReason::PageLimitReached { limit } => write!(f, "page limit of {limit} reached"),
            StopReason::FetchFailed { url, reason } => write!(f, "fetch of {url} failed: {reason}"),
            StopReason::Cancelled => write!(f, "cancelled"),
        }
    }
}
