//! Listing engine: fetch, extraction, pagination driving and result export.
mod decode;
mod driver;
mod engine;
mod extract;
mod fetch;
mod filename;
pub mod normalize;
mod persist;
mod sink;
mod types;

pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use driver::{run_crawl, CrawlSettings, NoProgress, ProgressSink};
pub use engine::{EngineConfig, EngineError, EngineHandle, Pipeline};
pub use extract::{
    resolve_reference, ExtractedPage, ExtractorError, ListingExtractor, ListingSelectors,
    PageExtractor,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::results_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use sink::{to_pretty_json, JsonFileSink, ResultSink, SinkError};
pub use types::{
    CrawlEvent, CrawlReport, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput,
    JobId,
};

pub use listing_core::{ConfigError, CrawlPolicy, ProductRecord, StopReason};
