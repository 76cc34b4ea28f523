//! Listing core: product records and the pure pagination state machine.
mod effect;
mod msg;
mod record;
mod seed;
mod state;
mod update;

pub use effect::{Effect, StopReason};
pub use msg::Msg;
pub use record::ProductRecord;
pub use seed::{seed_url, ConfigError, DEFAULT_ORIGIN};
pub use state::{visit_key, CrawlOutcome, CrawlPhase, CrawlPolicy, CrawlState};
pub use update::update;
