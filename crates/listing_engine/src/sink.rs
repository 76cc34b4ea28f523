use std::path::PathBuf;
use std::sync::Mutex;

use listing_core::ProductRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::filename::results_filename;
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("could not serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("file write task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Receives the finished, ordered result set of one crawl run.
///
/// Called from async tasks: implementations doing blocking I/O move it off
/// the runtime worker threads.
#[async_trait::async_trait]
pub trait ResultSink: Send + Sync {
    async fn publish(&self, category: &str, records: &[ProductRecord]) -> Result<(), SinkError>;
}

/// Writes each result set as a pretty-printed JSON array into a directory.
#[derive(Debug)]
pub struct JsonFileSink {
    writer: AtomicFileWriter,
    filename: Option<String>,
    written: Mutex<Vec<PathBuf>>,
}

impl JsonFileSink {
    /// File names are derived from the category.
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(output_dir),
            filename: None,
            written: Mutex::new(Vec::new()),
        }
    }

    /// Always writes to `filename` inside `output_dir`.
    pub fn with_filename(output_dir: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::new(output_dir)
        }
    }

    /// Paths written so far, in publish order.
    pub fn written(&self) -> Vec<PathBuf> {
        self.written
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ResultSink for JsonFileSink {
    async fn publish(&self, category: &str, records: &[ProductRecord]) -> Result<(), SinkError> {
        let filename = self
            .filename
            .clone()
            .unwrap_or_else(|| results_filename(category));
        let bytes = to_pretty_json(records)?;
        // fsync and rename block; keep them on the blocking pool.
        let writer = self.writer.clone();
        let path =
            tokio::task::spawn_blocking(move || writer.write(&filename, &bytes)).await??;
        if let Ok(mut written) = self.written.lock() {
            written.push(path);
        }
        Ok(())
    }
}

/// JSON with four-space indentation; non-ASCII text is kept as UTF-8.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}
