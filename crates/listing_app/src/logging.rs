//! Logger initialization for the crawler binary.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Terminal,
    File(PathBuf),
    Both(PathBuf),
}

/// Picks where logs go from the `--quiet` and `--log-file` settings.
///
/// A quiet run with a log file keeps the terminal silent and sends the full
/// info-level log to the file; a quiet run without one still shows warnings.
pub fn destination_for(quiet: bool, log_file: Option<&Path>) -> (LogDestination, LevelFilter) {
    match (quiet, log_file) {
        (true, Some(path)) => (LogDestination::File(path.to_path_buf()), LevelFilter::Info),
        (true, None) => (LogDestination::Terminal, LevelFilter::Warn),
        (false, Some(path)) => (LogDestination::Both(path.to_path_buf()), LevelFilter::Info),
        (false, None) => (LogDestination::Terminal, LevelFilter::Info),
    }
}

/// Initialize the global logger. A log file that cannot be created is
/// reported on stderr and skipped.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = crawl_logging::default_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both(_)) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let LogDestination::File(path) | LogDestination::Both(path) = &destination {
        if let Some(file_logger) = create_file_logger(path, level, config) {
            loggers.push(file_logger);
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: simplelog::Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
