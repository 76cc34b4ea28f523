mod cli;
mod config;
mod logging;

use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use crawl_logging::{crawl_info, crawl_warn};
use listing_engine::{CrawlEvent, CrawlReport, EngineEvent, EngineHandle, JobId};

use crate::cli::Cli;
use crate::config::AppConfig;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_cli(&cli);

    let (destination, level) = logging::destination_for(cli.quiet, config.log_file.as_deref());
    logging::initialize(destination, level);

    let categories = if cli.categories.is_empty() {
        vec![prompt_category()?]
    } else {
        unique_categories(&cli.categories)
    };

    let started = Utc::now();
    let engine = EngineHandle::new(config.engine_config()).context("starting crawl engine")?;
    for (index, category) in categories.iter().enumerate() {
        engine.enqueue(index as JobId + 1, category.clone());
    }

    let outcomes = wait_for_jobs(&engine, categories.len());
    engine.shutdown();

    let mut failed = false;
    for (job_id, outcome) in &outcomes {
        match outcome {
            JobOutcome::Finished(report) => {
                println!(
                    "{:?}: {} records from {} pages ({})",
                    report.category, report.record_count, report.pages_visited, report.stop_reason
                );
                if let Some(err) = &report.publish_error {
                    eprintln!("  results not saved: {err}");
                    failed = true;
                }
            }
            JobOutcome::Rejected(reason) => {
                eprintln!("job {job_id}: configuration error: {reason}");
                failed = true;
            }
        }
    }
    if outcomes.len() < categories.len() {
        eprintln!("engine stopped before every crawl reported back");
        failed = true;
    }

    let elapsed = Utc::now() - started;
    crawl_info!(
        "Crawled {} categories into {} in {:.1}s",
        categories.len(),
        config.output_dir.display(),
        elapsed.num_milliseconds() as f64 / 1000.0
    );

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

enum JobOutcome {
    Finished(CrawlReport),
    Rejected(String),
}

fn wait_for_jobs(engine: &EngineHandle, expected: usize) -> Vec<(JobId, JobOutcome)> {
    let mut outcomes = Vec::with_capacity(expected);
    while outcomes.len() < expected {
        let Some(event) = engine.recv() else {
            crawl_warn!("Engine event channel closed early");
            break;
        };
        match event {
            EngineEvent::Crawl {
                job_id,
                event: CrawlEvent::Finished(report),
            } => outcomes.push((job_id, JobOutcome::Finished(report))),
            EngineEvent::Crawl {
                job_id,
                event: CrawlEvent::FetchFailed { url, kind },
            } => crawl_warn!("Job {} stopped early at {}: {}", job_id, url, kind),
            EngineEvent::Crawl { .. } => {}
            EngineEvent::Rejected { job_id, reason } => {
                outcomes.push((job_id, JobOutcome::Rejected(reason)))
            }
        }
    }
    outcomes.sort_by_key(|(job_id, _)| *job_id);
    outcomes
}

/// Trims each category and drops repeats, keeping first-seen order. Two jobs
/// for one category would race on the same result file.
fn unique_categories(categories: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    categories
        .iter()
        .map(|category| category.trim().to_string())
        .filter(|category| seen.insert(category.clone()))
        .collect()
}

fn prompt_category() -> anyhow::Result<String> {
    print!("Category to crawl: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading category from stdin")?;
    Ok(line.trim().to_string())
}
