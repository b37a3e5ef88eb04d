//! Enrichment stage commands

use crate::config::Config;
use crate::enrich::{run_batch, BatchReport, CategoryStage, MetadataStage, PlotStage, Stage};
use crate::error::Result;
use crate::store::Store;
use crate::tmdb::TmdbClient;
use crate::wiki::WikipediaClient;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run the TMDB metadata stage for one bounded batch
pub async fn cmd_metadata(config: &Config, store: &Store, limit: u32) -> Result<BatchReport> {
    let client = TmdbClient::new(&config.tmdb)?;
    let stage = MetadataStage::new(client, config.tmdb.call_delay_ms);
    run_with_spinner(&stage, store, limit).await
}

/// Run the Wikipedia plot stage for one bounded batch
pub async fn cmd_plots(config: &Config, store: &Store, limit: u32) -> Result<BatchReport> {
    let client = WikipediaClient::new(&config.wikipedia)?;
    let stage = PlotStage::new(client, config.wikipedia.call_delay_ms);
    run_with_spinner(&stage, store, limit).await
}

/// Run the classification stage for one bounded batch
pub async fn cmd_categorize(_config: &Config, store: &Store, limit: u32) -> Result<BatchReport> {
    run_with_spinner(&CategoryStage, store, limit).await
}

async fn run_with_spinner<S: Stage>(stage: &S, store: &Store, limit: u32) -> Result<BatchReport> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Running {} batch (up to {} movies)", stage.name(), limit));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = run_batch(stage, store, limit).await;

    spinner.finish_and_clear();
    report
}

/// Print a batch report to console
pub fn print_batch_report(name: &str, report: &BatchReport) {
    println!("\n✓ {} batch complete", name);
    println!("  Selected: {}", report.selected);
    println!("  Committed: {} ({} found, {} absent)", report.committed, report.found, report.absent);
    if report.failed > 0 {
        println!("  Failed (will retry next run): {}", report.failed);
    }
    if report.selected == 0 {
        println!("  Nothing left to process.");
    }
}
