//! Status command implementation

use crate::config::Config;
use crate::error::Result;
use crate::store::{PipelineStats, Store};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub db_path: String,
    pub tmdb_base_url: String,
    pub wikipedia_base_url: String,
    pub batch_size: u32,
    pub stats: PipelineStats,
}

/// Get pipeline status
pub async fn cmd_status(config: &Config, store: &Store) -> Result<StatusInfo> {
    info!("Getting status");

    let stats = store.pipeline_stats().await?;

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        db_path: config.paths.db_file.display().to_string(),
        tmdb_base_url: config.tmdb.base_url.clone(),
        wikipedia_base_url: config.wikipedia.base_url.clone(),
        batch_size: config.enrich.batch_size,
        stats,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 truestory Status\n");
    println!("Configuration: {}", status.config_path);
    println!("Database: {}", status.db_path);
    println!("\nSources:");
    println!("  TMDB: {}", status.tmdb_base_url);
    println!("  Wikipedia: {}", status.wikipedia_base_url);
    println!("\nBatch size: {}", status.batch_size);
    println!("\nPipeline progress:");
    println!("  Movies: {}", status.stats.movies);
    println!(
        "  Metadata: {}/{} attempted ({} found)",
        status.stats.metadata_attempted, status.stats.movies, status.stats.metadata_found
    );
    println!(
        "  Plots: {}/{} attempted ({} found)",
        status.stats.plots_attempted, status.stats.movies, status.stats.plots_found
    );
    println!(
        "  Classified: {}/{}",
        status.stats.classified, status.stats.movies
    );
}
