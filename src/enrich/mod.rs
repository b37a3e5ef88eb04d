//! Incremental enrichment pipeline
//!
//! One generic stage contract instantiated per concern (metadata, plots,
//! categories). A stage selects a bounded batch of movies lacking its
//! marker, resolves each against its source, and commits every movie's
//! result before moving to the next one, so an interrupted run loses at
//! most the in-flight movie. One movie's failure never aborts the batch.

mod category;
mod metadata;
mod pace;
mod plots;

pub use category::CategoryStage;
pub use metadata::MetadataStage;
pub use pace::Pacer;
pub use plots::PlotStage;

use crate::error::Result;
use crate::store::Store;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Committed outcome for one movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The source had a result; fields and dimension rows were upserted
    Found,
    /// The source had no match; the explicit absence marker was written
    Absent,
}

/// Statistics from one batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Movies selected for this run (bounded by the batch limit)
    pub selected: u32,
    /// Movies with a committed result, found or absent
    pub committed: u32,
    pub found: u32,
    pub absent: u32,
    /// Transport or store failures; these movies stay unmarked and are
    /// retried on the next invocation
    pub failed: u32,
}

/// One enrichment stage
#[async_trait]
pub trait Stage: Send + Sync {
    type Item: Send + Sync;

    fn name(&self) -> &'static str;

    /// Pacer enforcing the configured minimum delay before each external
    /// call; None when the stage resolves locally
    fn pacer(&self) -> Option<&Pacer>;

    /// Select up to `limit` unprocessed movies in insertion order
    async fn select_pending(&self, store: &Store, limit: u32) -> Result<Vec<Self::Item>>;

    /// Resolve one movie and commit its result
    async fn process_one(&self, store: &Store, item: &Self::Item) -> Result<Outcome>;

    /// Title used in log lines
    fn item_title(item: &Self::Item) -> &str;
}

/// Run one bounded batch of a stage. Returns the per-run statistics; the
/// committed count is the number of movies durably marked this run.
pub async fn run_batch<S: Stage>(stage: &S, store: &Store, limit: u32) -> Result<BatchReport> {
    let pending = stage.select_pending(store, limit).await?;

    let mut report = BatchReport {
        selected: pending.len() as u32,
        ..Default::default()
    };

    if pending.is_empty() {
        info!("{}: nothing left to process", stage.name());
        return Ok(report);
    }

    info!("{}: processing {} movies", stage.name(), pending.len());

    for item in &pending {
        if let Some(pacer) = stage.pacer() {
            pacer.wait().await;
        }

        match stage.process_one(store, item).await {
            Ok(Outcome::Found) => {
                debug!("{}: found result for '{}'", stage.name(), S::item_title(item));
                report.found += 1;
                report.committed += 1;
            }
            Ok(Outcome::Absent) => {
                debug!("{}: no result for '{}'", stage.name(), S::item_title(item));
                report.absent += 1;
                report.committed += 1;
            }
            Err(e) => {
                warn!(
                    "{}: failed to process '{}', will retry next run: {}",
                    stage.name(),
                    S::item_title(item),
                    e
                );
                report.failed += 1;
            }
        }
    }

    info!(
        "{}: committed {} of {} ({} found, {} absent, {} failed)",
        stage.name(),
        report.committed,
        report.selected,
        report.found,
        report.absent,
        report.failed
    );

    Ok(report)
}
