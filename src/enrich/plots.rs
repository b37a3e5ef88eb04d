//! Plot enrichment stage

use super::{Outcome, Pacer, Stage};
use crate::error::Result;
use crate::store::{Movie, Store};
use crate::wiki::PlotSource;
use async_trait::async_trait;

/// Looks up a plot text for each collected title. A title with no matching
/// article gets a NULL-summary row, which marks "looked up, not found" and
/// keeps the movie out of later runs.
pub struct PlotStage<P: PlotSource> {
    source: P,
    pacer: Pacer,
}

impl<P: PlotSource> PlotStage<P> {
    pub fn new(source: P, call_delay_ms: u64) -> Self {
        Self {
            source,
            pacer: Pacer::from_millis(call_delay_ms),
        }
    }
}

#[async_trait]
impl<P: PlotSource> Stage for PlotStage<P> {
    type Item = Movie;

    fn name(&self) -> &'static str {
        "plots"
    }

    fn pacer(&self) -> Option<&Pacer> {
        Some(&self.pacer)
    }

    async fn select_pending(&self, store: &Store, limit: u32) -> Result<Vec<Movie>> {
        store.movies_missing_plot(limit).await
    }

    async fn process_one(&self, store: &Store, movie: &Movie) -> Result<Outcome> {
        match self.source.plot(&movie.title).await? {
            Some(summary) => {
                store.upsert_plot(movie.id, Some(&summary)).await?;
                Ok(Outcome::Found)
            }
            None => {
                store.upsert_plot(movie.id, None).await?;
                Ok(Outcome::Absent)
            }
        }
    }

    fn item_title(item: &Movie) -> &str {
        &item.title
    }
}
