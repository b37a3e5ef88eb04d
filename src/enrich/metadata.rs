//! Metadata enrichment stage

use super::{Outcome, Pacer, Stage};
use crate::error::Result;
use crate::store::{Movie, Store};
use crate::tmdb::MetadataSource;
use async_trait::async_trait;

/// Looks up each collected title against the metadata source and records
/// genres, release date, revenue, and overview. A title with no match gets
/// the absence marker and is never reselected.
pub struct MetadataStage<M: MetadataSource> {
    source: M,
    pacer: Pacer,
}

impl<M: MetadataSource> MetadataStage<M> {
    pub fn new(source: M, call_delay_ms: u64) -> Self {
        Self {
            source,
            pacer: Pacer::from_millis(call_delay_ms),
        }
    }

    #[cfg(test)]
    pub fn source(&self) -> &M {
        &self.source
    }
}

#[async_trait]
impl<M: MetadataSource> Stage for MetadataStage<M> {
    type Item = Movie;

    fn name(&self) -> &'static str {
        "metadata"
    }

    fn pacer(&self) -> Option<&Pacer> {
        Some(&self.pacer)
    }

    async fn select_pending(&self, store: &Store, limit: u32) -> Result<Vec<Movie>> {
        store.movies_missing_metadata(limit).await
    }

    async fn process_one(&self, store: &Store, movie: &Movie) -> Result<Outcome> {
        let Some(tmdb_id) = self.source.search(&movie.title).await? else {
            store.mark_metadata_absent(movie.id).await?;
            return Ok(Outcome::Absent);
        };

        // the details fetch is a second external call, so it is paced too
        self.pacer.wait().await;
        let Some(details) = self.source.details(tmdb_id).await? else {
            store.mark_metadata_absent(movie.id).await?;
            return Ok(Outcome::Absent);
        };

        store
            .upsert_metadata_found(
                movie.id,
                details.tmdb_id,
                details.release_date.as_deref(),
                details.revenue,
                details.overview.as_deref(),
                &details.genres,
            )
            .await?;

        Ok(Outcome::Found)
    }

    fn item_title(item: &Movie) -> &str {
        &item.title
    }
}
