//! Category classification stage

use super::{Outcome, Pacer, Stage};
use crate::classify::classify;
use crate::error::Result;
use crate::store::{Store, SubjectCandidate};
use async_trait::async_trait;

/// Classifies each enriched movie from its plot summary (or overview, when
/// no plot was found) and genre tags. The resolver is the local keyword
/// classifier, so there is no external call and no pacing.
pub struct CategoryStage;

#[async_trait]
impl Stage for CategoryStage {
    type Item = SubjectCandidate;

    fn name(&self) -> &'static str {
        "categorize"
    }

    fn pacer(&self) -> Option<&Pacer> {
        None
    }

    async fn select_pending(&self, store: &Store, limit: u32) -> Result<Vec<SubjectCandidate>> {
        store.movies_missing_subject(limit).await
    }

    async fn process_one(&self, store: &Store, candidate: &SubjectCandidate) -> Result<Outcome> {
        let subject = classify(
            &candidate.title,
            candidate.text.as_deref(),
            candidate.genres.as_deref(),
        );

        store
            .upsert_subject(
                candidate.id,
                subject.category.as_str(),
                subject.occupation,
                subject.is_person,
            )
            .await?;

        Ok(Outcome::Found)
    }

    fn item_title(item: &SubjectCandidate) -> &str {
        &item.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::run_batch;
    use crate::store::Store;
    use tempfile::TempDir;

    async fn seed_enriched(
        store: &Store,
        title: &str,
        tmdb_id: i64,
        overview: &str,
        genres: &[&str],
    ) -> i64 {
        store.insert_title(title).await.unwrap();
        let movie = store.get_movie_by_title(title).await.unwrap().unwrap();
        let genres: Vec<String> = genres.iter().map(|g| g.to_string()).collect();
        store
            .upsert_metadata_found(movie.id, tmdb_id, None, 0, Some(overview), &genres)
            .await
            .unwrap();
        movie.id
    }

    #[tokio::test]
    async fn test_category_stage_classifies_and_links() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(&tmp.path().join("test.db")).await.unwrap();

        seed_enriched(
            &store,
            "Title Shot",
            1,
            "An underdog boxer trains for the championship.",
            &["Drama"],
        )
        .await;
        seed_enriched(
            &store,
            "The Collapse",
            2,
            "A dam bursts and floods the valley below.",
            &["History"],
        )
        .await;

        let report = run_batch(&CategoryStage, &store, 25).await.unwrap();
        assert_eq!(report.committed, 2);

        let counts = store.category_counts().await.unwrap();
        let labels: Vec<&str> = counts.iter().map(|c| c.category.as_str()).collect();
        assert!(labels.contains(&"Athletes"));
        assert!(labels.contains(&"Historical Events"));

        let (people, events) = store.person_split().await.unwrap();
        assert_eq!(people, 1);
        assert_eq!(events, 1);

        // already-classified movies are not reselected
        let report = run_batch(&CategoryStage, &store, 25).await.unwrap();
        assert_eq!(report.selected, 0);
    }

    #[tokio::test]
    async fn test_movies_without_text_are_not_selected() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(&tmp.path().join("test.db")).await.unwrap();

        store.insert_title("No Metadata Yet").await.unwrap();
        store.insert_title("Absent Everywhere").await.unwrap();
        let absent = store
            .get_movie_by_title("Absent Everywhere")
            .await
            .unwrap()
            .unwrap();
        store.mark_metadata_absent(absent.id).await.unwrap();
        store.upsert_plot(absent.id, None).await.unwrap();

        let report = run_batch(&CategoryStage, &store, 25).await.unwrap();
        assert_eq!(report.selected, 0);
    }
}
