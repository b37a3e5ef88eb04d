//! Movie storage using SQLite
//!
//! This module handles all persistent state:
//! - Movies (titles collected by the import step)
//! - Metadata and plot lookup results, including explicit absence markers
//! - Genre / category / release-date dimension tables and their junctions
//! - Subject classifications
//!
//! A row's presence in a dependent table is the sole "already processed"
//! marker; the pending-selection queries below rely on it so a run can be
//! interrupted at any point and resumed.

mod schema;

pub use schema::*;

use crate::config::Config;
use crate::error::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};

/// A collected movie title
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub created_at: String,
}

/// A movie awaiting classification, with its resolved text and genre tags
#[derive(Debug, Clone, FromRow)]
pub struct SubjectCandidate {
    pub id: i64,
    pub title: String,
    pub text: Option<String>,
    pub genres: Option<String>,
}

/// Count of movies per category
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub movie_count: i64,
}

/// Genre frequency within a category
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CategoryGenreCount {
    pub category: String,
    pub genre: String,
    pub movie_count: i64,
}

/// Average revenue per category, revenue > 0 rows only
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub avg_revenue_millions: f64,
    pub movie_count: i64,
}

/// One revenue observation keyed by release year
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct YearRevenue {
    pub year: i64,
    pub revenue_millions: f64,
}

/// Count of movies per occupation label
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OccupationCount {
    pub occupation: String,
    pub movie_count: i64,
}

/// Progress counters across the pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    pub movies: i64,
    pub metadata_attempted: i64,
    pub metadata_found: i64,
    pub plots_attempted: i64,
    pub plots_found: i64,
    pub classified: i64,
}

/// Database handle
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Connect to the database using config paths
    pub async fn connect(config: &Config) -> Result<Self> {
        Self::open(&config.paths.db_file).await
    }

    /// Open the database at a path, creating it and the schema if needed
    pub async fn open(db_path: &std::path::Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        debug!("Connecting to SQLite database at {:?}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };

        if !store.is_initialized().await? {
            store.init_schema().await?;
        }

        Ok(store)
    }

    /// Initialize the database schema (idempotent, additive only)
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Check if the schema has been created
    pub async fn is_initialized(&self) -> Result<bool> {
        let result: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM sqlite_master WHERE type='table' AND name='movies'")
                .fetch_optional(&self.pool)
                .await?;
        Ok(result.is_some())
    }

    // ===== Movie Operations =====

    /// Insert a title, ignoring duplicates. Returns true if a row was added.
    pub async fn insert_title(&self, title: &str) -> Result<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO movies (title, created_at) VALUES (?, ?)")
            .bind(title)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a list of titles, ignoring duplicates. Returns the number added.
    pub async fn import_titles<S: AsRef<str>>(&self, titles: &[S]) -> Result<u32> {
        let mut inserted = 0;
        for title in titles {
            let title = title.as_ref().trim();
            if title.is_empty() {
                continue;
            }
            if self.insert_title(title).await? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Get a movie by title (case-sensitive exact match)
    pub async fn get_movie_by_title(&self, title: &str) -> Result<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE title = ?")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(movie)
    }

    // ===== Pending Selection =====
    //
    // All selections order by movies.id so repeated runs make monotonic
    // forward progress.

    /// Movies with no metadata lookup attempted yet
    pub async fn movies_missing_metadata(&self, limit: u32) -> Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.*
            FROM movies m
            LEFT JOIN metadata d ON d.movie_id = m.id
            WHERE d.id IS NULL
            ORDER BY m.id
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    /// Movies with no plot lookup attempted yet
    pub async fn movies_missing_plot(&self, limit: u32) -> Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.*
            FROM movies m
            WHERE m.id NOT IN (SELECT movie_id FROM plots)
            ORDER BY m.id
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    /// Unclassified movies that have a usable text source.
    ///
    /// The text is the plot summary when one was found, the TMDB overview
    /// otherwise. Movies whose metadata lookup has not run yet are excluded;
    /// classification follows the metadata and plot stages.
    pub async fn movies_missing_subject(&self, limit: u32) -> Result<Vec<SubjectCandidate>> {
        let candidates = sqlx::query_as::<_, SubjectCandidate>(
            r#"
            SELECT m.id, m.title,
                   COALESCE(p.summary, d.overview) AS text,
                   GROUP_CONCAT(g.name, ', ') AS genres
            FROM movies m
            JOIN metadata d ON d.movie_id = m.id
            LEFT JOIN plots p ON p.movie_id = m.id
            LEFT JOIN movie_genres mg ON mg.movie_id = m.id
            LEFT JOIN genres g ON g.id = mg.genre_id
            WHERE m.id NOT IN (SELECT movie_id FROM subjects)
              AND COALESCE(p.summary, d.overview) IS NOT NULL
            GROUP BY m.id, m.title
            ORDER BY m.id
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    // ===== Dimension Operations =====

    /// Insert a genre if it doesn't exist and return its id
    pub async fn get_or_create_genre(&self, name: &str) -> Result<i64> {
        sqlx::query("INSERT OR IGNORE INTO genres (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        let id: i64 = sqlx::query_scalar("SELECT id FROM genres WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    /// Insert a category if it doesn't exist and return its id
    pub async fn get_or_create_category(&self, name: &str) -> Result<i64> {
        sqlx::query("INSERT OR IGNORE INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        let id: i64 = sqlx::query_scalar("SELECT id FROM categories WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    /// Insert a release date if it doesn't exist and return its id
    pub async fn get_or_create_release_date(&self, value: &str) -> Result<i64> {
        sqlx::query("INSERT OR IGNORE INTO release_dates (value) VALUES (?)")
            .bind(value)
            .execute(&self.pool)
            .await?;
        let id: i64 = sqlx::query_scalar("SELECT id FROM release_dates WHERE value = ?")
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    /// Link a movie to a genre, ignoring an existing link
    pub async fn link_movie_genre(&self, movie_id: i64, genre_id: i64) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO movie_genres (movie_id, genre_id) VALUES (?, ?)")
            .bind(movie_id)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Link a movie to a category, ignoring an existing link
    pub async fn link_movie_category(&self, movie_id: i64, category_id: i64) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO movie_categories (movie_id, category_id) VALUES (?, ?)")
            .bind(movie_id)
            .bind(category_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ===== Enrichment Upserts =====

    /// Record a found metadata result: the metadata row plus release-date,
    /// genre, and junction rows
    pub async fn upsert_metadata_found(
        &self,
        movie_id: i64,
        tmdb_id: i64,
        release_date: Option<&str>,
        revenue: i64,
        overview: Option<&str>,
        genres: &[String],
    ) -> Result<()> {
        let release_date_id = match release_date.filter(|d| !d.is_empty()) {
            Some(date) => Some(self.get_or_create_release_date(date).await?),
            None => None,
        };

        sqlx::query(
            r#"
            INSERT INTO metadata (movie_id, tmdb_id, release_date_id, revenue, overview, fetched_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(movie_id) DO UPDATE SET
                tmdb_id = excluded.tmdb_id,
                release_date_id = excluded.release_date_id,
                revenue = excluded.revenue,
                overview = excluded.overview,
                fetched_at = excluded.fetched_at
            "#,
        )
        .bind(movie_id)
        .bind(tmdb_id)
        .bind(release_date_id)
        .bind(revenue)
        .bind(overview)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        for genre in genres {
            let genre_id = self.get_or_create_genre(genre).await?;
            self.link_movie_genre(movie_id, genre_id).await?;
        }

        Ok(())
    }

    /// Record that the metadata lookup found no match, so the movie is never
    /// reselected
    pub async fn mark_metadata_absent(&self, movie_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO metadata (movie_id, tmdb_id, release_date_id, revenue, overview, fetched_at)
            VALUES (?, NULL, NULL, 0, NULL, ?)
            ON CONFLICT(movie_id) DO UPDATE SET fetched_at = excluded.fetched_at
            "#,
        )
        .bind(movie_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Record a plot lookup result; NULL summary marks "looked up, not found"
    pub async fn upsert_plot(&self, movie_id: i64, summary: Option<&str>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO plots (movie_id, summary, fetched_at)
            VALUES (?, ?, ?)
            ON CONFLICT(movie_id) DO UPDATE SET
                summary = excluded.summary,
                fetched_at = excluded.fetched_at
            "#,
        )
        .bind(movie_id)
        .bind(summary)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Record a classification: the subjects row plus the category dimension
    /// and junction link. Recomputation overwrites the subjects row.
    pub async fn upsert_subject(
        &self,
        movie_id: i64,
        category: &str,
        occupation: Option<&str>,
        is_person: bool,
    ) -> Result<()> {
        let category_id = self.get_or_create_category(category).await?;

        sqlx::query(
            r#"
            INSERT INTO subjects (movie_id, category_id, occupation, is_person, classified_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(movie_id) DO UPDATE SET
                category_id = excluded.category_id,
                occupation = excluded.occupation,
                is_person = excluded.is_person,
                classified_at = excluded.classified_at
            "#,
        )
        .bind(movie_id)
        .bind(category_id)
        .bind(occupation)
        .bind(is_person)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        self.link_movie_category(movie_id, category_id).await?;
        Ok(())
    }

    // ===== Statistics =====

    /// Progress counters across the pipeline
    pub async fn pipeline_stats(&self) -> Result<PipelineStats> {
        let movies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;
        let metadata_attempted: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM metadata")
            .fetch_one(&self.pool)
            .await?;
        let metadata_found: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM metadata WHERE tmdb_id IS NOT NULL")
                .fetch_one(&self.pool)
                .await?;
        let plots_attempted: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plots")
            .fetch_one(&self.pool)
            .await?;
        let plots_found: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM plots WHERE summary IS NOT NULL")
                .fetch_one(&self.pool)
                .await?;
        let classified: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
            .fetch_one(&self.pool)
            .await?;

        Ok(PipelineStats {
            movies,
            metadata_attempted,
            metadata_found,
            plots_attempted,
            plots_found,
            classified,
        })
    }

    // ===== Aggregation (read-only, used by the report) =====

    /// Movie counts per category, most frequent first
    pub async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        let counts = sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT c.name AS category, COUNT(*) AS movie_count
            FROM movie_categories mc
            JOIN categories c ON c.id = mc.category_id
            GROUP BY c.name
            ORDER BY movie_count DESC, c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    /// Genre frequency per category. A movie with N genres contributes to
    /// N buckets.
    pub async fn genre_counts_by_category(&self) -> Result<Vec<CategoryGenreCount>> {
        let counts = sqlx::query_as::<_, CategoryGenreCount>(
            r#"
            SELECT c.name AS category, g.name AS genre, COUNT(*) AS movie_count
            FROM movie_categories mc
            JOIN categories c ON c.id = mc.category_id
            JOIN movie_genres mg ON mg.movie_id = mc.movie_id
            JOIN genres g ON g.id = mg.genre_id
            GROUP BY c.name, g.name
            ORDER BY c.name, movie_count DESC, g.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    /// Average revenue per category in millions, revenue > 0 rows only
    pub async fn avg_revenue_by_category(&self) -> Result<Vec<CategoryRevenue>> {
        let revenues = sqlx::query_as::<_, CategoryRevenue>(
            r#"
            SELECT c.name AS category,
                   AVG(d.revenue) / 1000000.0 AS avg_revenue_millions,
                   COUNT(*) AS movie_count
            FROM movie_categories mc
            JOIN categories c ON c.id = mc.category_id
            JOIN metadata d ON d.movie_id = mc.movie_id
            WHERE d.revenue > 0
            GROUP BY c.name
            ORDER BY avg_revenue_millions DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(revenues)
    }

    /// One row per movie with revenue > 0 and a release date, ordered by year
    pub async fn revenue_by_year(&self) -> Result<Vec<YearRevenue>> {
        let rows = sqlx::query_as::<_, YearRevenue>(
            r#"
            SELECT CAST(substr(rd.value, 1, 4) AS INTEGER) AS year,
                   d.revenue / 1000000.0 AS revenue_millions
            FROM metadata d
            JOIN release_dates rd ON rd.id = d.release_date_id
            WHERE d.revenue > 0 AND rd.value != ''
            ORDER BY year, revenue_millions DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Top occupations by movie count
    pub async fn occupation_counts(&self, limit: u32) -> Result<Vec<OccupationCount>> {
        let counts = sqlx::query_as::<_, OccupationCount>(
            r#"
            SELECT occupation, COUNT(*) AS movie_count
            FROM subjects
            WHERE occupation IS NOT NULL
            GROUP BY occupation
            ORDER BY movie_count DESC, occupation
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    /// Counts of person-centered vs event-centered subjects
    pub async fn person_split(&self) -> Result<(i64, i64)> {
        let row: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(CASE WHEN is_person = 1 THEN 1 ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN is_person = 0 THEN 1 ELSE 0 END), 0)
            FROM subjects
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Store, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(&tmp.path().join("test.db")).await.unwrap();
        (store, tmp)
    }

    #[tokio::test]
    async fn test_title_insert_or_ignore() {
        let (store, _tmp) = setup_test_db().await;

        assert!(store.insert_title("Apollo 13").await.unwrap());
        assert!(!store.insert_title("Apollo 13").await.unwrap());

        let inserted = store
            .import_titles(&["Apollo 13", "Moneyball", "", "  "])
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        let movie = store.get_movie_by_title("Moneyball").await.unwrap();
        assert!(movie.is_some());
    }

    #[tokio::test]
    async fn test_dimension_uniqueness() {
        let (store, _tmp) = setup_test_db().await;

        let a = store.get_or_create_genre("Drama").await.unwrap();
        let b = store.get_or_create_genre("Drama").await.unwrap();
        assert_eq!(a, b);

        let a = store.get_or_create_category("Athletes").await.unwrap();
        let b = store.get_or_create_category("Athletes").await.unwrap();
        assert_eq!(a, b);

        let a = store.get_or_create_release_date("1995-06-30").await.unwrap();
        let b = store.get_or_create_release_date("1995-06-30").await.unwrap();
        assert_eq!(a, b);

        // case-sensitive exact match: a different casing is a different row
        let drama = store.get_or_create_genre("Drama").await.unwrap();
        let lower = store.get_or_create_genre("drama").await.unwrap();
        assert_ne!(drama, lower);

        let genre_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(genre_rows, 2);
    }

    #[tokio::test]
    async fn test_junction_uniqueness() {
        let (store, _tmp) = setup_test_db().await;

        store.insert_title("Rush").await.unwrap();
        let movie = store.get_movie_by_title("Rush").await.unwrap().unwrap();
        let genre_id = store.get_or_create_genre("Drama").await.unwrap();

        store.link_movie_genre(movie.id, genre_id).await.unwrap();
        store.link_movie_genre(movie.id, genre_id).await.unwrap();

        let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movie_genres")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(links, 1);
    }

    #[tokio::test]
    async fn test_metadata_markers() {
        let (store, _tmp) = setup_test_db().await;

        store.insert_title("Found Movie").await.unwrap();
        store.insert_title("Missing Movie").await.unwrap();
        let found = store.get_movie_by_title("Found Movie").await.unwrap().unwrap();
        let missing = store
            .get_movie_by_title("Missing Movie")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(store.movies_missing_metadata(25).await.unwrap().len(), 2);

        store
            .upsert_metadata_found(
                found.id,
                603,
                Some("1999-03-30"),
                463000000,
                Some("A hacker learns the truth."),
                &["Action".to_string(), "Science Fiction".to_string()],
            )
            .await
            .unwrap();
        store.mark_metadata_absent(missing.id).await.unwrap();

        // both outcomes are terminal markers
        assert!(store.movies_missing_metadata(25).await.unwrap().is_empty());

        let stats = store.pipeline_stats().await.unwrap();
        assert_eq!(stats.metadata_attempted, 2);
        assert_eq!(stats.metadata_found, 1);
    }

    #[tokio::test]
    async fn test_plot_sentinel() {
        let (store, _tmp) = setup_test_db().await;

        store.insert_title("Some Movie").await.unwrap();
        let movie = store.get_movie_by_title("Some Movie").await.unwrap().unwrap();

        assert_eq!(store.movies_missing_plot(25).await.unwrap().len(), 1);

        // NULL summary marks "looked up, not found" and is never reselected
        store.upsert_plot(movie.id, None).await.unwrap();
        assert!(store.movies_missing_plot(25).await.unwrap().is_empty());

        let stats = store.pipeline_stats().await.unwrap();
        assert_eq!(stats.plots_attempted, 1);
        assert_eq!(stats.plots_found, 0);
    }

    #[tokio::test]
    async fn test_subject_upsert_overwrites() {
        let (store, _tmp) = setup_test_db().await;

        store.insert_title("The Fighter").await.unwrap();
        let movie = store.get_movie_by_title("The Fighter").await.unwrap().unwrap();

        store
            .upsert_subject(movie.id, "Other", None, true)
            .await
            .unwrap();
        store
            .upsert_subject(movie.id, "Athletes", Some("Boxer"), true)
            .await
            .unwrap();

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let occupation: Option<String> =
            sqlx::query_scalar("SELECT occupation FROM subjects WHERE movie_id = ?")
                .bind(movie.id)
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert_eq!(occupation.as_deref(), Some("Boxer"));
    }

    #[tokio::test]
    async fn test_subject_candidates_prefer_plot_text() {
        let (store, _tmp) = setup_test_db().await;

        store.insert_title("With Plot").await.unwrap();
        store.insert_title("Overview Only").await.unwrap();
        store.insert_title("No Text").await.unwrap();
        let with_plot = store.get_movie_by_title("With Plot").await.unwrap().unwrap();
        let overview_only = store
            .get_movie_by_title("Overview Only")
            .await
            .unwrap()
            .unwrap();
        let no_text = store.get_movie_by_title("No Text").await.unwrap().unwrap();

        store
            .upsert_metadata_found(with_plot.id, 1, None, 0, Some("the overview"), &[])
            .await
            .unwrap();
        store
            .upsert_plot(with_plot.id, Some("the plot summary"))
            .await
            .unwrap();
        store
            .upsert_metadata_found(overview_only.id, 2, None, 0, Some("only overview"), &[])
            .await
            .unwrap();
        store.mark_metadata_absent(no_text.id).await.unwrap();

        let candidates = store.movies_missing_subject(25).await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].text.as_deref(), Some("the plot summary"));
        assert_eq!(candidates[1].text.as_deref(), Some("only overview"));
    }

    #[tokio::test]
    async fn test_selection_order_is_insertion_order() {
        let (store, _tmp) = setup_test_db().await;

        for title in ["First", "Second", "Third"] {
            store.insert_title(title).await.unwrap();
        }

        let pending = store.movies_missing_metadata(2).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].title, "First");
        assert_eq!(pending[1].title, "Second");
    }
}
