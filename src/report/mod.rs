//! Aggregated statistics over the enriched store
//!
//! Read-only queries composed into a sectioned text report. Safe to run at
//! any time; output is deterministic for a fixed snapshot of the store.

use crate::error::Result;
use crate::store::{
    CategoryCount, CategoryGenreCount, CategoryRevenue, OccupationCount, Store, YearRevenue,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Per-year revenue summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i64,
    pub movie_count: usize,
    pub avg_revenue_millions: f64,
    pub max_revenue_millions: f64,
}

/// Overall revenue-by-year statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueOverview {
    pub movie_count: usize,
    pub min_year: i64,
    pub max_year: i64,
    pub avg_revenue_millions: f64,
    pub max_revenue_millions: f64,
}

/// The full aggregated report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub total_classified: i64,
    pub category_counts: Vec<CategoryCount>,
    pub genre_counts: Vec<CategoryGenreCount>,
    pub category_revenues: Vec<CategoryRevenue>,
    pub year_summaries: Vec<YearSummary>,
    pub revenue_overview: Option<RevenueOverview>,
    pub top_occupations: Vec<OccupationCount>,
    pub person_count: i64,
    pub event_count: i64,
}

/// Group raw per-movie revenue rows into per-year summaries plus the
/// overall statistics. Rows arrive ordered by year.
fn summarize_years(rows: &[YearRevenue]) -> (Vec<YearSummary>, Option<RevenueOverview>) {
    if rows.is_empty() {
        return (Vec::new(), None);
    }

    let mut summaries: Vec<YearSummary> = Vec::new();
    for row in rows {
        match summaries.last_mut() {
            Some(current) if current.year == row.year => {
                let total =
                    current.avg_revenue_millions * current.movie_count as f64 + row.revenue_millions;
                current.movie_count += 1;
                current.avg_revenue_millions = total / current.movie_count as f64;
                current.max_revenue_millions = current.max_revenue_millions.max(row.revenue_millions);
            }
            _ => summaries.push(YearSummary {
                year: row.year,
                movie_count: 1,
                avg_revenue_millions: row.revenue_millions,
                max_revenue_millions: row.revenue_millions,
            }),
        }
    }

    let total: f64 = rows.iter().map(|r| r.revenue_millions).sum();
    let max = rows
        .iter()
        .map(|r| r.revenue_millions)
        .fold(f64::MIN, f64::max);
    let overview = RevenueOverview {
        movie_count: rows.len(),
        min_year: summaries.first().map(|s| s.year).unwrap_or(0),
        max_year: summaries.last().map(|s| s.year).unwrap_or(0),
        avg_revenue_millions: total / rows.len() as f64,
        max_revenue_millions: max,
    };

    (summaries, Some(overview))
}

/// Build the full report from the store
pub async fn build_report(store: &Store) -> Result<Report> {
    let stats = store.pipeline_stats().await?;
    let category_counts = store.category_counts().await?;
    let genre_counts = store.genre_counts_by_category().await?;
    let category_revenues = store.avg_revenue_by_category().await?;
    let year_rows = store.revenue_by_year().await?;
    let (year_summaries, revenue_overview) = summarize_years(&year_rows);
    let top_occupations = store.occupation_counts(10).await?;
    let (person_count, event_count) = store.person_split().await?;

    Ok(Report {
        total_classified: stats.classified,
        category_counts,
        genre_counts,
        category_revenues,
        year_summaries,
        revenue_overview,
        top_occupations,
        person_count,
        event_count,
    })
}

/// Render the report as the labeled text document
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);
    let dash = "-".repeat(60);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "TRUE STORY MOVIE SUBJECT ANALYSIS");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out);
    let _ = writeln!(out, "TOTAL MOVIES ANALYZED: {}", report.total_classified);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out);

    let _ = writeln!(out, "1. COUNT OF MOVIES BY SUBJECT CATEGORY");
    let _ = writeln!(out, "{}", dash);
    for count in &report.category_counts {
        let _ = writeln!(out, "{}: {} movies", count.category, count.movie_count);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "2. MOVIE GENRES BY SUBJECT CATEGORY");
    let _ = writeln!(out, "{}", dash);
    let _ = writeln!(
        out,
        "Note: a movie with multiple genres is counted in each genre bucket."
    );
    let mut current_category: Option<&str> = None;
    for row in &report.genre_counts {
        if current_category != Some(row.category.as_str()) {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}:", row.category);
            current_category = Some(row.category.as_str());
        }
        let _ = writeln!(out, "  {}: {} movies", row.genre, row.movie_count);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "3. AVERAGE REVENUE BY SUBJECT CATEGORY (in millions USD)");
    let _ = writeln!(out, "{}", dash);
    for revenue in &report.category_revenues {
        let _ = writeln!(
            out,
            "{}: ${:.2}M (based on {} movies)",
            revenue.category, revenue.avg_revenue_millions, revenue.movie_count
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "4. REVENUE BY RELEASE YEAR");
    let _ = writeln!(out, "{}", dash);
    for summary in &report.year_summaries {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", summary.year);
        let _ = writeln!(out, "  Movies: {}", summary.movie_count);
        let _ = writeln!(out, "  Average Revenue: ${:.2}M", summary.avg_revenue_millions);
        let _ = writeln!(out, "  Max Revenue: ${:.2}M", summary.max_revenue_millions);
    }
    if let Some(overview) = &report.revenue_overview {
        let _ = writeln!(out);
        let _ = writeln!(out, "OVERALL:");
        let _ = writeln!(
            out,
            "  Total movies with revenue data: {}",
            overview.movie_count
        );
        let _ = writeln!(out, "  Year range: {} - {}", overview.min_year, overview.max_year);
        let _ = writeln!(
            out,
            "  Average revenue across all years: ${:.2}M",
            overview.avg_revenue_millions
        );
        let _ = writeln!(out, "  Highest revenue: ${:.2}M", overview.max_revenue_millions);
    } else {
        let _ = writeln!(out, "No revenue data available.");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "5. TOP OCCUPATIONS");
    let _ = writeln!(out, "{}", dash);
    for occupation in &report.top_occupations {
        let _ = writeln!(
            out,
            "{}: {} movies",
            occupation.occupation, occupation.movie_count
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "6. PEOPLE VS EVENTS");
    let _ = writeln!(out, "{}", dash);
    let _ = writeln!(out, "About people: {}", report.person_count);
    let _ = writeln!(out, "About events/books: {}", report.event_count);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "END OF CALCULATIONS");
    let _ = writeln!(out, "{}", rule);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup() -> (Store, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(&tmp.path().join("test.db")).await.unwrap();
        (store, tmp)
    }

    async fn seed_movie(
        store: &Store,
        title: &str,
        tmdb_id: i64,
        release_date: Option<&str>,
        revenue: i64,
        genres: &[&str],
        category: &str,
    ) {
        store.insert_title(title).await.unwrap();
        let movie = store.get_movie_by_title(title).await.unwrap().unwrap();
        let genres: Vec<String> = genres.iter().map(|g| g.to_string()).collect();
        store
            .upsert_metadata_found(movie.id, tmdb_id, release_date, revenue, Some("text"), &genres)
            .await
            .unwrap();
        store
            .upsert_subject(movie.id, category, None, category != "Historical Events")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_average_revenue_in_millions() {
        let (store, _tmp) = setup().await;

        seed_movie(&store, "A", 1, None, 100_000_000, &[], "Athletes").await;
        seed_movie(&store, "B", 2, None, 50_000_000, &[], "Athletes").await;
        // zero revenue rows are excluded from the average
        seed_movie(&store, "C", 3, None, 0, &[], "Athletes").await;

        let report = build_report(&store).await.unwrap();
        assert_eq!(report.category_revenues.len(), 1);
        let athletes = &report.category_revenues[0];
        assert_eq!(athletes.category, "Athletes");
        assert_eq!(athletes.movie_count, 2);
        assert!((athletes.avg_revenue_millions - 75.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_genre_multi_counting() {
        let (store, _tmp) = setup().await;

        seed_movie(
            &store,
            "Multi",
            1,
            None,
            0,
            &["Drama", "History"],
            "Scientists",
        )
        .await;

        let report = build_report(&store).await.unwrap();
        // one movie with two genres contributes to two buckets
        assert_eq!(report.genre_counts.len(), 2);
        assert!(report.genre_counts.iter().all(|g| g.movie_count == 1));
    }

    #[tokio::test]
    async fn test_year_summaries() {
        let (store, _tmp) = setup().await;

        seed_movie(&store, "A", 1, Some("1995-06-30"), 100_000_000, &[], "Other").await;
        seed_movie(&store, "B", 2, Some("1995-11-22"), 50_000_000, &[], "Other").await;
        seed_movie(&store, "C", 3, Some("2001-01-01"), 200_000_000, &[], "Other").await;

        let report = build_report(&store).await.unwrap();
        assert_eq!(report.year_summaries.len(), 2);

        let y1995 = &report.year_summaries[0];
        assert_eq!(y1995.year, 1995);
        assert_eq!(y1995.movie_count, 2);
        assert!((y1995.avg_revenue_millions - 75.0).abs() < 1e-9);
        assert!((y1995.max_revenue_millions - 100.0).abs() < 1e-9);

        let overview = report.revenue_overview.unwrap();
        assert_eq!(overview.movie_count, 3);
        assert_eq!(overview.min_year, 1995);
        assert_eq!(overview.max_year, 2001);
        assert!((overview.max_revenue_millions - 200.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_render_contains_sections() {
        let (store, _tmp) = setup().await;
        seed_movie(&store, "A", 1, Some("1995-06-30"), 100_000_000, &["Drama"], "Athletes").await;

        let report = build_report(&store).await.unwrap();
        let text = render_report(&report);

        assert!(text.contains("TOTAL MOVIES ANALYZED: 1"));
        assert!(text.contains("1. COUNT OF MOVIES BY SUBJECT CATEGORY"));
        assert!(text.contains("Athletes: 1 movies"));
        assert!(text.contains("4. REVENUE BY RELEASE YEAR"));
        assert!(text.contains("Year range: 1995 - 1995"));
    }

    #[tokio::test]
    async fn test_empty_store_report() {
        let (store, _tmp) = setup().await;
        let report = build_report(&store).await.unwrap();
        assert_eq!(report.total_classified, 0);
        assert!(report.revenue_overview.is_none());

        let text = render_report(&report);
        assert!(text.contains("No revenue data available."));
    }
}
