//! Import command implementation
//!
//! Consumes an ordered list of movie titles (one per line) produced by an
//! upstream collection step and inserts them by unique title, tolerating
//! duplicates across repeated runs.

use crate::error::Result;
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Statistics from a title import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStats {
    pub read: usize,
    pub inserted: u32,
    pub total_movies: i64,
}

/// Import titles from a newline-delimited file
pub async fn cmd_import(store: &Store, path: &Path) -> Result<ImportStats> {
    info!("Importing titles from {}", path.display());

    let content = std::fs::read_to_string(path)?;
    let titles: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let inserted = store.import_titles(&titles).await?;
    let total_movies = store.pipeline_stats().await?.movies;

    Ok(ImportStats {
        read: titles.len(),
        inserted,
        total_movies,
    })
}

/// Print import stats to console
pub fn print_import_stats(stats: &ImportStats) {
    println!("\n✓ Import complete");
    println!("  Titles read: {}", stats.read);
    println!("  New movies inserted: {}", stats.inserted);
    println!("  Total movies in database: {}", stats.total_movies);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_import_tolerates_duplicates() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(&tmp.path().join("test.db")).await.unwrap();

        let list = tmp.path().join("titles.txt");
        std::fs::write(&list, "Apollo 13\nMoneyball\n\n  Apollo 13  \n").unwrap();

        let stats = cmd_import(&store, &list).await.unwrap();
        assert_eq!(stats.read, 3);
        assert_eq!(stats.inserted, 2);
        assert_eq!(stats.total_movies, 2);

        // a repeated run inserts nothing new
        let stats = cmd_import(&store, &list).await.unwrap();
        assert_eq!(stats.inserted, 0);
        assert_eq!(stats.total_movies, 2);
    }
}
